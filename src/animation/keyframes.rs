//! Keyframe extraction and programmatic keyframes.
//!
//! Readers only accept `FLOAT` accessors of the expected shape. Normalized integer
//! rotations are reported as [`GltfError::AccessorMismatch`](crate::GltfError).

use glam::{Quat, Vec3};

use crate::animation::clip::{
    Animation, AnimationSampler, Channel, InterpolationMode, Target, TargetPath,
};
use crate::assets::Handle;
use crate::errors::Result;
use crate::gltf::Gltf;
use crate::resources::accessor::{Accessor, ComponentType, Dimensions};
use crate::resources::buffer::{Buffer, BufferView};
use crate::scene::node::Node;

/// Decodes every element of an `N`-component float accessor, honoring its stride.
fn read_floats<const N: usize>(gltf: &Gltf, index: usize, dimensions: Dimensions) -> Result<Vec<[f32; N]>> {
    let accessor = gltf.accessor(index);
    accessor.expect_layout(ComponentType::F32, dimensions)?;

    let data = accessor.get_data(gltf)?;
    let stride = accessor.get_stride(gltf);
    let size = accessor.element_size();

    Ok((0..accessor.count)
        .map(|i| bytemuck::pod_read_unaligned(&data[i * stride..i * stride + size]))
        .collect())
}

impl Animation {
    fn sampler(&self, index: usize) -> Option<&AnimationSampler> {
        self.samplers.get(index)
    }

    /// Keyframe times of sampler `sampler`; empty when the sampler does not exist.
    pub fn get_times(&self, sampler: usize, gltf: &Gltf) -> Result<Vec<f32>> {
        let Some(sampler) = self.sampler(sampler) else {
            return Ok(Vec::new());
        };
        let times = read_floats::<1>(gltf, sampler.input, Dimensions::Scalar)?;
        Ok(times.into_iter().map(|[t]| t).collect())
    }

    /// Rotation keyframes (xyzw) of sampler `sampler`; empty when it does not exist.
    pub fn get_rotations(&self, sampler: usize, gltf: &Gltf) -> Result<Vec<Quat>> {
        let Some(sampler) = self.sampler(sampler) else {
            return Ok(Vec::new());
        };
        let values = read_floats::<4>(gltf, sampler.output, Dimensions::Vec4)?;
        Ok(values.into_iter().map(Quat::from_array).collect())
    }

    pub fn get_translations(&self, sampler: usize, gltf: &Gltf) -> Result<Vec<Vec3>> {
        let Some(sampler) = self.sampler(sampler) else {
            return Ok(Vec::new());
        };
        let values = read_floats::<3>(gltf, sampler.output, Dimensions::Vec3)?;
        Ok(values.into_iter().map(Vec3::from_array).collect())
    }

    pub fn get_scales(&self, sampler: usize, gltf: &Gltf) -> Result<Vec<Vec3>> {
        let Some(sampler) = self.sampler(sampler) else {
            return Ok(Vec::new());
        };
        let values = read_floats::<3>(gltf, sampler.output, Dimensions::Vec3)?;
        Ok(values.into_iter().map(Vec3::from_array).collect())
    }

    /// Largest keyframe time over every channel, never below `time.max`.
    pub fn find_max_time(&self, gltf: &Gltf) -> Result<f32> {
        let mut max = self.time.max;
        for channel in &self.channels {
            for t in self.get_times(channel.sampler, gltf)? {
                max = max.max(t);
            }
        }
        Ok(max)
    }

    /// Final value of the last rotation channel that has keyframes, or identity.
    pub fn find_last_rotation(&self, gltf: &Gltf) -> Result<Quat> {
        for channel in self.channels.iter().rev() {
            if channel.target.path != TargetPath::Rotation {
                continue;
            }
            if let Some(&last) = self.get_rotations(channel.sampler, gltf)?.last() {
                return Ok(last);
            }
        }
        Ok(Quat::IDENTITY)
    }
}

impl Gltf {
    /// Appends a resident buffer, a view over all of it and a tightly packed accessor.
    /// Returns the accessor index.
    fn push_float_accessor(&mut self, bytes: Vec<u8>, dimensions: Dimensions, count: usize) -> usize {
        let byte_length = bytes.len();
        self.buffers.push(Buffer::from_bytes(bytes));
        self.buffer_views.push(BufferView {
            buffer: self.buffers.len() - 1,
            byte_length,
            ..Default::default()
        });
        self.accessors.push(Accessor::new(
            self.buffer_views.len() - 1,
            ComponentType::F32,
            dimensions,
            count,
        ));
        self.accessors.len() - 1
    }

    /// Adds a linear rotation channel driving `node` through the given keyframes.
    /// Returns the new channel's index.
    ///
    /// # Panics
    /// If `animation` is out of range, `node` is invalid, or the slices differ in
    /// length.
    pub fn add_rotation(
        &mut self,
        animation: usize,
        node: Handle<Node>,
        times: &[f32],
        rotations: &[Quat],
    ) -> usize {
        assert!(animation < self.animations.len(), "animation {animation} out of range");
        assert_eq!(
            times.len(),
            rotations.len(),
            "times and rotations count does not match"
        );
        let node_index = self.position_of(node);

        let input = self.push_float_accessor(
            bytemuck::cast_slice::<f32, u8>(times).to_vec(),
            Dimensions::Scalar,
            times.len(),
        );
        let values: Vec<[f32; 4]> = rotations.iter().map(|q| q.to_array()).collect();
        let output = self.push_float_accessor(
            bytemuck::cast_slice::<[f32; 4], u8>(&values).to_vec(),
            Dimensions::Vec4,
            rotations.len(),
        );

        let animation = &mut self.animations[animation];
        animation.samplers.push(AnimationSampler {
            input,
            output,
            interpolation: InterpolationMode::Linear,
        });
        animation.channels.push(Channel {
            sampler: animation.samplers.len() - 1,
            target: Target {
                node_index: Some(node_index),
                node: Some(node),
                path: TargetPath::Rotation,
            },
        });
        if let Some(&last) = times.iter().max_by(|a, b| a.total_cmp(b)) {
            animation.time.max = animation.time.max.max(last);
        }
        animation.channels.len() - 1
    }

    /// Adds a channel rotating `node` from the animation's last rotation at its
    /// current end time to `rotation` at `time`.
    ///
    /// # Panics
    /// If `time` is not greater than the animation's current max time.
    pub fn append_rotation(
        &mut self,
        animation: usize,
        node: Handle<Node>,
        time: f32,
        rotation: Quat,
    ) -> Result<usize> {
        let clip = &self.animations[animation];
        let max_time = clip.find_max_time(self)?;
        assert!(
            time > max_time,
            "target time {time} should be greater than current max time {max_time}"
        );
        let last_rotation = clip.find_last_rotation(self)?;

        self.animations[animation].time.max = max_time;
        Ok(self.add_rotation(animation, node, &[max_time, time], &[last_rotation, rotation]))
    }
}
