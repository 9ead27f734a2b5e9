pub mod handle;
pub mod io;
pub mod loaders;
pub mod settings;
pub mod storage;

pub use handle::{Handle, StoreId};
pub use io::{AssetReader, BufferSource, FileAssetReader};
pub use loaders::GltfLoader;
pub use settings::{LoadSettings, SelfChildPolicy};
pub use storage::Store;
