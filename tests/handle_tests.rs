//! Handle & Store Integration Tests
//!
//! Tests for:
//! - Handle validity across growth and removal
//! - Generational detection of slot reuse
//! - Store identity: handles never cross graphs
//! - Handles as map keys

use gltf_graph::Gltf;
use gltf_graph::assets::Store;
use gltf_graph::scene::Node;
use rustc_hash::FxHashMap;

// ============================================================================
// Validity
// ============================================================================

#[test]
fn handle_valid_immediately_after_push() {
    let mut store = Store::new();
    let h = store.push("first".to_string());
    assert_eq!(store.get(h).map(String::as_str), Some("first"));
}

#[test]
fn handle_survives_unrelated_pushes() {
    let mut store = Store::new();
    let first = store.push(0_u64);

    // Force several reallocations of the backing storage
    let later: Vec<_> = (1..1000_u64).map(|i| store.push(i)).collect();

    assert_eq!(store.get(first), Some(&0));
    assert_eq!(store.get(later[500]), Some(&501));
    assert_eq!(store.len(), 1000);
}

#[test]
fn handle_invalid_after_removal() {
    let mut store = Store::new();
    let a = store.push('a');
    let b = store.push('b');

    assert_eq!(store.remove(a), Some('a'));
    assert!(store.get(a).is_none());
    assert!(!store.contains(a));
    assert_eq!(store.get(b), Some(&'b'));

    // Removing twice is a no-op
    assert_eq!(store.remove(a), None);
}

#[test]
fn stale_handle_detects_slot_reuse() {
    let mut store = Store::new();
    let old = store.push(1);
    store.remove(old);
    let new = store.push(2);

    assert_ne!(old, new);
    assert!(store.get(old).is_none());
    assert_eq!(store[new], 2);
}

#[test]
fn mutation_through_handle() {
    let mut store = Store::new();
    let h = store.push(vec![1, 2]);
    store.get_mut(h).unwrap().push(3);
    store[h].push(4);
    assert_eq!(store[h], vec![1, 2, 3, 4]);
}

#[test]
#[should_panic(expected = "invalid handle")]
fn indexing_with_stale_handle_panics() {
    let mut store = Store::new();
    let h = store.push(1);
    store.remove(h);
    let _ = store[h];
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn positions_follow_insertion_order() {
    let mut store = Store::new();
    let handles: Vec<_> = ["a", "b", "c"].into_iter().map(|s| store.push(s)).collect();

    for (i, &h) in handles.iter().enumerate() {
        assert_eq!(store.handle_at(i), Some(h));
        assert_eq!(store.index_of(h), Some(i));
    }
    assert_eq!(store.handle_at(3), None);
    assert_eq!(store.handles().collect::<Vec<_>>(), handles);
}

#[test]
fn positions_shift_after_removal() {
    let mut store = Store::new();
    let a = store.push("a");
    let b = store.push("b");
    let c = store.push("c");

    store.remove(b);
    assert_eq!(store.index_of(a), Some(0));
    assert_eq!(store.index_of(c), Some(1));
    assert_eq!(store.index_of(b), None);
    assert_eq!(store.iter().map(|(_, v)| *v).collect::<Vec<_>>(), vec!["a", "c"]);
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn handles_from_different_stores_differ() {
    let mut first = Store::new();
    let mut second = Store::new();
    let a = first.push(1);
    let b = second.push(1);

    assert_ne!(a, b);
    assert_ne!(first.id(), second.id());
    assert!(second.get(a).is_none());
    assert!(first.get(b).is_none());
}

#[test]
fn node_handle_from_another_graph_is_invalid() {
    let mut one = Gltf::default();
    let mut two = Gltf::default();
    let a = one.create_node("a");
    let _ = two.create_node("b");

    assert!(one.get_node(a).is_some());
    assert!(two.get_node(a).is_none());
}

#[test]
fn handles_work_as_map_keys() {
    let mut store: Store<Node> = Store::new();
    let a = store.push(Node::new("a"));
    let b = store.push(Node::new("b"));

    let mut depth = FxHashMap::default();
    depth.insert(a, 0);
    depth.insert(b, 1);
    depth.insert(a, 2);

    assert_eq!(depth.len(), 2);
    assert_eq!(depth[&a], 2);
    assert_eq!(depth[&b], 1);
}
