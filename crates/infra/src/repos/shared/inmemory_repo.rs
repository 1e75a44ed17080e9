use nudge_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

/// Inserts `val` unless a stored item conflicts with it. The check and the
/// insert happen under the same lock. Returns whether `val` was inserted.
pub fn insert_unless<T: Clone, F: Fn(&T) -> bool>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    conflicts: F,
) -> bool {
    let mut collection = collection.lock().unwrap();
    if collection.iter().any(|item| conflicts(item)) {
        return false;
    }
    collection.push(val.clone());
    true
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

/// Replaces the stored item with the same id as `val` if `compare` accepts
/// the stored version. Returns whether anything was replaced.
pub fn save_if<T: Clone + Entity, F: Fn(&T) -> bool>(
    val: &T,
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> bool {
    let mut collection = collection.lock().unwrap();
    for item in collection.iter_mut() {
        if item.id() == val.id() && compare(item) {
            *item = val.clone();
            return true;
        }
    }
    false
}
