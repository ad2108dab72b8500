//! Insertion-ordered entity indices
//!
//! Every reconstruction step keys partially-built documents by a primary
//! key drawn from the dump. Output arrays must come out in source row
//! order on every run (the whole pipeline is expected to be idempotent),
//! so a plain HashMap is not enough: iteration order is tracked
//! separately, by key insertion.

use crate::sql::value::JoinKey;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct EntityIndex {
    keys: Vec<JoinKey>,
    map: HashMap<JoinKey, Value>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document. Re-inserting an existing key replaces the
    /// document but keeps its original position.
    pub fn insert(&mut self, key: JoinKey, doc: Value) {
        if !self.map.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.map.insert(key, doc);
    }

    pub fn get(&self, key: &JoinKey) -> Option<&Value> {
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &JoinKey) -> Option<&mut Value> {
        self.map.get_mut(key)
    }

    pub fn contains(&self, key: &JoinKey) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Documents in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.keys.iter().filter_map(|k| self.map.get(k))
    }

    /// Key/document pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&JoinKey, &Value)> {
        self.keys.iter().filter_map(|k| self.map.get(k).map(|v| (k, v)))
    }
}
