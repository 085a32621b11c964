use dashmap::DashMap;

/// The authoritative key-value table for the keys this node owns.
///
/// Each operation touches one key and runs entirely under that key's shard
/// lock, so operations on the same key never interleave. The table itself is
/// never handed out.
#[derive(Debug, Default)]
pub struct LocalStore {
    data: DashMap<String, String>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: String, value: String) {
        self.data.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    /// Removes `key` and returns how many entries were removed (0 or 1).
    pub fn delete(&self, key: &str) -> u64 {
        match self.data.remove(key) {
            Some(_) => 1,
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
