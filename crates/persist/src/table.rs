use qdwarp_common::WarpPosition;

/// Insertion-ordered map from warp name to position.
///
/// Lookups are linear; warp lists are small and order matters more than
/// lookup speed. Overwriting a name keeps its original slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarpTable {
    entries: Vec<(String, WarpPosition)>,
}

impl WarpTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&WarpPosition> {
        self.index_of(name).map(|i| &self.entries[i].1)
    }

    /// Insert or overwrite. Returns the previous position if there was one.
    pub fn insert(&mut self, name: impl Into<String>, pos: WarpPosition) -> Option<WarpPosition> {
        let name = name.into();
        match self.index_of(&name) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, pos)),
            None => {
                self.entries.push((name, pos));
                None
            }
        }
    }

    /// Remove an entry, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<WarpPosition> {
        self.index_of(name).map(|i| self.entries.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WarpPosition)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}
