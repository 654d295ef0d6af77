/// Ordered list of wheel entries. Position is identity; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<String>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the trimmed text and returns its index. Blank text is ignored.
    pub fn append(&mut self, text: &str) -> Option<usize> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.items.push(trimmed.to_string());
        Some(self.items.len() - 1)
    }

    /// Removes one entry; later entries shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ItemStore {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut store = Self::new();
        for text in iter {
            store.append(text.as_ref());
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_ignores_blank_text() {
        let mut store = ItemStore::new();
        assert_eq!(store.append(""), None);
        assert_eq!(store.append("   \t "), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn append_stores_trimmed_text() {
        let mut store = ItemStore::new();
        assert_eq!(store.append("  X  "), Some(0));
        assert_eq!(store.get(0), Some("X"));
    }

    #[test]
    fn duplicates_are_kept() {
        let store: ItemStore = ["A", "A", "B"].into_iter().collect();
        assert_eq!(store.iter().collect::<Vec<_>>(), vec!["A", "A", "B"]);
    }

    #[test]
    fn remove_shifts_later_items_down() {
        let mut store: ItemStore = ["A", "B", "C", "D"].into_iter().collect();
        assert_eq!(store.remove_at(1), Some("B".to_string()));
        assert_eq!(store.iter().collect::<Vec<_>>(), vec!["A", "C", "D"]);
        assert_eq!(store.get(1), Some("C"));
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut store: ItemStore = ["A"].into_iter().collect();
        assert_eq!(store.remove_at(3), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_empties_the_list() {
        let mut store: ItemStore = ["A", "B"].into_iter().collect();
        store.clear();
        assert!(store.is_empty());
    }
}
