use std::collections::HashSet;

/// Competition ids already announced during this process.
///
/// Starts empty and only grows; nothing is written to disk, so a restart
/// announces every active competition once more.
#[derive(Debug, Default, Clone)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `id` is offered and records it as seen.
    pub fn is_new(&mut self, id: &str) -> bool {
        if self.ids.contains(id) {
            return false;
        }
        self.ids.insert(id.to_string())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_wins() {
        let mut seen = SeenSet::new();
        assert!(seen.is_empty());
        assert!(seen.is_new("C1"));
        assert!(!seen.is_new("C1"));
        assert!(seen.is_new("C2"));
        assert_eq!(seen.len(), 2);
        assert!(seen.contains("C1"));
    }

    #[test]
    fn test_seeded_ids_are_not_new() {
        let mut seen: SeenSet = ["C1"].into_iter().collect();
        assert!(!seen.is_new("C1"));
        assert!(seen.is_new("C3"));
    }
}
