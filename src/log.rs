use serde::{
    Deserialize,
    Serialize,
};

use crate::entry::{
    LogEntry,
    Timestamp,
};

/// Upper bound on the number of entries kept after every write
pub const MAX_ENTRIES: usize = 100;

/// Entries ordered most-recent-first. New entries are prepended and the tail is dropped once the
/// list grows past [`MAX_ENTRIES`]. The list is never re-sorted, so entries written by hosts with
/// skewed clocks keep their insertion order rather than timestamp order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogList(Vec<LogEntry>);

impl LogList {
    pub fn new() -> Self {
        LogList(Vec::new())
    }

    /// The fixed sample entries written to an empty store on first read
    pub fn seed(now: Timestamp) -> Self {
        LogList(vec![
            LogEntry::new("Microwave", "Tokyo", now - 300_000),
            LogEntry::new("Blender", "Brooklyn", now - 240_000),
            LogEntry::new("Toaster", "Berlin", now - 180_000),
            LogEntry::new("Coffee Machine", "Portland", now - 120_000),
        ])
    }

    pub fn push_front(&mut self, entry: LogEntry) {
        self.0.insert(0, entry);
        self.0.truncate(MAX_ENTRIES);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.0
    }

    pub fn first(&self) -> Option<&LogEntry> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<LogEntry>> for LogList {
    fn from(entries: Vec<LogEntry>) -> Self {
        LogList(entries)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn entry(i: i64) -> LogEntry {
        LogEntry::new(format!("name-{i}"), format!("loc-{i}"), i)
    }

    #[test]
    fn seed_has_four_entries_in_fixed_order() {
        let seed = LogList::seed(1_000_000);
        let names: Vec<_> = seed.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Microwave", "Blender", "Toaster", "Coffee Machine"]);
        let stamps: Vec<_> = seed.entries().iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, [700_000, 760_000, 820_000, 880_000]);
    }

    #[test]
    fn push_front_prepends() {
        let mut list = LogList::new();
        list.push_front(entry(1));
        list.push_front(entry(2));
        assert_eq!(list.first(), Some(&entry(2)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn push_front_drops_the_oldest_past_capacity() {
        let mut list: LogList = (0..MAX_ENTRIES as i64).rev().map(entry).collect::<Vec<_>>().into();
        assert_eq!(list.len(), MAX_ENTRIES);

        list.push_front(entry(100));
        assert_eq!(list.len(), MAX_ENTRIES);
        assert_eq!(list.first(), Some(&entry(100)));
        assert_eq!(list.entries().last(), Some(&entry(1)));
    }

    #[test]
    fn transparent_json_array() {
        let list: LogList = vec![entry(3)].into();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[{"name":"name-3","location":"loc-3","timestamp":3}]"#);
        assert_eq!(serde_json::from_str::<LogList>(&json).unwrap(), list);
    }

    proptest! {
        #[test]
        fn keeps_the_most_recent_entries_first(n in 0usize..350) {
            let mut list = LogList::new();
            for i in 0..n as i64 {
                list.push_front(entry(i));
            }
            prop_assert_eq!(list.len(), n.min(MAX_ENTRIES));
            let expected: Vec<_> = (0..n as i64).rev().take(MAX_ENTRIES).map(entry).collect();
            prop_assert_eq!(list.entries(), expected.as_slice());
        }
    }
}
