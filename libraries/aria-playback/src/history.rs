//! Playback history tracking
//!
//! Bounded list of recently played tracks, most-recent-first, for
//! "previous" navigation and queue exclusion.

use aria_core::Track;

/// Playback history with bounded size
///
/// Index 0 is the most recently played track. Pushing beyond capacity
/// discards the oldest entries.
#[derive(Debug, Clone)]
pub struct History {
    tracks: Vec<Track>,
    capacity: usize,
}

impl History {
    /// Create new history with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            tracks: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a track as the most recent entry
    ///
    /// Entries beyond capacity are dropped from the old end.
    pub fn push_front(&mut self, track: Track) {
        self.tracks.insert(0, track);
        self.tracks.truncate(self.capacity);
    }

    /// Pop the most recent entry
    pub fn pop_front(&mut self) -> Option<Track> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.tracks.remove(0))
        }
    }

    /// Drop any entry with the given id
    pub fn remove(&mut self, id: &str) {
        self.tracks.retain(|t| t.id != id);
    }

    /// All entries, most-recent-first
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_track(id: &str) -> Track {
        serde_json::from_str(&format!(
            r#"{{"id": "{id}", "title": "Track {id}", "b2FileName": "{id}.mp3"}}"#
        ))
        .unwrap()
    }

    fn ids(history: &History) -> Vec<&str> {
        history.tracks().iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn push_front_keeps_most_recent_first() {
        let mut history = History::new(3);
        history.push_front(test_track("a"));
        history.push_front(test_track("b"));
        assert_eq!(ids(&history), vec!["b", "a"]);
    }

    #[test]
    fn push_front_is_bounded() {
        let mut history = History::new(3);
        for id in ["a", "b", "c", "d"] {
            history.push_front(test_track(id));
        }
        // "a" fell off the old end
        assert_eq!(ids(&history), vec!["d", "c", "b"]);
    }

    #[test]
    fn pop_front_returns_most_recent() {
        let mut history = History::new(3);
        history.push_front(test_track("a"));
        history.push_front(test_track("b"));

        assert_eq!(history.pop_front().unwrap().id, "b");
        assert_eq!(history.pop_front().unwrap().id, "a");
        assert!(history.pop_front().is_none());
    }

    #[test]
    fn remove_by_id() {
        let mut history = History::new(3);
        history.push_front(test_track("a"));
        history.push_front(test_track("b"));
        history.remove("a");
        assert_eq!(ids(&history), vec!["b"]);
        // Removing a missing id is a no-op
        history.remove("zzz");
        assert_eq!(history.len(), 1);
    }
}
