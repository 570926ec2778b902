//! Playback session state machine
//!
//! `PlayerSession` owns the current track, lookahead queue, history and
//! shuffle flag, and answers the four intent operations (play, jump, next,
//! prev). Queue reconciliation is an explicit recompute-and-diff step run
//! after every mutation that can affect the queue, not ambient reactivity.

use crate::history::History;
use crate::queue::{extend_queue, same_queue};
use crate::types::SequencerConfig;
use aria_core::Track;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A playback session over a filtered catalog view
///
/// All transitions are synchronous and atomic; operations with insufficient
/// state are no-ops. Audio loading is modelled as a generation counter so
/// stale ready signals from an abandoned load cannot clear the loading flag
/// of a newer track.
#[derive(Debug)]
pub struct PlayerSession {
    view: Vec<Track>,
    current: Option<Track>,
    queue: Vec<Track>,
    history: History,
    shuffle: bool,
    is_loading: bool,
    load_generation: u64,
    queue_capacity: usize,
    rng: StdRng,
}

impl PlayerSession {
    /// Create a session with an entropy-seeded RNG
    pub fn new(config: SequencerConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create a session with a fixed RNG seed (deterministic shuffle)
    pub fn with_seed(config: SequencerConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: SequencerConfig, rng: StdRng) -> Self {
        Self {
            view: Vec::new(),
            current: None,
            queue: Vec::new(),
            history: History::new(config.history_capacity),
            shuffle: config.shuffle,
            is_loading: false,
            load_generation: 0,
            queue_capacity: config.queue_capacity,
            rng,
        }
    }

    /// Replace the filtered view snapshot and reconcile the queue
    pub fn set_view(&mut self, view: Vec<Track>) {
        self.view = view;
        self.reconcile();
    }

    /// Set shuffle mode and reconcile the queue
    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
        self.reconcile();
    }

    /// Flip shuffle mode
    pub fn toggle_shuffle(&mut self) {
        let shuffle = !self.shuffle;
        self.set_shuffle(shuffle);
    }

    /// User explicitly selects a track from the catalog list
    ///
    /// A differing current track is pushed to the history front; the queue
    /// is reseeded from the prior queue minus the target, backfilled from
    /// the view using the new history snapshot.
    pub fn play(&mut self, track: Track) {
        if let Some(current) = &self.current {
            if current.id != track.id {
                self.history.push_front(current.clone());
            }
        }

        let base: Vec<Track> = self
            .queue
            .iter()
            .filter(|t| t.id != track.id)
            .cloned()
            .collect();

        self.begin_load(track);
        self.queue = extend_queue(
            &base,
            &self.view,
            self.current.as_ref(),
            self.history.tracks(),
            self.queue_capacity,
            self.shuffle,
            &mut self.rng,
        );
    }

    /// User selects a track directly from the visible queue or history
    ///
    /// Unlike `play`, the target is filtered out of the new history and the
    /// queue is reseeded from the remaining queue first, then backfilled.
    pub fn jump(&mut self, track: Track) {
        let Some(current) = self.current.clone() else {
            return;
        };
        if current.id == track.id {
            return;
        }

        // New history = ([current] ++ old) minus the target id, capped.
        self.history.remove(&track.id);
        self.history.push_front(current);

        let remaining: Vec<Track> = self
            .queue
            .iter()
            .filter(|t| t.id != track.id)
            .cloned()
            .collect();

        self.begin_load(track);
        self.queue = extend_queue(
            &remaining,
            &self.view,
            self.current.as_ref(),
            self.history.tracks(),
            self.queue_capacity,
            self.shuffle,
            &mut self.rng,
        );
    }

    /// Advance to the next track
    ///
    /// Takes the queue head, or a single fallback candidate when the queue
    /// is empty. No-op when neither exists.
    pub fn next(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };

        let mut new_history = self.history.clone();
        new_history.push_front(current.clone());

        let next_track = if let Some(head) = self.queue.first() {
            head.clone()
        } else {
            let fallback = extend_queue(
                &[],
                &self.view,
                Some(&current),
                new_history.tracks(),
                1,
                self.shuffle,
                &mut self.rng,
            );
            match fallback.into_iter().next() {
                Some(track) => track,
                None => return,
            }
        };

        let trimmed: Vec<Track> = if self.queue.is_empty() {
            Vec::new()
        } else {
            self.queue[1..].to_vec()
        };

        self.history = new_history;
        self.begin_load(next_track);
        self.queue = extend_queue(
            &trimmed,
            &self.view,
            self.current.as_ref(),
            self.history.tracks(),
            self.queue_capacity,
            self.shuffle,
            &mut self.rng,
        );
    }

    /// Go back to the most recently played track
    ///
    /// The abandoned current track is reinserted at the queue front.
    pub fn prev(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };
        let Some(previous) = self.history.pop_front() else {
            return;
        };

        let mut base = vec![current.clone()];
        base.extend(self.queue.iter().filter(|t| t.id != current.id).cloned());

        self.begin_load(previous);
        self.queue = extend_queue(
            &base,
            &self.view,
            self.current.as_ref(),
            self.history.tracks(),
            self.queue_capacity,
            self.shuffle,
            &mut self.rng,
        );
    }

    /// Recompute the queue from current inputs; replace only on change
    ///
    /// Idempotent: a second call with unchanged inputs leaves the queue
    /// structurally identical.
    pub fn reconcile(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };
        let next = extend_queue(
            &self.queue,
            &self.view,
            Some(&current),
            self.history.tracks(),
            self.queue_capacity,
            self.shuffle,
            &mut self.rng,
        );
        if !same_queue(&self.queue, &next) {
            self.queue = next;
        }
    }

    /// Signal that audio for a load generation finished loading
    ///
    /// Stale generations (the track has changed since) are ignored.
    pub fn audio_ready(&mut self, generation: u64) {
        if generation == self.load_generation {
            self.is_loading = false;
        }
    }

    fn begin_load(&mut self, track: Track) {
        self.load_generation += 1;
        self.is_loading = true;
        self.current = Some(track);
    }

    /// Current filtered view snapshot
    pub fn view(&self) -> &[Track] {
        &self.view
    }

    /// Currently playing track, if any
    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Lookahead queue (index 0 plays next)
    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    /// History, most-recent-first
    pub fn history(&self) -> &[Track] {
        self.history.tracks()
    }

    /// Whether shuffle mode is on
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    /// Whether audio for the current track is still loading
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Generation of the most recent track switch
    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }
}

impl Default for PlayerSession {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_track(id: &str) -> Track {
        serde_json::from_str(&format!(
            r#"{{"id": "{id}", "title": "Track {id}", "b2FileName": "{id}.mp3"}}"#
        ))
        .unwrap()
    }

    fn view(ids: &[&str]) -> Vec<Track> {
        ids.iter().map(|id| test_track(id)).collect()
    }

    fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    fn session(capacity: usize, shuffle: bool, view_ids: &[&str]) -> PlayerSession {
        let config = SequencerConfig {
            queue_capacity: capacity,
            history_capacity: 3,
            shuffle,
        };
        let mut session = PlayerSession::with_seed(config, 42);
        session.set_view(view(view_ids));
        session
    }

    fn assert_disjoint(session: &PlayerSession) {
        let mut seen = HashSet::new();
        if let Some(current) = session.current() {
            seen.insert(current.id.clone());
        }
        for track in session.queue() {
            assert!(seen.insert(track.id.clone()), "queue id also elsewhere");
        }
        for track in session.history() {
            assert!(seen.insert(track.id.clone()), "history id also elsewhere");
        }
    }

    #[test]
    fn play_seeds_queue_sequentially() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));

        assert_eq!(session.current().unwrap().id, "a");
        assert_eq!(ids(session.queue()), vec!["b", "c", "d"]);
        assert!(session.history().is_empty());
        assert_disjoint(&session);
    }

    #[test]
    fn play_pushes_previous_current_to_history() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));
        session.play(test_track("d"));

        assert_eq!(session.current().unwrap().id, "d");
        assert_eq!(ids(session.history()), vec!["a"]);
        assert_disjoint(&session);
    }

    #[test]
    fn replaying_the_current_track_does_not_touch_history() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));
        session.play(test_track("a"));
        assert!(session.history().is_empty());
    }

    #[test]
    fn next_advances_and_refills() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));
        assert_eq!(ids(session.queue()), vec!["b", "c", "d"]);

        session.next();

        assert_eq!(session.current().unwrap().id, "b");
        assert_eq!(ids(session.history()), vec!["a"]);
        // Remaining queue [c, d] extended past d, excluding {b, a}.
        assert_eq!(ids(session.queue()), vec!["c", "d", "e"]);
        assert_disjoint(&session);
    }

    #[test]
    fn next_without_current_is_a_no_op() {
        let mut session = session(3, false, &["a", "b"]);
        session.next();
        assert!(session.current().is_none());
        assert!(session.queue().is_empty());
    }

    #[test]
    fn next_with_empty_queue_uses_single_fallback() {
        let mut session = session(3, false, &["a", "b"]);
        session.play(test_track("a"));
        assert_eq!(ids(session.queue()), vec!["b"]);

        session.next(); // current b, queue empty (a excluded via history)
        assert_eq!(session.current().unwrap().id, "b");
        assert_eq!(ids(session.history()), vec!["a"]);
        assert!(session.queue().is_empty());

        // View exhausted entirely: everything is current or history.
        session.next();
        assert_eq!(session.current().unwrap().id, "b");
        assert_eq!(ids(session.history()), vec!["a"]);
    }

    #[test]
    fn next_exhausted_view_is_a_no_op() {
        let mut session = session(3, false, &["a"]);
        session.play(test_track("a"));
        assert!(session.queue().is_empty());

        session.next();
        // Nothing eligible: state untouched, including history.
        assert_eq!(session.current().unwrap().id, "a");
        assert!(session.history().is_empty());
    }

    #[test]
    fn prev_restores_history_head_and_reinserts_current() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));
        session.next();
        // current=b, queue=[c, d, e], history=[a]
        assert_eq!(session.current().unwrap().id, "b");
        assert_eq!(ids(session.queue()), vec!["c", "d", "e"]);
        assert_eq!(ids(session.history()), vec!["a"]);

        session.prev();

        assert_eq!(session.current().unwrap().id, "a");
        assert!(session.history().is_empty());
        // b reinserted at the front, truncated to capacity.
        assert_eq!(ids(session.queue()), vec!["b", "c", "d"]);
        assert_disjoint(&session);
    }

    #[test]
    fn prev_with_empty_history_is_a_no_op() {
        let mut session = session(3, false, &["a", "b", "c"]);
        session.play(test_track("a"));
        let queue_before = ids(session.queue())
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        session.prev();
        assert_eq!(session.current().unwrap().id, "a");
        assert_eq!(
            ids(session.queue()),
            queue_before.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn jump_from_queue_filters_target_and_reuses_remaining_queue() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));
        // queue = [b, c, d]
        session.jump(test_track("c"));

        assert_eq!(session.current().unwrap().id, "c");
        assert_eq!(ids(session.history()), vec!["a"]);
        // Remaining queue [b, d] kept first, then backfilled.
        assert_eq!(ids(session.queue()), vec!["b", "d", "e"]);
        assert_disjoint(&session);
    }

    #[test]
    fn jump_from_history_drops_target_from_history() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));
        session.next(); // current=b, history=[a]
        session.jump(test_track("a"));

        assert_eq!(session.current().unwrap().id, "a");
        // History is [b]: the old current, with the target filtered out.
        assert_eq!(ids(session.history()), vec!["b"]);
        assert_disjoint(&session);
    }

    #[test]
    fn jump_to_current_or_without_current_is_a_no_op() {
        let mut session = session(3, false, &["a", "b", "c"]);
        session.jump(test_track("a"));
        assert!(session.current().is_none());

        session.play(test_track("a"));
        let queue_before: Vec<String> = ids(session.queue()).into_iter().map(String::from).collect();
        session.jump(test_track("a"));
        assert_eq!(
            ids(session.queue()),
            queue_before.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));
        let before: Vec<String> = ids(session.queue()).into_iter().map(String::from).collect();

        session.reconcile();
        session.reconcile();

        assert_eq!(
            ids(session.queue()),
            before.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn reordering_the_view_keeps_a_full_queue() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e"]);
        session.play(test_track("a"));
        assert_eq!(ids(session.queue()), vec!["b", "c", "d"]);

        // Queue survives a reorder of the same candidates untouched, since
        // exclusion covers everything already queued.
        session.set_view(view(&["a", "d", "c", "b", "e"]));
        assert_eq!(ids(session.queue()), vec!["b", "c", "d"]);
    }

    #[test]
    fn history_is_bounded_at_capacity() {
        let mut session = session(2, false, &["a", "b", "c", "d", "e", "f"]);
        for id in ["a", "b", "c", "d", "e"] {
            session.play(test_track(id));
        }
        // Capacity 3: only the three most recent predecessors survive.
        assert_eq!(ids(session.history()), vec!["d", "c", "b"]);
    }

    #[test]
    fn shuffle_session_maintains_invariants() {
        let mut session = session(5, true, &["a", "b", "c", "d", "e", "f", "g", "h"]);
        session.play(test_track("a"));
        for _ in 0..20 {
            session.next();
            assert!(session.queue().len() <= 5);
            assert_disjoint(&session);
        }
        for _ in 0..3 {
            session.prev();
            assert_disjoint(&session);
        }
    }

    #[test]
    fn toggling_shuffle_reconciles_but_keeps_invariants() {
        let mut session = session(3, false, &["a", "b", "c", "d", "e", "f"]);
        session.play(test_track("a"));
        session.toggle_shuffle();
        assert!(session.shuffle_enabled());
        assert_disjoint(&session);
        session.toggle_shuffle();
        assert!(!session.shuffle_enabled());
        assert_disjoint(&session);
    }

    #[test]
    fn stale_audio_ready_is_ignored() {
        let mut session = session(3, false, &["a", "b", "c"]);
        session.play(test_track("a"));
        let first_generation = session.load_generation();
        assert!(session.is_loading());

        session.next();
        assert!(session.is_loading());

        // The ready signal for the abandoned load must not clear the flag.
        session.audio_ready(first_generation);
        assert!(session.is_loading());

        session.audio_ready(session.load_generation());
        assert!(!session.is_loading());
    }
}
