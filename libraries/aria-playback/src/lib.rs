//! Aria Playback
//!
//! Queue/history sequencing for a playback session over a filtered catalog
//! view.
//!
//! This crate provides:
//! - A bounded lookahead queue (next tracks, index 0 plays next)
//! - A bounded most-recent-first history
//! - Sequential and shuffled candidate selection with an injected RNG
//! - A `PlayerSession` owning the whole state machine
//!
//! # Invariants
//!
//! At all times the id-sets {current}, queue and history are pairwise
//! disjoint, the queue never exceeds its capacity and never repeats an id.
//! Every operation is a synchronous, atomic state transition; insufficient
//! state (no current track, empty history, exhausted view) yields a no-op,
//! never an error.
//!
//! # Example
//!
//! ```rust
//! use aria_playback::{PlayerSession, SequencerConfig};
//! # fn tracks() -> Vec<aria_core::Track> { Vec::new() }
//!
//! let mut session = PlayerSession::new(SequencerConfig::default());
//! session.set_view(tracks());
//! if let Some(first) = session.view().first().cloned() {
//!     session.play(first);
//!     session.next();
//! }
//! ```

#![forbid(unsafe_code)]

mod history;
mod queue;
mod session;
pub mod types;

// Public exports
pub use history::History;
pub use queue::{extend_queue, same_queue};
pub use session::PlayerSession;
pub use types::{SequencerConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_QUEUE_CAPACITY};
