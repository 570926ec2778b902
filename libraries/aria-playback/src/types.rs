//! Sequencer configuration

/// Default lookahead queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 5;

/// Default history capacity
pub const DEFAULT_HISTORY_CAPACITY: usize = 3;

/// Configuration for a playback session
#[derive(Debug, Clone, Copy)]
pub struct SequencerConfig {
    /// Maximum lookahead queue length
    pub queue_capacity: usize,

    /// Maximum history length
    pub history_capacity: usize,

    /// Initial shuffle mode
    pub shuffle: bool,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            shuffle: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SequencerConfig::default();
        assert_eq!(config.queue_capacity, 5);
        assert_eq!(config.history_capacity, 3);
        assert!(!config.shuffle);
    }
}
