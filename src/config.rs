//! Miner-wide tunables that aren't part of the mining algorithm itself.

/// Default memory budget for the Position queue: 8 gigabytes.
pub const DEFAULT_MEMORY_BUDGET_BYTES: u64 = 8_000_000_000;

/// This implementation's dense `QueueRecord` size: three `u32`s, 12 bytes.
/// Deliberately smaller than the 80-byte object-model figure the original
/// mining scripts were sized against (see DESIGN.md).
pub const DEFAULT_BYTES_PER_RECORD: u64 = 12;

/// Knobs governing the Hybrid Controller's memory discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinerConfig {
    pub memory_budget_bytes: u64,
    pub bytes_per_record: u64,
}

impl MinerConfig {
    /// The largest queue length ("MAX_QUEUE_SIZE") that fits in
    /// `memory_budget_bytes` at `bytes_per_record` bytes per record.
    pub fn max_queue_size(&self) -> u64 {
        self.memory_budget_bytes / self.bytes_per_record
    }
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            memory_budget_bytes: DEFAULT_MEMORY_BUDGET_BYTES,
            bytes_per_record: DEFAULT_BYTES_PER_RECORD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_queue_size_matches_budget_over_record_size() {
        let config = MinerConfig::default();
        assert_eq!(
            config.max_queue_size(),
            DEFAULT_MEMORY_BUDGET_BYTES / DEFAULT_BYTES_PER_RECORD
        );
    }

    #[test]
    fn custom_config_overrides_defaults() {
        let config = MinerConfig { memory_budget_bytes: 1200, bytes_per_record: 12 };
        assert_eq!(config.max_queue_size(), 100);
    }
}
