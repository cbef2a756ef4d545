//! At-most-once alerting per candle

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Last alerted candle per symbol.
///
/// Created once by the polling driver and kept for the whole process; one
/// entry per symbol ever alerted, never evicted, not persisted.
#[derive(Debug, Default)]
pub struct AlertDedup {
    last_alerted: HashMap<String, DateTime<Utc>>,
}

impl AlertDedup {
    pub fn new() -> Self {
        Self {
            last_alerted: HashMap::new(),
        }
    }

    /// Whether `candle_time` was already alerted for `symbol`
    pub fn is_duplicate(&self, symbol: &str, candle_time: DateTime<Utc>) -> bool {
        self.last_alerted.get(symbol) == Some(&candle_time)
    }

    /// Record an alert. Returns `false` (and changes nothing) for a duplicate.
    pub fn record(&mut self, symbol: &str, candle_time: DateTime<Utc>) -> bool {
        if self.is_duplicate(symbol, candle_time) {
            return false;
        }
        self.last_alerted.insert(symbol.to_string(), candle_time);
        true
    }

    /// Last alerted candle time for a symbol
    pub fn last_alerted(&self, symbol: &str) -> Option<DateTime<Utc>> {
        self.last_alerted.get(symbol).copied()
    }

    /// Number of tracked symbols
    pub fn len(&self) -> usize {
        self.last_alerted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_alerted.is_empty()
    }
}
