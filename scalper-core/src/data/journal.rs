//! Append-only CSV journal of emitted signals

use crate::strategy::Signal;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One journal row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub time: String,
    pub symbol: String,
    pub direction: String,
    pub price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub confidence: String,
    pub confidence_score: f64,
    pub trend: String,
    pub risk_reward: f64,
    pub volatility: f64,
}

impl From<&Signal> for JournalRecord {
    fn from(signal: &Signal) -> Self {
        Self {
            time: signal.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            symbol: signal.symbol.clone(),
            direction: signal.direction.to_string(),
            price: signal.entry_price,
            stop_loss: signal.stop_loss,
            take_profit: signal.take_profit,
            confidence: signal.confidence_level.to_string(),
            confidence_score: signal.confidence,
            trend: signal.trend.to_string(),
            risk_reward: signal.risk_reward,
            volatility: signal.volatility,
        }
    }
}

/// Signal log backed by a CSV file.
///
/// The header is written once, when the file is new or empty. Rows are only
/// ever appended.
#[derive(Debug, Clone)]
pub struct SignalJournal {
    path: PathBuf,
}

impl SignalJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one signal
    pub fn append(&self, signal: &Signal) -> Result<()> {
        let write_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open signal log {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(JournalRecord::from(signal))?;
        writer.flush()?;

        debug!("Logged {} signal for {} to {}", signal.direction, signal.symbol, self.path.display());
        Ok(())
    }

    /// Read every logged row back
    pub fn records(&self) -> Result<Vec<JournalRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to read signal log {}", self.path.display()))?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}
