//! The chronological table of primary phase instants.
//!
//! The table is loaded once per process from the bundled dataset and shared
//! read-only afterwards (see [`PhaseTable::shared`]). Custom tables can be
//! built from a file or string for configuration overrides and tests.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::OnceCell;
use std::path::Path;

use crate::error::{PhaseError, PhaseResult};
use crate::models::{PhaseEvent, ValidRange};
use crate::parsing::dataset_parser::{self, ParsedDataset};
use crate::time::local_date;

/// The dataset compiled into the library.
pub const BUNDLED_DATASET: &str = include_str!("../data/lunar_phases.json");

static SHARED_TABLE: OnceCell<PhaseTable> = OnceCell::new();

/// Immutable, strictly increasing sequence of phase events.
#[derive(Debug, Clone)]
pub struct PhaseTable {
    events: Vec<PhaseEvent>,
    version: String,
    checksum: String,
}

impl PhaseTable {
    /// Build a table from already decoded events.
    ///
    /// # Errors
    /// * `PhaseError::Data` if `events` is empty, unordered, or breaks the
    ///   phase rotation
    pub fn from_events(events: Vec<PhaseEvent>, version: impl Into<String>) -> PhaseResult<Self> {
        dataset_parser::validate_events(&events)?;
        let canonical = serde_json::to_vec(&events)
            .map_err(|e| PhaseError::data(format!("failed to serialize phase events: {}", e)))?;
        let checksum = dataset_parser::fingerprint(&canonical);
        Ok(Self {
            events,
            version: version.into(),
            checksum,
        })
    }

    pub fn from_json_str(json: &str) -> PhaseResult<Self> {
        dataset_parser::parse_dataset_str(json).map(Self::from_parsed)
    }

    pub fn from_path(path: &Path) -> PhaseResult<Self> {
        dataset_parser::parse_dataset_file(path).map(Self::from_parsed)
    }

    /// Parse the dataset compiled into the library.
    pub fn bundled() -> PhaseResult<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    fn from_parsed(parsed: ParsedDataset) -> Self {
        let table = Self {
            events: parsed.events,
            version: parsed.version,
            checksum: parsed.checksum,
        };
        let (first, last) = table.range();
        log::info!(
            "Loaded phase table {} ({} entries, {} to {}, sha256 {})",
            table.version,
            table.events.len(),
            first.to_rfc3339(),
            last.to_rfc3339(),
            table.checksum
        );
        table
    }

    /// The process-wide table, loaded from the bundled dataset on first use.
    ///
    /// Concurrent first callers block until one load completes. A failed load
    /// is returned to the caller and not cached, so a later call retries.
    pub fn shared() -> PhaseResult<&'static PhaseTable> {
        load_once(&SHARED_TABLE, Self::bundled)
    }

    pub fn events(&self) -> &[PhaseEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Hex SHA-256 of the source dataset.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    fn first(&self) -> &PhaseEvent {
        // Construction rejects empty tables.
        &self.events[0]
    }

    fn last(&self) -> &PhaseEvent {
        &self.events[self.events.len() - 1]
    }

    /// Instants of the first and last tabulated events.
    pub fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.first().instant, self.last().instant)
    }

    /// Local dates of the first and last events in `tz`.
    pub fn valid_range(&self, tz: &Tz) -> ValidRange {
        let (first, last) = self.range();
        ValidRange {
            earliest: local_date(first, tz),
            latest: local_date(last, tz),
        }
    }

    /// The event closest in time to `instant`; the earlier one on an exact tie.
    ///
    /// Binary search for the insertion point, then compare the neighbours on
    /// either side.
    pub fn nearest(&self, instant: DateTime<Utc>) -> &PhaseEvent {
        let idx = self.events.partition_point(|e| e.instant < instant);
        if idx == 0 {
            return self.first();
        }
        if idx == self.events.len() {
            return self.last();
        }

        let before = &self.events[idx - 1];
        let after = &self.events[idx];
        if after.distance_secs(instant) < before.distance_secs(instant) {
            after
        } else {
            before
        }
    }

    /// Linear-scan equivalent of [`PhaseTable::nearest`].
    pub fn nearest_linear(&self, instant: DateTime<Utc>) -> &PhaseEvent {
        let mut best = self.first();
        for event in &self.events[1..] {
            if event.distance_secs(instant) < best.distance_secs(instant) {
                best = event;
            }
        }
        best
    }

    /// Events with `start <= instant <= end`, in table order.
    pub fn events_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> &[PhaseEvent] {
        if end < start {
            return &[];
        }
        let lo = self.events.partition_point(|e| e.instant < start);
        let hi = self.events.partition_point(|e| e.instant <= end);
        &self.events[lo..hi]
    }
}

impl TryFrom<&str> for PhaseTable {
    type Error = PhaseError;

    fn try_from(json: &str) -> Result<Self, Self::Error> {
        Self::from_json_str(json)
    }
}

/// Initialize `cell` with `load` unless it already holds a table.
fn load_once<F>(cell: &OnceCell<PhaseTable>, load: F) -> PhaseResult<&PhaseTable>
where
    F: FnOnce() -> PhaseResult<PhaseTable>,
{
    cell.get_or_try_init(|| {
        load().map_err(|e| {
            log::warn!("Failed to load phase table: {}", e);
            e
        })
    })
}
