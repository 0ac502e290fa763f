use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::error::{PhaseError, PhaseResult};
use crate::models::{PhaseEvent, PrimaryPhase};

/// Label used when a dataset does not declare its own version.
pub const UNVERSIONED: &str = "unversioned";

/// Raw JSON structure for a single tabulated phase
#[derive(Debug, Deserialize)]
struct RawPhaseEntry {
    #[serde(alias = "kind")]
    phase: String,
    #[serde(alias = "utc", alias = "instant")]
    time: String,
}

/// Container for the dataset file structure
#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    version: Option<String>,
    phases: Vec<RawPhaseEntry>,
}

/// A decoded and validated phase dataset.
#[derive(Debug, Clone)]
pub struct ParsedDataset {
    pub version: String,
    pub events: Vec<PhaseEvent>,
    /// Hex SHA-256 of the raw dataset text.
    pub checksum: String,
}

/// Parse a phase dataset from a JSON file
pub fn parse_dataset_file(path: &Path) -> PhaseResult<ParsedDataset> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PhaseError::data(format!(
            "failed to read phase dataset {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_dataset_str(&content)
}

/// Parse a phase dataset from a JSON string
///
/// Every entry must carry a known phase kind and a UTC timestamp; the
/// resulting events must be strictly increasing in time and follow the
/// new moon, first quarter, full moon, third quarter rotation.
pub fn parse_dataset_str(json_str: &str) -> PhaseResult<ParsedDataset> {
    let de = &mut serde_json::Deserializer::from_str(json_str);
    let raw: RawDataset = serde_path_to_error::deserialize(de).map_err(|e| {
        PhaseError::data(format!(
            "invalid phase dataset at '{}': {}",
            e.path(),
            e.inner()
        ))
    })?;

    let mut events = Vec::with_capacity(raw.phases.len());
    for (i, entry) in raw.phases.iter().enumerate() {
        let kind = entry
            .phase
            .parse::<PrimaryPhase>()
            .map_err(|_| PhaseError::data(format!("phases[{}]: unknown phase '{}'", i, entry.phase)))?;
        let instant = parse_timestamp(&entry.time).ok_or_else(|| {
            PhaseError::data(format!("phases[{}]: invalid timestamp '{}'", i, entry.time))
        })?;
        events.push(PhaseEvent::new(kind, instant));
    }

    validate_events(&events)?;

    Ok(ParsedDataset {
        version: raw.version.unwrap_or_else(|| UNVERSIONED.to_string()),
        events,
        checksum: fingerprint(json_str.as_bytes()),
    })
}

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DD HH:MM:SS` taken as UTC.
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Check ordering and rotation of a decoded event sequence.
pub(crate) fn validate_events(events: &[PhaseEvent]) -> PhaseResult<()> {
    if events.is_empty() {
        return Err(PhaseError::data("phase dataset contains no entries"));
    }

    for (i, pair) in events.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.instant <= prev.instant {
            return Err(PhaseError::data(format!(
                "phases[{}]: {} is not after the previous entry {}",
                i + 1,
                next.instant.to_rfc3339(),
                prev.instant.to_rfc3339()
            )));
        }
        if next.kind != prev.kind.next() {
            return Err(PhaseError::data(format!(
                "phases[{}]: expected {} after {}, found {}",
                i + 1,
                prev.kind.next(),
                prev.kind,
                next.kind
            )));
        }
    }

    Ok(())
}

/// Lowercase hex SHA-256 digest of `bytes`.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
