//! Public lookup functions over the process-wide phase table.
//!
//! These are thin wrappers around [`Resolver`] and the [`catalog`] helpers for
//! callers that do not need to manage a table themselves.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::catalog::{self, CatalogEntry};
use crate::error::PhaseResult;
use crate::models::{PhaseLookup, PrimaryPhase, ValidRange};
use crate::resolver::Resolver;
use crate::table::PhaseTable;
use crate::time::DEFAULT_TIMEZONE;

/// Nearest primary phase to `date` in `timezone`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use moonphase_rust::api::for_date;
/// use moonphase_rust::models::PrimaryPhase;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
/// let lookup = for_date(date, "Australia/Brisbane").unwrap();
/// assert_eq!(lookup.primary_phase, PrimaryPhase::FullMoon);
/// assert_eq!(lookup.offset, 0);
/// ```
pub fn for_date(date: NaiveDate, timezone: &str) -> PhaseResult<PhaseLookup> {
    Resolver::shared()?.resolve_date(date, timezone)
}

/// [`for_date`] in [`DEFAULT_TIMEZONE`].
pub fn for_date_default(date: NaiveDate) -> PhaseResult<PhaseLookup> {
    for_date(date, DEFAULT_TIMEZONE)
}

/// Nearest primary phase to the local date of `instant` in `timezone`.
pub fn for_datetime(instant: DateTime<Utc>, timezone: &str) -> PhaseResult<PhaseLookup> {
    Resolver::shared()?.resolve_instant(instant, timezone)
}

/// Whether a full moon falls on `date` in `timezone`.
///
/// # Arguments
/// * `date` - Local calendar date to test
/// * `timezone` - IANA timezone name of the observer
///
/// # Returns
/// `true` when the nearest primary phase is a full moon with offset zero.
///
/// # Errors
/// * `PhaseError::UnknownTimezone` if `timezone` is not an IANA name
/// * `PhaseError::OutOfRange` if `date` is outside [`valid_range`]
pub fn is_full_moon(date: NaiveDate, timezone: &str) -> PhaseResult<bool> {
    Resolver::shared()?.is_primary_full_moon(date, timezone)
}

/// Whether a new moon falls on `date` in `timezone`.
///
/// Same contract as [`is_full_moon`].
pub fn is_new_moon(date: NaiveDate, timezone: &str) -> PhaseResult<bool> {
    Resolver::shared()?.is_primary_new_moon(date, timezone)
}

/// Every primary phase whose local date in `timezone` lies in `start..=end`.
///
/// Entries are in chronological order with `offset` zero and `date` set to the
/// phase's own local date. Dates outside the table simply contribute nothing.
///
/// # Errors
/// * `PhaseError::UnknownTimezone` if `timezone` is not an IANA name
/// * `PhaseError::InvalidRange` if `start` is after `end`
pub fn phases_in_range(
    start: NaiveDate,
    end: NaiveDate,
    timezone: &str,
) -> PhaseResult<Vec<PhaseLookup>> {
    Resolver::shared()?.phases_in_range(start, end, timezone)
}

/// Display name for a legacy identifier, or [`catalog::NOT_FOUND`] for
/// negative or unknown identifiers.
pub fn for_id(id: i64) -> &'static str {
    catalog::for_id(id).unwrap_or(catalog::NOT_FOUND)
}

pub fn collection() -> &'static [CatalogEntry<PrimaryPhase>] {
    catalog::collection()
}

pub fn detailed_collection() -> &'static [CatalogEntry<String>] {
    catalog::detailed_collection()
}

/// Supported local date window in `timezone`.
pub fn valid_range(timezone: &str) -> PhaseResult<ValidRange> {
    Resolver::shared()?.valid_range(timezone)
}

/// Crate and dataset version stamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub crate_version: &'static str,
    pub dataset_version: String,
    pub dataset_checksum: String,
    pub entries: usize,
}

pub fn version() -> PhaseResult<VersionInfo> {
    let table = PhaseTable::shared()?;
    Ok(VersionInfo {
        crate_version: crate::VERSION,
        dataset_version: table.version().to_string(),
        dataset_checksum: table.checksum().to_string(),
        entries: table.len(),
    })
}
