//! Resolution of civil calendar dates to their nearest primary phase.
//!
//! A query date is represented by local noon in the query's timezone. The
//! nearest tabulated event is then mapped back to its own local calendar date
//! in the same timezone, and the offset is the day difference between the two
//! dates. Interpreting both ends in the observer's zone is what lets the same
//! UTC phase instant land on different dates for different observers.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{PhaseError, PhaseResult};
use crate::models::{PhaseLookup, PrimaryPhase, ValidRange};
use crate::table::PhaseTable;
use crate::time::{local_date, local_day_bounds, local_noon_utc, resolve_timezone};

/// Stateless lookups against a phase table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a PhaseTable,
}

impl Resolver<'static> {
    /// Resolver over the process-wide table.
    pub fn shared() -> PhaseResult<Self> {
        PhaseTable::shared().map(Resolver::new)
    }
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a PhaseTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a PhaseTable {
        self.table
    }

    /// Earliest and latest supported local dates in `timezone`.
    pub fn valid_range(&self, timezone: &str) -> PhaseResult<ValidRange> {
        let tz = resolve_timezone(timezone)?;
        Ok(self.table.valid_range(&tz))
    }

    fn check_range(&self, date: NaiveDate, tz: &Tz) -> PhaseResult<()> {
        let range = self.table.valid_range(tz);
        if range.contains(date) {
            Ok(())
        } else {
            Err(PhaseError::OutOfRange {
                date,
                earliest: range.earliest,
                latest: range.latest,
            })
        }
    }

    /// Nearest primary phase to a local calendar date.
    ///
    /// # Errors
    /// * `PhaseError::UnknownTimezone` if `timezone` is not an IANA name
    /// * `PhaseError::OutOfRange` if `date` is outside [`Resolver::valid_range`]
    pub fn resolve_date(&self, date: NaiveDate, timezone: &str) -> PhaseResult<PhaseLookup> {
        let tz = resolve_timezone(timezone)?;
        self.resolve_in(date, tz)
    }

    fn resolve_in(&self, date: NaiveDate, tz: Tz) -> PhaseResult<PhaseLookup> {
        self.check_range(date, &tz)?;

        let noon = local_noon_utc(date, &tz);
        let event = self.table.nearest(noon);
        let event_date = local_date(event.instant, &tz);
        let offset = (date - event_date).num_days();

        log::debug!(
            "Resolved {} in {} (noon {}) to {} at {}, offset {}",
            date,
            tz.name(),
            noon.to_rfc3339(),
            event.kind,
            event.instant.to_rfc3339(),
            offset
        );

        Ok(PhaseLookup {
            date,
            timezone: tz,
            primary_phase: event.kind,
            offset,
            phase_instant: event.instant,
        })
    }

    /// Nearest primary phase to the local date of an absolute instant.
    pub fn resolve_instant(&self, instant: DateTime<Utc>, timezone: &str) -> PhaseResult<PhaseLookup> {
        let tz = resolve_timezone(timezone)?;
        self.resolve_in(local_date(instant, &tz), tz)
    }

    fn is_primary(&self, date: NaiveDate, timezone: &str, kind: PrimaryPhase) -> PhaseResult<bool> {
        let lookup = self.resolve_date(date, timezone)?;
        Ok(lookup.primary_phase == kind && lookup.offset == 0)
    }

    /// Whether a full moon falls on `date` in `timezone`.
    pub fn is_primary_full_moon(&self, date: NaiveDate, timezone: &str) -> PhaseResult<bool> {
        self.is_primary(date, timezone, PrimaryPhase::FullMoon)
    }

    /// Whether a new moon falls on `date` in `timezone`.
    pub fn is_primary_new_moon(&self, date: NaiveDate, timezone: &str) -> PhaseResult<bool> {
        self.is_primary(date, timezone, PrimaryPhase::NewMoon)
    }

    /// Every tabulated phase whose local date lies in `start..=end`, each
    /// reported on its own local date.
    ///
    /// # Errors
    /// * `PhaseError::UnknownTimezone` if `timezone` is not an IANA name
    /// * `PhaseError::InvalidRange` if `start` is after `end`
    pub fn phases_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        timezone: &str,
    ) -> PhaseResult<Vec<PhaseLookup>> {
        let tz = resolve_timezone(timezone)?;
        if start > end {
            return Err(PhaseError::InvalidRange { start, end });
        }

        let (from, to) = local_day_bounds(start, end, &tz);
        Ok(self
            .table
            .events_between(from, to)
            .iter()
            .map(|event| PhaseLookup {
                date: local_date(event.instant, &tz),
                timezone: tz,
                primary_phase: event.kind,
                offset: 0,
                phase_instant: event.instant,
            })
            .collect())
    }
}
