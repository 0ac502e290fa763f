use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use super::phase::PrimaryPhase;
use crate::catalog;

/// Outcome of resolving a local calendar date against the phase table.
///
/// `offset` is the signed number of days from the local date of the nearest
/// primary phase to the queried date; it is zero exactly when the phase falls
/// on the queried date in `timezone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseLookup {
    pub date: NaiveDate,
    /// Serialized as its canonical IANA name.
    #[serde(serialize_with = "serialize_zone_name")]
    pub timezone: Tz,
    pub primary_phase: PrimaryPhase,
    pub offset: i64,
    pub phase_instant: DateTime<Utc>,
}

impl PhaseLookup {
    pub fn is_waxing(&self) -> bool {
        self.primary_phase.is_waxing()
    }

    pub fn is_waning(&self) -> bool {
        self.primary_phase.is_waning()
    }

    /// True when the queried date is the day of the primary phase itself.
    pub fn is_primary(&self) -> bool {
        self.offset == 0
    }

    /// Local calendar date of the phase instant.
    pub fn phase_date(&self) -> NaiveDate {
        self.phase_instant.with_timezone(&self.timezone).date_naive()
    }

    /// Flat identifier of this kind/offset pair, if the offset is tabulated.
    pub fn legacy_id(&self) -> Option<i64> {
        catalog::legacy_id(self.primary_phase, self.offset)
    }

    /// Token such as `"full_moon:-1"`.
    pub fn detailed_token(&self) -> String {
        catalog::token(self.primary_phase, self.offset)
    }

    pub fn display_name(&self) -> String {
        catalog::display_name(self.primary_phase, self.offset)
    }
}

fn serialize_zone_name<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tz.name())
}

/// Earliest and latest supported local dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl ValidRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest <= date && date <= self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lookup(kind: PrimaryPhase, offset: i64, tz: Tz) -> PhaseLookup {
        PhaseLookup {
            date: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            timezone: tz,
            primary_phase: kind,
            offset,
            phase_instant: Utc.with_ymd_and_hms(2025, 1, 13, 22, 27, 0).unwrap(),
        }
    }

    #[test]
    fn test_phase_date_uses_lookup_timezone() {
        assert_eq!(
            lookup(PrimaryPhase::FullMoon, 0, Tz::Australia__Brisbane).phase_date(),
            NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
        );
        assert_eq!(
            lookup(PrimaryPhase::FullMoon, 1, Tz::Europe__London).phase_date(),
            NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
        );
    }

    #[test]
    fn test_timezone_serializes_as_iana_name() {
        let json = serde_json::to_value(lookup(PrimaryPhase::FullMoon, 0, Tz::Australia__Brisbane)).unwrap();
        assert_eq!(json["timezone"], "Australia/Brisbane");
    }

    #[test]
    fn test_legacy_id_and_token() {
        let l = lookup(PrimaryPhase::FullMoon, -1, Tz::UTC);
        assert_eq!(l.legacy_id(), Some(21));
        assert_eq!(l.detailed_token(), "full_moon:-1");
        assert!(!l.is_primary());
        assert!(l.is_waning());

        let far = lookup(PrimaryPhase::NewMoon, 5, Tz::UTC);
        assert_eq!(far.legacy_id(), None);
    }

    #[test]
    fn test_valid_range_contains_bounds() {
        let range = ValidRange {
            earliest: NaiveDate::from_ymd_opt(2000, 1, 6).unwrap(),
            latest: NaiveDate::from_ymd_opt(2050, 12, 28).unwrap(),
        };
        assert!(range.contains(range.earliest));
        assert!(range.contains(range.latest));
        assert!(!range.contains(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()));
    }
}
