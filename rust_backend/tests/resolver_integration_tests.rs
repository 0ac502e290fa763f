//! Integration tests for phase resolution through the public API.
//!
//! These tests ensure that:
//! 1. Lookups agree with the observer's local calendar across timezones
//! 2. Out-of-range dates and unknown zones are reported as errors
//! 3. Range listings and display collections have the expected shape

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use moonphase_rust::api;
use moonphase_rust::{PhaseError, PrimaryPhase};

// ==================== Helper Functions ====================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn full_moon_jan_2025() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 13, 22, 27, 0).unwrap()
}

// ==================== Timezone Reconciliation ====================

#[test]
fn test_same_instant_london_and_brisbane() {
    let london = api::for_datetime(full_moon_jan_2025(), "Europe/London").unwrap();
    assert_eq!(london.date, date(2025, 1, 13));
    assert_eq!(london.primary_phase, PrimaryPhase::FullMoon);
    assert_eq!(london.offset, 0);
    assert_eq!(london.phase_instant, full_moon_jan_2025());

    let brisbane = api::for_datetime(full_moon_jan_2025(), "Australia/Brisbane").unwrap();
    assert_eq!(brisbane.date, date(2025, 1, 14));
    assert_eq!(brisbane.primary_phase, PrimaryPhase::FullMoon);
    assert_eq!(brisbane.offset, 0);
}

#[test]
fn test_brisbane_offsets_around_full_moon() {
    let on_day = api::for_date(date(2025, 1, 14), "Australia/Brisbane").unwrap();
    assert_eq!(on_day.primary_phase, PrimaryPhase::FullMoon);
    assert_eq!(on_day.offset, 0);
    assert!(on_day.is_waning());

    let after = api::for_date(date(2025, 1, 15), "Australia/Brisbane").unwrap();
    assert_eq!(after.primary_phase, PrimaryPhase::FullMoon);
    assert_eq!(after.offset, 1);
    assert_eq!(after.phase_date(), date(2025, 1, 14));

    let before = api::for_date(date(2025, 1, 13), "Australia/Brisbane").unwrap();
    assert_eq!(before.primary_phase, PrimaryPhase::FullMoon);
    assert_eq!(before.offset, -1);
}

#[test]
fn test_west_of_utc_sees_earlier_date() {
    // 22:27 UTC is 14:27 the same day in Los Angeles.
    let la = api::for_datetime(full_moon_jan_2025(), "America/Los_Angeles").unwrap();
    assert_eq!(la.date, date(2025, 1, 13));
    assert_eq!(la.offset, 0);
    assert!(api::is_full_moon(date(2025, 1, 13), "America/Los_Angeles").unwrap());
    assert!(!api::is_full_moon(date(2025, 1, 14), "America/Los_Angeles").unwrap());
}

#[test]
fn test_new_moon_predicate() {
    // New moon 2025-01-29 12:36 UTC.
    assert!(api::is_new_moon(date(2025, 1, 29), "UTC").unwrap());
    assert!(api::is_new_moon(date(2025, 1, 29), "Australia/Brisbane").unwrap());
    assert!(!api::is_new_moon(date(2025, 1, 30), "UTC").unwrap());
    assert!(!api::is_full_moon(date(2025, 1, 29), "UTC").unwrap());
}

// ==================== Error Paths ====================

#[test]
fn test_date_before_window_is_out_of_range() {
    for tz in ["UTC", "Australia/Brisbane", "America/New_York"] {
        let err = api::for_date(date(1990, 1, 1), tz).unwrap_err();
        assert!(matches!(err, PhaseError::OutOfRange { .. }), "{tz}: {err:?}");
        assert!(err.to_string().contains("2050"));
    }
}

#[test]
fn test_date_after_window_is_out_of_range() {
    let err = api::for_date(date(2060, 6, 1), "UTC").unwrap_err();
    assert!(matches!(err, PhaseError::OutOfRange { .. }));
}

#[test]
fn test_invalid_zone() {
    let err = api::for_date(date(2025, 1, 14), "Invalid/Zone").unwrap_err();
    assert_eq!(err, PhaseError::UnknownTimezone("Invalid/Zone".to_string()));

    let err = api::for_datetime(full_moon_jan_2025(), "Invalid/Zone").unwrap_err();
    assert!(matches!(err, PhaseError::UnknownTimezone(_)));
}

// ==================== Range Listing ====================

#[test]
fn test_phases_in_january_2025() {
    for tz in ["UTC", "Australia/Brisbane", "America/Los_Angeles"] {
        let phases = api::phases_in_range(date(2025, 1, 1), date(2025, 1, 31), tz).unwrap();
        assert!((3..=5).contains(&phases.len()), "{tz}: {}", phases.len());
        assert!(phases.iter().all(|p| p.offset == 0));
        assert!(phases.windows(2).all(|w| w[0].phase_instant < w[1].phase_instant));
        assert!(phases.iter().all(|p| p.date.month() == 1));
    }
}

#[test]
fn test_range_entries_resolve_to_themselves() {
    let phases = api::phases_in_range(date(2025, 3, 1), date(2025, 4, 30), "Europe/London").unwrap();
    for phase in phases {
        let lookup = api::for_date(phase.date, "Europe/London").unwrap();
        assert_eq!(lookup.offset, 0);
        assert_eq!(lookup.primary_phase, phase.primary_phase);
    }
}

#[test]
fn test_every_phase_listed_on_its_day_in_midnight_fallback_zones() {
    // These zones have fallen back across local midnight, repeating 23:xx.
    let table = moonphase_rust::PhaseTable::shared().unwrap();
    for tz in ["America/Cuiaba", "Asia/Damascus", "Asia/Gaza"] {
        let zone: chrono_tz::Tz = tz.parse().unwrap();
        for event in table.events() {
            let day = event.instant.with_timezone(&zone).date_naive();
            let hits = api::phases_in_range(day, day, tz).unwrap();
            assert!(
                hits.iter().any(|p| p.phase_instant == event.instant),
                "{tz}: {} missing from {day}",
                event.instant
            );
        }
    }
}

// ==================== Collections and Metadata ====================

#[test]
fn test_collection_sizes() {
    assert_eq!(api::collection().len(), 4);
    assert_eq!(api::detailed_collection().len(), 36);
    assert_eq!(api::collection()[2].value, PrimaryPhase::FullMoon);
}

#[test]
fn test_for_id() {
    assert_eq!(api::for_id(0), "New Moon -4 days");
    assert_eq!(api::for_id(22), "Full Moon");
    assert_eq!(api::for_id(36), "not found");
    assert_eq!(api::for_id(-1), "not found");
}

#[test]
fn test_lookup_legacy_id_round_trip() {
    let lookup = api::for_date(date(2025, 1, 15), "Australia/Brisbane").unwrap();
    let id = lookup.legacy_id().unwrap();
    assert_eq!(api::for_id(id), "Full Moon +1 day");
    assert_eq!(lookup.detailed_token(), "full_moon:1");
}

#[test]
fn test_valid_range_bounds() {
    let range = api::valid_range("UTC").unwrap();
    assert!(range.earliest.year() <= 2001);
    assert!(range.latest.year() >= 2049);
    assert!(api::for_date(range.earliest, "UTC").is_ok());
    assert!(api::for_date(range.latest, "UTC").is_ok());
}

#[test]
fn test_lookup_serializes_to_json() {
    let lookup = api::for_date(date(2025, 1, 14), "Australia/Brisbane").unwrap();
    let json = serde_json::to_value(&lookup).unwrap();
    assert_eq!(json["primary_phase"], "full_moon");
    assert_eq!(json["offset"], 0);
    assert_eq!(json["timezone"], "Australia/Brisbane");
    assert_eq!(json["date"], "2025-01-14");
}
