//! Display collections of phase kinds and kind/offset combinations.
//!
//! The detailed collection is ordered kind-major (rotation order) with offsets
//! from `-MAX_OFFSET` to `+MAX_OFFSET` inside each kind. A legacy identifier is
//! the position in that ordering, `SLOTS_PER_KIND * kind_index + offset +
//! MAX_OFFSET`. Consumers store these integers, so the ordering is fixed.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::PrimaryPhase;

/// Largest tabulated distance in days from a primary phase.
pub const MAX_OFFSET: i64 = 4;

/// Offsets per kind in the detailed collection.
pub const SLOTS_PER_KIND: usize = (2 * MAX_OFFSET + 1) as usize;

/// Size of the detailed collection.
pub const LEGACY_ID_COUNT: usize = SLOTS_PER_KIND * PrimaryPhase::ALL.len();

/// Shown by callers when an identifier is not in the detailed collection.
pub const NOT_FOUND: &str = "not found";

/// One entry of a display collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry<T> {
    pub name: String,
    pub value: T,
}

static COLLECTION: Lazy<Vec<CatalogEntry<PrimaryPhase>>> = Lazy::new(|| {
    PrimaryPhase::ALL
        .iter()
        .map(|&kind| CatalogEntry {
            name: kind.name().to_string(),
            value: kind,
        })
        .collect()
});

static DETAILED_COLLECTION: Lazy<Vec<CatalogEntry<String>>> = Lazy::new(|| {
    PrimaryPhase::ALL
        .iter()
        .flat_map(|&kind| {
            (-MAX_OFFSET..=MAX_OFFSET).map(move |offset| CatalogEntry {
                name: display_name(kind, offset),
                value: token(kind, offset),
            })
        })
        .collect()
});

/// The four primary kinds with their display names.
pub fn collection() -> &'static [CatalogEntry<PrimaryPhase>] {
    &COLLECTION
}

/// Every kind/offset combination with a `"kind:offset"` token.
pub fn detailed_collection() -> &'static [CatalogEntry<String>] {
    &DETAILED_COLLECTION
}

/// Display name for a legacy identifier, `None` when negative or out of table.
pub fn for_id(id: i64) -> Option<&'static str> {
    let index = usize::try_from(id).ok()?;
    DETAILED_COLLECTION.get(index).map(|entry| entry.name.as_str())
}

/// Legacy identifier of a kind/offset pair.
pub fn legacy_id(kind: PrimaryPhase, offset: i64) -> Option<i64> {
    if !(-MAX_OFFSET..=MAX_OFFSET).contains(&offset) {
        return None;
    }
    Some(SLOTS_PER_KIND as i64 * kind.index() as i64 + offset + MAX_OFFSET)
}

/// Inverse of [`legacy_id`].
pub fn from_legacy_id(id: i64) -> Option<(PrimaryPhase, i64)> {
    let index = usize::try_from(id).ok()?;
    let kind = PrimaryPhase::from_index(index / SLOTS_PER_KIND)?;
    let offset = (index % SLOTS_PER_KIND) as i64 - MAX_OFFSET;
    Some((kind, offset))
}

/// `"full_moon:-1"` style token.
pub fn token(kind: PrimaryPhase, offset: i64) -> String {
    format!("{}:{}", kind.key(), offset)
}

/// Parse a token produced by [`token`].
pub fn parse_token(value: &str) -> Option<(PrimaryPhase, i64)> {
    let (kind, offset) = value.split_once(':')?;
    let kind = kind.parse::<PrimaryPhase>().ok()?;
    let offset = offset.trim().parse::<i64>().ok()?;
    Some((kind, offset))
}

/// `"Full Moon"`, `"Full Moon +1 day"`, `"New Moon -3 days"`.
pub fn display_name(kind: PrimaryPhase, offset: i64) -> String {
    match offset {
        0 => kind.name().to_string(),
        1 | -1 => format!("{} {:+} day", kind.name(), offset),
        _ => format!("{} {:+} days", kind.name(), offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_sizes() {
        assert_eq!(collection().len(), 4);
        assert_eq!(detailed_collection().len(), 36);
        assert_eq!(LEGACY_ID_COUNT, 36);
    }

    #[test]
    fn test_detailed_collection_is_kind_major() {
        let detailed = detailed_collection();
        assert_eq!(detailed[0].value, "new_moon:-4");
        assert_eq!(detailed[4].value, "new_moon:0");
        assert_eq!(detailed[4].name, "New Moon");
        assert_eq!(detailed[9].value, "first_quarter:-4");
        assert_eq!(detailed[22].value, "full_moon:0");
        assert_eq!(detailed[35].value, "third_quarter:4");
        assert_eq!(detailed[35].name, "Third Quarter +4 days");
    }

    #[test]
    fn test_for_id_matches_detailed_collection() {
        for (index, entry) in detailed_collection().iter().enumerate() {
            let id = index as i64;
            assert_eq!(for_id(id), Some(entry.name.as_str()));
            let (kind, offset) = from_legacy_id(id).unwrap();
            assert_eq!(legacy_id(kind, offset), Some(id));
            assert_eq!(parse_token(&entry.value), Some((kind, offset)));
        }
    }

    #[test]
    fn test_for_id_out_of_table() {
        assert_eq!(for_id(36), None);
        assert_eq!(for_id(i64::MAX), None);
        assert_eq!(from_legacy_id(36), None);
    }

    #[test]
    fn test_negative_ids_are_not_found() {
        assert_eq!(for_id(-1), None);
        assert_eq!(for_id(i64::MIN), None);
        assert_eq!(from_legacy_id(-9), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name(PrimaryPhase::FullMoon, 1), "Full Moon +1 day");
        assert_eq!(display_name(PrimaryPhase::FullMoon, -1), "Full Moon -1 day");
        assert_eq!(display_name(PrimaryPhase::NewMoon, -3), "New Moon -3 days");
    }

    #[test]
    fn test_parse_token_rejects_garbage() {
        assert_eq!(parse_token("full_moon"), None);
        assert_eq!(parse_token("gibbous:1"), None);
        assert_eq!(parse_token("full_moon:x"), None);
        assert_eq!(parse_token("full_moon:+2"), Some((PrimaryPhase::FullMoon, 2)));
    }
}
