//! Moon Phase Rust Backend - primary lunar phase lookup for civil dates.
//!
//! Given a calendar date and an IANA timezone, find the nearest tabulated
//! primary phase (new moon, first quarter, full moon, third quarter) and the
//! signed day offset from it, as seen on the observer's local calendar.
//!
//! ```
//! use chrono::NaiveDate;
//! use moonphase_rust::api;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let lookup = api::for_date(date, "Australia/Brisbane").unwrap();
//! assert_eq!(lookup.display_name(), "Full Moon +1 day");
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod resolver;
pub mod table;
pub mod time;

pub use error::{PhaseError, PhaseResult};
pub use models::{PhaseEvent, PhaseLookup, PrimaryPhase, ValidRange};
pub use resolver::Resolver;
pub use table::PhaseTable;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version label of the bundled phase dataset.
pub const DATASET_VERSION: &str = "2000-2050.1";
