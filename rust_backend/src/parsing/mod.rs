//! Parsers for the lunar phase dataset.
//!
//! # Parsers
//!
//! - [`dataset_parser`]: Parse and validate the JSON phase table
//!
//! # Example
//!
//! ```no_run
//! use moonphase_rust::parsing::dataset_parser::parse_dataset_file;
//! use std::path::Path;
//!
//! let dataset = parse_dataset_file(Path::new("lunar_phases.json"))
//!     .expect("Failed to parse phase dataset");
//! println!("{} phases", dataset.events.len());
//! ```

pub mod dataset_parser;


pub use dataset_parser::{parse_dataset_file, parse_dataset_str, ParsedDataset};
