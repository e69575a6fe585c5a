//! # timerange
//!
//! Closed time intervals and the set difference between them.
//!
//! The typical use is computing free time: start from an availability window,
//! subtract busy or excluded intervals, and keep what is left.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use timerange::{parse, TimeRange};
//!
//! let reference = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
//! let window = parse(&reference, &["09:00-17:30"]).unwrap().remove(0);
//! let busy = parse(&reference, &["08:00-11:00", "12:00-13:00", "14:00-18:00"]).unwrap();
//!
//! let free: Vec<String> = window
//!     .free_time(&busy)
//!     .iter()
//!     .map(|slot| format!("{}-{}", slot.start().format("%H:%M"), slot.end().format("%H:%M")))
//!     .collect();
//! assert_eq!(free, ["11:00-12:00", "13:00-14:00"]);
//! ```
//!
//! ## Modules
//!
//! - [`range`] — the [`TimeRange`] type, `sub` / `sub_multi`, `max` / `min`
//! - [`parse`](mod@parse) — `"HH:MM-HH:MM"` lists onto a reference day, clock normalization
//! - [`error`] — Error types

pub mod error;
pub mod parse;
pub mod range;

pub use error::{Result, TimeRangeError};
pub use parse::{normalize, parse, parse_with_options, InvertedPolicy, ParseOptions};
pub use range::{max, min, TimeRange};
