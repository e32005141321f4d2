//! Header-driven mapping of sheet rows to [`crate::Point`] fields.
//!
//! - [`header`] - Header row → column index, with an explicit collision policy
//! - [`fields`] - The static column contract
//! - [`decode`] - Per-kind cell decoding
//! - [`duration`] - Duration expressions (`500ms`, `1.5s`, `1h30m`)

pub mod decode;
pub mod duration;
pub mod fields;
pub mod header;

pub use decode::{decode_field, decode_frequency, decode_unsigned, with_inferred_unit};
pub use duration::{format_duration, parse_duration};
pub use fields::{field_for_label, FieldKind, FieldSpec, FIELDS};
pub use header::{HeaderCollision, HeaderIndex};
