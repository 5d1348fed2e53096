//! # tbox-types
//!
//! Value types for bounding boxes of temporal values.
//!
//! - **Base values**: `Timestamp`, `Number`, `GeoPoint`, and the `SpanValue`
//!   comparison capability
//! - **Spans**: `Span<T>`, a range with per-bound inclusivity
//! - **Boxes**: `TBox` (value × time), `STBox` (space × time), and the
//!   `BoundingBox` union tagged by `BoxKind`
//! - **Predicates**: overlaps, contains, contained, same and adjacent via
//!   `BoxPredicates`
//!
//! All types are serializable with Serde; spatial extents are built on the
//! `geo` crate's `Rect`.
//!
//! ## Examples
//!
//! ```rust
//! use tbox_types::predicates::BoxPredicates;
//! use tbox_types::span::Span;
//! use tbox_types::tbox::TBox;
//! use tbox_types::value::{Number, Timestamp};
//!
//! let speed = TBox::from_span_period(
//!     Span::new(Number::Float(10.0), Number::Float(55.5), true, true).unwrap(),
//!     Span::new(Timestamp::from_secs(0), Timestamp::from_secs(60), true, false).unwrap(),
//! );
//! let query = TBox::from_span(Span::new(Number::Int(50), Number::Int(60), true, true).unwrap());
//! assert!(speed.overlaps(&query));
//! ```

pub mod bbox;
pub mod dims;
pub mod point;
pub mod predicates;
pub mod span;
pub mod stbox;
pub mod tbox;
pub mod value;
