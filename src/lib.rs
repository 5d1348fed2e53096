//! Bounding boxes for temporal values: construction, merging, comparison,
//! multi-entry decomposition and box operators.
//!
//! ```rust
//! use tbox::compute::decompose::decompose;
//! use tbox::{Instant, Interpolation, Sequence, Temporal, TemporalType, Timestamp, Value};
//!
//! let instants = vec![
//!     Instant::new(TemporalType::TFloat, Value::Float(1.0), Timestamp::from_secs(0))?,
//!     Instant::new(TemporalType::TFloat, Value::Float(4.0), Timestamp::from_secs(1))?,
//!     Instant::new(TemporalType::TFloat, Value::Float(2.0), Timestamp::from_secs(2))?,
//! ];
//! let temp: Temporal = Sequence::new(instants, true, true, Interpolation::Linear)?.into();
//!
//! let tbox = temp.tbox()?;
//! assert_eq!(tbox.span().unwrap().upper().as_f64(), 4.0);
//! assert_eq!(decompose(&temp, 2)?.len(), 2);
//! # Ok::<(), tbox::TBoxError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod index;
pub mod temporal;

pub use builder::{SequenceBuilder, SequenceSetBuilder};
pub use error::{Result, TBoxError};

pub use config::{
    BoundingBox, BoxKind, BoxOp, BoxPredicates, Config, Dim, Dimensions, GeoPoint, Number,
    STBox, Span, SpanValue, TBox, Timestamp, ValidationMode,
};

pub use temporal::{
    DomainKind, Instant, Interpolation, Sequence, SequenceSet, Temporal, TemporalType, Value,
};

pub use compute::bbox::{
    bbox_max_dims, box_from_instant, box_from_instants, box_from_sequence, box_from_sequences,
    expand, expand_with_instant, expand_with_sequence, temporal_bbox_cmp, temporal_bbox_eq,
    temporal_bbox_size,
};
pub use compute::decompose::decompose;

pub use index::{MultiEntryIndex, MultiEntryIndexStats};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, TBoxError};

    pub use crate::{Instant, Interpolation, Sequence, SequenceSet, Temporal, TemporalType, Value};

    pub use crate::{BoundingBox, BoxOp, BoxPredicates, Number, STBox, Span, TBox, Timestamp};

    pub use crate::{SequenceBuilder, SequenceSetBuilder};

    pub use crate::{Config, MultiEntryIndex, ValidationMode};

    pub use crate::compute::decompose::decompose;
}
