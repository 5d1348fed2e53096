//! Compute layer for bounding boxes.
//!
//! - `bbox`: construction, merging and comparison of boxes
//! - `decompose`: multi-entry decomposition under a box budget
//! - `boxops`: box operators between temporal values, spans and boxes
//! - `validation`: checks run before a box is computed

pub mod bbox;
pub mod boxops;
pub mod decompose;
pub mod validation;
