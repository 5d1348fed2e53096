use crate::dims::{Dim, Dimensions};
use crate::span::Span;
use crate::stbox::STBox;
use crate::tbox::TBox;
use crate::value::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem::size_of;

/// The kinds of bounding box a temporal value can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxKind {
    /// Time span only, for temporal booleans and texts.
    Period,
    /// Value span and time span, for temporal numbers.
    TBox,
    /// Spatial extents and time span, for temporal points.
    STBox,
}

impl BoxKind {
    /// Memory footprint of a box of this kind.
    pub const fn size(self) -> usize {
        match self {
            BoxKind::Period => size_of::<Span<Timestamp>>(),
            BoxKind::TBox => size_of::<TBox>(),
            BoxKind::STBox => size_of::<STBox>(),
        }
    }

    /// Maximum number of dimensions a box of this kind can populate.
    pub const fn max_dims(self) -> usize {
        match self {
            BoxKind::Period => 1,
            BoxKind::TBox => 2,
            BoxKind::STBox => 4,
        }
    }
}

impl fmt::Display for BoxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoxKind::Period => "tstzspan",
            BoxKind::TBox => "tbox",
            BoxKind::STBox => "stbox",
        };
        f.write_str(name)
    }
}

/// A bounding box of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundingBox {
    Period(Span<Timestamp>),
    Number(TBox),
    Spatial(STBox),
}

impl BoundingBox {
    pub fn kind(&self) -> BoxKind {
        match self {
            BoundingBox::Period(_) => BoxKind::Period,
            BoundingBox::Number(_) => BoxKind::TBox,
            BoundingBox::Spatial(_) => BoxKind::STBox,
        }
    }

    /// The time dimension, if populated.
    pub fn period(&self) -> Option<&Span<Timestamp>> {
        match self {
            BoundingBox::Period(period) => Some(period),
            BoundingBox::Number(tbox) => tbox.period(),
            BoundingBox::Spatial(stbox) => stbox.period(),
        }
    }

    pub fn as_tbox(&self) -> Option<&TBox> {
        match self {
            BoundingBox::Number(tbox) => Some(tbox),
            _ => None,
        }
    }

    pub fn as_stbox(&self) -> Option<&STBox> {
        match self {
            BoundingBox::Spatial(stbox) => Some(stbox),
            _ => None,
        }
    }

    pub fn dims(&self) -> Dimensions {
        match self {
            BoundingBox::Period(_) => [Dim::Time].into_iter().collect(),
            BoundingBox::Number(tbox) => tbox.dims(),
            BoundingBox::Spatial(stbox) => stbox.dims(),
        }
    }
}

impl From<Span<Timestamp>> for BoundingBox {
    fn from(period: Span<Timestamp>) -> Self {
        BoundingBox::Period(period)
    }
}

impl From<TBox> for BoundingBox {
    fn from(tbox: TBox) -> Self {
        BoundingBox::Number(tbox)
    }
}

impl From<STBox> for BoundingBox {
    fn from(stbox: STBox) -> Self {
        BoundingBox::Spatial(stbox)
    }
}
