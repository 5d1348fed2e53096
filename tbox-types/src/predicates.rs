//! Topological predicates shared by spans and boxes.
//!
//! Boxes only consider the dimensions present in both operands: a value-only
//! box and a time-only box share nothing, and every predicate between them is
//! false.

use crate::span::Span;
use crate::value::SpanValue;
use serde::{Deserialize, Serialize};

/// Binary predicates consumed by index operators.
pub trait BoxPredicates {
    fn overlaps(&self, other: &Self) -> bool;

    fn contains(&self, other: &Self) -> bool;

    fn contained(&self, other: &Self) -> bool {
        other.contains(self)
    }

    fn same(&self, other: &Self) -> bool;

    fn adjacent(&self, other: &Self) -> bool;
}

impl<T: SpanValue> BoxPredicates for Span<T> {
    fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_span(other)
    }

    fn contains(&self, other: &Self) -> bool {
        self.contains_span(other)
    }

    fn same(&self, other: &Self) -> bool {
        self == other
    }

    fn adjacent(&self, other: &Self) -> bool {
        self.adjacent_span(other)
    }
}

/// Named form of the [`BoxPredicates`] methods, for callers that pick the
/// operator at runtime.
///
/// ```
/// use tbox_types::predicates::BoxOp;
/// use tbox_types::span::Span;
///
/// let outer = Span::new(0_i64, 10, true, true).unwrap();
/// let inner = Span::new(2_i64, 3, true, true).unwrap();
/// assert!(BoxOp::Contains.apply(&outer, &inner));
/// assert!(BoxOp::Contained.apply(&inner, &outer));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxOp {
    Overlaps,
    Contains,
    Contained,
    Same,
    Adjacent,
}

impl BoxOp {
    pub fn apply<B: BoxPredicates>(self, left: &B, right: &B) -> bool {
        match self {
            BoxOp::Overlaps => left.overlaps(right),
            BoxOp::Contains => left.contains(right),
            BoxOp::Contained => left.contained(right),
            BoxOp::Same => left.same(right),
            BoxOp::Adjacent => left.adjacent(right),
        }
    }

    /// The operator obtained by swapping the operands.
    pub fn commute(self) -> Self {
        match self {
            BoxOp::Contains => BoxOp::Contained,
            BoxOp::Contained => BoxOp::Contains,
            other => other,
        }
    }
}

/// How one shared dimension relates, used to fold per-dimension results of
/// box predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contact {
    Disjoint,
    /// Touching at a single value, possibly without sharing it.
    Touching,
    Overlapping,
}

impl Contact {
    pub(crate) fn of_spans<T: SpanValue>(a: &Span<T>, b: &Span<T>) -> Self {
        if a.adjacent_span(b) {
            Contact::Touching
        } else if a.overlaps_span(b) {
            Contact::Overlapping
        } else {
            Contact::Disjoint
        }
    }
}

/// Adjacency over several shared dimensions: none disjoint, at least one touching.
pub(crate) fn adjacent_contacts(contacts: &[Contact]) -> bool {
    !contacts.is_empty()
        && contacts.iter().all(|c| *c != Contact::Disjoint)
        && contacts.contains(&Contact::Touching)
}
