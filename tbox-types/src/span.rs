use crate::value::SpanValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// An ordered range over a comparable domain with independent
/// inclusive/exclusive flags on each bound.
///
/// A span is never empty: `lower <= upper`, and a degenerate span
/// (`lower == upper`) is always closed on both ends.
///
/// # Examples
///
/// ```
/// use tbox_types::span::Span;
///
/// let span = Span::new(1_i64, 5, true, false).unwrap();
/// assert!(span.contains_value(&1));
/// assert!(!span.contains_value(&5));
///
/// // An open degenerate span would be empty.
/// assert!(Span::new(3_i64, 3, true, false).is_none());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Span<T> {
    lower: T,
    upper: T,
    lower_inc: bool,
    upper_inc: bool,
}

impl<T: SpanValue> Span<T> {
    /// Create a span, returning `None` when the bounds describe an empty range.
    pub fn new(lower: T, upper: T, lower_inc: bool, upper_inc: bool) -> Option<Self> {
        match lower.compare(&upper) {
            Ordering::Greater => None,
            Ordering::Equal if !(lower_inc && upper_inc) => None,
            _ => Some(Self {
                lower,
                upper,
                lower_inc,
                upper_inc,
            }),
        }
    }

    /// The closed singleton span `[value, value]`.
    pub fn point(value: T) -> Self {
        Self {
            lower: value,
            upper: value,
            lower_inc: true,
            upper_inc: true,
        }
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }

    pub fn lower_inc(&self) -> bool {
        self.lower_inc
    }

    pub fn upper_inc(&self) -> bool {
        self.upper_inc
    }

    pub fn is_point(&self) -> bool {
        self.lower.equals(&self.upper)
    }

    pub fn contains_value(&self, value: &T) -> bool {
        let above_lower = match self.lower.compare(value) {
            Ordering::Less => true,
            Ordering::Equal => self.lower_inc,
            Ordering::Greater => false,
        };
        let below_upper = match value.compare(&self.upper) {
            Ordering::Less => true,
            Ordering::Equal => self.upper_inc,
            Ordering::Greater => false,
        };
        above_lower && below_upper
    }

    /// Grow this span to the tightest span enclosing both.
    ///
    /// The surviving bound keeps its own flag; when both bounds are equal the
    /// result is inclusive if either side was, so merging never shrinks the
    /// set of covered values.
    pub fn expand(&mut self, other: &Self) {
        match other.lower.compare(&self.lower) {
            Ordering::Less => {
                self.lower = other.lower;
                self.lower_inc = other.lower_inc;
            }
            Ordering::Equal => self.lower_inc |= other.lower_inc,
            Ordering::Greater => {}
        }
        match other.upper.compare(&self.upper) {
            Ordering::Greater => {
                self.upper = other.upper;
                self.upper_inc = other.upper_inc;
            }
            Ordering::Equal => self.upper_inc |= other.upper_inc,
            Ordering::Less => {}
        }
    }

    /// Total order: lower, then upper, then the lower and upper flags.
    ///
    /// Flags order as bounds do: an inclusive lower bound sorts before an
    /// exclusive one at the same value, an exclusive upper bound before an
    /// inclusive one.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.lower
            .compare(&other.lower)
            .then_with(|| self.upper.compare(&other.upper))
            .then_with(|| other.lower_inc.cmp(&self.lower_inc))
            .then_with(|| self.upper_inc.cmp(&other.upper_inc))
    }

    /// True when the lower bound of `self` is at or before the upper bound of `other`
    /// with both bounds admitting the meeting value.
    fn lower_reaches(&self, other: &Self) -> bool {
        match self.lower.compare(&other.upper) {
            Ordering::Less => true,
            Ordering::Equal => self.lower_inc && other.upper_inc,
            Ordering::Greater => false,
        }
    }

    pub(crate) fn overlaps_span(&self, other: &Self) -> bool {
        self.lower_reaches(other) && other.lower_reaches(self)
    }

    pub(crate) fn contains_span(&self, other: &Self) -> bool {
        let lower_ok = match self.lower.compare(&other.lower) {
            Ordering::Less => true,
            Ordering::Equal => self.lower_inc || !other.lower_inc,
            Ordering::Greater => false,
        };
        let upper_ok = match self.upper.compare(&other.upper) {
            Ordering::Greater => true,
            Ordering::Equal => self.upper_inc || !other.upper_inc,
            Ordering::Less => false,
        };
        lower_ok && upper_ok
    }

    /// Spans touch at a single value that exactly one of them includes.
    pub(crate) fn adjacent_span(&self, other: &Self) -> bool {
        (self.upper.equals(&other.lower) && self.upper_inc != other.lower_inc)
            || (other.upper.equals(&self.lower) && other.upper_inc != self.lower_inc)
    }
}

/// Expand an optional box dimension: a dimension missing on one side is
/// taken from the other.
pub(crate) fn expand_dim<T: SpanValue>(target: &mut Option<Span<T>>, source: Option<Span<T>>) {
    if let Some(source) = source {
        match target {
            Some(span) => span.expand(&source),
            None => *target = Some(source),
        }
    }
}

impl<T: SpanValue> PartialEq for Span<T> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}
