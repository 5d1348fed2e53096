use crate::dims::{Dim, Dimensions};
use crate::predicates::{BoxPredicates, Contact, adjacent_contacts};
use crate::span::{Span, expand_dim};
use crate::value::{Number, Timestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

type SpanPair<T> = Option<(Span<T>, Span<T>)>;

/// Bounding box of a temporal number: a value span and a time span.
///
/// Either dimension may be absent, but not both.
///
/// # Examples
///
/// ```
/// use tbox_types::tbox::TBox;
/// use tbox_types::value::{Number, Timestamp};
///
/// let mut bbox = TBox::point(Number::Int(3), Timestamp::from_secs(0));
/// bbox.expand(&TBox::point(Number::Int(7), Timestamp::from_secs(10)));
///
/// let span = bbox.span().unwrap();
/// assert_eq!(span.lower(), Number::Int(3));
/// assert_eq!(span.upper(), Number::Int(7));
/// assert_eq!(bbox.period().unwrap().upper(), Timestamp::from_secs(10));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TBox {
    span: Option<Span<Number>>,
    period: Option<Span<Timestamp>>,
}

impl TBox {
    /// Returns `None` when neither dimension is given.
    pub fn new(span: Option<Span<Number>>, period: Option<Span<Timestamp>>) -> Option<Self> {
        if span.is_none() && period.is_none() {
            return None;
        }
        Some(Self { span, period })
    }

    pub fn from_span(span: Span<Number>) -> Self {
        Self {
            span: Some(span),
            period: None,
        }
    }

    pub fn from_period(period: Span<Timestamp>) -> Self {
        Self {
            span: None,
            period: Some(period),
        }
    }

    pub fn from_span_period(span: Span<Number>, period: Span<Timestamp>) -> Self {
        Self {
            span: Some(span),
            period: Some(period),
        }
    }

    /// The degenerate box of a single observation.
    pub fn point(value: Number, t: Timestamp) -> Self {
        Self::from_span_period(Span::point(value), Span::point(t))
    }

    pub fn span(&self) -> Option<&Span<Number>> {
        self.span.as_ref()
    }

    pub fn period(&self) -> Option<&Span<Timestamp>> {
        self.period.as_ref()
    }

    pub fn has_x(&self) -> bool {
        self.span.is_some()
    }

    pub fn has_t(&self) -> bool {
        self.period.is_some()
    }

    pub fn dims(&self) -> Dimensions {
        let mut dims = Dimensions::empty();
        if self.has_x() {
            dims.insert(Dim::Value);
        }
        if self.has_t() {
            dims.insert(Dim::Time);
        }
        dims
    }

    /// Grow this box to enclose `other`, dimension by dimension.
    pub fn expand(&mut self, other: &TBox) {
        expand_dim(&mut self.span, other.span);
        expand_dim(&mut self.period, other.period);
    }

    /// Lexicographic order: value span, then period.
    ///
    /// Returns `None` when a dimension is present in one box only.
    pub fn try_cmp(&self, other: &TBox) -> Option<Ordering> {
        let value = match (&self.span, &other.span) {
            (Some(a), Some(b)) => a.compare(b),
            (None, None) => Ordering::Equal,
            _ => return None,
        };
        if value != Ordering::Equal {
            return Some(value);
        }
        match (&self.period, &other.period) {
            (Some(a), Some(b)) => Some(a.compare(b)),
            (None, None) => Some(Ordering::Equal),
            _ => None,
        }
    }

    /// Pairs of spans for the dimensions both boxes carry.
    fn shared(&self, other: &TBox) -> (SpanPair<Number>, SpanPair<Timestamp>) {
        (self.span.zip(other.span), self.period.zip(other.period))
    }
}

impl PartialEq for TBox {
    fn eq(&self, other: &Self) -> bool {
        self.try_cmp(other) == Some(Ordering::Equal)
    }
}

impl BoxPredicates for TBox {
    fn overlaps(&self, other: &Self) -> bool {
        match self.shared(other) {
            (None, None) => false,
            (x, t) => {
                x.is_none_or(|(a, b)| a.overlaps(&b)) && t.is_none_or(|(a, b)| a.overlaps(&b))
            }
        }
    }

    fn contains(&self, other: &Self) -> bool {
        match self.shared(other) {
            (None, None) => false,
            (x, t) => {
                x.is_none_or(|(a, b)| a.contains(&b)) && t.is_none_or(|(a, b)| a.contains(&b))
            }
        }
    }

    fn same(&self, other: &Self) -> bool {
        match self.shared(other) {
            (None, None) => false,
            (x, t) => x.is_none_or(|(a, b)| a == b) && t.is_none_or(|(a, b)| a == b),
        }
    }

    fn adjacent(&self, other: &Self) -> bool {
        let (x, t) = self.shared(other);
        let mut contacts = Vec::with_capacity(2);
        if let Some((a, b)) = x {
            contacts.push(Contact::of_spans(&a, &b));
        }
        if let Some((a, b)) = t {
            contacts.push(Contact::of_spans(&a, &b));
        }
        adjacent_contacts(&contacts)
    }
}
