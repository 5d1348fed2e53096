//! Bounding box construction, merging and comparison for temporal values.
//!
//! The value extent of a sequence is tracked through [`SpanValue`] only, so
//! the same running min/max code serves integer and float numbers. Spatial
//! extents are always closed.

use crate::config::{BoundingBox, BoxKind, GeoPoint, STBox, Span, SpanValue, TBox, Timestamp};
use crate::error::{Result, TBoxError};
use crate::temporal::{Instant, Interpolation, Sequence, TemporalType, Value};
use geo::{Rect, coord};
use std::cmp::Ordering;

/// The degenerate box of a single instant.
///
/// # Examples
///
/// ```
/// use tbox::compute::bbox::box_from_instant;
/// use tbox::{Instant, Number, Span, TemporalType, Timestamp, Value};
///
/// let inst = Instant::new(TemporalType::TInt, Value::Int(7), Timestamp::from_secs(1))?;
/// let tbox = *box_from_instant(&inst).as_tbox().unwrap();
///
/// assert_eq!(tbox.span(), Some(&Span::point(Number::Int(7))));
/// assert_eq!(tbox.period(), Some(&Span::point(Timestamp::from_secs(1))));
/// # Ok::<(), tbox::TBoxError>(())
/// ```
pub fn box_from_instant(inst: &Instant) -> BoundingBox {
    let t = inst.timestamp();
    if let Some(number) = inst.value().as_number() {
        return BoundingBox::Number(TBox::point(number, t));
    }
    match inst.value() {
        Value::Point(p) => {
            BoundingBox::Spatial(STBox::point(p, t, inst.temporal_type().is_geodetic()))
        }
        _ => BoundingBox::Period(Span::point(t)),
    }
}

/// Running minimum and maximum of a value dimension with bound inclusivity.
struct Extent<T> {
    min: T,
    max: T,
    min_inc: bool,
    max_inc: bool,
}

impl<T: SpanValue> Extent<T> {
    fn start(value: T, inc: bool) -> Self {
        Self {
            min: value,
            max: value,
            min_inc: inc,
            max_inc: inc,
        }
    }

    /// Fold in a value; `attained` says whether the value is actually taken.
    fn observe(&mut self, value: T, attained: bool) {
        match value.compare(&self.min) {
            Ordering::Less => {
                self.min = value;
                self.min_inc = attained;
            }
            Ordering::Equal => self.min_inc |= attained,
            Ordering::Greater => {}
        }
        match value.compare(&self.max) {
            Ordering::Greater => {
                self.max = value;
                self.max_inc = attained;
            }
            Ordering::Equal => self.max_inc |= attained,
            Ordering::Less => {}
        }
    }

    fn into_span(self) -> Result<Span<T>> {
        let constant = self.min.equals(&self.max);
        let (min_inc, max_inc) = if constant {
            (true, true)
        } else {
            (self.min_inc, self.max_inc)
        };
        Span::new(self.min, self.max, min_inc, max_inc)
            .ok_or_else(|| TBoxError::internal_type("empty value extent", "box_from_instants"))
    }
}

/// Value extent of `values` taken in time order.
///
/// Interior values are always attained. The first and last value are
/// attained only when the corresponding bound is inclusive.
fn value_extent<T, I>(mut values: I, lower_inc: bool, upper_inc: bool) -> Result<Span<T>>
where
    T: SpanValue,
    I: ExactSizeIterator<Item = T>,
{
    let last = values.len().saturating_sub(1);
    let first = values
        .next()
        .ok_or_else(|| TBoxError::invalid_input("Cannot compute the extent of no values"))?;
    let mut extent = Extent::start(first, lower_inc);
    for (i, value) in values.enumerate() {
        let attained = i + 1 < last || upper_inc;
        extent.observe(value, attained);
    }
    extent.into_span()
}

/// Bounding box of a run of instants.
///
/// The time span uses `lower_inc`/`upper_inc` as given. Under discrete and
/// step interpolation every instant value is attained, so the value bounds
/// are inclusive whatever the period bounds are.
///
/// # Examples
///
/// ```
/// use tbox::compute::bbox::box_from_instants;
/// use tbox::{Instant, Interpolation, Number, TemporalType, Timestamp, Value};
///
/// let instants = [
///     Instant::new(TemporalType::TFloat, Value::Float(5.0), Timestamp::from_secs(0))?,
///     Instant::new(TemporalType::TFloat, Value::Float(3.0), Timestamp::from_secs(1))?,
///     Instant::new(TemporalType::TFloat, Value::Float(7.0), Timestamp::from_secs(2))?,
/// ];
/// let bbox = box_from_instants(TemporalType::TFloat, &instants, true, false, Interpolation::Linear)?;
/// let span = *bbox.as_tbox().unwrap().span().unwrap();
///
/// assert_eq!(span.lower(), Number::Float(3.0));
/// assert!(span.lower_inc());
/// // The maximum is only approached at the excluded upper bound.
/// assert!(!span.upper_inc());
/// # Ok::<(), tbox::TBoxError>(())
/// ```
pub fn box_from_instants(
    ttype: TemporalType,
    instants: &[Instant],
    lower_inc: bool,
    upper_inc: bool,
    interp: Interpolation,
) -> Result<BoundingBox> {
    let (Some(first), Some(last)) = (instants.first(), instants.last()) else {
        return Err(TBoxError::invalid_input(
            "Cannot compute the bounding box of no instants",
        ));
    };
    let period = Span::new(first.timestamp(), last.timestamp(), lower_inc, upper_inc)
        .ok_or_else(|| {
            TBoxError::InvalidTimestamp(format!(
                "Empty period from {} to {} (lower_inc: {}, upper_inc: {})",
                first.timestamp(),
                last.timestamp(),
                lower_inc,
                upper_inc
            ))
        })?;

    let (value_lower_inc, value_upper_inc) = match interp {
        Interpolation::Linear => (lower_inc, upper_inc),
        Interpolation::Discrete | Interpolation::Step => (true, true),
    };

    match ttype.domain().box_kind() {
        BoxKind::Period => Ok(BoundingBox::Period(period)),
        BoxKind::TBox => {
            let numbers = instants
                .iter()
                .map(|inst| {
                    inst.value().as_number().ok_or_else(|| {
                        TBoxError::internal_type(
                            format!("{} value in {}", inst.value().type_name(), ttype),
                            "box_from_instants",
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let span = value_extent(numbers.into_iter(), value_lower_inc, value_upper_inc)?;
            Ok(BoundingBox::Number(TBox::from_span_period(span, period)))
        }
        BoxKind::STBox => {
            let points = instants
                .iter()
                .map(|inst| {
                    inst.value().as_point().ok_or_else(|| {
                        TBoxError::internal_type(
                            format!("{} value in {}", inst.value().type_name(), ttype),
                            "box_from_instants",
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            spatial_extent(&points, period, ttype.is_geodetic()).map(BoundingBox::Spatial)
        }
    }
}

fn spatial_extent(points: &[&GeoPoint], period: Span<Timestamp>, geodetic: bool) -> Result<STBox> {
    let Some(first) = points.first() else {
        return Err(TBoxError::invalid_input(
            "Cannot compute the spatial extent of no points",
        ));
    };
    let (mut xmin, mut ymin, mut xmax, mut ymax) = (first.x(), first.y(), first.x(), first.y());
    let mut z = first.z().map(|z| (z, z));
    for p in &points[1..] {
        xmin = xmin.min(p.x());
        ymin = ymin.min(p.y());
        xmax = xmax.max(p.x());
        ymax = ymax.max(p.y());
        if let (Some((zmin, zmax)), Some(pz)) = (z.as_mut(), p.z()) {
            *zmin = zmin.min(pz);
            *zmax = zmax.max(pz);
        }
    }
    let xy = Rect::new(coord! { x: xmin, y: ymin }, coord! { x: xmax, y: ymax });
    STBox::new(Some(xy), z, Some(period), first.srid(), geodetic)
        .ok_or_else(|| TBoxError::internal_type("spatial extent", "box_from_instants"))
}

/// Rebuild a sequence's box from its instants, ignoring the cached one.
pub fn box_from_sequence(seq: &Sequence) -> Result<BoundingBox> {
    box_from_instants(
        seq.temporal_type(),
        seq.instants(),
        seq.lower_inc(),
        seq.upper_inc(),
        seq.interpolation(),
    )
}

/// Bounding box of ordered, non-overlapping sequences from their cached boxes.
pub fn box_from_sequences(sequences: &[Sequence]) -> Result<BoundingBox> {
    let Some((first, rest)) = sequences.split_first() else {
        return Err(TBoxError::invalid_input(
            "Cannot compute the bounding box of no sequences",
        ));
    };
    let mut bbox = *first.bbox();
    for seq in rest {
        expand(seq.bbox(), &mut bbox)?;
    }
    Ok(bbox)
}

/// Grow `target` to the tightest box enclosing both boxes.
///
/// Both boxes must be of the same kind.
pub fn expand(source: &BoundingBox, target: &mut BoundingBox) -> Result<()> {
    match (source, target) {
        (BoundingBox::Period(src), BoundingBox::Period(dst)) => dst.expand(src),
        (BoundingBox::Number(src), BoundingBox::Number(dst)) => dst.expand(src),
        (BoundingBox::Spatial(src), BoundingBox::Spatial(dst)) => dst.expand(src),
        (src, dst) => {
            return Err(TBoxError::internal_type(
                format!("{} into {}", src.kind(), dst.kind()),
                "expand",
            ));
        }
    }
    Ok(())
}

/// Grow `target` by the point box of a newly appended instant.
pub fn expand_with_instant(target: &mut BoundingBox, inst: &Instant) -> Result<()> {
    expand(&box_from_instant(inst), target)
}

/// Grow `target` by the cached box of a newly appended sequence.
pub fn expand_with_sequence(target: &mut BoundingBox, seq: &Sequence) -> Result<()> {
    expand(seq.bbox(), target)
}

/// Total order over boxes of one kind.
///
/// Dimensions are compared in order, each by lower bound, upper bound and
/// then inclusivity. Boxes of different kinds, or of one kind with different
/// dimensions, cannot be compared.
pub fn temporal_bbox_cmp(a: &BoundingBox, b: &BoundingBox) -> Result<Ordering> {
    let ordering = match (a, b) {
        (BoundingBox::Period(a), BoundingBox::Period(b)) => Some(a.compare(b)),
        (BoundingBox::Number(a), BoundingBox::Number(b)) => a.try_cmp(b),
        (BoundingBox::Spatial(a), BoundingBox::Spatial(b)) => a.try_cmp(b),
        (a, b) => {
            return Err(TBoxError::internal_type(
                format!("{} against {}", a.kind(), b.kind()),
                "temporal_bbox_cmp",
            ));
        }
    };
    ordering.ok_or_else(|| {
        TBoxError::internal_type(
            format!("{} dimensions {:?} against {:?}", a.kind(), a.dims(), b.dims()),
            "temporal_bbox_cmp",
        )
    })
}

/// Box equality, defined as the comparator returning `Equal`.
pub fn temporal_bbox_eq(a: &BoundingBox, b: &BoundingBox) -> Result<bool> {
    Ok(temporal_bbox_cmp(a, b)? == Ordering::Equal)
}

/// Footprint of the box carried by the temporal type with catalog tag `tag`.
pub fn temporal_bbox_size(tag: u8) -> Result<usize> {
    let ttype = TemporalType::try_from(tag).map_err(|_| {
        TBoxError::internal_type(format!("temporal type tag {}", tag), "temporal_bbox_size")
    })?;
    Ok(ttype.domain().box_kind().size())
}

/// Maximum dimension count of the box carried by the temporal type with
/// catalog tag `tag`.
pub fn bbox_max_dims(tag: u8) -> Result<usize> {
    let ttype = TemporalType::try_from(tag).map_err(|_| {
        TBoxError::internal_type(format!("temporal type tag {}", tag), "bbox_max_dims")
    })?;
    Ok(ttype.domain().box_kind().max_dims())
}
