use crate::dims::{Dim, Dimensions};
use crate::point::GeoPoint;
use crate::predicates::{BoxPredicates, Contact, adjacent_contacts};
use crate::span::{Span, expand_dim};
use crate::value::{SpanValue, Timestamp};
use geo::{Rect, coord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Bounding box of a temporal point: x/y extents, optional z extent, and a
/// time span.
///
/// Spatial extents are always closed. A z extent requires x/y extents.
///
/// # Examples
///
/// ```
/// use tbox_types::point::GeoPoint;
/// use tbox_types::stbox::STBox;
/// use tbox_types::value::Timestamp;
///
/// let mut bbox = STBox::point(&GeoPoint::new(0.0, 0.0), Timestamp::from_secs(0), false);
/// bbox.expand(&STBox::point(&GeoPoint::new(4.0, -2.0), Timestamp::from_secs(5), false));
///
/// let rect = bbox.xy().unwrap();
/// assert_eq!(rect.min().x, 0.0);
/// assert_eq!(rect.min().y, -2.0);
/// assert_eq!(rect.max().x, 4.0);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct STBox {
    xy: Option<Rect<f64>>,
    z: Option<Span<f64>>,
    period: Option<Span<Timestamp>>,
    srid: i32,
    geodetic: bool,
}

impl STBox {
    /// Returns `None` when no dimension is given or when `z` comes without `xy`.
    pub fn new(
        xy: Option<Rect<f64>>,
        z: Option<(f64, f64)>,
        period: Option<Span<Timestamp>>,
        srid: i32,
        geodetic: bool,
    ) -> Option<Self> {
        if xy.is_none() && (z.is_some() || period.is_none()) {
            return None;
        }
        let z = match z {
            Some((zmin, zmax)) => Some(Span::new(zmin.min(zmax), zmin.max(zmax), true, true)?),
            None => None,
        };
        Some(Self {
            xy,
            z,
            period,
            srid,
            geodetic,
        })
    }

    /// The degenerate box of a single observation.
    pub fn point(point: &GeoPoint, t: Timestamp, geodetic: bool) -> Self {
        let c = coord! { x: point.x(), y: point.y() };
        Self {
            xy: Some(Rect::new(c, c)),
            z: point.z().map(Span::point),
            period: Some(Span::point(t)),
            srid: point.srid(),
            geodetic,
        }
    }

    pub fn xy(&self) -> Option<&Rect<f64>> {
        self.xy.as_ref()
    }

    /// The z extent as `(zmin, zmax)`.
    pub fn z(&self) -> Option<(f64, f64)> {
        self.z.map(|z| (z.lower(), z.upper()))
    }

    pub fn period(&self) -> Option<&Span<Timestamp>> {
        self.period.as_ref()
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn is_geodetic(&self) -> bool {
        self.geodetic
    }

    pub fn has_x(&self) -> bool {
        self.xy.is_some()
    }

    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    pub fn has_t(&self) -> bool {
        self.period.is_some()
    }

    pub fn dims(&self) -> Dimensions {
        let mut dims = Dimensions::empty();
        if self.has_x() {
            dims.insert(Dim::X);
            dims.insert(Dim::Y);
        }
        if self.has_z() {
            dims.insert(Dim::Z);
        }
        if self.has_t() {
            dims.insert(Dim::Time);
        }
        dims
    }

    /// Grow this box to enclose `other`. The SRID of `self` is kept.
    pub fn expand(&mut self, other: &STBox) {
        if let Some(other_xy) = other.xy {
            self.xy = Some(match self.xy {
                Some(xy) => Rect::new(
                    coord! {
                        x: xy.min().x.min(other_xy.min().x),
                        y: xy.min().y.min(other_xy.min().y),
                    },
                    coord! {
                        x: xy.max().x.max(other_xy.max().x),
                        y: xy.max().y.max(other_xy.max().y),
                    },
                ),
                None => other_xy,
            });
        }
        expand_dim(&mut self.z, other.z);
        expand_dim(&mut self.period, other.period);
    }

    /// Lexicographic order over x, y, z and time; SRID and the geodetic flag
    /// break remaining ties.
    ///
    /// Returns `None` when a dimension is present in one box only.
    pub fn try_cmp(&self, other: &STBox) -> Option<Ordering> {
        let xy = match (&self.xy, &other.xy) {
            (Some(a), Some(b)) => a
                .min()
                .x
                .compare(&b.min().x)
                .then_with(|| a.max().x.compare(&b.max().x))
                .then_with(|| a.min().y.compare(&b.min().y))
                .then_with(|| a.max().y.compare(&b.max().y)),
            (None, None) => Ordering::Equal,
            _ => return None,
        };
        let z = match (&self.z, &other.z) {
            (Some(a), Some(b)) => a.compare(b),
            (None, None) => Ordering::Equal,
            _ => return None,
        };
        let t = match (&self.period, &other.period) {
            (Some(a), Some(b)) => a.compare(b),
            (None, None) => Ordering::Equal,
            _ => return None,
        };
        Some(
            xy.then(z)
                .then(t)
                .then_with(|| self.srid.cmp(&other.srid))
                .then_with(|| self.geodetic.cmp(&other.geodetic)),
        )
    }

    /// Closed x/y extents as spans, for per-dimension predicates.
    fn xy_spans(&self) -> Option<(Span<f64>, Span<f64>)> {
        self.xy.map(|r| {
            (
                Span::new(r.min().x, r.max().x, true, true).unwrap_or(Span::point(r.min().x)),
                Span::new(r.min().y, r.max().y, true, true).unwrap_or(Span::point(r.min().y)),
            )
        })
    }

    fn all_shared<F, G>(&self, other: &STBox, spatial: F, temporal: G) -> bool
    where
        F: Fn(&Span<f64>, &Span<f64>) -> bool,
        G: Fn(&Span<Timestamp>, &Span<Timestamp>) -> bool,
    {
        let mut shared = false;
        if let (Some((ax, ay)), Some((bx, by))) = (self.xy_spans(), other.xy_spans()) {
            shared = true;
            if !(spatial(&ax, &bx) && spatial(&ay, &by)) {
                return false;
            }
        }
        if let (Some(a), Some(b)) = (&self.z, &other.z) {
            shared = true;
            if !spatial(a, b) {
                return false;
            }
        }
        if let (Some(a), Some(b)) = (&self.period, &other.period) {
            shared = true;
            if !temporal(a, b) {
                return false;
            }
        }
        shared
    }
}

/// Closed extents touch when one ends exactly where the other starts.
fn spatial_contact(a: &Span<f64>, b: &Span<f64>) -> Contact {
    if !a.overlaps(b) {
        Contact::Disjoint
    } else if a.upper() == b.lower() || b.upper() == a.lower() {
        Contact::Touching
    } else {
        Contact::Overlapping
    }
}

impl PartialEq for STBox {
    /// Order-based equality; `-0.0` and `0.0` extents are equal.
    fn eq(&self, other: &Self) -> bool {
        self.try_cmp(other) == Some(Ordering::Equal)
    }
}

impl BoxPredicates for STBox {
    fn overlaps(&self, other: &Self) -> bool {
        self.all_shared(other, |a, b| a.overlaps(b), |a, b| a.overlaps(b))
    }

    fn contains(&self, other: &Self) -> bool {
        self.all_shared(other, |a, b| a.contains(b), |a, b| a.contains(b))
    }

    fn same(&self, other: &Self) -> bool {
        self.all_shared(other, |a, b| a == b, |a, b| a == b)
    }

    fn adjacent(&self, other: &Self) -> bool {
        let mut contacts = Vec::with_capacity(4);
        if let (Some((ax, ay)), Some((bx, by))) = (self.xy_spans(), other.xy_spans()) {
            contacts.push(spatial_contact(&ax, &bx));
            contacts.push(spatial_contact(&ay, &by));
        }
        if let (Some(a), Some(b)) = (&self.z, &other.z) {
            contacts.push(spatial_contact(a, b));
        }
        if let (Some(a), Some(b)) = (&self.period, &other.period) {
            contacts.push(Contact::of_spans(a, b));
        }
        adjacent_contacts(&contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stbox(xmin: f64, ymin: f64, xmax: f64, ymax: f64, tmin: i64, tmax: i64) -> STBox {
        STBox::new(
            Some(Rect::new(coord! { x: xmin, y: ymin }, coord! { x: xmax, y: ymax })),
            None,
            Span::new(
                Timestamp::from_secs(tmin),
                Timestamp::from_secs(tmax),
                true,
                true,
            ),
            4326,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_stbox_new_validation() {
        assert!(STBox::new(None, None, None, 0, false).is_none());
        assert!(STBox::new(None, Some((0.0, 1.0)), None, 0, false).is_none());
        let period_only =
            STBox::new(None, None, Some(Span::point(Timestamp::from_secs(1))), 0, false).unwrap();
        assert_eq!(period_only.dims().len(), 1);
    }

    #[test]
    fn test_signed_zero_extents_compare_equal() {
        let a = stbox(-0.0, 0.0, 1.0, 1.0, 0, 1);
        let b = stbox(0.0, -0.0, 1.0, 1.0, 0, 1);
        assert_eq!(a.try_cmp(&b), Some(Ordering::Equal));
        assert_eq!(a, b);
    }

    #[test]
    fn test_stbox_point_dims() {
        let bbox = STBox::point(&GeoPoint::new_3d(1.0, 2.0, 3.0), Timestamp::from_secs(0), true);
        assert_eq!(bbox.dims().len(), 4);
        assert_eq!(bbox.z(), Some((3.0, 3.0)));
        assert!(bbox.is_geodetic());
    }

    #[test]
    fn test_stbox_expand_and_compare() {
        let mut a = stbox(0.0, 0.0, 1.0, 1.0, 0, 10);
        let b = stbox(-1.0, 0.5, 0.5, 3.0, 5, 20);
        a.expand(&b);
        assert_eq!(a, stbox(-1.0, 0.0, 1.0, 3.0, 0, 20));

        let before = stbox(0.0, 0.0, 1.0, 1.0, 0, 10);
        assert_eq!(before.try_cmp(&a), Some(Ordering::Greater));

        let no_time = STBox::new(before.xy().copied(), None, None, 4326, false).unwrap();
        assert_eq!(before.try_cmp(&no_time), None);
    }

    #[test]
    fn test_stbox_predicates() {
        let outer = stbox(0.0, 0.0, 10.0, 10.0, 0, 100);
        let inner = stbox(2.0, 2.0, 3.0, 3.0, 10, 20);
        assert!(outer.contains(&inner));
        assert!(inner.contained(&outer));
        assert!(outer.overlaps(&inner));
        assert!(outer.same(&outer));

        let touching = stbox(10.0, 0.0, 12.0, 10.0, 0, 100);
        assert!(outer.overlaps(&touching));
        assert!(outer.adjacent(&touching));
        assert!(!outer.adjacent(&inner));

        let far = stbox(20.0, 20.0, 30.0, 30.0, 0, 100);
        assert!(!outer.overlaps(&far));
        assert!(!outer.adjacent(&far));
    }
}
