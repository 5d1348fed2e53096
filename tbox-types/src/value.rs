use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Comparison capability for the base values a [`Span`](crate::span::Span) ranges over.
///
/// Box construction never assumes a numeric representation: running minimum
/// and maximum tracking only goes through `compare` and `equals`, so the same
/// code serves timestamps, integers, floats and mixed numbers.
pub trait SpanValue: Copy + fmt::Debug {
    /// Total order over the domain.
    fn compare(&self, other: &Self) -> Ordering;

    fn equals(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

/// A point in time with microsecond resolution, counted from the Unix epoch.
///
/// # Examples
///
/// ```
/// use tbox_types::value::Timestamp;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let t = Timestamp::from_system_time(UNIX_EPOCH + Duration::from_secs(2));
/// assert_eq!(t, Timestamp::from_secs(2));
/// assert_eq!(t.micros(), 2_000_000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Saturates at the `i64` microsecond range.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000))
    }

    pub const fn micros(self) -> i64 {
        self.0
    }

    /// Convert a `SystemTime`, saturating at the `i64` microsecond range.
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self(i64::try_from(after.as_micros()).unwrap_or(i64::MAX)),
            Err(before) => Self(
                i64::try_from(before.duration().as_micros())
                    .map(|m| -m)
                    .unwrap_or(i64::MIN),
            ),
        }
    }

    pub fn to_system_time(self) -> SystemTime {
        if self.0 >= 0 {
            UNIX_EPOCH + Duration::from_micros(self.0 as u64)
        } else {
            UNIX_EPOCH - Duration::from_micros(self.0.unsigned_abs())
        }
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

impl SpanValue for Timestamp {
    fn compare(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl SpanValue for i64 {
    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

// Numeric order, so `-0.0` and `0.0` are equal; NaN falls back to the total order.
fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

impl SpanValue for f64 {
    fn compare(&self, other: &Self) -> Ordering {
        compare_f64(*self, *other)
    }
}

/// Base value of a temporal number.
///
/// Integers compare exactly with each other; any comparison involving a
/// float is done in `f64`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }
}

impl SpanValue for Number {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(b),
            _ => compare_f64(self.as_f64(), other.as_f64()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        // `-0.0 + 0.0` is `0.0`
        Number::Float(value + 0.0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_system_time_roundtrip() {
        let before_epoch = Timestamp::from_micros(-1_500_000);
        assert_eq!(
            Timestamp::from_system_time(before_epoch.to_system_time()),
            before_epoch
        );

        let after_epoch = Timestamp::from_secs(1_640_995_200);
        assert_eq!(Timestamp::from(after_epoch.to_system_time()), after_epoch);
    }

    #[test]
    fn test_number_mixed_comparison() {
        assert_eq!(Number::Int(3).compare(&Number::Float(3.5)), Ordering::Less);
        assert_eq!(Number::Float(4.0).compare(&Number::Int(4)), Ordering::Equal);
        assert_eq!(Number::Int(i64::MAX).compare(&Number::Int(i64::MAX - 1)), Ordering::Greater);
        assert_eq!(Number::from(2), Number::Float(2.0));
    }

    #[test]
    fn test_float_total_order() {
        assert_eq!(1.0_f64.compare(&f64::NAN), Ordering::Less);
        assert!(2.5_f64.equals(&2.5));
    }

    #[test]
    fn test_signed_zeros_are_equal() {
        assert!((-0.0_f64).equals(&0.0));
        assert!(Number::Float(-0.0).equals(&Number::Int(0)));
        assert_eq!(Number::Float(-0.0).compare(&Number::Float(0.0)), Ordering::Equal);

        let Number::Float(zero) = Number::from(-0.0) else {
            panic!("expected a float");
        };
        assert!(zero.is_sign_positive());
    }

    #[test]
    fn test_from_secs_saturates() {
        assert_eq!(Timestamp::from_secs(i64::MAX / 1000).micros(), i64::MAX);
        assert_eq!(Timestamp::from_secs(i64::MIN / 1000).micros(), i64::MIN);
        assert_eq!(Timestamp::from_secs(-3).micros(), -3_000_000);
    }
}
