//! Validation for temporal values before their boxes are computed.

use crate::config::GeoPoint;
use crate::error::{Result, TBoxError};
use crate::temporal::{Instant, Interpolation, Sequence, TemporalType, Value};

/// Validates a geodetic point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use tbox::compute::validation::validate_geographic_point;
/// use tbox::GeoPoint;
///
/// let nyc = GeoPoint::new(-74.0060, 40.7128);
/// assert!(validate_geographic_point(&nyc).is_ok());
///
/// // Invalid longitude
/// assert!(validate_geographic_point(&GeoPoint::new(200.0, 40.0)).is_err());
///
/// // Invalid latitude
/// assert!(validate_geographic_point(&GeoPoint::new(-74.0, 95.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &GeoPoint) -> Result<()> {
    validate_finite_point(point)?;
    let (x, y) = (point.x(), point.y());

    if !(-180.0..=180.0).contains(&x) {
        return Err(TBoxError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(TBoxError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

fn validate_finite_point(point: &GeoPoint) -> Result<()> {
    if !point.is_finite() {
        return Err(TBoxError::InvalidInput(format!(
            "Point coordinates must be finite, got: ({}, {}, {:?})",
            point.x(),
            point.y(),
            point.z()
        )));
    }
    Ok(())
}

/// Validates that `value` belongs to the base type of `ttype`.
///
/// # Examples
///
/// ```
/// use tbox::compute::validation::validate_value;
/// use tbox::{TemporalType, Value};
///
/// assert!(validate_value(TemporalType::TFloat, &Value::Float(2.5)).is_ok());
/// assert!(validate_value(TemporalType::TFloat, &Value::Float(f64::NAN)).is_err());
/// assert!(validate_value(TemporalType::TInt, &Value::Bool(true)).is_err());
/// ```
pub fn validate_value(ttype: TemporalType, value: &Value) -> Result<()> {
    if !ttype.accepts(value) {
        return Err(TBoxError::invalid_input(format!(
            "Value of type {} does not belong to {}",
            value.type_name(),
            ttype
        )));
    }
    match value {
        Value::Float(v) if !v.is_finite() => Err(TBoxError::InvalidInput(format!(
            "Float value must be finite, got: {}",
            v
        ))),
        Value::Point(p) if ttype.is_geodetic() => validate_geographic_point(p),
        Value::Point(p) => validate_finite_point(p),
        _ => Ok(()),
    }
}

/// Validates that `ttype` can be interpolated with `interp`.
///
/// Only continuous base types support linear interpolation.
pub fn validate_interpolation(ttype: TemporalType, interp: Interpolation) -> Result<()> {
    if interp == Interpolation::Linear && !ttype.supports_linear() {
        return Err(TBoxError::invalid_input(format!(
            "Linear interpolation is not supported for {}",
            ttype
        )));
    }
    Ok(())
}

/// Validates the instants of a sequence.
///
/// Instants must share `ttype`, carry strictly increasing timestamps, and for
/// points share one SRID and dimensionality. Discrete and single-instant
/// sequences must be closed on both ends.
///
/// # Examples
///
/// ```
/// use tbox::compute::validation::validate_instants;
/// use tbox::{Instant, Interpolation, TemporalType, Timestamp, Value};
///
/// let a = Instant::new(TemporalType::TInt, Value::Int(1), Timestamp::from_secs(1))?;
/// let b = Instant::new(TemporalType::TInt, Value::Int(2), Timestamp::from_secs(0))?;
///
/// let result = validate_instants(TemporalType::TInt, &[a, b], true, true, Interpolation::Step);
/// assert!(result.is_err());
/// # Ok::<(), tbox::TBoxError>(())
/// ```
pub fn validate_instants(
    ttype: TemporalType,
    instants: &[Instant],
    lower_inc: bool,
    upper_inc: bool,
    interp: Interpolation,
) -> Result<()> {
    let Some(first) = instants.first() else {
        return Err(TBoxError::invalid_input(
            "A sequence must have at least one instant",
        ));
    };
    validate_interpolation(ttype, interp)?;

    if (instants.len() == 1 || interp == Interpolation::Discrete) && !(lower_inc && upper_inc) {
        return Err(TBoxError::invalid_input(
            "Discrete and single-instant sequences must include both bounds",
        ));
    }

    for (idx, inst) in instants.iter().enumerate() {
        if inst.temporal_type() != ttype {
            return Err(TBoxError::invalid_input(format!(
                "Instant at index {}: expected {}, got {}",
                idx,
                ttype,
                inst.temporal_type()
            )));
        }
        validate_value(ttype, inst.value())
            .map_err(|e| TBoxError::InvalidInput(format!("Instant at index {}: {}", idx, e)))?;
    }

    for (idx, pair) in instants.windows(2).enumerate() {
        if pair[0].timestamp() >= pair[1].timestamp() {
            return Err(TBoxError::InvalidTimestamp(format!(
                "Instant at index {} ({}) does not follow {}",
                idx + 1,
                pair[1].timestamp(),
                pair[0].timestamp()
            )));
        }
    }

    if let Some(reference) = first.value().as_point() {
        for (idx, inst) in instants.iter().enumerate().skip(1) {
            if let Some(point) = inst.value().as_point() {
                validate_same_space(reference, point).map_err(|e| {
                    TBoxError::InvalidInput(format!("Instant at index {}: {}", idx, e))
                })?;
            }
        }
    }

    Ok(())
}

fn validate_same_space(reference: &GeoPoint, point: &GeoPoint) -> Result<()> {
    if reference.srid() != point.srid() {
        return Err(TBoxError::InvalidInput(format!(
            "Mixed SRIDs {} and {}",
            reference.srid(),
            point.srid()
        )));
    }
    if reference.has_z() != point.has_z() {
        return Err(TBoxError::InvalidInput(
            "Mixed 2D and 3D points".to_string(),
        ));
    }
    Ok(())
}

/// Validates the sequences of a sequence set.
///
/// Sequences must share their temporal type and a continuous interpolation,
/// and be ordered in time without overlapping. Two sequences may touch at an
/// instant only when at most one of them includes it.
pub fn validate_sequences(sequences: &[Sequence]) -> Result<()> {
    let Some(first) = sequences.first() else {
        return Err(TBoxError::invalid_input(
            "A sequence set must have at least one sequence",
        ));
    };
    if !first.interpolation().is_continuous() {
        return Err(TBoxError::invalid_input(
            "A sequence set cannot hold discrete sequences",
        ));
    }

    for (idx, seq) in sequences.iter().enumerate().skip(1) {
        if seq.temporal_type() != first.temporal_type() {
            return Err(TBoxError::invalid_input(format!(
                "Sequence at index {}: expected {}, got {}",
                idx,
                first.temporal_type(),
                seq.temporal_type()
            )));
        }
        if seq.interpolation() != first.interpolation() {
            return Err(TBoxError::invalid_input(format!(
                "Sequence at index {}: mixed interpolations",
                idx
            )));
        }
        if let (Some(reference), Some(point)) = (
            first.instants()[0].value().as_point(),
            seq.instants()[0].value().as_point(),
        ) {
            validate_same_space(reference, point)
                .map_err(|e| TBoxError::InvalidInput(format!("Sequence at index {}: {}", idx, e)))?;
        }
    }

    for (idx, pair) in sequences.windows(2).enumerate() {
        let (prev, next) = (pair[0].period(), pair[1].period());
        let ordered = prev.upper() < next.lower()
            || (prev.upper() == next.lower() && !(prev.upper_inc() && next.lower_inc()));
        if !ordered {
            return Err(TBoxError::InvalidTimestamp(format!(
                "Sequence at index {} starting at {} overlaps the previous one ending at {}",
                idx + 1,
                next.lower(),
                prev.upper()
            )));
        }
    }

    Ok(())
}
