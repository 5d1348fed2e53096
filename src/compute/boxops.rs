//! Box operators between temporal values, spans and boxes.
//!
//! Each entry point derives the box of every operand, reusing cached boxes,
//! and applies a [`BoxOp`]. With `invert` set the operands are swapped, which
//! serves the commuted operator forms (`span <@ temporal` and the like).

use crate::config::{BoxOp, BoxPredicates, Number, STBox, Span, TBox, Timestamp};
use crate::error::{Result, TBoxError};
use crate::temporal::{DomainKind, Temporal};

fn apply<B: BoxPredicates>(op: BoxOp, left: &B, right: &B, invert: bool) -> bool {
    if invert {
        op.apply(right, left)
    } else {
        op.apply(left, right)
    }
}

fn require_domain(temp: &Temporal, domain: DomainKind, operation: &'static str) -> Result<()> {
    if temp.domain() != domain {
        return Err(TBoxError::invalid_input(format!(
            "Operator {} expects a {:?} temporal value, got {}",
            operation,
            domain,
            temp.temporal_type()
        )));
    }
    Ok(())
}

fn require_same_space(a: &STBox, b: &STBox) -> Result<()> {
    if a.srid() != b.srid() {
        return Err(TBoxError::invalid_input(format!(
            "Operation on mixed SRID: {} and {}",
            a.srid(),
            b.srid()
        )));
    }
    if a.is_geodetic() != b.is_geodetic() {
        return Err(TBoxError::invalid_input(
            "Operation on mixed planar and geodetic coordinates",
        ));
    }
    Ok(())
}

/// Apply `op` between the time span of `temp` and `period`.
///
/// # Examples
///
/// ```
/// use tbox::compute::boxops::boxop_temporal_period;
/// use tbox::{BoxOp, Instant, Span, Temporal, TemporalType, Timestamp, Value};
///
/// let temp: Temporal =
///     Instant::new(TemporalType::TBool, Value::Bool(true), Timestamp::from_secs(5))?.into();
/// let day = Span::new(Timestamp::from_secs(0), Timestamp::from_secs(86_400), true, false).unwrap();
///
/// assert!(boxop_temporal_period(&temp, &day, BoxOp::Contained, false)?);
/// assert!(boxop_temporal_period(&temp, &day, BoxOp::Contains, true)?);
/// # Ok::<(), tbox::TBoxError>(())
/// ```
pub fn boxop_temporal_period(
    temp: &Temporal,
    period: &Span<Timestamp>,
    op: BoxOp,
    invert: bool,
) -> Result<bool> {
    Ok(apply(op, &temp.period(), period, invert))
}

/// Apply `op` between the time spans of two temporal values.
pub fn boxop_temporal_temporal(
    a: &Temporal,
    b: &Temporal,
    op: BoxOp,
    invert: bool,
) -> Result<bool> {
    Ok(apply(op, &a.period(), &b.period(), invert))
}

/// Apply `op` between the value span of a temporal number and `span`.
pub fn boxop_tnumber_numspan(
    temp: &Temporal,
    span: &Span<Number>,
    op: BoxOp,
    invert: bool,
) -> Result<bool> {
    require_domain(temp, DomainKind::Number, "boxop_tnumber_numspan")?;
    Ok(apply(op, &temp.value_span()?, span, invert))
}

/// Apply `op` between the box of a temporal number and `tbox`, over the
/// dimensions both boxes have.
pub fn boxop_tnumber_tbox(temp: &Temporal, tbox: &TBox, op: BoxOp, invert: bool) -> Result<bool> {
    require_domain(temp, DomainKind::Number, "boxop_tnumber_tbox")?;
    Ok(apply(op, &temp.tbox()?, tbox, invert))
}

/// Apply `op` between the boxes of two temporal numbers.
pub fn boxop_tnumber_tnumber(a: &Temporal, b: &Temporal, op: BoxOp, invert: bool) -> Result<bool> {
    require_domain(a, DomainKind::Number, "boxop_tnumber_tnumber")?;
    require_domain(b, DomainKind::Number, "boxop_tnumber_tnumber")?;
    Ok(apply(op, &a.tbox()?, &b.tbox()?, invert))
}

/// Apply `op` between the box of a temporal point and `stbox`.
///
/// Both must share an SRID and the geodetic flag.
pub fn boxop_tspatial_stbox(
    temp: &Temporal,
    stbox: &STBox,
    op: BoxOp,
    invert: bool,
) -> Result<bool> {
    require_domain(temp, DomainKind::Spatial, "boxop_tspatial_stbox")?;
    let bbox = temp.stbox()?;
    require_same_space(&bbox, stbox)?;
    Ok(apply(op, &bbox, stbox, invert))
}

/// Apply `op` between the boxes of two temporal points.
pub fn boxop_tspatial_tspatial(
    a: &Temporal,
    b: &Temporal,
    op: BoxOp,
    invert: bool,
) -> Result<bool> {
    require_domain(a, DomainKind::Spatial, "boxop_tspatial_tspatial")?;
    require_domain(b, DomainKind::Spatial, "boxop_tspatial_tspatial")?;
    let (left, right) = (a.stbox()?, b.stbox()?);
    require_same_space(&left, &right)?;
    Ok(apply(op, &left, &right, invert))
}
