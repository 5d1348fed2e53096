//! Builders for appending to temporal values under construction.
//!
//! A builder owns the box it grows, so each append is an O(1) `expand`
//! instead of a rebuild. `finish` hands out an immutable value.

use crate::compute::bbox::{box_from_instant, expand_with_instant, expand_with_sequence};
use crate::compute::validation::{validate_interpolation, validate_sequences};
use crate::config::{BoundingBox, Config, Span, ValidationMode};
use crate::error::{Result, TBoxError};
use crate::temporal::{
    Instant, Interpolation, Sequence, SequenceSet, TemporalType, sequence_set_period,
};

/// Builder for a [`Sequence`], appending instants in time order.
///
/// # Examples
///
/// ```
/// use tbox::builder::SequenceBuilder;
/// use tbox::{Instant, Interpolation, TemporalType, Timestamp, Value};
///
/// let mut builder = SequenceBuilder::new(TemporalType::TInt, Interpolation::Step);
/// for (i, v) in [3, 9, 4].into_iter().enumerate() {
///     let t = Timestamp::from_secs(i as i64);
///     builder.push(Instant::new(TemporalType::TInt, Value::Int(v), t)?)?;
/// }
/// let seq = builder.finish()?;
///
/// assert_eq!(seq.len(), 3);
/// assert_eq!(seq.bbox().as_tbox().unwrap().span().unwrap().upper().as_f64(), 9.0);
/// # Ok::<(), tbox::TBoxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SequenceBuilder {
    ttype: TemporalType,
    interp: Interpolation,
    validation: ValidationMode,
    instants: Vec<Instant>,
    bbox: Option<BoundingBox>,
}

impl SequenceBuilder {
    pub fn new(ttype: TemporalType, interp: Interpolation) -> Self {
        Self {
            ttype,
            interp,
            validation: ValidationMode::Strict,
            instants: Vec::new(),
            bbox: None,
        }
    }

    /// A builder checking appends as `config.validation` says.
    pub fn from_config(ttype: TemporalType, interp: Interpolation, config: &Config) -> Self {
        Self::new(ttype, interp).with_validation(config.validation)
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.instants.reserve(capacity);
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    /// The box of the instants appended so far.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    /// Append an instant after the last one.
    pub fn push(&mut self, inst: Instant) -> Result<()> {
        if self.validation == ValidationMode::Strict {
            self.check_next(&inst)?;
        }
        match self.bbox.as_mut() {
            Some(bbox) => expand_with_instant(bbox, &inst)?,
            None => self.bbox = Some(box_from_instant(&inst)),
        }
        self.instants.push(inst);
        Ok(())
    }

    fn check_next(&self, inst: &Instant) -> Result<()> {
        if inst.temporal_type() != self.ttype {
            return Err(TBoxError::invalid_input(format!(
                "Cannot append a {} instant to a {} sequence",
                inst.temporal_type(),
                self.ttype
            )));
        }
        let Some(last) = self.instants.last() else {
            return validate_interpolation(self.ttype, self.interp);
        };
        if inst.timestamp() <= last.timestamp() {
            return Err(TBoxError::InvalidTimestamp(format!(
                "Instant at {} does not follow {}",
                inst.timestamp(),
                last.timestamp()
            )));
        }
        if let (Some(prev), Some(next)) = (last.value().as_point(), inst.value().as_point())
            && (prev.srid() != next.srid() || prev.has_z() != next.has_z())
        {
            return Err(TBoxError::invalid_input(format!(
                "Point at {} does not match the SRID or dimensionality of the sequence",
                inst.timestamp()
            )));
        }
        Ok(())
    }

    /// Finish as a sequence closed on both ends.
    pub fn finish(self) -> Result<Sequence> {
        let (Some(first), Some(last), Some(bbox)) =
            (self.instants.first(), self.instants.last(), self.bbox)
        else {
            return Err(TBoxError::invalid_input(
                "A sequence must have at least one instant",
            ));
        };
        let period = Span::new(first.timestamp(), last.timestamp(), true, true).ok_or_else(|| {
            TBoxError::InvalidTimestamp(format!(
                "Sequence ends at {} before it starts at {}",
                last.timestamp(),
                first.timestamp()
            ))
        })?;
        Ok(Sequence::from_parts(
            self.ttype,
            self.interp,
            self.instants,
            period,
            bbox,
        ))
    }

    /// Finish with the given period bounds.
    ///
    /// Open bounds change which values are attained, so the box is rebuilt
    /// from the instants unless both bounds are closed.
    pub fn finish_with_bounds(self, lower_inc: bool, upper_inc: bool) -> Result<Sequence> {
        if lower_inc && upper_inc {
            return self.finish();
        }
        Sequence::with_validation(
            self.instants,
            lower_inc,
            upper_inc,
            self.interp,
            self.validation,
        )
    }
}

/// Builder for a [`SequenceSet`], appending sequences in time order.
#[derive(Debug, Clone, Default)]
pub struct SequenceSetBuilder {
    validation: ValidationMode,
    sequences: Vec<Sequence>,
    bbox: Option<BoundingBox>,
}

impl SequenceSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new().with_validation(config.validation)
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    /// Append a sequence after the last one.
    pub fn push(&mut self, seq: Sequence) -> Result<()> {
        self.sequences.push(seq);
        if self.validation == ValidationMode::Strict {
            let tail = self.sequences.len().saturating_sub(2);
            if let Err(e) = validate_sequences(&self.sequences[tail..]) {
                self.sequences.pop();
                return Err(e);
            }
        }
        let Some(seq) = self.sequences.last() else {
            return Err(TBoxError::internal_type("empty builder", "expand_with_sequence"));
        };
        match self.bbox.as_mut() {
            Some(bbox) => {
                if let Err(e) = expand_with_sequence(bbox, seq) {
                    self.sequences.pop();
                    return Err(e);
                }
            }
            None => self.bbox = Some(*seq.bbox()),
        }
        Ok(())
    }

    pub fn finish(self) -> Result<SequenceSet> {
        let (Some(first), Some(last), Some(bbox)) =
            (self.sequences.first(), self.sequences.last(), self.bbox)
        else {
            return Err(TBoxError::invalid_input(
                "A sequence set must have at least one sequence",
            ));
        };
        let period = sequence_set_period(first, last)?;
        let (ttype, interp) = (first.temporal_type(), first.interpolation());
        Ok(SequenceSet::from_parts(
            ttype,
            interp,
            self.sequences,
            period,
            bbox,
        ))
    }
}
