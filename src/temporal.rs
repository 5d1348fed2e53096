//! Temporal values: instants, sequences and sequence sets.
//!
//! Sequences and sequence sets cache their bounding box, computed once at
//! construction. They are immutable afterwards; incremental construction goes
//! through [`SequenceBuilder`](crate::builder::SequenceBuilder) and
//! [`SequenceSetBuilder`](crate::builder::SequenceSetBuilder).

use crate::compute::bbox::{box_from_instant, box_from_instants, box_from_sequences};
use crate::compute::validation::{validate_instants, validate_sequences, validate_value};
use crate::config::{
    BoundingBox, BoxKind, GeoPoint, Number, STBox, Span, TBox, Timestamp, ValidationMode,
};
use crate::error::{Result, TBoxError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The family of base values a temporal type ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    /// Booleans and texts: only the time dimension is boxed.
    Alpha,
    Number,
    Spatial,
}

impl DomainKind {
    pub fn box_kind(self) -> BoxKind {
        match self {
            DomainKind::Alpha => BoxKind::Period,
            DomainKind::Number => BoxKind::TBox,
            DomainKind::Spatial => BoxKind::STBox,
        }
    }
}

/// Temporal types known to the box dispatch.
///
/// Host catalogs hand out raw `u8` tags; converting one with `TryFrom` is the
/// only place an unrecognized type can show up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TemporalType {
    TBool = 1,
    TText = 2,
    TInt = 3,
    TFloat = 4,
    TGeomPoint = 5,
    TGeogPoint = 6,
}

impl TemporalType {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn domain(self) -> DomainKind {
        match self {
            TemporalType::TBool | TemporalType::TText => DomainKind::Alpha,
            TemporalType::TInt | TemporalType::TFloat => DomainKind::Number,
            TemporalType::TGeomPoint | TemporalType::TGeogPoint => DomainKind::Spatial,
        }
    }

    pub fn is_geodetic(self) -> bool {
        self == TemporalType::TGeogPoint
    }

    /// Whether values of this type can vary continuously between instants.
    pub fn supports_linear(self) -> bool {
        matches!(
            self,
            TemporalType::TFloat | TemporalType::TGeomPoint | TemporalType::TGeogPoint
        )
    }

    /// Whether `value` belongs to the base type of this temporal type.
    pub fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (TemporalType::TBool, Value::Bool(_))
                | (TemporalType::TText, Value::Text(_))
                | (TemporalType::TInt, Value::Int(_))
                | (TemporalType::TFloat, Value::Float(_))
                | (TemporalType::TGeomPoint, Value::Point(_))
                | (TemporalType::TGeogPoint, Value::Point(_))
        )
    }
}

impl TryFrom<u8> for TemporalType {
    type Error = TBoxError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(TemporalType::TBool),
            2 => Ok(TemporalType::TText),
            3 => Ok(TemporalType::TInt),
            4 => Ok(TemporalType::TFloat),
            5 => Ok(TemporalType::TGeomPoint),
            6 => Ok(TemporalType::TGeogPoint),
            other => Err(TBoxError::internal_type(
                format!("temporal type tag {}", other),
                "temporal_type",
            )),
        }
    }
}

impl fmt::Display for TemporalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemporalType::TBool => "tbool",
            TemporalType::TText => "ttext",
            TemporalType::TInt => "tint",
            TemporalType::TFloat => "tfloat",
            TemporalType::TGeomPoint => "tgeompoint",
            TemporalType::TGeogPoint => "tgeogpoint",
        };
        f.write_str(name)
    }
}

/// How values evolve between consecutive instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Only the instant values are defined.
    Discrete,
    /// A value holds until the next instant.
    Step,
    /// Values vary linearly between instants.
    #[default]
    Linear,
}

impl Interpolation {
    pub fn is_continuous(self) -> bool {
        self != Interpolation::Discrete
    }
}

/// Base value of an instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Text(String),
    Int(i64),
    Float(f64),
    Point(GeoPoint),
}

impl Value {
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(v) => Some(Number::Int(*v)),
            Value::Float(v) => Some(Number::from(*v)),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<&GeoPoint> {
        match self {
            Value::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Point(_) => "point",
        }
    }
}

/// A single observation of a temporal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstantParts")]
pub struct Instant {
    #[serde(rename = "temporal_type")]
    ttype: TemporalType,
    value: Value,
    t: Timestamp,
}

#[derive(Deserialize)]
struct InstantParts {
    temporal_type: TemporalType,
    value: Value,
    t: Timestamp,
}

impl TryFrom<InstantParts> for Instant {
    type Error = TBoxError;

    fn try_from(parts: InstantParts) -> Result<Self> {
        Instant::new(parts.temporal_type, parts.value, parts.t)
    }
}

impl Instant {
    pub fn new(ttype: TemporalType, value: Value, t: Timestamp) -> Result<Self> {
        validate_value(ttype, &value)?;
        let value = match value {
            Value::Float(v) => Value::Float(v + 0.0),
            other => other,
        };
        Ok(Self { ttype, value, t })
    }

    pub fn temporal_type(&self) -> TemporalType {
        self.ttype
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn timestamp(&self) -> Timestamp {
        self.t
    }

    pub fn bbox(&self) -> BoundingBox {
        box_from_instant(self)
    }
}

/// A time-ordered, non-empty run of instants sharing one interpolation.
///
/// # Examples
///
/// ```
/// use tbox::{Instant, Interpolation, Sequence, TemporalType, Timestamp, Value};
///
/// let instants = vec![
///     Instant::new(TemporalType::TFloat, Value::Float(1.0), Timestamp::from_secs(0))?,
///     Instant::new(TemporalType::TFloat, Value::Float(4.0), Timestamp::from_secs(1))?,
///     Instant::new(TemporalType::TFloat, Value::Float(2.0), Timestamp::from_secs(2))?,
/// ];
/// let seq = Sequence::new(instants, true, true, Interpolation::Linear)?;
///
/// let tbox = seq.bbox().as_tbox().unwrap();
/// assert_eq!(tbox.span().unwrap().upper().as_f64(), 4.0);
/// # Ok::<(), tbox::TBoxError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SequenceParts", into = "SequenceParts")]
pub struct Sequence {
    ttype: TemporalType,
    interp: Interpolation,
    instants: Vec<Instant>,
    period: Span<Timestamp>,
    bbox: BoundingBox,
}

/// Serialized form of a sequence; the box is recomputed when read back.
#[derive(Serialize, Deserialize)]
struct SequenceParts {
    interpolation: Interpolation,
    lower_inc: bool,
    upper_inc: bool,
    instants: Vec<Instant>,
}

impl TryFrom<SequenceParts> for Sequence {
    type Error = TBoxError;

    fn try_from(parts: SequenceParts) -> Result<Self> {
        Sequence::new(
            parts.instants,
            parts.lower_inc,
            parts.upper_inc,
            parts.interpolation,
        )
    }
}

impl From<Sequence> for SequenceParts {
    fn from(seq: Sequence) -> Self {
        SequenceParts {
            interpolation: seq.interp,
            lower_inc: seq.period.lower_inc(),
            upper_inc: seq.period.upper_inc(),
            instants: seq.instants,
        }
    }
}

impl Sequence {
    pub fn new(
        instants: Vec<Instant>,
        lower_inc: bool,
        upper_inc: bool,
        interp: Interpolation,
    ) -> Result<Self> {
        Self::with_validation(instants, lower_inc, upper_inc, interp, ValidationMode::Strict)
    }

    /// Build a sequence, computing its box from scratch.
    pub fn with_validation(
        instants: Vec<Instant>,
        lower_inc: bool,
        upper_inc: bool,
        interp: Interpolation,
        validation: ValidationMode,
    ) -> Result<Self> {
        let Some(first) = instants.first() else {
            return Err(TBoxError::invalid_input(
                "A sequence must have at least one instant",
            ));
        };
        let ttype = first.temporal_type();
        if validation == ValidationMode::Strict {
            validate_instants(ttype, &instants, lower_inc, upper_inc, interp)?;
        }
        let bbox = box_from_instants(ttype, &instants, lower_inc, upper_inc, interp)?;
        let period = *bbox.period().ok_or_else(|| {
            TBoxError::internal_type(bbox.kind().to_string(), "sequence_period")
        })?;
        Ok(Self {
            ttype,
            interp,
            instants,
            period,
            bbox,
        })
    }

    /// Assemble a sequence whose box was maintained incrementally.
    pub(crate) fn from_parts(
        ttype: TemporalType,
        interp: Interpolation,
        instants: Vec<Instant>,
        period: Span<Timestamp>,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            ttype,
            interp,
            instants,
            period,
            bbox,
        }
    }

    pub fn temporal_type(&self) -> TemporalType {
        self.ttype
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interp
    }

    pub fn instants(&self) -> &[Instant] {
        &self.instants
    }

    pub fn len(&self) -> usize {
        self.instants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instants.is_empty()
    }

    pub fn period(&self) -> &Span<Timestamp> {
        &self.period
    }

    pub fn lower_inc(&self) -> bool {
        self.period.lower_inc()
    }

    pub fn upper_inc(&self) -> bool {
        self.period.upper_inc()
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Number of atomic pieces the sequence decomposes into: one per instant
    /// for discrete interpolation, one per segment otherwise.
    pub fn unit_count(&self) -> usize {
        match (self.instants.len(), self.interp) {
            (1, _) => 1,
            (n, Interpolation::Discrete) => n,
            (n, _) => n.saturating_sub(1),
        }
    }
}

/// An ordered collection of non-overlapping sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SequenceSetParts", into = "SequenceSetParts")]
pub struct SequenceSet {
    ttype: TemporalType,
    interp: Interpolation,
    sequences: Vec<Sequence>,
    period: Span<Timestamp>,
    bbox: BoundingBox,
}

#[derive(Serialize, Deserialize)]
struct SequenceSetParts {
    sequences: Vec<Sequence>,
}

impl TryFrom<SequenceSetParts> for SequenceSet {
    type Error = TBoxError;

    fn try_from(parts: SequenceSetParts) -> Result<Self> {
        SequenceSet::new(parts.sequences)
    }
}

impl From<SequenceSet> for SequenceSetParts {
    fn from(ss: SequenceSet) -> Self {
        SequenceSetParts {
            sequences: ss.sequences,
        }
    }
}

impl SequenceSet {
    pub fn new(sequences: Vec<Sequence>) -> Result<Self> {
        Self::with_validation(sequences, ValidationMode::Strict)
    }

    pub fn with_validation(sequences: Vec<Sequence>, validation: ValidationMode) -> Result<Self> {
        let (Some(first), Some(last)) = (sequences.first(), sequences.last()) else {
            return Err(TBoxError::invalid_input(
                "A sequence set must have at least one sequence",
            ));
        };
        if validation == ValidationMode::Strict {
            validate_sequences(&sequences)?;
        }
        let period = sequence_set_period(first, last)?;
        let bbox = box_from_sequences(&sequences)?;
        Ok(Self {
            ttype: first.temporal_type(),
            interp: first.interpolation(),
            sequences,
            period,
            bbox,
        })
    }

    pub(crate) fn from_parts(
        ttype: TemporalType,
        interp: Interpolation,
        sequences: Vec<Sequence>,
        period: Span<Timestamp>,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            ttype,
            interp,
            sequences,
            period,
            bbox,
        }
    }

    pub fn temporal_type(&self) -> TemporalType {
        self.ttype
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interp
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn period(&self) -> &Span<Timestamp> {
        &self.period
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn num_instants(&self) -> usize {
        self.sequences.iter().map(Sequence::len).sum()
    }

    pub fn unit_count(&self) -> usize {
        self.sequences.iter().map(Sequence::unit_count).sum()
    }
}

/// Time span from the start of the first sequence to the end of the last.
pub(crate) fn sequence_set_period(first: &Sequence, last: &Sequence) -> Result<Span<Timestamp>> {
    let (start, end) = (first.period(), last.period());
    Span::new(start.lower(), end.upper(), start.lower_inc(), end.upper_inc()).ok_or_else(|| {
        TBoxError::InvalidTimestamp(format!(
            "Sequence set ends at {} before it starts at {}",
            end.upper(),
            start.lower()
        ))
    })
}

/// Any temporal value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temporal {
    Instant(Instant),
    Sequence(Sequence),
    SequenceSet(SequenceSet),
}

impl Temporal {
    pub fn temporal_type(&self) -> TemporalType {
        match self {
            Temporal::Instant(inst) => inst.temporal_type(),
            Temporal::Sequence(seq) => seq.temporal_type(),
            Temporal::SequenceSet(ss) => ss.temporal_type(),
        }
    }

    pub fn domain(&self) -> DomainKind {
        self.temporal_type().domain()
    }

    /// The bounding box, cached for sequences and sequence sets.
    pub fn bbox(&self) -> BoundingBox {
        match self {
            Temporal::Instant(inst) => inst.bbox(),
            Temporal::Sequence(seq) => *seq.bbox(),
            Temporal::SequenceSet(ss) => *ss.bbox(),
        }
    }

    pub fn period(&self) -> Span<Timestamp> {
        match self {
            Temporal::Instant(inst) => Span::point(inst.timestamp()),
            Temporal::Sequence(seq) => *seq.period(),
            Temporal::SequenceSet(ss) => *ss.period(),
        }
    }

    pub fn num_instants(&self) -> usize {
        match self {
            Temporal::Instant(_) => 1,
            Temporal::Sequence(seq) => seq.len(),
            Temporal::SequenceSet(ss) => ss.num_instants(),
        }
    }

    /// Box of a temporal number.
    pub fn tbox(&self) -> Result<TBox> {
        match self.bbox() {
            BoundingBox::Number(tbox) => Ok(tbox),
            _ => Err(TBoxError::invalid_input(format!(
                "Expected a temporal number, got {}",
                self.temporal_type()
            ))),
        }
    }

    /// Box of a temporal point.
    pub fn stbox(&self) -> Result<STBox> {
        match self.bbox() {
            BoundingBox::Spatial(stbox) => Ok(stbox),
            _ => Err(TBoxError::invalid_input(format!(
                "Expected a temporal point, got {}",
                self.temporal_type()
            ))),
        }
    }

    /// Value span of a temporal number.
    pub fn value_span(&self) -> Result<Span<Number>> {
        let tbox = self.tbox()?;
        tbox.span()
            .copied()
            .ok_or_else(|| TBoxError::internal_type("tbox without value span", "value_span"))
    }
}

impl From<Instant> for Temporal {
    fn from(inst: Instant) -> Self {
        Temporal::Instant(inst)
    }
}

impl From<Sequence> for Temporal {
    fn from(seq: Sequence) -> Self {
        Temporal::Sequence(seq)
    }
}

impl From<SequenceSet> for Temporal {
    fn from(ss: SequenceSet) -> Self {
        Temporal::SequenceSet(ss)
    }
}
