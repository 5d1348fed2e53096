//! Multi-entry decomposition of a temporal value into several boxes.
//!
//! A sequence decomposes into contiguous runs of units (segments for
//! continuous interpolation, instants for discrete), a sequence set into runs
//! of units or of whole sequences. The union of the returned boxes is always
//! the value's full box, and their number never exceeds the cap.

use crate::compute::bbox::{box_from_instant, box_from_instants, expand};
use crate::config::BoundingBox;
use crate::error::{Result, TBoxError};
use crate::temporal::{Interpolation, Sequence, SequenceSet, Temporal};
use log::debug;
use std::ops::Range;

/// Decompose `temp` into at most `max_count` boxes, in time order.
///
/// A `max_count` of 0 means one box per unit.
///
/// # Examples
///
/// ```
/// use tbox::compute::decompose::decompose;
/// use tbox::{Instant, Interpolation, Sequence, Temporal, TemporalType, Timestamp, Value};
///
/// let instants = (0..11)
///     .map(|i| Instant::new(TemporalType::TFloat, Value::Float(i as f64), Timestamp::from_secs(i)))
///     .collect::<Result<Vec<_>, _>>()?;
/// let temp: Temporal = Sequence::new(instants, true, true, Interpolation::Linear)?.into();
///
/// assert_eq!(decompose(&temp, 3)?.len(), 3);
/// assert_eq!(decompose(&temp, 0)?.len(), 10);
/// # Ok::<(), tbox::TBoxError>(())
/// ```
pub fn decompose(temp: &Temporal, max_count: usize) -> Result<Vec<BoundingBox>> {
    match temp {
        Temporal::Instant(inst) => Ok(vec![box_from_instant(inst)]),
        Temporal::Sequence(seq) => sequence_boxes(seq, max_count),
        Temporal::SequenceSet(ss) => sequence_set_boxes(ss, max_count),
    }
}

/// Split `n` items into `k` contiguous runs whose lengths differ by at most
/// one, longer runs first.
///
/// `k` is clamped to `1..=n`.
///
/// ```
/// use tbox::compute::decompose::balanced_groups;
///
/// let lens: Vec<usize> = balanced_groups(10, 3).map(|r| r.len()).collect();
/// assert_eq!(lens, vec![4, 3, 3]);
/// ```
pub fn balanced_groups(n: usize, k: usize) -> impl Iterator<Item = Range<usize>> {
    let k = k.clamp(1, n.max(1));
    let (size, remainder) = (n / k, n % k);
    (0..k).scan(0, move |start, i| {
        let len = size + usize::from(i < remainder);
        let range = *start..*start + len;
        *start += len;
        Some(range)
    })
}

/// Boxes of a sequence, one per run of units.
pub fn sequence_boxes(seq: &Sequence, max_count: usize) -> Result<Vec<BoundingBox>> {
    let units = seq.unit_count();
    if seq.len() == 1 {
        return Ok(vec![*seq.bbox()]);
    }
    if max_count == 0 || units <= max_count {
        let mut boxes = Vec::with_capacity(units);
        for unit in 0..units {
            boxes.push(run_box(seq, unit..unit + 1)?);
        }
        return Ok(boxes);
    }

    debug!(
        "Merging {} units of a {} sequence into {} boxes",
        units,
        seq.temporal_type(),
        max_count
    );
    let mut boxes = Vec::with_capacity(max_count);
    for run in balanced_groups(units, max_count) {
        boxes.push(run_box(seq, run)?);
    }
    Ok(boxes)
}

/// Box of the units in `run`.
///
/// Only the ends of the sequence carry its period bounds; every other end of
/// a run is an instant the sequence passes through, so it is closed. This is
/// the same box as folding the units of the run one by one.
fn run_box(seq: &Sequence, run: Range<usize>) -> Result<BoundingBox> {
    let instants = seq.instants();
    let interp = seq.interpolation();
    if interp == Interpolation::Discrete {
        let slice = instants
            .get(run.clone())
            .ok_or_else(|| out_of_range(&run, instants.len()))?;
        return box_from_instants(seq.temporal_type(), slice, true, true, interp);
    }
    let last = instants.len().saturating_sub(1);
    let slice = instants
        .get(run.start..=run.end)
        .ok_or_else(|| out_of_range(&run, instants.len()))?;
    let lower_inc = run.start > 0 || seq.lower_inc();
    let upper_inc = run.end < last || seq.upper_inc();
    box_from_instants(seq.temporal_type(), slice, lower_inc, upper_inc, interp)
}

fn out_of_range(run: &Range<usize>, len: usize) -> TBoxError {
    TBoxError::internal_type(
        format!("unit run {:?} of a {}-instant sequence", run, len),
        "decompose",
    )
}

/// Boxes of a sequence set.
///
/// When every unit fits under the cap, each unit gets its own box. When the
/// sequences fit, the cap is shared out in proportion to their unit counts.
/// Otherwise runs of whole sequences are merged.
pub fn sequence_set_boxes(ss: &SequenceSet, max_count: usize) -> Result<Vec<BoundingBox>> {
    let total = ss.unit_count();
    let sequences = ss.sequences();

    if max_count == 0 || total <= max_count {
        let mut boxes = Vec::with_capacity(total);
        for seq in sequences {
            boxes.extend(sequence_boxes(seq, 0)?);
        }
        return Ok(boxes);
    }

    if sequences.len() <= max_count {
        let units: Vec<usize> = sequences.iter().map(Sequence::unit_count).collect();
        let caps = proportional_caps(&units, max_count);
        debug!(
            "Sharing {} boxes over {} sequences holding {} units: {:?}",
            max_count,
            sequences.len(),
            total,
            caps
        );
        let count = caps.iter().zip(&units).map(|(cap, u)| (*cap).min(*u)).sum();
        let mut boxes = Vec::with_capacity(count);
        for (seq, cap) in sequences.iter().zip(caps) {
            boxes.extend(sequence_boxes(seq, cap)?);
        }
        return Ok(boxes);
    }

    debug!(
        "Merging {} sequences into {} boxes",
        sequences.len(),
        max_count
    );
    let mut boxes = Vec::with_capacity(max_count);
    for run in balanced_groups(sequences.len(), max_count) {
        let group = &sequences[run];
        let Some((first, rest)) = group.split_first() else {
            continue;
        };
        let mut bbox = *first.bbox();
        for seq in rest {
            expand(seq.bbox(), &mut bbox)?;
        }
        boxes.push(bbox);
    }
    Ok(boxes)
}

/// Share `max_count` boxes over runs holding `units` units each.
///
/// Every run gets at least one box and `floor(max_count * u / total)`
/// otherwise. The largest shares give one back until the sum fits the cap,
/// which always happens when there are at most `max_count` runs.
fn proportional_caps(units: &[usize], max_count: usize) -> Vec<usize> {
    let total: u128 = units.iter().map(|u| *u as u128).sum::<u128>().max(1);
    let mut caps: Vec<usize> = units
        .iter()
        .map(|u| {
            let share = (max_count as u128 * *u as u128) / total;
            usize::try_from(share).unwrap_or(max_count).max(1)
        })
        .collect();

    let mut sum: usize = caps.iter().sum();
    while sum > max_count {
        let largest = caps
            .iter()
            .enumerate()
            .filter(|(_, cap)| **cap > 1)
            .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
            .map(|(i, _)| i);
        let Some(i) = largest else {
            break;
        };
        caps[i] -= 1;
        sum -= 1;
    }
    caps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::bbox::box_from_sequences;
    use crate::config::{Number, Span, Timestamp};
    use crate::temporal::{Instant, TemporalType, Value};

    fn tfloat_seq(values: &[f64], start: i64, lower_inc: bool, upper_inc: bool) -> Sequence {
        let instants = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Instant::new(
                    TemporalType::TFloat,
                    Value::Float(*v),
                    Timestamp::from_secs(start + i as i64),
                )
                .unwrap()
            })
            .collect();
        Sequence::new(instants, lower_inc, upper_inc, Interpolation::Linear).unwrap()
    }

    fn union(boxes: &[BoundingBox]) -> BoundingBox {
        let mut acc = boxes[0];
        for b in &boxes[1..] {
            expand(b, &mut acc).unwrap();
        }
        acc
    }

    #[test]
    fn test_balanced_groups() {
        let lens: Vec<usize> = balanced_groups(10, 3).map(|r| r.len()).collect();
        assert_eq!(lens, vec![4, 3, 3]);

        let ranges: Vec<Range<usize>> = balanced_groups(7, 7).collect();
        assert_eq!(ranges.len(), 7);
        assert_eq!(ranges[6], 6..7);

        let lens: Vec<usize> = balanced_groups(5, 2).map(|r| r.len()).collect();
        assert_eq!(lens, vec![3, 2]);
    }

    #[test]
    fn test_ten_segments_capped_at_three() {
        let values: Vec<f64> = (0..11).map(|i| (i * 7 % 5) as f64).collect();
        let seq = tfloat_seq(&values, 0, true, false);
        let boxes = sequence_boxes(&seq, 3).unwrap();
        assert_eq!(boxes.len(), 3);

        let periods: Vec<_> = boxes.iter().map(|b| *b.period().unwrap()).collect();
        assert_eq!(periods[0].upper(), Timestamp::from_secs(4));
        assert_eq!(periods[1].upper(), Timestamp::from_secs(7));
        assert_eq!(periods[2].upper(), Timestamp::from_secs(10));
        assert!(!periods[2].upper_inc());
        assert_eq!(union(&boxes), *seq.bbox());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let seq = tfloat_seq(&[1.0, 4.0, 2.0], 0, true, true);
        let full = *seq.bbox();
        let tbox = full.as_tbox().unwrap();
        assert_eq!(
            tbox.span(),
            Some(&Span::new(Number::Float(1.0), Number::Float(4.0), true, true).unwrap())
        );

        let temp = Temporal::Sequence(seq);
        assert_eq!(decompose(&temp, 1).unwrap(), vec![full]);

        let two = decompose(&temp, 2).unwrap();
        assert_eq!(two.len(), 2);
        assert_eq!(two[0].period().unwrap().upper(), Timestamp::from_secs(1));
        assert_eq!(two[1].period().unwrap().lower(), Timestamp::from_secs(1));
        assert_eq!(union(&two), full);
    }

    #[test]
    fn test_run_box_equals_fold_of_units() {
        let seq = tfloat_seq(&[3.0, 3.0, 8.0, 1.0, 3.0], 0, false, false);
        let folded = union(&sequence_boxes(&seq, 0).unwrap()[1..3]);
        assert_eq!(run_box(&seq, 1..3).unwrap(), folded);

        let folded = union(&sequence_boxes(&seq, 0).unwrap()[..2]);
        assert_eq!(run_box(&seq, 0..2).unwrap(), folded);
    }

    #[test]
    fn test_discrete_units_are_instants() {
        let instants: Vec<Instant> = (0..4)
            .map(|i| {
                Instant::new(TemporalType::TInt, Value::Int(i), Timestamp::from_secs(i)).unwrap()
            })
            .collect();
        let seq = Sequence::new(instants, true, true, Interpolation::Discrete).unwrap();
        let boxes = sequence_boxes(&seq, 0).unwrap();
        assert_eq!(boxes.len(), 4);
        assert!(boxes[0].period().unwrap().is_point());
        assert_eq!(sequence_boxes(&seq, 3).unwrap().len(), 3);
    }

    #[test]
    fn test_single_instant_sequence() {
        let seq = tfloat_seq(&[2.0], 0, true, true);
        assert_eq!(sequence_boxes(&seq, 5).unwrap(), vec![*seq.bbox()]);
        assert_eq!(sequence_boxes(&seq, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_sequence_set_uncapped_when_units_fit() {
        let ss = SequenceSet::new(vec![
            tfloat_seq(&[1.0, 2.0, 3.0], 0, true, true),
            tfloat_seq(&[0.0, 5.0], 10, true, true),
        ])
        .unwrap();
        let boxes = sequence_set_boxes(&ss, 3).unwrap();
        assert_eq!(boxes.len(), 3);
        assert_eq!(union(&boxes), *ss.bbox());
    }

    #[test]
    fn test_sequence_set_proportional_caps() {
        let long: Vec<f64> = (0..31).map(|i| (i % 4) as f64).collect();
        let ss = SequenceSet::new(vec![
            tfloat_seq(&long, 0, true, true),
            tfloat_seq(&[1.0, 9.0], 100, true, true),
            tfloat_seq(&[4.0, 4.5, 6.0], 200, true, false),
        ])
        .unwrap();
        assert_eq!(ss.unit_count(), 33);

        let boxes = sequence_set_boxes(&ss, 4).unwrap();
        assert!(boxes.len() <= 4);
        assert_eq!(union(&boxes), *ss.bbox());
        assert_eq!(union(&boxes), box_from_sequences(ss.sequences()).unwrap());
    }

    #[test]
    fn test_sequence_set_merges_sequences() {
        let sequences: Vec<Sequence> = (0..5)
            .map(|i| tfloat_seq(&[i as f64, 10.0 - i as f64], i * 10, true, true))
            .collect();
        let ss = SequenceSet::new(sequences).unwrap();
        let boxes = sequence_set_boxes(&ss, 2).unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].period().unwrap().upper(), Timestamp::from_secs(21));
        assert_eq!(union(&boxes), *ss.bbox());
    }

    #[test]
    fn test_proportional_caps_never_exceed_cap() {
        assert_eq!(proportional_caps(&[30, 1, 2], 4), vec![2, 1, 1]);
        assert_eq!(proportional_caps(&[1, 1, 1, 100], 4), vec![1, 1, 1, 1]);
        let caps = proportional_caps(&[5, 5, 5], 3);
        assert_eq!(caps.iter().sum::<usize>(), 3);
    }
}
