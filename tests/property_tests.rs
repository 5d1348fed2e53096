use proptest::prelude::*;
use tbox::compute::bbox::{box_from_instants, expand};
use tbox::compute::decompose::decompose;
use tbox::{
    BoundingBox, BoxPredicates, Instant, Interpolation, Sequence, SequenceBuilder, SequenceSet,
    Temporal, TemporalType, Timestamp, Value,
};

fn instants_from(values: &[f64]) -> Vec<Instant> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            Instant::new(TemporalType::TFloat, Value::Float(*v), Timestamp::from_secs(i as i64))
                .unwrap()
        })
        .collect()
}

/// Quarter steps with plenty of ties, and the occasional negative zero.
fn float_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => (-40i32..40).prop_map(|v| f64::from(v) / 4.0),
        1 => Just(-0.0),
        1 => Just(0.0),
    ]
}

fn float_values(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(float_value(), len)
}

fn interpolation() -> impl Strategy<Value = Interpolation> {
    prop_oneof![
        Just(Interpolation::Discrete),
        Just(Interpolation::Step),
        Just(Interpolation::Linear),
    ]
}

/// Values, period bounds and interpolation of an arbitrary instant run.
fn run() -> impl Strategy<Value = (Vec<f64>, bool, bool, Interpolation)> {
    (float_values(2..12), any::<bool>(), any::<bool>(), interpolation())
}

fn run_box(values: &[f64], lower_inc: bool, upper_inc: bool, interp: Interpolation) -> BoundingBox {
    box_from_instants(TemporalType::TFloat, &instants_from(values), lower_inc, upper_inc, interp)
        .unwrap()
}

/// Whether the extreme `target` is taken by the value, judged position by position.
fn attained(values: &[f64], target: f64, lower_inc: bool, upper_inc: bool) -> bool {
    let last = values.len() - 1;
    values.iter().enumerate().any(|(i, v)| {
        *v == target && ((i > 0 && i < last) || (i == 0 && lower_inc) || (i == last && upper_inc))
    })
}

fn union(boxes: &[BoundingBox]) -> BoundingBox {
    let mut acc = boxes[0];
    for b in &boxes[1..] {
        expand(b, &mut acc).unwrap();
    }
    acc
}

fn sequence_set(groups: &[Vec<f64>]) -> SequenceSet {
    let mut start = 0;
    let sequences = groups
        .iter()
        .map(|values| {
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
            start += values.len() as i64 + 1;
            Sequence::new(instants, true, true, Interpolation::Linear).unwrap()
        })
        .collect();
    SequenceSet::new(sequences).unwrap()
}

proptest! {
    /// Value bounds are the extremes, inclusive exactly when the extreme is taken.
    #[test]
    fn value_bounds_follow_attainment(
        (values, lower_inc, upper_inc, interp) in run(),
    ) {
        let bbox = run_box(&values, lower_inc, upper_inc, interp);
        let span = *bbox.as_tbox().unwrap().span().unwrap();

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(span.lower().as_f64() == min);
        prop_assert!(span.upper().as_f64() == max);

        let every_value_taken = interp != Interpolation::Linear || min == max;
        prop_assert_eq!(
            span.lower_inc(),
            every_value_taken || attained(&values, min, lower_inc, upper_inc)
        );
        prop_assert_eq!(
            span.upper_inc(),
            every_value_taken || attained(&values, max, lower_inc, upper_inc)
        );

        let period = bbox.period().unwrap();
        prop_assert_eq!(period.lower_inc(), lower_inc);
        prop_assert_eq!(period.upper_inc(), upper_inc);
    }

    /// Expanding a box by itself leaves it unchanged.
    #[test]
    fn expand_is_idempotent((values, lower_inc, upper_inc, interp) in run()) {
        let bbox = run_box(&values, lower_inc, upper_inc, interp);
        let mut target = bbox;
        expand(&bbox, &mut target).unwrap();
        prop_assert_eq!(target, bbox);
    }

    /// The merged box depends neither on the order nor on the grouping of expansion.
    #[test]
    fn expand_is_commutative_and_associative(a in run(), b in run(), c in run()) {
        let boxes: Vec<BoundingBox> = [a, b, c]
            .iter()
            .map(|(values, lower_inc, upper_inc, interp)| {
                run_box(values, *lower_inc, *upper_inc, *interp)
            })
            .collect();

        let mut forward = boxes[0];
        expand(&boxes[1], &mut forward).unwrap();
        expand(&boxes[2], &mut forward).unwrap();

        let mut backward = boxes[2];
        expand(&boxes[1], &mut backward).unwrap();
        expand(&boxes[0], &mut backward).unwrap();

        let mut tail = boxes[1];
        expand(&boxes[2], &mut tail).unwrap();
        let mut grouped = boxes[0];
        expand(&tail, &mut grouped).unwrap();

        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward, grouped);
    }

    /// The box of any run of instants lies within the box of the whole sequence.
    #[test]
    fn sub_run_is_contained(
        (values, lower_inc, upper_inc, interp) in run(),
        start in 0usize..12,
        len in 1usize..12,
    ) {
        let start = start % values.len();
        let end = (start + len).min(values.len());
        let single = end - start == 1;
        let full = run_box(&values, true, true, interp);
        let part = run_box(&values[start..end], lower_inc || single, upper_inc || single, interp);
        prop_assert!(full.as_tbox().unwrap().contains(part.as_tbox().unwrap()));
    }

    /// Decomposition respects the cap and its boxes union to the full box.
    #[test]
    fn sequence_decomposition_covers_box(
        values in float_values(1..40),
        lower_inc: bool,
        upper_inc: bool,
        max_count in 0usize..12,
    ) {
        let single = values.len() == 1;
        let seq = Sequence::new(
            instants_from(&values),
            lower_inc || single,
            upper_inc || single,
            Interpolation::Linear,
        )
        .unwrap();
        let temp: Temporal = seq.into();
        let boxes = decompose(&temp, max_count).unwrap();

        if max_count > 0 {
            prop_assert!(boxes.len() <= max_count);
        }
        prop_assert_eq!(union(&boxes), temp.bbox());
    }

    /// Sequence sets keep the same guarantees in every tier.
    #[test]
    fn sequence_set_decomposition_covers_box(
        groups in prop::collection::vec(float_values(2..12), 1..8),
        max_count in 1usize..20,
    ) {
        let temp: Temporal = sequence_set(&groups).into();
        let boxes = decompose(&temp, max_count).unwrap();
        prop_assert!(!boxes.is_empty());
        prop_assert!(boxes.len() <= max_count);
        prop_assert_eq!(union(&boxes), temp.bbox());
    }

    /// Appending instants one by one gives the box of a full rebuild.
    #[test]
    fn incremental_matches_rebuild(values in float_values(1..30), interp in interpolation()) {
        let instants = instants_from(&values);
        let mut builder = SequenceBuilder::new(TemporalType::TFloat, interp);
        for inst in instants.clone() {
            builder.push(inst).unwrap();
        }
        let built = builder.finish().unwrap();
        let rebuilt =
            box_from_instants(TemporalType::TFloat, &instants, true, true, interp).unwrap();
        prop_assert_eq!(*built.bbox(), rebuilt);
    }
}
