use tbox::compute::boxops::{boxop_tnumber_tbox, boxop_tspatial_tspatial};
use tbox::compute::decompose::decompose;
use tbox::{
    BoundingBox, BoxKind, BoxOp, Config, GeoPoint, Instant, Interpolation, MultiEntryIndex,
    Number, Sequence, SequenceBuilder, SequenceSet, SequenceSetBuilder, Span, TBox, TBoxError,
    Temporal, TemporalType, Timestamp, ValidationMode, Value, expand, temporal_bbox_cmp,
    temporal_bbox_eq,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tfloat(v: f64, secs: i64) -> Instant {
    Instant::new(TemporalType::TFloat, Value::Float(v), Timestamp::from_secs(secs)).unwrap()
}

fn tfloat_seq(values: &[f64], start: i64) -> Sequence {
    let instants = values
        .iter()
        .enumerate()
        .map(|(i, v)| tfloat(*v, start + i as i64))
        .collect();
    Sequence::new(instants, true, true, Interpolation::Linear).unwrap()
}

fn union(boxes: &[BoundingBox]) -> BoundingBox {
    let mut acc = boxes[0];
    for b in &boxes[1..] {
        expand(b, &mut acc).unwrap();
    }
    acc
}

#[test]
fn test_end_to_end_sequence() {
    init_logging();
    let seq = tfloat_seq(&[1.0, 4.0, 2.0], 0);
    let temp: Temporal = seq.into();

    let tbox = temp.tbox().unwrap();
    let span = tbox.span().unwrap();
    assert_eq!(span.lower(), Number::Float(1.0));
    assert_eq!(span.upper(), Number::Float(4.0));
    assert!(span.lower_inc() && span.upper_inc());

    let period = tbox.period().unwrap();
    assert_eq!(period.lower(), Timestamp::from_secs(0));
    assert_eq!(period.upper(), Timestamp::from_secs(2));
    assert!(period.lower_inc() && period.upper_inc());

    let one = decompose(&temp, 1).unwrap();
    assert_eq!(one, vec![temp.bbox()]);

    let two = decompose(&temp, 2).unwrap();
    assert_eq!(two.len(), 2);
    assert!(temporal_bbox_eq(&union(&two), &temp.bbox()).unwrap());
}

#[test]
fn test_builders_match_constructors() {
    let mut seq_builder = SequenceBuilder::new(TemporalType::TFloat, Interpolation::Step);
    for (i, v) in [2.0, -3.5, 8.0].into_iter().enumerate() {
        seq_builder.push(tfloat(v, i as i64)).unwrap();
    }
    let built = seq_builder.finish().unwrap();
    let direct =
        Sequence::new(built.instants().to_vec(), true, true, Interpolation::Step).unwrap();
    assert_eq!(built.bbox(), direct.bbox());

    let mut set_builder = SequenceSetBuilder::new();
    set_builder.push(tfloat_seq(&[1.0, 2.0], 10)).unwrap();
    set_builder.push(tfloat_seq(&[0.0, 3.0], 20)).unwrap();
    let set = set_builder.finish().unwrap();
    let direct = SequenceSet::new(set.sequences().to_vec()).unwrap();
    assert_eq!(set.bbox(), direct.bbox());
    assert_eq!(temporal_bbox_cmp(set.bbox(), direct.bbox()).unwrap(), std::cmp::Ordering::Equal);
}

#[test]
fn test_json_reload_rebuilds_boxes() {
    let set = SequenceSet::new(vec![
        tfloat_seq(&[1.0, 5.0, 2.0], 0),
        tfloat_seq(&[-2.0, 0.0], 10),
    ])
    .unwrap();
    let temp: Temporal = set.into();

    let json = serde_json::to_string(&temp).unwrap();
    let reloaded: Temporal = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded.bbox(), temp.bbox());
    assert_eq!(reloaded.num_instants(), 5);
}

#[test]
fn test_json_reload_rejects_overlapping_sequences() {
    let json = serde_json::json!({
        "sequence_set": {
            "sequences": [
                {
                    "interpolation": "linear", "lower_inc": true, "upper_inc": true,
                    "instants": [
                        {"temporal_type": "tfloat", "value": {"float": 1.0}, "t": 0},
                        {"temporal_type": "tfloat", "value": {"float": 2.0}, "t": 10}
                    ]
                },
                {
                    "interpolation": "linear", "lower_inc": true, "upper_inc": true,
                    "instants": [
                        {"temporal_type": "tfloat", "value": {"float": 1.0}, "t": 5},
                        {"temporal_type": "tfloat", "value": {"float": 2.0}, "t": 20}
                    ]
                }
            ]
        }
    });
    assert!(serde_json::from_value::<Temporal>(json).is_err());
}

#[test]
fn test_trusted_mode_skips_checks() {
    let instants = vec![tfloat(1.0, 0), tfloat(2.0, 1)];
    let seq = Sequence::with_validation(
        instants,
        true,
        true,
        Interpolation::Linear,
        ValidationMode::Trusted,
    )
    .unwrap();
    assert_eq!(seq.bbox().kind(), BoxKind::TBox);
}

#[test]
fn test_index_roundtrip() {
    init_logging();
    let config = Config::from_json(r#"{"max_boxes_per_value": 2}"#).unwrap();
    let mut index = MultiEntryIndex::new(config).unwrap();

    index.insert(1, &tfloat_seq(&[0.0, 1.0, 2.0, 3.0, 4.0], 0).into()).unwrap();
    index.insert(2, &tfloat_seq(&[10.0, 11.0], 0).into()).unwrap();
    assert_eq!(index.stats().entries, 3);

    let query = TBox::from_span_period(
        Span::new(Number::Int(3), Number::Int(10), true, true).unwrap(),
        Span::new(Timestamp::from_secs(0), Timestamp::from_secs(1), true, true).unwrap(),
    );
    assert_eq!(index.query_overlapping(&query), vec![2]);

    index.clear();
    assert!(index.query_overlapping(&query).is_empty());
}

#[test]
fn test_operator_dispatch() {
    let temp: Temporal = tfloat_seq(&[1.0, 3.0], 0).into();
    let query =
        TBox::from_span(Span::new(Number::Float(0.0), Number::Float(5.0), true, true).unwrap());
    assert!(boxop_tnumber_tbox(&temp, &query, BoxOp::Contained, false).unwrap());

    let a: Temporal = Instant::new(
        TemporalType::TGeogPoint,
        Value::Point(GeoPoint::new(2.35, 48.85).with_srid(4326)),
        Timestamp::from_secs(0),
    )
    .unwrap()
    .into();
    let b: Temporal = Instant::new(
        TemporalType::TGeomPoint,
        Value::Point(GeoPoint::new(2.35, 48.85).with_srid(4326)),
        Timestamp::from_secs(0),
    )
    .unwrap()
    .into();
    let err = boxop_tspatial_tspatial(&a, &b, BoxOp::Overlaps, false).unwrap_err();
    assert!(matches!(err, TBoxError::InvalidInput(_)));
}

#[test]
fn test_unknown_type_tag() {
    let err = tbox::temporal_bbox_size(42).unwrap_err();
    assert!(matches!(err, TBoxError::InternalTypeError { .. }));
    assert!(err.to_string().contains("temporal_bbox_size"));
}
