use super::*;
use crate::{
    config::model::{DataInput, ScaleSpec},
    foundation::core::AxisMap,
    scale::object::{Capability, DescribedScale},
};
use serde_json::json;

fn rows(v: serde_json::Value) -> DataInput {
    serde_json::from_value(v).unwrap()
}

fn scale_obj(extra: &[Capability]) -> ScaleValue {
    let caps = [Capability::Copy, Capability::Domain, Capability::Range]
        .into_iter()
        .chain(extra.iter().copied());
    ScaleValue::object(DescribedScale::new(caps, vec![0.0, 1.0], vec![0.0, 1.0]))
}

fn with_scale(spec: ScaleSpec) -> ChartConfig {
    ChartConfig {
        scale: Some(spec),
        ..ChartConfig::default()
    }
}

#[test]
fn per_axis_scale_defines_only_its_axis() {
    let cfg = with_scale(ScaleSpec::PerAxis(AxisMap {
        x: Some(ScaleValue::name("log")),
        y: None,
    }));
    assert!(is_scale_defined(&cfg, Axis::X));
    assert!(!is_scale_defined(&cfg, Axis::Y));
}

#[test]
fn shared_scale_defines_both_axes() {
    let cfg = with_scale(ScaleSpec::Shared(ScaleValue::name("log")));
    assert!(is_scale_defined(&cfg, Axis::X));
    assert!(is_scale_defined(&cfg, Axis::Y));
    assert!(!is_scale_defined(&ChartConfig::default(), Axis::X));
}

#[test]
fn valid_scale_checks_names_and_capabilities() {
    for n in ["linear", "time", "log", "sqrt"] {
        assert!(valid_scale(&ScaleValue::name(n)));
    }
    assert!(!valid_scale(&ScaleValue::name("ordinal")));
    assert!(valid_scale(&scale_obj(&[])));
    let no_copy = ScaleValue::object(DescribedScale::new(
        [Capability::Domain, Capability::Range, Capability::Base],
        vec![],
        vec![],
    ));
    assert!(!valid_scale(&no_copy));
}

#[test]
fn scale_from_props_builds_named_defaults() {
    let cfg = with_scale(ScaleSpec::Shared(ScaleValue::name("log")));
    let s = get_scale_from_props(&cfg, Axis::Y).unwrap();
    assert!(s.capabilities().contains(Capability::Base));
    assert_eq!(s.domain(), vec![1.0, 10.0]);

    let cfg = with_scale(ScaleSpec::Shared(ScaleValue::name("banana")));
    assert!(get_scale_from_props(&cfg, Axis::X).is_none());
    assert!(get_scale_from_props(&ChartConfig::default(), Axis::X).is_none());
}

#[test]
fn scale_from_props_returns_objects_as_is() {
    let value = scale_obj(&[Capability::Quantiles]);
    let ScaleValue::Object(original) = &value else {
        unreachable!()
    };
    let original = Arc::clone(original);
    let cfg = with_scale(ScaleSpec::Shared(value));
    let s = get_scale_from_props(&cfg, Axis::X).unwrap();
    assert!(Arc::ptr_eq(&s, &original));
}

#[test]
fn data_inference_detects_dates() {
    let mut cfg = ChartConfig {
        data: Some(rows(json!([{ "x": "2016-01-01", "y": 1 }, { "x": "2016-02-01", "y": 2 }]))),
        ..ChartConfig::default()
    };
    assert_eq!(get_scale_type_from_data(&cfg, Axis::X), ScaleType::Time);
    assert_eq!(get_scale_type_from_data(&cfg, Axis::Y), ScaleType::Linear);
    assert_eq!(get_scale_type(&cfg, Axis::X), ScaleType::Time);

    cfg.data = Some(rows(json!([{ "x": 1 }, { "x": 2 }])));
    assert_eq!(get_scale_type(&cfg, Axis::X), ScaleType::Linear);
}

#[test]
fn data_inference_requires_every_value_to_be_a_date() {
    let cfg = ChartConfig {
        data: Some(rows(json!([{ "x": "2016-01-01" }, { "x": "later" }]))),
        ..ChartConfig::default()
    };
    assert_eq!(get_scale_type_from_data(&cfg, Axis::X), ScaleType::Linear);
}

#[test]
fn data_inference_flattens_series() {
    let cfg = ChartConfig {
        data: Some(rows(json!([[{ "t": "2020-01-01" }], [{ "t": "2020-06-01T10:00:00Z" }]]))),
        x: Some("t".into()),
        ..ChartConfig::default()
    };
    assert_eq!(get_scale_type_from_data(&cfg, Axis::X), ScaleType::Time);
}

#[test]
fn absent_or_empty_data_is_linear() {
    assert_eq!(
        get_scale_type_from_data(&ChartConfig::default(), Axis::X),
        ScaleType::Linear
    );
    let cfg = ChartConfig::with_data(vec![]);
    assert_eq!(get_scale_type_from_data(&cfg, Axis::X), ScaleType::Linear);
}

#[test]
fn base_scale_prefers_configuration_then_data() {
    let cfg = with_scale(ScaleSpec::Shared(ScaleValue::name("sqrt")));
    assert!(
        get_base_scale(&cfg, Axis::X)
            .capabilities()
            .contains(Capability::Exponent)
    );

    let cfg = ChartConfig {
        data: Some(rows(json!([{ "x": "2000-01-01" }]))),
        scale: Some(ScaleSpec::Shared(ScaleValue::name("nope"))),
        ..ChartConfig::default()
    };
    let time = get_base_scale(&cfg, Axis::X);
    assert_eq!(time.domain(), ScaleName::Time.natural_domain().to_vec());

    let linear = get_base_scale(&ChartConfig::default(), Axis::Y);
    assert_eq!(linear.domain(), vec![0.0, 1.0]);
}

#[test]
fn named_scales_report_their_type() {
    let cases = [
        ("linear", ScaleType::Linear),
        ("time", ScaleType::Time),
        ("log", ScaleType::Log),
        ("sqrt", ScaleType::PowSqrt),
        ("ordinal", ScaleType::Invalid),
        ("", ScaleType::Invalid),
    ];
    for (name, expected) in cases {
        let cfg = with_scale(ScaleSpec::Shared(ScaleValue::name(name)));
        assert_eq!(get_scale_type(&cfg, Axis::X), expected, "scale {name:?}");
    }
}

#[test]
fn capability_classification_beats_data() {
    let cfg = ChartConfig {
        data: Some(rows(json!([{ "x": "2016-01-01" }]))),
        scale: Some(ScaleSpec::Shared(scale_obj(&[Capability::Base]))),
        ..ChartConfig::default()
    };
    assert_eq!(get_scale_type(&cfg, Axis::X), ScaleType::Log);
}

#[test]
fn capability_classes_resolve_in_priority_order() {
    let cases: [(&[Capability], ScaleType); 6] = [
        (&[Capability::Unknown], ScaleType::Ordinal),
        (&[Capability::Exponent], ScaleType::PowSqrt),
        (&[Capability::Quantiles], ScaleType::Quantile),
        (&[Capability::InvertExtent], ScaleType::QuantizeThreshold),
        (
            &[Capability::InvertExtent, Capability::Unknown],
            ScaleType::Ordinal,
        ),
        (&[Capability::Exponent, Capability::Base], ScaleType::Log),
    ];
    for (caps, expected) in cases {
        let cfg = with_scale(ScaleSpec::Shared(scale_obj(caps)));
        assert_eq!(get_scale_type(&cfg, Axis::Y), expected);
    }
}

#[test]
fn invalid_objects_are_invalid_and_plain_objects_fall_back_to_data() {
    let broken = ScaleValue::object(DescribedScale::new([Capability::Base], vec![], vec![]));
    let cfg = with_scale(ScaleSpec::Shared(broken));
    assert_eq!(get_scale_type(&cfg, Axis::X), ScaleType::Invalid);

    let cfg = ChartConfig {
        data: Some(rows(json!([{ "x": "2016-01-01" }]))),
        scale: Some(ScaleSpec::Shared(scale_obj(&[Capability::Ticks]))),
        ..ChartConfig::default()
    };
    assert_eq!(get_scale_type(&cfg, Axis::X), ScaleType::Time);
}

#[test]
fn malformed_json_scales_classify_invalid() {
    for raw in [
        r#"{ "scale": 5, "data": [{ "x": 1, "y": 2 }] }"#,
        r#"{ "scale": { "x": true, "y": [1] }, "data": [{ "x": 1, "y": 2 }] }"#,
        r#"{ "scale": { "domain": [0, 1] }, "data": [{ "x": 1, "y": 2 }] }"#,
    ] {
        let cfg = ChartConfig::from_json_str(raw).unwrap();
        for axis in Axis::ALL {
            assert!(is_scale_defined(&cfg, axis), "{raw}");
            assert!(!valid_scale(configured_scale(&cfg, axis).unwrap()), "{raw}");
            assert!(get_scale_from_props(&cfg, axis).is_none(), "{raw}");
            assert_eq!(get_scale_type(&cfg, axis), ScaleType::Invalid, "{raw}");
            assert_eq!(get_base_scale(&cfg, axis).domain(), vec![0.0, 1.0], "{raw}");
        }
    }
}

#[test]
fn unrecognized_scale_still_normalizes() {
    let cfg = ChartConfig::from_json_str(r#"{ "scale": 5, "data": [{ "x": "a", "y": 0 }] }"#)
        .unwrap();
    let out = crate::data::normalize::get_data(&cfg);
    assert_eq!(out.len(), 1);
    assert_eq!((out[0].x, out[0].y), (1.0, 0.0));
}
