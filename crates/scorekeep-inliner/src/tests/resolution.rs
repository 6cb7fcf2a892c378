//! Descriptor parsing and accumulator resolution.

use scorekeep_core::{DomainKind, ScoreError, ScoreShape};

use crate::{
    resolve_accumulator, ArrangementKind, ResolvedAccumulator, ScoreDescriptor,
};

#[test]
fn parses_descriptor_strings() {
    let descriptor: ScoreDescriptor = "hardSoft".parse().unwrap();
    assert_eq!(descriptor.arrangement, ArrangementKind::HardSoft);
    assert_eq!(descriptor.domain, DomainKind::Int32);

    let descriptor: ScoreDescriptor = "single:int64".parse().unwrap();
    assert_eq!(descriptor.arrangement, ArrangementKind::Single);
    assert_eq!(descriptor.domain, DomainKind::Int64);

    let descriptor: ScoreDescriptor = "bendable[2/3]:decimal".parse().unwrap();
    assert_eq!(
        descriptor.shape(),
        Some(ScoreShape::Bendable {
            hard_levels: 2,
            soft_levels: 3
        })
    );
    assert_eq!(descriptor.domain, DomainKind::Decimal);

    let descriptor: ScoreDescriptor = "custom(legacyShape)".parse().unwrap();
    assert_eq!(
        descriptor.arrangement,
        ArrangementKind::Custom("legacyShape".to_string())
    );
    assert_eq!(descriptor.shape(), None);
}

#[test]
fn descriptor_display_round_trips() {
    for text in [
        "single:int32",
        "hardSoft:int64",
        "hardMediumSoft:decimal",
        "bendable[1/4]:int32",
        "custom(legacyShape):int32",
    ] {
        let descriptor: ScoreDescriptor = text.parse().unwrap();
        assert_eq!(descriptor.to_string(), text);
        let reparsed: ScoreDescriptor = descriptor.to_string().parse().unwrap();
        assert_eq!(reparsed, descriptor);
    }
}

#[test]
fn rejects_malformed_descriptors() {
    assert!("hardish".parse::<ScoreDescriptor>().is_err());
    assert!("bendable[2]".parse::<ScoreDescriptor>().is_err());
    assert!("bendable[a/b]".parse::<ScoreDescriptor>().is_err());
    assert!("hardSoft:float".parse::<ScoreDescriptor>().is_err());
}

#[test]
fn descriptor_round_trips_through_toml() {
    let descriptor = ScoreDescriptor::new(
        ArrangementKind::Bendable {
            hard_levels: 2,
            soft_levels: 3,
        },
        DomainKind::Int64,
    );
    let text = toml::to_string(&descriptor).unwrap();
    let parsed: ScoreDescriptor = toml::from_str(&text).unwrap();
    assert_eq!(parsed, descriptor);

    // The domain defaults to int32 when omitted.
    let parsed: ScoreDescriptor = toml::from_str("arrangement = \"hard_soft\"\n").unwrap();
    assert_eq!(parsed.arrangement, ArrangementKind::HardSoft);
    assert_eq!(parsed.domain, DomainKind::Int32);
}

#[test]
fn resolves_all_built_in_combinations() {
    super::init_tracing();
    let arrangements = [
        ArrangementKind::Single,
        ArrangementKind::HardSoft,
        ArrangementKind::HardMediumSoft,
        ArrangementKind::Bendable {
            hard_levels: 3,
            soft_levels: 2,
        },
    ];
    for arrangement in arrangements {
        for domain in [DomainKind::Int32, DomainKind::Int64, DomainKind::Decimal] {
            let descriptor = ScoreDescriptor::new(arrangement.clone(), domain);
            let expected_shape = descriptor.shape().unwrap();
            let resolved = resolve_accumulator(&descriptor, true).unwrap();
            let (shape, tracking) = match resolved {
                ResolvedAccumulator::Int32(inliner) => {
                    assert_eq!(domain, DomainKind::Int32);
                    (inliner.shape(), inliner.match_tracking())
                }
                ResolvedAccumulator::Int64(inliner) => {
                    assert_eq!(domain, DomainKind::Int64);
                    (inliner.shape(), inliner.match_tracking())
                }
                ResolvedAccumulator::Decimal(inliner) => {
                    assert_eq!(domain, DomainKind::Decimal);
                    (inliner.shape(), inliner.match_tracking())
                }
                ResolvedAccumulator::Custom(_) => panic!("built-in resolved to custom"),
            };
            assert_eq!(shape, expected_shape);
            assert!(tracking);
        }
    }
}

#[test]
fn unregistered_custom_arrangement_fails_with_remediation() {
    let descriptor = ScoreDescriptor::new(
        ArrangementKind::Custom("neverRegistered".to_string()),
        DomainKind::Int32,
    );
    match resolve_accumulator(&descriptor, false) {
        Err(ScoreError::Config(message)) => {
            assert!(message.contains("neverRegistered"), "got: {}", message);
            assert!(
                message.contains("register_custom_accumulator"),
                "got: {}",
                message
            );
        }
        _ => panic!("expected a configuration error"),
    }
}

#[test]
fn registered_custom_arrangement_resolves() {
    #[derive(Debug, PartialEq)]
    struct LegacyAccumulator {
        levels: usize,
    }

    #[allow(deprecated)]
    crate::register_custom_accumulator("legacyShape", || {
        Box::new(LegacyAccumulator { levels: 7 })
    });

    let descriptor = ScoreDescriptor::new(
        ArrangementKind::Custom("legacyShape".to_string()),
        DomainKind::Int32,
    );
    match resolve_accumulator(&descriptor, false).unwrap() {
        ResolvedAccumulator::Custom(any) => {
            let accumulator = any.downcast::<LegacyAccumulator>().unwrap();
            assert_eq!(*accumulator, LegacyAccumulator { levels: 7 });
        }
        _ => panic!("expected a custom accumulator"),
    }
}
