use eggtimer_core::{CookParameters, EggClass, ValidationCfg, validate, validate_with};
use rstest::rstest;

#[test]
fn twenty_grams_yields_exactly_one_message() {
    let r = validate(&CookParameters::default().with_mass(20.0));
    assert!(!r.is_valid());
    assert_eq!(r.messages.len(), 1);
    assert!(r.messages[0].contains("between 30 and 90"));
}

#[rstest]
#[case(30.0, true)]
#[case(90.0, true)]
#[case(55.0, true)]
#[case(29.999, false)]
#[case(90.001, false)]
#[case(f64::NAN, false)]
#[case(f64::INFINITY, false)]
fn mass_bounds_are_inclusive(#[case] mass: f64, #[case] valid: bool) {
    assert_eq!(
        validate(&CookParameters::default().with_mass(mass)).is_valid(),
        valid
    );
}

#[test]
fn class_defaults_are_valid() {
    for egg in EggClass::ALL {
        let p = CookParameters::default().with_egg_class(egg);
        assert!(validate(&p).is_valid(), "{egg:?}");
    }
}

#[test]
fn configured_bounds_show_in_message() {
    let cfg = ValidationCfg {
        min_mass_g: 40.0,
        max_mass_g: 70.5,
    };
    let r = validate_with(&CookParameters::default().with_mass(80.0), &cfg);
    assert_eq!(r.messages, vec!["Egg weight must be between 40 and 70.5 grams."]);
}
