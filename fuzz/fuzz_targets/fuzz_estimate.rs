#![no_main]
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

use eggtimer_core::{
    CookParameters, Doneness, EggClass, StartTemperatureMode, WaterStartMode, estimate_detailed,
};

#[derive(Debug, Arbitrary)]
struct Input {
    egg: u8,
    mass_g: f64,
    room: bool,
    override_c: Option<f64>,
    doneness: u8,
    cold: bool,
}

fuzz_target!(|input: Input| {
    let egg = EggClass::ALL[usize::from(input.egg) % 3];
    let doneness = Doneness::ALL[usize::from(input.doneness) % 3];
    let mode = if input.room {
        StartTemperatureMode::FromRoom
    } else {
        StartTemperatureMode::FromFridge
    };
    let water = if input.cold {
        WaterStartMode::Cold
    } else {
        WaterStartMode::Boiling
    };
    let p = CookParameters::new(egg, mode, doneness, water)
        .with_mass(input.mass_g)
        .with_start_temperature(input.override_c);
    let e = estimate_detailed(&p);
    if (30.0..=90.0).contains(&input.mass_g) && p.start_temperature_c() < 60.0 {
        assert!(e.total_seconds.is_finite() && e.total_seconds > 0.0);
    }
});
