#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing may fail; validation may reject. Neither may panic.
    if let Ok(cfg) = eggtimer_config::load_toml(data) {
        if cfg.validate().is_ok() {
            let _ = eggtimer_core::CookParameters::try_from(&cfg.defaults);
        }
    }
});
