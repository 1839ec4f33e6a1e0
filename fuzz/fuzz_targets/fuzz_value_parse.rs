#![no_main]

use std::collections::HashMap;
use std::time::Duration;

use envbind::num_complex::Complex64;
use envbind::url::Url;
use envbind::value::EnvValue;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Every registry parser must reject garbage without panicking ===
    let _ = bool::from_env(data);
    let _ = i64::from_env(data);
    let _ = u8::from_env(data);
    let _ = f64::from_env(data);
    let _ = Complex64::from_env(data);
    let _ = Url::from_env(data);
    let _ = Vec::<String>::from_env(data);
    let _ = Vec::<i64>::from_env(data);
    let _ = HashMap::<String, String>::from_env(data);

    // === Duration: successful parses must re-serialize and re-parse ===
    if let Ok(d) = Duration::from_env(data) {
        let canonical = d.to_env();
        let reparsed = Duration::from_env(&canonical).expect("canonical form must parse");

        // Exact round-trip holds while every component stays inside f64's
        // integer range; beyond that only reparsability is guaranteed.
        if d.as_nanos() < (1 << 53) {
            assert_eq!(reparsed, d);
        }
    }
});
