//! Sampling constants and policy configuration.

use std::env;

use timing_barrier::{
    per_second, units_to_seconds, PolicyError, SamplingPolicy, DEFAULT_SAMPLE_COUNT,
    ENV_SAMPLES, ENV_TIME_UNITS_PER_SECOND, TIME_UNITS_PER_SECOND,
};

#[test]
fn constants_have_contract_values() {
    assert_eq!(TIME_UNITS_PER_SECOND, 1_000_000.0);
    assert_eq!(DEFAULT_SAMPLE_COUNT, 30);
}

#[test]
fn unit_conversion_is_exact() {
    for micros in [0u64, 1, 999_999, 1_000_000, 2_500_000, 86_400_000_000] {
        let seconds = micros as f64 / TIME_UNITS_PER_SECOND;
        assert_eq!(units_to_seconds(micros as f64), seconds);
        // Multiplying back recovers the integer count exactly.
        assert_eq!((seconds * TIME_UNITS_PER_SECOND).round() as u64, micros);
    }
    assert_eq!(per_second(3_000.0, 1_500_000.0), 2_000.0);
}

#[test]
fn sample_count_drives_a_loop_directly() {
    let samples: Vec<usize> = (0..DEFAULT_SAMPLE_COUNT).collect();
    assert_eq!(samples.len(), 30);
}

#[test]
fn policy_serializes_with_constant_defaults() {
    let json = serde_json::to_value(SamplingPolicy::default()).unwrap();
    assert_eq!(json["sample_count"], 30);
    assert_eq!(json["time_units_per_second"], 1_000_000.0);

    let parsed: SamplingPolicy =
        serde_json::from_str(r#"{"sample_count":50,"time_units_per_second":1000.0}"#).unwrap();
    assert_eq!(parsed, SamplingPolicy::new().sample_count(50).time_units_per_second(1000.0));
}

// Environment is process-wide, so every env case runs inside one test.
#[test]
fn environment_overrides() {
    env::remove_var(ENV_SAMPLES);
    env::remove_var(ENV_TIME_UNITS_PER_SECOND);
    assert_eq!(SamplingPolicy::default().from_env(), SamplingPolicy::default());

    env::set_var(ENV_SAMPLES, "100");
    env::set_var(ENV_TIME_UNITS_PER_SECOND, "1e9");
    let policy = SamplingPolicy::default().try_from_env().unwrap();
    assert_eq!(policy.sample_count, 100);
    assert_eq!(policy.time_units_per_second, 1e9);

    env::set_var(ENV_SAMPLES, "many");
    assert_eq!(
        SamplingPolicy::default().try_from_env(),
        Err(PolicyError::InvalidEnv {
            key: ENV_SAMPLES.to_string(),
            value: "many".to_string(),
        })
    );
    // Lenient variant drops only the bad variable and keeps the valid one.
    let lenient = SamplingPolicy::default().from_env();
    assert_eq!(lenient.sample_count, DEFAULT_SAMPLE_COUNT);
    assert_eq!(lenient.time_units_per_second, 1e9);

    env::set_var(ENV_SAMPLES, "75");
    env::set_var(ENV_TIME_UNITS_PER_SECOND, "fast");
    let lenient = SamplingPolicy::default().from_env();
    assert_eq!(lenient.sample_count, 75);
    assert_eq!(lenient.time_units_per_second, TIME_UNITS_PER_SECOND);
    env::remove_var(ENV_TIME_UNITS_PER_SECOND);

    #[cfg(unix)]
    {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        env::set_var(ENV_SAMPLES, OsStr::from_bytes(b"4\xff"));
        assert_eq!(
            SamplingPolicy::default().try_from_env(),
            Err(PolicyError::InvalidEnv {
                key: ENV_SAMPLES.to_string(),
                value: "4\u{FFFD}".to_string(),
            })
        );
        assert_eq!(SamplingPolicy::default().from_env(), SamplingPolicy::default());
    }

    env::set_var(ENV_SAMPLES, "0");
    assert_eq!(
        SamplingPolicy::default().try_from_env(),
        Err(PolicyError::ZeroSampleCount)
    );

    env::remove_var(ENV_SAMPLES);
    env::set_var(ENV_TIME_UNITS_PER_SECOND, "-1");
    assert!(matches!(
        SamplingPolicy::default().try_from_env(),
        Err(PolicyError::InvalidTimeUnits { .. })
    ));

    env::remove_var(ENV_TIME_UNITS_PER_SECOND);
    // Constants are untouched by any override.
    assert_eq!(DEFAULT_SAMPLE_COUNT, 30);
    assert_eq!(TIME_UNITS_PER_SECOND, 1_000_000.0);
}
