use arm_config::load_toml;
use rstest::rstest;

fn validate_err(toml: &str) -> String {
    let cfg = load_toml(toml).expect("parse");
    cfg.validate().expect_err("should be rejected").to_string()
}

#[test]
fn full_document_round_trips() {
    let doc = r#"
[endpoints]
upper_arm_url = "http://10.0.0.2/upperArmAngle"
lower_arm_url = "http://10.0.0.2/lowerArmAngle"

[poll]
period_ms = 50
fetch_timeout_ms = 250
mode = "paced"

[thresholds]
warning_deg = 8
failure_deg = 12

[connectivity]
max_fetch_interval_ms = 2000

[calibration]
upper_saturation_raw = 1900
lower_saturation_raw = 400
midpoint_raw = 1050
slope_above = 14.5
slope_below = 13.8

[display]
shoulder_x = 80.0
shoulder_y = 90.0
segment_length = 45.0
angle_rounding = 5

[logging]
file = "arm.log"
level = "debug"
"#;
    let cfg = load_toml(doc).expect("parse full document");
    cfg.validate().expect("valid");
    assert_eq!(cfg.poll.period_ms, 50);
    assert_eq!(cfg.poll.mode, arm_config::PollMode::Paced);
    assert_eq!(cfg.thresholds.failure_deg, 12);
    assert_eq!(cfg.logging.file.as_deref(), Some("arm.log"));
}

#[rstest]
#[case("[poll]\nperiod_ms = 0\n", "poll.period_ms")]
#[case("[poll]\nfetch_timeout_ms = 0\n", "poll.fetch_timeout_ms")]
#[case(
    "[connectivity]\nmax_fetch_interval_ms = 0\n",
    "connectivity.max_fetch_interval_ms"
)]
#[case("[thresholds]\nwarning_deg = -1\n", "warning_deg must be >= 0")]
#[case(
    "[thresholds]\nwarning_deg = 20\nfailure_deg = 15\n",
    "warning_deg must be <= thresholds.failure_deg"
)]
#[case(
    "[calibration]\nlower_saturation_raw = 1200\n",
    "lower_saturation_raw must be < midpoint_raw"
)]
#[case(
    "[calibration]\nmidpoint_raw = 2000\n",
    "midpoint_raw must be < upper_saturation_raw"
)]
#[case("[calibration]\nslope_above = 0.0\n", "slope_above must be finite and > 0")]
#[case("[calibration]\nslope_below = -3.0\n", "slope_below must be finite and > 0")]
#[case(
    "[display]\nsegment_length = 0.0\n",
    "segment_length must be finite and > 0"
)]
#[case("[display]\nangle_rounding = 0\n", "angle_rounding must be >= 1")]
#[case("[endpoints]\nupper_arm_url = \"\"\n", "upper_arm_url must not be empty")]
#[case("[endpoints]\nlower_arm_url = \" \"\n", "lower_arm_url must not be empty")]
fn invalid_documents_are_rejected_with_stable_messages(
    #[case] toml: &str,
    #[case] needle: &str,
) {
    let msg = validate_err(toml);
    assert!(msg.contains(needle), "message {msg:?} lacks {needle:?}");
}

#[test]
fn unknown_poll_mode_fails_to_parse() {
    assert!(load_toml("[poll]\nmode = \"burst\"\n").is_err());
}

#[test]
fn equal_thresholds_are_allowed() {
    let cfg = load_toml("[thresholds]\nwarning_deg = 12\nfailure_deg = 12\n").expect("parse");
    cfg.validate().expect("warning == failure is legal");
}
