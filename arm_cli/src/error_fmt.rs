//! Human-readable error descriptions and structured JSON error formatting.

use crate::cli::JSON_MODE;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use arm_core::error::BuildError;

    if let Some(be) = err.downcast_ref::<BuildError>() {
        let BuildError::InvalidConfig(msg) = be;
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See README for a sample."
        );
    }

    if let Some(ne) = err.downcast_ref::<arm_net::NetError>() {
        return match ne {
            arm_net::NetError::SensorFault => {
                "What happened: The arm controller reported a potentiometer read failure.\nLikely causes: Loose potentiometer wiring or a controller fault.\nHow to fix: Check the sensor connections on the arm, then power-cycle the controller.".to_string()
            }
            arm_net::NetError::Parse { body } => format!(
                "What happened: The angle endpoint returned an unparseable body ({body:?}).\nLikely causes: Wrong URL, or a captive portal answering instead of the arm.\nHow to fix: Verify endpoints.*_url in the config and that you are on the arm's access point."
            ),
            other => format!(
                "What happened: Sensor fetch failed ({other}).\nLikely causes: Not connected to the arm's access point, or the controller is down.\nHow to fix: Join the arm's Wi-Fi network and verify the endpoint URLs."
            ),
        };
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("connection refused") || lower.contains("timed out") {
        return "What happened: Could not reach the arm's angle endpoints.\nLikely causes: Not connected to the arm's access point, or the controller is powered off.\nHow to fix: Join the arm's Wi-Fi network (default 192.168.4.1) and retry.".to_string();
    }

    if lower.contains("must") {
        return format!(
            "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
        );
    }

    format!(
        "What happened: {msg}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
    )
}

/// Print the error to stderr, honoring `--json`.
pub fn report(err: &eyre::Report) {
    if JSON_MODE.get().copied().unwrap_or(false) {
        let payload = serde_json::json!({
            "error": err.to_string(),
            "hint": humanize(err),
        });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {}", humanize(err));
    }
}
