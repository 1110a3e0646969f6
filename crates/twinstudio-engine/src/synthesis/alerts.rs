//! Threshold alerts. Alerts consume no draws.

use twinstudio_spec::{Alert, RiskLevel, Severity, TimeWindow};

/// Effective noise above which the bad-channel alert escalates.
pub const BAD_CHANNEL_NOISE_THRESHOLD: f64 = 1.4;

/// Sync jitter above which the monotonicity alert escalates.
pub const MONOTONICITY_JITTER_THRESHOLD_MS: f64 = 12.0;

/// Builds the ood, bad-channel-ratio and monotonicity alerts, in that order.
pub fn alerts(risk: RiskLevel, noise: f64, jitter_ms: f64, window: &TimeWindow) -> Vec<Alert> {
    let t0 = window.t0_ms;
    let t1 = window.t1_ms;

    let ood = Alert {
        id: "ood".to_string(),
        label: match risk {
            RiskLevel::High => "OOD high risk",
            RiskLevel::Normal | RiskLevel::Warning => "OOD nominal",
        }
        .to_string(),
        severity: match risk {
            RiskLevel::High => Severity::High,
            RiskLevel::Warning => Severity::Warning,
            RiskLevel::Normal => Severity::Info,
        },
        window: *window,
    };

    let noisy = noise > BAD_CHANNEL_NOISE_THRESHOLD;
    let bad_channel_ratio = Alert {
        id: "bad_channel_ratio".to_string(),
        label: if noisy {
            "bad_channel_ratio > 0.18"
        } else {
            "bad_channel_ratio < 0.1"
        }
        .to_string(),
        severity: if noisy { Severity::Warning } else { Severity::Info },
        window: TimeWindow::new(t0, t1.min(t0 + 400.0)),
    };

    let drifting = jitter_ms > MONOTONICITY_JITTER_THRESHOLD_MS;
    let monotonicity = Alert {
        id: "monotonicity".to_string(),
        label: if drifting {
            "monotonicity drift"
        } else {
            "monotonicity stable"
        }
        .to_string(),
        severity: if drifting { Severity::Warning } else { Severity::Info },
        window: TimeWindow::new(t0 + 320.0, t1.min(t0 + 720.0)),
    };

    vec![ood, bad_channel_ratio, monotonicity]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nominal_alerts() {
        let window = TimeWindow::new(0.0, 1200.0);
        let alerts = alerts(RiskLevel::Normal, 1.2, 10.0, &window);

        let ids: Vec<&str> = alerts.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["ood", "bad_channel_ratio", "monotonicity"]);

        assert_eq!(alerts[0].label, "OOD nominal");
        assert_eq!(alerts[0].severity, Severity::Info);
        assert_eq!(alerts[0].window, window);

        assert_eq!(alerts[1].label, "bad_channel_ratio < 0.1");
        assert_eq!(alerts[1].window, TimeWindow::new(0.0, 400.0));

        assert_eq!(alerts[2].label, "monotonicity stable");
        assert_eq!(alerts[2].window, TimeWindow::new(320.0, 720.0));
    }

    #[test]
    fn test_escalated_alerts() {
        let window = TimeWindow::new(0.0, 1200.0);
        let alerts = alerts(RiskLevel::High, 1.5, 18.0, &window);

        assert_eq!(alerts[0].label, "OOD high risk");
        assert_eq!(alerts[0].severity, Severity::High);
        assert_eq!(alerts[1].severity, Severity::Warning);
        assert_eq!(alerts[1].label, "bad_channel_ratio > 0.18");
        assert_eq!(alerts[2].severity, Severity::Warning);
        assert_eq!(alerts[2].label, "monotonicity drift");
    }

    #[test]
    fn test_warning_risk_keeps_nominal_label() {
        let alerts = alerts(RiskLevel::Warning, 1.0, 5.0, &TimeWindow::new(0.0, 1200.0));
        assert_eq!(alerts[0].label, "OOD nominal");
        assert_eq!(alerts[0].severity, Severity::Warning);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let alerts = alerts(RiskLevel::Normal, 1.4, 12.0, &TimeWindow::new(0.0, 1200.0));
        assert_eq!(alerts[1].severity, Severity::Info);
        assert_eq!(alerts[2].severity, Severity::Info);
    }

    #[test]
    fn test_short_window_narrows_sub_windows() {
        let alerts = alerts(RiskLevel::Normal, 1.0, 5.0, &TimeWindow::new(100.0, 300.0));
        assert_eq!(alerts[1].window, TimeWindow::new(100.0, 300.0));
        assert_eq!(alerts[2].window, TimeWindow::new(420.0, 300.0));
    }
}
