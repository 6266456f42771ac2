//! Field classification.
//!
//! Maps a raw telemetry snapshot to the ordered rows shown on the dashboard,
//! attaching a severity to each. Pure: the only input besides the snapshot is
//! the wall-clock instant used for the timestamp and boot-time rows.

use chrono::{DateTime, Local, TimeDelta, Utc};
use serde_json::Value;

use super::duration::format_uptime;
use crate::source::{field, TelemetrySnapshot};

/// RSSI at or above this is a good link (dBm).
pub const RSSI_GOOD: i64 = -55;
/// RSSI at or above this (and below [`RSSI_GOOD`]) is marginal (dBm).
pub const RSSI_WARN: i64 = -65;
/// Assumed RSSI when the field is missing or unusable.
pub const RSSI_MISSING: i64 = -100;

/// Placeholder for missing or null fields.
pub const PLACEHOLDER: &str = "?";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Qualitative classification attached to a displayed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Neutral,
    Good,
    Warn,
    Bad,
}

/// Visual block a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Name, build, update status, uptime.
    Identity,
    /// Wi-Fi and wired link details.
    Network,
    /// Locale, firmware and privacy opt-ins.
    Locale,
}

/// One line of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub section: Section,
    pub label: &'static str,
    pub value: String,
    pub severity: Severity,
}

impl DisplayRow {
    fn new(section: Section, label: &'static str, value: String, severity: Severity) -> Self {
        Self {
            section,
            label,
            value,
            severity,
        }
    }

    fn neutral(section: Section, label: &'static str, value: String) -> Self {
        Self::new(section, label, value, Severity::Neutral)
    }
}

/// Classify a snapshot against the current wall-clock time.
pub fn classify(snapshot: &TelemetrySnapshot) -> Vec<DisplayRow> {
    classify_at(snapshot, Local::now())
}

/// Classify a snapshot as of `now`.
///
/// Boot time is `now - uptime`, so it is measured at classification time
/// rather than at fetch time.
pub fn classify_at(snapshot: &TelemetrySnapshot, now: DateTime<Local>) -> Vec<DisplayRow> {
    use Section::*;

    let uptime = uptime_seconds(snapshot);
    let boot = boot_time(now.with_timezone(&Utc), uptime)
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let has_update = field(snapshot, "has_update");
    let update_severity = if is_truthy(has_update) {
        Severity::Warn
    } else {
        Severity::Neutral
    };

    let rssi = coerce_rssi(field(snapshot, "signal_level"));
    let text = |path: &str| display_value(field(snapshot, path));

    vec![
        DisplayRow::neutral(Identity, "Timestamp", now.format(TIME_FORMAT).to_string()),
        DisplayRow::new(Identity, "Name", text("name"), Severity::Good),
        DisplayRow::neutral(Identity, "Build Rev", text("cast_build_revision")),
        DisplayRow::neutral(Identity, "Track", text("release_track")),
        DisplayRow::new(
            Identity,
            "Update Pending",
            display_value(has_update),
            update_severity,
        ),
        DisplayRow::neutral(Identity, "Uptime", format_uptime(uptime)),
        DisplayRow::neutral(Identity, "Boot (UTC)", boot),
        DisplayRow::neutral(Network, "SSID", text("ssid")),
        DisplayRow::neutral(Network, "BSSID", text("bssid")),
        DisplayRow::new(
            Network,
            "Wi-Fi RSSI",
            format!("{rssi} dBm"),
            rssi_severity(rssi),
        ),
        DisplayRow::neutral(
            Network,
            "Noise Floor",
            format!("{} dBm", text("noise_level")),
        ),
        DisplayRow::neutral(Network, "IP", text("ip_address")),
        DisplayRow::neutral(Network, "MAC", text("mac_address")),
        DisplayRow::neutral(Network, "Ethernet", text("ethernet_connected")),
        DisplayRow::neutral(Locale, "Locale", text("locale")),
        DisplayRow::neutral(Locale, "Country", text("location.country_code")),
        DisplayRow::neutral(Locale, "Fuchsia Ver", text("version")),
        DisplayRow::neutral(Locale, "Time-Zone", text("timezone")),
        DisplayRow::neutral(Locale, "Opt-In Crash", text("opt_in.crash")),
        DisplayRow::neutral(Locale, "Opt-In Stats", text("opt_in.stats")),
    ]
}

/// Band a Wi-Fi RSSI reading (dBm).
pub fn rssi_severity(rssi: i64) -> Severity {
    if rssi >= RSSI_GOOD {
        Severity::Good
    } else if rssi >= RSSI_WARN {
        Severity::Warn
    } else {
        Severity::Bad
    }
}

/// Read `signal_level` as an integer.
///
/// Floats truncate toward zero and integer strings are parsed; anything
/// else counts as missing.
pub fn coerce_rssi(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(RSSI_MISSING),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(RSSI_MISSING),
        _ => RSSI_MISSING,
    }
}

fn uptime_seconds(snapshot: &TelemetrySnapshot) -> f64 {
    let seconds = match field(snapshot, "uptime") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

fn boot_time(now: DateTime<Utc>, uptime: f64) -> Option<DateTime<Utc>> {
    let micros = (uptime * 1_000_000.0).round();
    if micros >= i64::MAX as f64 {
        return None;
    }
    now.checked_sub_signed(TimeDelta::microseconds(micros as i64))
}

/// Truthiness of a JSON value: `true`, non-zero numbers and non-empty
/// strings, arrays and objects.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn snapshot(value: Value) -> TelemetrySnapshot {
        match value {
            Value::Object(map) => map,
            _ => panic!("test snapshot must be an object"),
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 5, 19, 12, 0, 0).unwrap()
    }

    fn row<'a>(rows: &'a [DisplayRow], label: &str) -> &'a DisplayRow {
        rows.iter()
            .find(|r| r.label == label)
            .unwrap_or_else(|| panic!("no row labelled {label}"))
    }

    #[test]
    fn test_rssi_bands() {
        assert_eq!(rssi_severity(-30), Severity::Good);
        assert_eq!(rssi_severity(-55), Severity::Good);
        assert_eq!(rssi_severity(-56), Severity::Warn);
        assert_eq!(rssi_severity(-65), Severity::Warn);
        assert_eq!(rssi_severity(-66), Severity::Bad);
        assert_eq!(rssi_severity(-100), Severity::Bad);
    }

    #[test]
    fn test_rssi_bands_exhaustive() {
        for rssi in -120..=0 {
            let expected = if rssi >= -55 {
                Severity::Good
            } else if rssi >= -65 {
                Severity::Warn
            } else {
                Severity::Bad
            };
            assert_eq!(rssi_severity(rssi), expected, "rssi {rssi}");
        }
    }

    #[test]
    fn test_missing_signal_level_is_bad() {
        let rows = classify_at(&snapshot(json!({})), fixed_now());
        let wifi = row(&rows, "Wi-Fi RSSI");
        assert_eq!(wifi.value, "-100 dBm");
        assert_eq!(wifi.severity, Severity::Bad);
    }

    #[test]
    fn test_coerce_rssi() {
        assert_eq!(coerce_rssi(Some(&json!(-61))), -61);
        assert_eq!(coerce_rssi(Some(&json!(-61.9))), -61);
        assert_eq!(coerce_rssi(Some(&json!(" -48 "))), -48);
        assert_eq!(coerce_rssi(Some(&json!("strong"))), RSSI_MISSING);
        assert_eq!(coerce_rssi(Some(&json!(true))), RSSI_MISSING);
        assert_eq!(coerce_rssi(Some(&json!({"dbm": -40}))), RSSI_MISSING);
        assert_eq!(coerce_rssi(None), RSSI_MISSING);
    }

    #[test]
    fn test_scenario_good_signal_pending_update() {
        let rows = classify_at(
            &snapshot(json!({"signal_level": -50, "has_update": true, "uptime": 3600})),
            fixed_now(),
        );

        let wifi = row(&rows, "Wi-Fi RSSI");
        assert_eq!(wifi.value, "-50 dBm");
        assert_eq!(wifi.severity, Severity::Good);

        let update = row(&rows, "Update Pending");
        assert_eq!(update.value, "true");
        assert_eq!(update.severity, Severity::Warn);

        assert_eq!(row(&rows, "Uptime").value, "1:00:00");
    }

    #[test]
    fn test_update_pending_never_good_or_bad() {
        for value in [json!(false), json!(0), json!(""), json!(null)] {
            let rows = classify_at(&snapshot(json!({ "has_update": value })), fixed_now());
            assert_eq!(row(&rows, "Update Pending").severity, Severity::Neutral);
        }
        for value in [json!(true), json!(1), json!("yes"), json!([1])] {
            let rows = classify_at(&snapshot(json!({ "has_update": value })), fixed_now());
            assert_eq!(row(&rows, "Update Pending").severity, Severity::Warn);
        }
    }

    #[test]
    fn test_empty_snapshot_renders_placeholders() {
        let rows = classify_at(&snapshot(json!({})), fixed_now());

        let labels = [
            "Name",
            "Build Rev",
            "SSID",
            "IP",
            "Country",
            "Opt-In Crash",
            "Opt-In Stats",
        ];
        for label in labels {
            assert_eq!(row(&rows, label).value, PLACEHOLDER, "{label}");
        }
        assert_eq!(row(&rows, "Noise Floor").value, "? dBm");
        assert_eq!(row(&rows, "Uptime").value, "0:00:00");
        assert_eq!(row(&rows, "Name").severity, Severity::Good);
    }

    #[test]
    fn test_malformed_nested_objects_do_not_fail() {
        let rows = classify_at(
            &snapshot(json!({
                "location": "nowhere",
                "opt_in": null,
                "uptime": "soon",
                "signal_level": [1, 2],
                "has_update": {}
            })),
            fixed_now(),
        );
        assert_eq!(row(&rows, "Country").value, PLACEHOLDER);
        assert_eq!(row(&rows, "Opt-In Stats").value, PLACEHOLDER);
        assert_eq!(row(&rows, "Uptime").value, "0:00:00");
        assert_eq!(row(&rows, "Wi-Fi RSSI").severity, Severity::Bad);
        assert_eq!(row(&rows, "Update Pending").value, "{}");
    }

    #[test]
    fn test_passthrough_fields() {
        let rows = classify_at(
            &snapshot(json!({
                "name": "Living Room",
                "cast_build_revision": "1.56.500000",
                "release_track": "stable-channel",
                "ssid": "home",
                "bssid": "aa:bb:cc:dd:ee:ff",
                "noise_level": -90,
                "ip_address": "192.168.8.110",
                "mac_address": "11:22:33:44:55:66",
                "ethernet_connected": false,
                "locale": "en-US",
                "location": { "country_code": "US" },
                "version": 12,
                "timezone": "America/Chicago",
                "opt_in": { "crash": true, "stats": false }
            })),
            fixed_now(),
        );

        assert_eq!(row(&rows, "Name").value, "Living Room");
        assert_eq!(row(&rows, "Build Rev").value, "1.56.500000");
        assert_eq!(row(&rows, "Track").value, "stable-channel");
        assert_eq!(row(&rows, "Noise Floor").value, "-90 dBm");
        assert_eq!(row(&rows, "Ethernet").value, "false");
        assert_eq!(row(&rows, "Country").value, "US");
        assert_eq!(row(&rows, "Fuchsia Ver").value, "12");
        assert_eq!(row(&rows, "Opt-In Crash").value, "true");
        assert_eq!(row(&rows, "Opt-In Stats").value, "false");

        let graded = |r: &&DisplayRow| matches!(r.label, "Name" | "Wi-Fi RSSI" | "Update Pending");
        for r in rows.iter().filter(|r| !graded(r)) {
            assert_eq!(r.severity, Severity::Neutral, "{}", r.label);
        }
    }

    #[test]
    fn test_row_order_and_sections() {
        let rows = classify_at(&snapshot(json!({})), fixed_now());
        let labels: Vec<_> = rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            [
                "Timestamp", "Name", "Build Rev", "Track", "Update Pending", "Uptime", "Boot (UTC)",
                "SSID", "BSSID", "Wi-Fi RSSI", "Noise Floor", "IP", "MAC", "Ethernet",
                "Locale", "Country", "Fuchsia Ver", "Time-Zone", "Opt-In Crash", "Opt-In Stats",
            ]
        );

        let sections: Vec<_> = rows.iter().map(|r| r.section).collect();
        assert!(sections[..7].iter().all(|s| *s == Section::Identity));
        assert!(sections[7..14].iter().all(|s| *s == Section::Network));
        assert!(sections[14..].iter().all(|s| *s == Section::Locale));
    }

    #[test]
    fn test_boot_time_is_now_minus_uptime() {
        let now = fixed_now();
        let rows = classify_at(&snapshot(json!({"uptime": 90_061})), now);

        let expected = (now.with_timezone(&Utc) - TimeDelta::seconds(90_061))
            .format(TIME_FORMAT)
            .to_string();
        assert_eq!(row(&rows, "Boot (UTC)").value, expected);
        assert_eq!(row(&rows, "Uptime").value, "1 day, 1:01:01");
        assert_eq!(row(&rows, "Timestamp").value, "2025-05-19 12:00:00");
    }

    #[test]
    fn test_absurd_uptime_does_not_panic() {
        let rows = classify_at(&snapshot(json!({"uptime": 1e300})), fixed_now());
        assert_eq!(row(&rows, "Boot (UTC)").value, PLACEHOLDER);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let snap = snapshot(json!({"signal_level": -60, "has_update": false, "uptime": 12.5}));
        assert_eq!(classify_at(&snap, fixed_now()), classify_at(&snap, fixed_now()));
    }
}
