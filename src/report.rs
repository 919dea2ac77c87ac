//! Purpose: JSON and text renderings of probe reports for the `linkprobe` CLI.
//! Exports: `report_json`, `summary_json`, `failure_lines`, `report_time_now`.
//! Role: Keep the report envelope shape in one place.
//! Invariants: Stable key names; `message` is present only for failed probes.
//! Invariants: Text mode emits only failure diagnostics, matching the standalone probes.

use std::time::{SystemTime, UNIX_EPOCH};

use linkprobe::core::probe::ProbeReport;
use serde_json::{Map, Value, json};

pub(crate) fn report_json(report: &ProbeReport) -> Value {
    let mut map = Map::new();
    map.insert("probe".to_string(), json!(report.probe));
    map.insert("ok".to_string(), json!(report.ok));
    map.insert("status".to_string(), json!(report.status));
    if let Some(message) = &report.message {
        map.insert("message".to_string(), json!(message));
    }
    map.insert(
        "library_version".to_string(),
        json!(report.library_version),
    );
    map.insert("elapsed_us".to_string(), json!(report.elapsed_us));
    Value::Object(map)
}

pub(crate) fn summary_json(reports: &[ProbeReport], time: Option<&str>) -> Value {
    let mut map = Map::new();
    map.insert(
        "probes".to_string(),
        Value::Array(reports.iter().map(report_json).collect()),
    );
    map.insert("ok".to_string(), json!(reports.iter().all(|r| r.ok)));
    if let Some(time) = time {
        map.insert("time".to_string(), json!(time));
    }
    Value::Object(map)
}

pub(crate) fn failure_lines(reports: &[ProbeReport]) -> Vec<String> {
    reports
        .iter()
        .filter(|report| !report.ok)
        .map(|report| {
            report
                .message
                .clone()
                .unwrap_or_else(|| format!("{}: probe failed", report.probe))
        })
        .collect()
}

pub(crate) fn report_time_now() -> Option<String> {
    use time::format_description::well_known::Rfc3339;
    let duration = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let ts = time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()?;
    ts.format(&Rfc3339).ok()
}

#[cfg(test)]
mod tests {
    use linkprobe::core::probe::{ProbeKind, ProbeReport};

    use super::{failure_lines, report_json, report_time_now, summary_json};

    fn passed() -> ProbeReport {
        ProbeReport {
            probe: ProbeKind::Compression,
            ok: true,
            status: 0,
            message: None,
            library_version: "1.3.1".to_string(),
            elapsed_us: 12,
        }
    }

    fn failed() -> ProbeReport {
        ProbeReport {
            probe: ProbeKind::Resolver,
            ok: false,
            status: 15,
            message: Some("ares_library_init: Out of memory".to_string()),
            library_version: "1.34.5".to_string(),
            elapsed_us: 40,
        }
    }

    #[test]
    fn report_json_omits_message_on_success() {
        let value = report_json(&passed());
        assert_eq!(value["probe"], "zlib");
        assert_eq!(value["ok"], true);
        assert_eq!(value["status"], 0);
        assert!(value.get("message").is_none());
        assert_eq!(value["library_version"], "1.3.1");
        assert_eq!(value["elapsed_us"], 12);
    }

    #[test]
    fn summary_is_not_ok_when_any_probe_failed() {
        let value = summary_json(&[passed(), failed()], Some("2026-02-01T00:00:00Z"));
        assert_eq!(value["ok"], false);
        assert_eq!(value["time"], "2026-02-01T00:00:00Z");
        let probes = value["probes"].as_array().expect("probes array");
        assert_eq!(probes.len(), 2);
        assert_eq!(probes[1]["probe"], "c-ares");
        assert_eq!(probes[1]["message"], "ares_library_init: Out of memory");
    }

    #[test]
    fn summary_of_passing_probes_is_ok() {
        let value = summary_json(&[passed()], None);
        assert_eq!(value["ok"], true);
        assert!(value.get("time").is_none());
    }

    #[test]
    fn failure_lines_skip_passing_probes() {
        assert!(failure_lines(&[passed()]).is_empty());
        assert_eq!(
            failure_lines(&[passed(), failed()]),
            vec!["ares_library_init: Out of memory".to_string()]
        );
    }

    #[test]
    fn report_time_is_rfc3339() {
        let time = report_time_now().expect("time");
        assert!(time.contains('T'));
        assert!(time.ends_with('Z'));
    }
}
