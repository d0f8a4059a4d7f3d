use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

fn cmd() -> Command {
    Command::cargo_bin("sec-insights").unwrap()
}

fn write_report(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn read_insights(dir: &Path) -> Value {
    let text = fs::read_to_string(dir.join("insights.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

mod absent_inputs {
    use super::*;

    #[test]
    fn test_run_with_no_reports_succeeds() {
        let dir = tempfile::tempdir().unwrap();

        cmd()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Score: 100/100 (Excellent)"));

        let insights = read_insights(dir.path());
        assert_eq!(insights["score"], 100);
        assert_eq!(insights["grade"], "Excellent");
        for tool in ["bandit", "semgrep", "pip_audit", "trivy", "zap"] {
            assert_eq!(insights["by_tool"][tool]["critical"], 0, "{tool}");
        }
        assert_eq!(insights["history"].as_array().unwrap().len(), 1);
    }
}

mod scoring {
    use super::*;

    #[test]
    fn test_end_to_end_scenario() {
        let dir = tempfile::tempdir().unwrap();
        write_report(
            dir.path(),
            "bandit-report.json",
            &json!({"results": [
                {"issue_severity": "HIGH", "test_id": "B605", "issue_text": "shell injection"}
            ]})
            .to_string(),
        );
        write_report(
            dir.path(),
            "pip-audit-report.json",
            &json!([{"name": "flask", "vulns": [{"id": "PYSEC-1", "severity": "CRITICAL"}]}])
                .to_string(),
        );

        cmd()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Score: 75/100 (Good)"))
            .stdout(predicate::str::contains("[Bandit] B605: shell injection"));

        let insights = read_insights(dir.path());
        assert_eq!(insights["counts"]["critical"], 1);
        assert_eq!(insights["counts"]["high"], 1);
        assert_eq!(insights["counts"]["medium"], 0);
        assert_eq!(insights["score"], 75);
        assert_eq!(insights["grade"], "Good");
    }

    #[test]
    fn test_json_format_emits_the_document() {
        let dir = tempfile::tempdir().unwrap();

        let output = cmd()
            .arg(dir.path())
            .args(["--format", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let printed: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(printed["score"], 100);
        assert_eq!(printed, read_insights(dir.path()));
    }
}

mod degraded_inputs {
    use super::*;

    #[test]
    fn test_malformed_trivy_does_not_abort_other_tools() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path(), "trivy-report.json", "{ not json at all");
        write_report(
            dir.path(),
            "semgrep-report.json",
            &json!({"results": [{"check_id": "rule.a", "extra": {"severity": "ERROR", "message": "bad"}}]})
                .to_string(),
        );

        cmd().arg(dir.path()).assert().success();

        let insights = read_insights(dir.path());
        assert_eq!(insights["by_tool"]["trivy"]["critical"], 0);
        assert_eq!(insights["by_tool"]["semgrep"]["high"], 1);
        assert_eq!(insights["score"], 90);
    }

    #[test]
    fn test_trivy_missing_results_key_counts_zero() {
        let dir = tempfile::tempdir().unwrap();
        write_report(
            dir.path(),
            "trivy-report.json",
            &json!({"SchemaVersion": 2}).to_string(),
        );

        cmd().arg(dir.path()).assert().success();
        assert_eq!(read_insights(dir.path())["score"], 100);
    }

    #[test]
    fn test_dependency_audit_shapes_are_synonyms() {
        let vulns = json!([{"id": "PYSEC-1", "severity": "HIGH"}]);

        let flat_dir = tempfile::tempdir().unwrap();
        write_report(
            flat_dir.path(),
            "pip-audit-report.json",
            &json!([{"name": "flask", "vulns": vulns.clone()}]).to_string(),
        );
        cmd().arg(flat_dir.path()).assert().success();

        let wrapped_dir = tempfile::tempdir().unwrap();
        write_report(
            wrapped_dir.path(),
            "pip-audit-report.json",
            &json!({"dependencies": [{"name": "flask", "vulns": vulns}]}).to_string(),
        );
        cmd().arg(wrapped_dir.path()).assert().success();

        assert_eq!(
            read_insights(flat_dir.path())["by_tool"]["pip_audit"],
            read_insights(wrapped_dir.path())["by_tool"]["pip_audit"]
        );
    }

    #[test]
    fn test_dynamic_scan_phrase_heuristic() {
        let dir = tempfile::tempdir().unwrap();
        write_report(
            dir.path(),
            "report_html.html",
            "<td>Risk Level: Medium</td><td>Risk Level: Medium</td><td>Risk Level: Low</td>",
        );

        cmd().arg(dir.path()).assert().success();

        let insights = read_insights(dir.path());
        assert_eq!(insights["by_tool"]["zap"]["medium"], 2);
        assert_eq!(insights["by_tool"]["zap"]["low"], 1);
        // 100 - 2*3 - 1 = 93
        assert_eq!(insights["score"], 93);
    }
}

mod history {
    use super::*;

    #[test]
    fn test_history_and_delta_across_runs() {
        let dir = tempfile::tempdir().unwrap();

        cmd().arg(dir.path()).assert().success();

        write_report(
            dir.path(),
            "bandit-report.json",
            &json!({"results": [{"issue_severity": "HIGH"}]}).to_string(),
        );
        cmd()
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("delta -10"));

        let insights = read_insights(dir.path());
        let history = insights["history"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["score"], 100);
        assert_eq!(history[1]["score"], 90);
    }

    #[test]
    fn test_corrupt_prior_document_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path(), "insights.json", "garbage");

        cmd().arg(dir.path()).assert().success();
        assert_eq!(read_insights(dir.path())["history"].as_array().unwrap().len(), 1);
    }
}

mod failures {
    use super::*;

    #[test]
    fn test_unwritable_output_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();

        cmd()
            .arg(dir.path())
            .args(["-o"])
            .arg(dir.path().join("no-such-dir").join("insights.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to write"));
    }
}
