//! End-to-end pipeline: document text -> plan -> projections -> execution.

use std::fs;

use tempfile::TempDir;

use deploydoc::{execute, Error, Phase, RunOutcome, StructuredPlan, TestPlan};

/// The worked example: four phases, one step each, a required variable
/// that is present, and a failing test step.
fn example_doc(trace_path: &str) -> String {
    format!(
        "\
---
deployDoc: true
---
# Example stack

<!-- deploy-doc require-env PATH -->
```
export PATH=...
```

<!-- deploy-doc pre-install -->
```
echo pre >> {trace}
```

<!-- deploy-doc create-infrastructure -->
```
echo create >> {trace}
```

<!-- deploy-doc run-tests -->
```
exit 1
```

<!-- deploy-doc destroy-infrastructure -->
```
echo destroy >> {trace}
```
",
        trace = trace_path
    )
}

fn trace(dir: &TempDir) -> Vec<String> {
    let path = dir.path().join("trace");
    if !path.exists() {
        return Vec::new();
    }
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn failing_tests_still_clean_up_and_report_failed() {
    let dir = TempDir::new().unwrap();
    let doc = example_doc(&dir.path().join("trace").display().to_string());
    let plan = TestPlan::from_document(&doc, "example.md").unwrap();

    let outcome = execute(&plan).unwrap();

    match outcome {
        RunOutcome::Failed { phase, .. } => assert_eq!(phase, Phase::RunTests),
        RunOutcome::Succeeded => panic!("expected Failed"),
    }
    // All phases before the failure ran, the failing phase was attempted,
    // and cleanup still happened.
    assert_eq!(trace(&dir), ["pre", "create", "destroy"]);
}

#[test]
fn structured_projection_round_trips_through_json() {
    let dir = TempDir::new().unwrap();
    let doc = example_doc(&dir.path().join("trace").display().to_string());
    let plan = TestPlan::from_document(&doc, "example.md").unwrap();

    let json = plan.render_json().unwrap();
    let decoded: StructuredPlan = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded, plan.structured());
    assert_eq!(decoded.run_tests.len(), 1);
    assert_eq!(decoded.run_tests[0].shell, "exit 1");
}

#[test]
fn text_and_json_projections_do_not_execute_anything() {
    let dir = TempDir::new().unwrap();
    let doc = example_doc(&dir.path().join("trace").display().to_string());
    let plan = TestPlan::from_document(&doc, "example.md").unwrap();

    let _ = plan.render_text();
    let _ = plan.render_json().unwrap();

    assert!(trace(&dir).is_empty());
}

#[test]
fn missing_required_variable_runs_nothing() {
    let dir = TempDir::new().unwrap();
    let trace_path = dir.path().join("trace").display().to_string();
    let doc = example_doc(&trace_path).replace(
        "require-env PATH",
        "require-env DEPLOYDOC_PIPELINE_UNSET_F00D",
    );
    let plan = TestPlan::from_document(&doc, "example.md").unwrap();

    let err = execute(&plan).unwrap_err();
    match err {
        Error::MissingEnv { names } => {
            assert_eq!(names, ["DEPLOYDOC_PIPELINE_UNSET_F00D"])
        }
        other => panic!("expected MissingEnv, got {:?}", other),
    }
    assert!(trace(&dir).is_empty());
}

#[test]
fn document_without_activation_flag_builds_no_plan() {
    let doc = "---\ndeployDoc: false\n---\n";
    let err = TestPlan::from_document(doc, "example.md").unwrap_err();
    assert_eq!(err.code(), "CONFIG_ERROR");
}

#[test]
fn plan_reports_step_spans_that_point_into_the_document() {
    let dir = TempDir::new().unwrap();
    let doc = example_doc(&dir.path().join("trace").display().to_string());
    let plan = TestPlan::from_document(&doc, "example.md").unwrap();

    let step = &plan.steps(Phase::PreInstall)[0];
    let (start, end) = (step.line_span.start, step.line_span.end);
    let lines: Vec<&str> = doc.lines().collect();

    // 1-based, fence to fence inclusive.
    assert!(lines[start - 1].starts_with("```"));
    assert!(lines[end - 1].starts_with("```"));
    assert!(lines[start].contains("echo pre"));
}
