//! Test plan construction and its pure projections.

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yml::{Mapping, Value};

use crate::annotation::{self, LineSpan};
use crate::error::{Error, Result};
use crate::metadata;
use crate::phase::Phase;
use crate::utils::io;

const REQUIRE_ENV_KIND: &str = "require-env";

/// One executable shell block assigned to a phase. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub source_name: String,
    pub line_span: LineSpan,
    pub shell: String,
}

impl Step {
    /// Identity used in diagnostics: `source:start..end`.
    pub fn full_name(&self) -> String {
        format!("{}:{}", self.source_name, self.line_span)
    }
}

/// Immutable deployment test plan built from a markdown document.
///
/// Built once via `from_document` (or `from_file`), then only read: the
/// executor consumes it for a single run, and the projections below can be
/// rendered any number of times.
#[derive(Debug, Clone)]
pub struct TestPlan {
    metadata: Mapping,
    required_env_vars: Vec<String>,
    steps_in_phases: BTreeMap<Phase, Vec<Step>>,
}

impl TestPlan {
    /// Read `path` and build a plan from its contents, using the path as
    /// the source name in diagnostics.
    pub fn from_file(path: &Path) -> Result<TestPlan> {
        let content = io::read_file(path)?;
        Self::from_document(&content, &path.to_string_lossy())
    }

    /// Build a plan from a document's full text.
    ///
    /// Fails with `Error::Metadata` when the front matter cannot be decoded
    /// and with `Error::Configuration` when it does not carry
    /// `deployDoc: true`.
    pub fn from_document(text: &str, file_name: &str) -> Result<TestPlan> {
        let metadata = metadata::parse_metadata(text, file_name)?;

        if metadata.get("deployDoc") != Some(&Value::Bool(true)) {
            return Err(Error::Configuration {
                file: file_name.to_string(),
            });
        }

        let annotations = annotation::parse(text, file_name);

        let required_env_vars = annotations
            .iter()
            .filter(|a| a.kind == REQUIRE_ENV_KIND)
            .flat_map(|a| a.params.iter().cloned())
            .collect();

        let steps_in_phases = Phase::ALL
            .iter()
            .map(|&phase| {
                let steps = annotations
                    .iter()
                    .filter(|a| a.kind == phase.as_str())
                    .map(|a| Step {
                        source_name: a.source_name.clone(),
                        line_span: a.line_span,
                        shell: a.content.clone(),
                    })
                    .collect();
                (phase, steps)
            })
            .collect();

        Ok(TestPlan {
            metadata,
            required_env_vars,
            steps_in_phases,
        })
    }

    pub fn metadata(&self) -> &Mapping {
        &self.metadata
    }

    /// Declared required variables, first-seen order, duplicates preserved.
    pub fn required_env_vars(&self) -> &[String] {
        &self.required_env_vars
    }

    /// Steps assigned to `phase`, in document order.
    pub fn steps(&self, phase: Phase) -> &[Step] {
        self.steps_in_phases
            .get(&phase)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Required variables absent from the process environment, in
    /// declaration order.
    pub fn missing_env_vars(&self) -> Vec<String> {
        self.required_env_vars
            .iter()
            .filter(|name| env::var_os(name).is_none())
            .cloned()
            .collect()
    }

    /// Human-readable projection of the plan.
    pub fn render_text(&self) -> String {
        let mut parts = vec![
            "Deployment test plan:".to_string(),
            String::new(),
            "Required environment parameters:".to_string(),
        ];

        for name in &self.required_env_vars {
            parts.push(format!("  - {}", name));
        }

        for phase in Phase::ALL {
            parts.push(format!("Steps in phase {}:", phase));
            for step in self.steps(phase) {
                parts.push(format!("- {}", step.full_name()));
                parts.push(step.shell.clone());
            }
        }

        parts.join("\n")
    }

    /// Structured projection covering all four phases in pipeline order.
    pub fn structured(&self) -> StructuredPlan {
        let records = |phase: Phase| {
            self.steps(phase)
                .iter()
                .map(|step| StepRecord {
                    line_span: step.line_span.to_string(),
                    shell: step.shell.trim().to_string(),
                })
                .collect()
        };

        StructuredPlan {
            pre_install: records(Phase::PreInstall),
            create_infrastructure: records(Phase::CreateInfrastructure),
            run_tests: records(Phase::RunTests),
            destroy_infrastructure: records(Phase::DestroyInfrastructure),
        }
    }

    /// Serialize the structured projection as pretty-printed JSON.
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.structured())?)
    }
}

/// JSON-facing projection: one entry per phase, field order is pipeline
/// order (struct serialization preserves it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredPlan {
    #[serde(rename = "pre-install")]
    pub pre_install: Vec<StepRecord>,
    #[serde(rename = "create-infrastructure")]
    pub create_infrastructure: Vec<StepRecord>,
    #[serde(rename = "run-tests")]
    pub run_tests: Vec<StepRecord>,
    #[serde(rename = "destroy-infrastructure")]
    pub destroy_infrastructure: Vec<StepRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub line_span: String,
    pub shell: String,
}
