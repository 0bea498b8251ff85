use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use deploydoc::{Phase, TestPlan};

use super::CmdResult;

#[derive(Args)]
pub struct CheckArgs {
    /// Markdown deploy doc to validate
    pub file: PathBuf,
}

#[derive(Serialize)]
pub struct CheckOutput {
    pub file: String,
    pub required_env_vars: Vec<String>,
    pub phases: Vec<PhaseSummary>,
}

#[derive(Serialize)]
pub struct PhaseSummary {
    pub phase: Phase,
    pub steps: usize,
}

pub fn run(args: CheckArgs) -> CmdResult<CheckOutput> {
    let plan = TestPlan::from_file(&args.file)?;

    let phases = Phase::ALL
        .iter()
        .map(|&phase| PhaseSummary {
            phase,
            steps: plan.steps(phase).len(),
        })
        .collect();

    Ok((
        CheckOutput {
            file: args.file.display().to_string(),
            required_env_vars: plan.required_env_vars().to_vec(),
            phases,
        },
        0,
    ))
}
