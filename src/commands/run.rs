use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use deploydoc::{executor, RunOutcome, TestPlan};

use super::CmdResult;

#[derive(Args)]
pub struct RunArgs {
    /// Markdown deploy doc to execute
    pub file: PathBuf,
}

#[derive(Serialize)]
pub struct RunOutput {
    pub file: String,
    #[serde(flatten)]
    pub outcome: RunOutcome,
}

pub fn run(args: RunArgs) -> CmdResult<RunOutput> {
    let plan = TestPlan::from_file(&args.file)?;
    let outcome = executor::execute(&plan)?;
    let exit_code = if outcome.success() { 0 } else { 1 };

    Ok((
        RunOutput {
            file: args.file.display().to_string(),
            outcome,
        },
        exit_code,
    ))
}
