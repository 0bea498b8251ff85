use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use deploydoc::TestPlan;

use super::CmdResult;

#[derive(Args)]
pub struct EnvArgs {
    /// Markdown deploy doc to inspect
    pub file: PathBuf,
}

#[derive(Serialize)]
pub struct EnvOutput {
    pub file: String,
    pub required: Vec<String>,
    pub missing: Vec<String>,
    pub satisfied: bool,
}

pub fn run(args: EnvArgs) -> CmdResult<EnvOutput> {
    let plan = TestPlan::from_file(&args.file)?;
    let missing = plan.missing_env_vars();
    let satisfied = missing.is_empty();

    // Same exit code as a run aborted on missing environment, so scripts
    // can pre-flight a doc without executing anything.
    let exit_code = if satisfied { 0 } else { 3 };

    Ok((
        EnvOutput {
            file: args.file.display().to_string(),
            required: plan.required_env_vars().to_vec(),
            missing,
            satisfied,
        },
        exit_code,
    ))
}
