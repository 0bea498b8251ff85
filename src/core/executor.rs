//! Phased execution with environment validation and guaranteed cleanup.
//!
//! Phases and steps run strictly sequentially. A step blocks until its
//! shell command completes; no timeout is enforced.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::phase::Phase;
use crate::test_plan::{Step, TestPlan};
use crate::utils::command;

/// Terminal outcome of a plan run.
///
/// `Failed` records a caught protected-region failure; cleanup has already
/// run by the time it is returned. Fatal conditions (missing environment,
/// pre-install failure, cleanup failure) surface as errors instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    Succeeded,
    Failed {
        phase: Phase,
        step: String,
        message: String,
    },
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }
}

/// Run every phase of `plan` in pipeline order.
///
/// Missing required environment variables abort before any phase runs.
/// A pre-install failure propagates without cleanup, since no
/// infrastructure exists yet. Failures in create-infrastructure or
/// run-tests are caught so that destroy-infrastructure always runs;
/// destroy failing is its own fatal error because infrastructure may have
/// been left behind.
pub fn execute(plan: &TestPlan) -> Result<RunOutcome> {
    let missing = plan.missing_env_vars();
    if !missing.is_empty() {
        return Err(Error::MissingEnv { names: missing });
    }

    execute_phase(plan, Phase::PreInstall)?;

    let protected = execute_phase(plan, Phase::CreateInfrastructure)
        .and_then(|()| execute_phase(plan, Phase::RunTests));

    // Cleanup runs on every path out of the protected region.
    if let Err(cleanup_err) = execute_phase(plan, Phase::DestroyInfrastructure) {
        return Err(Error::CleanupFailure {
            source: Box::new(cleanup_err),
        });
    }

    match protected {
        Ok(()) => Ok(RunOutcome::Succeeded),
        Err(Error::StepExecution {
            phase,
            step,
            detail,
        }) => {
            log_status!("run", "Test run failed: {} ({})", step, detail);
            Ok(RunOutcome::Failed {
                phase,
                step,
                message: detail,
            })
        }
        Err(other) => Err(other),
    }
}

fn execute_phase(plan: &TestPlan, phase: Phase) -> Result<()> {
    log_status!("run", "Executing phase {}", phase);

    for step in plan.steps(phase) {
        run_step(phase, step)?;
    }

    Ok(())
}

fn run_step(phase: Phase, step: &Step) -> Result<()> {
    log_status!("run", "Running step {}", step.full_name());

    let status = match command::run_shell(&step.shell) {
        Ok(status) => status,
        Err(err) => {
            return Err(Error::StepExecution {
                phase,
                step: step.full_name(),
                detail: err.to_string(),
            })
        }
    };

    if !status.success() {
        let detail = match status.code() {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        return Err(Error::StepExecution {
            phase,
            step: step.full_name(),
            detail,
        });
    }

    Ok(())
}
