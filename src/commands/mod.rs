use serde_json::Value;

pub type CmdResult<T> = deploydoc::Result<(T, i32)>;

pub mod check;
pub mod env;
pub mod plan;
pub mod run;

/// Dispatch a command to its handler and map the result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args))
    };
}

pub(crate) fn run_json(command: crate::Commands) -> (deploydoc::Result<Value>, i32) {
    match command {
        crate::Commands::Check(args) => dispatch!(args, check),
        crate::Commands::Env(args) => dispatch!(args, env),
        crate::Commands::Run(args) => dispatch!(args, run),

        // Plan uses raw output mode
        crate::Commands::Plan(_) => {
            let err = deploydoc::Error::Other("Plan command uses raw output mode".to_string());
            crate::output::map_cmd_result_to_json::<Value>(Err(err))
        }
    }
}

pub(crate) fn run_raw(command: crate::Commands) -> deploydoc::Result<(String, i32)> {
    match command {
        crate::Commands::Plan(args) => plan::run(args),
        _ => Err(deploydoc::Error::Other(
            "Command does not support raw output".to_string(),
        )),
    }
}
