use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{check, env, plan, run};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

#[derive(Parser)]
#[command(name = "deploydoc")]
#[command(version = VERSION)]
#[command(about = "Run deployment test plans embedded in markdown documentation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a deploy doc and summarize its plan
    Check(check::CheckArgs),
    /// Render the plan as text, or as the structured projection with --json
    Plan(plan::PlanArgs),
    /// Report required and missing environment variables
    Env(env::EnvArgs),
    /// Execute the plan's phases
    Run(run::RunArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Plan(_) => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match response_mode(&cli.command) {
        ResponseMode::Raw => match commands::run_raw(cli.command) {
            Ok((content, exit_code)) => {
                println!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                let exit_code = err.exit_code();
                output::print_json_result(Err(err));
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        },
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(cli.command);
            output::print_json_result(json_result);
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
