use std::path::PathBuf;

use clap::Args;

use deploydoc::TestPlan;

#[derive(Args)]
pub struct PlanArgs {
    /// Markdown deploy doc to render
    pub file: PathBuf,

    /// Emit the structured JSON projection instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> deploydoc::Result<(String, i32)> {
    let plan = TestPlan::from_file(&args.file)?;

    let rendered = if args.json {
        plan.render_json()?
    } else {
        plan.render_text()
    };

    Ok((rendered, 0))
}
