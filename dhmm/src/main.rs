mod args;
mod query;
mod util;

use std::io::Write;

use args::{Cli, SubCommands};
use util::init_logging;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    color_backtrace::install();

    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        SubCommands::Show(args) => query::show(&args, &mut out)?,
        SubCommands::Forward(args) => query::forward(&args, &mut out)?,
        SubCommands::Backward(args) => query::backward(&args, &mut out)?,
        SubCommands::Posterior(args) => query::posterior(&args, &mut out)?,
        SubCommands::Viterbi(args) => query::viterbi(&args, &mut out)?,
        SubCommands::Sample(args) => query::sample(&args, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
