mod cli;

use std::process::ExitCode;

use clap::Parser;
use yansi::Paint;

use crate::cli::Cli;

fn main() -> ExitCode {
    yansi::whenever(yansi::Condition::STDOUTERR_ARE_TTY);

    let cli = Cli::parse();

    match cli.run() {
        Err(err) => {
            let root = err.root_cause();

            eprintln!("{} {}", "Error:".red().bold(), err.red());
            eprintln!();
            eprintln!("Caused by:");
            eprintln!("  {}", root.red());
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::from(0),
    }
}
