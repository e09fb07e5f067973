#![allow(clippy::print_stderr)]

use clap::Parser;
use std::process::ExitCode;

use typerel_cli::args::CliArgs;
use typerel_cli::{driver, tracing_config};

/// Exit status, grep style: a "no" answer is not a failure to answer.
const EXIT_POSITIVE: u8 = 0;
const EXIT_NEGATIVE: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    // Only initialised when TYPEREL_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let rendered = driver::run(&args).and_then(|outcome| {
        let text = outcome.render(args.format)?;
        Ok((outcome.is_positive(), text))
    });

    match rendered {
        Ok((positive, text)) => {
            println!("{text}");
            ExitCode::from(if positive { EXIT_POSITIVE } else { EXIT_NEGATIVE })
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
