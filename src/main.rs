use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use intact::cli::{Cli, Mode};
use intact::output::{self, Verbosity};
use intact::{IntactContext, commands, logging};
use std::io;
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            process::exit(code);
        }
    };

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let code = match cli.mode() {
        Some(Mode::Completions(shell)) => {
            print_completions(shell, &mut Cli::command());
            0
        }
        Some(Mode::Generate { directory, list }) => {
            commands::generate::execute(&setup(cli)?, &directory, &list)?;
            0
        }
        Some(Mode::Verify { directory, list }) => {
            let result = commands::verify::execute(&setup(cli)?, &directory, &list)?;
            i32::from(!result.is_pass())
        }
        Some(Mode::Check { list }) => {
            commands::check::execute(&setup(cli)?, &list)?;
            0
        }
        None => anyhow::bail!("No mode selected (use -g, -v or -c)"),
    };

    Ok(code)
}

/// Load configuration and install output settings and the log subscriber.
fn setup(cli: &Cli) -> Result<IntactContext> {
    if cli.quiet {
        output::set_verbosity(Verbosity::Quiet);
    }

    let ctx = IntactContext::new(cli.config.as_deref())?;
    if !ctx.config.logging.color {
        colored::control::set_override(false);
    }
    logging::init_logging(&ctx.config.logging, cli.log_level.as_deref())?;

    Ok(ctx)
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
