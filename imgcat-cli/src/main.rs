// ABOUTME: Main entry point for the imgcat command
// ABOUTME: Displays image files or stdin inline in the terminal, through tmux when needed

use anyhow::Result;
use clap::{CommandFactory, Parser};
use imgcat_cli::cli::Cli;
use imgcat_cli::cli_output::CliOutput;
use imgcat_cli::completions::write_completions;
use imgcat_cli::config::{Config, ForcedProtocol};
use imgcat_cli::input::{self, InputPlan};
use imgcat_cli::options::RenderOptions;
use imgcat_cli::render::{Outcome, clear_images, render_source};
use imgcat_cli::sizing;
use imgcat_core::{ImgcatError, TransportContext};
use std::io::{self, IsTerminal, Write};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Exit status for a failed run: the OS error code when there is one
fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<io::Error>())
        .and_then(io::Error::raw_os_error)
        .unwrap_or(1)
}

fn help_text(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ImgcatError>())
        .and_then(ImgcatError::help_text)
}

fn show(
    source: &input::ImageSource,
    options: &RenderOptions,
    output: &CliOutput,
    stdout: &mut impl Write,
) -> Result<()> {
    // Re-read per image: the terminal may change between invocations
    let context = TransportContext::from_env();
    let outcome = render_source(source, options, &context, sizing::terminal_rows(), stdout)?;

    match outcome {
        Outcome::Shown(bytes) => log::debug!("Wrote {} bytes for {}", bytes, source.display_name()),
        Outcome::Placeholder(reason) => output.warning(&format!(
            "{}: {} ({})",
            source.display_name(),
            reason,
            context.terminal_family
        )),
        Outcome::Described => {}
    }
    Ok(())
}

fn run(cli: Cli, output: &CliOutput) -> Result<()> {
    if let Some(shell) = cli.completions {
        write_completions(shell, &mut io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let options = RenderOptions::resolve(&cli, &config, ForcedProtocol::from_env());
    log::debug!("Render options: {:?}", options);

    if cli.clear {
        let context = TransportContext::from_env();
        if let Outcome::Placeholder(reason) =
            clear_images(&options, &context, &mut io::stdout().lock())?
        {
            output.warning(&format!("{} ({})", reason, context.terminal_family));
        }
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    match input::plan_inputs(&cli.inputs, io::stdin().is_terminal())? {
        InputPlan::Help => {
            Cli::command().print_help()?;
        }
        InputPlan::Stdin => {
            let source = input::read_stdin(io::stdin().lock())?;
            show(&source, &options, output, &mut stdout)?;
        }
        InputPlan::Files(paths) => {
            for path in paths {
                let source = input::read_file(&path)?;
                show(&source, &options, output, &mut stdout)?;
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = CliOutput::new();
    if let Err(err) = run(cli, &output) {
        output.error(&format!("{:#}", err));
        if let Some(help) = help_text(&err) {
            output.hint(help);
        }
        std::process::exit(exit_code(&err));
    }
}
