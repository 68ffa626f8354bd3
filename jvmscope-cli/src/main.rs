mod app;
mod commands;
mod output;

use anyhow::Context;
use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .context("failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    // jvmscope info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("jvmscope", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Generate {
            target,
            output,
            suffix,
            no_main,
        } => commands::generate::run(
            target,
            &commands::generate::GenerateOptions {
                output: output.as_deref(),
                suffix,
                emit_main: !*no_main,
                global: &cli.global,
            },
        ),
        Command::Info { target } => commands::info::run(target, &cli.global),
        Command::Fields { target } => commands::members::run_fields(target, &cli.global),
        Command::Methods { target } => commands::members::run_methods(target, &cli.global),
        Command::Signature { signature } => commands::signature::run(signature, &cli.global),
    }
}
