// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Sinope command-line interface.
//!
//! This is the main entry point for the `sinope` command.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use miette::Result;

mod commands;
mod kernel;

/// Sinope: a small experimental language with message chains and
/// keyword-argument calls
#[derive(Debug, Parser)]
#[command(name = "sinope")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive session
    Repl,

    /// Parse a source file and print the syntax tree
    Check {
        /// Source file to parse (reads stdin when omitted)
        path: Option<Utf8PathBuf>,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Repl => commands::repl::run(kernel::EchoEvaluator),
        Command::Check { path } => commands::check::check(path.as_deref()),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
