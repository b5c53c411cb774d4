// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Interactive read-eval-print loop.
//!
//! The loop reads lines with `rustyline`, buffers them until
//! [`is_input_complete`] says the input forms a whole unit, hands the text
//! to the configured [`Evaluator`] strategy, and prints the result through
//! [`repr`]. Ctrl-C discards the current buffer; Ctrl-D ends the session.

use miette::{IntoDiagnostic, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use sinope_core::is_input_complete;

use crate::kernel::{repr, Evaluator, BANNER, LANGUAGE, LANGUAGE_VERSION};

/// Runs the REPL until end of input.
pub fn run(mut evaluator: impl Evaluator) -> Result<()> {
    println!("{BANNER}");
    println!("{LANGUAGE} {LANGUAGE_VERSION} — Ctrl-D to exit");

    let mut editor = DefaultEditor::new().into_diagnostic()?;
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() {
            "sinope> "
        } else {
            "   ...> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                if !is_input_complete(&buffer) {
                    continue;
                }

                let input = std::mem::take(&mut buffer);
                if input.trim().is_empty() {
                    continue;
                }

                let _ = editor.add_history_entry(input.as_str());
                debug!(bytes = input.len(), "evaluating input");
                let result = evaluator.evaluate(&input);
                println!("{}", repr(&result));
            }
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error).into_diagnostic(),
        }
    }

    Ok(())
}
