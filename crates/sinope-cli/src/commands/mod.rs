// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations for the `sinope` CLI.

pub mod check;
pub mod repl;
