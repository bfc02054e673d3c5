// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Translate instrument workflows into control script lines
#[derive(Parser)]
#[command(name = "tekflow")]
#[command(version)]
pub struct Cli {
    /// Log diagnostics on resolution and emission decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the script body for a workflow document
    Generate {
        /// Workflow JSON file
        #[arg(short, long)]
        workflow: PathBuf,
        /// Command library used to check raw commands
        #[arg(short, long)]
        commands: Option<PathBuf>,
        /// Code generator settings JSON file
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// Override the backend named in the workflow (e.g. pyvisa, tm_devices)
        #[arg(short, long)]
        backend: Option<String>,
    },
    /// Show the library entry of an instrument command
    Lookup {
        /// Command library JSON file
        #[arg(short, long)]
        commands: PathBuf,
        /// Command, in any case, with or without arguments
        command: String,
        /// Print only the allowed values of this parameter
        #[arg(short, long)]
        param: Option<usize>,
    },
    /// List the capabilities of one or all device types
    Capabilities {
        /// Device type tag (e.g. SCOPE, SMU)
        device: Option<String>,
    },
    /// List the known roles and the device types fulfilling them
    Roles,
}
