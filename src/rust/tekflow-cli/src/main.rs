// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use codegenerator::{CodeGeneratorSettings, ScriptGenerator, Workflow};
use command_registry::CommandRegistry;
use tekflow_common::{Backend, DeviceType, fulfillers, known_roles};

use crate::cli::{Cli, Commands};

/// Logger with the default `info` filter; `RUST_LOG` is applied on top.
fn logger_builder() -> env_logger::Builder {
    use std::io::Write;

    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Info);
    builder
}

fn init_logger(verbose: bool) {
    logger_builder().parse_default_env().init();
    tekflow_log::init_logging(verbose);
}

fn generate(
    workflow: &Path,
    commands: Option<&Path>,
    settings: Option<&Path>,
    backend: Option<&str>,
) -> Result<()> {
    let mut workflow = Workflow::from_path(workflow)?;
    if let Some(backend) = backend {
        workflow.backend = backend.parse::<Backend>()?;
    }
    let settings = match settings {
        Some(path) => CodeGeneratorSettings::from_path(path)?,
        None => CodeGeneratorSettings::default(),
    };
    let mut generator = ScriptGenerator::new(settings);
    if let Some(path) = commands {
        let registry = CommandRegistry::from_path(path)?;
        generator = generator.with_command_table(registry.snapshot());
    }
    println!("{}", generator.generate(&workflow));
    Ok(())
}

fn lookup(commands: &Path, command: &str, param: Option<usize>) -> Result<()> {
    let registry = CommandRegistry::from_path(commands)?;
    let metadata = registry
        .lookup_command(command)
        .with_context(|| format!("'{command}' is not in the command library"))?;
    match param {
        Some(index) => {
            for option in registry.parameter_options(command, index) {
                println!("{option}");
            }
        }
        None => println!("{}", serde_json::to_string_pretty(metadata.as_ref())?),
    }
    Ok(())
}

fn capabilities(device: Option<&str>) -> Result<()> {
    let devices = match device {
        Some(device) => vec![device.parse::<DeviceType>()?],
        None => DeviceType::ALL.to_vec(),
    };
    for device in devices {
        let tags: Vec<&str> = device.capabilities().iter().map(|c| c.as_str()).collect();
        println!("{device}: {}", tags.join(", "));
    }
    Ok(())
}

fn roles() {
    for role in known_roles() {
        let tags: Vec<&str> = fulfillers(role).iter().map(|d| d.as_str()).collect();
        println!("{role}: {}", tags.join(", "));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Generate {
            workflow,
            commands,
            settings,
            backend,
        } => generate(
            &workflow,
            commands.as_deref(),
            settings.as_deref(),
            backend.as_deref(),
        ),
        Commands::Lookup {
            commands,
            command,
            param,
        } => lookup(&commands, &command, param),
        Commands::Capabilities { device } => capabilities(device.as_deref()),
        Commands::Roles => {
            roles();
            Ok(())
        }
    }
}
