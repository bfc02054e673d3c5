// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Reading command libraries from JSON.
//!
//! Three layouts are accepted: a bare array of commands, an object with a
//! `commands` array, or an object with named `groups` each holding a
//! `commands` array.

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::Result;
use crate::metadata::CommandMetadata;

#[derive(Deserialize)]
struct CommandGroup {
    #[serde(default)]
    commands: Vec<CommandMetadata>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LibraryDocument {
    Commands(Vec<CommandMetadata>),
    Flat {
        commands: Vec<CommandMetadata>,
    },
    Grouped {
        groups: IndexMap<String, CommandGroup>,
    },
}

impl LibraryDocument {
    fn into_commands(self) -> Vec<CommandMetadata> {
        match self {
            LibraryDocument::Commands(commands) | LibraryDocument::Flat { commands } => commands,
            LibraryDocument::Grouped { groups } => groups
                .into_iter()
                .flat_map(|(name, group)| {
                    group.commands.into_iter().map(move |mut command| {
                        if command.category.is_empty() {
                            command.category.clone_from(&name);
                        }
                        command
                    })
                })
                .collect(),
        }
    }
}

/// Parse a JSON command library, keeping library order.
pub fn parse_library(json: &str) -> Result<Vec<CommandMetadata>> {
    let document: LibraryDocument = serde_json::from_str(json).context(
        "Expected a list of commands, an object with 'commands', or an object with 'groups'",
    )?;
    Ok(document.into_commands())
}

pub fn read_library<P: AsRef<Path>>(path: P) -> Result<Vec<CommandMetadata>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read command library '{}'", path.display()))?;
    let commands = parse_library(&json)
        .with_context(|| format!("Invalid command library '{}'", path.display()))?;
    Ok(commands)
}
