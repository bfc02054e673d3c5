// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tekflow_log::{debug, info};

use crate::Result;
use crate::library::{parse_library, read_library};
use crate::metadata::{CommandMetadata, CommandParam};
use crate::normalize::normalize_header;

/// Immutable view of a command library, keyed by normalized header.
#[derive(Debug, Default)]
pub struct CommandTable {
    commands: IndexMap<String, Arc<CommandMetadata>>,
    collapsed: usize,
}

impl CommandTable {
    /// Build a table from commands in library order.
    ///
    /// Entries normalizing to the same header replace earlier ones. Libraries
    /// list write and query forms under one header on purpose.
    pub fn new<I: IntoIterator<Item = CommandMetadata>>(commands: I) -> Self {
        let mut table = IndexMap::new();
        let mut collapsed = 0;
        for command in commands {
            let header = command.header();
            if let Some(previous) = table.insert(header, Arc::new(command)) {
                debug!("Header of '{}' taken over by a later entry", previous.scpi);
                collapsed += 1;
            }
        }
        CommandTable {
            commands: table,
            collapsed,
        }
    }

    pub fn lookup(&self, command: &str) -> Option<&CommandMetadata> {
        self.commands.get(&normalize_header(command)).map(Arc::as_ref)
    }

    /// Allowed values of parameter `index`, empty if anything is missing.
    pub fn parameter_options(&self, command: &str, index: usize) -> &[String] {
        self.lookup(command)
            .and_then(|c| c.param(index))
            .map(CommandParam::options)
            .unwrap_or_default()
    }

    pub fn command_params(&self, command: &str) -> &[CommandParam] {
        self.lookup(command)
            .map(CommandMetadata::params)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of library entries that were replaced by a later entry with
    /// the same header.
    pub fn collapsed(&self) -> usize {
        self.collapsed
    }

    /// All registered headers, sorted.
    pub fn headers(&self) -> Vec<&str> {
        let mut headers: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        headers.sort_unstable();
        headers
    }

    /// Check a raw command line against the library.
    ///
    /// Arguments are matched positionally against the declared parameters.
    pub fn validate(&self, command: &str) -> Vec<ValidationIssue> {
        let Some(metadata) = self.lookup(command) else {
            return vec![ValidationIssue::UnknownCommand(normalize_header(command))];
        };
        let mut issues = vec![];
        let arguments = command.split_whitespace().skip(1);
        for (param, argument) in metadata.params().iter().zip(arguments) {
            let argument = argument.trim_matches(',');
            if !param.options().is_empty()
                && !param
                    .options()
                    .iter()
                    .any(|o| o.eq_ignore_ascii_case(argument))
            {
                issues.push(ValidationIssue::NotAnOption {
                    param: param.name.clone(),
                    value: argument.to_string(),
                });
            } else if param.param_type.is_numeric() && !is_range_mnemonic(argument) {
                match strip_unit(argument, param.unit.as_deref()).parse::<f64>() {
                    Ok(value) if !param.in_range(value) => {
                        issues.push(ValidationIssue::OutOfRange {
                            param: param.name.clone(),
                            value,
                        });
                    }
                    Ok(_) => {}
                    Err(_) => issues.push(ValidationIssue::NotANumber {
                        param: param.name.clone(),
                        value: argument.to_string(),
                    }),
                }
            }
        }
        issues
    }
}

/// `MINimum`, `MAXimum` and `DEFault`, in short or long form.
fn is_range_mnemonic(argument: &str) -> bool {
    ["MIN", "MINIMUM", "MAX", "MAXIMUM", "DEF", "DEFAULT"]
        .iter()
        .any(|m| m.eq_ignore_ascii_case(argument))
}

/// Remove a trailing `unit`, compared case-insensitively.
fn strip_unit<'a>(argument: &'a str, unit: Option<&str>) -> &'a str {
    let Some(unit) = unit.filter(|u| !u.is_empty()) else {
        return argument;
    };
    match argument.len().checked_sub(unit.len()) {
        Some(split)
            if split > 0
                && argument.is_char_boundary(split)
                && argument[split..].eq_ignore_ascii_case(unit) =>
        {
            &argument[..split]
        }
        _ => argument,
    }
}

/// Problem found when checking a raw command against the library.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    UnknownCommand(String),
    NotAnOption { param: String, value: String },
    NotANumber { param: String, value: String },
    OutOfRange { param: String, value: f64 },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::UnknownCommand(header) => {
                write!(f, "'{header}' is not in the command library")
            }
            ValidationIssue::NotAnOption { param, value } => {
                write!(f, "'{value}' is not an allowed value of '{param}'")
            }
            ValidationIssue::NotANumber { param, value } => {
                write!(f, "'{value}' is not a number, expected by '{param}'")
            }
            ValidationIssue::OutOfRange { param, value } => {
                write!(f, "{value} is outside the range of '{param}'")
            }
        }
    }
}

/// Process-wide command lookup with atomic wholesale replacement.
///
/// Readers always observe either the complete previous table or the complete
/// new one: the new table is built first and then swapped in as a whole.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    current: RwLock<Arc<CommandTable>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let registry = Self::new();
        registry.set_commands(read_library(path)?);
        Ok(registry)
    }

    /// Replace the whole registry content.
    pub fn set_commands<I: IntoIterator<Item = CommandMetadata>>(&self, commands: I) {
        let table = Arc::new(CommandTable::new(commands));
        info!(
            "Command registry loaded with {} commands ({} duplicate headers collapsed)",
            table.len(),
            table.collapsed()
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = table;
    }

    /// Replace the registry content from a JSON command library.
    ///
    /// On a parse error the current content is kept.
    pub fn load_json(&self, json: &str) -> Result<usize> {
        let commands = parse_library(json).context("Failed to load command library")?;
        self.set_commands(commands);
        Ok(self.size())
    }

    /// Current table; stays valid and unchanged across later replacements.
    pub fn snapshot(&self) -> Arc<CommandTable> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    pub fn lookup_command(&self, command: &str) -> Option<Arc<CommandMetadata>> {
        let table = self.snapshot();
        table.commands.get(&normalize_header(command)).cloned()
    }

    pub fn parameter_options(&self, command: &str, index: usize) -> Vec<String> {
        self.snapshot().parameter_options(command, index).to_vec()
    }

    pub fn command_params(&self, command: &str) -> Vec<CommandParam> {
        self.snapshot().command_params(command).to_vec()
    }

    pub fn is_populated(&self) -> bool {
        !self.snapshot().is_empty()
    }

    pub fn size(&self) -> usize {
        self.snapshot().len()
    }
}
