// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Module for defining settings for the script generator.
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

use crate::Result;

const DEFAULT_COMMENT_PREFIX: &str = "#";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizationChange {
    pub field: &'static str,
    pub original: String,
    pub sanitized: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeGeneratorSettings {
    /// Write a comment line in place of every skipped step
    pub emit_comments: bool,
    /// Skip steps whose device type lacks the requested capability
    pub skip_unsupported: bool,
    /// Cross-check the role table against the capability table on startup
    pub check_role_table: bool,
    comment_prefix: String,
}

impl Default for CodeGeneratorSettings {
    fn default() -> Self {
        CodeGeneratorSettings {
            emit_comments: true,
            skip_unsupported: true,
            check_role_table: true,
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
        }
    }
}

impl CodeGeneratorSettings {
    pub fn new(
        emit_comments: bool,
        skip_unsupported: bool,
        check_role_table: bool,
        comment_prefix: String,
    ) -> Self {
        CodeGeneratorSettings {
            emit_comments,
            skip_unsupported,
            check_role_table,
            comment_prefix,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings = serde_json::from_str(json).context("Invalid code generator settings")?;
        Ok(settings)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn comment_prefix(&self) -> &str {
        &self.comment_prefix
    }

    pub fn sanitize(&mut self) -> Vec<SanitizationChange> {
        let mut changes = vec![];
        let reason = if self.comment_prefix.trim().is_empty() {
            Some("Comment prefix must not be empty.")
        } else if self.comment_prefix.contains(['\n', '\r']) {
            Some("Comment prefix must fit on one line.")
        } else {
            None
        };
        if let Some(reason) = reason {
            changes.push(SanitizationChange {
                field: "comment_prefix",
                original: std::mem::replace(
                    &mut self.comment_prefix,
                    DEFAULT_COMMENT_PREFIX.to_string(),
                ),
                sanitized: DEFAULT_COMMENT_PREFIX.to_string(),
                reason: reason.to_string(),
            });
        }
        changes
    }
}
