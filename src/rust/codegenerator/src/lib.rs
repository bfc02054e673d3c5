// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Translation of workflow steps into instrument-control script lines.
//!
//! The [`resolver`] decides per step whether the vendor high-level API or a
//! raw protocol command is used, the [`emitter`] turns that decision into a
//! line of script text, and the [`generator`] walks a whole workflow.

pub mod device_context;
pub mod emitter;
pub mod generator;
pub mod resolver;
mod settings;
pub mod workflow;

pub use device_context::parse_device_context;
pub use emitter::{CommandPattern, VALUE_TOKEN, command_pattern};
pub use generator::{ScriptBody, ScriptGenerator};
pub use resolver::{ImplementationMethod, implementation_method};
pub use settings::{CodeGeneratorSettings, SanitizationChange};
pub use workflow::{ResolvedStep, Workflow, WorkflowStep};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
