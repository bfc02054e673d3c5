// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Instrument command library lookup.
//!
//! Commands are keyed by their normalized header, see [`normalize_header`].
//! Queries never fail: a miss yields an empty result, since the registry backs
//! auto-completion in the editor.

pub mod library;
pub mod metadata;
pub mod normalize;
pub mod registry;

pub use library::{parse_library, read_library};
pub use metadata::{CommandMetadata, CommandParam, ParamType};
pub use normalize::normalize_header;
pub use registry::{CommandRegistry, CommandTable, ValidationIssue};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
