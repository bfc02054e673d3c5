// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Logging front-end shared by the workflow engine crates.
//!
//! All records are emitted through the `log` facade with a target of the form
//! `tekflow.rust::<module path>`, so that the host can filter engine output
//! independently from its own.

use std::sync::atomic::{AtomicBool, Ordering};

#[doc(hidden)]
pub use log as _log;

#[doc(hidden)]
#[macro_export]
macro_rules! __record {
    ($level:ident, $($arg:tt)+) => {
        $crate::_log::$level!(target: concat!("tekflow.rust::", module_path!()), $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::__record!(info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::__record!(warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::__record!(debug, $($arg)+)
    };
}

/// Log at info level, only when diagnostics are switched on.
#[macro_export]
macro_rules! diagnostic {
    ($($arg:tt)+) => {
        if $crate::is_diagnostics_enabled() {
            $crate::__record!(info, $($arg)+)
        }
    };
}

static DIAGNOSTICS: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn is_diagnostics_enabled() -> bool {
    DIAGNOSTICS.load(Ordering::Relaxed)
}

/// Switch diagnostics logging on or off.
///
/// No logger is installed here; the binary picks format and destination.
pub fn init_logging(with_diagnostics: bool) {
    DIAGNOSTICS.store(with_diagnostics, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_flag() {
        init_logging(true);
        assert!(is_diagnostics_enabled());
        init_logging(false);
        assert!(!is_diagnostics_enabled());
        // Expands to nothing observable while disabled
        diagnostic!("never shown {}", 1);
        info!("plain {}", "record");
    }
}
