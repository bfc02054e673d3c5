// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Command-pattern generation.
//!
//! A pattern is a single line of script text calling into the device variable.
//! Where the operation takes a value, the line contains [`VALUE_TOKEN`], which
//! the caller substitutes textually with the step's parameter value.
//!
//! The emitter does not check whether the device supports the capability;
//! callers filter with the capability table first. Every input yields a
//! non-empty line.

use std::fmt;
use tekflow_common::{Backend, Capability, DeviceType};
use tekflow_log::diagnostic;

use crate::resolver::{ImplementationMethod, implementation_method};

/// Placeholder for the current parameter value inside a pattern.
pub const VALUE_TOKEN: &str = "{value}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPattern {
    text: String,
    method: ImplementationMethod,
    generic: bool,
}

impl CommandPattern {
    fn high_level(text: String) -> Self {
        CommandPattern {
            text,
            method: ImplementationMethod::HighLevelApi,
            generic: false,
        }
    }

    fn raw(text: String, generic: bool) -> Self {
        CommandPattern {
            text,
            method: ImplementationMethod::RawProtocol,
            generic,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The dispatch path the line was actually written for.
    ///
    /// Differs from the resolver decision when no high-level call shape
    /// exists for the device type.
    pub fn method(&self) -> ImplementationMethod {
        self.method
    }

    /// Whether this is the generic placeholder write, which sends the
    /// parameter value as a raw instrument command.
    pub fn is_generic(&self) -> bool {
        self.generic
    }

    pub fn uses_value(&self) -> bool {
        self.text.contains(VALUE_TOKEN)
    }

    /// Whether rendering with `value` would leave the value token in the line.
    pub fn is_missing_value(&self, value: Option<&str>) -> bool {
        value.is_none() && self.uses_value()
    }

    /// Substitute `value` for the value token.
    ///
    /// Without a value the pattern is returned unchanged.
    pub fn render(&self, value: Option<&str>) -> String {
        match value {
            Some(value) => self.text.replace(VALUE_TOKEN, value),
            None => self.text.clone(),
        }
    }
}

impl fmt::Display for CommandPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Vendor-binding call for the pair, if the binding covers it.
fn high_level_shape(device_type: DeviceType, capability: Capability, name: &str) -> Option<String> {
    match capability {
        Capability::SetVoltage => match device_type {
            DeviceType::Smu => Some(format!(
                "{name}.commands.smu[\"a\"].source.levelv = {{value}}"
            )),
            _ => None,
        },
        Capability::SetCurrent => match device_type {
            DeviceType::Smu => Some(format!(
                "{name}.commands.smu[\"a\"].source.leveli = {{value}}"
            )),
            _ => None,
        },
        Capability::MeasureVoltage => match device_type {
            DeviceType::Smu => Some(format!("{name}.commands.smu[\"a\"].measure.v()")),
            _ => None,
        },
        Capability::MeasureCurrent => match device_type {
            DeviceType::Smu => Some(format!("{name}.commands.smu[\"a\"].measure.i()")),
            _ => None,
        },
        Capability::EnableOutput => match device_type {
            DeviceType::Smu => Some(format!(
                "{name}.commands.smu[\"a\"].source.output = {{value}}"
            )),
            DeviceType::Afg | DeviceType::Awg => Some(format!(
                "{name}.commands.output[1].state.write(\"{{value}}\")"
            )),
            _ => None,
        },
        Capability::AcquireWaveform => match device_type {
            DeviceType::Scope => Some(format!("{name}.curve_query({{value}})")),
            _ => None,
        },
        Capability::SaveWaveform => match device_type {
            DeviceType::Scope => Some(format!(
                "{name}.commands.save.waveform.write(\"{{value}}\")"
            )),
            _ => None,
        },
        Capability::SaveScreenshot => match device_type {
            DeviceType::Scope => Some(format!("{name}.save_screenshot(\"{{value}}\")")),
            _ => None,
        },
        Capability::GenerateSignal => match device_type {
            DeviceType::Afg | DeviceType::Awg => {
                Some(format!("{name}.generate_function({{value}})"))
            }
            _ => None,
        },
        Capability::MeasureFrequency | Capability::MeasureAmplitude => None,
    }
}

/// Raw protocol command for the capability, independent of the device type.
///
/// Returns the text and whether it is the generic placeholder write.
fn raw_shape(capability: Capability, name: &str) -> (String, bool) {
    match capability {
        Capability::SetVoltage => (format!("{name}.write(\"SOURce:VOLTage {{value}}\")"), false),
        Capability::EnableOutput => (format!("{name}.write(\"OUTPut:STATe {{value}}\")"), false),
        Capability::MeasureCurrent => (format!("{name}.query(\"MEASure:CURRent?\")"), false),
        Capability::MeasureVoltage => (format!("{name}.query(\"MEASure:VOLTage?\")"), false),
        Capability::SetCurrent
        | Capability::AcquireWaveform
        | Capability::SaveWaveform
        | Capability::SaveScreenshot
        | Capability::GenerateSignal
        | Capability::MeasureFrequency
        | Capability::MeasureAmplitude => (format!("{name}.write(\"{{value}}\")"), true),
    }
}

/// Produce the script line for `capability` on the device variable
/// `device_name`.
///
/// When the high-level path is selected but the binding has no call shape for
/// the pair, the raw command is written against the same device variable.
pub fn command_pattern(
    device_type: DeviceType,
    capability: Capability,
    backend: Backend,
    device_name: &str,
) -> CommandPattern {
    if implementation_method(device_type, capability, backend) == ImplementationMethod::HighLevelApi
    {
        if let Some(text) = high_level_shape(device_type, capability, device_name) {
            return CommandPattern::high_level(text);
        }
        diagnostic!(
            "No high-level call for '{}' on {}, falling back to a raw command",
            capability,
            device_type
        );
    }
    let (text, generic) = raw_shape(capability, device_name);
    CommandPattern::raw(text, generic)
}
