// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use command_registry::CommandTable;
use tekflow_common::{
    ConnectedDevice, DeviceType, can_fulfill_role, check_role_consistency, has_capability,
    select_device_for_role,
};
use tekflow_log::{diagnostic, info, warn};

use crate::device_context::parse_device_context;
use crate::emitter::{VALUE_TOKEN, command_pattern};
use crate::settings::CodeGeneratorSettings;
use crate::workflow::{ResolvedStep, Workflow, WorkflowStep};

/// Generated script lines, one per emitted step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBody {
    lines: Vec<String>,
}

impl ScriptBody {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ScriptBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// A device variable together with the type it is driven as.
#[derive(Debug, Clone, Copy)]
struct Target<'a> {
    name: &'a str,
    device_type: DeviceType,
}

pub struct ScriptGenerator {
    settings: CodeGeneratorSettings,
    table: Option<Arc<CommandTable>>,
}

impl ScriptGenerator {
    pub fn new(mut settings: CodeGeneratorSettings) -> Self {
        for change in settings.sanitize() {
            warn!(
                "Setting '{}' changed from '{}' to '{}': {}",
                change.field,
                change.original.escape_debug(),
                change.sanitized,
                change.reason
            );
        }
        if settings.check_role_table {
            let findings = check_role_consistency();
            if !findings.is_empty() {
                info!("Role table has {} inconsistent entries", findings.len());
            }
        }
        ScriptGenerator {
            settings,
            table: None,
        }
    }

    /// Check raw commands passed as parameter values against `table`.
    pub fn with_command_table(mut self, table: Arc<CommandTable>) -> Self {
        self.table = Some(table);
        self
    }

    pub fn settings(&self) -> &CodeGeneratorSettings {
        &self.settings
    }

    /// Emit the script line for a single resolved step.
    ///
    /// No capability filtering happens here.
    pub fn generate_step(&self, step: &ResolvedStep) -> String {
        let pattern = command_pattern(
            step.device_type,
            step.capability,
            step.backend,
            step.device_name,
        );
        if pattern.is_generic()
            && let (Some(table), Some(value)) = (&self.table, step.param_value)
        {
            for issue in table.validate(value) {
                warn!("Command '{}' on '{}': {}", value, step.device_name, issue);
            }
        }
        if pattern.is_missing_value(step.param_value) {
            warn!(
                "No value given for '{}' on '{}', the line keeps the '{}' placeholder",
                step.capability,
                step.device_name,
                VALUE_TOKEN
            );
        }
        pattern.render(step.param_value)
    }

    /// Emit the script body for all steps of `workflow` in order.
    ///
    /// Steps for which no device variable can be found, or whose device type
    /// lacks the capability, are skipped.
    pub fn generate(&self, workflow: &Workflow) -> ScriptBody {
        let mut lines = vec![];
        let mut previous: Option<Target> = None;
        for (index, step) in workflow.steps.iter().enumerate() {
            let Some(target) = resolve_target(step, &workflow.devices, previous) else {
                warn!(
                    "Step {}: no device available for {} '{}'",
                    index + 1,
                    step.device_type,
                    step.capability
                );
                self.skip(&mut lines, index, "no device available");
                continue;
            };
            if let Some(role) = step.role.as_deref()
                && !can_fulfill_role(target.device_type, role)
            {
                diagnostic!(
                    "Step {}: {} is not registered for role '{}'",
                    index + 1,
                    target.device_type,
                    role
                );
            }
            if self.settings.skip_unsupported
                && !has_capability(target.device_type, step.capability)
            {
                warn!(
                    "Step {}: {} does not support '{}'",
                    index + 1,
                    target.device_type,
                    step.capability
                );
                let reason = format!(
                    "{} does not support '{}'",
                    target.device_type, step.capability
                );
                self.skip(&mut lines, index, &reason);
                continue;
            }
            previous = Some(target);
            lines.push(self.generate_step(&ResolvedStep {
                device_type: target.device_type,
                role: step.role.as_deref(),
                capability: step.capability,
                backend: workflow.backend,
                device_name: target.name,
                param_value: step.param_value.as_deref(),
            }));
        }
        ScriptBody { lines }
    }

    fn skip(&self, lines: &mut Vec<String>, index: usize, reason: &str) {
        if self.settings.emit_comments {
            lines.push(format!(
                "{} step {} skipped: {}",
                self.settings.comment_prefix(),
                index + 1,
                reason
            ));
        }
    }
}

/// Find the device variable a step runs against.
///
/// Order: explicit device context, the step's own device name, role
/// selection among the connected devices, the previously used device of the
/// same type, the first connected device of the same type.
fn resolve_target<'a>(
    step: &'a WorkflowStep,
    devices: &'a [ConnectedDevice],
    previous: Option<Target<'a>>,
) -> Option<Target<'a>> {
    let named = |name: &'a str| Target {
        name,
        device_type: devices
            .iter()
            .find(|d| d.name == name)
            .map_or(step.device_type, |d| d.device_type),
    };
    let connected = |device: &'a ConnectedDevice| Target {
        name: &device.name,
        device_type: device.device_type,
    };
    if let Some(name) = step.device_context.as_deref().and_then(parse_device_context) {
        return Some(named(name));
    }
    if let Some(name) = step.device_name.as_deref().map(str::trim)
        && !name.is_empty()
    {
        return Some(named(name));
    }
    if let Some(device) = step
        .role
        .as_deref()
        .and_then(|role| select_device_for_role(role, devices))
    {
        return Some(connected(device));
    }
    if let Some(previous) = previous.filter(|p| p.device_type == step.device_type) {
        return Some(previous);
    }
    devices
        .iter()
        .find(|d| d.device_type == step.device_type)
        .map(connected)
}
