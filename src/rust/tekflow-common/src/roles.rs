// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Logical roles a workflow step can request, and the device types that can
//! fill them.
use serde::Deserialize;
use tekflow_log::warn;

use crate::capability::Capability;
use crate::capability_table::has_capability;
use crate::device_type::DeviceType;

struct RoleDefinition {
    name: &'static str,
    /// Fulfilling device types, most preferred first
    fulfillers: &'static [DeviceType],
    /// Capabilities that make a device useful in this role.
    /// Empty for roles that only group hardware.
    capabilities: &'static [Capability],
}

const SOURCE_CAPABILITIES: &[Capability] = &[
    Capability::SetVoltage,
    Capability::SetCurrent,
    Capability::EnableOutput,
];
const SCOPE_ROLE_CAPABILITIES: &[Capability] = &[
    Capability::AcquireWaveform,
    Capability::SaveWaveform,
    Capability::SaveScreenshot,
];
const METER_CAPABILITIES: &[Capability] = &[Capability::MeasureVoltage, Capability::MeasureCurrent];
const GENERATOR_CAPABILITIES: &[Capability] = &[Capability::GenerateSignal];

static ROLES: &[RoleDefinition] = &[
    RoleDefinition {
        name: "psu",
        fulfillers: &[DeviceType::Psu],
        capabilities: SOURCE_CAPABILITIES,
    },
    RoleDefinition {
        name: "power_supply",
        fulfillers: &[DeviceType::Psu, DeviceType::Smu],
        capabilities: SOURCE_CAPABILITIES,
    },
    RoleDefinition {
        name: "voltage_source",
        fulfillers: &[DeviceType::Psu, DeviceType::Smu],
        capabilities: &[Capability::SetVoltage],
    },
    RoleDefinition {
        name: "current_source",
        fulfillers: &[DeviceType::Smu, DeviceType::Psu],
        capabilities: &[Capability::SetCurrent],
    },
    RoleDefinition {
        name: "smu",
        fulfillers: &[DeviceType::Smu],
        capabilities: &[
            Capability::SetVoltage,
            Capability::SetCurrent,
            Capability::MeasureVoltage,
            Capability::MeasureCurrent,
        ],
    },
    RoleDefinition {
        name: "scope",
        fulfillers: &[DeviceType::Scope],
        capabilities: SCOPE_ROLE_CAPABILITIES,
    },
    RoleDefinition {
        name: "oscilloscope",
        fulfillers: &[DeviceType::Scope],
        capabilities: SCOPE_ROLE_CAPABILITIES,
    },
    RoleDefinition {
        name: "waveform_capture",
        fulfillers: &[DeviceType::Scope],
        capabilities: &[Capability::AcquireWaveform],
    },
    RoleDefinition {
        name: "dmm",
        fulfillers: &[DeviceType::Dmm, DeviceType::Daq],
        capabilities: METER_CAPABILITIES,
    },
    RoleDefinition {
        name: "multimeter",
        fulfillers: &[DeviceType::Dmm, DeviceType::Daq],
        capabilities: METER_CAPABILITIES,
    },
    RoleDefinition {
        name: "voltmeter",
        fulfillers: &[
            DeviceType::Dmm,
            DeviceType::Daq,
            DeviceType::Smu,
            DeviceType::Scope,
        ],
        capabilities: &[Capability::MeasureVoltage],
    },
    RoleDefinition {
        name: "ammeter",
        fulfillers: &[DeviceType::Dmm, DeviceType::Daq, DeviceType::Smu],
        capabilities: &[Capability::MeasureCurrent],
    },
    RoleDefinition {
        name: "frequency_counter",
        fulfillers: &[DeviceType::Scope, DeviceType::Dmm],
        capabilities: &[Capability::MeasureFrequency],
    },
    RoleDefinition {
        name: "daq",
        fulfillers: &[DeviceType::Daq],
        capabilities: METER_CAPABILITIES,
    },
    RoleDefinition {
        name: "signal_source",
        fulfillers: &[DeviceType::Afg, DeviceType::Awg],
        capabilities: GENERATOR_CAPABILITIES,
    },
    RoleDefinition {
        name: "function_generator",
        fulfillers: &[DeviceType::Afg],
        capabilities: GENERATOR_CAPABILITIES,
    },
    RoleDefinition {
        name: "awg",
        fulfillers: &[DeviceType::Awg],
        capabilities: GENERATOR_CAPABILITIES,
    },
    RoleDefinition {
        name: "afg",
        fulfillers: &[DeviceType::Afg],
        capabilities: GENERATOR_CAPABILITIES,
    },
    RoleDefinition {
        name: "mainframe",
        fulfillers: &[DeviceType::Mainframe],
        capabilities: &[],
    },
    RoleDefinition {
        name: "switch",
        fulfillers: &[DeviceType::SwitchSystem],
        capabilities: &[],
    },
];

fn find_role(role: &str) -> Option<&'static RoleDefinition> {
    let role = role.trim().to_lowercase();
    ROLES.iter().find(|r| r.name == role)
}

/// Device types able to fill `role`, most preferred first.
///
/// Unknown roles yield an empty slice.
pub fn fulfillers(role: &str) -> &'static [DeviceType] {
    find_role(role).map(|r| r.fulfillers).unwrap_or(&[])
}

pub fn known_roles() -> impl Iterator<Item = &'static str> {
    ROLES.iter().map(|r| r.name)
}

/// Whether `device` is registered as a fulfiller of `role`.
///
/// The lookup is case-insensitive. An unrecognized role is a plain `false`;
/// the caller is expected to fall back to manual command entry.
pub fn can_fulfill_role(device: DeviceType, role: &str) -> bool {
    fulfillers(role).contains(&device)
}

/// Whether `device` can be driven as a power supply.
///
/// Permissive: a device outside the `psu` role that can still
/// set a voltage qualifies.
pub fn can_perform_psu_operation(device: DeviceType) -> bool {
    can_fulfill_role(device, "psu") || has_capability(device, Capability::SetVoltage)
}

/// An instrument connected to the workflow under a variable name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectedDevice {
    pub name: String,
    pub device_type: DeviceType,
}

impl ConnectedDevice {
    pub fn new<S: Into<String>>(name: S, device_type: DeviceType) -> Self {
        ConnectedDevice {
            name: name.into(),
            device_type,
        }
    }
}

/// Pick the connected device that should serve `role`.
///
/// The device whose type comes first in the role's preference order wins;
/// among devices of the same type the first connected one is used.
pub fn select_device_for_role<'a>(
    role: &str,
    connected: &'a [ConnectedDevice],
) -> Option<&'a ConnectedDevice> {
    fulfillers(role).iter().find_map(|device_type| {
        connected
            .iter()
            .find(|device| device.device_type == *device_type)
    })
}

/// A device type listed under a role without supporting any of the role's
/// capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInconsistency {
    pub role: &'static str,
    pub device_type: DeviceType,
}

/// Cross-check the role table against the capability table.
///
/// Roles without capabilities only group hardware and are not checked.
pub fn check_role_consistency() -> Vec<RoleInconsistency> {
    let mut findings = vec![];
    for role in ROLES.iter().filter(|r| !r.capabilities.is_empty()) {
        for device_type in role.fulfillers {
            let supported = role
                .capabilities
                .iter()
                .any(|c| has_capability(*device_type, *c));
            if !supported {
                warn!(
                    "Device type '{}' is listed for role '{}' but supports none of its capabilities",
                    device_type,
                    role.name
                );
                findings.push(RoleInconsistency {
                    role: role.name,
                    device_type: *device_type,
                });
            }
        }
    }
    findings
}
