// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Operations each device type is declared to support.
//!
//! Mainframes and switch systems get their capabilities from the installed
//! modules, which requires runtime introspection. Their entries stay empty.

use crate::capability::Capability;
use crate::device_type::DeviceType;

pub const SCOPE_CAPABILITIES: &[Capability] = &[
    Capability::AcquireWaveform,
    Capability::SaveWaveform,
    Capability::SaveScreenshot,
    Capability::MeasureFrequency,
    Capability::MeasureAmplitude,
    Capability::MeasureVoltage,
];

pub const AWG_CAPABILITIES: &[Capability] =
    &[Capability::GenerateSignal, Capability::EnableOutput];

pub const AFG_CAPABILITIES: &[Capability] =
    &[Capability::GenerateSignal, Capability::EnableOutput];

pub const PSU_CAPABILITIES: &[Capability] = &[
    Capability::SetVoltage,
    Capability::SetCurrent,
    Capability::MeasureVoltage,
    Capability::MeasureCurrent,
    Capability::EnableOutput,
];

pub const SMU_CAPABILITIES: &[Capability] = &[
    Capability::SetVoltage,
    Capability::SetCurrent,
    Capability::MeasureVoltage,
    Capability::MeasureCurrent,
    Capability::EnableOutput,
];

pub const DMM_CAPABILITIES: &[Capability] = &[
    Capability::MeasureVoltage,
    Capability::MeasureCurrent,
    Capability::MeasureFrequency,
];

pub const DAQ_CAPABILITIES: &[Capability] =
    &[Capability::MeasureVoltage, Capability::MeasureCurrent];

pub const MAINFRAME_CAPABILITIES: &[Capability] = &[];

pub const SWITCH_SYSTEM_CAPABILITIES: &[Capability] = &[];

pub const fn capabilities(device: DeviceType) -> &'static [Capability] {
    match device {
        DeviceType::Scope => SCOPE_CAPABILITIES,
        DeviceType::Awg => AWG_CAPABILITIES,
        DeviceType::Afg => AFG_CAPABILITIES,
        DeviceType::Psu => PSU_CAPABILITIES,
        DeviceType::Smu => SMU_CAPABILITIES,
        DeviceType::Dmm => DMM_CAPABILITIES,
        DeviceType::Daq => DAQ_CAPABILITIES,
        DeviceType::Mainframe => MAINFRAME_CAPABILITIES,
        DeviceType::SwitchSystem => SWITCH_SYSTEM_CAPABILITIES,
    }
}

pub fn has_capability(device: DeviceType, capability: Capability) -> bool {
    capabilities(device).contains(&capability)
}
