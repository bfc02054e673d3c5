// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use tekflow_common::{Backend, Capability, DeviceType};

/// How a capability is driven in the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplementationMethod {
    /// Structured call into the vendor device binding
    HighLevelApi,
    /// Literal write/query of an instrument command
    RawProtocol,
}

/// Whether a vendor high-level binding exists for the device type.
const fn has_high_level_binding(device_type: DeviceType) -> bool {
    match device_type {
        DeviceType::Smu
        | DeviceType::Scope
        | DeviceType::Dmm
        | DeviceType::Awg
        | DeviceType::Afg
        | DeviceType::Psu => true,
        DeviceType::Daq | DeviceType::Mainframe | DeviceType::SwitchSystem => false,
    }
}

/// Decide the dispatch path for a step.
///
/// Only the high-level API backend on a device type with a vendor binding
/// selects the high-level path. The capability does not take part in the
/// decision; a missing high-level call shape is handled by the emitter.
pub fn implementation_method(
    device_type: DeviceType,
    _capability: Capability,
    backend: Backend,
) -> ImplementationMethod {
    match backend {
        Backend::TmDevices if has_high_level_binding(device_type) => {
            ImplementationMethod::HighLevelApi
        }
        _ => ImplementationMethod::RawProtocol,
    }
}
