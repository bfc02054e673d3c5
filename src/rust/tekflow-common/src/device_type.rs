// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use anyhow::anyhow;
use serde::Deserialize;
use std::fmt;

use crate::capability::Capability;
use crate::capability_table;

/// Class of physical instrument a workflow block can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DeviceType {
    /// Oscilloscope
    Scope,
    /// Arbitrary waveform generator
    Awg,
    /// Arbitrary function generator
    Afg,
    /// Bench power supply
    Psu,
    /// Source-measure unit
    Smu,
    /// Digital multimeter
    Dmm,
    /// Data acquisition unit
    Daq,
    /// Modular mainframe, capabilities depend on installed modules
    Mainframe,
    /// Switch system, capabilities depend on installed cards
    SwitchSystem,
}

impl DeviceType {
    pub const ALL: [DeviceType; 9] = [
        DeviceType::Scope,
        DeviceType::Awg,
        DeviceType::Afg,
        DeviceType::Psu,
        DeviceType::Smu,
        DeviceType::Dmm,
        DeviceType::Daq,
        DeviceType::Mainframe,
        DeviceType::SwitchSystem,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Scope => "SCOPE",
            DeviceType::Awg => "AWG",
            DeviceType::Afg => "AFG",
            DeviceType::Psu => "PSU",
            DeviceType::Smu => "SMU",
            DeviceType::Dmm => "DMM",
            DeviceType::Daq => "DAQ",
            DeviceType::Mainframe => "MF",
            DeviceType::SwitchSystem => "SS",
        }
    }

    pub const fn capabilities(&self) -> &'static [Capability] {
        capability_table::capabilities(*self)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeviceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<DeviceType, anyhow::Error> {
        match s.trim().to_uppercase().as_str() {
            "SCOPE" | "OSCILLOSCOPE" => Ok(DeviceType::Scope),
            "AWG" => Ok(DeviceType::Awg),
            "AFG" => Ok(DeviceType::Afg),
            "PSU" | "POWER_SUPPLY" => Ok(DeviceType::Psu),
            "SMU" => Ok(DeviceType::Smu),
            "DMM" | "MULTIMETER" => Ok(DeviceType::Dmm),
            "DAQ" => Ok(DeviceType::Daq),
            "MF" | "MAINFRAME" => Ok(DeviceType::Mainframe),
            "SS" | "SWITCH_SYSTEM" => Ok(DeviceType::SwitchSystem),
            _ => Err(anyhow!(
                "Unsupported device type: {s}. Supported types are: SCOPE, AWG, AFG, PSU, SMU, DMM, DAQ, MF, SS"
            )),
        }
    }
}

impl TryFrom<String> for DeviceType {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
