// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use anyhow::anyhow;
use serde::Deserialize;
use std::fmt;

/// Control dialect used for a whole generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Backend {
    /// Generic instrument protocol, `pyvisa` style `write`/`query`
    #[default]
    PyVisa,
    /// Vendor high-level API (`tm_devices`)
    TmDevices,
    /// Direct low-level protocol (`vxi11`)
    Vxi11,
    /// High-speed waveform transfer only (`tekhsi`)
    TekHsi,
    /// Control plane and data plane split over two of the above
    Hybrid,
}

impl Backend {
    pub const ALL: [Backend; 5] = [
        Backend::PyVisa,
        Backend::TmDevices,
        Backend::Vxi11,
        Backend::TekHsi,
        Backend::Hybrid,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Backend::PyVisa => "pyvisa",
            Backend::TmDevices => "tm_devices",
            Backend::Vxi11 => "vxi11",
            Backend::TekHsi => "tekhsi",
            Backend::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Backend, anyhow::Error> {
        match s.trim().to_lowercase().as_str() {
            "pyvisa" => Ok(Backend::PyVisa),
            "tm_devices" => Ok(Backend::TmDevices),
            "vxi11" => Ok(Backend::Vxi11),
            "tekhsi" => Ok(Backend::TekHsi),
            "hybrid" => Ok(Backend::Hybrid),
            _ => Err(anyhow!(
                "Unsupported backend: {s}. Supported backends are: pyvisa, tm_devices, vxi11, tekhsi, hybrid"
            )),
        }
    }
}

impl TryFrom<String> for Backend {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
