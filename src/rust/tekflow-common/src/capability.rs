// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use anyhow::anyhow;
use serde::Deserialize;
use std::fmt;

/// One atomic operation a device type may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Capability {
    SetVoltage,
    MeasureVoltage,
    SetCurrent,
    MeasureCurrent,
    EnableOutput,
    AcquireWaveform,
    SaveWaveform,
    SaveScreenshot,
    GenerateSignal,
    MeasureFrequency,
    MeasureAmplitude,
}

impl Capability {
    pub const ALL: [Capability; 11] = [
        Capability::SetVoltage,
        Capability::MeasureVoltage,
        Capability::SetCurrent,
        Capability::MeasureCurrent,
        Capability::EnableOutput,
        Capability::AcquireWaveform,
        Capability::SaveWaveform,
        Capability::SaveScreenshot,
        Capability::GenerateSignal,
        Capability::MeasureFrequency,
        Capability::MeasureAmplitude,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Capability::SetVoltage => "set_voltage",
            Capability::MeasureVoltage => "measure_voltage",
            Capability::SetCurrent => "set_current",
            Capability::MeasureCurrent => "measure_current",
            Capability::EnableOutput => "enable_output",
            Capability::AcquireWaveform => "acquire_waveform",
            Capability::SaveWaveform => "save_waveform",
            Capability::SaveScreenshot => "save_screenshot",
            Capability::GenerateSignal => "generate_signal",
            Capability::MeasureFrequency => "measure_frequency",
            Capability::MeasureAmplitude => "measure_amplitude",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Capability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Capability, anyhow::Error> {
        let tag = s.trim().to_lowercase();
        if let Some(capability) = Capability::ALL.into_iter().find(|c| c.as_str() == tag) {
            return Ok(capability);
        }
        match tag.as_str() {
            "acquire" => Ok(Capability::AcquireWaveform),
            "output_enable" => Ok(Capability::EnableOutput),
            _ => Err(anyhow!(
                "Unsupported capability: {s}. Supported capabilities are: {}",
                Capability::ALL.map(|c| c.as_str()).join(", ")
            )),
        }
    }
}

impl TryFrom<String> for Capability {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capability() {
        assert_eq!(
            "SET_VOLTAGE".parse::<Capability>().unwrap(),
            Capability::SetVoltage
        );
        assert_eq!(
            "acquire".parse::<Capability>().unwrap(),
            Capability::AcquireWaveform
        );
        assert_eq!(
            "output_enable".parse::<Capability>().unwrap(),
            Capability::EnableOutput
        );
        let err = "teleport".parse::<Capability>().unwrap_err().to_string();
        assert!(err.contains("teleport"));
        assert!(err.contains("measure_amplitude"));
    }
}
