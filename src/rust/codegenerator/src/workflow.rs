// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Workflow documents as read by the script generator.
//!
//! A workflow lists the connected instruments and an ordered sequence of
//! steps, each requesting one capability from a device type and optionally a
//! logical role.

use anyhow::Context;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use std::path::Path;
use tekflow_common::{Backend, Capability, ConnectedDevice, DeviceType};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkflowStep {
    pub device_type: DeviceType,
    #[serde(default)]
    pub role: Option<String>,
    pub capability: Capability,
    #[serde(default)]
    pub device_name: Option<String>,
    /// Explicit device context such as `"(scope)"`
    #[serde(default)]
    pub device_context: Option<String>,
    #[serde(default, deserialize_with = "deserialize_param_value")]
    pub param_value: Option<String>,
}

impl WorkflowStep {
    pub fn new(device_type: DeviceType, capability: Capability) -> Self {
        WorkflowStep {
            device_type,
            role: None,
            capability,
            device_name: None,
            device_context: None,
            param_value: None,
        }
    }

    pub fn with_role<S: Into<String>>(mut self, role: S) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_device_name<S: Into<String>>(mut self, name: S) -> Self {
        self.device_name = Some(name.into());
        self
    }

    pub fn with_device_context<S: Into<String>>(mut self, context: S) -> Self {
        self.device_context = Some(context.into());
        self
    }

    pub fn with_param_value<S: Into<String>>(mut self, value: S) -> Self {
        self.param_value = Some(value.into());
        self
    }
}

/// Parameter values are opaque text; numbers and booleans are taken verbatim.
fn deserialize_param_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(de::Error::custom(format!(
            "expected a string, number or boolean parameter value, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default)]
    pub devices: Vec<ConnectedDevice>,
    pub steps: Vec<WorkflowStep>,
}

impl Workflow {
    pub fn from_json(json: &str) -> Result<Self> {
        let workflow = serde_json::from_str(json).context("Invalid workflow document")?;
        Ok(workflow)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read workflow '{}'", path.display()))?;
        Self::from_json(&json)
    }
}

/// One step after device resolution, as handed to the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStep<'a> {
    pub device_type: DeviceType,
    pub role: Option<&'a str>,
    pub capability: Capability,
    pub backend: Backend,
    pub device_name: &'a str,
    pub param_value: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workflow() {
        let json = r#"{
            "backend": "tm_devices",
            "devices": [{"name": "smu1", "device_type": "SMU"}],
            "steps": [
                {"device_type": "SMU", "role": "voltage_source", "capability": "set_voltage", "param_value": 1.5},
                {"device_type": "SMU", "capability": "enable_output", "param_value": true},
                {"device_type": "SCOPE", "capability": "acquire", "device_context": "(scope)", "param_value": null}
            ]
        }"#;
        let workflow = Workflow::from_json(json).unwrap();
        assert_eq!(workflow.backend, Backend::TmDevices);
        assert_eq!(workflow.devices, vec![ConnectedDevice::new("smu1", DeviceType::Smu)]);
        assert_eq!(workflow.steps[0].param_value.as_deref(), Some("1.5"));
        assert_eq!(workflow.steps[0].role.as_deref(), Some("voltage_source"));
        assert_eq!(workflow.steps[1].param_value.as_deref(), Some("true"));
        assert_eq!(workflow.steps[2].capability, Capability::AcquireWaveform);
        assert!(workflow.steps[2].param_value.is_none());
    }

    #[test]
    fn test_backend_defaults_to_pyvisa() {
        let workflow = Workflow::from_json(r#"{"steps": []}"#).unwrap();
        assert_eq!(workflow.backend, Backend::PyVisa);
        assert!(workflow.devices.is_empty());
    }

    #[test]
    fn test_invalid_workflow() {
        assert!(Workflow::from_json(r#"{"steps": [{"device_type": "LASER", "capability": "set_voltage"}]}"#).is_err());
        assert!(
            Workflow::from_json(r#"{"steps": [{"device_type": "PSU", "capability": "set_voltage", "param_value": [1]}]}"#)
                .is_err()
        );
        assert!(Workflow::from_path("/nonexistent/workflow.json").is_err());
    }
}
