// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_header;

/// Declared type of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Enumeration,
    Integer,
    Float,
    #[serde(alias = "numeric")]
    Number,
    String,
    Boolean,
    #[default]
    #[serde(other)]
    Other,
}

impl ParamType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ParamType::Integer | ParamType::Float | ParamType::Number)
    }
}

/// One parameter slot of an instrument command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandParam {
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandParam {
    pub fn new<S: Into<String>>(name: S, param_type: ParamType) -> Self {
        CommandParam {
            name: name.into(),
            param_type,
            default: None,
            required: false,
            options: None,
            min: None,
            max: None,
            unit: None,
            description: None,
        }
    }

    /// Allowed values, empty when the parameter is not enumerated.
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Whether `value` lies inside the declared numeric range.
    ///
    /// Missing bounds are open.
    pub fn in_range(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Description of one instrument command as found in a command library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandMetadata {
    /// Canonical command string, possibly with placeholders and arguments
    pub scpi: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<CommandParam>>,
}

impl CommandMetadata {
    pub fn new<S1: Into<String>, S2: Into<String>>(scpi: S1, category: S2) -> Self {
        CommandMetadata {
            scpi: scpi.into(),
            description: String::new(),
            short_description: None,
            category: category.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: Vec<CommandParam>) -> Self {
        self.params = Some(params);
        self
    }

    /// Registry key of this command.
    pub fn header(&self) -> String {
        normalize_header(&self.scpi)
    }

    pub fn params(&self) -> &[CommandParam] {
        self.params.as_deref().unwrap_or_default()
    }

    pub fn param(&self, index: usize) -> Option<&CommandParam> {
        self.params().get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_command() {
        let json = r#"{
            "scpi": "CH<x>:SCAle {value}",
            "description": "Sets the vertical scale",
            "category": "vertical",
            "params": [
                {"name": "value", "type": "float", "min": 1e-3, "max": 10.0, "unit": "V", "default": 1.0},
                {"name": "mode", "type": "enumeration", "options": ["AUTO", "MANUAL"], "required": true},
                {"name": "source", "type": "mnemonic_range"}
            ]
        }"#;
        let command: CommandMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(command.header(), "CH:SCALE");
        assert_eq!(command.params().len(), 3);
        let value = command.param(0).unwrap();
        assert_eq!(value.param_type, ParamType::Float);
        assert!(value.param_type.is_numeric());
        assert_eq!(value.unit.as_deref(), Some("V"));
        assert!(!value.required);
        let mode = command.param(1).unwrap();
        assert_eq!(mode.options(), ["AUTO", "MANUAL"]);
        assert!(mode.required);
        assert_eq!(command.param(2).unwrap().param_type, ParamType::Other);
        assert!(command.param(3).is_none());
    }

    #[test]
    fn test_numeric_type_name() {
        let param: CommandParam = serde_json::from_str(
            r#"{"name": "value", "type": "numeric", "min": 0.001, "max": 10.0, "unit": "V"}"#,
        )
        .unwrap();
        assert_eq!(param.param_type, ParamType::Number);
        assert!(param.param_type.is_numeric());
    }

    #[test]
    fn test_command_without_params() {
        let command: CommandMetadata = serde_json::from_str(r#"{"scpi": "*RST"}"#).unwrap();
        assert!(command.params.is_none());
        assert!(command.params().is_empty());
        assert!(command.category.is_empty());
    }

    #[test]
    fn test_param_range() {
        let mut param = CommandParam::new("value", ParamType::Float);
        assert!(param.in_range(-1e9));
        param.min = Some(0.0);
        param.max = Some(5.0);
        assert!(param.in_range(0.0));
        assert!(param.in_range(5.0));
        assert!(!param.in_range(5.1));
        assert!(!param.in_range(-0.1));
        assert!(param.options().is_empty());
    }
}
