// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

use codegenerator::{CodeGeneratorSettings, ImplementationMethod, ScriptGenerator, Workflow};
use command_registry::CommandRegistry;
use tekflow_common::{Backend, Capability, DeviceType};

const WORKFLOW: &str = r#"{
    "backend": "tm_devices",
    "devices": [
        {"name": "smu", "device_type": "SMU"},
        {"name": "scope", "device_type": "SCOPE"},
        {"name": "mf", "device_type": "MF"}
    ],
    "steps": [
        {"device_type": "PSU", "role": "voltage_source", "capability": "set_voltage", "param_value": 5},
        {"device_type": "SMU", "capability": "output_enable", "param_value": "ON"},
        {"device_type": "SMU", "capability": "measure_current"},
        {"device_type": "SCOPE", "capability": "acquire", "device_context": "(scope)", "param_value": 1},
        {"device_type": "SCOPE", "capability": "measure_frequency", "param_value": "MEASUrement:MEAS1:TYPe FREQUENCY"},
        {"device_type": "SCOPE", "capability": "save_screenshot", "param_value": "result.png"},
        {"device_type": "MF", "capability": "set_voltage"}
    ]
}"#;

#[test]
fn test_generate_vendor_api_script() {
    let workflow = Workflow::from_json(WORKFLOW).unwrap();
    let body = ScriptGenerator::new(CodeGeneratorSettings::default()).generate(&workflow);
    let expected = [
        "smu.commands.smu[\"a\"].source.levelv = 5",
        "smu.commands.smu[\"a\"].source.output = ON",
        "smu.commands.smu[\"a\"].measure.i()",
        "scope.curve_query(1)",
        "scope.write(\"MEASUrement:MEAS1:TYPe FREQUENCY\")",
        "scope.save_screenshot(\"result.png\")",
        "# step 7 skipped: MF does not support 'set_voltage'",
    ];
    assert_eq!(body.lines(), expected);
    assert_eq!(body.to_string(), expected.join("\n"));
}

#[test]
fn test_generate_same_workflow_for_raw_backend() {
    let mut workflow = Workflow::from_json(WORKFLOW).unwrap();
    workflow.backend = Backend::Vxi11;
    let body = ScriptGenerator::new(CodeGeneratorSettings::default()).generate(&workflow);
    assert_eq!(body.lines()[0], "smu.write(\"SOURce:VOLTage 5\")");
    assert_eq!(body.lines()[1], "smu.write(\"OUTPut:STATe ON\")");
    assert_eq!(body.lines()[2], "smu.query(\"MEASure:CURRent?\")");
    assert_eq!(body.lines()[3], "scope.write(\"1\")");
}

#[test]
fn test_generate_with_command_table() {
    let registry = CommandRegistry::new();
    let loaded = registry
        .load_json(
            r#"{"commands": [
                {"scpi": "MEASUrement:MEAS<x>:TYPe {value}", "params": [
                    {"name": "value", "type": "enumeration", "options": ["FREQUENCY", "AMPLITUDE"]}
                ]}
            ]}"#,
        )
        .unwrap();
    assert_eq!(loaded, 1);
    let generator = ScriptGenerator::new(CodeGeneratorSettings::default())
        .with_command_table(registry.snapshot());
    let workflow = Workflow::from_json(WORKFLOW).unwrap();
    // Validation only logs, the script is unchanged
    assert_eq!(generator.generate(&workflow).lines().len(), 7);
}

#[test]
fn test_every_supported_pair_is_emitted() {
    for backend in Backend::ALL {
        for device_type in DeviceType::ALL {
            for capability in device_type.capabilities() {
                let line = codegenerator::command_pattern(device_type, *capability, backend, "dev");
                assert!(line.as_str().starts_with("dev."));
                if backend != Backend::TmDevices {
                    assert_eq!(line.method(), ImplementationMethod::RawProtocol);
                }
            }
        }
    }
    assert_eq!(
        codegenerator::implementation_method(
            DeviceType::Mainframe,
            Capability::AcquireWaveform,
            Backend::TmDevices
        ),
        ImplementationMethod::RawProtocol
    );
}
