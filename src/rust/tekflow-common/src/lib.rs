// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Static instrument knowledge shared by the workflow engine: the closed sets
//! of device types, capabilities and control backends, the capability table
//! and the role fulfillment table.

pub mod backend;
pub mod capability;
pub mod capability_table;
pub mod device_type;
pub mod roles;

pub use backend::Backend;
pub use capability::Capability;
pub use capability_table::has_capability;
pub use device_type::DeviceType;
pub use roles::{
    ConnectedDevice, RoleInconsistency, can_fulfill_role, can_perform_psu_operation,
    check_role_consistency, fulfillers, known_roles, select_device_for_role,
};
