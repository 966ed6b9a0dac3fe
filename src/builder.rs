//! Topology construction from bound parameters.
//!
//! The builder is purely functional: given a plan (the per-preset shape)
//! and the bound parameters, it assembles the node/interface/LAN graph in
//! one pass. It performs no validation of its own; the parameter schema is
//! the sole gate, and whatever values binding produced are applied as-is.

use crate::profiles::keys;
use crate::schema::BoundParameters;
use crate::topology::{ComputeNode, InstructionsDocument, Interface, Network, Topology};

/// Per-node interface name, matching the geni-lib profiles this reproduces.
const INTERFACE_NAME: &str = "if0";
/// Fixed component identifier assigned to every interface.
const COMPONENT_ID: &str = "eth0";
/// Client identifier of the shared LAN.
const LAN_NAME: &str = "lan";

/// The preset-specific shape fed to [`build`].
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyPlan {
    /// Name of the single compute node
    pub node_name: String,
    /// Whether the node's interface joins a shared LAN
    pub with_lan: bool,
    /// Rendered instructions Markdown, if the preset carries one
    pub instructions: Option<String>,
}

/// Build the resource topology for one profile instantiation.
///
/// The disk image is applied unconditionally. The hardware type is applied
/// only when the bound value is non-empty; an empty value means "any
/// available hardware", not an error. Core count and RAM size are applied
/// only when bound and non-zero, with RAM converted from gigabytes to
/// megabytes. The LAN is created only when an interface will join it, so an
/// empty network is never emitted.
pub fn build(plan: &TopologyPlan, params: &BoundParameters) -> Topology {
    let interface = Interface {
        name: INTERFACE_NAME.to_string(),
        component_id: COMPONENT_ID.to_string(),
    };

    let hardware_type = params
        .text(keys::HW_TYPE)
        .filter(|hw| !hw.is_empty())
        .map(str::to_string);

    let node = ComputeNode {
        name: plan.node_name.clone(),
        disk_image: params.text(keys::OS_IMAGE).unwrap_or_default().to_string(),
        hardware_type,
        cores: params.integer(keys::CORE_COUNT).filter(|cores| *cores != 0),
        ram_mb: params
            .integer(keys::RAM_SIZE)
            .filter(|gb| *gb != 0)
            .map(|gb| gb * 1024),
        interfaces: vec![interface],
    };

    let networks = if plan.with_lan {
        let members = node
            .interfaces
            .iter()
            .map(|iface| iface.client_id(&node.name))
            .collect();
        vec![Network {
            name: LAN_NAME.to_string(),
            members,
        }]
    } else {
        Vec::new()
    };

    Topology {
        nodes: vec![node],
        networks,
        instructions: plan
            .instructions
            .clone()
            .map(|markdown| InstructionsDocument { markdown }),
    }
}
