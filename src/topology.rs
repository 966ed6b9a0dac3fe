//! Resource topology type definitions.
//!
//! This module contains the in-memory resource graph a profile builds:
//! compute nodes with their interfaces, at most one shared LAN, and an
//! optional Markdown instructions document. Ownership is tree-shaped: the
//! topology owns the nodes and networks, each node owns its interfaces, and
//! a network holds only the client identifiers of the interfaces it
//! connects.

use serde::Serialize;

/// A requested compute node (raw PC or VM).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ComputeNode {
    /// Client identifier of the node within the request
    pub name: String,
    /// URN of the disk image to load
    pub disk_image: String,
    /// Physical hardware type; `None` lets the testbed pick any available type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_type: Option<String>,
    /// Core count; `None` means the platform default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cores: Option<i64>,
    /// RAM in megabytes; `None` means the platform default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram_mb: Option<i64>,
    /// Network interfaces owned by this node
    pub interfaces: Vec<Interface>,
}

/// A network interface on a compute node.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Interface {
    /// Interface name within its node (e.g. "if0")
    pub name: String,
    /// Fixed component identifier (e.g. "eth0")
    pub component_id: String,
}

impl Interface {
    /// The request-wide client identifier for this interface, qualified by
    /// its owning node's name.
    pub fn client_id(&self, node_name: &str) -> String {
        format!("{}:{}", node_name, self.name)
    }
}

/// A shared LAN segment.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Network {
    /// Client identifier of the LAN (e.g. "lan")
    pub name: String,
    /// Client identifiers of the member interfaces; membership is a set,
    /// order carries no meaning
    pub members: Vec<String>,
}

/// Static Markdown shown to the user on the experiment page.
///
/// Display only; has no effect on provisioning.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InstructionsDocument {
    pub markdown: String,
}

/// The root of the resource graph, serialized to an RSpec.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Topology {
    pub nodes: Vec<ComputeNode>,
    pub networks: Vec<Network>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<InstructionsDocument>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_client_id_is_node_qualified() {
        let iface = Interface {
            name: "if0".to_string(),
            component_id: "eth0".to_string(),
        };
        assert_eq!(iface.client_id("node"), "node:if0");
        assert_eq!(iface.client_id("pc"), "pc:if0");
    }
}
