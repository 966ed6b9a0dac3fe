//! RSpec document serialization.
//!
//! Renders a [`Topology`](crate::topology::Topology) as a ProtoGENI request
//! RSpec v3 XML document, the format the provisioning portal consumes. Only
//! the elements these profiles actually use are modeled: `node` with
//! `sliver_type`/`disk_image`/`hardware_type`/`interface` children, `link`
//! for the LAN, and the instructions Markdown inside an `rspec_tour`
//! extension. The wire details stay confined to this module; the rest of
//! the crate only ever sees the topology types.

use crate::topology::Topology;
use color_eyre::Result;
use serde::Serialize;
use std::io::Write;

const RSPEC_NS: &str = "http://www.geni.net/resources/rspec/3";
const EMULAB_NS: &str = "http://www.protogeni.net/resources/rspec/ext/emulab/1";
const TOUR_NS: &str = "http://www.protogeni.net/resources/rspec/ext/apt-tour/1";

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Serialize, Debug)]
#[serde(rename = "rspec")]
struct Document {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "@xmlns:emulab")]
    xmlns_emulab: &'static str,
    #[serde(rename = "@type")]
    doc_type: &'static str,
    #[serde(rename = "rspec_tour", skip_serializing_if = "Option::is_none")]
    tour: Option<Tour>,
    #[serde(rename = "node")]
    nodes: Vec<Node>,
    #[serde(rename = "link", skip_serializing_if = "Vec::is_empty")]
    links: Vec<Link>,
}

#[derive(Serialize, Debug)]
struct Tour {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    instructions: String,
}

#[derive(Serialize, Debug)]
struct Node {
    #[serde(rename = "@client_id")]
    client_id: String,
    #[serde(rename = "@exclusive")]
    exclusive: bool,
    sliver_type: SliverType,
    #[serde(skip_serializing_if = "Option::is_none")]
    hardware_type: Option<HardwareType>,
    #[serde(rename = "interface")]
    interfaces: Vec<InterfaceElement>,
}

#[derive(Serialize, Debug)]
struct SliverType {
    #[serde(rename = "@name")]
    name: &'static str,
    disk_image: DiskImage,
    #[serde(rename = "emulab:xen", skip_serializing_if = "Option::is_none")]
    xen: Option<XenSettings>,
}

#[derive(Serialize, Debug)]
struct DiskImage {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Serialize, Debug)]
struct HardwareType {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Serialize, Debug)]
struct XenSettings {
    #[serde(rename = "@cores", skip_serializing_if = "Option::is_none")]
    cores: Option<i64>,
    #[serde(rename = "@ram", skip_serializing_if = "Option::is_none")]
    ram: Option<i64>,
}

#[derive(Serialize, Debug)]
struct InterfaceElement {
    #[serde(rename = "@client_id")]
    client_id: String,
    #[serde(rename = "@component_id")]
    component_id: String,
}

#[derive(Serialize, Debug)]
struct Link {
    #[serde(rename = "@client_id")]
    client_id: String,
    link_type: LinkType,
    #[serde(rename = "interface_ref")]
    interface_refs: Vec<InterfaceRef>,
}

#[derive(Serialize, Debug)]
struct LinkType {
    #[serde(rename = "@name")]
    name: &'static str,
}

#[derive(Serialize, Debug)]
struct InterfaceRef {
    #[serde(rename = "@client_id")]
    client_id: String,
}

fn document(topology: &Topology) -> Document {
    let nodes = topology
        .nodes
        .iter()
        .map(|node| {
            let resources_requested = node.cores.is_some() || node.ram_mb.is_some();
            Node {
                client_id: node.name.clone(),
                // Raw PCs are exclusive; a node with explicit core/RAM
                // requests is a Xen VM slice.
                exclusive: !resources_requested,
                sliver_type: SliverType {
                    name: if resources_requested {
                        "emulab-xen"
                    } else {
                        "raw-pc"
                    },
                    disk_image: DiskImage {
                        name: node.disk_image.clone(),
                    },
                    xen: resources_requested.then(|| XenSettings {
                        cores: node.cores,
                        ram: node.ram_mb,
                    }),
                },
                hardware_type: node
                    .hardware_type
                    .clone()
                    .map(|name| HardwareType { name }),
                interfaces: node
                    .interfaces
                    .iter()
                    .map(|iface| InterfaceElement {
                        client_id: iface.client_id(&node.name),
                        component_id: iface.component_id.clone(),
                    })
                    .collect(),
            }
        })
        .collect();

    let links = topology
        .networks
        .iter()
        .map(|network| Link {
            client_id: network.name.clone(),
            link_type: LinkType { name: "lan" },
            interface_refs: network
                .members
                .iter()
                .map(|member| InterfaceRef {
                    client_id: member.clone(),
                })
                .collect(),
        })
        .collect();

    Document {
        xmlns: RSPEC_NS,
        xmlns_emulab: EMULAB_NS,
        doc_type: "request",
        tour: topology.instructions.as_ref().map(|doc| Tour {
            xmlns: TOUR_NS,
            instructions: doc.markdown.clone(),
        }),
        nodes,
        links,
    }
}

/// Render the topology as an RSpec XML string.
pub fn render(topology: &Topology) -> Result<String> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document(topology).serialize(serializer)?;

    let mut output = String::with_capacity(XML_HEADER.len() + body.len() + 1);
    output.push_str(XML_HEADER);
    output.push_str(&body);
    output.push('\n');
    Ok(output)
}

/// Render the topology and write it to `writer`.
pub fn write<W: Write>(topology: &Topology, writer: &mut W) -> Result<()> {
    let rendered = render(topology)?;
    writer.write_all(rendered.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{ComputeNode, InstructionsDocument, Interface, Network};

    fn raw_pc_topology() -> Topology {
        Topology {
            nodes: vec![ComputeNode {
                name: "node".to_string(),
                disk_image: "urn:publicid:IDN+emulab.net+image+emulab-ops:UBUNTU24-64-STD"
                    .to_string(),
                hardware_type: None,
                cores: None,
                ram_mb: None,
                interfaces: vec![Interface {
                    name: "if0".to_string(),
                    component_id: "eth0".to_string(),
                }],
            }],
            networks: vec![Network {
                name: "lan".to_string(),
                members: vec!["node:if0".to_string()],
            }],
            instructions: None,
        }
    }

    #[test]
    fn test_render_raw_pc() {
        let xml = render(&raw_pc_topology()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<rspec"));
        assert!(xml.contains("type=\"request\""));
        assert!(xml.contains("client_id=\"node\""));
        assert!(xml.contains("sliver_type name=\"raw-pc\""));
        assert!(xml.contains(
            "disk_image name=\"urn:publicid:IDN+emulab.net+image+emulab-ops:UBUNTU24-64-STD\""
        ));
        assert!(xml.contains("component_id=\"eth0\""));
        assert!(xml.contains("link client_id=\"lan\""));
        assert!(xml.contains("interface_ref client_id=\"node:if0\""));
    }

    #[test]
    fn test_unset_hardware_type_is_omitted() {
        let xml = render(&raw_pc_topology()).unwrap();
        assert!(!xml.contains("hardware_type"));
    }

    #[test]
    fn test_hardware_type_attribute() {
        let mut topology = raw_pc_topology();
        topology.nodes[0].hardware_type = Some("d8545".to_string());
        let xml = render(&topology).unwrap();
        assert!(xml.contains("hardware_type name=\"d8545\""));
    }

    #[test]
    fn test_core_and_ram_requests_become_a_xen_sliver() {
        let mut topology = raw_pc_topology();
        topology.nodes[0].cores = Some(8);
        topology.nodes[0].ram_mb = Some(32768);
        let xml = render(&topology).unwrap();
        assert!(xml.contains("sliver_type name=\"emulab-xen\""));
        assert!(xml.contains("cores=\"8\""));
        assert!(xml.contains("ram=\"32768\""));
        assert!(xml.contains("exclusive=\"false\""));
    }

    #[test]
    fn test_no_link_without_network() {
        let mut topology = raw_pc_topology();
        topology.networks.clear();
        let xml = render(&topology).unwrap();
        assert!(!xml.contains("<link"));
    }

    #[test]
    fn test_instructions_rendered_as_tour() {
        let mut topology = raw_pc_topology();
        topology.instructions = Some(InstructionsDocument {
            markdown: "Wait for `ready`.".to_string(),
        });
        let xml = render(&topology).unwrap();
        assert!(xml.contains("rspec_tour"));
        assert!(xml.contains("<instructions>"));
        assert!(xml.contains("Wait for `ready`."));
    }
}
