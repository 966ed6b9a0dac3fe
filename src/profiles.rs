//! The named profile presets.
//!
//! Three presets mirror the deployed profile variants: a plain Ubuntu 24.04
//! node on GPU hardware, a cluster-class node with tunable cores and RAM,
//! and an OpenStack node that records self-chosen dashboard credentials in
//! its instructions. They stay distinct presets rather than one merged
//! profile, matching how they are published, but all delegate to the same
//! builder.

use crate::builder::TopologyPlan;
use crate::schema::{BoundParameters, ParameterKind, ParameterValue, Schema};

/// Parameter keys, as submitted by the portal's binding input.
pub mod keys {
    pub const OS_IMAGE: &str = "osImage";
    pub const HW_TYPE: &str = "hwType";
    pub const CORE_COUNT: &str = "coreCount";
    pub const RAM_SIZE: &str = "ramSize";
    pub const OS_USERNAME: &str = "os_username";
    pub const OS_PASSWORD: &str = "os_password";
}

const UBUNTU24_IMAGE: &str = "urn:publicid:IDN+emulab.net+image+emulab-ops:UBUNTU24-64-STD";

/// A profile preset selectable on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Single Ubuntu 24.04 node on a LAN
    Ubuntu,
    /// Single cluster node with tunable core count and RAM
    Cluster,
    /// Single OpenStack node with dashboard credentials
    Openstack,
}

impl Preset {
    /// The parameter schema this preset shows on its instantiation page.
    pub fn schema(&self) -> Schema {
        let mut schema = Schema::new();
        schema.define(
            keys::OS_IMAGE,
            "Operating System Image",
            ParameterKind::Image,
            ParameterValue::text(UBUNTU24_IMAGE),
            "OS image for all nodes. Ubuntu 24.04 is used here.",
        );
        schema.define(
            keys::HW_TYPE,
            "Hardware Type",
            ParameterKind::NodeType,
            ParameterValue::text(self.default_hardware_type()),
            "Specify a hardware type for all nodes. \
             Clear Selection for any available type. d760-hgpu, d8545, nvidiagh.",
        );
        match self {
            Preset::Ubuntu => {}
            Preset::Cluster => {
                schema.define(
                    keys::CORE_COUNT,
                    "Core Count",
                    ParameterKind::Integer,
                    ParameterValue::Integer(8),
                    "Number of cores for the node. 0 keeps the platform default.",
                );
                schema.define(
                    keys::RAM_SIZE,
                    "RAM Size (GB)",
                    ParameterKind::Integer,
                    ParameterValue::Integer(32),
                    "RAM for the node in gigabytes. 0 keeps the platform default.",
                );
            }
            Preset::Openstack => {
                schema.define(
                    keys::OS_USERNAME,
                    "OpenStack Admin Username",
                    ParameterKind::String,
                    ParameterValue::text("crookshanks"),
                    "Username for the OpenStack dashboard admin account.",
                );
                schema.define(
                    keys::OS_PASSWORD,
                    "OpenStack Admin Password",
                    ParameterKind::String,
                    ParameterValue::text("chocolateFrog!"),
                    "Password for the OpenStack dashboard admin account.",
                );
            }
        }
        schema
    }

    /// The topology shape and rendered instructions for one instantiation.
    pub fn plan(&self, params: &BoundParameters) -> TopologyPlan {
        TopologyPlan {
            node_name: self.node_name().to_string(),
            with_lan: self.wants_lan(),
            instructions: self.instructions(params),
        }
    }

    fn default_hardware_type(&self) -> &'static str {
        match self {
            Preset::Ubuntu => "d760-hgpu",
            Preset::Cluster => "d8545",
            Preset::Openstack => "A100",
        }
    }

    fn node_name(&self) -> &'static str {
        match self {
            Preset::Ubuntu | Preset::Cluster => "node",
            Preset::Openstack => "pc",
        }
    }

    fn wants_lan(&self) -> bool {
        // The OpenStack variant is single-node only and deliberately carries
        // no LAN; the others connect their node to "lan".
        !matches!(self, Preset::Openstack)
    }

    fn instructions(&self, params: &BoundParameters) -> Option<String> {
        match self {
            Preset::Ubuntu => Some(format!(
                "## Basic Instructions\n\n\
                 Wait for the `{}` node's `Status` to change to `ready`.\n",
                self.node_name()
            )),
            Preset::Cluster => None,
            Preset::Openstack => {
                // Echo the bound values so users can recover self-chosen
                // credentials from the experiment page.
                let username = params.text(keys::OS_USERNAME).unwrap_or_default();
                let password = params.text(keys::OS_PASSWORD).unwrap_or_default();
                Some(format!(
                    "## Basic Instructions\n\n\
                     Wait for the `{}` node's `Status` to change to `ready`.\n\n\
                     Then log in to the OpenStack dashboard as user `{}` \
                     with password `{}`.\n",
                    self.node_name(),
                    username,
                    password
                ))
            }
        }
    }
}
