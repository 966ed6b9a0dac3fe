//! # Profilegen - Generator for CloudLab/ProtoGENI experiment profile RSpecs
//!
//! This library provides core functionality for generating resource
//! specifications (RSpecs) for CloudLab experiment profiles.
//!
//! ## Overview
//!
//! A CloudLab profile declares a small set of user-tunable parameters
//! (OS image, hardware type, core count, RAM size, credentials) and emits
//! a static RSpec describing the requested nodes and networks. Profilegen
//! reproduces that pipeline as a standalone tool: bind user-supplied values
//! against a parameter schema, build the node/interface/LAN topology, and
//! serialize it as a ProtoGENI request RSpec.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `schema`: Parameter declaration, binding, and type coercion
//! - `bindings`: Collecting supplied parameter values from flags and files
//! - `topology`: The node/interface/network resource graph
//! - `builder`: Construction of a topology from bound parameters
//! - `profiles`: The named profile presets and their schemas
//! - `rspec`: Serialization of a topology to RSpec XML
//!
//! ## Example Usage
//!
//! ```rust
//! use profilegen::{builder, profiles::Preset};
//! use std::collections::HashMap;
//!
//! let preset = Preset::Ubuntu;
//! let params = preset.schema().bind(&HashMap::new())?;
//! let topology = builder::build(&preset.plan(&params), &params);
//! let xml = profilegen::rspec::render(&topology)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Binding failures are reported as a typed [`schema::ValidationError`];
//! everything else returns `color_eyre::Result` for consistent error
//! reporting with context.

pub mod bindings;
pub mod builder;
pub mod profiles;
pub mod rspec;
pub mod schema;
pub mod topology;
