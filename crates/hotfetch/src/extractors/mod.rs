// ABOUTME: Declarative extraction: descriptors, shape inference, selector and attribute resolution.
// ABOUTME: The engine in client.rs wires these together per requested key.

//! Extraction building blocks.
//!
//! Submodules:
//! - `descriptor`: request data models, deserializable from JSON.
//! - `shape`: scalar vs. array decision per request.
//! - `select`: selector resolution into ordered nodes.
//! - `attributes`: value extraction from nodes.

pub mod attributes;
pub mod descriptor;
pub mod select;
pub mod shape;
