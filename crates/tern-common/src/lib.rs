//! Common utilities for the Tern HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - de-duplicated warnings routed through the `log` facade

pub mod warning;
