//! Command-line front end for the Moran process engine.
//!
//! [`app::Runner`] turns a validated [`model::config::MoranConfig`] into a
//! finished [`moran_io::RunArchive`]; `main.rs` only parses arguments and
//! prints.

pub mod app;
pub mod model;
