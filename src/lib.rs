//! Graylift - batch preparation of 16-bit captures for 8-bit display.
//!
//! The pixel work lives in the `tonescale` crate; this library adds file
//! decoding and encoding, output naming, folder batch runs, and the YAML
//! configuration layer. It is exposed as a library for integration testing.

pub mod batch;
pub mod error;
pub mod io;
pub mod models;
