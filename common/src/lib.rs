//! Shared client logic for the LoyaLens recommendation console.
//!
//! Everything that transforms data lives here so it can be exercised natively:
//! file intake, the upload and campaign state machines, the result normalizer,
//! the reward parser and the export serializers. The browser crate only wires
//! these pieces to `web_sys` and `gloo-net`.

pub mod config;
pub mod error;
pub mod export;
pub mod intake;
pub mod jobs;
pub mod model;
pub mod normalizer;
pub mod requests;
pub mod transport;
