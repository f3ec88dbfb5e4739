//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (classified, consumer-ready)
//! - `wire.rs` — Raw serde structs matching backend responses
//! - `convert.rs` — `From` conversions from wire to domain types
//! - `client.rs` — Sub-client with the fetch operations

pub mod market;
