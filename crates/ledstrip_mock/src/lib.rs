//! ledstrip_mock: the runnable mock LED strip service.
//!
//! Wires the pure logic from `ledstrip_core` to a tokio runtime:
//! - `publisher`: the outbound-channel seam plus change-diagnostic feed
//! - `expiry`: the single-active one-shot timer
//! - `strip`: the service façade serializing commands and timer fires
//! - `config`: argument/env configuration for the binary

pub mod config;
pub mod expiry;
pub mod publisher;
pub mod strip;
