//! Core data layer
//!
//! Types shared by the loader, the persona sampler and the responder.

pub mod data;
