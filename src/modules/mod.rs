//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for local disk storage and outbound mail.

pub mod mail;
pub mod storage;
