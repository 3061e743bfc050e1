//! Database models backing the domain layer.

pub mod config;
pub mod contact;
