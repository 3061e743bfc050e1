//! Domain aggregates exposed by the service layer.

pub mod contact;
