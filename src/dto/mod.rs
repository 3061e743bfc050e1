//! Wire representations exchanged with API clients.

pub mod contact;
