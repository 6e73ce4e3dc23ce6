//! Domain types for payment notifications and the port to the remote API.

pub mod outcome;
pub mod payload;
pub mod ports;
pub mod record;
