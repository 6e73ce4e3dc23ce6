//! Adapters for the outside world: the remote payment API and the upload
//! working directory.

pub mod http;
pub mod in_memory;
pub mod uploads;
