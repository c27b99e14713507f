//! Wire formats.

pub mod http;
pub mod realtime;
