//! Client side of the futsal REST backend.

mod backend;
mod http;
mod schema;

pub use backend::Backend;
pub use http::HttpBackend;
pub use schema::{Ack, EndMatchBody, LineupSlot, LineupsBody};
