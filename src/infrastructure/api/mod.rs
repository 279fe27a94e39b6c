//! Backend REST adapter implementing the auth and data ports.

mod client;
mod dto;
mod resources;

pub use client::{ApiClient, map_status};
pub use resources::filter_query;
