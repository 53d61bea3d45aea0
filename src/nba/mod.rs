//! NBA stats API access: static team directory, wire types, HTTP client,
//! derived values and cached loaders.

pub mod cached;
pub mod compute;
pub mod http;
pub mod teams;
pub mod types;
