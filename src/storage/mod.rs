//! Storage layer for the forecast journal
//!
//! A small SQLite database that remembers every judged prediction:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Insert, list and clear operations

pub mod models;
pub mod queries;
pub mod schema;


pub use models::*;
pub use schema::ForecastDatabase;
