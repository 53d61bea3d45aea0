//! Type-safe wrappers and enums for NBA stats data.

pub mod ids;
pub mod locale;
pub mod stat;
pub mod time;

pub use ids::{PlayerId, TeamId};
pub use locale::Locale;
pub use stat::StatCategory;
pub use time::Season;
