//! Terminal rendering: colours, verdict cards and text charts.

pub mod cards;
pub mod chart;
pub mod color;

pub use cards::{defense_footer, verdict_card};
pub use chart::{bar, bar_chart, sparkline, BarGroup};
pub use color::{verdict_tone, Painter, Tone};
