//! Display formatting for chart labels, tooltips and market tables.

pub mod num;
pub mod time;
