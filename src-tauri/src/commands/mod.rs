//! Commands Layer
//!
//! Tauri command handlers that bridge the frontend to insights-core.

mod insights_cmd;
mod stock_cmd;

pub use insights_cmd::*;
pub use stock_cmd::*;
