//! Reusable UI components

mod alert;
mod dialog;

pub use alert::{alert_line, render_alert, ALERT_HEIGHT};
pub use dialog::render_notice;
