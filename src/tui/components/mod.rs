// Components module - reusable UI building blocks
//
// Each component renders into a caller-provided Rect and reads only the
// state handed to it. Screen-level composition lives in the views module.

pub mod api_key_modal;
pub mod daily_trend;
pub mod endpoint_table;
pub mod formatters;
pub mod logs_panel;
pub mod status_bar;
pub mod status_chart;
pub mod summary_cards;
pub mod toast;

pub use formatters::{format_amount, format_compact_number, format_number};
pub use toast::Toast;
