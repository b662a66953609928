//! Route handlers.

pub mod api;
pub mod board_html;
pub mod drag;
