//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering, layout and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `views`: Per-screen content (overview charts, Spark panels, placeholders)

pub mod input;
pub mod render;
pub mod styles;
pub mod views;
