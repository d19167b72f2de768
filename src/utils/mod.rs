//! Utility modules shared across the renderer.

pub mod html;
pub mod markdown;
pub mod path;
pub mod plural;
