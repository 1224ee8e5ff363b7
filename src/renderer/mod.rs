//! Rendering boundary
//!
//! The simulation never draws. Each frame, [`render_frame`] walks the game
//! state and issues sprite and glyph calls against a [`DrawSurface`] that a
//! backend (canvas, GPU, terminal) implements.

pub mod frame;
pub mod surface;
pub mod text;

pub use frame::{COLLECTIBLE_FONT_SIZE, COLLECTIBLE_GLYPH, render_frame};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, Sprite};
pub use text::TextSurface;
