//! Deterministic one-line debug rendering for arbitrary reflected values.

/// Value reflection, rendering, and special-type formatting.
pub mod pretty;

pub use pretty::{Reflect, RenderError, Renderer, render, try_render};
