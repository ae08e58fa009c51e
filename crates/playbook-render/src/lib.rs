//! Playbook Render Library
//!
//! Renderer abstraction and implementations for the Playbook tactical board.
//! The default implementation produces SVG.

mod renderer;
mod svg_renderer;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg_renderer::SvgRenderer;
