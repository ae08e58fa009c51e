//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use playbook_core::{Board, BoardSurface, Orientation, SurfaceConfig};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid viewport size: {0}x{1}")]
    InvalidViewport(f64, f64),
    #[error("No scene has been built")]
    NoScene,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The board to render.
    pub board: &'a Board,
    /// Live surface state: preview, selection, handles and label editor.
    pub surface: Option<&'a BoardSurface>,
    /// Viewport size in pixels.
    pub viewport_size: Size,
    /// Board orientation (token sizes only).
    pub orientation: Orientation,
    /// Token sizes and handle radius.
    pub config: SurfaceConfig,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Overlay the padded hit areas of drawings.
    pub show_hit_areas: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(board: &'a Board, viewport_size: Size) -> Self {
        Self {
            board,
            surface: None,
            viewport_size,
            orientation: Orientation::default(),
            config: SurfaceConfig::default(),
            background_color: Color::from_rgba8(21, 128, 61, 255), // Pitch green
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            show_hit_areas: false,
        }
    }

    /// Render live interaction state from a surface. Takes the surface's
    /// orientation and config as well.
    pub fn with_surface(mut self, surface: &'a BoardSurface) -> Self {
        self.surface = Some(surface);
        self.orientation = surface.orientation();
        self.config = surface.config().clone();
        self
    }

    /// Set the board orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the surface config used for token sizes.
    pub fn with_config(mut self, config: SurfaceConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Toggle the hit area overlay.
    pub fn with_hit_areas(mut self, show: bool) -> Self {
        self.show_hit_areas = show;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
