//! Playbook command-line host.
//!
//! Owns boards as files and drives [`playbook_core::BoardSurface`] through
//! scripted gestures, exporting results with [`playbook_render::SvgRenderer`].

pub mod app;
pub mod cli;
pub mod error;
pub mod script;

pub use app::{SurfaceOptions, run};
pub use cli::Cli;
pub use error::{AppError, AppResult};
pub use script::{Step, parse_script, run_script};
