//! Subcommand implementations.

use std::fs;
use std::path::Path;

use kurbo::Size;
use log::{info, warn};
use playbook_core::{Board, BoardHost, BoardSurface, MemoryHost, Orientation, SanitizeReport, SurfaceConfig};
use playbook_render::{RenderContext, Renderer, SvgRenderer};

use crate::cli::{Cli, Commands, SurfaceArgs};
use crate::error::{AppError, AppResult};
use crate::script::{parse_script, run_script};

/// Resolved surface settings.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    pub size: Size,
    pub orientation: Orientation,
    pub config: SurfaceConfig,
    pub hit_areas: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            size: Size::new(1050.0, 680.0),
            orientation: Orientation::default(),
            config: SurfaceConfig::default(),
            hit_areas: false,
        }
    }
}

impl SurfaceOptions {
    pub fn from_args(args: &SurfaceArgs) -> AppResult<Self> {
        let config = match &args.config {
            Some(path) => load_config(path)?,
            None => SurfaceConfig::default(),
        };
        let options = Self {
            size: Size::new(args.width, args.height),
            orientation: args.orientation.into(),
            config,
            hit_areas: args.hit_areas,
        };
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> AppResult<()> {
        let Size { width, height } = self.size;
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(AppError::InvalidSize(width, height))
        }
    }

    fn surface(&self) -> BoardSurface {
        BoardSurface::new(self.size)
            .with_config(self.config.clone())
            .with_orientation(self.orientation)
    }
}

fn read(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::Io { path: path.to_path_buf(), source })
}

fn write(path: &Path, contents: &str) -> AppResult<()> {
    fs::write(path, contents).map_err(|source| AppError::Io { path: path.to_path_buf(), source })
}

/// Load a board, skipping malformed entries.
pub fn load_board(path: &Path) -> AppResult<(Board, SanitizeReport)> {
    let json = read(path)?;
    let (board, report) = Board::from_json_lenient(&json)?;
    if !report.is_clean() {
        warn!(
            "{}: dropped {} items and {} drawings, clamped {}",
            path.display(),
            report.dropped_items,
            report.dropped_drawings,
            report.clamped
        );
    }
    Ok((board, report))
}

pub fn save_board(path: &Path, board: &Board) -> AppResult<()> {
    write(path, &board.to_json()?)
}

pub fn load_config(path: &Path) -> AppResult<SurfaceConfig> {
    let json = read(path)?;
    SurfaceConfig::from_json(&json).map_err(|source| AppError::Json { path: path.to_path_buf(), source })
}

/// Sanitize a board file, optionally rewriting it.
pub fn check(path: &Path, rewrite: bool) -> AppResult<SanitizeReport> {
    let (board, report) = load_board(path)?;
    println!(
        "{}: {} items, {} drawings",
        path.display(),
        board.items.len(),
        board.drawings.len()
    );
    if report.is_clean() {
        println!("clean");
    } else {
        println!(
            "dropped {} items, {} drawings; clamped {}",
            report.dropped_items, report.dropped_drawings, report.clamped
        );
        if rewrite {
            save_board(path, &board)?;
            info!("Rewrote {}", path.display());
        }
    }
    Ok(report)
}

fn export_svg(ctx: &RenderContext, output: &Path) -> AppResult<()> {
    let mut renderer = SvgRenderer::new();
    renderer.build_scene(ctx);
    renderer.save(output)?;
    info!("Wrote {}", output.display());
    Ok(())
}

/// Render a board file to SVG.
pub fn render(board_path: &Path, output: &Path, options: &SurfaceOptions) -> AppResult<()> {
    let (board, _) = load_board(board_path)?;
    let ctx = RenderContext::new(&board, options.size)
        .with_orientation(options.orientation)
        .with_config(options.config.clone())
        .with_hit_areas(options.hit_areas);
    export_svg(&ctx, output)
}

/// Replay a gesture script and write the resulting board.
pub fn replay(
    board_path: &Path,
    script_path: &Path,
    output: &Path,
    svg: Option<&Path>,
    options: &SurfaceOptions,
) -> AppResult<MemoryHost> {
    let (board, _) = load_board(board_path)?;
    let steps = parse_script(&read(script_path)?)
        .map_err(|source| AppError::Json { path: script_path.to_path_buf(), source })?;

    let mut surface = options.surface();
    let mut host = MemoryHost::new(board);
    run_script(&mut surface, &mut host, &steps)?;
    info!(
        "Replayed {} steps: {} updates, {} placements, {} edit requests",
        steps.len(),
        host.updates,
        host.placements,
        host.edit_requests.len()
    );

    save_board(output, host.board())?;
    if let Some(svg) = svg {
        let ctx = RenderContext::new(host.board(), options.size)
            .with_surface(&surface)
            .with_hit_areas(options.hit_areas);
        export_svg(&ctx, svg)?;
    }
    Ok(host)
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> AppResult<()> {
    match cli.command {
        Commands::Check { board, write } => {
            check(&board, write)?;
        }
        Commands::Render { board, output, surface } => {
            render(&board, &output, &SurfaceOptions::from_args(&surface)?)?;
        }
        Commands::Replay { board, script, output, svg, surface } => {
            replay(&board, &script, &output, svg.as_deref(), &SurfaceOptions::from_args(&surface)?)?;
        }
    }
    Ok(())
}
