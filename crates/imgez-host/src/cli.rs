// ============================================================================
// ImgEZ CLI: headless trimming via command-line steps
// ============================================================================
//
// Usage examples:
//   imgez photo.png crop=0.1,0.1,0.9,0.9 -o trimmed.png
//   imgez scan.jpg rotate=-2.5 crop=0.05,0.05,0.95,0.95 -o straight.jpg -q 85
//   imgez photo.png select=0,0,0.5,0.5 copy
//   imgez photo.png rotate=90 rotate=45 undo -D --history-dir history/
//
// Steps run in order against one session, the same way toolbar actions do.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;

use imgez_core::config::DEFAULT_HISTORY_CAPACITY;
use imgez_core::{encode, ClipboardSink, EngineConfig, InterpolationFilter};

use crate::command::Session;
use crate::status::Status;
use crate::step::Step;

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// ImgEZ headless image trimmer.
#[derive(Parser, Debug)]
#[command(
    name = "imgez",
    version,
    about = "Crop, rotate and copy images from the command line",
    long_about = "Apply ImgEZ edit steps to an image and optionally save the result.\n\n\
                  Steps:\n  \
                  select=X0,Y0,X1,Y1   select a region, corners relative to the image (0..1)\n  \
                  crop[=X0,Y0,X1,Y1]   crop to the selection (or to the given corners)\n  \
                  rotate=DEG           rotate clockwise by DEG degrees\n  \
                  copy                 copy the selection (or whole image) to the clipboard\n  \
                  clear, undo, reset"
)]
pub struct CliArgs {
    /// Image to open (png, jpg, jpeg, bmp, gif).
    pub input: PathBuf,

    /// Edit steps, applied in order.
    #[arg(value_name = "STEP")]
    pub steps: Vec<Step>,

    /// Where to save the result. The format follows the extension.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JPEG quality (1-100).
    #[arg(short, long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Use Lanczos3 instead of bilinear sampling for free-angle rotation.
    #[arg(long)]
    pub lanczos: bool,

    /// Number of undo snapshots to keep.
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY, value_name = "N")]
    pub history_capacity: usize,

    /// Keep going after a step that could not run.
    #[arg(long)]
    pub keep_going: bool,

    /// Enable debug mode (history viewer).
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Write history thumbnails to this directory. Requires --debug.
    #[arg(long, value_name = "DIR", requires = "debug")]
    pub history_dir: Option<PathBuf>,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn engine_config(&self) -> EngineConfig {
        let rotation_filter = if self.lanczos {
            InterpolationFilter::Lanczos3
        } else {
            InterpolationFilter::Bilinear
        };
        EngineConfig {
            history_capacity: self.history_capacity,
            rotation_filter,
            jpeg_quality: self.quality,
            debug: self.debug,
            ..EngineConfig::default()
        }
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Open the input, run every step, then write history and output.
pub fn run_with<C: ClipboardSink>(args: &CliArgs, clipboard: C) -> anyhow::Result<Session<C>> {
    let mut session = Session::new(args.engine_config(), clipboard);
    session
        .engine_mut()
        .load(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;

    for step in &args.steps {
        match step.apply(&mut session) {
            Status::Warning(text) if args.keep_going => log::warn!("{step}: {text}"),
            Status::Warning(text) => bail!("step `{step}` failed: {text}"),
            Status::Info(text) => log::info!("{step}: {text}"),
            Status::Silent => log::debug!("{step}: done"),
        }
    }

    if let Some(dir) = &args.history_dir {
        write_history(&session, dir, args.quality)?;
    }

    if let Some(output) = &args.output {
        session
            .engine()
            .save(output)
            .with_context(|| format!("failed to save {}", output.display()))?;
    }

    Ok(session)
}

/// Write one PNG per history snapshot, base first.
fn write_history<C: ClipboardSink>(
    session: &Session<C>,
    dir: &Path,
    quality: u8,
) -> anyhow::Result<()> {
    let thumbnails = session
        .history_thumbnails()
        .context("history viewer requires --debug")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    for (index, thumbnail) in thumbnails.iter().enumerate() {
        let path = dir.join(format!("history-{index:02}.png"));
        encode::encode_to_path(thumbnail, &path, quality)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    log::info!("Wrote {} history thumbnail(s) to {}", thumbnails.len(), dir.display());
    Ok(())
}
