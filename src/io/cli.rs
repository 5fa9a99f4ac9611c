//! Command-line front end: run an algorithm for a number of ticks and export

use crate::algorithm::engine::{AlgorithmEngine, CapturePurpose, EngineConfig, EngineEvent};
use crate::algorithm::kind::Algorithm;
use crate::canvas::export::{ExportFit, ExportFormat, ExportRequest, ExportSize};
use crate::canvas::viewport::Viewport;
use crate::color::palette::{Color, ColorSet, Palette};
use crate::io::animation::AnimationCapture;
use crate::io::configuration::{
    CAPTURE_TICKS, DEFAULT_MASTER_SIZE, DEFAULT_OUTPUT, DEFAULT_SEED, DEFAULT_TICKS,
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, GIF_CAPTURE_INTERVAL, GIF_FRAME_DELAY_MS,
};
use crate::io::error::Result;
use crate::io::image::{decode_file, save_raster};
use crate::io::progress::ProgressManager;
use crate::params::parameters::{
    DEFAULT_COMPLEXITY, DEFAULT_DENSITY, DEFAULT_NOISE_SCALE, DEFAULT_SPEED, ParameterSet,
};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Identifier of the palette assembled from color flags
pub const CUSTOM_PALETTE_ID: &str = "custom";

#[derive(Parser)]
#[command(name = "wallgen")]
#[command(
    author,
    version,
    about = "Generate procedural wallpapers and export them at any resolution"
)]
/// Command-line arguments for the wallpaper generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output file
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Algorithm: perlin, cellular, flow, dither, ascii, gradient or abstract
    #[arg(short, long, default_value = "perlin")]
    pub algorithm: Algorithm,

    /// Palette identifier
    #[arg(short, long, default_value = "bw")]
    pub palette: String,

    /// Swap background and foreground colors
    #[arg(short, long)]
    pub invert: bool,

    /// Custom background color, e.g. #1a0633
    #[arg(long)]
    pub background: Option<Color>,

    /// Custom foreground color
    #[arg(long)]
    pub foreground: Option<Color>,

    /// Custom accent color, may be repeated up to five times
    #[arg(long = "accent")]
    pub accents: Vec<Color>,

    /// Noise scale in percent
    #[arg(long, default_value_t = DEFAULT_NOISE_SCALE)]
    pub noise: f64,

    /// Animation speed in percent
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: f64,

    /// Complexity in percent
    #[arg(long, default_value_t = DEFAULT_COMPLEXITY)]
    pub complexity: f64,

    /// Density in percent
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    pub density: f64,

    /// Fade trails to transparency instead of painting a background
    #[arg(long)]
    pub transparent: bool,

    /// Base stroke length of the flow plotter
    #[arg(long)]
    pub stroke_length: Option<f64>,

    /// Stroke thickness multiplier of the flow plotter
    #[arg(long)]
    pub stroke_thickness: Option<f64>,

    /// Randomize the noise field on load
    #[arg(long)]
    pub randomize: bool,

    /// Source image for flow, dither and ascii
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Ticks to run before exporting
    #[arg(short, long, default_value_t = DEFAULT_TICKS)]
    pub ticks: usize,

    /// Export width in pixels
    #[arg(short = 'w', long, default_value_t = f64::from(DEFAULT_VIEWPORT_WIDTH))]
    pub width: f64,

    /// Export height in pixels
    #[arg(short = 'H', long, default_value_t = f64::from(DEFAULT_VIEWPORT_HEIGHT))]
    pub height: f64,

    /// Output format (png, jpeg), inferred from the output extension when absent
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// How the visible region fills the export (crop, scale)
    #[arg(long, default_value = "crop")]
    pub fit: ExportFit,

    /// Stamp the algorithm name into the bottom-left corner
    #[arg(short, long)]
    pub metadata: bool,

    /// Faster resampling and lower JPEG quality
    #[arg(long)]
    pub fast: bool,

    /// Side length of the master canvas
    #[arg(long, default_value_t = DEFAULT_MASTER_SIZE)]
    pub master_size: u32,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Also write the run as an animated GIF to this path
    #[arg(long)]
    pub animate: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Parameter set described by the flags
    pub fn parameters(&self) -> ParameterSet {
        ParameterSet {
            noise_scale: self.noise,
            speed: self.speed,
            complexity: self.complexity,
            density: self.density,
            transparent_background: self.transparent,
            stroke_length: self.stroke_length,
            stroke_thickness: self.stroke_thickness,
            image_ref: self.image.as_ref().map(|path| path.display().to_string()),
            randomize_on_load: self.randomize,
        }
        .clamped()
    }

    /// Export format from the flag or the output extension
    pub fn export_format(&self) -> ExportFormat {
        self.format.unwrap_or_else(|| {
            self.output
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| ext.parse().ok())
                .unwrap_or_default()
        })
    }

    /// Palette built from the color flags over the selected palette
    pub fn custom_palette(&self, base: &ColorSet) -> Option<Palette> {
        if self.background.is_none() && self.foreground.is_none() && self.accents.is_empty() {
            return None;
        }
        let accents = if self.accents.is_empty() {
            base.foreground_palette.clone()
        } else {
            self.accents.clone()
        };
        let colors = ColorSet::new(
            self.background.unwrap_or(base.background),
            self.foreground.unwrap_or(base.foreground),
            accents,
        );
        Some(Palette::new(CUSTOM_PALETTE_ID, "Custom", colors))
    }

    /// Export request described by the flags
    ///
    /// # Errors
    ///
    /// Returns an error if the export dimensions are unsupported
    pub fn export_request(&self) -> Result<ExportRequest> {
        let mut request = ExportRequest::new(ExportSize::new(self.width, self.height)?);
        request.format = self.export_format();
        request.fit = self.fit;
        request.high_quality = !self.fast;
        request.include_metadata = self.metadata;
        Ok(request)
    }
}

/// Installs the fmt subscriber, honouring `RUST_LOG`
///
/// Defaults to `wallgen=info`, or warnings only when `quiet` is set.
pub fn init_logging(quiet: bool) {
    let default = if quiet { "wallgen=warn" } else { "wallgen=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Drives one generation run from parsed arguments
pub struct GenerationRun {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl GenerationRun {
    /// Create a run for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        Self {
            cli,
            progress_manager,
        }
    }

    /// Runs the algorithm and writes the outputs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The export dimensions are unsupported
    /// - The source image cannot be read or decoded
    /// - An output file cannot be written
    pub fn process(&mut self) -> Result<PathBuf> {
        let start_time = Instant::now();
        let request = self.cli.export_request()?;

        let config = EngineConfig {
            master_size: self.cli.master_size,
            viewport: Viewport::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            seed: self.cli.seed,
        };
        let mut engine = AlgorithmEngine::new(config);

        engine.select_palette(&self.cli.palette);
        if let Some(palette) = self.cli.custom_palette(&engine.colors()) {
            engine.palettes_mut().add_custom(palette);
            engine.select_palette(CUSTOM_PALETTE_ID);
        }
        engine.set_inverted(self.cli.invert);

        if let Some(path) = &self.cli.image {
            engine.set_source_image(decode_file(path)?);
        }
        engine.select(self.cli.algorithm, self.cli.parameters());

        let mut animation = self.cli.animate.as_ref().map(|_| AnimationCapture::new());
        self.run_ticks(&mut engine, animation.as_mut());
        self.run_capture(&mut engine);

        let raster = engine.export(&request);
        let output = save_raster(&raster, &self.cli.output)?;

        if let (Some(path), Some(capture)) = (&self.cli.animate, &animation) {
            capture.export_gif(path, GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        info!(
            algorithm = self.cli.algorithm.name(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "generation complete"
        );
        Ok(output)
    }

    fn run_ticks(&mut self, engine: &mut AlgorithmEngine, mut animation: Option<&mut AnimationCapture>) {
        let phase = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_phase("generate", self.cli.ticks as u64));

        for tick in 0..self.cli.ticks {
            engine.tick();
            if let (Some(pm), Some(phase)) = (&self.progress_manager, phase) {
                pm.advance(phase);
            }
            if let Some(capture) = animation.as_deref_mut() {
                if tick % GIF_CAPTURE_INTERVAL == 0 {
                    capture.record(engine.frame());
                }
            }
            if engine.is_finished() {
                debug!(tick, "effect finished early");
                break;
            }
        }

        if let (Some(pm), Some(phase)) = (&self.progress_manager, phase) {
            pm.complete(phase, self.cli.algorithm.label());
        }
    }

    // Runs the capture window so the export sees the higher-detail frame
    fn run_capture(&mut self, engine: &mut AlgorithmEngine) {
        let phase = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_phase("capture", u64::from(CAPTURE_TICKS)));

        engine.request_capture(CapturePurpose::Export);
        let mut ready = false;
        for _ in 0..CAPTURE_TICKS {
            engine.tick();
            if let (Some(pm), Some(phase)) = (&self.progress_manager, phase) {
                pm.advance(phase);
            }
            for event in engine.drain_events() {
                match event {
                    EngineEvent::CaptureReady(_) => ready = true,
                    EngineEvent::ImageDecodeFailed { reason } => warn!(reason = %reason, "decode failed"),
                    other => debug!(event = ?other, "engine event"),
                }
            }
            if ready {
                break;
            }
        }

        if let (Some(pm), Some(phase)) = (&self.progress_manager, phase) {
            pm.complete(phase, "ready");
        }
    }
}
