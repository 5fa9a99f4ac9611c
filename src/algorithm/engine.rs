//! The algorithm state machine that owns the master canvas
//!
//! The engine holds exactly one active generator. Selecting an algorithm,
//! changing palette or inversion, a reset, or a large parameter jump tears the
//! generator down and builds a new one; smaller parameter changes only
//! refresh it. Every initialization draws from an RNG seeded by the engine
//! seed, the algorithm and the reset generation, so returning to an
//! algorithm reproduces its opening frame.

use crate::algorithm::abstract_shapes::AbstractShapes;
use crate::algorithm::ascii::AsciiMosaic;
use crate::algorithm::dither::Dither;
use crate::algorithm::flow_plot::FlowPlot;
use crate::algorithm::gradient::GradientBands;
use crate::algorithm::hex_cellular::HexCellular;
use crate::algorithm::kind::{Algorithm, Generator, TickContext, TickOutcome};
use crate::algorithm::perlin_flow::PerlinFlow;
use crate::canvas::export::{ExportRequest, ExportSource, ExportedRaster, export_raster};
use crate::canvas::master::MasterCanvas;
use crate::canvas::viewport::Viewport;
use crate::color::palette::{ColorSet, PaletteRegistry};
use crate::color::resolver::resolve;
use crate::io::configuration::{
    CAPTURE_FRAME_RATE, CAPTURE_TICKS, DEFAULT_MASTER_SIZE, DEFAULT_SEED, DEFAULT_VIEWPORT_HEIGHT,
    DEFAULT_VIEWPORT_WIDTH, PREVIEW_FRAME_RATE,
};
use crate::io::error::{Result, state_corruption};
use crate::io::image::decode_bytes;
use crate::params::normalize::{NormalizedParams, normalize};
use crate::params::parameters::{ParameterSet, ParameterUpdate};
use image::RgbaImage;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, info, warn};

/// Runtime configuration of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Side length of the square canvas used by synthetic algorithms
    pub master_size: u32,
    /// Preview surface
    pub viewport: Viewport,
    /// Base seed for every initialization
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            master_size: DEFAULT_MASTER_SIZE,
            viewport: Viewport::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            seed: DEFAULT_SEED,
        }
    }
}

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No algorithm selected yet
    Uninitialized,
    /// An algorithm is initialized but has not ticked since
    Ready(Algorithm),
    /// The active algorithm has ticked at least once
    Ticking(Algorithm),
}

/// Why a capture was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePurpose {
    /// A still export
    Export,
    /// Frames for an animation
    Animation,
}

/// Notifications for the host, collected until drained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// An uploaded image finished decoding
    ImageLoaded {
        /// Native width
        width: u32,
        /// Native height
        height: u32,
    },
    /// An uploaded image could not be decoded
    ImageDecodeFailed {
        /// Decoder message
        reason: String,
    },
    /// The capture window elapsed and the canvas holds the captured frame
    CaptureReady(CapturePurpose),
    /// The active effect reached its end state
    EffectFinished(Algorithm),
}

/// Inbound commands accepted by [`AlgorithmEngine::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Switch to an algorithm, keeping the parameters
    SelectAlgorithm(Algorithm),
    /// Merge a partial parameter update
    UpdateParameters(ParameterUpdate),
    /// Switch palette by identifier
    SelectPalette(String),
    /// Toggle color inversion
    SetInverted(bool),
    /// Rebuild the active algorithm with fresh randomness
    Reset,
    /// Run the capture window
    RequestCapture(CapturePurpose),
    /// Decode an encoded image in the background
    UploadImage(Vec<u8>),
    /// Drop the source image
    ResetImage,
}

/// Seed for one initialization
///
/// Mixes the engine seed, the algorithm and the reset generation with a
/// splitmix64 finalizer.
pub const fn init_seed(seed: u64, algorithm: Algorithm, generation: u64) -> u64 {
    let mut z = seed
        ^ algorithm.seed_salt().wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ generation.wrapping_mul(0xD1B5_4A32_D192_ED03);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn build_generator(
    algorithm: Algorithm,
    canvas: &mut MasterCanvas,
    ctx: &TickContext<'_>,
    seed: u64,
) -> Box<dyn Generator> {
    match algorithm {
        Algorithm::PerlinFlow => Box::new(PerlinFlow::new(canvas, ctx, seed)),
        Algorithm::HexCellular => Box::new(HexCellular::new(canvas, ctx, seed)),
        Algorithm::FlowFieldPlot => Box::new(FlowPlot::new(canvas, ctx, seed)),
        Algorithm::Dither => Box::new(Dither::new(canvas, ctx, seed)),
        Algorithm::AsciiMosaic => Box::new(AsciiMosaic::new(canvas, ctx, seed)),
        Algorithm::GradientBands => Box::new(GradientBands::new(canvas, ctx, seed)),
        Algorithm::AbstractShapes => Box::new(AbstractShapes::new(canvas, ctx, seed)),
    }
}

#[derive(Debug, Clone, Copy)]
struct Capture {
    purpose: CapturePurpose,
    remaining: u32,
}

/// Owns the master canvas and drives the active algorithm
pub struct AlgorithmEngine {
    config: EngineConfig,
    palettes: PaletteRegistry,
    palette_id: String,
    inverted: bool,
    params: ParameterSet,
    algorithm: Option<Algorithm>,
    generator: Option<Box<dyn Generator>>,
    canvas: MasterCanvas,
    source: Option<RgbaImage>,
    pending_decode: Option<Receiver<Result<RgbaImage>>>,
    reset_generation: u64,
    capture: Option<Capture>,
    events: Vec<EngineEvent>,
    finished_reported: bool,
    ticked: bool,
}

impl Default for AlgorithmEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AlgorithmEngine {
    /// Creates an engine with the built-in palettes and the first one selected
    pub fn new(config: EngineConfig) -> Self {
        let palettes = PaletteRegistry::builtin();
        let palette_id = palettes.ids().next().unwrap_or_default().to_string();
        Self {
            config,
            palettes,
            palette_id,
            inverted: false,
            params: ParameterSet::default(),
            algorithm: None,
            generator: None,
            canvas: MasterCanvas::square(config.master_size),
            source: None,
            pending_decode: None,
            reset_generation: 0,
            capture: None,
            events: Vec::new(),
            finished_reported: false,
            ticked: false,
        }
    }

    /// Palette registry, for adding custom palettes
    pub const fn palettes_mut(&mut self) -> &mut PaletteRegistry {
        &mut self.palettes
    }

    /// Engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Selects an algorithm with a full parameter set and initializes it
    pub fn select(&mut self, algorithm: Algorithm, params: ParameterSet) {
        self.params = params.clamped();
        self.algorithm = Some(algorithm);
        info!(algorithm = algorithm.name(), "algorithm selected");
        self.initialize();
    }

    /// Switches algorithm, keeping the current parameters
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.select(algorithm, self.params.clone());
    }

    /// Merges a parameter update
    ///
    /// Rebuilds the generator when the change is significant, otherwise
    /// lets it pick the new values up in place.
    pub fn update_parameters(&mut self, update: &ParameterUpdate) {
        let previous = self.params.clone();
        self.params.apply(update);

        if self.params.differs_significantly(&previous) {
            debug!("significant parameter change, rebuilding");
            self.initialize();
        } else {
            self.refresh();
        }
    }

    /// Selects a palette, unknown identifiers fall back to the first palette
    pub fn select_palette(&mut self, id: &str) {
        if !self.palettes.contains(id) {
            warn!(palette = id, "unknown palette, using the default");
        }
        let resolved = self.palettes.get(id).id.clone();
        if resolved != self.palette_id {
            self.palette_id = resolved;
            self.initialize();
        }
    }

    /// Turns color inversion on or off
    pub fn set_inverted(&mut self, inverted: bool) {
        if inverted != self.inverted {
            self.inverted = inverted;
            self.initialize();
        }
    }

    /// Rebuilds the active algorithm with the next reset generation
    pub fn request_reset(&mut self) {
        self.reset_generation = self.reset_generation.wrapping_add(1);
        debug!(generation = self.reset_generation, "reset requested");
        self.initialize();
    }

    /// Starts a capture window of [`CAPTURE_TICKS`] ticks
    pub fn request_capture(&mut self, purpose: CapturePurpose) {
        self.capture = Some(Capture {
            purpose,
            remaining: CAPTURE_TICKS,
        });
    }

    /// Starts decoding an encoded image on a background thread
    ///
    /// The result is picked up by a later [`tick`](Self::tick) or by
    /// [`finish_pending_decode`](Self::finish_pending_decode).
    pub fn upload_image(&mut self, bytes: Vec<u8>) {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let _ = sender.send(decode_bytes(&bytes));
        });
        self.pending_decode = Some(receiver);
        debug!("image decode started");
    }

    /// Installs an already decoded source image
    pub fn set_source_image(&mut self, image: RgbaImage) {
        let (width, height) = image.dimensions();
        self.source = Some(image);
        self.events.push(EngineEvent::ImageLoaded { width, height });
        info!(width, height, "source image loaded");
        if self.algorithm.is_some_and(Algorithm::uses_source_image) {
            self.initialize();
        }
    }

    /// Drops the source image
    pub fn reset_image(&mut self) {
        self.pending_decode = None;
        if self.source.take().is_some() && self.algorithm.is_some_and(Algorithm::uses_source_image) {
            self.initialize();
        }
    }

    /// Blocks until a pending decode completes and applies its result
    pub fn finish_pending_decode(&mut self) {
        if let Some(receiver) = self.pending_decode.take() {
            let result = receiver.recv().unwrap_or_else(|_| {
                Err(state_corruption(
                    "image decoder",
                    &"decoder thread exited without a result",
                ))
            });
            self.apply_decode(result);
        }
    }

    /// Executes an inbound command
    pub fn apply(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::SelectAlgorithm(algorithm) => self.select_algorithm(algorithm),
            EngineCommand::UpdateParameters(update) => self.update_parameters(&update),
            EngineCommand::SelectPalette(id) => self.select_palette(&id),
            EngineCommand::SetInverted(inverted) => self.set_inverted(inverted),
            EngineCommand::Reset => self.request_reset(),
            EngineCommand::RequestCapture(purpose) => self.request_capture(purpose),
            EngineCommand::UploadImage(bytes) => self.upload_image(bytes),
            EngineCommand::ResetImage => self.reset_image(),
        }
    }

    /// Advances the active algorithm by one step
    pub fn tick(&mut self) -> TickOutcome {
        self.poll_decode();

        let Some(algorithm) = self.algorithm else {
            return TickOutcome::Idle;
        };
        // The canvas waits for the new image
        if algorithm.uses_source_image() && self.pending_decode.is_some() {
            return TickOutcome::Idle;
        }
        let colors = self.colors();
        let capturing = self.capture.is_some();
        let ctx = TickContext {
            colors: &colors,
            palette_id: &self.palette_id,
            params: &self.params,
            normalized: normalize(&self.params),
            capturing,
            source: self.source.as_ref(),
        };

        let Some(generator) = self.generator.as_mut() else {
            return TickOutcome::Idle;
        };
        let outcome = generator.tick(&mut self.canvas, &ctx);
        self.ticked = true;

        if outcome == TickOutcome::Finished && !self.finished_reported {
            self.finished_reported = true;
            self.events.push(EngineEvent::EffectFinished(algorithm));
        }

        if let Some(capture) = self.capture.as_mut() {
            capture.remaining = capture.remaining.saturating_sub(1);
            if capture.remaining == 0 {
                self.events.push(EngineEvent::CaptureReady(capture.purpose));
                self.capture = None;
            }
        }
        outcome
    }

    /// Preview raster of the viewport
    pub fn frame(&self) -> RgbaImage {
        let letterbox = self.is_image_based();
        self.config
            .viewport
            .present(self.canvas.image(), letterbox, self.colors().background)
    }

    /// The master canvas
    pub const fn canvas(&self) -> &MasterCanvas {
        &self.canvas
    }

    /// Cuts an export raster from the canvas
    pub fn export(&self, request: &ExportRequest) -> ExportedRaster {
        let name = self.algorithm.map_or("none", Algorithm::label);
        let source = ExportSource {
            canvas: self.canvas.image(),
            viewport: &self.config.viewport,
            image_based: self.is_image_based(),
            background: self.colors().background,
            algorithm_name: name,
        };
        export_raster(&source, request)
    }

    /// Takes every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current parameters in algorithm units
    pub fn effective_parameters(&self) -> NormalizedParams {
        normalize(&self.params)
    }

    /// Frame rate the host should tick at
    pub fn target_frame_rate(&self) -> u32 {
        if self.capture.is_some() {
            CAPTURE_FRAME_RATE
        } else {
            self.algorithm
                .map_or(PREVIEW_FRAME_RATE, Algorithm::preview_frame_rate)
        }
    }

    /// Lifecycle state
    pub const fn state(&self) -> EngineState {
        match self.algorithm {
            None => EngineState::Uninitialized,
            Some(algorithm) if self.ticked => EngineState::Ticking(algorithm),
            Some(algorithm) => EngineState::Ready(algorithm),
        }
    }

    /// Active algorithm
    pub const fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Current parameters
    pub const fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    /// Identifier of the selected palette
    pub fn palette_id(&self) -> &str {
        &self.palette_id
    }

    /// Colors after palette lookup and inversion
    pub fn colors(&self) -> ColorSet {
        resolve(&self.palettes.get(&self.palette_id).colors, self.inverted)
    }

    /// Whether a capture window is open
    pub const fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Whether a decode is still in flight
    pub const fn is_decoding(&self) -> bool {
        self.pending_decode.is_some()
    }

    /// Decoded source image
    pub const fn source_image(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    /// Whether the active generator reached its end state
    pub fn is_finished(&self) -> bool {
        self.generator.as_ref().is_some_and(|generator| generator.is_finished())
    }

    /// Times the active algorithm has been reset
    pub const fn reset_generation(&self) -> u64 {
        self.reset_generation
    }

    fn is_image_based(&self) -> bool {
        self.algorithm.is_some_and(Algorithm::requires_image_canvas)
    }

    fn poll_decode(&mut self) {
        let Some(receiver) = self.pending_decode.as_ref() else {
            return;
        };
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(state_corruption(
                "image decoder",
                &"decoder thread exited without a result",
            )),
        };
        self.pending_decode = None;
        self.apply_decode(result);
    }

    fn apply_decode(&mut self, result: Result<RgbaImage>) {
        match result {
            Ok(image) => self.set_source_image(image),
            Err(error) => {
                warn!(error = %error, "image decode failed");
                self.events.push(EngineEvent::ImageDecodeFailed {
                    reason: error.to_string(),
                });
                if self.generator.is_none() {
                    self.initialize();
                }
            }
        }
    }

    fn initialize(&mut self) {
        let Some(algorithm) = self.algorithm else {
            return;
        };
        if algorithm.uses_source_image() && self.pending_decode.is_some() {
            debug!(
                algorithm = algorithm.name(),
                "waiting for image decode before initializing"
            );
            self.generator = None;
            return;
        }

        let (width, height) = match (algorithm.requires_image_canvas(), &self.source) {
            (true, Some(image)) => image.dimensions(),
            (true, None) => (self.config.viewport.width, self.config.viewport.height),
            (false, _) => (self.config.master_size, self.config.master_size),
        };
        self.canvas.resize(width, height);

        let colors = self.colors();
        let ctx = TickContext {
            colors: &colors,
            palette_id: &self.palette_id,
            params: &self.params,
            normalized: normalize(&self.params),
            capturing: self.capture.is_some(),
            source: self.source.as_ref(),
        };
        let seed = init_seed(self.config.seed, algorithm, self.reset_generation);
        debug!(
            algorithm = algorithm.name(),
            width,
            height,
            seed,
            "initializing generator"
        );

        self.generator = Some(build_generator(algorithm, &mut self.canvas, &ctx, seed));
        self.finished_reported = false;
        self.ticked = false;
    }

    fn refresh(&mut self) {
        let colors = self.colors();
        let ctx = TickContext {
            colors: &colors,
            palette_id: &self.palette_id,
            params: &self.params,
            normalized: normalize(&self.params),
            capturing: self.capture.is_some(),
            source: self.source.as_ref(),
        };
        if let Some(generator) = self.generator.as_mut() {
            generator.refresh(&mut self.canvas, &ctx);
        }
    }
}
