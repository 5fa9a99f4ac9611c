//! Engine constants and runtime configuration defaults

// Canvas geometry
/// Side length of the square master canvas used by synthetic algorithms
pub const DEFAULT_MASTER_SIZE: u32 = 4000;
/// Width of the live preview surface
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1920;
/// Height of the live preview surface
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 1080;

// Spatial index
/// Points a quadtree node holds before subdividing
pub const QUADTREE_CAPACITY: usize = 8;
// Coincident points would otherwise subdivide forever
/// Depth below which quadtree nodes stop subdividing
pub const QUADTREE_MAX_DEPTH: usize = 16;

// Particle flow
/// Particles created per initialization
pub const PARTICLE_COUNT: usize = 500;
/// Particle diameter in canvas pixels
pub const PARTICLE_SIZE: f64 = 2.0;
/// Distance a particle travels per step, independent of the speed setting
pub const MOVE_SPEED: f64 = 0.4;
/// Divisor applied to canvas coordinates before sampling noise
pub const MOVE_SCALE: f64 = 800.0;
/// Per-tick probability that a particle respawns anywhere
pub const RESPAWN_PROBABILITY: f64 = 0.001;
/// Alpha of the fade layer painted in transparent mode
pub const TRANSPARENT_FADE_ALPHA: u8 = 3;

// Significant-change detection
/// Percentage-point change in density or complexity that rebuilds populations
pub const SIGNIFICANT_CHANGE_THRESHOLD: f64 = 5.0;

// Hex cellular automaton
/// Smallest hex cell size in canvas pixels
pub const HEX_MIN_CELL_SIZE: f64 = 20.0;
/// Minimum number of cyclic states
pub const HEX_MIN_STATES: usize = 3;
/// Automaton passes per tick while previewing
pub const HEX_PREVIEW_STEPS: usize = 2;
/// Automaton passes per tick while capturing
pub const HEX_CAPTURE_STEPS: usize = 5;

// Flow-field plotter
/// Ticks after which the plotter effect is finished
pub const FLOW_TICK_BUDGET: u64 = 400;
/// Largest source area sampled without downscaling
pub const FLOW_MAX_SAMPLE_PIXELS: u64 = 4_000_000;
/// Base stroke length in canvas pixels
pub const FLOW_BASE_STROKE_LENGTH: f64 = 15.0;
/// Main-pass strokes per tick before resolution and density scaling
pub const FLOW_BASE_STROKES: f64 = 40.0;
/// Stroke width at the start of the budget
pub const FLOW_START_THICKNESS: f64 = 25.0;
/// Stroke width at the end of the budget
pub const FLOW_END_THICKNESS: f64 = 2.0;
/// Ticks between grid filler passes
pub const FLOW_FILLER_INTERVAL: u64 = 5;
/// Ticks between overlay passes
pub const FLOW_OVERLAY_INTERVAL: u64 = 7;
/// Ticks between micro-stroke passes
pub const FLOW_MICRO_INTERVAL: u64 = 3;
/// Megapixels above which micro-strokes are drawn
pub const FLOW_MICRO_MEGAPIXELS: f64 = 2.0;
/// Alpha of the full-image overlay pass
pub const FLOW_OVERLAY_ALPHA: u8 = 10;

// Abstract shapes
/// Grid resolution of the abstract composition while previewing
pub const ABSTRACT_GRID: usize = 16;
/// Grid resolution of the abstract composition while capturing
pub const ABSTRACT_CAPTURE_GRID: usize = 32;
/// Ticks between automaton updates while previewing
pub const ABSTRACT_UPDATE_INTERVAL: u64 = 6;
/// Per-cell mutation probability
pub const ABSTRACT_MUTATION_PROBABILITY: f64 = 0.005;

// Raster effects
/// Characters ordered from darkest to brightest
pub const ASCII_RAMP: &str = " .:-=+*#%@";
/// Smallest ASCII cell in canvas pixels
pub const ASCII_MIN_CELL: u32 = 6;

// Scheduling
/// Target frame rate of animated algorithms
pub const PREVIEW_FRAME_RATE: u32 = 30;
/// Target frame rate of the abstract composition
pub const ABSTRACT_FRAME_RATE: u32 = 10;
/// Target frame rate while capturing
pub const CAPTURE_FRAME_RATE: u32 = 60;
/// Ticks a capture request holds before its frame is ready
pub const CAPTURE_TICKS: u32 = 12;

// Export
/// Largest export dimension accepted
pub const MAX_EXPORT_DIMENSION: f64 = 16_384.0;
/// JPEG quality used for high quality exports
pub const JPEG_HIGH_QUALITY: u8 = 95;
/// JPEG quality used otherwise
pub const JPEG_STANDARD_QUALITY: u8 = 90;
/// Minimum height of the metadata strip
pub const METADATA_MIN_HEIGHT: u32 = 24;
/// Minimum width of the metadata strip
pub const METADATA_MIN_WIDTH: u32 = 200;
/// Distance of the metadata strip from the canvas edge
pub const METADATA_MARGIN: u32 = 5;
/// Opacity of the metadata strip background
pub const METADATA_ALPHA: u8 = 153;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Ticks run by the command-line front end
pub const DEFAULT_TICKS: usize = 120;
/// Default output file
pub const DEFAULT_OUTPUT: &str = "wallpaper.png";

// Animation output
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 33;
/// Minimum delay most viewers honour
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
/// Ticks between captured animation frames
pub const GIF_CAPTURE_INTERVAL: usize = 4;
