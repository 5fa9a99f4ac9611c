//! Algorithm identities and the generator interface they implement

use crate::canvas::master::MasterCanvas;
use crate::color::palette::ColorSet;
use crate::io::configuration::{ABSTRACT_FRAME_RATE, PREVIEW_FRAME_RATE};
use crate::io::error::{WallgenError, invalid_parameter};
use crate::params::normalize::NormalizedParams;
use crate::params::parameters::ParameterSet;
use image::RgbaImage;
use std::fmt;
use std::str::FromStr;

/// The generative algorithms, exactly one is active per engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Noise-steered particles leaving trails
    PerlinFlow,
    /// Rock-paper-scissors automaton on a hex grid
    HexCellular,
    /// Directional strokes sampled from a source image
    FlowFieldPlot,
    /// Two-tone error-diffusion dithering
    Dither,
    /// Brightness mapped onto a character ramp
    AsciiMosaic,
    /// Animated two-color gradient bands
    GradientBands,
    /// De Stijl composition driven by a cellular automaton
    AbstractShapes,
}

impl Algorithm {
    /// Every algorithm in selection order
    pub const ALL: [Self; 7] = [
        Self::PerlinFlow,
        Self::HexCellular,
        Self::FlowFieldPlot,
        Self::Dither,
        Self::AsciiMosaic,
        Self::GradientBands,
        Self::AbstractShapes,
    ];

    /// Short identifier used on the command line
    pub const fn name(self) -> &'static str {
        match self {
            Self::PerlinFlow => "perlin",
            Self::HexCellular => "cellular",
            Self::FlowFieldPlot => "flow",
            Self::Dither => "dither",
            Self::AsciiMosaic => "ascii",
            Self::GradientBands => "gradient",
            Self::AbstractShapes => "abstract",
        }
    }

    /// Display name
    pub const fn label(self) -> &'static str {
        match self {
            Self::PerlinFlow => "Perlin Flow",
            Self::HexCellular => "Hex Cellular",
            Self::FlowFieldPlot => "Flow Plotter",
            Self::Dither => "Dither",
            Self::AsciiMosaic => "ASCII Mosaic",
            Self::GradientBands => "Gradient Bands",
            Self::AbstractShapes => "Mondriomaton",
        }
    }

    /// Whether the canvas takes the source image's native size
    pub const fn requires_image_canvas(self) -> bool {
        matches!(self, Self::FlowFieldPlot)
    }

    /// Whether the algorithm reads pixels from an uploaded image
    pub const fn uses_source_image(self) -> bool {
        matches!(self, Self::FlowFieldPlot | Self::Dither | Self::AsciiMosaic)
    }

    /// Target frame rate outside capture mode
    pub const fn preview_frame_rate(self) -> u32 {
        match self {
            Self::AbstractShapes => ABSTRACT_FRAME_RATE,
            _ => PREVIEW_FRAME_RATE,
        }
    }

    /// Stable number mixed into initialization seeds
    pub const fn seed_salt(self) -> u64 {
        match self {
            Self::PerlinFlow => 1,
            Self::HexCellular => 2,
            Self::FlowFieldPlot => 3,
            Self::Dither => 4,
            Self::AsciiMosaic => 5,
            Self::GradientBands => 6,
            Self::AbstractShapes => 7,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = WallgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let algorithm = match key.as_str() {
            "perlin" | "perlin_flow" | "perlin_noise" | "perlinnoise" => Self::PerlinFlow,
            "cellular" | "hex" | "hex_cellular" => Self::HexCellular,
            "flow" | "flow_plot" | "flow_plotter" | "flowplotter" => Self::FlowFieldPlot,
            "dither" | "dithering" => Self::Dither,
            "ascii" | "ascii_mosaic" => Self::AsciiMosaic,
            "gradient" | "gradient_bands" => Self::GradientBands,
            "abstract" | "abstract_shapes" | "mondriomaton" => Self::AbstractShapes,
            _ => {
                return Err(invalid_parameter(
                    "algorithm",
                    &s,
                    &"expected perlin, cellular, flow, dither, ascii, gradient or abstract",
                ));
            }
        };
        Ok(algorithm)
    }
}

/// Inputs a generator reads during initialization and ticks
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Resolved drawing colors
    pub colors: &'a ColorSet,
    /// Identifier of the selected palette
    pub palette_id: &'a str,
    /// Clamped user parameters
    pub params: &'a ParameterSet,
    /// Parameters in native units
    pub normalized: NormalizedParams,
    /// Whether a capture is in progress
    pub capturing: bool,
    /// Decoded source image, if one is loaded
    pub source: Option<&'a RgbaImage>,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The canvas changed
    Drawn,
    /// Nothing was drawn this tick
    Idle,
    /// The effect reached its end on this tick
    Finished,
}

/// One algorithm's live state
///
/// A generator is built by its `new` function, which also paints the
/// initial frame, and is dropped on algorithm switch or reset.
pub trait Generator {
    /// Advances the animation one step and draws into the canvas
    fn tick(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) -> TickOutcome;

    /// Picks up a parameter change that does not rebuild the population
    fn refresh(&mut self, canvas: &mut MasterCanvas, ctx: &TickContext<'_>) {
        let _ = (canvas, ctx);
    }

    /// Whether the effect has reached a stable end state
    fn is_finished(&self) -> bool {
        false
    }
}
