//! User-facing percentage controls and partial updates

use crate::io::configuration::SIGNIFICANT_CHANGE_THRESHOLD;

/// Default noise scale percentage
pub const DEFAULT_NOISE_SCALE: f64 = 50.0;
/// Default speed percentage
pub const DEFAULT_SPEED: f64 = 30.0;
/// Default complexity percentage
pub const DEFAULT_COMPLEXITY: f64 = 70.0;
/// Default density percentage
pub const DEFAULT_DENSITY: f64 = 60.0;

/// Full set of generation parameters
///
/// The four main controls are percentages in `[0, 100]`; see
/// [`ParameterSet::clamped`] for how out-of-range values are treated.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Noise sampling scale percentage
    pub noise_scale: f64,
    /// Animation speed percentage
    pub speed: f64,
    /// Complexity percentage
    pub complexity: f64,
    /// Density percentage
    pub density: f64,
    /// Fade towards transparency instead of painting a background
    pub transparent_background: bool,
    /// Base stroke length in canvas pixels for the flow plotter
    pub stroke_length: Option<f64>,
    /// Stroke width multiplier for the flow plotter
    pub stroke_thickness: Option<f64>,
    /// Label of the source image in use, if any
    pub image_ref: Option<String>,
    /// Start animations at a random point in time
    pub randomize_on_load: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            noise_scale: DEFAULT_NOISE_SCALE,
            speed: DEFAULT_SPEED,
            complexity: DEFAULT_COMPLEXITY,
            density: DEFAULT_DENSITY,
            transparent_background: false,
            stroke_length: None,
            stroke_thickness: None,
            image_ref: None,
            randomize_on_load: false,
        }
    }
}

/// Clamps a percentage into `[0, 100]`, NaN becomes `default`
pub fn clamp_percent(value: f64, default: f64) -> f64 {
    if value.is_nan() {
        default
    } else {
        value.clamp(0.0, 100.0)
    }
}

impl ParameterSet {
    /// Copy with every field inside its valid range
    ///
    /// Percentages are clamped, stroke length is kept in `[1, 200]` and the
    /// thickness multiplier in `[0.1, 5]`. Non-finite optional values are
    /// discarded.
    pub fn clamped(&self) -> Self {
        Self {
            noise_scale: clamp_percent(self.noise_scale, DEFAULT_NOISE_SCALE),
            speed: clamp_percent(self.speed, DEFAULT_SPEED),
            complexity: clamp_percent(self.complexity, DEFAULT_COMPLEXITY),
            density: clamp_percent(self.density, DEFAULT_DENSITY),
            stroke_length: self
                .stroke_length
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(1.0, 200.0)),
            stroke_thickness: self
                .stroke_thickness
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(0.1, 5.0)),
            ..self.clone()
        }
    }

    /// Merges a partial update into this set
    pub fn apply(&mut self, update: &ParameterUpdate) {
        if let Some(v) = update.noise_scale {
            self.noise_scale = v;
        }
        if let Some(v) = update.speed {
            self.speed = v;
        }
        if let Some(v) = update.complexity {
            self.complexity = v;
        }
        if let Some(v) = update.density {
            self.density = v;
        }
        if let Some(v) = update.transparent_background {
            self.transparent_background = v;
        }
        if let Some(v) = update.stroke_length {
            self.stroke_length = v;
        }
        if let Some(v) = update.stroke_thickness {
            self.stroke_thickness = v;
        }
        if let Some(v) = &update.image_ref {
            self.image_ref.clone_from(v);
        }
        if let Some(v) = update.randomize_on_load {
            self.randomize_on_load = v;
        }
        *self = self.clamped();
    }

    /// Whether moving from `previous` to `self` must rebuild populations
    ///
    /// Only density, complexity and the randomize flag matter here; speed,
    /// noise scale and stroke settings are picked up without a rebuild.
    pub fn differs_significantly(&self, previous: &Self) -> bool {
        (self.density - previous.density).abs() > SIGNIFICANT_CHANGE_THRESHOLD
            || (self.complexity - previous.complexity).abs() > SIGNIFICANT_CHANGE_THRESHOLD
            || self.randomize_on_load != previous.randomize_on_load
    }
}

/// Partial parameter edit, `None` leaves a field untouched
///
/// The nested options on the stroke and image fields distinguish "leave as
/// is" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterUpdate {
    /// New noise scale percentage
    pub noise_scale: Option<f64>,
    /// New speed percentage
    pub speed: Option<f64>,
    /// New complexity percentage
    pub complexity: Option<f64>,
    /// New density percentage
    pub density: Option<f64>,
    /// New transparent background flag
    pub transparent_background: Option<bool>,
    /// New stroke length override
    pub stroke_length: Option<Option<f64>>,
    /// New stroke thickness override
    pub stroke_thickness: Option<Option<f64>>,
    /// New image label
    pub image_ref: Option<Option<String>>,
    /// New randomize flag
    pub randomize_on_load: Option<bool>,
}
