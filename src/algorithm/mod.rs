/// De Stijl composition on a cellular automaton
pub mod abstract_shapes;
/// Character-ramp mosaic of a source image
pub mod ascii;
/// Two-tone error-diffusion dithering
pub mod dither;
/// State machine owning the canvas and the active generator
pub mod engine;
/// Image-sampled flow-field stroke plotter
pub mod flow_plot;
/// Animated gradient bands
pub mod gradient;
/// Rock-paper-scissors automaton on a hex lattice
pub mod hex_cellular;
/// Algorithm identities and the generator trait
pub mod kind;
/// Noise-steered particle trails
pub mod perlin_flow;

pub use engine::AlgorithmEngine;
pub use kind::Algorithm;
