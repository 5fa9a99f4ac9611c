//! Tests for engine constants and their relationships

#[cfg(test)]
mod tests {
    use wallgen::io::configuration::{
        ABSTRACT_CAPTURE_GRID, ABSTRACT_GRID, ASCII_RAMP, CAPTURE_FRAME_RATE, DEFAULT_MASTER_SIZE,
        DEFAULT_SEED, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, FLOW_END_THICKNESS,
        FLOW_START_THICKNESS, FLOW_TICK_BUDGET, GIF_FRAME_DELAY_MS, HEX_CAPTURE_STEPS,
        HEX_MIN_STATES, HEX_PREVIEW_STEPS, JPEG_HIGH_QUALITY, JPEG_STANDARD_QUALITY,
        PREVIEW_FRAME_RATE, QUADTREE_CAPACITY, SIGNIFICANT_CHANGE_THRESHOLD,
        VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests the master canvas covers the default viewport at scale one or less
    // Verified by shrinking the master below the viewport width
    #[test]
    fn test_master_canvas_covers_viewport() {
        assert_eq!(DEFAULT_MASTER_SIZE, 4000);
        assert!(DEFAULT_MASTER_SIZE >= DEFAULT_VIEWPORT_WIDTH);
        assert!(DEFAULT_MASTER_SIZE >= DEFAULT_VIEWPORT_HEIGHT);
    }

    // Tests capture settings are strictly more detailed than preview settings
    // Verified by swapping preview and capture grids
    #[test]
    fn test_capture_increases_detail() {
        assert!(ABSTRACT_CAPTURE_GRID > ABSTRACT_GRID);
        assert!(HEX_CAPTURE_STEPS > HEX_PREVIEW_STEPS);
        assert!(CAPTURE_FRAME_RATE > PREVIEW_FRAME_RATE);
        assert!(JPEG_HIGH_QUALITY > JPEG_STANDARD_QUALITY);
    }

    // Tests flow strokes thin out over the budget
    // Verified by reversing start and end thickness
    #[test]
    fn test_flow_constants() {
        assert_eq!(FLOW_TICK_BUDGET, 400);
        assert!(FLOW_START_THICKNESS > FLOW_END_THICKNESS);
    }

    // Tests structural constants
    // Verified by changing constant values
    #[test]
    fn test_structural_constants() {
        assert_eq!(HEX_MIN_STATES, 3);
        assert_eq!(QUADTREE_CAPACITY, 8);
        assert!((SIGNIFICANT_CHANGE_THRESHOLD - 5.0).abs() < f64::EPSILON);
        assert_eq!(ASCII_RAMP.chars().next(), Some(' '));
        assert_eq!(ASCII_RAMP.chars().last(), Some('@'));
    }

    // Tests default seed is fixed
    // Verified by changing seed value
    #[test]
    fn test_default_seed_is_reproducible() {
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests the animation delay is one viewers honour without frame dropping
    // Verified by lowering the delay below the viewer minimum
    #[test]
    fn test_gif_frame_delay() {
        assert!(GIF_FRAME_DELAY_MS >= VIEWER_MIN_FRAME_DELAY_MS);
    }
}
