//! Tests for parameter clamping, partial updates and change detection

#[cfg(test)]
mod tests {
    use wallgen::params::parameters::{
        DEFAULT_COMPLEXITY, DEFAULT_DENSITY, ParameterSet, ParameterUpdate, clamp_percent,
    };

    // Tests percentages are clamped and NaN falls back to the default
    // Verified by passing NaN through unchanged
    #[test]
    fn test_clamp_percent() {
        assert!((clamp_percent(150.0, 50.0) - 100.0).abs() < f64::EPSILON);
        assert!(clamp_percent(-3.0, 50.0).abs() < f64::EPSILON);
        assert!((clamp_percent(f64::NAN, 42.0) - 42.0).abs() < f64::EPSILON);
        assert!((clamp_percent(f64::INFINITY, 42.0) - 100.0).abs() < f64::EPSILON);
    }

    // Tests clamped keeps every field in range and drops non-finite overrides
    // Verified by skipping the stroke length filter
    #[test]
    fn test_clamped_parameter_set() {
        let params = ParameterSet {
            noise_scale: 120.0,
            speed: -5.0,
            complexity: f64::NAN,
            density: 60.0,
            stroke_length: Some(f64::NAN),
            stroke_thickness: Some(20.0),
            ..ParameterSet::default()
        }
        .clamped();

        assert!((params.noise_scale - 100.0).abs() < f64::EPSILON);
        assert!(params.speed.abs() < f64::EPSILON);
        assert!((params.complexity - DEFAULT_COMPLEXITY).abs() < f64::EPSILON);
        assert_eq!(params.stroke_length, None);
        assert_eq!(params.stroke_thickness, Some(5.0));
    }

    // Tests partial updates touch only the given fields and can clear overrides
    // Verified by applying stroke length unconditionally
    #[test]
    fn test_apply_partial_update() {
        let mut params = ParameterSet {
            stroke_length: Some(30.0),
            image_ref: Some("photo.png".to_string()),
            ..ParameterSet::default()
        };

        params.apply(&ParameterUpdate {
            speed: Some(80.0),
            image_ref: Some(None),
            ..ParameterUpdate::default()
        });

        assert!((params.speed - 80.0).abs() < f64::EPSILON);
        assert!((params.density - DEFAULT_DENSITY).abs() < f64::EPSILON);
        assert_eq!(params.stroke_length, Some(30.0));
        assert_eq!(params.image_ref, None);

        params.apply(&ParameterUpdate {
            density: Some(400.0),
            stroke_length: Some(None),
            ..ParameterUpdate::default()
        });
        assert!((params.density - 100.0).abs() < f64::EPSILON);
        assert_eq!(params.stroke_length, None);
    }

    // Tests an empty update leaves the set unchanged
    // Verified by resetting fields to defaults on apply
    #[test]
    fn test_empty_update_is_identity() {
        let original = ParameterSet {
            noise_scale: 12.0,
            transparent_background: true,
            ..ParameterSet::default()
        };
        let mut params = original.clone();
        params.apply(&ParameterUpdate::default());
        assert_eq!(params, original);
    }

    // Tests only density, complexity and randomize changes are significant
    // Verified by including speed in the comparison
    #[test]
    fn test_differs_significantly() {
        let base = ParameterSet::default();

        let speed_change = ParameterSet {
            speed: 100.0,
            noise_scale: 0.0,
            ..base.clone()
        };
        assert!(!speed_change.differs_significantly(&base));

        let small_density = ParameterSet {
            density: base.density + 5.0,
            ..base.clone()
        };
        assert!(!small_density.differs_significantly(&base));

        let large_density = ParameterSet {
            density: base.density + 5.5,
            ..base.clone()
        };
        assert!(large_density.differs_significantly(&base));

        let complexity = ParameterSet {
            complexity: base.complexity - 10.0,
            ..base.clone()
        };
        assert!(complexity.differs_significantly(&base));

        let randomize = ParameterSet {
            randomize_on_load: true,
            ..base.clone()
        };
        assert!(randomize.differs_significantly(&base));
    }
}
