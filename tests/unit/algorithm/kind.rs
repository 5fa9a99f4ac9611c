//! Tests for algorithm identifiers and capability flags

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use wallgen::algorithm::kind::Algorithm;

    // Tests every algorithm parses back from its short name and label
    // Verified by removing an alias from the parser
    #[test]
    fn test_parse_names_and_labels() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.label().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!(
            "Perlin-Noise".parse::<Algorithm>().unwrap(),
            Algorithm::PerlinFlow
        );
        assert!("voronoi".parse::<Algorithm>().is_err());
    }

    // Tests only the flow plotter sizes the canvas from the image
    // Verified by marking dither as image-canvas
    #[test]
    fn test_capability_flags() {
        let image_canvas: Vec<Algorithm> = Algorithm::ALL
            .into_iter()
            .filter(|a| a.requires_image_canvas())
            .collect();
        assert_eq!(image_canvas, vec![Algorithm::FlowFieldPlot]);

        let sources: HashSet<Algorithm> = Algorithm::ALL
            .into_iter()
            .filter(|a| a.uses_source_image())
            .collect();
        assert_eq!(sources.len(), 3);
        assert!(sources.contains(&Algorithm::Dither));
        assert!(sources.contains(&Algorithm::AsciiMosaic));
        assert!(!sources.contains(&Algorithm::GradientBands));
    }

    // Tests the abstract composition runs at the slower preview rate
    // Verified by giving every algorithm the same rate
    #[test]
    fn test_preview_frame_rates() {
        assert_eq!(Algorithm::AbstractShapes.preview_frame_rate(), 10);
        assert_eq!(Algorithm::PerlinFlow.preview_frame_rate(), 30);
    }

    // Tests seed salts are distinct
    // Verified by giving two algorithms the same salt
    #[test]
    fn test_seed_salts_are_distinct() {
        let salts: HashSet<u64> = Algorithm::ALL.into_iter().map(Algorithm::seed_salt).collect();
        assert_eq!(salts.len(), Algorithm::ALL.len());
        assert_eq!(Algorithm::HexCellular.to_string(), "Hex Cellular");
    }
}
