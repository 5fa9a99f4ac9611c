//! Frame capture and GIF export of a running algorithm

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{Result, WallgenError, state_corruption};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

/// Collects preview frames for an animated export
///
/// Frames are stored as given; callers capture every few ticks and the
/// exporter drops further frames when the requested delay is faster than
/// viewers honour.
#[derive(Debug, Clone, Default)]
pub struct AnimationCapture {
    frames: Vec<RgbaImage>,
}

impl AnimationCapture {
    /// Empty capture
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Appends one frame
    pub fn record(&mut self, frame: RgbaImage) {
        self.frames.push(frame);
    }

    /// Number of captured frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames kept for a requested delay, and the delay actually used
    ///
    /// Delays below [`VIEWER_MIN_FRAME_DELAY_MS`] are raised to it and every
    /// `ceil(min / delay)`-th frame is kept so the apparent speed holds. The
    /// last frame is always kept.
    pub fn plan(&self, frame_delay_ms: u32) -> (Vec<usize>, u32) {
        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let mut kept: Vec<usize> = (0..self.frames.len()).step_by(skip_factor).collect();
        if let Some(last) = self.frames.len().checked_sub(1) {
            if kept.last() != Some(&last) {
                kept.push(last);
            }
        }
        (kept, effective_delay_ms)
    }

    /// Encodes the captured frames as a looping GIF
    ///
    /// The final frame is held 25 times longer than the others.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(state_corruption(
                "animation capture",
                &"no frames captured",
            ));
        }

        let (kept, delay_ms) = self.plan(frame_delay_ms);
        let mut frames: Vec<Frame> = kept
            .iter()
            .filter_map(|&index| self.frames.get(index))
            .map(|image| {
                Frame::from_parts(
                    image.clone(),
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay_ms, 1),
                )
            })
            .collect();

        // Final frame displays longer for better visibility
        if let Some(last) = frames.last().map(|frame| frame.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| WallgenError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = File::create(output_path).map_err(|e| WallgenError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let export_error = |source| WallgenError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        };
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite).map_err(export_error)?;
        encoder.encode_frames(frames).map_err(export_error)?;

        info!(
            path = %output_path.display(),
            frames = kept.len(),
            delay_ms,
            "animation saved"
        );
        Ok(())
    }
}
