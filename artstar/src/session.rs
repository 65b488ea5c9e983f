//! Session state and the render pipeline
//!
//! A session owns the image collection plus the interactive toggles:
//! which image is current, whether edge detection and blending are on,
//! the edge thresholds, and the parameter clipboard. Rendering is pure
//! with respect to that state, so the main loop can redraw at will.

use thiserror::Error;
use tracing::{debug, info};

use artstar_core::{Raster, blend_weighted, to_rgb};
use artstar_filter::edge_map;
use artstar_transform::{AffineMatrix, rect_quad, skew_quad, warp_affine, warp_projective};

use crate::collection::ImageCollection;
use crate::command::Command;
use crate::params::{EDGE_THRESHOLD_STEP, TransformParameters};

/// Initial lower hysteresis threshold
pub const DEFAULT_EDGE_LOW: i32 = 100;
/// Initial upper hysteresis threshold
pub const DEFAULT_EDGE_HIGH: i32 = 200;

/// Errors that can occur while rendering a frame
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("transform error: {0}")]
    Transform(#[from] artstar_transform::TransformError),

    #[error("filter error: {0}")]
    Filter(#[from] artstar_filter::FilterError),

    #[error("core error: {0}")]
    Core(#[from] artstar_core::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Which neighbor the blend pulls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendDirection {
    /// Blend with the next image in the collection
    Forward,
    /// Blend with the previous image
    Backward,
}

impl BlendDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// Collection offset of the neighbor in this direction
    pub fn offset(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// What the main loop should do after a command was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// State may have changed, redraw the frame
    Redraw,
    /// Save and leave the main loop
    Quit,
}

/// Interactive session over an image collection
#[derive(Debug)]
pub struct Session {
    collection: ImageCollection,
    current_index: usize,
    use_edge_detection: bool,
    use_blending: bool,
    blend_direction: BlendDirection,
    edge_low: i32,
    edge_high: i32,
    clipboard: Option<TransformParameters>,
}

impl Session {
    pub fn new(collection: ImageCollection) -> Self {
        Self {
            collection,
            current_index: 0,
            use_edge_detection: false,
            use_blending: false,
            blend_direction: BlendDirection::Backward,
            edge_low: DEFAULT_EDGE_LOW,
            edge_high: DEFAULT_EDGE_HIGH,
            clipboard: None,
        }
    }

    pub fn collection(&self) -> &ImageCollection {
        &self.collection
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_path(&self) -> &str {
        self.collection.get(self.current_index).params.source_path()
    }

    pub fn use_edge_detection(&self) -> bool {
        self.use_edge_detection
    }

    pub fn use_blending(&self) -> bool {
        self.use_blending
    }

    pub fn blend_direction(&self) -> BlendDirection {
        self.blend_direction
    }

    pub fn edge_thresholds(&self) -> (i32, i32) {
        (self.edge_low, self.edge_high)
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Apply one command to the session state.
    ///
    /// Every command is worth a redraw; only Quit leaves the loop.
    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::ToggleEdgeDetection => {
                self.use_edge_detection = !self.use_edge_detection;
                info!(enabled = self.use_edge_detection, "edge detection");
            }
            Command::ToggleBlending => {
                self.use_blending = !self.use_blending;
                info!(enabled = self.use_blending, "blending");
            }
            Command::ToggleBlendDirection => {
                self.blend_direction = self.blend_direction.toggled();
                info!(direction = ?self.blend_direction, "blend direction");
            }
            Command::CycleForward => {
                self.current_index = self.collection.neighbor_index(self.current_index, 1);
                info!(index = self.current_index, path = self.current_path(), "current image");
            }
            Command::CycleBackward => {
                self.current_index = self.collection.neighbor_index(self.current_index, -1);
                info!(index = self.current_index, path = self.current_path(), "current image");
            }
            Command::NudgeEdgeLow(steps) => {
                self.edge_low =
                    (self.edge_low + steps * EDGE_THRESHOLD_STEP).clamp(0, 255);
                debug!(low = self.edge_low, "edge threshold");
            }
            Command::NudgeEdgeHigh(steps) => {
                self.edge_high =
                    (self.edge_high + steps * EDGE_THRESHOLD_STEP).clamp(0, 255);
                debug!(high = self.edge_high, "edge threshold");
            }
            Command::NudgeSkew(steps) => {
                self.current_params_mut().nudge_skew(steps);
            }
            Command::NudgeRotation(steps) => {
                self.current_params_mut().nudge_rotation(steps);
            }
            Command::NudgeTranslationX(steps) => {
                self.current_params_mut().nudge_translation_x(steps);
            }
            Command::NudgeTranslationY(steps) => {
                self.current_params_mut().nudge_translation_y(steps);
            }
            Command::NudgeZoom(steps) => {
                self.current_params_mut().nudge_zoom(steps);
            }
            Command::CopyParameters => {
                let params = self.collection.get(self.current_index).params.clone();
                info!(path = params.source_path(), "copied parameters");
                self.clipboard = Some(params);
            }
            Command::PasteParameters => match self.clipboard.clone() {
                Some(copied) => {
                    self.current_params_mut().adopt(&copied);
                    info!("pasted parameters");
                }
                None => {
                    info!("paste ignored, clipboard is empty");
                }
            },
            Command::Quit => return CommandOutcome::Quit,
        }
        CommandOutcome::Redraw
    }

    fn current_params_mut(&mut self) -> &mut TransformParameters {
        &mut self.collection.get_mut(self.current_index).params
    }

    /// Render one image of the collection with `apply_edge` deciding
    /// whether the edge filter runs.
    fn render_indexed(&self, index: usize, apply_edge: bool) -> SessionResult<Raster> {
        let source = self.collection.get(index);
        render_image(
            &source.raster,
            &source.params,
            apply_edge,
            self.edge_low,
            self.edge_high,
        )
    }

    /// Compose the frame for the current session state.
    ///
    /// With blending off this is just the current image. With blending on
    /// the current image is rendered without the edge filter and combined
    /// at full weight with the half-weight neighbor, which does carry the
    /// edge flag. That asymmetry keeps the foreground photographic while
    /// the neighbor contributes an outline.
    pub fn render_frame(&self) -> SessionResult<Raster> {
        if !self.use_blending {
            return self.render_indexed(self.current_index, self.use_edge_detection);
        }
        let neighbor_index = self
            .collection
            .neighbor_index(self.current_index, self.blend_direction.offset());
        let primary = self.render_indexed(self.current_index, false)?;
        let neighbor = self.render_indexed(neighbor_index, self.use_edge_detection)?;
        Ok(blend_weighted(&primary, &neighbor, 1.0, 0.5, 0.0)?)
    }
}

/// Render one source raster through the full geometry pipeline.
///
/// Stage order is fixed: edge filter first (so edges are warped along
/// with the image), then the trapezoidal skew, then the affine
/// rotation-translation with every matrix entry scaled by `1 + zoom`.
/// The zoom therefore scales the translation distance too; that is the
/// established behavior of the tool, not an accident of this port.
pub fn render_image(
    src: &Raster,
    params: &TransformParameters,
    apply_edge: bool,
    edge_low: i32,
    edge_high: i32,
) -> SessionResult<Raster> {
    let mut stage = if apply_edge {
        to_rgb(&edge_map(src, edge_low, edge_high)?)?
    } else {
        src.clone()
    };

    if params.skew_degrees != 0.0 {
        let src_quad = rect_quad(stage.width(), stage.height());
        let dst_quad = skew_quad(stage.width(), stage.height(), params.skew_degrees);
        stage = warp_projective(&stage, src_quad, dst_quad)?;
    }

    let matrix = AffineMatrix::rotation_translation(
        params.rotation_degrees,
        params.translation_x as f32,
        params.translation_y as f32,
    )
    .scaled(1.0 + params.zoom);
    Ok(warp_affine(&stage, &matrix)?)
}
