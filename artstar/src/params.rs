//! Per-image transform parameters
//!
//! Every source image carries its own set of adjustable parameters. All
//! mutation goes through the `nudge_*` methods, which clamp at the limits
//! so the stored values are always in range.

use serde::{Deserialize, Serialize};

/// Pixels moved per translation keypress
pub const TRANSLATION_STEP: i32 = 20;
/// Degrees per rotation keypress
pub const ROTATION_STEP: f32 = 1.0;
/// Degrees per skew keypress
pub const SKEW_STEP: f32 = 1.0;
/// Zoom change per keypress
pub const ZOOM_STEP: f32 = 0.05;
/// Edge threshold change per keypress
pub const EDGE_THRESHOLD_STEP: i32 = 10;

/// Rotation is kept within a half turn either way
pub const ROTATION_LIMIT_DEGREES: f32 = 180.0;
/// Skew limit; past this the trapezoid degenerates into sliver geometry
pub const SKEW_LIMIT_DEGREES: f32 = 45.0;

/// Adjustable parameters for one source image.
///
/// The serialized field names are the wire format of the saved parameter
/// document and must stay stable across versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformParameters {
    /// Path of the source file, fixed at creation
    #[serde(rename = "filepath")]
    source_path: String,
    #[serde(rename = "translationX")]
    pub translation_x: i32,
    #[serde(rename = "translationY")]
    pub translation_y: i32,
    #[serde(rename = "rotation")]
    pub rotation_degrees: f32,
    #[serde(rename = "skew")]
    pub skew_degrees: f32,
    pub zoom: f32,
}

impl TransformParameters {
    /// New parameters with everything zeroed (identity transform).
    pub fn new(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            translation_x: 0,
            translation_y: 0,
            rotation_degrees: 0.0,
            skew_degrees: 0.0,
            zoom: 0.0,
        }
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// True when every adjustable value is at its default.
    pub fn is_identity(&self) -> bool {
        self.translation_x == 0
            && self.translation_y == 0
            && self.rotation_degrees == 0.0
            && self.skew_degrees == 0.0
            && self.zoom == 0.0
    }

    pub fn nudge_translation_x(&mut self, steps: i32) {
        self.translation_x += steps * TRANSLATION_STEP;
    }

    pub fn nudge_translation_y(&mut self, steps: i32) {
        self.translation_y += steps * TRANSLATION_STEP;
    }

    pub fn nudge_rotation(&mut self, steps: i32) {
        self.rotation_degrees = (self.rotation_degrees + steps as f32 * ROTATION_STEP)
            .clamp(-ROTATION_LIMIT_DEGREES, ROTATION_LIMIT_DEGREES);
    }

    pub fn nudge_skew(&mut self, steps: i32) {
        self.skew_degrees = (self.skew_degrees + steps as f32 * SKEW_STEP)
            .clamp(-SKEW_LIMIT_DEGREES, SKEW_LIMIT_DEGREES);
    }

    pub fn nudge_zoom(&mut self, steps: i32) {
        self.zoom += steps as f32 * ZOOM_STEP;
    }

    /// Copy the adjustable values from `other`, keeping the source path.
    pub fn adopt(&mut self, other: &TransformParameters) {
        self.translation_x = other.translation_x;
        self.translation_y = other.translation_y;
        self.rotation_degrees = other.rotation_degrees;
        self.skew_degrees = other.skew_degrees;
        self.zoom = other.zoom;
    }
}
