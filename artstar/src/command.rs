//! Keyboard command table
//!
//! The tool keeps the original single-character command layout: shifted
//! letters toggle modes, unshifted letters nudge the current image's
//! parameters. Mapping is a pure function so the table is testable
//! without a window.
//!
//! ```text
//! E edge  B blend  D blend direction  Q quit+save
//! = / -   next / previous image
//! [ / ]   lower threshold -10 / +10    { / }  upper threshold -10 / +10
//! r / f   skew  -1 / +1                q / e  rotation -1 / +1
//! a / d   translate X -20 / +20        w / s  translate Y -20 / +20
//! z / x   zoom -0.05 / +0.05           c / v  copy / paste parameters
//! ```

use minifb::Key;

/// One step of session mutation, decoded from a keypress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleEdgeDetection,
    ToggleBlending,
    ToggleBlendDirection,
    CycleForward,
    CycleBackward,
    NudgeEdgeLow(i32),
    NudgeEdgeHigh(i32),
    NudgeSkew(i32),
    NudgeRotation(i32),
    NudgeTranslationX(i32),
    NudgeTranslationY(i32),
    NudgeZoom(i32),
    CopyParameters,
    PasteParameters,
    Quit,
}

impl Command {
    /// Decode a keypress. Unmapped keys return `None` and do nothing.
    pub fn from_key(key: Key, shift: bool) -> Option<Command> {
        let command = match (key, shift) {
            (Key::E, true) => Command::ToggleEdgeDetection,
            (Key::B, true) => Command::ToggleBlending,
            (Key::D, true) => Command::ToggleBlendDirection,
            (Key::Q, true) => Command::Quit,

            (Key::Equal, false) => Command::CycleForward,
            (Key::Minus, false) => Command::CycleBackward,

            (Key::LeftBracket, false) => Command::NudgeEdgeLow(-1),
            (Key::RightBracket, false) => Command::NudgeEdgeLow(1),
            (Key::LeftBracket, true) => Command::NudgeEdgeHigh(-1),
            (Key::RightBracket, true) => Command::NudgeEdgeHigh(1),

            (Key::R, false) => Command::NudgeSkew(-1),
            (Key::F, false) => Command::NudgeSkew(1),
            (Key::Q, false) => Command::NudgeRotation(-1),
            (Key::E, false) => Command::NudgeRotation(1),

            (Key::A, false) => Command::NudgeTranslationX(-1),
            (Key::D, false) => Command::NudgeTranslationX(1),
            (Key::W, false) => Command::NudgeTranslationY(-1),
            (Key::S, false) => Command::NudgeTranslationY(1),

            (Key::Z, false) => Command::NudgeZoom(-1),
            (Key::X, false) => Command::NudgeZoom(1),

            (Key::C, false) => Command::CopyParameters,
            (Key::V, false) => Command::PasteParameters,

            _ => return None,
        };
        Some(command)
    }
}
