// crates/lightbox-core/src/commands.rs
//
// Every user action in Lightbox is expressed as a ViewerCommand.
// The input layer emits these; app.rs processes them after the UI pass.
// Adding a new feature = add a variant here + one match arm in app.rs.

use crate::order::NavMode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    // ── Navigation ───────────────────────────────────────────────────────────
    Advance { mode: NavMode, step: usize },
    Retreat { mode: NavMode, step: usize },
    /// Absolute jump to the first collection entry — bypasses the active
    /// traversal order entirely.
    JumpFirst,
    /// Absolute jump to the last collection entry.
    JumpLast,

    // ── File operations ──────────────────────────────────────────────────────
    /// Relocate the current image to the trash directory and drop it from the
    /// collection.
    DeleteCurrent,
    /// Relocate the current image to the destination bound to `key` and drop
    /// it from the collection.
    MoveCurrent(char),
    /// Copy the current image to the destination bound to `key`; the
    /// collection is not mutated.
    CopyCurrent(char),

    // ── Slideshow ────────────────────────────────────────────────────────────
    ToggleSlideshow,
    GrowSlideshowInterval,
    ShrinkSlideshowInterval,

    // ── View ─────────────────────────────────────────────────────────────────
    /// Pan the image by `amount` pixels; the amount already includes the
    /// progressive-speed accumulator and modifier scaling.
    Pan { dir: PanDirection, amount: f32 },
    ZoomIn,
    ZoomOut,
    ZoomTo(f32),
    ZoomOneToOne,
    FitToWindow,
    ToggleFullscreen,

    // ── UI ───────────────────────────────────────────────────────────────────
    /// Show the move/copy destination palette.
    ShowDestinations,
    Quit,
}
