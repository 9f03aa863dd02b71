// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-session configuration.
//!
//! Options are plain values: each session owns its copy, so changing one
//! session's options never affects another.

use waymark_geom::measure::LengthUnit;
use waymark_history::DEFAULT_STACK_LIMIT;
use waymark_snap::SnapOptions;

/// Appearance and duration of the timed error indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawErrorStyle {
    /// Outline color while the error is shown, as `0xRRGGBB`.
    pub color: u32,
    /// How long the indicator stays up, in milliseconds.
    pub timeout_ms: u64,
}

impl DrawErrorStyle {
    /// Style used while drawing.
    pub const DRAW: Self = Self {
        color: 0xb0_0b_00,
        timeout_ms: 2500,
    };

    /// Style used while editing.
    pub const EDIT: Self = Self {
        color: 0xb0_0b_00,
        timeout_ms: 1000,
    };
}

impl Default for DrawErrorStyle {
    fn default() -> Self {
        Self::DRAW
    }
}

/// Options for a [`DrawSession`](crate::DrawSession).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawOptions {
    /// Whether placed vertices may make the outline cross itself.
    pub allow_intersection: bool,
    /// Start a new drawing right after one completes.
    pub repeat_mode: bool,
    /// Error indicator style.
    pub error: DrawErrorStyle,
    /// Snapping of the floating vertex.
    pub snap: SnapOptions,
    /// Finish automatically once this many vertices are placed (`0` or `1`: unlimited).
    pub max_vertex_count: usize,
    /// Whether [`DrawSession::measurement_text`](crate::DrawSession::measurement_text) renders anything.
    pub measurement_enabled: bool,
    /// Unit of the measurement text.
    pub measurement_unit: LengthUnit,
    /// Multiplier applied to every measured distance.
    pub distance_scale_factor: f64,
    /// Client-pixel displacement below which a press commits a vertex, before
    /// scaling by `device_pixel_ratio`.
    pub click_jitter_px: f64,
    /// Device pixel ratio of the host surface.
    pub device_pixel_ratio: f64,
    /// Projected distance within which a mouse click on the finish anchor finishes.
    pub finish_radius: f64,
    /// Projected distance within which a tap near the finish anchor finishes.
    pub touch_finish_distance: f64,
    /// Delay before new input is accepted after a placement.
    pub input_cooldown_ms: u64,
    /// Key that removes the newest vertex.
    pub undo_key: char,
    /// Key that re-adds a removed vertex.
    pub redo_key: char,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            allow_intersection: true,
            repeat_mode: false,
            error: DrawErrorStyle::DRAW,
            snap: SnapOptions::default(),
            max_vertex_count: 0,
            measurement_enabled: false,
            measurement_unit: LengthUnit::default(),
            distance_scale_factor: 1.0,
            click_jitter_px: 9.0,
            device_pixel_ratio: 1.0,
            finish_radius: 4.0,
            touch_finish_distance: 10.0,
            input_cooldown_ms: 50,
            undo_key: 'z',
            redo_key: 'y',
        }
    }
}

impl DrawOptions {
    /// Effective click jitter threshold in client pixels.
    pub fn jitter_threshold(&self) -> f64 {
        let ratio = if self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        self.click_jitter_px * ratio
    }

    /// Effective distance scale factor (`0` counts as `1`).
    pub fn scale_factor(&self) -> f64 {
        if self.distance_scale_factor == 0.0 {
            1.0
        } else {
            self.distance_scale_factor
        }
    }
}

/// Options for an [`EditSession`](crate::EditSession).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditOptions {
    /// Whether drags may make the shape cross itself.
    pub allow_intersection: bool,
    /// Error indicator style.
    pub error: DrawErrorStyle,
    /// Snapping of dragged vertices.
    pub snap: SnapOptions,
    /// Depth of each of the undo and redo stacks.
    pub undo_redo_stack_limit: usize,
    /// Whether clicking a real vertex removes it.
    pub remove_on_click: bool,
    /// Projected distance used by [`EditSession::marker_at`](crate::EditSession::marker_at).
    pub hit_radius: f64,
    /// Key that undoes the last edit.
    pub undo_key: char,
    /// Key that redoes an undone edit.
    pub redo_key: char,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            allow_intersection: true,
            error: DrawErrorStyle::EDIT,
            snap: SnapOptions::default(),
            undo_redo_stack_limit: DEFAULT_STACK_LIMIT,
            remove_on_click: false,
            hit_radius: 4.0,
            undo_key: 'z',
            redo_key: 'y',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_timeouts_differ_by_session() {
        assert_eq!(DrawOptions::default().error.timeout_ms, 2500);
        assert_eq!(EditOptions::default().error.timeout_ms, 1000);
    }

    #[test]
    fn jitter_scales_with_pixel_ratio() {
        let opts = DrawOptions {
            device_pixel_ratio: 2.0,
            ..DrawOptions::default()
        };
        assert_eq!(opts.jitter_threshold(), 18.0);
        let broken = DrawOptions {
            device_pixel_ratio: 0.0,
            ..DrawOptions::default()
        };
        assert_eq!(broken.jitter_threshold(), 9.0);
    }
}
