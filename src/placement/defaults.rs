//! Default placement settings (pictograph pixels)

use crate::notation::GridMode;

pub const GRID_MODE: GridMode = GridMode::Diamond;
pub const STRICT_POINTS: bool = false;

/// Quadrant adjustments are rounded to millionths to drop rotation noise
pub const ADJUSTMENT_SCALE: f64 = 1e6;
