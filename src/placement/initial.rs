//! Unadjusted anchor of an arrow on the grid

use crate::grid::{GridPoints, PointKind};
use crate::log;
use crate::model::ArrowData;
use crate::notation::MotionType;
use crate::types::PtPx;

/// Which grid layer an arrow's anchor sits on
pub fn anchor_kind(motion_type: MotionType) -> PointKind {
    match motion_type {
        MotionType::Pro | MotionType::Anti | MotionType::Float => PointKind::Layer2,
        MotionType::Static | MotionType::Dash => PointKind::Hand,
    }
}

/// Base coordinate for `arrow` before adjustment and centering.
///
/// Shift arrows read `<loc>_<mode>_layer2_point`, static and dash arrows read
/// `<loc>_<mode>_hand_point`. A point missing from the table yields the
/// origin.
pub fn initial_coords(arrow: &ArrowData, grid: &GridPoints, strict: bool) -> PtPx {
    let kind = anchor_kind(arrow.motion_type);
    match grid.point(arrow.loc, kind, strict) {
        Some(point) => point.coordinates,
        None => {
            log::warn!(
                loc = %arrow.loc,
                grid_mode = %grid.grid_mode(),
                kind = %kind,
                motion_type = %arrow.motion_type,
                strict,
                "grid point not found, using (0, 0)"
            );
            PtPx::ORIGIN
        }
    }
}
