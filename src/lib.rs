pub mod errors;
pub mod grid;
pub mod loading;
pub mod log;
pub mod model;
pub mod notation;
pub mod pictograph;
pub mod placement;
pub mod rotation;
pub mod svg;
pub mod types;

pub use errors::{CoordParseError, GridError, NotationError, SvgError};
pub use grid::{GridPoint, GridPoints, GridTables, PointKind};
pub use loading::{LoadComponent, LoadingState, PictographLoader};
pub use model::{ArrowData, ArrowId, Motion, MotionId};
pub use notation::{
    Color, GridMode, HandRotDir, Location, MotionType, Orientation, PropRotDir, Turns,
    display_turns_value, parse_turns_value,
};
pub use pictograph::PictographData;
pub use placement::{
    AdjustmentCalculator, AdjustmentPolicy, PlacementConfig, PlacementContext, PlacementManager,
};
pub use rotation::{RotationTables, arrow_rotation_angle};
pub use svg::SvgMetadata;
pub use types::{Angle, Offset, Point, Px, Size};

/// Place a pictograph given as JSON against the bundled tables.
///
/// Returns the pictograph with both arrows derived, placed and rotated, or an
/// error with diagnostics.
pub fn place_pictograph(json: &str) -> Result<PictographData, miette::Report> {
    let mut pictograph: PictographData =
        serde_json::from_str(json).map_err(|e| miette::miette!("Invalid pictograph: {}", e))?;
    let manager = PlacementManager::builtin()?;
    pictograph.recompute(&manager);
    Ok(pictograph)
}
