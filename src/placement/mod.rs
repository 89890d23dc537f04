//! Arrow placement orchestration
//!
//! The manager combines the grid anchor, the adjustment policy and the
//! arrow's bounding box into its final top-left coordinate:
//!
//! ```text
//! coords = initial + adjustment - bbox / 2
//! ```
//!
//! Every pass first computes an [`ArrowPatch`] per arrow from read-only
//! inputs and only then writes the patches back, so no arrow ever sees
//! another arrow's freshly computed position.

pub mod adjustment;
pub mod defaults;
pub mod initial;

use std::sync::Arc;

use crate::errors::GridError;
use crate::grid::GridTables;
use crate::log;
use crate::model::{ArrowData, Motion};
use crate::notation::{GridMode, Location};
use crate::rotation::{self, OverrideSet, RotationTables};
use crate::types::{Angle, OffsetPx, PtPx};

pub use adjustment::{
    AdjustmentCalculator, AdjustmentPolicy, NoAdjustment, QuadrantAdjustment, SpecialAdjustment,
};
pub use initial::{anchor_kind, initial_coords};

// ============================================================================
// Configuration
// ============================================================================

/// Settings the host picks once per session
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementConfig {
    pub grid_mode: GridMode,
    /// Read hand and layer-2 anchors from the `_strict` tables
    pub strict: bool,
    pub adjustment: AdjustmentPolicy,
    pub overrides: OverrideSet,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid_mode: defaults::GRID_MODE,
            strict: defaults::STRICT_POINTS,
            adjustment: AdjustmentPolicy::default(),
            overrides: OverrideSet::new(),
        }
    }
}

impl PlacementConfig {
    pub fn with_grid_mode(self, grid_mode: GridMode) -> Self {
        Self { grid_mode, ..self }
    }

    pub fn with_strict(self, strict: bool) -> Self {
        Self { strict, ..self }
    }

    pub fn with_adjustment(self, adjustment: impl Into<AdjustmentPolicy>) -> Self {
        Self { adjustment: adjustment.into(), ..self }
    }

    pub fn with_overrides(self, overrides: OverrideSet) -> Self {
        Self { overrides, ..self }
    }
}

/// Per-pictograph inputs of a placement pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementContext<'a> {
    pub grid_mode: GridMode,
    pub letter: Option<&'a str>,
}

impl<'a> PlacementContext<'a> {
    pub fn new(grid_mode: GridMode) -> Self {
        Self { grid_mode, letter: None }
    }

    pub fn with_letter(self, letter: &'a str) -> Self {
        Self { letter: Some(letter), ..self }
    }
}

/// Derived values for one arrow, computed before anything is written
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPatch {
    pub coords: PtPx,
    /// `None` when the pass had no motion to resolve a rotation from
    pub rot_angle: Option<Angle>,
}

impl ArrowPatch {
    pub fn apply(self, arrow: &mut ArrowData) {
        arrow.coords = self.coords;
        if let Some(rot_angle) = self.rot_angle {
            arrow.rot_angle = rot_angle;
        }
    }
}

// ============================================================================
// Manager
// ============================================================================

/// Resolves arrow coordinates and rotations against shared, immutable tables
#[derive(Debug, Clone)]
pub struct PlacementManager {
    grids: Arc<GridTables>,
    rotations: Arc<RotationTables>,
    config: PlacementConfig,
}

impl PlacementManager {
    pub fn new(
        grids: Arc<GridTables>,
        rotations: Arc<RotationTables>,
        config: PlacementConfig,
    ) -> Self {
        Self { grids, rotations, config }
    }

    /// Manager over the bundled grid and rotation tables with default config
    pub fn builtin() -> Result<Self, GridError> {
        Ok(Self::new(
            Arc::new(GridTables::builtin()?),
            Arc::new(RotationTables::default()),
            PlacementConfig::default(),
        ))
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn grids(&self) -> &GridTables {
        &self.grids
    }

    pub fn rotations(&self) -> &RotationTables {
        &self.rotations
    }

    /// Context built from the configured grid mode, without a letter
    pub fn default_context(&self) -> PlacementContext<'static> {
        PlacementContext::new(self.config.grid_mode)
    }

    pub fn initial_position(&self, arrow: &ArrowData, grid_mode: GridMode) -> PtPx {
        initial_coords(arrow, self.grids.for_mode(grid_mode), self.config.strict)
    }

    pub fn adjustment(&self, arrow: &ArrowData, letter: Option<&str>) -> OffsetPx {
        self.config.adjustment.adjustment(arrow, letter)
    }

    /// Final top-left of `arrow`. An arrow whose SVG is not loaded has a zero
    /// bounding box, so its anchor becomes its top-left corner.
    pub fn compute_coords(&self, arrow: &ArrowData, ctx: PlacementContext<'_>) -> PtPx {
        let initial = self.initial_position(arrow, ctx.grid_mode);
        let adjustment = self.adjustment(arrow, ctx.letter);
        if !arrow.svg_loaded {
            log::debug!(arrow = arrow.id.0, "svg not loaded, placing without centering");
        }
        initial + adjustment - arrow.bounding_box().half()
    }

    pub fn arrow_rotation(&self, motion: &Motion, arrow_loc: Location) -> Angle {
        rotation::arrow_rotation_angle(motion, arrow_loc, &self.rotations, &self.config.overrides)
    }

    /// Coordinates and, when the motion is given, rotation for one arrow
    pub fn compute_placement(
        &self,
        arrow: &ArrowData,
        motion: Option<&Motion>,
        ctx: PlacementContext<'_>,
    ) -> ArrowPatch {
        let rot_angle = motion.and_then(|motion| {
            if motion.id == arrow.motion_id {
                Some(self.arrow_rotation(motion, arrow.loc))
            } else {
                log::warn!(
                    arrow = arrow.id.0,
                    arrow_motion = arrow.motion_id.0,
                    motion = motion.id.0,
                    "motion does not own arrow, keeping rotation"
                );
                None
            }
        });
        ArrowPatch {
            coords: self.compute_coords(arrow, ctx),
            rot_angle,
        }
    }

    /// Recompute `coords` for every arrow using the configured grid mode
    pub fn update_arrow_placements(&self, arrows: &mut [ArrowData]) {
        self.update_arrow_placements_in(self.default_context(), arrows);
    }

    pub fn update_arrow_placements_in(&self, ctx: PlacementContext<'_>, arrows: &mut [ArrowData]) {
        let patches: Vec<ArrowPatch> = arrows
            .iter()
            .map(|arrow| self.compute_placement(arrow, None, ctx))
            .collect();

        log::debug!(
            count = patches.len(),
            grid_mode = %ctx.grid_mode,
            letter = ?ctx.letter,
            "arrow placement pass"
        );

        for (arrow, patch) in arrows.iter_mut().zip(patches) {
            patch.apply(arrow);
        }
    }

    /// Set `rot_angle` on an arrow from the motion that owns it
    pub fn update_arrow_rotation(&self, arrow: &mut ArrowData, motion: &Motion) {
        if motion.id != arrow.motion_id {
            log::warn!(
                arrow = arrow.id.0,
                arrow_motion = arrow.motion_id.0,
                motion = motion.id.0,
                "motion does not own arrow, skipping rotation"
            );
            return;
        }
        arrow.rot_angle = self.arrow_rotation(motion, arrow.loc);
    }
}
