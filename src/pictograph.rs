//! A pictograph: one beat with a red and a blue motion and their arrows.
//!
//! Arrows are never edited by hand. After a motion changes the host calls
//! [`PictographData::recompute`], which rebuilds both arrows from their
//! motions and writes placement and rotation in a single pass.

use serde::{Deserialize, Serialize};

use crate::log;
use crate::model::{ArrowData, ArrowId, Motion};
use crate::notation::{Color, GridMode};
use crate::placement::{ArrowPatch, PlacementContext, PlacementManager};
use crate::svg::SvgMetadata;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PictographData {
    #[serde(default)]
    pub letter: Option<String>,
    #[serde(default)]
    pub start_pos: Option<String>,
    #[serde(default)]
    pub end_pos: Option<String>,
    #[serde(default)]
    pub grid_mode: GridMode,
    #[serde(default)]
    pub red_motion: Option<Motion>,
    #[serde(default)]
    pub blue_motion: Option<Motion>,
    #[serde(default)]
    pub red_arrow: Option<ArrowData>,
    #[serde(default)]
    pub blue_arrow: Option<ArrowData>,
}

fn default_arrow_id(color: Color) -> ArrowId {
    match color {
        Color::Red => ArrowId(0),
        Color::Blue => ArrowId(1),
    }
}

impl PictographData {
    pub fn new(grid_mode: GridMode) -> Self {
        Self { grid_mode, ..Self::default() }
    }

    pub fn with_letter(self, letter: impl Into<String>) -> Self {
        Self { letter: Some(letter.into()), ..self }
    }

    pub fn with_positions(self, start_pos: impl Into<String>, end_pos: impl Into<String>) -> Self {
        Self {
            start_pos: Some(start_pos.into()),
            end_pos: Some(end_pos.into()),
            ..self
        }
    }

    /// Replace the motion for `color`; arrows are stale until [`recompute`](Self::recompute)
    pub fn with_motion(mut self, color: Color, motion: Motion) -> Self {
        *self.motion_slot(color) = Some(motion);
        self
    }

    pub fn motion(&self, color: Color) -> Option<&Motion> {
        match color {
            Color::Red => self.red_motion.as_ref(),
            Color::Blue => self.blue_motion.as_ref(),
        }
    }

    pub fn arrow(&self, color: Color) -> Option<&ArrowData> {
        match color {
            Color::Red => self.red_arrow.as_ref(),
            Color::Blue => self.blue_arrow.as_ref(),
        }
    }

    fn motion_slot(&mut self, color: Color) -> &mut Option<Motion> {
        match color {
            Color::Red => &mut self.red_motion,
            Color::Blue => &mut self.blue_motion,
        }
    }

    fn arrow_slot(&mut self, color: Color) -> &mut Option<ArrowData> {
        match color {
            Color::Red => &mut self.red_arrow,
            Color::Blue => &mut self.blue_arrow,
        }
    }

    /// Record loaded SVG metadata for the arrow of `color`.
    ///
    /// Returns false when there is no arrow yet; the metadata is then picked
    /// up on the next call after a recompute.
    pub fn attach_svg(&mut self, color: Color, svg: SvgMetadata) -> bool {
        match self.arrow_slot(color).take() {
            Some(arrow) => {
                *self.arrow_slot(color) = Some(arrow.with_svg(svg));
                true
            }
            None => {
                log::debug!(color = %color, "no arrow to attach svg to");
                false
            }
        }
    }

    /// Rebuild both arrows from their motions, then place and rotate them.
    ///
    /// SVG metadata and ids of the previous arrows are kept. A color without
    /// a motion loses its arrow.
    pub fn recompute(&mut self, manager: &PlacementManager) {
        let red = self.derive_arrow(Color::Red);
        let blue = self.derive_arrow(Color::Blue);

        let ctx = PlacementContext {
            grid_mode: self.grid_mode,
            letter: self.letter.as_deref(),
        };
        let patch = |arrow: &Option<ArrowData>, motion: Option<&Motion>| -> Option<ArrowPatch> {
            arrow.as_ref().map(|arrow| manager.compute_placement(arrow, motion, ctx))
        };
        let red_patch = patch(&red, self.red_motion.as_ref());
        let blue_patch = patch(&blue, self.blue_motion.as_ref());

        log::debug!(
            letter = ?self.letter,
            grid_mode = %self.grid_mode,
            red = red.is_some(),
            blue = blue.is_some(),
            "pictograph recompute"
        );

        self.red_arrow = apply(red, red_patch);
        self.blue_arrow = apply(blue, blue_patch);
    }

    fn derive_arrow(&self, color: Color) -> Option<ArrowData> {
        let motion = self.motion(color)?;
        let previous = self.arrow(color);
        let id = previous.map_or(default_arrow_id(color), |arrow| arrow.id);
        let arrow = ArrowData::from_motion(id, color, motion);
        match previous.and_then(|arrow| arrow.svg_data.filter(|_| arrow.svg_loaded)) {
            Some(svg) => Some(arrow.with_svg(svg)),
            None => Some(arrow),
        }
    }
}

fn apply(arrow: Option<ArrowData>, patch: Option<ArrowPatch>) -> Option<ArrowData> {
    let mut arrow = arrow?;
    if let Some(patch) = patch {
        patch.apply(&mut arrow);
    }
    Some(arrow)
}
