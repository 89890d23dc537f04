//! Fine-tuning offsets layered on top of the initial anchor
//!
//! Each policy knows how to nudge an arrow away from its grid point; the
//! placement manager only sees [`AdjustmentPolicy`] and never changes when a
//! policy is swapped.

use std::collections::HashMap;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::log;
use crate::model::ArrowData;
use crate::notation::{Color, Location, MotionType, Turns};
use crate::types::OffsetPx;

use super::defaults;

/// Common behavior for all adjustment policies
#[enum_dispatch]
pub trait AdjustmentCalculator {
    /// Offset added to the arrow's initial position
    fn adjustment(&self, arrow: &ArrowData, letter: Option<&str>) -> OffsetPx;
}

// ============================================================================
// Policies
// ============================================================================

/// Leaves every arrow on its grid point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoAdjustment;

impl AdjustmentCalculator for NoAdjustment {
    fn adjustment(&self, _arrow: &ArrowData, _letter: Option<&str>) -> OffsetPx {
        OffsetPx::ZERO
    }
}

/// Per (motion type, turns) nudge, written once for the north-east quadrant
/// and rotated into the quadrant the arrow sits in. Starts empty; callers
/// fill in the nudges their assets need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadrantAdjustment {
    offsets: HashMap<(MotionType, Turns), OffsetPx>,
}

impl QuadrantAdjustment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, motion_type: MotionType, turns: Turns, offset: OffsetPx) -> Self {
        self.offsets.insert((motion_type, turns), offset);
        self
    }
}

/// Rotate a north-east-frame vector into the frame of `loc`
fn into_quadrant(base: OffsetPx, loc: Location) -> OffsetPx {
    let turn = (loc.svg_angle() - Location::Ne.svg_angle()).to_radians();
    let rotated = DVec2::from_angle(turn).rotate(base.to_dvec2());
    let scale = defaults::ADJUSTMENT_SCALE;
    OffsetPx::from_dvec2((rotated * scale).round() / scale)
}

impl AdjustmentCalculator for QuadrantAdjustment {
    fn adjustment(&self, arrow: &ArrowData, _letter: Option<&str>) -> OffsetPx {
        match self.offsets.get(&(arrow.motion_type, arrow.turns)) {
            Some(&base) => into_quadrant(base, arrow.loc),
            None => {
                log::debug!(
                    motion_type = %arrow.motion_type,
                    turns = %arrow.turns,
                    "no quadrant adjustment"
                );
                OffsetPx::ZERO
            }
        }
    }
}

/// Letter-specific exceptions keyed by (letter, color), deferring to an
/// inner policy for everything else
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialAdjustment {
    rules: HashMap<String, HashMap<Color, OffsetPx>>,
    fallback: Box<AdjustmentPolicy>,
}

impl SpecialAdjustment {
    pub fn new(fallback: impl Into<AdjustmentPolicy>) -> Self {
        Self {
            rules: HashMap::new(),
            fallback: Box::new(fallback.into()),
        }
    }

    pub fn with_rule(mut self, letter: impl Into<String>, color: Color, offset: OffsetPx) -> Self {
        self.rules.entry(letter.into()).or_default().insert(color, offset);
        self
    }

    fn rule(&self, letter: Option<&str>, color: Color) -> Option<OffsetPx> {
        self.rules.get(letter?)?.get(&color).copied()
    }
}

impl AdjustmentCalculator for SpecialAdjustment {
    fn adjustment(&self, arrow: &ArrowData, letter: Option<&str>) -> OffsetPx {
        match self.rule(letter, arrow.color) {
            Some(offset) => {
                log::debug!(letter = ?letter, color = %arrow.color, "special adjustment");
                offset
            }
            None => self.fallback.adjustment(arrow, letter),
        }
    }
}

// ============================================================================
// Policy Enum
// ============================================================================

/// An adjustment policy wrapping all policy types
#[enum_dispatch(AdjustmentCalculator)]
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentPolicy {
    NoAdjustment,
    QuadrantAdjustment,
    SpecialAdjustment,
}

impl Default for AdjustmentPolicy {
    fn default() -> Self {
        NoAdjustment.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArrowId, Motion, MotionId};
    use crate::notation::PropRotDir;
    use crate::types::Offset;

    fn arrow(motion_type: MotionType, start: Location, end: Location, turns: Turns) -> ArrowData {
        let motion =
            Motion::new(MotionId(1), motion_type, start, end, PropRotDir::Cw).with_turns(turns);
        ArrowData::from_motion(ArrowId(1), Color::Blue, &motion)
    }

    #[test]
    fn no_adjustment_is_zero() {
        let a = arrow(MotionType::Pro, Location::N, Location::E, Turns::ZERO);
        assert_eq!(NoAdjustment.adjustment(&a, Some("A")), Offset::px(0.0, 0.0));
    }

    #[test]
    fn quadrant_offset_rotates_with_location() {
        let table =
            QuadrantAdjustment::new().with(MotionType::Pro, Turns::ZERO, Offset::px(-10.0, 20.0));

        let ne = arrow(MotionType::Pro, Location::N, Location::E, Turns::ZERO);
        let se = arrow(MotionType::Pro, Location::E, Location::S, Turns::ZERO);
        let sw = arrow(MotionType::Pro, Location::S, Location::W, Turns::ZERO);
        let nw = arrow(MotionType::Pro, Location::W, Location::N, Turns::ZERO);

        assert_eq!(table.adjustment(&ne, None), Offset::px(-10.0, 20.0));
        assert_eq!(table.adjustment(&se, None), Offset::px(-20.0, -10.0));
        assert_eq!(table.adjustment(&sw, None), Offset::px(10.0, -20.0));
        assert_eq!(table.adjustment(&nw, None), Offset::px(20.0, 10.0));
    }

    #[test]
    fn quadrant_miss_is_zero() {
        let table =
            QuadrantAdjustment::new().with(MotionType::Pro, Turns::ZERO, Offset::px(1.0, 1.0));
        let stat = arrow(MotionType::Static, Location::N, Location::N, Turns::ZERO);
        assert_eq!(table.adjustment(&stat, None), OffsetPx::ZERO);
    }

    #[test]
    fn special_rule_wins_for_matching_letter_and_color() {
        let policy = SpecialAdjustment::new(NoAdjustment)
            .with_rule("G", Color::Blue, Offset::px(4.0, -6.0));
        let a = arrow(MotionType::Pro, Location::N, Location::E, Turns::ZERO);

        assert_eq!(policy.adjustment(&a, Some("G")), Offset::px(4.0, -6.0));
        assert_eq!(policy.adjustment(&a, Some("H")), OffsetPx::ZERO);
        assert_eq!(policy.adjustment(&a, None), OffsetPx::ZERO);

        let red = ArrowData { color: Color::Red, ..a };
        assert_eq!(policy.adjustment(&red, Some("G")), OffsetPx::ZERO);
    }

    #[test]
    fn special_defers_to_inner_policy() {
        let inner =
            QuadrantAdjustment::new().with(MotionType::Anti, Turns::Half(2), Offset::px(3.0, 3.0));
        let policy: AdjustmentPolicy = SpecialAdjustment::new(inner).into();
        let a = arrow(MotionType::Anti, Location::N, Location::E, Turns::Half(2));
        assert_eq!(policy.adjustment(&a, Some("A")), Offset::px(3.0, 3.0));
    }

    #[test]
    fn default_policy_leaves_arrows_on_their_anchor() {
        let policy = AdjustmentPolicy::default();
        assert_eq!(policy, AdjustmentPolicy::NoAdjustment(NoAdjustment));
        for &motion_type in MotionType::ALL {
            let a = arrow(motion_type, Location::N, Location::E, Turns::Half(2));
            assert_eq!(policy.adjustment(&a, Some("A")), OffsetPx::ZERO);
        }
    }
}
