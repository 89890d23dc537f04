//! Motion and arrow entities.
//!
//! A [`Motion`] is owned by a beat and never edited in place: the `with_*`
//! helpers return a new value. An [`ArrowData`] is derived from a motion;
//! its `coords` and `rot_angle` are written only by the placement pass.

use serde::{Deserialize, Serialize};

use crate::notation::{
    Color, HandRotDir, Location, MotionType, Orientation, PropRotDir, Turns,
};
use crate::svg::SvgMetadata;
use crate::types::{Angle, PtPx, SizePx};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrowId(pub u32);

/// How one prop moves during a beat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub id: MotionId,
    pub motion_type: MotionType,
    pub start_loc: Location,
    pub end_loc: Location,
    pub start_ori: Orientation,
    pub end_ori: Orientation,
    pub prop_rot_dir: PropRotDir,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_rot_dir: Option<HandRotDir>,
    #[serde(default, deserialize_with = "crate::notation::deserialize_turns_lenient")]
    pub turns: Turns,
}

impl Motion {
    pub fn new(
        id: MotionId,
        motion_type: MotionType,
        start_loc: Location,
        end_loc: Location,
        prop_rot_dir: PropRotDir,
    ) -> Self {
        Self {
            id,
            motion_type,
            start_loc,
            end_loc,
            start_ori: Orientation::In,
            end_ori: Orientation::In,
            prop_rot_dir,
            hand_rot_dir: None,
            turns: Turns::ZERO,
        }
    }

    pub fn with_orientations(self, start_ori: Orientation, end_ori: Orientation) -> Self {
        Self { start_ori, end_ori, ..self }
    }

    pub fn with_turns(self, turns: Turns) -> Self {
        Self { turns, ..self }
    }

    pub fn with_prop_rot_dir(self, prop_rot_dir: PropRotDir) -> Self {
        Self { prop_rot_dir, ..self }
    }

    pub fn with_hand_rot_dir(self, hand_rot_dir: HandRotDir) -> Self {
        Self { hand_rot_dir: Some(hand_rot_dir), ..self }
    }

    /// Where the arrow glyph sits for this motion.
    ///
    /// Shift motions use the layer-2 point between start and end; static and
    /// dash arrows sit on the start point.
    pub fn arrow_location(&self) -> Location {
        if self.motion_type.is_shift() {
            Location::between(self.start_loc, self.end_loc).unwrap_or(self.end_loc)
        } else {
            self.start_loc
        }
    }

    /// Whether the arrow SVG is drawn flipped horizontally
    pub fn arrow_mirrored(&self) -> bool {
        match self.motion_type {
            MotionType::Pro => self.prop_rot_dir == PropRotDir::Ccw,
            MotionType::Anti => self.prop_rot_dir == PropRotDir::Cw,
            MotionType::Float => self.hand_rot_dir == Some(HandRotDir::CcwShift),
            MotionType::Dash | MotionType::Static => self.prop_rot_dir == PropRotDir::Ccw,
        }
    }
}

/// The arrow glyph for one motion, with its derived placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowData {
    pub id: ArrowId,
    /// Weak reference to the owning motion
    pub motion_id: MotionId,
    pub color: Color,
    pub loc: Location,
    pub motion_type: MotionType,
    pub start_ori: Orientation,
    pub end_ori: Orientation,
    #[serde(deserialize_with = "crate::notation::deserialize_turns_lenient")]
    pub turns: Turns,
    pub prop_rot_dir: PropRotDir,
    /// Top-left of the rendered arrow (derived)
    pub coords: PtPx,
    /// Visual rotation (derived)
    pub rot_angle: Angle,
    pub svg_mirrored: bool,
    pub svg_center: Option<PtPx>,
    pub svg_loaded: bool,
    pub svg_data: Option<SvgMetadata>,
}

impl ArrowData {
    /// Derive an arrow from its motion with unplaced coordinates
    pub fn from_motion(id: ArrowId, color: Color, motion: &Motion) -> Self {
        Self {
            id,
            motion_id: motion.id,
            color,
            loc: motion.arrow_location(),
            motion_type: motion.motion_type,
            start_ori: motion.start_ori,
            end_ori: motion.end_ori,
            turns: motion.turns,
            prop_rot_dir: motion.prop_rot_dir,
            coords: PtPx::ORIGIN,
            rot_angle: Angle::ZERO,
            svg_mirrored: motion.arrow_mirrored(),
            svg_center: None,
            svg_loaded: false,
            svg_data: None,
        }
    }

    /// Attach loaded SVG metadata; the bounding box becomes known
    pub fn with_svg(self, svg: SvgMetadata) -> Self {
        Self {
            svg_center: Some(svg.center),
            svg_loaded: true,
            svg_data: Some(svg),
            ..self
        }
    }

    /// Rendered bounding box size, or zero while the SVG is not loaded
    pub fn bounding_box(&self) -> SizePx {
        match (&self.svg_data, self.svg_loaded) {
            (Some(svg), true) => svg.view_box,
            _ => SizePx::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point, Size};

    fn motion(motion_type: MotionType, start: Location, end: Location) -> Motion {
        Motion::new(MotionId(1), motion_type, start, end, PropRotDir::Cw)
    }

    fn arrow_loc(motion_type: MotionType, start: Location, end: Location) -> Location {
        motion(motion_type, start, end).arrow_location()
    }

    #[test]
    fn shift_arrows_sit_between_start_and_end() {
        assert_eq!(arrow_loc(MotionType::Pro, Location::N, Location::E), Location::Ne);
        assert_eq!(arrow_loc(MotionType::Anti, Location::S, Location::W), Location::Sw);
        assert_eq!(arrow_loc(MotionType::Float, Location::Ne, Location::Se), Location::E);
    }

    #[test]
    fn shift_without_midpoint_uses_end() {
        assert_eq!(arrow_loc(MotionType::Pro, Location::N, Location::S), Location::S);
    }

    #[test]
    fn static_and_dash_arrows_sit_on_start() {
        assert_eq!(arrow_loc(MotionType::Static, Location::W, Location::W), Location::W);
        assert_eq!(arrow_loc(MotionType::Dash, Location::N, Location::S), Location::N);
    }

    #[test]
    fn edits_produce_new_motion() {
        let original = motion(MotionType::Pro, Location::N, Location::E);
        let edited = original.clone().with_turns(Turns::Half(2));
        assert_eq!(original.turns, Turns::ZERO);
        assert_eq!(edited.turns, Turns::Half(2));
    }

    #[test]
    fn mirroring_follows_rotation_direction() {
        let pro = motion(MotionType::Pro, Location::N, Location::E);
        assert!(!pro.arrow_mirrored());
        assert!(pro.clone().with_prop_rot_dir(PropRotDir::Ccw).arrow_mirrored());

        let anti = motion(MotionType::Anti, Location::N, Location::E);
        assert!(anti.arrow_mirrored());

        let float = motion(MotionType::Float, Location::N, Location::E);
        assert!(!float.arrow_mirrored());
        assert!(float.with_hand_rot_dir(HandRotDir::CcwShift).arrow_mirrored());
    }

    #[test]
    fn bounding_box_unknown_until_svg_loaded() {
        let m = motion(MotionType::Pro, Location::N, Location::E);
        let arrow = ArrowData::from_motion(ArrowId(7), Color::Red, &m);
        assert_eq!(arrow.bounding_box(), Size::ZERO);

        let svg = SvgMetadata {
            view_box: Size::px(40.0, 80.0),
            center: Point::px(20.0, 40.0),
        };
        let loaded = arrow.with_svg(svg);
        assert_eq!(loaded.bounding_box(), Size::px(40.0, 80.0));
        assert_eq!(loaded.svg_center, Some(Point::px(20.0, 40.0)));
    }

    #[test]
    fn arrow_copies_motion_fields() {
        let m = motion(MotionType::Anti, Location::E, Location::S)
            .with_orientations(Orientation::Clock, Orientation::Out)
            .with_turns(Turns::Half(3));
        let arrow = ArrowData::from_motion(ArrowId(2), Color::Blue, &m);
        assert_eq!(arrow.motion_id, m.id);
        assert_eq!(arrow.loc, Location::Se);
        assert_eq!(arrow.start_ori, Orientation::Clock);
        assert_eq!(arrow.turns, Turns::Half(3));
        assert_eq!(arrow.coords, Point::px(0.0, 0.0));
    }
}
