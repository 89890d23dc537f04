//! Arrow rotation angle resolution
//!
//! Each motion type picks its table, then the table is keyed by rotation
//! direction (or orientation, or start/end pair) and the arrow's location.
//! A hole in any table resolves to 0° with a warning: the notation has more
//! edge-case combinations than the tables cover, and one odd beat must not
//! break the sequence around it.

pub mod maps;
pub mod overrides;

use std::collections::HashMap;

use crate::log;
use crate::model::Motion;
use crate::notation::{HandRotDir, Location, MotionType, Orientation, PropRotDir};
use crate::types::Angle;

pub use maps::LocationAngles;
pub use overrides::{NoOverrides, OverrideRule, OverrideSet, RotationOverridePolicy};

pub type PropRotAngles = HashMap<PropRotDir, LocationAngles>;

/// An entry in the static override tables: either one angle for every
/// rotation direction, or one per direction
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideAngle {
    Flat(f64),
    ByRotDir(HashMap<PropRotDir, f64>),
}

impl OverrideAngle {
    pub fn by_rot_dir<const N: usize>(entries: [(PropRotDir, f64); N]) -> Self {
        OverrideAngle::ByRotDir(HashMap::from(entries))
    }

    fn resolve(&self, prop_rot_dir: PropRotDir) -> Option<Angle> {
        match self {
            OverrideAngle::Flat(degrees) => Some(Angle(*degrees)),
            OverrideAngle::ByRotDir(by_dir) => by_dir.get(&prop_rot_dir).copied().map(Angle),
        }
    }
}

/// Every table the resolver consults.
///
/// Built once by the host (usually [`RotationTables::default`]) and shared
/// read-only; tests swap individual maps for fixtures.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationTables {
    pub pro: PropRotAngles,
    pub anti_regular: PropRotAngles,
    /// Used by anti motions starting non-radial with a half-integer turn count
    pub anti_alt: PropRotAngles,
    pub float: HashMap<HandRotDir, LocationAngles>,
    pub dash: HashMap<Orientation, PropRotAngles>,
    pub dash_no_rotation: HashMap<(Location, Location), Angle>,
    pub dash_cw_override: LocationAngles,
    pub dash_ccw_override: LocationAngles,
    pub static_radial: PropRotAngles,
    pub static_non_radial: PropRotAngles,
    pub static_radial_override: HashMap<Location, OverrideAngle>,
    pub static_non_radial_override: HashMap<Location, OverrideAngle>,
}

impl Default for RotationTables {
    fn default() -> Self {
        maps::builtin()
    }
}

impl RotationTables {
    /// Tables with every map empty; every lookup misses
    pub fn empty() -> Self {
        Self {
            pro: HashMap::new(),
            anti_regular: HashMap::new(),
            anti_alt: HashMap::new(),
            float: HashMap::new(),
            dash: HashMap::new(),
            dash_no_rotation: HashMap::new(),
            dash_cw_override: LocationAngles::EMPTY,
            dash_ccw_override: LocationAngles::EMPTY,
            static_radial: HashMap::new(),
            static_non_radial: HashMap::new(),
            static_radial_override: HashMap::new(),
            static_non_radial_override: HashMap::new(),
        }
    }
}

/// Anti arrows flip to the alternate table when the prop starts tangential
/// (clock/counter) and makes a half-integer number of turns
pub fn uses_anti_alt_map(motion: &Motion) -> bool {
    !motion.start_ori.is_radial() && motion.turns.is_half_integer()
}

/// Rotation of the arrow for `motion` sitting at `arrow_loc`.
///
/// Total over every input: a missing table entry yields 0°.
pub fn arrow_rotation_angle<P>(
    motion: &Motion,
    arrow_loc: Location,
    tables: &RotationTables,
    overrides: &P,
) -> Angle
where
    P: RotationOverridePolicy + ?Sized,
{
    let resolved = match motion.motion_type {
        MotionType::Pro => lookup(&tables.pro, motion.prop_rot_dir, arrow_loc),
        MotionType::Anti => {
            let map = if uses_anti_alt_map(motion) {
                &tables.anti_alt
            } else {
                &tables.anti_regular
            };
            lookup(map, motion.prop_rot_dir, arrow_loc)
        }
        MotionType::Float => {
            let hand = motion.hand_rot_dir.unwrap_or(HandRotDir::CwShift);
            tables.float.get(&hand).and_then(|map| map.get(arrow_loc))
        }
        MotionType::Dash => dash_angle(motion, arrow_loc, tables, overrides),
        MotionType::Static => static_angle(motion, arrow_loc, tables, overrides),
    };

    resolved.unwrap_or_else(|| {
        log::warn!(
            motion_type = %motion.motion_type,
            prop_rot_dir = %motion.prop_rot_dir,
            start_ori = %motion.start_ori,
            loc = %arrow_loc,
            "no rotation angle for arrow, using 0"
        );
        Angle::ZERO
    })
}

fn lookup(map: &PropRotAngles, prop_rot_dir: PropRotDir, loc: Location) -> Option<Angle> {
    map.get(&prop_rot_dir).and_then(|angles| angles.get(loc))
}

fn dash_angle<P>(
    motion: &Motion,
    arrow_loc: Location,
    tables: &RotationTables,
    overrides: &P,
) -> Option<Angle>
where
    P: RotationOverridePolicy + ?Sized,
{
    if overrides.has_rotation_override(motion, arrow_loc) {
        let table = match motion.prop_rot_dir {
            PropRotDir::Cw => Some(&tables.dash_cw_override),
            PropRotDir::Ccw => Some(&tables.dash_ccw_override),
            // no directional override exists; use the travel direction below
            PropRotDir::NoRot => None,
        };
        if let Some(table) = table {
            return table.get(arrow_loc);
        }
    }

    if motion.prop_rot_dir == PropRotDir::NoRot {
        return tables
            .dash_no_rotation
            .get(&(motion.start_loc, motion.end_loc))
            .copied();
    }

    tables
        .dash
        .get(&motion.start_ori)
        .and_then(|by_dir| lookup(by_dir, motion.prop_rot_dir, arrow_loc))
}

fn static_angle<P>(
    motion: &Motion,
    arrow_loc: Location,
    tables: &RotationTables,
    overrides: &P,
) -> Option<Angle>
where
    P: RotationOverridePolicy + ?Sized,
{
    let radial = motion.start_ori.is_radial();

    if overrides.has_rotation_override(motion, arrow_loc) {
        let table = if radial {
            &tables.static_radial_override
        } else {
            &tables.static_non_radial_override
        };
        return table
            .get(&arrow_loc)
            .and_then(|entry| entry.resolve(motion.prop_rot_dir));
    }

    let base = if radial {
        &tables.static_radial
    } else {
        &tables.static_non_radial
    };
    lookup(base, motion.prop_rot_dir, arrow_loc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MotionId;
    use crate::notation::Turns;

    fn motion(motion_type: MotionType, prop_rot_dir: PropRotDir) -> Motion {
        Motion::new(MotionId(1), motion_type, Location::N, Location::E, prop_rot_dir)
    }

    /// Regular and alternate anti maps that disagree at every key
    fn divergent_anti_tables() -> RotationTables {
        let mut tables = RotationTables::empty();
        tables.anti_regular.insert(
            PropRotDir::Cw,
            LocationAngles::EMPTY.with(Location::Ne, 10.0),
        );
        tables.anti_alt.insert(
            PropRotDir::Cw,
            LocationAngles::EMPTY.with(Location::Ne, 200.0),
        );
        tables
    }

    #[test]
    fn pro_reads_rot_dir_then_location() {
        let mut tables = RotationTables::empty();
        tables.pro.insert(PropRotDir::Cw, LocationAngles::EMPTY.with(Location::Ne, 45.0));
        tables.pro.insert(PropRotDir::Ccw, LocationAngles::EMPTY.with(Location::Ne, 135.0));

        let cw = motion(MotionType::Pro, PropRotDir::Cw);
        assert_eq!(arrow_rotation_angle(&cw, Location::Ne, &tables, &NoOverrides), Angle(45.0));

        let ccw = cw.with_prop_rot_dir(PropRotDir::Ccw);
        assert_eq!(arrow_rotation_angle(&ccw, Location::Ne, &tables, &NoOverrides), Angle(135.0));
    }

    #[test]
    fn anti_uses_alt_map_for_non_radial_half_turns() {
        let tables = divergent_anti_tables();
        let anti = motion(MotionType::Anti, PropRotDir::Cw)
            .with_orientations(Orientation::Clock, Orientation::In)
            .with_turns(Turns::Half(3));
        assert!(uses_anti_alt_map(&anti));
        assert_eq!(arrow_rotation_angle(&anti, Location::Ne, &tables, &NoOverrides), Angle(200.0));
    }

    #[test]
    fn anti_uses_regular_map_otherwise() {
        let tables = divergent_anti_tables();
        let base = motion(MotionType::Anti, PropRotDir::Cw);

        let radial_half = base.clone().with_turns(Turns::Half(1));
        let counter_whole = base
            .clone()
            .with_orientations(Orientation::Counter, Orientation::Out)
            .with_turns(Turns::Half(2));
        let counter_float = base
            .with_orientations(Orientation::Counter, Orientation::Out)
            .with_turns(Turns::Float);

        for m in [radial_half, counter_whole, counter_float] {
            assert!(!uses_anti_alt_map(&m), "{m:?}");
            assert_eq!(arrow_rotation_angle(&m, Location::Ne, &tables, &NoOverrides), Angle(10.0));
        }
    }

    #[test]
    fn float_defaults_to_clockwise_hand_path() {
        let mut tables = RotationTables::empty();
        tables.float.insert(HandRotDir::CwShift, LocationAngles::EMPTY.with(Location::Sw, 30.0));
        tables.float.insert(HandRotDir::CcwShift, LocationAngles::EMPTY.with(Location::Sw, 60.0));

        let float = motion(MotionType::Float, PropRotDir::NoRot);
        assert_eq!(arrow_rotation_angle(&float, Location::Sw, &tables, &NoOverrides), Angle(30.0));

        let ccw = float.with_hand_rot_dir(HandRotDir::CcwShift);
        assert_eq!(arrow_rotation_angle(&ccw, Location::Sw, &tables, &NoOverrides), Angle(60.0));
    }

    #[test]
    fn dash_without_rotation_keys_by_start_and_end() {
        let tables = RotationTables::default();
        let dash = Motion::new(
            MotionId(3),
            MotionType::Dash,
            Location::S,
            Location::N,
            PropRotDir::NoRot,
        );
        assert_eq!(arrow_rotation_angle(&dash, Location::S, &tables, &NoOverrides), Angle(270.0));
    }

    #[test]
    fn dash_with_rotation_keys_by_start_orientation() {
        let mut tables = RotationTables::empty();
        tables.dash.insert(
            Orientation::Out,
            HashMap::from([(PropRotDir::Ccw, LocationAngles::EMPTY.with(Location::E, 77.0))]),
        );
        let dash = Motion::new(
            MotionId(3),
            MotionType::Dash,
            Location::E,
            Location::W,
            PropRotDir::Ccw,
        )
        .with_orientations(Orientation::Out, Orientation::Out);
        assert_eq!(arrow_rotation_angle(&dash, Location::E, &tables, &NoOverrides), Angle(77.0));

        let inward = dash.with_orientations(Orientation::In, Orientation::In);
        assert_eq!(arrow_rotation_angle(&inward, Location::E, &tables, &NoOverrides), Angle::ZERO);
    }

    #[test]
    fn dash_override_uses_directional_override_table() {
        let tables = RotationTables::default();
        let rules = OverrideSet::new().with_rule(OverrideRule::new(MotionType::Dash));
        let dash = Motion::new(
            MotionId(3),
            MotionType::Dash,
            Location::N,
            Location::S,
            PropRotDir::Ccw,
        );

        assert_eq!(arrow_rotation_angle(&dash, Location::N, &tables, &rules), Angle(180.0));
        let cw = dash.with_prop_rot_dir(PropRotDir::Cw);
        assert_eq!(arrow_rotation_angle(&cw, Location::N, &tables, &rules), Angle(0.0));
    }

    #[test]
    fn static_picks_radial_or_non_radial_base() {
        let tables = RotationTables::default();
        let stat = Motion::new(
            MotionId(4),
            MotionType::Static,
            Location::E,
            Location::E,
            PropRotDir::Cw,
        );
        assert_eq!(arrow_rotation_angle(&stat, Location::E, &tables, &NoOverrides), Angle(90.0));

        let clock = stat.with_orientations(Orientation::Clock, Orientation::Clock);
        assert_eq!(arrow_rotation_angle(&clock, Location::E, &tables, &NoOverrides), Angle(180.0));
    }

    #[test]
    fn static_override_handles_flat_and_nested_entries() {
        let tables = RotationTables::default();
        let rules = OverrideSet::new().with_rule(OverrideRule::new(MotionType::Static));
        let stat = |loc, dir| Motion::new(MotionId(4), MotionType::Static, loc, loc, dir);

        // flat
        let north = stat(Location::N, PropRotDir::Ccw);
        assert_eq!(arrow_rotation_angle(&north, Location::N, &tables, &rules), Angle(180.0));

        // nested by rotation direction
        let east_cw = stat(Location::E, PropRotDir::Cw);
        let east_ccw = stat(Location::E, PropRotDir::Ccw);
        assert_eq!(arrow_rotation_angle(&east_cw, Location::E, &tables, &rules), Angle(270.0));
        assert_eq!(arrow_rotation_angle(&east_ccw, Location::E, &tables, &rules), Angle(90.0));

        let east_no_rot = stat(Location::E, PropRotDir::NoRot);
        assert_eq!(arrow_rotation_angle(&east_no_rot, Location::E, &tables, &rules), Angle::ZERO);
    }

    #[test]
    fn every_combination_resolves_with_empty_tables() {
        let tables = RotationTables::empty();
        for motion_type in MotionType::ALL {
            for dir in PropRotDir::ALL {
                for loc in Location::ALL {
                    let m = motion(*motion_type, *dir);
                    assert_eq!(arrow_rotation_angle(&m, *loc, &tables, &NoOverrides), Angle::ZERO);
                }
            }
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let tables = RotationTables::default();
        let m = motion(MotionType::Anti, PropRotDir::Ccw)
            .with_orientations(Orientation::Counter, Orientation::In)
            .with_turns(Turns::Half(5));
        let first = arrow_rotation_angle(&m, Location::Se, &tables, &NoOverrides);
        for _ in 0..10 {
            assert_eq!(arrow_rotation_angle(&m, Location::Se, &tables, &NoOverrides), first);
        }
    }
}
