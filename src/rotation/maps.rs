//! Built-in rotation angle tables.
//!
//! Angles are SVG degrees (clockwise, y-down) applied to the arrow glyph as
//! drawn in its asset, keyed by the location the arrow sits on.

use std::collections::HashMap;

use crate::notation::{HandRotDir, Location, Orientation, PropRotDir};
use crate::types::Angle;

use super::{OverrideAngle, PropRotAngles, RotationTables};

/// One angle per grid location; `None` is a hole in the table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocationAngles([Option<f64>; 8]);

impl LocationAngles {
    pub const EMPTY: LocationAngles = LocationAngles([None; 8]);

    /// Full table in `n, e, s, w, ne, se, sw, nw` order
    pub const fn compass(a: [f64; 8]) -> Self {
        LocationAngles([
            Some(a[0]),
            Some(a[1]),
            Some(a[2]),
            Some(a[3]),
            Some(a[4]),
            Some(a[5]),
            Some(a[6]),
            Some(a[7]),
        ])
    }

    pub fn get(&self, loc: Location) -> Option<Angle> {
        self.0[loc.index()].map(Angle)
    }

    pub fn with(mut self, loc: Location, degrees: f64) -> Self {
        self.0[loc.index()] = Some(degrees);
        self
    }

    pub fn without(mut self, loc: Location) -> Self {
        self.0[loc.index()] = None;
        self
    }
}

//                                       n      e      s      w      ne     se     sw     nw
const CLOCKWISE_SHIFT: LocationAngles =
    LocationAngles::compass([315.0, 45.0, 135.0, 225.0, 0.0, 90.0, 180.0, 270.0]);
const COUNTER_SHIFT: LocationAngles =
    LocationAngles::compass([45.0, 135.0, 225.0, 315.0, 90.0, 180.0, 270.0, 0.0]);
const ANTI_ALT_CW: LocationAngles =
    LocationAngles::compass([225.0, 315.0, 45.0, 135.0, 270.0, 0.0, 90.0, 180.0]);
const ANTI_ALT_CCW: LocationAngles =
    LocationAngles::compass([135.0, 225.0, 315.0, 45.0, 180.0, 270.0, 0.0, 90.0]);

const DASH_INWARD_CW: LocationAngles =
    LocationAngles::compass([90.0, 180.0, 270.0, 0.0, 135.0, 225.0, 315.0, 45.0]);
const DASH_INWARD_CCW: LocationAngles =
    LocationAngles::compass([270.0, 0.0, 90.0, 180.0, 315.0, 45.0, 135.0, 225.0]);
const DASH_CW_OVERRIDE: LocationAngles =
    LocationAngles::compass([0.0, 90.0, 180.0, 270.0, 45.0, 135.0, 225.0, 315.0]);
const DASH_CCW_OVERRIDE: LocationAngles =
    LocationAngles::compass([180.0, 270.0, 0.0, 90.0, 225.0, 315.0, 45.0, 135.0]);

const STATIC_RADIAL_CW: LocationAngles =
    LocationAngles::compass([0.0, 90.0, 180.0, 270.0, 45.0, 135.0, 225.0, 315.0]);
const STATIC_RADIAL_CCW: LocationAngles =
    LocationAngles::compass([0.0, 270.0, 180.0, 90.0, 315.0, 225.0, 135.0, 45.0]);
const STATIC_NON_RADIAL_CW: LocationAngles =
    LocationAngles::compass([90.0, 180.0, 270.0, 0.0, 135.0, 225.0, 315.0, 45.0]);
const STATIC_NON_RADIAL_CCW: LocationAngles =
    LocationAngles::compass([270.0, 0.0, 90.0, 180.0, 315.0, 45.0, 135.0, 225.0]);

fn by_rot_dir(cw: LocationAngles, ccw: LocationAngles) -> PropRotAngles {
    HashMap::from([(PropRotDir::Cw, cw), (PropRotDir::Ccw, ccw)])
}

/// Travel direction of a non-rotating dash, keyed by (start, end)
fn dash_no_rotation() -> HashMap<(Location, Location), Angle> {
    use Location::*;
    HashMap::from([
        ((N, S), Angle(90.0)),
        ((S, N), Angle(270.0)),
        ((E, W), Angle(180.0)),
        ((W, E), Angle(0.0)),
        ((Ne, Sw), Angle(135.0)),
        ((Sw, Ne), Angle(315.0)),
        ((Nw, Se), Angle(45.0)),
        ((Se, Nw), Angle(225.0)),
    ])
}

fn static_radial_override() -> HashMap<Location, OverrideAngle> {
    HashMap::from([
        (Location::N, OverrideAngle::Flat(180.0)),
        (Location::S, OverrideAngle::Flat(0.0)),
        (
            Location::E,
            OverrideAngle::by_rot_dir([(PropRotDir::Cw, 270.0), (PropRotDir::Ccw, 90.0)]),
        ),
        (
            Location::W,
            OverrideAngle::by_rot_dir([(PropRotDir::Cw, 90.0), (PropRotDir::Ccw, 270.0)]),
        ),
    ])
}

fn static_non_radial_override() -> HashMap<Location, OverrideAngle> {
    HashMap::from([
        (Location::E, OverrideAngle::Flat(270.0)),
        (Location::W, OverrideAngle::Flat(90.0)),
        (
            Location::N,
            OverrideAngle::by_rot_dir([(PropRotDir::Cw, 0.0), (PropRotDir::Ccw, 180.0)]),
        ),
        (
            Location::S,
            OverrideAngle::by_rot_dir([(PropRotDir::Cw, 180.0), (PropRotDir::Ccw, 0.0)]),
        ),
    ])
}

/// The tables shipped with the engine
pub fn builtin() -> RotationTables {
    let inward = by_rot_dir(DASH_INWARD_CW, DASH_INWARD_CCW);
    let outward = by_rot_dir(DASH_INWARD_CCW, DASH_INWARD_CW);

    let mut static_radial = by_rot_dir(STATIC_RADIAL_CW, STATIC_RADIAL_CCW);
    static_radial.insert(PropRotDir::NoRot, STATIC_RADIAL_CW);
    let mut static_non_radial = by_rot_dir(STATIC_NON_RADIAL_CW, STATIC_NON_RADIAL_CCW);
    static_non_radial.insert(PropRotDir::NoRot, STATIC_NON_RADIAL_CW);

    RotationTables {
        pro: by_rot_dir(CLOCKWISE_SHIFT, COUNTER_SHIFT),
        anti_regular: by_rot_dir(COUNTER_SHIFT, CLOCKWISE_SHIFT),
        anti_alt: by_rot_dir(ANTI_ALT_CW, ANTI_ALT_CCW),
        float: HashMap::from([
            (HandRotDir::CwShift, CLOCKWISE_SHIFT),
            (HandRotDir::CcwShift, COUNTER_SHIFT),
        ]),
        dash: HashMap::from([
            (Orientation::In, inward.clone()),
            (Orientation::Clock, inward),
            (Orientation::Out, outward.clone()),
            (Orientation::Counter, outward),
        ]),
        dash_no_rotation: dash_no_rotation(),
        dash_cw_override: DASH_CW_OVERRIDE,
        dash_ccw_override: DASH_CCW_OVERRIDE,
        static_radial,
        static_non_radial,
        static_radial_override: static_radial_override(),
        static_non_radial_override: static_non_radial_override(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compass_order_matches_location_index() {
        let table = LocationAngles::compass([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(table.get(Location::N), Some(Angle(1.0)));
        assert_eq!(table.get(Location::W), Some(Angle(4.0)));
        assert_eq!(table.get(Location::Ne), Some(Angle(5.0)));
        assert_eq!(table.get(Location::Nw), Some(Angle(8.0)));
    }

    #[test]
    fn holes_read_as_none() {
        let table = CLOCKWISE_SHIFT.without(Location::Se);
        assert_eq!(table.get(Location::Se), None);
        assert_eq!(LocationAngles::EMPTY.get(Location::N), None);
        let one = LocationAngles::EMPTY.with(Location::N, 12.0);
        assert_eq!(one.get(Location::N), Some(Angle(12.0)));
    }

    #[test]
    fn builtin_shift_tables_cover_every_location() {
        let tables = builtin();
        for dir in [PropRotDir::Cw, PropRotDir::Ccw] {
            for map in [&tables.pro, &tables.anti_regular, &tables.anti_alt] {
                for loc in Location::ALL {
                    assert!(map[&dir].get(*loc).is_some(), "{dir} {loc}");
                }
            }
        }
    }

    #[test]
    fn dash_tables_cover_every_orientation() {
        let tables = builtin();
        for ori in Orientation::ALL {
            assert!(tables.dash.contains_key(ori), "{ori}");
        }
    }
}
