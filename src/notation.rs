//! Notation vocabulary: motion types, grid locations, orientations, rotation
//! directions and turn counts.
//!
//! Every enum parses from and displays as the lowercase token used in the
//! pictograph CSV/JSON records (`pro`, `ne`, `no_rot`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::NotationError;
use crate::log;

/// Declares a notation enum with its record token, `ALL`, `as_str`,
/// `Display`, `FromStr` and serde names.
macro_rules! notation_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $err:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = NotationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(NotationError::$err { value: s.to_string() }),
                }
            }
        }
    };
}

notation_enum! {
    /// How a prop travels between its start and end location
    MotionType => UnknownMotionType {
        Pro => "pro",
        Anti => "anti",
        Float => "float",
        Dash => "dash",
        Static => "static",
    }
}

impl MotionType {
    /// Shift motions move the hand to an adjacent point and sit on layer 2
    pub fn is_shift(self) -> bool {
        matches!(self, MotionType::Pro | MotionType::Anti | MotionType::Float)
    }
}

notation_enum! {
    /// One of the eight named points around the grid centre
    Location => UnknownLocation {
        N => "n",
        E => "e",
        S => "s",
        W => "w",
        Ne => "ne",
        Se => "se",
        Sw => "sw",
        Nw => "nw",
    }
}

impl Location {
    /// Dense index in declaration order, for fixed-size tables
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Position on the compass rose, clockwise from north (n = 0, ne = 1, ...)
    pub fn compass_index(self) -> u8 {
        match self {
            Location::N => 0,
            Location::Ne => 1,
            Location::E => 2,
            Location::Se => 3,
            Location::S => 4,
            Location::Sw => 5,
            Location::W => 6,
            Location::Nw => 7,
        }
    }

    pub fn from_compass_index(index: u8) -> Location {
        match index % 8 {
            0 => Location::N,
            1 => Location::Ne,
            2 => Location::E,
            3 => Location::Se,
            4 => Location::S,
            5 => Location::Sw,
            6 => Location::W,
            _ => Location::Nw,
        }
    }

    /// Direction of this point from the grid centre in SVG degrees
    /// (east = 0, clockwise, y-down).
    pub fn svg_angle(self) -> f64 {
        (f64::from(self.compass_index()) * 45.0 + 270.0) % 360.0
    }

    pub fn is_diagonal(self) -> bool {
        self.compass_index() % 2 == 1
    }

    /// The point halfway between two locations that are a quarter turn apart
    /// (n/e → ne, ne/se → e). Any other pair has no single midpoint.
    pub fn between(a: Location, b: Location) -> Option<Location> {
        let (ia, ib) = (a.compass_index(), b.compass_index());
        if (ia + 2) % 8 == ib {
            Some(Location::from_compass_index(ia + 1))
        } else if (ib + 2) % 8 == ia {
            Some(Location::from_compass_index(ib + 1))
        } else {
            None
        }
    }
}

notation_enum! {
    /// Grid layout: hands on the cardinal points (diamond) or the diagonals (box)
    GridMode => UnknownGridMode {
        Diamond => "diamond",
        Box => "box",
    }
}

impl Default for GridMode {
    fn default() -> Self {
        GridMode::Diamond
    }
}

notation_enum! {
    /// Prop orientation relative to the grid centre
    Orientation => UnknownOrientation {
        In => "in",
        Out => "out",
        Clock => "clock",
        Counter => "counter",
    }
}

impl Orientation {
    /// `in`/`out` point along the radius; `clock`/`counter` are tangential
    pub fn is_radial(self) -> bool {
        matches!(self, Orientation::In | Orientation::Out)
    }
}

notation_enum! {
    /// Spin direction of the prop itself
    PropRotDir => UnknownPropRotDir {
        Cw => "cw",
        Ccw => "ccw",
        NoRot => "no_rot",
    }
}

notation_enum! {
    /// Path the hand takes around the grid
    HandRotDir => UnknownHandRotDir {
        CwShift => "cw_shift",
        CcwShift => "ccw_shift",
        Dash => "dash",
        Static => "static",
    }
}

notation_enum! {
    Color => UnknownColor {
        Red => "red",
        Blue => "blue",
    }
}

// ============================================================================
// Turns
// ============================================================================

/// Quantized turn count.
///
/// `Half(n)` is `n / 2` turns for `n` in `0..=6`; `Float` is the `"fl"`
/// sentinel, numerically `-0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turns {
    Float,
    Half(u8),
}

impl Default for Turns {
    fn default() -> Self {
        Turns::ZERO
    }
}

impl Turns {
    pub const ZERO: Turns = Turns::Half(0);
    pub const FLOAT_TOKEN: &'static str = "fl";
    pub const FLOAT_VALUE: f64 = -0.5;
    const MAX_HALVES: u8 = 6;

    /// Every valid turn count, numeric values first
    pub const ALL: &'static [Turns] = &[
        Turns::Half(0),
        Turns::Half(1),
        Turns::Half(2),
        Turns::Half(3),
        Turns::Half(4),
        Turns::Half(5),
        Turns::Half(6),
        Turns::Float,
    ];

    pub fn from_f64(value: f64) -> Option<Turns> {
        if value == Self::FLOAT_VALUE {
            return Some(Turns::Float);
        }
        let halves = value * 2.0;
        if halves.fract() == 0.0 && (0.0..=f64::from(Self::MAX_HALVES)).contains(&halves) {
            Some(Turns::Half(halves as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Turns::Float => Self::FLOAT_VALUE,
            Turns::Half(n) => f64::from(n) / 2.0,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Turns::Float)
    }

    /// 0.5, 1.5 and 2.5
    pub fn is_half_integer(self) -> bool {
        matches!(self, Turns::Half(n) if n % 2 == 1)
    }

    /// Parse a record token, falling back to zero turns for anything invalid
    pub fn parse_lenient(s: &str) -> Turns {
        s.parse().unwrap_or_else(|_| {
            log::warn!(value = s, "invalid turns value, using 0");
            Turns::ZERO
        })
    }
}

impl FromStr for Turns {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(Self::FLOAT_TOKEN) {
            return Ok(Turns::Float);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(Turns::from_f64)
            .ok_or_else(|| NotationError::InvalidTurns { value: s.to_string() })
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turns::Float => f.write_str(Self::FLOAT_TOKEN),
            Turns::Half(_) => write!(f, "{}", self.value()),
        }
    }
}

impl Serialize for Turns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Turns::Float => serializer.serialize_str(Self::FLOAT_TOKEN),
            Turns::Half(_) => serializer.serialize_f64(self.value()),
        }
    }
}

/// Turns as they appear in records: a number or the `"fl"` token
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTurns {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for Turns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawTurns::deserialize(deserializer)? {
            RawTurns::Number(n) => Turns::from_f64(n)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid turns value: {n}"))),
            RawTurns::Text(s) => s.parse().map_err(serde::de::Error::custom),
            RawTurns::Other(_) => Err(serde::de::Error::custom("turns must be a number or \"fl\"")),
        }
    }
}

/// `deserialize_with` adapter for motion records: an invalid turns value
/// reads as zero turns with a warning, so the rest of the record survives.
pub fn deserialize_turns_lenient<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Turns, D::Error> {
    let turns = match RawTurns::deserialize(deserializer)? {
        RawTurns::Number(n) => Turns::from_f64(n).unwrap_or_else(|| {
            log::warn!(value = n, "invalid turns value, using 0");
            Turns::ZERO
        }),
        RawTurns::Text(s) => Turns::parse_lenient(&s),
        RawTurns::Other(_) => {
            log::warn!("turns is neither a number nor a token, using 0");
            Turns::ZERO
        }
    };
    Ok(turns)
}

/// Numeric value of a turns token; `"fl"` is `-0.5`, invalid input is `0`.
pub fn parse_turns_value(s: &str) -> f64 {
    Turns::parse_lenient(s).value()
}

/// Record token for a numeric turns value; `-0.5` is `"fl"`, invalid input is `"0"`.
pub fn display_turns_value(value: f64) -> String {
    match Turns::from_f64(value) {
        Some(turns) => turns.to_string(),
        None => {
            log::warn!(value, "invalid turns value, displaying 0");
            Turns::ZERO.to_string()
        }
    }
}
