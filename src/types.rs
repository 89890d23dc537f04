//! Strongly-typed numeric primitives for placement math (zero-cost newtypes).
//!
//! Grid coordinates, arrow anchors and SVG bounding boxes all live in the
//! pictograph's pixel space (the bundled grid is 950×950 with its centre at
//! 475,475). Positions and displacements are distinct types so that
//! `Point + Offset = Point` and `Point - Point = Offset` are the only
//! arithmetic the placement pass can do.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A number read from grid or SVG text that cannot be a pixel value
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    #[error("value is NaN")]
    NaN,
    #[error("value is infinite")]
    Infinite,
    #[error("value is negative")]
    Negative,
}

/// Length in pictograph pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Pixel value from parsed input; NaN and infinities are rejected
    pub fn try_new(val: f64) -> Result<Px, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Px(val))
        }
    }

    /// Like [`Px::try_new`], for extents such as viewBox width and height
    pub fn try_non_negative(val: f64) -> Result<Px, NumericError> {
        let px = Px::try_new(val)?;
        if px.0 < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(px)
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px { Px(self.0 + rhs.0) }
}
impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px { Px(self.0 - rhs.0) }
}
impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px { Px(self.0 * rhs) }
}
impl Div<f64> for Px {
    type Output = Px;
    fn div(self, rhs: f64) -> Px { Px(self.0 / rhs) }
}
impl Neg for Px {
    type Output = Px;
    fn neg(self) -> Px { Px(-self.0) }
}
impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Px) {
        self.0 += rhs.0;
    }
}
impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Px) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Angle in degrees, clockwise in SVG space (y-down)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generic 2D point
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self { Point { x, y } }
}

impl Point<Px> {
    pub const ORIGIN: Point<Px> = Point { x: Px::ZERO, y: Px::ZERO };

    /// Shorthand for a point in pixel space
    pub fn px(x: f64, y: f64) -> Self {
        Point { x: Px(x), y: Px(y) }
    }

    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x.0, self.y.0)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Point::px(v.x, v.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl Size<Px> {
    pub const ZERO: Size<Px> = Size { w: Px::ZERO, h: Px::ZERO };

    pub fn px(w: f64, h: f64) -> Self {
        Size { w: Px(w), h: Px(h) }
    }

    /// Offset from a box's top-left corner to its centre
    pub fn half(self) -> Offset<Px> {
        Offset { dx: self.w / 2.0, dy: self.h / 2.0 }
    }
}

/// A displacement/offset vector (not an absolute position)
/// Use this for translations; Point + Offset = Point
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset<T> {
    pub dx: T,
    pub dy: T,
}

impl<T> Offset<T> {
    pub fn new(dx: T, dy: T) -> Self {
        Offset { dx, dy }
    }
}

impl Offset<Px> {
    pub const ZERO: Offset<Px> = Offset { dx: Px::ZERO, dy: Px::ZERO };

    pub fn px(dx: f64, dy: f64) -> Self {
        Offset { dx: Px(dx), dy: Px(dy) }
    }

    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.dx.0, self.dy.0)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Offset::px(v.x, v.y)
    }
}

/// Add an offset to a point to get a new point
impl Add<Offset<Px>> for Point<Px> {
    type Output = Point<Px>;
    fn add(self, rhs: Offset<Px>) -> Point<Px> {
        Point { x: self.x + rhs.dx, y: self.y + rhs.dy }
    }
}

/// Subtract an offset from a point to get a new point
impl Sub<Offset<Px>> for Point<Px> {
    type Output = Point<Px>;
    fn sub(self, rhs: Offset<Px>) -> Point<Px> {
        Point { x: self.x - rhs.dx, y: self.y - rhs.dy }
    }
}

/// Subtract two points to get an offset
impl Sub<Point<Px>> for Point<Px> {
    type Output = Offset<Px>;
    fn sub(self, rhs: Point<Px>) -> Offset<Px> {
        Offset { dx: self.x - rhs.x, dy: self.y - rhs.y }
    }
}

impl Add for Offset<Px> {
    type Output = Offset<Px>;
    fn add(self, rhs: Offset<Px>) -> Offset<Px> {
        Offset { dx: self.dx + rhs.dx, dy: self.dy + rhs.dy }
    }
}

/// Convenient aliases
pub type PtPx = Point<Px>;
pub type OffsetPx = Offset<Px>;
pub type SizePx = Size<Px>;
