//! Grid coordinate store
//!
//! Named grid points are shipped as strings (`"(475.0, 331.9)"`) grouped by
//! grid mode, point kind and strictness. They are parsed once at bootstrap
//! into [`GridTables`], which the host threads into the placement manager and
//! never mutates afterwards.

mod parse;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GridError;
use crate::log;
use crate::notation::{GridMode, Location};
use crate::types::PtPx;

pub use parse::parse_coord_tuple;

const BUILTIN_COORDS: &str = include_str!("../../data/circle_coords.json");

// ============================================================================
// Raw (string-encoded) tables
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPointSet {
    #[serde(default)]
    pub normal: BTreeMap<String, String>,
    #[serde(default)]
    pub strict: BTreeMap<String, String>,
}

/// One grid mode as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGridTable {
    #[serde(default)]
    pub hand_points: RawPointSet,
    #[serde(default)]
    pub layer2_points: RawPointSet,
    #[serde(default)]
    pub outer_points: BTreeMap<String, String>,
    #[serde(default)]
    pub center_point: Option<String>,
}

// ============================================================================
// Parsed tables
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointKind {
    Hand,
    Layer2,
    Outer,
}

impl PointKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PointKind::Hand => "hand",
            PointKind::Layer2 => "layer2",
            PointKind::Outer => "outer",
        }
    }
}

impl fmt::Display for PointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Table key for a named point: `<loc>_<gridMode>_<pointKind>_point[_strict]`
pub fn point_name(loc: Location, grid_mode: GridMode, kind: PointKind, strict: bool) -> String {
    let suffix = if strict { "_strict" } else { "" };
    format!("{loc}_{grid_mode}_{kind}_point{suffix}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    pub name: String,
    pub coordinates: PtPx,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    pub normal: HashMap<String, PtPx>,
    pub strict: HashMap<String, PtPx>,
}

impl PointSet {
    fn parse(raw: &RawPointSet) -> Self {
        Self {
            normal: parse_points(&raw.normal),
            strict: parse_points(&raw.strict),
        }
    }

    fn table(&self, strict: bool) -> &HashMap<String, PtPx> {
        if strict { &self.strict } else { &self.normal }
    }
}

fn parse_points(raw: &BTreeMap<String, String>) -> HashMap<String, PtPx> {
    raw.iter()
        .map(|(name, value)| (name.clone(), parse::parse_entry(name, value)))
        .collect()
}

/// Every named point of one grid mode
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoints {
    grid_mode: GridMode,
    pub hand_points: PointSet,
    pub layer2_points: PointSet,
    pub outer_points: HashMap<String, PtPx>,
    pub center_point: PtPx,
}

impl GridPoints {
    pub fn grid_mode(&self) -> GridMode {
        self.grid_mode
    }

    /// Look up a point by its full table key
    pub fn get(&self, kind: PointKind, name: &str, strict: bool) -> Option<PtPx> {
        let table = match kind {
            PointKind::Hand => self.hand_points.table(strict),
            PointKind::Layer2 => self.layer2_points.table(strict),
            // outer points have no strict variant
            PointKind::Outer => &self.outer_points,
        };
        table.get(name).copied()
    }

    /// Look up the `kind` point at `loc` for this grid's mode
    pub fn point(&self, loc: Location, kind: PointKind, strict: bool) -> Option<GridPoint> {
        let strict = strict && kind != PointKind::Outer;
        let name = point_name(loc, self.grid_mode, kind, strict);
        self.get(kind, &name, strict)
            .map(|coordinates| GridPoint { name, coordinates })
    }

    pub fn center(&self) -> PtPx {
        self.center_point
    }
}

/// Parse every coordinate string of one grid mode.
///
/// Malformed entries become `(0, 0)` with a warning; the rest of the table is
/// unaffected. A missing center point also reads as `(0, 0)` here; bootstrap
/// through [`GridTables`] rejects it instead.
pub fn parse_circle_coords(raw: &RawGridTable, grid_mode: GridMode) -> GridPoints {
    let center_point = match &raw.center_point {
        Some(value) => parse::parse_entry("center_point", value),
        None => {
            log::warn!(grid_mode = %grid_mode, "grid table has no center_point");
            PtPx::ORIGIN
        }
    };

    GridPoints {
        grid_mode,
        hand_points: PointSet::parse(&raw.hand_points),
        layer2_points: PointSet::parse(&raw.layer2_points),
        outer_points: parse_points(&raw.outer_points),
        center_point,
    }
}

/// Parsed grid points for both modes
#[derive(Debug, Clone, PartialEq)]
pub struct GridTables {
    diamond: GridPoints,
    box_grid: GridPoints,
}

impl GridTables {
    /// The coordinate table bundled with the crate
    pub fn builtin() -> Result<Self, GridError> {
        Self::from_json(BUILTIN_COORDS)
    }

    /// Parse a `{ "diamond": {...}, "box": {...} }` table
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        let raw: BTreeMap<String, RawGridTable> =
            serde_json::from_str(json).map_err(|source| GridError::InvalidJson { source })?;
        Self::from_raw(&raw)
    }

    pub fn from_raw(raw: &BTreeMap<String, RawGridTable>) -> Result<Self, GridError> {
        let load = |mode: GridMode| -> Result<GridPoints, GridError> {
            let table = raw.get(mode.as_str()).ok_or_else(|| GridError::MissingGridMode {
                mode: mode.to_string(),
            })?;
            if table.center_point.is_none() {
                return Err(GridError::MissingCenterPoint { mode: mode.to_string() });
            }
            Ok(parse_circle_coords(table, mode))
        };

        let tables = Self {
            diamond: load(GridMode::Diamond)?,
            box_grid: load(GridMode::Box)?,
        };
        log::info!(
            diamond_points = tables.diamond.hand_points.normal.len()
                + tables.diamond.layer2_points.normal.len(),
            box_points = tables.box_grid.hand_points.normal.len()
                + tables.box_grid.layer2_points.normal.len(),
            "grid tables loaded"
        );
        Ok(tables)
    }

    pub fn for_mode(&self, grid_mode: GridMode) -> &GridPoints {
        match grid_mode {
            GridMode::Diamond => &self.diamond,
            GridMode::Box => &self.box_grid,
        }
    }
}
