//! Hook deciding when dash and static arrows use the override tables.
//!
//! Which location/letter/turns combinations need an override is not settled
//! notation, so the engine ships no rules: [`NoOverrides`] never fires and an
//! [`OverrideSet`] starts empty. Hosts that know their exceptions add rules.

use serde::{Deserialize, Serialize};

use crate::model::Motion;
use crate::notation::{Location, MotionType, Turns};

pub trait RotationOverridePolicy {
    fn has_rotation_override(&self, motion: &Motion, arrow_loc: Location) -> bool;
}

/// Never overrides
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl RotationOverridePolicy for NoOverrides {
    fn has_rotation_override(&self, _motion: &Motion, _arrow_loc: Location) -> bool {
        false
    }
}

/// A single override condition; `None` fields match anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub motion_type: MotionType,
    #[serde(default)]
    pub loc: Option<Location>,
    #[serde(default)]
    pub turns: Option<Turns>,
}

impl OverrideRule {
    pub fn new(motion_type: MotionType) -> Self {
        Self { motion_type, loc: None, turns: None }
    }

    pub fn at(self, loc: Location) -> Self {
        Self { loc: Some(loc), ..self }
    }

    pub fn with_turns(self, turns: Turns) -> Self {
        Self { turns: Some(turns), ..self }
    }

    fn matches(&self, motion: &Motion, arrow_loc: Location) -> bool {
        self.motion_type == motion.motion_type
            && self.loc.is_none_or(|loc| loc == arrow_loc)
            && self.turns.is_none_or(|turns| turns == motion.turns)
    }
}

/// Configurable rule list, empty by default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideSet {
    rules: Vec<OverrideRule>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: OverrideRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }
}

impl RotationOverridePolicy for OverrideSet {
    fn has_rotation_override(&self, motion: &Motion, arrow_loc: Location) -> bool {
        self.rules.iter().any(|rule| rule.matches(motion, arrow_loc))
    }
}
