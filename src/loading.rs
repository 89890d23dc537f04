//! Loading lifecycle of a pictograph's assets
//!
//! ```text
//! idle -> initializing -> grid_loading -> props_loading -> arrows_loading -> complete
//!   any ---------------------------------------------------------------> error
//! ```
//!
//! `complete` is reached only by marking the last required component while
//! one of the `*_loading` phases is active. `error` is left only through
//! [`PictographLoader::reset`]. Requests that do not fit the current state
//! are ignored.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::log;

/// Number of transitions kept in [`PictographLoader::history`]
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Initializing,
    GridLoading,
    PropsLoading,
    ArrowsLoading,
    Complete,
    Error,
}

impl LoadingState {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadingState::Idle => "idle",
            LoadingState::Initializing => "initializing",
            LoadingState::GridLoading => "grid_loading",
            LoadingState::PropsLoading => "props_loading",
            LoadingState::ArrowsLoading => "arrows_loading",
            LoadingState::Complete => "complete",
            LoadingState::Error => "error",
        }
    }

    pub fn is_loading(self) -> bool {
        matches!(
            self,
            LoadingState::GridLoading | LoadingState::PropsLoading | LoadingState::ArrowsLoading
        )
    }

    /// The phase that follows this one in the normal loading order
    fn next_phase(self) -> Option<LoadingState> {
        match self {
            LoadingState::Idle => Some(LoadingState::Initializing),
            LoadingState::Initializing => Some(LoadingState::GridLoading),
            LoadingState::GridLoading => Some(LoadingState::PropsLoading),
            LoadingState::PropsLoading => Some(LoadingState::ArrowsLoading),
            LoadingState::ArrowsLoading | LoadingState::Complete | LoadingState::Error => None,
        }
    }
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Assets a pictograph needs before it can be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoadComponent {
    Grid,
    RedProp,
    BlueProp,
    RedArrow,
    BlueArrow,
}

impl LoadComponent {
    pub const REQUIRED: [LoadComponent; 5] = [
        LoadComponent::Grid,
        LoadComponent::RedProp,
        LoadComponent::BlueProp,
        LoadComponent::RedArrow,
        LoadComponent::BlueArrow,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: LoadingState,
    pub to: LoadingState,
    /// Monotonic counter across the loader's lifetime
    pub seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PictographLoader {
    state: LoadingState,
    loaded: BTreeSet<LoadComponent>,
    history: VecDeque<Transition>,
    seq: u64,
    error: Option<String>,
}

impl PictographLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == LoadingState::Complete
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loaded(&self, component: LoadComponent) -> bool {
        self.loaded.contains(&component)
    }

    /// Required components not yet marked, in declaration order
    pub fn missing(&self) -> Vec<LoadComponent> {
        LoadComponent::REQUIRED
            .into_iter()
            .filter(|component| !self.loaded.contains(component))
            .collect()
    }

    /// Most recent transitions, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Transition> {
        self.history.iter()
    }

    /// Move to the next phase (idle -> initializing -> ... -> arrows_loading).
    ///
    /// Returns false, changing nothing, from `arrows_loading`, `complete`
    /// and `error`.
    pub fn advance(&mut self) -> bool {
        match self.state.next_phase() {
            Some(next) => {
                self.transition(next);
                true
            }
            None => {
                log::debug!(state = %self.state, "no phase to advance to");
                false
            }
        }
    }

    /// Record `component` as loaded. Marking the last required component
    /// during a loading phase completes the load.
    ///
    /// Marks outside a loading phase and repeated marks are ignored.
    pub fn mark_loaded(&mut self, component: LoadComponent) -> bool {
        if !self.state.is_loading() {
            log::debug!(
                state = %self.state,
                component = ?component,
                "mark ignored outside loading"
            );
            return false;
        }
        if !self.loaded.insert(component) {
            return false;
        }
        if self.missing().is_empty() {
            self.transition(LoadingState::Complete);
        }
        true
    }

    /// Enter `error` from any other state
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.state == LoadingState::Error {
            return false;
        }
        let message = message.into();
        log::warn!(state = %self.state, error = %message, "pictograph loading failed");
        self.error = Some(message);
        self.transition(LoadingState::Error);
        true
    }

    /// Back to `idle` with nothing loaded. History is kept.
    pub fn reset(&mut self) {
        if self.state == LoadingState::Idle {
            return;
        }
        self.loaded.clear();
        self.error = None;
        self.transition(LoadingState::Idle);
    }

    fn transition(&mut self, to: LoadingState) {
        let from = self.state;
        self.seq += 1;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(Transition { from, to, seq: self.seq });
        self.state = to;
        log::debug!(from = %from, to = %to, seq = self.seq, "loading transition");
    }
}
