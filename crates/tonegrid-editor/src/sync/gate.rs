//! Re-entrancy gate for editor/store synchronization.

/// Direction of a synchronization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncDirection {
    /// Editor text is pushed into the store.
    FromEditor,
    /// Store pairs are written back into the editor.
    ToEditor,
    /// A host holds the gate around batched work.
    Suspended,
}

/// Proof that the gate was entered. Must be handed back to [`SyncGate::leave`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a sync token must be returned to the gate"]
pub struct SyncToken {
    direction: SyncDirection,
}

impl SyncToken {
    pub fn direction(&self) -> SyncDirection {
        self.direction
    }
}

/// Gate state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Idle,
    Busy(SyncDirection),
}

/// Admits one synchronization pass at a time.
///
/// Entering while busy is rejected rather than queued; callers retry once
/// the current pass has left.
#[derive(Debug, Default)]
pub struct SyncGate {
    state: GateState,
}

impl SyncGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, GateState::Busy(_))
    }

    /// Enters the gate, or returns `None` if a pass is already running.
    pub fn try_enter(&mut self, direction: SyncDirection) -> Option<SyncToken> {
        match self.state {
            GateState::Idle => {
                self.state = GateState::Busy(direction);
                Some(SyncToken { direction })
            }
            GateState::Busy(current) => {
                tracing::debug!(?direction, ?current, "sync rejected: gate busy");
                None
            }
        }
    }

    /// Leaves the gate.
    pub fn leave(&mut self, token: SyncToken) {
        debug_assert_eq!(self.state, GateState::Busy(token.direction));
        self.state = GateState::Idle;
    }
}
