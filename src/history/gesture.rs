use serde::{Deserialize, Serialize};

/// Identifier of one continuous gesture within a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Active(SessionId),
}

/// Issues session ids for a repeating gesture (press, drag, release) from the
/// bounded range `[base, base + span)`. Each press starts a new session so two
/// separate drags never merge; after the last id the range wraps to `base`.
/// The span is at least 2 so consecutive presses always differ.
#[derive(Debug, Clone)]
pub struct GestureFamily {
    base: u32,
    span: u32,
    offset: u32,
    state: GestureState,
}

impl GestureFamily {
    pub const MIN_SPAN: u32 = 2;

    pub fn new(base: u32, span: u32) -> Self {
        let span = span.clamp(Self::MIN_SPAN, u32::MAX - base.min(u32::MAX - Self::MIN_SPAN));
        Self {
            base,
            span,
            offset: 0,
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn session(&self) -> Option<SessionId> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Active(session) => Some(session),
        }
    }

    /// Starts a fresh session, replacing any session still open.
    pub fn begin(&mut self) -> SessionId {
        let session = SessionId(self.base.saturating_add(self.offset));
        self.offset = (self.offset + 1) % self.span;
        self.state = GestureState::Active(session);
        session
    }

    pub fn end(&mut self) {
        self.state = GestureState::Idle;
    }
}
