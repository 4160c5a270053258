//! SKK conversion state machine.
//!
//! `StateMachine` owns the current `IMEState`, processes one `Action` at a
//! time and publishes what the host should display on two streams: text
//! and mode changes, and the candidate list.

pub mod types;

mod composing;
mod events;
mod normal;
mod response;
mod selecting;

#[cfg(test)]
mod tests;

use std::sync::{mpsc, Arc};

use tracing::{debug, debug_span};

use skk_core::dict::Dictionary;
use skk_core::settings::settings;
use skk_core::InputMode;

pub use types::{
    Action, Candidates, ComposingState, CursorRect, IMEState, InputMethodEvent,
    InputMethodState, KeyEvent, MarkedText, MarkedTextElement, Page, RegisterState,
    SelectingState, SessionConfig, SpecialState, UnregisterState,
};

use events::EventStream;

pub struct StateMachine {
    state: IMEState,
    dictionary: Arc<dyn Dictionary>,
    config: SessionConfig,
    input_method_events: EventStream<InputMethodEvent>,
    candidate_events: EventStream<Option<Candidates>>,
}

impl StateMachine {
    /// State machine with paging taken from the global settings.
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Self {
        Self::with_config(dictionary, SessionConfig::from_settings(settings()))
    }

    pub fn with_config(dictionary: Arc<dyn Dictionary>, config: SessionConfig) -> Self {
        Self {
            state: IMEState::default(),
            dictionary,
            config,
            input_method_events: EventStream::new(),
            candidate_events: EventStream::deduplicated(),
        }
    }

    pub fn state(&self) -> &IMEState {
        &self.state
    }

    pub fn input_mode(&self) -> InputMode {
        self.state.input_mode
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Set the mode without emitting an event (host restoring its own state).
    ///
    /// Ignored while composing or selecting; the host should
    /// `commit_composition` first.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        if !matches!(self.state.input_method, InputMethodState::Normal) {
            debug!(?mode, "set_input_mode ignored mid-conversion");
            return;
        }
        self.state.input_mode = mode;
    }

    pub fn subscribe_input_method_events(&mut self) -> mpsc::Receiver<InputMethodEvent> {
        self.input_method_events.subscribe()
    }

    /// Candidate list updates. `None` hides the list; repeats are suppressed.
    pub fn subscribe_candidate_events(&mut self) -> mpsc::Receiver<Option<Candidates>> {
        self.candidate_events.subscribe()
    }

    /// Process one action. Returns whether it was consumed.
    pub fn handle(&mut self, action: &Action) -> bool {
        let _span = debug_span!(
            "handle",
            event = ?action.event,
            shift = action.shift,
            mode = ?self.state.input_mode
        )
        .entered();

        match self.state.input_method.clone() {
            InputMethodState::Normal => self.handle_normal(action),
            InputMethodState::Composing(composing) => self.handle_composing(action, composing),
            InputMethodState::Selecting(selecting) => self.handle_selecting(action, selecting),
        }
    }

    /// Whether keys the machine did not consume should still be swallowed
    /// instead of reaching the application: true while converting or
    /// registering.
    pub fn handles_unhandled_keys(&self) -> bool {
        self.state.special_state.is_some()
            || !matches!(self.state.input_method, InputMethodState::Normal)
    }
}
