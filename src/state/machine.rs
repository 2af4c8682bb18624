use super::error::{StateError, StateResult};
use super::{event::StateTransition, LifecycleEvent, WindowState};

const MAX_TRANSITION_HISTORY: usize = 32;

#[derive(Debug)]
pub struct StateMachine {
    state: WindowState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: WindowState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn next_state(&self, event: LifecycleEvent) -> Option<WindowState> {
        use LifecycleEvent::*;
        match (self.state, event) {
            (WindowState::Terminated, _) => None,
            (WindowState::Starting, Hide) => None,
            (_, Show) => Some(WindowState::Visible),
            (_, Hide) => Some(WindowState::Hidden),
            (_, Terminate) => Some(WindowState::Terminated),
        }
    }

    pub fn transition(&mut self, event: LifecycleEvent) -> StateResult<WindowState> {
        tracing::debug!(from = ?self.state, event = ?event, "request lifecycle transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid lifecycle transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(Some(self.state), event, next);
        self.state = next;
        if self.transition_history.len() == MAX_TRANSITION_HISTORY {
            self.transition_history.remove(0);
        }
        self.transition_history.push(record);

        Ok(self.state)
    }
}

#[cfg(test)]
impl StateMachine {
    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }

    fn is_terminated(&self) -> bool {
        self.state == WindowState::Terminated
    }

    fn can_transition(&self, event: LifecycleEvent) -> bool {
        self.next_state(event).is_some()
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WindowState::{:?}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_transition_tracks_valid_and_invalid_events() {
        let mut machine = StateMachine::new();
        assert!(machine.can_transition(LifecycleEvent::Show));
        assert!(machine.can_transition(LifecycleEvent::Terminate));
        assert!(!machine.can_transition(LifecycleEvent::Hide));

        let _ = machine
            .transition(LifecycleEvent::Show)
            .expect("starting -> visible should transition");

        assert!(machine.can_transition(LifecycleEvent::Hide));
        assert!(machine.can_transition(LifecycleEvent::Show));
        assert!(machine.can_transition(LifecycleEvent::Terminate));
    }

    #[test]
    fn close_then_restore_records_ordered_history() {
        let mut machine = StateMachine::new();
        machine.transition(LifecycleEvent::Show).expect("show");
        machine.transition(LifecycleEvent::Hide).expect("hide");
        machine.transition(LifecycleEvent::Hide).expect("hide twice");
        machine.transition(LifecycleEvent::Show).expect("restore");

        assert_eq!(machine.state(), WindowState::Visible);
        assert_eq!(
            machine.history(),
            &[
                StateTransition::new(
                    Some(WindowState::Starting),
                    LifecycleEvent::Show,
                    WindowState::Visible
                ),
                StateTransition::new(
                    Some(WindowState::Visible),
                    LifecycleEvent::Hide,
                    WindowState::Hidden
                ),
                StateTransition::new(
                    Some(WindowState::Hidden),
                    LifecycleEvent::Hide,
                    WindowState::Hidden
                ),
                StateTransition::new(
                    Some(WindowState::Hidden),
                    LifecycleEvent::Show,
                    WindowState::Visible
                ),
            ]
        );
    }

    #[test]
    fn terminate_is_reachable_from_hidden_window() {
        let mut machine = StateMachine::new();
        machine.transition(LifecycleEvent::Show).expect("show");
        machine.transition(LifecycleEvent::Hide).expect("hide");

        assert_eq!(
            machine.transition(LifecycleEvent::Terminate).expect("quit"),
            WindowState::Terminated
        );
        assert!(machine.is_terminated());
    }

    #[test]
    fn events_after_terminate_fail_without_mutating_history() {
        let mut machine = StateMachine::new();
        machine.transition(LifecycleEvent::Terminate).expect("quit");

        for event in [
            LifecycleEvent::Show,
            LifecycleEvent::Hide,
            LifecycleEvent::Terminate,
        ] {
            let err = machine
                .transition(event)
                .expect_err("terminated machine must reject events");
            assert!(matches!(
                err,
                StateError::InvalidStateTransition {
                    from: WindowState::Terminated,
                    ..
                }
            ));
        }
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn history_keeps_only_the_most_recent_transitions() {
        let mut machine = StateMachine::new();
        machine.transition(LifecycleEvent::Show).expect("show");
        for _ in 0..MAX_TRANSITION_HISTORY {
            machine.transition(LifecycleEvent::Hide).expect("hide");
            machine.transition(LifecycleEvent::Show).expect("show");
        }

        let history = machine.history();
        assert_eq!(history.len(), MAX_TRANSITION_HISTORY);
        assert_eq!(
            history.last(),
            Some(&StateTransition::new(
                Some(WindowState::Hidden),
                LifecycleEvent::Show,
                WindowState::Visible
            ))
        );
    }
}
