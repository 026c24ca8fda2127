use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Timed reveal of a solution path. The engine itself is clock-free: the
/// owner arms a timer per loaded path and forwards its ticks here, tagged
/// with the [`PathId`] the timer was armed for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay<S> {
    steps: Vec<S>,
    path_id: PathId,
    revealed: StepIndex,
    current: Option<StepIndex>,
    running: bool,
}

impl<S> Replay<S> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            path_id: PathId::initial(),
            revealed: 0,
            current: None,
            running: false,
        }
    }

    /// Replaces the path wholesale. Callbacks tagged for the previous path
    /// become stale. An empty path is fine and loads already stopped.
    pub fn load(&mut self, steps: Vec<S>) -> PathId {
        self.path_id = self.path_id.next();
        self.running = !steps.is_empty();
        self.steps = steps;
        self.revealed = 0;
        self.current = None;
        self.path_id
    }

    pub fn state(&self) -> ReplayState {
        ReplayState {
            revealed: self.revealed,
            current: self.current,
            running: self.running,
        }
    }

    pub fn path_id(&self) -> PathId {
        self.path_id
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn revealed_steps(&self) -> &[S] {
        &self.steps[..self.revealed]
    }

    pub fn current_step(&self) -> Option<&S> {
        self.current.map(|index| &self.steps[index])
    }

    pub fn tick(&mut self, id: PathId) -> TickOutcome {
        if self.is_replaced(id) {
            return TickOutcome::Stale;
        }
        if !self.running {
            return TickOutcome::NoChange;
        }

        let next = self.current.map_or(0, |current| current + 1);
        if next >= self.steps.len() {
            // running implies an unrevealed step, but stop rather than trust it
            self.running = false;
            return TickOutcome::NoChange;
        }

        self.current = Some(next);
        self.revealed = next + 1;

        if self.revealed == self.steps.len() {
            self.running = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Revealed
        }
    }

    pub fn go_to(&mut self, id: PathId, index: StepIndex) -> Result<ScrubOutcome> {
        if self.is_replaced(id) {
            return Ok(ScrubOutcome::Stale);
        }
        if index >= self.steps.len() {
            return Err(ReplayError::OutOfRange);
        }
        Ok(self.move_to(index))
    }

    pub fn step_forward(&mut self, id: PathId) -> ScrubOutcome {
        if self.is_replaced(id) {
            return ScrubOutcome::Stale;
        }

        let next = self.current.map_or(0, |current| current + 1);
        if next >= self.steps.len() {
            return ScrubOutcome::NoChange;
        }
        self.move_to(next)
    }

    pub fn step_backward(&mut self, id: PathId) -> ScrubOutcome {
        if self.is_replaced(id) {
            return ScrubOutcome::Stale;
        }

        match self.current {
            Some(current) if current > 0 => self.move_to(current - 1),
            _ => ScrubOutcome::NoChange,
        }
    }

    pub fn rewind(&mut self, id: PathId) -> ScrubOutcome {
        if self.is_replaced(id) {
            return ScrubOutcome::Stale;
        }

        if self.steps.is_empty() {
            ScrubOutcome::NoChange
        } else {
            self.move_to(0)
        }
    }

    fn is_replaced(&self, id: PathId) -> bool {
        if id != self.path_id {
            log::trace!("ignoring callback for replaced path {:?}", id);
            return true;
        }
        false
    }

    fn move_to(&mut self, index: StepIndex) -> ScrubOutcome {
        let target = ReplayState::at(index);
        if self.state() == target {
            return ScrubOutcome::NoChange;
        }

        self.revealed = target.revealed;
        self.current = target.current;
        self.running = false;
        ScrubOutcome::Moved
    }
}

impl<S> Default for Replay<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn loaded(steps: &[u32]) -> (Replay<u32>, PathId) {
        let mut replay = Replay::new();
        let id = replay.load(steps.to_vec());
        (replay, id)
    }

    #[test]
    fn load_starts_running_with_nothing_revealed() {
        let (replay, _id) = loaded(&[10, 20, 30]);

        assert_eq!(
            replay.state(),
            ReplayState {
                revealed: 0,
                current: None,
                running: true
            }
        );
        assert!(replay.revealed_steps().is_empty());
        assert_eq!(replay.current_step(), None);
    }

    #[test]
    fn ticks_reveal_steps_in_order_until_finished() {
        let (mut replay, id) = loaded(&[10, 20, 30]);

        assert_eq!(replay.tick(id), TickOutcome::Revealed);
        assert_eq!(replay.revealed_steps(), [10]);
        assert_eq!(replay.tick(id), TickOutcome::Revealed);
        assert_eq!(replay.revealed_steps(), [10, 20]);
        assert_eq!(replay.tick(id), TickOutcome::Finished);
        assert_eq!(replay.revealed_steps(), [10, 20, 30]);
        assert_eq!(replay.state(), ReplayState::at(2));
    }

    #[test]
    fn ticking_past_the_end_changes_nothing() {
        let (mut replay, id) = loaded(&[1, 2]);

        replay.tick(id);
        replay.tick(id);

        assert_eq!(replay.tick(id), TickOutcome::NoChange);
        assert_eq!(replay.state(), ReplayState::at(1));
    }

    #[test]
    fn empty_path_loads_idle() {
        let (mut replay, id) = loaded(&[]);

        assert!(replay.is_empty());
        assert_eq!(replay.state(), ReplayState::idle());
        assert_eq!(replay.tick(id), TickOutcome::NoChange);
        assert_eq!(replay.state(), ReplayState::idle());
    }

    #[test]
    fn go_to_is_idempotent() {
        let (mut replay, id) = loaded(&[1, 2, 3]);

        assert_eq!(replay.go_to(id, 1), Ok(ScrubOutcome::Moved));
        assert_eq!(replay.state(), ReplayState::at(1));
        assert_eq!(replay.go_to(id, 1), Ok(ScrubOutcome::NoChange));
        assert_eq!(replay.state(), ReplayState::at(1));
    }

    #[test]
    fn go_to_past_the_end_leaves_state_untouched() {
        let (mut replay, id) = loaded(&[1, 2, 3]);
        replay.tick(id);
        let before = replay.state();

        assert_eq!(replay.go_to(id, 3), Err(ReplayError::OutOfRange));
        assert_eq!(replay.go_to(id, 99), Err(ReplayError::OutOfRange));
        assert_eq!(replay.state(), before);
        assert!(replay.is_running());
    }

    #[test]
    fn callbacks_for_a_replaced_path_are_ignored() {
        let mut replay = Replay::new();
        let first = replay.load(vec![1, 2, 3]);
        let second = replay.load(vec![7, 8]);
        assert_ne!(first, second);

        assert_eq!(replay.tick(first), TickOutcome::Stale);
        assert_eq!(replay.go_to(first, 0), Ok(ScrubOutcome::Stale));
        assert_eq!(replay.step_forward(first), ScrubOutcome::Stale);
        assert_eq!(
            replay.state(),
            ReplayState {
                revealed: 0,
                current: None,
                running: true
            }
        );

        assert_eq!(replay.tick(second), TickOutcome::Revealed);
        assert_eq!(replay.revealed_steps(), [7]);
    }

    #[test]
    fn steps_stop_at_both_ends() {
        let (mut replay, id) = loaded(&[1, 2]);

        assert_eq!(replay.step_backward(id), ScrubOutcome::NoChange);
        assert_eq!(replay.step_forward(id), ScrubOutcome::Moved);
        assert_eq!(replay.state(), ReplayState::at(0));
        assert_eq!(replay.step_backward(id), ScrubOutcome::NoChange);
        assert_eq!(replay.step_forward(id), ScrubOutcome::Moved);
        assert_eq!(replay.step_forward(id), ScrubOutcome::NoChange);
        assert_eq!(replay.state(), ReplayState::at(1));
    }

    #[test]
    fn rewind_returns_to_the_first_step() {
        let (mut replay, id) = loaded(&[5, 6, 7]);
        replay.tick(id);
        replay.tick(id);

        assert_eq!(replay.rewind(id), ScrubOutcome::Moved);
        assert_eq!(replay.state(), ReplayState::at(0));
        assert_eq!(replay.revealed_steps(), [5]);
    }

    #[test]
    fn rewind_on_empty_path_is_a_no_op() {
        let (mut replay, id) = loaded(&[]);

        assert_eq!(replay.rewind(id), ScrubOutcome::NoChange);
        assert_eq!(replay.state(), ReplayState::idle());
    }

    #[test]
    fn scrubbing_while_running_stops_the_run() {
        let (mut replay, id) = loaded(&[1, 2, 3]);
        replay.tick(id);
        assert!(replay.is_running());

        assert_eq!(replay.go_to(id, 2), Ok(ScrubOutcome::Moved));
        assert!(!replay.is_running());
        assert_eq!(replay.state(), ReplayState::at(2));
    }

    #[test]
    fn current_step_follows_the_cursor() {
        let (mut replay, id) = loaded(&[10, 20]);

        assert_eq!(replay.current_step(), None);
        replay.tick(id);
        assert_eq!(replay.current_step(), Some(&10));
        replay.tick(id);
        assert_eq!(replay.current_step(), Some(&20));
    }

    #[test]
    fn full_replay_then_scrub_walkthrough() {
        let (mut replay, id) = loaded(&[10, 20, 30]);
        assert_eq!(
            replay.state(),
            ReplayState {
                revealed: 0,
                current: None,
                running: true
            }
        );

        assert_eq!(replay.tick(id), TickOutcome::Revealed);
        assert_eq!(
            replay.state(),
            ReplayState {
                revealed: 1,
                current: Some(0),
                running: true
            }
        );
        assert_eq!(replay.tick(id), TickOutcome::Revealed);
        assert_eq!(
            replay.state(),
            ReplayState {
                revealed: 2,
                current: Some(1),
                running: true
            }
        );
        assert_eq!(replay.tick(id), TickOutcome::Finished);
        assert_eq!(replay.state(), ReplayState::at(2));

        assert_eq!(replay.step_backward(id), ScrubOutcome::Moved);
        assert_eq!(replay.state(), ReplayState::at(1));
        assert_eq!(replay.go_to(id, 2), Ok(ScrubOutcome::Moved));
        assert_eq!(replay.state(), ReplayState::at(2));
        assert_eq!(replay.rewind(id), ScrubOutcome::Moved);
        assert_eq!(replay.state(), ReplayState::at(0));
    }
}
