use gloo::timers::callback::Interval;
use yew::prelude::*;

use searchlab_core::{PathId, Replay, ReplayError, ScrubOutcome, StepIndex};

use crate::utils::format_step_counter;

/// Replay engine plus the single browser timer driving it. Dropping the
/// `Interval` handle cancels the timer, so "cancel before replace" is just
/// assignment order: the old ticker is dropped before the next path is armed.
pub(crate) struct Player<S> {
    replay: Replay<S>,
    ticker: Option<Interval>,
}

impl<S> Player<S> {
    pub fn new() -> Self {
        Self {
            replay: Replay::new(),
            ticker: None,
        }
    }

    pub fn replay(&self) -> &Replay<S> {
        &self.replay
    }

    /// Loads a fresh path and arms one interval emitting its [`PathId`] every
    /// `cadence_ms`. An empty path loads idle with no timer.
    pub fn load(&mut self, steps: Vec<S>, cadence_ms: u32, on_tick: Callback<PathId>) -> PathId {
        self.ticker = None;
        let id = self.replay.load(steps);
        if self.replay.is_running() {
            self.ticker = Some(Interval::new(cadence_ms, move || on_tick.emit(id)));
        }
        id
    }

    /// Drops the path and the timer; the player goes back to showing nothing.
    pub fn clear(&mut self) {
        self.ticker = None;
        self.replay.load(Vec::new());
    }

    pub fn tick(&mut self, id: PathId) -> bool {
        let outcome = self.replay.tick(id);
        if outcome.is_finished() {
            self.ticker = None;
        }
        outcome.has_update()
    }

    pub fn go_to(&mut self, id: PathId, index: StepIndex) -> bool {
        match self.replay.go_to(id, index) {
            Ok(outcome) => self.after_scrub(outcome),
            Err(ReplayError::OutOfRange) => {
                log::debug!("dropping out-of-range seek to {}", index);
                false
            }
        }
    }

    pub fn step_forward(&mut self, id: PathId) -> bool {
        let outcome = self.replay.step_forward(id);
        self.after_scrub(outcome)
    }

    pub fn step_backward(&mut self, id: PathId) -> bool {
        let outcome = self.replay.step_backward(id);
        self.after_scrub(outcome)
    }

    pub fn rewind(&mut self, id: PathId) -> bool {
        let outcome = self.replay.rewind(id);
        self.after_scrub(outcome)
    }

    // A scrub that applied stops the automatic run; a stale or boundary
    // scrub must not kill a live ticker.
    fn after_scrub(&mut self, outcome: ScrubOutcome) -> bool {
        if outcome.has_update() {
            self.ticker = None;
        }
        outcome.has_update()
    }
}

impl<S> Default for Player<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ReplayControlsProps {
    pub current: StepIndex,
    pub total: usize,
    pub on_seek: Callback<StepIndex>,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
    pub on_rewind: Callback<()>,
}

/// Scrubber shown once at least one step is revealed. The page owns the
/// [`PathId`]; the callbacks it passes here are already tagged with it.
#[function_component]
pub(crate) fn ReplayControls(props: &ReplayControlsProps) -> Html {
    let ReplayControlsProps {
        current,
        total,
        on_seek,
        on_prev,
        on_next,
        on_rewind,
    } = props;

    let at_first = *current == 0;
    let at_last = *current + 1 == *total;

    let cb_rewind = {
        let on_rewind = on_rewind.clone();
        Callback::from(move |_: MouseEvent| on_rewind.emit(()))
    };
    let cb_prev = {
        let on_prev = on_prev.clone();
        Callback::from(move |_: MouseEvent| on_prev.emit(()))
    };
    let cb_next = {
        let on_next = on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };
    let oninput = {
        let on_seek = on_seek.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            if let Ok(index) = input.value().parse::<StepIndex>() {
                on_seek.emit(index);
            }
        })
    };

    html! {
        <div class="replay-controls">
            <button onclick={cb_rewind} disabled={at_first}>{"⏮"}</button>
            <button onclick={cb_prev} disabled={at_first}>{"◀"}</button>
            <button onclick={cb_next} disabled={at_last}>{"▶"}</button>
            <input
                type="range"
                min="0"
                max={(total.saturating_sub(1)).to_string()}
                value={current.to_string()}
                {oninput}
            />
            <span class="counter">{format_step_counter(*current, *total)}</span>
        </div>
    }
}
