use yew::prelude::*;

use searchlab_core::{PathId, StepIndex};
use searchlab_protocol::{
    JugAstarRequest, JugLevels, PathResponse, SlideRequest, TileGrid, complete_tile_set,
    within_capacities,
};

use crate::api::{self, FetchError};
use crate::demos::{DemoProps, JugInput, TileGridInput, jug_chip, tile_grid_view};
use crate::replay::{Player, ReplayControls};
use crate::session::SolveSession;
use crate::utils::utc_now;

/// Which problem the A* service is asked to solve.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Problem {
    Puzzle,
    Jug,
}

pub(crate) enum Msg {
    SetProblem(Problem),
    SetStartGrid(TileGrid),
    SetGoalGrid(TileGrid),
    SetStartJug(JugLevels),
    SetGoalJug(JugLevels),
    SetCapacity(JugLevels),
    Solve,
    SolvedPuzzle(Result<PathResponse<TileGrid>, FetchError>),
    SolvedJug(Result<PathResponse<JugLevels>, FetchError>),
    TickPuzzle(PathId),
    TickJug(PathId),
    Seek(StepIndex),
    Prev,
    Next,
    Rewind,
}

/// Each problem keeps its own session and player so switching the toggle
/// does not lose an answer already on screen.
pub(crate) struct AstarPage {
    problem: Problem,
    start_grid: TileGrid,
    goal_grid: TileGrid,
    start_jug: JugLevels,
    goal_jug: JugLevels,
    capacity: JugLevels,
    input_error: Option<&'static str>,
    puzzle_session: SolveSession<PathResponse<TileGrid>>,
    jug_session: SolveSession<PathResponse<JugLevels>>,
    puzzle_player: Player<TileGrid>,
    jug_player: Player<JugLevels>,
    puzzle_id: Option<PathId>,
    jug_id: Option<PathId>,
}

impl AstarPage {
    fn is_pending(&self) -> bool {
        match self.problem {
            Problem::Puzzle => self.puzzle_session.is_pending(),
            Problem::Jug => self.jug_session.is_pending(),
        }
    }

    fn solve(&mut self, ctx: &Context<Self>) -> bool {
        self.input_error = None;
        match self.problem {
            Problem::Puzzle => {
                if !complete_tile_set(&self.start_grid) || !complete_tile_set(&self.goal_grid) {
                    self.input_error =
                        Some("Each grid must use the tiles 0 through 8 exactly once");
                    return true;
                }
                if !self.puzzle_session.begin(utc_now()) {
                    return false;
                }
                self.puzzle_player.clear();
                self.puzzle_id = None;

                let api = ctx.props().api.clone();
                let body = SlideRequest {
                    start: self.start_grid,
                    goal: self.goal_grid,
                };
                ctx.link().send_future(async move {
                    Msg::SolvedPuzzle(
                        api::post_json(&api, api::routes::EIGHT_PUZZLE_ASTAR, &body).await,
                    )
                });
            }
            Problem::Jug => {
                if !within_capacities(self.start_jug, self.capacity)
                    || !within_capacities(self.goal_jug, self.capacity)
                {
                    self.input_error = Some("Jug levels cannot exceed the capacities");
                    return true;
                }
                if !self.jug_session.begin(utc_now()) {
                    return false;
                }
                self.jug_player.clear();
                self.jug_id = None;

                let api = ctx.props().api.clone();
                let body = JugAstarRequest {
                    start: self.start_jug,
                    goal: self.goal_jug,
                    capacity: self.capacity,
                };
                ctx.link().send_future(async move {
                    Msg::SolvedJug(api::post_json(&api, api::routes::WATER_JUG_ASTAR, &body).await)
                });
            }
        }
        true
    }

    fn scrub(&mut self, msg: &Msg) -> bool {
        match self.problem {
            Problem::Puzzle => {
                let Some(id) = self.puzzle_id else {
                    return false;
                };
                match msg {
                    Msg::Seek(index) => self.puzzle_player.go_to(id, *index),
                    Msg::Prev => self.puzzle_player.step_backward(id),
                    Msg::Next => self.puzzle_player.step_forward(id),
                    Msg::Rewind => self.puzzle_player.rewind(id),
                    _ => false,
                }
            }
            Problem::Jug => {
                let Some(id) = self.jug_id else {
                    return false;
                };
                match msg {
                    Msg::Seek(index) => self.jug_player.go_to(id, *index),
                    Msg::Prev => self.jug_player.step_backward(id),
                    Msg::Next => self.jug_player.step_forward(id),
                    Msg::Rewind => self.jug_player.rewind(id),
                    _ => false,
                }
            }
        }
    }

    fn inputs_view(&self, ctx: &Context<Self>) -> Html {
        match self.problem {
            Problem::Puzzle => html! {
                <div class="grid-inputs">
                    <div>
                        <label>{"Start"}</label>
                        <TileGridInput
                            grid={self.start_grid}
                            on_change={ctx.link().callback(Msg::SetStartGrid)}
                        />
                    </div>
                    <div>
                        <label>{"Goal"}</label>
                        <TileGridInput
                            grid={self.goal_grid}
                            on_change={ctx.link().callback(Msg::SetGoalGrid)}
                        />
                    </div>
                </div>
            },
            Problem::Jug => html! {
                <>
                    <JugInput
                        label="Start State"
                        value={self.start_jug}
                        on_change={ctx.link().callback(Msg::SetStartJug)}
                    />
                    <JugInput
                        label="Goal State"
                        value={self.goal_jug}
                        on_change={ctx.link().callback(Msg::SetGoalJug)}
                    />
                    <JugInput
                        label="Jug Capacities"
                        value={self.capacity}
                        on_change={ctx.link().callback(Msg::SetCapacity)}
                    />
                </>
            },
        }
    }

    fn result_view(&self, ctx: &Context<Self>) -> Html {
        if let Some(error) = self.input_error {
            return html! { <p class="error">{error}</p> };
        }
        if self.is_pending() {
            return html! { <p class="pending">{"Solving..."}</p> };
        }

        // The two arms only differ in how a step renders.
        match self.problem {
            Problem::Puzzle => {
                if let Some(error) = self.puzzle_session.error() {
                    return html! { <p class="error">{error.to_string()}</p> };
                }
                let Some(answer) = self.puzzle_session.answer() else {
                    return html! {};
                };
                let replay = self.puzzle_player.replay();
                let state = replay.state();
                let steps = html! {
                    <div class="path grids">
                        {
                            for replay.revealed_steps().iter().enumerate().map(|(index, grid)| {
                                tile_grid_view(grid, state.current == Some(index))
                            })
                        }
                    </div>
                };
                self.answer_view(ctx, answer.success, state.revealed == replay.len(), steps, {
                    state.current.map(|current| (current, replay.len()))
                })
            }
            Problem::Jug => {
                if let Some(error) = self.jug_session.error() {
                    return html! { <p class="error">{error.to_string()}</p> };
                }
                let Some(answer) = self.jug_session.answer() else {
                    return html! {};
                };
                let replay = self.jug_player.replay();
                let state = replay.state();
                let revealed = replay.revealed_steps();
                let steps = html! {
                    <div class="path">
                        {
                            for revealed.iter().enumerate().map(|(index, &levels)| {
                                jug_chip(
                                    levels,
                                    state.current == Some(index),
                                    index + 1 == revealed.len(),
                                )
                            })
                        }
                    </div>
                };
                self.answer_view(ctx, answer.success, state.revealed == replay.len(), steps, {
                    state.current.map(|current| (current, replay.len()))
                })
            }
        }
    }

    fn answer_view(
        &self,
        ctx: &Context<Self>,
        success: bool,
        fully_revealed: bool,
        steps: Html,
        scrubber: Option<(StepIndex, usize)>,
    ) -> Html {
        let verdict = fully_revealed.then(|| {
            if success {
                html! { <p class="verdict ok">{"Goal reached!"}</p> }
            } else {
                html! { <p class="verdict fail">{"No solution found"}</p> }
            }
        });

        let controls = scrubber.map(|(current, total)| {
            html! {
                <ReplayControls
                    {current}
                    {total}
                    on_seek={ctx.link().callback(Msg::Seek)}
                    on_prev={ctx.link().callback(|_| Msg::Prev)}
                    on_next={ctx.link().callback(|_| Msg::Next)}
                    on_rewind={ctx.link().callback(|_| Msg::Rewind)}
                />
            }
        });

        html! {
            <>
                {steps}
                {controls}
                {verdict}
            </>
        }
    }
}

impl Component for AstarPage {
    type Message = Msg;
    type Properties = DemoProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            problem: Problem::Puzzle,
            start_grid: [[1, 2, 3], [4, 0, 6], [7, 5, 8]],
            goal_grid: [[1, 2, 3], [4, 5, 6], [7, 8, 0]],
            start_jug: (0, 0),
            goal_jug: (2, 0),
            capacity: (4, 3),
            input_error: None,
            puzzle_session: SolveSession::default(),
            jug_session: SolveSession::default(),
            puzzle_player: Player::new(),
            jug_player: Player::new(),
            puzzle_id: None,
            jug_id: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetProblem(problem) => {
                if self.problem == problem {
                    return false;
                }
                self.problem = problem;
                self.input_error = None;
                true
            }
            Msg::SetStartGrid(grid) => {
                self.start_grid = grid;
                true
            }
            Msg::SetGoalGrid(grid) => {
                self.goal_grid = grid;
                true
            }
            Msg::SetStartJug(levels) => {
                self.start_jug = levels;
                true
            }
            Msg::SetGoalJug(levels) => {
                self.goal_jug = levels;
                true
            }
            Msg::SetCapacity(levels) => {
                self.capacity = levels;
                true
            }
            Msg::Solve => self.solve(ctx),
            Msg::SolvedPuzzle(result) => {
                self.puzzle_session.finish(utc_now(), result);
                if let Some(answer) = self.puzzle_session.answer() {
                    let steps = answer.path.clone();
                    self.puzzle_id = Some(self.puzzle_player.load(
                        steps,
                        ctx.props().reveal_ms,
                        ctx.link().callback(Msg::TickPuzzle),
                    ));
                }
                true
            }
            Msg::SolvedJug(result) => {
                self.jug_session.finish(utc_now(), result);
                if let Some(answer) = self.jug_session.answer() {
                    let steps = answer.path.clone();
                    self.jug_id = Some(self.jug_player.load(
                        steps,
                        ctx.props().reveal_ms,
                        ctx.link().callback(Msg::TickJug),
                    ));
                }
                true
            }
            Msg::TickPuzzle(id) => self.puzzle_player.tick(id),
            Msg::TickJug(id) => self.jug_player.tick(id),
            msg @ (Msg::Seek(_) | Msg::Prev | Msg::Next | Msg::Rewind) => self.scrub(&msg),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let pending = self.is_pending();
        let toggle = |problem: Problem, label: &'static str| {
            let selected = self.problem == problem;
            let onclick = ctx.link().callback(move |_| Msg::SetProblem(problem));
            html! {
                <button class={classes!(selected.then_some("selected"))} {onclick}>
                    {label}
                </button>
            }
        };

        html! {
            <section class="demo astar">
                <h1>{"A* for Water Jug and 8 Puzzle"}</h1>
                <div class="problem-toggle">
                    { toggle(Problem::Puzzle, "8 Puzzle") }
                    { toggle(Problem::Jug, "Water Jug") }
                </div>
                { self.inputs_view(ctx) }
                <button onclick={ctx.link().callback(|_| Msg::Solve)} disabled={pending}>
                    {"Solve"}
                </button>
                <div class="result">{ self.result_view(ctx) }</div>
            </section>
        }
    }
}
