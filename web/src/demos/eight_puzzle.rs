use yew::prelude::*;

use searchlab_core::{PathId, StepIndex};
use searchlab_protocol::{PathResponse, SlideRequest, TileGrid, complete_tile_set};

use crate::api::{self, FetchError};
use crate::demos::{DemoProps, TileGridInput, tile_grid_view};
use crate::replay::{Player, ReplayControls};
use crate::session::SolveSession;
use crate::utils::utc_now;

const DEFAULT_START: TileGrid = [[1, 2, 3], [4, 0, 6], [7, 5, 8]];
const DEFAULT_GOAL: TileGrid = [[1, 2, 3], [4, 5, 6], [7, 8, 0]];

pub(crate) enum Msg {
    SetStart(TileGrid),
    SetGoal(TileGrid),
    Solve,
    Solved(Result<PathResponse<TileGrid>, FetchError>),
    Tick(PathId),
    Seek(StepIndex),
    Prev,
    Next,
    Rewind,
}

pub(crate) struct EightPuzzlePage {
    start: TileGrid,
    goal: TileGrid,
    input_error: Option<&'static str>,
    session: SolveSession<PathResponse<TileGrid>>,
    player: Player<TileGrid>,
    path_id: Option<PathId>,
}

impl EightPuzzlePage {
    fn solve(&mut self, ctx: &Context<Self>) -> bool {
        self.input_error = None;
        if !complete_tile_set(&self.start) || !complete_tile_set(&self.goal) {
            self.input_error = Some("Each grid must use the tiles 0 through 8 exactly once");
            return true;
        }
        if !self.session.begin(utc_now()) {
            return false;
        }

        self.player.clear();
        self.path_id = None;

        let api = ctx.props().api.clone();
        let body = SlideRequest {
            start: self.start,
            goal: self.goal,
        };
        ctx.link().send_future(async move {
            Msg::Solved(api::post_json(&api, api::routes::EIGHT_PUZZLE_GBFS, &body).await)
        });
        true
    }

    fn result_view(&self, ctx: &Context<Self>) -> Html {
        if let Some(error) = self.input_error {
            return html! { <p class="error">{error}</p> };
        }
        if self.session.is_pending() {
            return html! { <p class="pending">{"Solving..."}</p> };
        }
        if let Some(error) = self.session.error() {
            return html! { <p class="error">{error.to_string()}</p> };
        }
        let Some(answer) = self.session.answer() else {
            return html! {};
        };

        let replay = self.player.replay();
        let state = replay.state();
        let revealed = replay.revealed_steps();

        let verdict = (state.revealed == replay.len()).then(|| {
            if answer.success {
                html! { <p class="verdict ok">{"Goal reached!"}</p> }
            } else {
                html! { <p class="verdict fail">{"No solution found"}</p> }
            }
        });

        let controls = state.current.map(|current| {
            html! {
                <ReplayControls
                    {current}
                    total={replay.len()}
                    on_seek={ctx.link().callback(Msg::Seek)}
                    on_prev={ctx.link().callback(|_| Msg::Prev)}
                    on_next={ctx.link().callback(|_| Msg::Next)}
                    on_rewind={ctx.link().callback(|_| Msg::Rewind)}
                />
            }
        });

        html! {
            <>
                { (!revealed.is_empty()).then(|| html! { <p class="path-label">{"Steps:"}</p> }) }
                <div class="path grids">
                    {
                        for revealed.iter().enumerate().map(|(index, grid)| {
                            tile_grid_view(grid, state.current == Some(index))
                        })
                    }
                </div>
                {controls}
                {verdict}
                {
                    self.session.latency_ms().map(|ms| html! {
                        <small class="latency">{format!("answered in {} ms", ms)}</small>
                    })
                }
            </>
        }
    }
}

impl Component for EightPuzzlePage {
    type Message = Msg;
    type Properties = DemoProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            start: DEFAULT_START,
            goal: DEFAULT_GOAL,
            input_error: None,
            session: SolveSession::default(),
            player: Player::new(),
            path_id: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetStart(grid) => {
                self.start = grid;
                true
            }
            Msg::SetGoal(grid) => {
                self.goal = grid;
                true
            }
            Msg::Solve => self.solve(ctx),
            Msg::Solved(result) => {
                self.session.finish(utc_now(), result);
                if let Some(answer) = self.session.answer() {
                    let steps = answer.path.clone();
                    self.path_id = Some(self.player.load(
                        steps,
                        ctx.props().reveal_ms,
                        ctx.link().callback(Msg::Tick),
                    ));
                }
                true
            }
            Msg::Tick(id) => self.player.tick(id),
            Msg::Seek(index) => match self.path_id {
                Some(id) => self.player.go_to(id, index),
                None => false,
            },
            Msg::Prev => match self.path_id {
                Some(id) => self.player.step_backward(id),
                None => false,
            },
            Msg::Next => match self.path_id {
                Some(id) => self.player.step_forward(id),
                None => false,
            },
            Msg::Rewind => match self.path_id {
                Some(id) => self.player.rewind(id),
                None => false,
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let pending = self.session.is_pending();

        html! {
            <section class="demo eight-puzzle">
                <h1>{"8 Puzzle using Greedy Best-First Search"}</h1>
                <div class="grid-inputs">
                    <div>
                        <label>{"Start"}</label>
                        <TileGridInput grid={self.start} on_change={ctx.link().callback(Msg::SetStart)}/>
                    </div>
                    <div>
                        <label>{"Goal"}</label>
                        <TileGridInput grid={self.goal} on_change={ctx.link().callback(Msg::SetGoal)}/>
                    </div>
                </div>
                <button onclick={ctx.link().callback(|_| Msg::Solve)} disabled={pending}>
                    {"Solve"}
                </button>
                <div class="result">{ self.result_view(ctx) }</div>
            </section>
        }
    }
}
