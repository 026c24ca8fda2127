use yew::prelude::*;

use searchlab_core::{PathId, StepIndex};
use searchlab_protocol::{JugClimbRequest, JugLevels, PathResponse, within_capacities};

use crate::api::{self, FetchError};
use crate::demos::{DemoProps, JugInput, jug_chip};
use crate::replay::{Player, ReplayControls};
use crate::session::SolveSession;
use crate::utils::utc_now;

pub(crate) enum Msg {
    SetStart(JugLevels),
    SetGoal(JugLevels),
    SetCapacities(JugLevels),
    Solve,
    Solved(Result<PathResponse<JugLevels>, FetchError>),
    Tick(PathId),
    Seek(StepIndex),
    Prev,
    Next,
    Rewind,
}

pub(crate) struct WaterJugPage {
    start: JugLevels,
    goal: JugLevels,
    capacities: JugLevels,
    input_error: Option<&'static str>,
    session: SolveSession<PathResponse<JugLevels>>,
    player: Player<JugLevels>,
    path_id: Option<PathId>,
}

impl WaterJugPage {
    fn solve(&mut self, ctx: &Context<Self>) -> bool {
        self.input_error = None;
        if !within_capacities(self.start, self.capacities)
            || !within_capacities(self.goal, self.capacities)
        {
            self.input_error = Some("Jug levels cannot exceed the capacities");
            return true;
        }
        if !self.session.begin(utc_now()) {
            return false;
        }

        self.player.clear();
        self.path_id = None;

        let api = ctx.props().api.clone();
        let body = JugClimbRequest {
            start: self.start,
            goal: self.goal,
            capacities: self.capacities,
        };
        ctx.link().send_future(async move {
            Msg::Solved(api::post_json(&api, api::routes::WATER_JUG_HILL, &body).await)
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
                html! { <p class="verdict fail">{"Could not reach goal"}</p> }
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
                { (!revealed.is_empty()).then(|| html! { <p class="path-label">{"Path:"}</p> }) }
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

impl Component for WaterJugPage {
    type Message = Msg;
    type Properties = DemoProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            start: (0, 0),
            goal: (2, 0),
            capacities: (4, 3),
            input_error: None,
            session: SolveSession::default(),
            player: Player::new(),
            path_id: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetStart(levels) => {
                self.start = levels;
                true
            }
            Msg::SetGoal(levels) => {
                self.goal = levels;
                true
            }
            Msg::SetCapacities(levels) => {
                self.capacities = levels;
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
            <section class="demo water-jug">
                <h1>{"Water Jug problem using Hill Climbing"}</h1>
                <JugInput
                    label="Start State"
                    value={self.start}
                    on_change={ctx.link().callback(Msg::SetStart)}
                />
                <JugInput
                    label="Goal State"
                    value={self.goal}
                    on_change={ctx.link().callback(Msg::SetGoal)}
                />
                <JugInput
                    label="Jug Capacities"
                    value={self.capacities}
                    on_change={ctx.link().callback(Msg::SetCapacities)}
                />
                <button onclick={ctx.link().callback(|_| Msg::Solve)} disabled={pending}>
                    {"Solve"}
                </button>
                <div class="result">{ self.result_view(ctx) }</div>
            </section>
        }
    }
}
