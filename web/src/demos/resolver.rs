use yew::prelude::*;

use searchlab_core::{PathId, StepIndex};
use searchlab_protocol::{ProofRequest, ProofResponse};

use crate::api::{self, FetchError};
use crate::demos::{DemoProps, input_value};
use crate::replay::{Player, ReplayControls};
use crate::session::SolveSession;
use crate::utils::utc_now;

const SAMPLE_PREMISES: &str =
    "all x (man(x) -> mortal(x))\nall x (greek(x) -> man(x))\ngreek(marcus)";
const SAMPLE_GOAL: &str = "mortal(marcus)";

pub(crate) enum Msg {
    SetPremises(String),
    SetGoal(String),
    FillSample,
    Resolve,
    Resolved(Result<ProofResponse, FetchError>),
    Tick(PathId),
    Seek(StepIndex),
    Prev,
    Next,
    Rewind,
}

pub(crate) struct ResolverPage {
    premises: String,
    goal: String,
    session: SolveSession<ProofResponse>,
    player: Player<String>,
    path_id: Option<PathId>,
}

impl ResolverPage {
    fn resolve(&mut self, ctx: &Context<Self>) -> bool {
        if !self.session.begin(utc_now()) {
            return false;
        }

        self.player.clear();
        self.path_id = None;

        let api = ctx.props().api.clone();
        let body = ProofRequest {
            premises: self
                .premises
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            goal: self.goal.clone(),
        };
        ctx.link().send_future(async move {
            Msg::Resolved(api::post_json(&api, api::routes::CUSTOM_LOGIC, &body).await)
        });
        true
    }

    fn result_view(&self, ctx: &Context<Self>) -> Html {
        if self.session.is_pending() {
            return html! { <p class="pending">{"Resolving..."}</p> };
        }
        if let Some(error) = self.session.error() {
            return html! { <p class="error">{error.to_string()}</p> };
        }
        let Some(answer) = self.session.answer() else {
            return html! {};
        };

        if let Some(error) = &answer.error {
            return html! { <p class="error">{error.clone()}</p> };
        }

        let replay = self.player.replay();
        let state = replay.state();

        let verdict = (state.revealed == replay.len()).then(|| {
            if answer.success {
                html! { <p class="verdict ok">{"Goal proved by resolution"}</p> }
            } else {
                html! { <p class="verdict fail">{"Goal could not be proved"}</p> }
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
                <ol class="explanation">
                    {
                        for replay.revealed_steps().iter().enumerate().map(|(index, line)| {
                            let current = state.current == Some(index);
                            html! {
                                <li class={classes!(current.then_some("current"))}>
                                    {line.clone()}
                                </li>
                            }
                        })
                    }
                </ol>
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

impl Component for ResolverPage {
    type Message = Msg;
    type Properties = DemoProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            premises: String::new(),
            goal: String::new(),
            session: SolveSession::default(),
            player: Player::new(),
            path_id: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetPremises(premises) => {
                self.premises = premises;
                true
            }
            Msg::SetGoal(goal) => {
                self.goal = goal;
                true
            }
            Msg::FillSample => {
                self.premises = SAMPLE_PREMISES.to_string();
                self.goal = SAMPLE_GOAL.to_string();
                true
            }
            Msg::Resolve => self.resolve(ctx),
            Msg::Resolved(result) => {
                self.session.finish(utc_now(), result);
                if let Some(answer) = self.session.answer() {
                    let lines = answer.explanation.clone();
                    self.path_id = Some(self.player.load(
                        lines,
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

        let on_premises = ctx.link().callback(|e: InputEvent| {
            let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            Msg::SetPremises(area.value())
        });
        let on_goal = ctx
            .link()
            .callback(|e: InputEvent| Msg::SetGoal(input_value(&e)));

        html! {
            <section class="demo resolver">
                <h1>{"Marcus Logic Resolver"}</h1>
                <textarea
                    rows="4"
                    placeholder="Enter premises (one per line)"
                    value={self.premises.clone()}
                    oninput={on_premises}
                />
                <input
                    type="text"
                    placeholder="Enter goal statement"
                    value={self.goal.clone()}
                    oninput={on_goal}
                />
                <div class="actions">
                    <button onclick={ctx.link().callback(|_| Msg::FillSample)}>
                        {"Sample input"}
                    </button>
                    <button onclick={ctx.link().callback(|_| Msg::Resolve)} disabled={pending}>
                        {"Resolve"}
                    </button>
                </div>
                <div class="result">{ self.result_view(ctx) }</div>
            </section>
        }
    }
}
