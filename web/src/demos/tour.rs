use std::collections::BTreeMap;

use yew::prelude::*;

use searchlab_protocol::{Graph, TourMethod, TourRequest, TourResponse, graph_from_json};

use crate::api::{self, FetchError};
use crate::demos::{DemoProps, input_number};
use crate::session::SolveSession;
use crate::utils::utc_now;

const CITIES: [&str; 4] = ["A", "B", "C", "D"];

#[derive(Copy, Clone, Debug, PartialEq)]
enum InputMode {
    Matrix,
    Json,
}

pub(crate) enum Msg {
    SetMode(InputMode),
    SetWeight { from: usize, to: usize, weight: u32 },
    SetStart(String),
    SetGraphText(String),
    SetMethod(TourMethod),
    Solve,
    Solved(Result<TourResponse, FetchError>),
}

pub(crate) struct TourPage {
    mode: InputMode,
    matrix: [[u32; 4]; 4],
    start: String,
    graph_text: String,
    method: TourMethod,
    input_error: Option<String>,
    session: SolveSession<TourResponse>,
}

impl TourPage {
    /// Off-diagonal, non-zero weights become edges; zero means no edge, as
    /// an empty field reads as zero.
    fn matrix_graph(&self) -> Graph {
        let mut graph = Graph::new();
        for (from_index, from) in CITIES.iter().enumerate() {
            let mut edges = BTreeMap::new();
            for (to_index, to) in CITIES.iter().enumerate() {
                let weight = self.matrix[from_index][to_index];
                if from_index != to_index && weight > 0 {
                    edges.insert(to.to_string(), weight);
                }
            }
            graph.insert(from.to_string(), edges);
        }
        graph
    }

    fn solve(&mut self, ctx: &Context<Self>) -> bool {
        self.input_error = None;

        let (graph, start) = match self.mode {
            InputMode::Matrix => (self.matrix_graph(), self.start.clone()),
            InputMode::Json => match graph_from_json(&self.graph_text) {
                Ok(graph) => {
                    if !graph.contains_key(&self.start) {
                        self.input_error =
                            Some(format!("Start city {:?} is not in the graph", self.start));
                        return true;
                    }
                    (graph, self.start.clone())
                }
                Err(err) => {
                    self.input_error = Some(format!("Graph is not valid JSON: {}", err));
                    return true;
                }
            },
        };

        if !self.session.begin(utc_now()) {
            return false;
        }

        let api = ctx.props().api.clone();
        let body = TourRequest {
            graph,
            start,
            method: self.method,
        };
        ctx.link()
            .send_future(
                async move { Msg::Solved(api::post_json(&api, api::routes::TSP, &body).await) },
            );
        true
    }

    fn matrix_view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <table class="weight-matrix">
                <tr>
                    <th/>
                    { for CITIES.iter().map(|city| html! { <th>{*city}</th> }) }
                </tr>
                {
                    for CITIES.iter().enumerate().map(|(from, from_city)| html! {
                        <tr>
                            <th>{*from_city}</th>
                            {
                                for (0..CITIES.len()).map(|to| {
                                    if from == to {
                                        return html! { <td class="blank">{"—"}</td> };
                                    }
                                    let oninput = ctx.link().callback(move |e: InputEvent| {
                                        Msg::SetWeight { from, to, weight: input_number(&e) }
                                    });
                                    html! {
                                        <td>
                                            <input
                                                type="number"
                                                min="0"
                                                value={self.matrix[from][to].to_string()}
                                                {oninput}
                                            />
                                        </td>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn result_view(&self) -> Html {
        if let Some(error) = &self.input_error {
            return html! { <p class="error">{error.clone()}</p> };
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

        html! {
            <>
                <p class="path-label">{"Tour:"}</p>
                <p class="tour">{answer.path.join(" → ")}</p>
                <p class="cost">{format!("Total cost: {}", answer.cost)}</p>
                {
                    self.session.latency_ms().map(|ms| html! {
                        <small class="latency">{format!("answered in {} ms", ms)}</small>
                    })
                }
            </>
        }
    }
}

impl Component for TourPage {
    type Message = Msg;
    type Properties = DemoProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            mode: InputMode::Matrix,
            matrix: [[0; 4]; 4],
            start: "A".to_string(),
            graph_text: String::new(),
            method: TourMethod::Dfs,
            input_error: None,
            session: SolveSession::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetMode(mode) => {
                if self.mode == mode {
                    return false;
                }
                self.mode = mode;
                self.input_error = None;
                true
            }
            Msg::SetWeight { from, to, weight } => {
                self.matrix[from][to] = weight;
                true
            }
            Msg::SetStart(start) => {
                self.start = start;
                true
            }
            Msg::SetGraphText(text) => {
                self.graph_text = text;
                true
            }
            Msg::SetMethod(method) => {
                self.method = method;
                true
            }
            Msg::Solve => self.solve(ctx),
            Msg::Solved(result) => {
                self.session.finish(utc_now(), result);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let pending = self.session.is_pending();

        let mode_toggle = |mode: InputMode, label: &'static str| {
            let selected = self.mode == mode;
            let onclick = ctx.link().callback(move |_| Msg::SetMode(mode));
            html! {
                <button class={classes!(selected.then_some("selected"))} {onclick}>
                    {label}
                </button>
            }
        };
        let method_toggle = |method: TourMethod| {
            let selected = self.method == method;
            let onclick = ctx.link().callback(move |_| Msg::SetMethod(method));
            html! {
                <button class={classes!(selected.then_some("selected"))} {onclick}>
                    {method.label()}
                </button>
            }
        };

        let on_start = ctx.link().callback(|e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            Msg::SetStart(select.value())
        });
        let on_graph_text = ctx.link().callback(|e: InputEvent| {
            let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            Msg::SetGraphText(area.value())
        });

        let inputs = match self.mode {
            InputMode::Matrix => self.matrix_view(ctx),
            InputMode::Json => html! {
                <textarea
                    rows="6"
                    placeholder={r#"Graph in JSON, e.g. {"A": {"B": 3}, "B": {"A": 3}}"#}
                    value={self.graph_text.clone()}
                    oninput={on_graph_text}
                />
            },
        };

        html! {
            <section class="demo tour">
                <h1>{"DFS and BFS for the Travelling Salesman Problem"}</h1>
                <div class="mode-toggle">
                    { mode_toggle(InputMode::Matrix, "Distance matrix") }
                    { mode_toggle(InputMode::Json, "JSON graph") }
                </div>
                {inputs}
                <div class="tour-options">
                    <label>{"Start city"}</label>
                    <select onchange={on_start}>
                        {
                            for CITIES.iter().map(|city| html! {
                                <option value={*city} selected={self.start == *city}>{*city}</option>
                            })
                        }
                    </select>
                    { method_toggle(TourMethod::Dfs) }
                    { method_toggle(TourMethod::Bfs) }
                </div>
                <button onclick={ctx.link().callback(|_| Msg::Solve)} disabled={pending}>
                    {"Solve"}
                </button>
                <div class="result">{ self.result_view() }</div>
            </section>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_matrix(matrix: [[u32; 4]; 4]) -> TourPage {
        TourPage {
            mode: InputMode::Matrix,
            matrix,
            start: "A".to_string(),
            graph_text: String::new(),
            method: TourMethod::Dfs,
            input_error: None,
            session: SolveSession::default(),
        }
    }

    #[test]
    fn matrix_graph_skips_diagonal_and_zero_weights() {
        let mut matrix = [[0; 4]; 4];
        matrix[0][1] = 3;
        matrix[1][0] = 3;
        matrix[2][2] = 9;

        let graph = page_with_matrix(matrix).matrix_graph();

        assert_eq!(graph["A"]["B"], 3);
        assert_eq!(graph["B"]["A"], 3);
        assert!(graph["C"].is_empty());
        assert!(graph["D"].is_empty());
    }

    #[test]
    fn matrix_graph_names_every_city() {
        let graph = page_with_matrix([[0; 4]; 4]).matrix_graph();
        assert_eq!(graph.keys().cloned().collect::<Vec<_>>(), ["A", "B", "C", "D"]);
    }
}
