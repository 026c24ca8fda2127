use yew::prelude::*;

use searchlab_protocol::{Mark, MarkGrid, MoveRequest, TurnResponse, VersusMoveRequest};

use crate::api::{self, FetchError};
use crate::demos::DemoProps;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Mode {
    TwoPlayer,
    VsComputer,
}

/// How the game stands after the last answered move.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Outcome {
    Open,
    Won(Mark),
    Draw,
}

pub(crate) enum Msg {
    SetMode(Mode),
    CellClick { x: u8, y: u8 },
    Moved(Result<TurnResponse, FetchError>),
    Restart,
}

pub(crate) struct TicTacToePage {
    mode: Mode,
    board: MarkGrid,
    next_player: Mark,
    outcome: Outcome,
    pending: bool,
    error: Option<FetchError>,
}

impl TicTacToePage {
    fn is_finished(&self) -> bool {
        !matches!(self.outcome, Outcome::Open)
    }

    fn clear_board(&mut self) {
        self.board = MarkGrid::default();
        self.next_player = Mark::X;
        self.outcome = Outcome::Open;
        self.pending = false;
        self.error = None;
    }

    fn play(&mut self, ctx: &Context<Self>, x: u8, y: u8) -> bool {
        let occupied = !self.board[x as usize][y as usize].is_empty();
        if occupied || self.pending || self.is_finished() {
            return false;
        }

        self.pending = true;
        self.error = None;

        let api = ctx.props().api.clone();
        let board = self.board;
        match self.mode {
            Mode::TwoPlayer => {
                let body = MoveRequest {
                    board,
                    x,
                    y,
                    player: self.next_player,
                };
                ctx.link().send_future(async move {
                    Msg::Moved(api::post_json(&api, api::routes::TICTACTOE_MOVE, &body).await)
                });
            }
            Mode::VsComputer => {
                let body = VersusMoveRequest { board, x, y };
                ctx.link().send_future(async move {
                    Msg::Moved(
                        api::post_json(&api, api::routes::TICTACTOE_VS_COMPUTER, &body).await,
                    )
                });
            }
        }
        true
    }

    fn apply_turn(&mut self, turn: TurnResponse) {
        self.board = turn.board;
        self.outcome = match (turn.winner, turn.is_draw) {
            (Some(mark), _) => Outcome::Won(mark),
            (None, true) => Outcome::Draw,
            (None, false) => Outcome::Open,
        };
        if self.outcome == Outcome::Open {
            self.next_player = match self.mode {
                // the service answers with the computer's move already applied
                Mode::VsComputer => Mark::X,
                Mode::TwoPlayer => turn.next_player.unwrap_or(self.next_player.other()),
            };
        }
    }

    fn status_line(&self) -> Html {
        if let Some(error) = &self.error {
            return html! { <p class="error">{error.to_string()}</p> };
        }
        match self.outcome {
            Outcome::Won(mark) => html! { <p class="verdict ok">{format!("{} wins!", mark.glyph())}</p> },
            Outcome::Draw => html! { <p class="verdict">{"It's a draw"}</p> },
            Outcome::Open if self.pending => html! { <p class="pending">{"Thinking..."}</p> },
            Outcome::Open => html! { <p>{format!("Turn: {}", self.next_player.glyph())}</p> },
        }
    }
}

impl Component for TicTacToePage {
    type Message = Msg;
    type Properties = DemoProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            mode: Mode::TwoPlayer,
            board: MarkGrid::default(),
            next_player: Mark::X,
            outcome: Outcome::Open,
            pending: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetMode(mode) => {
                if self.mode == mode {
                    return false;
                }
                self.mode = mode;
                self.clear_board();
                true
            }
            Msg::CellClick { x, y } => self.play(ctx, x, y),
            Msg::Moved(result) => {
                self.pending = false;
                match result {
                    Ok(turn) => self.apply_turn(turn),
                    Err(error) => {
                        log::debug!("move rejected: {}", error);
                        self.error = Some(error);
                    }
                }
                true
            }
            Msg::Restart => {
                self.clear_board();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let locked = self.pending || self.is_finished();

        let mode_toggle = |mode: Mode, label: &'static str| {
            let selected = self.mode == mode;
            let onclick = ctx.link().callback(move |_| Msg::SetMode(mode));
            html! {
                <button class={classes!(selected.then_some("selected"))} {onclick}>
                    {label}
                </button>
            }
        };

        html! {
            <section class="demo tic-tac-toe">
                <h1>{"Tic Tac Toe"}</h1>
                <div class="mode-toggle">
                    { mode_toggle(Mode::TwoPlayer, "Two players") }
                    { mode_toggle(Mode::VsComputer, "Versus computer") }
                </div>
                <table class={classes!("board", (!locked).then_some("playable"))}>
                    {
                        for (0..3u8).map(|x| html! {
                            <tr>
                                {
                                    for (0..3u8).map(|y| {
                                        let mark = self.board[x as usize][y as usize];
                                        let onclick = ctx
                                            .link()
                                            .callback(move |_| Msg::CellClick { x, y });
                                        html! {
                                            <td
                                                class={classes!(mark.is_empty().then_some("empty"))}
                                                {onclick}
                                            >
                                                {mark.glyph()}
                                            </td>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                { self.status_line() }
                <button onclick={ctx.link().callback(|_| Msg::Restart)}>{"Restart"}</button>
            </section>
        }
    }
}
