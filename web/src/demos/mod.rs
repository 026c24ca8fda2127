use serde::{Deserialize, Serialize};
use yew::prelude::*;

use searchlab_protocol::{JugLevels, TileGrid};

mod astar;
mod eight_puzzle;
mod resolver;
mod tic_tac_toe;
mod tour;
mod water_jug;

pub(crate) use astar::AstarPage;
pub(crate) use eight_puzzle::EightPuzzlePage;
pub(crate) use resolver::ResolverPage;
pub(crate) use tic_tac_toe::TicTacToePage;
pub(crate) use tour::TourPage;
pub(crate) use water_jug::WaterJugPage;

/// The demo catalog.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Demo {
    Tour,
    TicTacToe,
    WaterJug,
    EightPuzzle,
    Astar,
    Resolver,
}

impl Demo {
    pub const ALL: [Demo; 6] = [
        Demo::Tour,
        Demo::TicTacToe,
        Demo::WaterJug,
        Demo::EightPuzzle,
        Demo::Astar,
        Demo::Resolver,
    ];

    pub(crate) const fn title(self) -> &'static str {
        use Demo::*;
        match self {
            Tour => "DFS and BFS for the Travelling Salesman Problem",
            TicTacToe => "Tic Tac Toe",
            WaterJug => "Water Jug problem using Hill Climbing",
            EightPuzzle => "8 Puzzle using Greedy Best-First Search",
            Astar => "A* for Water Jug and 8 Puzzle",
            Resolver => "Resolution of the Marcus Problem",
        }
    }
}

/// Props shared by every demo page: the service base URL and the replay
/// cadence from settings.
#[derive(Properties, Clone, PartialEq)]
pub(crate) struct DemoProps {
    #[prop_or_default]
    pub api: AttrValue,
    pub reveal_ms: u32,
}

pub(crate) fn input_value(e: &InputEvent) -> String {
    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
    input.value()
}

/// Numeric field contents, empty or garbage reading as zero.
pub(crate) fn input_number(e: &InputEvent) -> u32 {
    input_value(e).parse().unwrap_or(0)
}

pub(crate) fn tile_grid_view(grid: &TileGrid, current: bool) -> Html {
    html! {
        <table class={classes!("tile-grid", current.then_some("current"))}>
            {
                for grid.iter().map(|row| html! {
                    <tr>
                        {
                            for row.iter().map(|&tile| html! {
                                <td class={classes!((tile == 0).then_some("blank"))}>
                                    { if tile == 0 { String::new() } else { tile.to_string() } }
                                </td>
                            })
                        }
                    </tr>
                })
            }
        </table>
    }
}

pub(crate) fn jug_chip(levels: JugLevels, current: bool, last: bool) -> Html {
    html! {
        <>
            <span class={classes!("jug-chip", current.then_some("current"))}>
                {format!("({}, {})", levels.0, levels.1)}
            </span>
            { (!last).then(|| html! { <span class="arrow">{"→"}</span> }) }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct TileGridInputProps {
    pub grid: TileGrid,
    pub on_change: Callback<TileGrid>,
}

/// 3x3 numeric entry; 0 stands for the blank.
#[function_component]
pub(crate) fn TileGridInput(props: &TileGridInputProps) -> Html {
    let grid = props.grid;

    html! {
        <table class="tile-grid-input">
            {
                for (0..3).map(|row| html! {
                    <tr>
                        {
                            for (0..3).map(|col| {
                                let on_change = props.on_change.clone();
                                let oninput = Callback::from(move |e: InputEvent| {
                                    let mut next = grid;
                                    next[row][col] = input_number(&e).min(8) as u8;
                                    on_change.emit(next);
                                });
                                html! {
                                    <td>
                                        <input
                                            type="number"
                                            min="0"
                                            max="8"
                                            value={grid[row][col].to_string()}
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

#[derive(Properties, PartialEq)]
pub(crate) struct JugInputProps {
    pub label: AttrValue,
    pub value: JugLevels,
    pub on_change: Callback<JugLevels>,
}

/// Paired numeric entry for the two jugs.
#[function_component]
pub(crate) fn JugInput(props: &JugInputProps) -> Html {
    let value = props.value;

    let first = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            on_change.emit((input_number(&e), value.1));
        })
    };
    let second = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            on_change.emit((value.0, input_number(&e)));
        })
    };

    html! {
        <div class="jug-input">
            <label>{props.label.clone()}</label>
            <input type="number" min="0" placeholder="Jug 1" value={value.0.to_string()} oninput={first}/>
            <input type="number" min="0" placeholder="Jug 2" value={value.1.to_string()} oninput={second}/>
        </div>
    }
}
