//! Payload types for the solver service. Field names and shapes follow the
//! service routes exactly; quirks are kept per route rather than papered over.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weighted adjacency between named cities.
pub type Graph = BTreeMap<String, BTreeMap<String, u32>>;

pub fn graph_from_json(text: &str) -> serde_json::Result<Graph> {
    serde_json::from_str(text)
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourMethod {
    Dfs,
    Bfs,
}

impl TourMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dfs => "DFS",
            Self::Bfs => "BFS",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourRequest {
    pub graph: Graph,
    pub start: String,
    pub method: TourMethod,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourResponse {
    pub path: Vec<String>,
    pub cost: u32,
}

/// Body of a non-2xx reply from any route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
    #[serde(rename = "")]
    Empty,
}

impl Mark {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
            Self::Empty => "",
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
            Self::Empty => Self::Empty,
        }
    }
}

impl Default for Mark {
    fn default() -> Self {
        Self::Empty
    }
}

pub type MarkGrid = [[Mark; 3]; 3];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub board: MarkGrid,
    pub x: u8,
    pub y: u8,
    pub player: Mark,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersusMoveRequest {
    pub board: MarkGrid,
    pub x: u8,
    pub y: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnResponse {
    pub board: MarkGrid,
    #[serde(default)]
    pub winner: Option<Mark>,
    #[serde(default)]
    pub is_draw: bool,
    #[serde(default)]
    pub next_player: Option<Mark>,
}

/// 3x3 sliding-tile arrangement; 0 is the blank.
pub type TileGrid = [[u8; 3]; 3];

/// True when the grid uses each tile 0 through 8 exactly once.
pub fn complete_tile_set(grid: &TileGrid) -> bool {
    let mut seen = [false; 9];
    for row in grid {
        for &tile in row {
            match seen.get_mut(tile as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
    }
    seen.iter().all(|&marked| marked)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlideRequest {
    pub start: TileGrid,
    pub goal: TileGrid,
}

/// Fill levels of the two jugs, in litres. Encodes as a plain `[x, y]` pair.
pub type JugLevels = (u32, u32);

pub fn within_capacities(levels: JugLevels, capacities: JugLevels) -> bool {
    levels.0 <= capacities.0 && levels.1 <= capacities.1
}

// The hill-climbing route spells the field `capacities`, the A* route spells
// it `capacity`. The service is not ours to fix, so each route gets its own
// request type.

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JugClimbRequest {
    pub start: JugLevels,
    pub goal: JugLevels,
    pub capacities: JugLevels,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JugAstarRequest {
    pub start: JugLevels,
    pub goal: JugLevels,
    pub capacity: JugLevels,
}

/// Reply shape shared by the path-producing routes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathResponse<S> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub path: Vec<S>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofRequest {
    pub premises: Vec<String>,
    pub goal: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProofResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub explanation: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn small_graph() -> Graph {
        let mut graph = Graph::new();
        graph.insert(
            "A".to_string(),
            BTreeMap::from([("B".to_string(), 3), ("C".to_string(), 1)]),
        );
        graph.insert("B".to_string(), BTreeMap::from([("A".to_string(), 3)]));
        graph
    }

    #[test]
    fn tour_request_wire_shape() {
        let request = TourRequest {
            graph: small_graph(),
            start: "A".to_string(),
            method: TourMethod::Dfs,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "graph": {"A": {"B": 3, "C": 1}, "B": {"A": 3}},
                "start": "A",
                "method": "dfs",
            })
        );
    }

    #[test]
    fn tour_methods_encode_lowercase() {
        assert_eq!(serde_json::to_value(TourMethod::Dfs).unwrap(), json!("dfs"));
        assert_eq!(serde_json::to_value(TourMethod::Bfs).unwrap(), json!("bfs"));
    }

    #[test]
    fn graph_from_json_round_trip() {
        let graph = graph_from_json(r#"{"A": {"B": 2}, "B": {"A": 2}}"#).unwrap();
        assert_eq!(graph["A"]["B"], 2);

        assert!(graph_from_json("not json").is_err());
        assert!(graph_from_json(r#"{"A": ["B"]}"#).is_err());
    }

    #[test]
    fn jug_requests_encode_pairs_and_route_spellings() {
        let climb = JugClimbRequest {
            start: (0, 0),
            goal: (2, 0),
            capacities: (4, 3),
        };
        assert_eq!(
            serde_json::to_value(&climb).unwrap(),
            json!({"start": [0, 0], "goal": [2, 0], "capacities": [4, 3]})
        );

        let astar = JugAstarRequest {
            start: (0, 0),
            goal: (2, 0),
            capacity: (4, 3),
        };
        assert_eq!(
            serde_json::to_value(&astar).unwrap(),
            json!({"start": [0, 0], "goal": [2, 0], "capacity": [4, 3]})
        );
    }

    #[test]
    fn marks_encode_as_board_strings() {
        let board: MarkGrid = [
            [Mark::X, Mark::Empty, Mark::O],
            [Mark::Empty; 3],
            [Mark::Empty, Mark::X, Mark::Empty],
        ];

        assert_eq!(
            serde_json::to_value(board).unwrap(),
            json!([["X", "", "O"], ["", "", ""], ["", "X", ""]])
        );
    }

    #[test]
    fn turn_response_defaults_missing_fields() {
        let response: TurnResponse =
            serde_json::from_str(r#"{"board": [["X","",""],["","",""],["","",""]]}"#).unwrap();

        assert_eq!(response.board[0][0], Mark::X);
        assert_eq!(response.winner, None);
        assert!(!response.is_draw);
        assert_eq!(response.next_player, None);
    }

    #[test]
    fn turn_response_reads_winner_and_null() {
        let response: TurnResponse = serde_json::from_value(json!({
            "board": [["X","X","X"],["O","O",""],["","",""]],
            "winner": "X",
            "is_draw": false,
            "next_player": null,
        }))
        .unwrap();

        assert_eq!(response.winner, Some(Mark::X));
        assert_eq!(response.next_player, None);
    }

    #[test]
    fn path_response_defaults() {
        let bare: PathResponse<JugLevels> = serde_json::from_str("{}").unwrap();
        assert!(!bare.success);
        assert!(bare.path.is_empty());

        let pathless: PathResponse<JugLevels> =
            serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(pathless.success);
        assert!(pathless.path.is_empty());

        let full: PathResponse<JugLevels> =
            serde_json::from_str(r#"{"success": true, "path": [[0,0],[4,0],[1,3]]}"#).unwrap();
        assert_eq!(full.path, vec![(0, 0), (4, 0), (1, 3)]);
    }

    #[test]
    fn tile_grids_decode_from_nested_arrays() {
        let response: PathResponse<TileGrid> = serde_json::from_value(json!({
            "success": true,
            "path": [[[1,2,3],[4,5,6],[7,8,0]]],
        }))
        .unwrap();

        assert_eq!(response.path, vec![[[1, 2, 3], [4, 5, 6], [7, 8, 0]]]);
    }

    #[test]
    fn proof_response_without_explanation() {
        let response: ProofResponse =
            serde_json::from_str(r#"{"success": false, "error": "could not unify goal"}"#).unwrap();

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("could not unify goal"));
        assert!(response.explanation.is_empty());
    }

    #[test]
    fn error_body_decodes() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "No path found"}"#).unwrap();
        assert_eq!(body.error, "No path found");
    }

    #[test]
    fn complete_tile_set_checks_the_multiset() {
        assert!(complete_tile_set(&[[1, 2, 3], [4, 5, 6], [7, 8, 0]]));
        assert!(!complete_tile_set(&[[1, 1, 3], [4, 5, 6], [7, 8, 0]]));
        assert!(!complete_tile_set(&[[9, 2, 3], [4, 5, 6], [7, 8, 0]]));
    }

    #[test]
    fn within_capacities_compares_per_jug() {
        assert!(within_capacities((3, 2), (4, 3)));
        assert!(within_capacities((4, 3), (4, 3)));
        assert!(!within_capacities((5, 0), (4, 3)));
        assert!(!within_capacities((0, 4), (4, 3)));
    }
}
