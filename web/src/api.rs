use gloo::net::http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use searchlab_protocol::ErrorBody;

/// Routes of the solver service. The jug field spelling differs between the
/// hill and A* routes; the request types in `searchlab_protocol` carry that.
pub(crate) mod routes {
    pub const TSP: &str = "/api/tsp";
    pub const TICTACTOE_MOVE: &str = "/api/tictactoe/move";
    pub const TICTACTOE_VS_COMPUTER: &str = "/api/tictactoe/vs-computer";
    pub const WATER_JUG_HILL: &str = "/api/water-jug-hill";
    pub const EIGHT_PUZZLE_GBFS: &str = "/api/eight-puzzle-gbfs";
    pub const EIGHT_PUZZLE_ASTAR: &str = "/api/eight-puzzle-astar";
    pub const WATER_JUG_ASTAR: &str = "/api/water-jug-astar";
    pub const CUSTOM_LOGIC: &str = "/api/custom-logic";
}

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum FetchError {
    #[error("Could not reach the solver service")]
    Network,
    #[error("{0}")]
    Rejected(String),
    #[error("Solver service replied with status {0}")]
    Status(u16),
    #[error("Could not decode the solver reply")]
    Decode,
}

impl From<gloo::net::Error> for FetchError {
    fn from(err: gloo::net::Error) -> Self {
        match err {
            gloo::net::Error::SerdeError(_) => Self::Decode,
            _ => Self::Network,
        }
    }
}

/// POSTs `body` as JSON and decodes the reply. Non-2xx replies prefer the
/// service's own `{error}` body over the bare status code.
pub(crate) async fn post_json<B, T>(base: &str, route: &str, body: &B) -> Result<T, FetchError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = format!("{}{}", base, route);
    log::debug!("POST {}", url);

    let response = Request::post(&url).json(body)?.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !(200..300).contains(&status) {
        log::debug!("{} replied {}: {}", route, status, text);
        if let Ok(reply) = serde_json::from_str::<ErrorBody>(&text) {
            return Err(FetchError::Rejected(reply.error));
        }
        return Err(FetchError::Status(status));
    }

    serde_json::from_str(&text).map_err(|_| FetchError::Decode)
}
