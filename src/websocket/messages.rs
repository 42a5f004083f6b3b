use serde::{Deserialize, Serialize};

use crate::{game::PuzzleSession, models::Grid};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Establish or change the puzzle parameters
    SetParams {
        height: usize,
        width: usize,
        #[serde(default)]
        words: Vec<String>,
    },
    /// Regenerate with the current parameters
    Refresh,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Puzzle {
        height: usize,
        width: usize,
        grid: Grid,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn puzzle(session: &PuzzleSession) -> Self {
        ServerMessage::Puzzle {
            height: session.params().height,
            width: session.params().width,
            grid: session.grid().clone(),
        }
    }
}
