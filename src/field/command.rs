use serde::{Deserialize, Serialize};

/// Structured registration and control commands, the shape a host feeds
/// the field. Points arrive as raw coordinate lists and are validated as
/// 3D on apply, so a malformed command is the sender's error rather than
/// a silent fallback.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    TransectSound {
        id: String,
        initial_speaker: u32,
        #[serde(default)]
        lifespan_ms: Option<u64>,
    },
    DirectedTransectSound {
        id: String,
        initial_speaker: u32,
        /// Fixed goal point; takes precedence over `goal_speaker`.
        #[serde(default)]
        goal_point: Option<Vec<f32>>,
        /// Goal taken from this speaker's position at registration time.
        #[serde(default)]
        goal_speaker: Option<u32>,
        #[serde(default)]
        lifespan_ms: Option<u64>,
    },
    SweepSound {
        id: String,
        start: Vec<f32>,
        end: Vec<f32>,
        travel_ms: u64,
    },
    KillSound {
        id: String,
    },
    SetMaxDistance {
        max_distance: f32,
    },
}
