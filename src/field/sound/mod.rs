use rand::rngs::SmallRng;

use crate::core::clock::Millis;
use crate::field::graph::SpeakerGraph;
use crate::field::spatializer::{SpeakerMap, Spatializer};

mod sweep;
mod transect;

pub use sweep::SweepSound;
pub use transect::{DestinationPolicy, TransectSound};

/// Status emitted when a sound leaves the field, whether by expiry or by
/// an explicit kill.
pub const KILL_STATUS: &str = "killed";

/// The `(id, "killed")` notice shape the host forwards downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KillNotice {
    pub id: String,
    pub status: &'static str,
}

impl KillNotice {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            status: KILL_STATUS,
        }
    }
}

/// Everything a sound may touch during one tick. The clock is read once
/// per tick by the field and handed down here.
pub struct TickCtx<'a> {
    pub now_ms: Millis,
    pub graph: &'a SpeakerGraph,
    pub spatializer: &'a Spatializer,
    /// Milliseconds of travel per unit of speaker distance.
    pub distance_to_time_ratio: f32,
    pub rng: &'a mut SmallRng,
}

/// A live sound source. One `act` per external tick; returning `false`
/// reports death, after which the field removes the sound and emits its
/// kill notice.
pub trait Sound {
    fn act(&mut self, ctx: &mut TickCtx) -> bool;

    /// The speaker→gain map computed by the most recent `act`.
    fn speaker_map(&self) -> &SpeakerMap;

    fn id(&self) -> &str;

    fn kill_notice(&self) -> KillNotice {
        KillNotice::new(self.id())
    }
}
