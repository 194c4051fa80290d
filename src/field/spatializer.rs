use std::collections::HashMap;

use crate::core::gain::distance_to_gain;
use crate::core::point::Point3;
use crate::field::graph::SpeakerGraph;

/// Per-sound gain factors keyed by speaker index. Speakers absent from a
/// map are silent for that sound.
pub type SpeakerMap = HashMap<u32, f32>;

/// Default maximum spatialization distance; sounds at or past it are
/// silenced.
pub const DEFAULT_MAX_DISTANCE: f32 = 10.0;

/// Turns a point in space into a gain for every speaker in a graph via a
/// distance-decay law. `max_distance` is the one mutable tunable; reads
/// always see the current value.
#[derive(Clone, Copy, Debug)]
pub struct Spatializer {
    max_distance: f32,
}

impl Spatializer {
    pub fn new(max_distance: f32) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn set_max_distance(&mut self, max_distance: f32) {
        self.max_distance = max_distance;
    }

    /// Gain factor for every speaker in `graph` for a point sound at
    /// `point`.
    pub fn gain_map(&self, point: Point3, graph: &SpeakerGraph) -> SpeakerMap {
        graph
            .speakers()
            .map(|speaker| {
                let d = point.distance(speaker.position());
                (speaker.index(), distance_to_gain(d, self.max_distance))
            })
            .collect()
    }
}

impl Default for Spatializer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE)
    }
}
