use crate::core::clock::Millis;
use crate::core::point::Point3;
use crate::field::sound::{Sound, TickCtx};
use crate::field::spatializer::SpeakerMap;

/// A sound sweeping along a straight line in free space, ignoring graph
/// links. Every speaker in the graph gets a spatialized gain each tick;
/// the sound dies when it reaches the end point.
pub struct SweepSound {
    id: String,
    start_point: Point3,
    travel_vector: Point3,
    start_ms: Millis,
    travel_ms: Millis,
    current_position: Point3,
    map: SpeakerMap,
}

impl SweepSound {
    pub fn new(
        id: &str,
        start_point: Point3,
        end_point: Point3,
        travel_ms: Millis,
        now_ms: Millis,
    ) -> Self {
        Self {
            id: id.to_string(),
            start_point,
            travel_vector: end_point - start_point,
            start_ms: now_ms,
            travel_ms,
            current_position: start_point,
            map: SpeakerMap::new(),
        }
    }
}

impl Sound for SweepSound {
    fn act(&mut self, ctx: &mut TickCtx) -> bool {
        let elapsed = ctx.now_ms.saturating_sub(self.start_ms);
        let progress = if self.travel_ms == 0 {
            1.0
        } else {
            elapsed as f32 / self.travel_ms as f32
        };

        if progress >= 1.0 {
            return false;
        }

        self.current_position = self.start_point + self.travel_vector * progress;
        self.map = ctx.spatializer.gain_map(self.current_position, ctx.graph);
        true
    }

    fn speaker_map(&self) -> &SpeakerMap {
        &self.map
    }

    fn id(&self) -> &str {
        &self.id
    }
}
