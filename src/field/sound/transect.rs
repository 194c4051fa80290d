use tracing::debug;

use crate::core::clock::Millis;
use crate::core::point::Point3;
use crate::field::sound::{Sound, TickCtx};
use crate::field::spatializer::SpeakerMap;
use crate::field::speaker::DEFAULT_LAYER;

/// How a transect sound picks its next speaker when a hop completes.
#[derive(Clone, Copy, Debug)]
pub enum DestinationPolicy {
    /// Uniform-random walk over the current speaker's outgoing links.
    Random,
    /// Always hop to the neighbor strictly closest to a fixed goal point;
    /// stalls in place once no neighbor improves on the current speaker.
    Directed { goal: Point3 },
}

/// A sound hopping speaker to speaker along graph links, crossfading
/// between the momentary source and destination. Travel duration scales
/// with the distance between the two speakers, and progress is driven by
/// elapsed wall-clock time since the hop started.
pub struct TransectSound {
    id: String,
    lifespan_ms: Option<Millis>,
    birth_ms: Millis,

    src: u32,
    dst: u32,
    start_ms: Millis,
    travel_ms: Millis,
    progress: f32,

    policy: DestinationPolicy,
    map: SpeakerMap,
}

impl TransectSound {
    /// `lifespan_ms` of `None` means the sound never expires on its own.
    /// Starting with `progress = 1` forces a destination choice on the
    /// first `act`.
    pub fn new(
        id: &str,
        initial_speaker: u32,
        lifespan_ms: Option<Millis>,
        policy: DestinationPolicy,
        now_ms: Millis,
    ) -> Self {
        Self {
            id: id.to_string(),
            lifespan_ms,
            birth_ms: now_ms,
            src: initial_speaker,
            dst: initial_speaker,
            start_ms: now_ms,
            travel_ms: 0,
            progress: 1.0,
            policy,
            map: SpeakerMap::new(),
        }
    }

    fn choose_destination(&self, ctx: &mut TickCtx, layer: &str) -> u32 {
        match self.policy {
            // Falls back to staying put when the layer has no links.
            DestinationPolicy::Random => ctx
                .graph
                .random_neighbor(self.src, layer, ctx.rng)
                .unwrap_or(self.src),
            DestinationPolicy::Directed { goal } => {
                let Some(current) = ctx.graph.get(self.src) else {
                    return self.src;
                };
                let mut best = self.src;
                let mut best_dist = current.position().distance(goal);
                for link in ctx.graph.links_of(self.src, layer) {
                    if let Some(candidate) = ctx.graph.get(link.destination) {
                        let d = candidate.position().distance(goal);
                        // Strictly closer only, so ties keep the earliest
                        // link and a satisfied goal stalls the walk.
                        if d < best_dist {
                            best = link.destination;
                            best_dist = d;
                        }
                    }
                }
                best
            }
        }
    }

    fn hop_distance(&self, ctx: &TickCtx) -> f32 {
        match (ctx.graph.get(self.src), ctx.graph.get(self.dst)) {
            (Some(a), Some(b)) => a.position().distance(b.position()),
            _ => 0.0,
        }
    }
}

impl Sound for TransectSound {
    fn act(&mut self, ctx: &mut TickCtx) -> bool {
        let age = ctx.now_ms.saturating_sub(self.birth_ms);
        if let Some(lifespan) = self.lifespan_ms {
            if age > lifespan {
                return false;
            }
        }

        if self.progress >= 1.0 {
            self.src = self.dst;
            self.dst = self.choose_destination(ctx, DEFAULT_LAYER);
            self.travel_ms =
                (self.hop_distance(ctx) * ctx.distance_to_time_ratio) as Millis;
            self.start_ms = ctx.now_ms;
            self.progress = 0.0;
            debug!(
                id = %self.id,
                from = self.src,
                to = self.dst,
                travel_ms = self.travel_ms,
                "transect hop"
            );
        }

        // Zero-duration hops (stall, coincident speakers) complete
        // instantly instead of dividing by zero. Progress may overshoot
        // 1.0 between ticks; the next act catches it above.
        self.progress = if self.travel_ms == 0 {
            1.0
        } else {
            ctx.now_ms.saturating_sub(self.start_ms) as f32 / self.travel_ms as f32
        };

        self.map.clear();
        self.map.insert(self.src, 1.0 - self.progress);
        self.map.insert(self.dst, self.progress);
        true
    }

    fn speaker_map(&self) -> &SpeakerMap {
        &self.map
    }

    fn id(&self) -> &str {
        &self.id
    }
}
