use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::core::clock::{Clock, Millis, SystemClock};
use crate::core::point::Point3;
use crate::field::command::Command;
use crate::field::error::FieldError;
use crate::field::graph::SpeakerGraph;
use crate::field::sound::{
    DestinationPolicy, KillNotice, Sound, SweepSound, TickCtx, TransectSound,
};
use crate::field::spatializer::{DEFAULT_MAX_DISTANCE, Spatializer};

/// Where a directed transect is headed: a fixed point, or a speaker whose
/// position is captured once at registration.
#[derive(Clone, Copy, Debug)]
pub enum Goal {
    Point(Point3),
    Speaker(u32),
}

/// Field-wide tunables shared by every sound.
#[derive(Clone, Copy, Debug)]
pub struct FieldParams {
    pub max_distance: f32,
    /// Milliseconds of hop travel per unit of speaker distance.
    pub distance_to_time_ratio: f32,
    pub seed: u64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            distance_to_time_ratio: 100.0,
            seed: rand::rng().random(),
        }
    }
}

/// One complete snapshot of the field, bracketed by `Begin`/`Done` so a
/// consumer can tell a full report apart from one cut short.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportEvent {
    Begin,
    Sound { id: String, gains: Vec<(u32, f32)> },
    Done,
}

/// Owns the live sounds and the shared graph, spatializer and clock.
/// Single-threaded and tick-driven: the host calls `advance` then
/// `report` once per tick; registration and kills land between pairs.
pub struct SoundField {
    graph: SpeakerGraph,
    spatializer: Spatializer,
    distance_to_time_ratio: f32,
    sounds: HashMap<String, Box<dyn Sound>>,
    clock: Box<dyn Clock>,
    rng: SmallRng,
}

impl SoundField {
    pub fn new(graph: SpeakerGraph, params: FieldParams) -> Self {
        Self::with_clock(graph, params, Box::new(SystemClock::new()))
    }

    pub fn with_clock(graph: SpeakerGraph, params: FieldParams, clock: Box<dyn Clock>) -> Self {
        Self {
            graph,
            spatializer: Spatializer::new(params.max_distance),
            distance_to_time_ratio: params.distance_to_time_ratio,
            sounds: HashMap::new(),
            clock,
            rng: SmallRng::seed_from_u64(params.seed),
        }
    }

    pub fn graph(&self) -> &SpeakerGraph {
        &self.graph
    }

    pub fn max_distance(&self) -> f32 {
        self.spatializer.max_distance()
    }

    pub fn set_max_distance(&mut self, max_distance: f32) {
        self.spatializer.set_max_distance(max_distance);
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sounds.contains_key(id)
    }

    /// Starts a random-walk transect sound at `initial_speaker`.
    pub fn transect_sound(
        &mut self,
        id: &str,
        initial_speaker: u32,
        lifespan_ms: Option<Millis>,
    ) -> Result<(), FieldError> {
        self.start_transect(id, initial_speaker, lifespan_ms, DestinationPolicy::Random)
    }

    /// Starts a goal-seeking transect sound. A `Goal::Speaker` is resolved
    /// to that speaker's position now, not re-read later.
    pub fn directed_transect_sound(
        &mut self,
        id: &str,
        goal: Goal,
        initial_speaker: u32,
        lifespan_ms: Option<Millis>,
    ) -> Result<(), FieldError> {
        let goal_point = match goal {
            Goal::Point(p) => p,
            Goal::Speaker(index) => match self.graph.get(index) {
                Some(speaker) => speaker.position(),
                None => {
                    warn!(id, index, "invalid goal speaker for directed transect sound");
                    return Err(FieldError::UnknownSpeaker(index));
                }
            },
        };
        self.start_transect(
            id,
            initial_speaker,
            lifespan_ms,
            DestinationPolicy::Directed { goal: goal_point },
        )
    }

    fn start_transect(
        &mut self,
        id: &str,
        initial_speaker: u32,
        lifespan_ms: Option<Millis>,
        policy: DestinationPolicy,
    ) -> Result<(), FieldError> {
        self.check_id(id)?;
        if self.graph.get(initial_speaker).is_none() {
            warn!(id, index = initial_speaker, "invalid initial speaker for transect sound");
            return Err(FieldError::UnknownSpeaker(initial_speaker));
        }
        let now = self.clock.now_ms();
        let sound = TransectSound::new(id, initial_speaker, lifespan_ms, policy, now);
        self.sounds.insert(id.to_string(), Box::new(sound));
        Ok(())
    }

    /// Starts a free-space sweep from `start` to `end` over `travel_ms`.
    pub fn sweep_sound(
        &mut self,
        id: &str,
        start: Point3,
        end: Point3,
        travel_ms: Millis,
    ) -> Result<(), FieldError> {
        self.check_id(id)?;
        let now = self.clock.now_ms();
        let sound = SweepSound::new(id, start, end, travel_ms, now);
        self.sounds.insert(id.to_string(), Box::new(sound));
        Ok(())
    }

    fn check_id(&self, id: &str) -> Result<(), FieldError> {
        if self.sounds.contains_key(id) {
            return Err(FieldError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    /// Applies one host command. Kill notices, when the command produces
    /// one, are returned so the host can forward them.
    pub fn apply(&mut self, cmd: Command) -> Result<Option<KillNotice>, FieldError> {
        match cmd {
            Command::TransectSound {
                id,
                initial_speaker,
                lifespan_ms,
            } => {
                self.transect_sound(&id, initial_speaker, lifespan_ms)?;
                Ok(None)
            }
            Command::DirectedTransectSound {
                id,
                initial_speaker,
                goal_point,
                goal_speaker,
                lifespan_ms,
            } => {
                let goal = match (goal_point, goal_speaker) {
                    (Some(coords), _) => Goal::Point(
                        Point3::from_slice(&coords)
                            .ok_or(FieldError::InvalidDimension { got: coords.len() })?,
                    ),
                    (None, Some(index)) => Goal::Speaker(index),
                    (None, None) => return Err(FieldError::InvalidDimension { got: 0 }),
                };
                self.directed_transect_sound(&id, goal, initial_speaker, lifespan_ms)?;
                Ok(None)
            }
            Command::SweepSound {
                id,
                start,
                end,
                travel_ms,
            } => {
                let start = Point3::from_slice(&start)
                    .ok_or(FieldError::InvalidDimension { got: start.len() })?;
                let end = Point3::from_slice(&end)
                    .ok_or(FieldError::InvalidDimension { got: end.len() })?;
                self.sweep_sound(&id, start, end, travel_ms)?;
                Ok(None)
            }
            Command::KillSound { id } => Ok(self.kill_sound(&id)),
            Command::SetMaxDistance { max_distance } => {
                self.set_max_distance(max_distance);
                Ok(None)
            }
        }
    }

    /// One tick: every live sound acts against the same clock reading,
    /// then the dead are removed. Removal happens only after the full
    /// pass, never mid-iteration.
    pub fn advance(&mut self) -> Vec<KillNotice> {
        let now = self.clock.now_ms();
        let mut expired: Vec<String> = Vec::new();

        let mut ctx = TickCtx {
            now_ms: now,
            graph: &self.graph,
            spatializer: &self.spatializer,
            distance_to_time_ratio: self.distance_to_time_ratio,
            rng: &mut self.rng,
        };
        for (id, sound) in self.sounds.iter_mut() {
            if !sound.act(&mut ctx) {
                expired.push(id.clone());
            }
        }

        let mut notices = Vec::with_capacity(expired.len());
        for id in expired {
            if let Some(sound) = self.sounds.remove(&id) {
                debug!(id = %id, "sound expired");
                notices.push(sound.kill_notice());
            }
        }
        notices
    }

    /// Forced removal, independent of `advance`. Unknown ids are a logged
    /// no-op.
    pub fn kill_sound(&mut self, id: &str) -> Option<KillNotice> {
        match self.sounds.remove(id) {
            Some(sound) => {
                debug!(id, "sound killed");
                Some(sound.kill_notice())
            }
            None => {
                warn!(id, "kill requested for unknown sound");
                None
            }
        }
    }

    /// A complete, bracketed snapshot: `Begin`, one entry per live sound
    /// (sounds by id, gains by speaker index), `Done`. The brackets are
    /// present even with zero live sounds.
    pub fn report(&self) -> Vec<ReportEvent> {
        let mut events = Vec::with_capacity(self.sounds.len() + 2);
        events.push(ReportEvent::Begin);

        let mut ids: Vec<&String> = self.sounds.keys().collect();
        ids.sort();
        for id in ids {
            let sound = &self.sounds[id];
            let mut gains: Vec<(u32, f32)> = sound
                .speaker_map()
                .iter()
                .map(|(&index, &gain)| (index, gain))
                .collect();
            gains.sort_by_key(|&(index, _)| index);
            events.push(ReportEvent::Sound {
                id: id.clone(),
                gains,
            });
        }

        events.push(ReportEvent::Done);
        events
    }

    /// Kills every live sound and swaps in a freshly built graph. Prior
    /// speaker references are invalid afterward.
    pub fn reset(&mut self, graph: SpeakerGraph) {
        self.sounds.clear();
        self.graph = graph;
    }
}
