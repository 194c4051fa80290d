use std::collections::HashMap;

use rand::Rng;

use crate::core::point::Point3;
use crate::field::error::FieldError;
use crate::field::speaker::{DEFAULT_LAYER, Link, Speaker};

/// Staged description of one speaker: links are target indices per layer,
/// resolved only at `build` time.
#[derive(Clone, Debug)]
struct RawSpeaker {
    index: u32,
    position: Point3,
    links: Vec<(String, Vec<u32>)>,
}

/// Two-phase builder for a `SpeakerGraph`. Speakers are staged in any
/// order; `build` creates every node first, then resolves links, so a
/// speaker may link forward to one staged later.
#[derive(Default)]
pub struct GraphBuilder {
    staged: Vec<RawSpeaker>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a speaker with links on the default layer.
    pub fn speaker(&mut self, index: u32, position: Point3, links: &[u32]) -> &mut Self {
        self.speaker_layered(index, position, vec![(DEFAULT_LAYER.to_string(), links.to_vec())])
    }

    /// Stages a speaker with explicit per-layer links.
    pub fn speaker_layered(
        &mut self,
        index: u32,
        position: Point3,
        links: Vec<(String, Vec<u32>)>,
    ) -> &mut Self {
        self.staged.push(RawSpeaker {
            index,
            position,
            links,
        });
        self
    }

    /// Resolves the staged set into a graph. Fails on the first link whose
    /// target index is absent; nothing is returned from a failed build.
    pub fn build(&self) -> Result<SpeakerGraph, FieldError> {
        // Re-staging an index replaces the earlier entry, links included.
        let mut latest: HashMap<u32, &RawSpeaker> = HashMap::new();
        for raw in &self.staged {
            latest.insert(raw.index, raw);
        }

        let mut speakers: HashMap<u32, Speaker> = latest
            .values()
            .map(|raw| (raw.index, Speaker::new(raw.index, raw.position)))
            .collect();

        for raw in latest.values() {
            for (layer, targets) in &raw.links {
                for &target in targets {
                    if !speakers.contains_key(&target) {
                        return Err(FieldError::DanglingLink {
                            from: raw.index,
                            to: target,
                        });
                    }
                    if let Some(speaker) = speakers.get_mut(&raw.index) {
                        speaker.link_to(target, layer);
                    }
                }
            }
        }

        Ok(SpeakerGraph { speakers })
    }

    pub fn clear(&mut self) {
        self.staged.clear();
    }
}

/// An immutable set of linked speakers. Construction via `GraphBuilder` is
/// the only write path; changing the layout means building a new graph and
/// discarding sounds that referenced the old one.
#[derive(Clone, Debug, Default)]
pub struct SpeakerGraph {
    speakers: HashMap<u32, Speaker>,
}

impl SpeakerGraph {
    pub fn get(&self, index: u32) -> Option<&Speaker> {
        self.speakers.get(&index)
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    pub fn speakers(&self) -> impl Iterator<Item = &Speaker> {
        self.speakers.values()
    }

    /// Outgoing links of `index` on `layer`, empty if either is unknown.
    pub fn links_of(&self, index: u32, layer: &str) -> &[Link] {
        self.get(index).map(|s| s.links_of(layer)).unwrap_or(&[])
    }

    /// Uniform-random neighbor of `index` on `layer`.
    pub fn random_neighbor<R: Rng + ?Sized>(
        &self,
        index: u32,
        layer: &str,
        rng: &mut R,
    ) -> Option<u32> {
        self.get(index)
            .and_then(|s| s.random_linked(layer, rng))
    }
}
