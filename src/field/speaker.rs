use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::core::point::Point3;

/// Link layer used when a sound does not name one.
pub const DEFAULT_LAYER: &str = "--default";

/// A directed edge between two speakers, owned by its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub source: u32,
    pub destination: u32,
}

/// A fixed output channel at a point in 3D space, holding named layers of
/// directed links to other speakers. Identity is immutable once built.
#[derive(Clone, Debug)]
pub struct Speaker {
    index: u32,
    position: Point3,
    // Per-layer adjacency; vectors keep link insertion order so goal
    // seeking has a stable tie-break.
    links: HashMap<String, Vec<Link>>,
}

impl Speaker {
    pub(crate) fn new(index: u32, position: Point3) -> Self {
        Self {
            index,
            position,
            links: HashMap::new(),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub(crate) fn link_to(&mut self, destination: u32, layer: &str) {
        self.links
            .entry(layer.to_string())
            .or_default()
            .push(Link {
                source: self.index,
                destination,
            });
    }

    /// Outgoing links on `layer`, in insertion order. Empty if the layer
    /// does not exist.
    pub fn links_of(&self, layer: &str) -> &[Link] {
        self.links.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Uniform-random linked speaker on `layer`, or `None` if the layer
    /// has no outgoing links.
    pub fn random_linked<R: Rng + ?Sized>(&self, layer: &str, rng: &mut R) -> Option<u32> {
        self.links_of(layer).choose(rng).map(|link| link.destination)
    }
}

impl PartialEq for Speaker {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.position == other.position
    }
}

impl Eq for Speaker {}

impl Hash for Speaker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Indices do not overlap within a graph.
        self.index.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn links_keep_insertion_order() {
        let mut s = Speaker::new(0, Point3::new(0.0, 0.0, 0.0));
        s.link_to(3, DEFAULT_LAYER);
        s.link_to(1, DEFAULT_LAYER);
        s.link_to(2, DEFAULT_LAYER);
        let targets: Vec<u32> = s
            .links_of(DEFAULT_LAYER)
            .iter()
            .map(|l| l.destination)
            .collect();
        assert_eq!(targets, vec![3, 1, 2]);
    }

    #[test]
    fn missing_layer_is_empty_not_error() {
        let s = Speaker::new(0, Point3::new(0.0, 0.0, 0.0));
        assert!(s.links_of("no-such-layer").is_empty());
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(s.random_linked("no-such-layer", &mut rng), None);
    }

    #[test]
    fn equality_needs_index_and_position() {
        let a = Speaker::new(1, Point3::new(0.0, 0.0, 0.0));
        let b = Speaker::new(1, Point3::new(0.0, 0.0, 0.0));
        let c = Speaker::new(1, Point3::new(1.0, 0.0, 0.0));
        let d = Speaker::new(2, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
