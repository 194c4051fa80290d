use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::point::Point3;
use crate::field::command::Command;
use crate::field::error::FieldError;
use crate::field::graph::{GraphBuilder, SpeakerGraph};
use crate::field::registry::FieldParams;
use crate::field::speaker::DEFAULT_LAYER;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerConfig {
    pub index: u32,
    pub position: [f32; 3],
    /// Link targets on the default layer.
    #[serde(default)]
    pub links: Vec<u32>,
    /// Link targets on named layers.
    #[serde(default)]
    pub layers: BTreeMap<String, Vec<u32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "FieldConfig::default_max_distance")]
    pub max_distance: f32,
    #[serde(default = "FieldConfig::default_distance_to_time_ratio")]
    pub distance_to_time_ratio: f32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub speakers: Vec<SpeakerConfig>,
    /// Commands applied once at startup by the demo binary.
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl FieldConfig {
    fn default_max_distance() -> f32 {
        10.0
    }

    fn default_distance_to_time_ratio() -> f32 {
        100.0
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        if let Ok(text) = toml::to_string_pretty(&default_cfg) {
            if let Err(err) = fs::write(path_obj, text) {
                eprintln!("Failed to write default config {path}: {err}.");
            }
        }
        default_cfg
    }

    pub fn build_graph(&self) -> Result<SpeakerGraph, FieldError> {
        let mut builder = GraphBuilder::new();
        for sp in &self.speakers {
            let mut layers: Vec<(String, Vec<u32>)> = Vec::new();
            if !sp.links.is_empty() {
                layers.push((DEFAULT_LAYER.to_string(), sp.links.clone()));
            }
            for (name, targets) in &sp.layers {
                layers.push((name.clone(), targets.clone()));
            }
            builder.speaker_layered(
                sp.index,
                Point3::new(sp.position[0], sp.position[1], sp.position[2]),
                layers,
            );
        }
        builder.build()
    }

    pub fn params(&self) -> FieldParams {
        FieldParams {
            max_distance: self.max_distance,
            distance_to_time_ratio: self.distance_to_time_ratio,
            seed: self.seed,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_distance: Self::default_max_distance(),
            distance_to_time_ratio: Self::default_distance_to_time_ratio(),
            seed: 0,
            speakers: Vec::new(),
            commands: Vec::new(),
        }
    }
}
