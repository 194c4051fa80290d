pub mod command;
pub mod error;
pub mod graph;
pub mod registry;
pub mod sound;
pub mod spatializer;
pub mod speaker;
