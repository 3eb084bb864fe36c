// Service module exports

pub mod contrast;
pub mod engine;
pub mod grid;
pub mod normalizer;
pub mod packing;
pub mod refresh;
pub mod render;
pub mod settings;
pub mod time_format;
