// Layers, top to bottom:
//   cli → application → domain ← data / ml / infra

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
