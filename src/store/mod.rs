//! Context-provided client state stores.

mod graph;
mod projects;

pub use graph::GraphStore;
pub use projects::ProjectStore;
