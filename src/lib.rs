//! Text statistics, keyword heuristics and the client side of the
//! AuthorCheck analysis gateway.

pub mod analysis;
pub mod client;
pub mod config;
pub mod heuristics;
pub mod render;
pub mod stats;
pub mod wire;
