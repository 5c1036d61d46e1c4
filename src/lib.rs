//! macro-charts: equilibrium solvers and annotated chart scenes for
//! introductory macroeconomics models.
//!
//! Models (Solow, AD/AS, saving-investment, the cumulative MP/IS/AD/Phillips/
//! Okun chain) live in [`models`]; [`status`] classifies equilibria against
//! the visible axis bounds; [`api`] wires both into screens that build
//! backend-agnostic [`render::RenderFrame`]s.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod models;
pub mod render;
pub mod status;
pub mod telemetry;

pub use api::{
    AdasScreen, CumulativeScreen, GrapherConfig, Screen, SiScreen, SnapshotContract, SolowScreen,
};
pub use error::{GraphError, GraphResult};
