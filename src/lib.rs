//! `skyview` weather dashboard backend.
//!
//! Modules follow the Explicit Module Boundary Pattern (EMBP): siblings
//! import each other only through the re-exports below, never by reaching
//! into another module's internals.

pub mod aggregator;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod transform;

pub use aggregator::{Aggregator, Location, LocationQuery};
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::WeatherError;
pub use models::{CombinedDocument, Conditions};
pub use routes::{router, AppState};
pub use session::{LatestView, Ticket};
