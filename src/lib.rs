//! # Neighborhood Map
//!
//! The synchronization core of a small single-page map: a fixed set of
//! places rendered as markers, a free-text filter that shows and hides them,
//! and a lazily fetched description shown in one popup at a time.
//!
//! The map widget, the description service and the input surface are
//! external collaborators reached through traits
//! ([`MapSurface`](ui::surface::MapSurface),
//! [`ContentSource`](content::source::ContentSource),
//! [`UiEvent`](input::events::UiEvent)), so the core has no dependency on any
//! rendering technology.

pub mod content;
pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod runtime;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod ui;
pub mod viewmodel;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{AppConfig, FetchConfig, MapOptions, NeighborhoodConfig, PlaceSeed},
    geo::LatLng,
    neighborhood::{Neighborhood, Place},
    observable::Observable,
};

pub use content::{
    fetcher::ContentFetcher,
    source::{ContentSource, WikipediaSource},
};

pub use layers::{marker::MarkerRecord, projector::FilterProjector, registry::MarkerRegistry};

pub use input::events::{EventHandled, UiEvent};

pub use ui::{headless::HeadlessSurface, surface::MapSurface};

pub use runtime::LocalRuntime;

pub use viewmodel::ViewModel;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No marker at index {0}")]
    UnknownMarker(usize),

    #[error("Failed to spawn task: {0}")]
    Spawn(String),
}

/// Error type alias for convenience
pub type Error = MapError;
