//! Prelude module for common neighborhood-map types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use neighborhood_map::prelude::*;`

pub use crate::core::{
    config::{AppConfig, FetchConfig, MapOptions, NeighborhoodConfig, PlaceSeed},
    geo::LatLng,
    neighborhood::{Neighborhood, Place},
    observable::{Observable, SubscriptionId},
};

pub use crate::content::{
    fetcher::ContentFetcher,
    source::{parse_opensearch, ContentSource, WikipediaSource},
};

pub use crate::layers::{
    marker::MarkerRecord, projector::FilterProjector, registry::MarkerRegistry,
};

pub use crate::input::events::{EventHandled, UiEvent};

pub use crate::ui::{
    headless::HeadlessSurface,
    popup::{escape_html, render_infobox},
    surface::MapSurface,
};

pub use crate::runtime::{spawners::manual::ManualRuntime, LocalRuntime};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::spawners::tokio_impl::TokioRuntime;

pub use crate::viewmodel::ViewModel;

pub use crate::{Error as MapError, Result};

pub use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    time::Duration,
};

pub use futures::future::LocalBoxFuture;
