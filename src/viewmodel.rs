//! The application context: owns the session's neighborhood, fetcher, marker
//! registry and filter projector, and routes input events to them.

use crate::{
    content::{fetcher::ContentFetcher, source::ContentSource},
    core::{config::AppConfig, neighborhood::Neighborhood},
    input::events::{EventHandled, UiEvent},
    layers::{projector::FilterProjector, registry::MarkerRegistry},
    runtime::LocalRuntime,
    ui::surface::MapSurface,
    MapError, Result,
};
use std::cell::RefCell;
use std::rc::Rc;

pub struct ViewModel<S: MapSurface + 'static> {
    neighborhood: Neighborhood,
    fetcher: Rc<ContentFetcher>,
    registry: Rc<MarkerRegistry<S>>,
    _projector: FilterProjector,
    surface: Rc<RefCell<S>>,
}

impl<S: MapSurface + 'static> ViewModel<S> {
    /// Builds the session: places from `config`, markers and popups on
    /// `surface`, and the initial marker visibility.
    pub fn new(
        config: &AppConfig,
        surface: Rc<RefCell<S>>,
        source: Rc<dyn ContentSource>,
        runtime: Rc<dyn LocalRuntime>,
    ) -> Result<Self> {
        config.validate()?;

        let neighborhood = Neighborhood::new(&config.neighborhood);
        let fetcher = Rc::new(ContentFetcher::new(source, runtime, &config.fetch));
        let registry = Rc::new(MarkerRegistry::init(
            surface.clone(),
            &neighborhood,
            &config.map,
            &config.fetch.loading_html,
            fetcher.clone(),
        ));
        let projector = FilterProjector::install(&neighborhood, &registry);

        log::info!(
            "neighborhood ready with {} places around {}",
            neighborhood.len(),
            neighborhood.location()
        );

        Ok(Self {
            neighborhood,
            fetcher,
            registry,
            _projector: projector,
            surface,
        })
    }

    /// Translates an input-surface event into core calls
    pub fn handle_event(&self, event: UiEvent) -> Result<EventHandled> {
        match event {
            UiEvent::FilterInput { text } => Ok(if self.set_filter(text) {
                EventHandled::Handled
            } else {
                EventHandled::NotHandled
            }),
            UiEvent::MarkerClicked { index } => {
                self.click_marker(index)?;
                Ok(EventHandled::Handled)
            }
        }
    }

    pub fn filter(&self) -> String {
        self.neighborhood.filter().get()
    }

    /// Returns whether the filter changed
    pub fn set_filter(&self, text: impl Into<String>) -> bool {
        self.neighborhood.set_filter(text)
    }

    pub fn click_marker(&self, index: usize) -> Result<()> {
        let place = self
            .neighborhood
            .place(index)
            .ok_or(MapError::UnknownMarker(index))?;
        self.registry.open_popup(place, index)
    }

    pub fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    pub fn registry(&self) -> &MarkerRegistry<S> {
        &self.registry
    }

    pub fn fetcher(&self) -> &ContentFetcher {
        &self.fetcher
    }

    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }
}
