//! Places of interest and the shared filter that decides which are shown

use crate::core::{config::NeighborhoodConfig, geo::LatLng, observable::Observable};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A point of interest: fixed identity and location, lazily loaded content.
pub struct Place {
    name: String,
    location: LatLng,
    content: Observable<String>,
    content_loaded: Cell<bool>,
    filter: Rc<Observable<String>>,
}

impl Place {
    pub fn new(name: impl Into<String>, location: LatLng, filter: Rc<Observable<String>>) -> Self {
        Self {
            name: name.into(),
            location,
            content: Observable::new(String::new()),
            content_loaded: Cell::new(false),
            filter,
        }
    }

    /// Display label and description query
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> LatLng {
        self.location
    }

    /// Description text; empty until the first fetch resolves
    pub fn content(&self) -> &Observable<String> {
        &self.content
    }

    /// True only after a successful fetch
    pub fn content_loaded(&self) -> bool {
        self.content_loaded.get()
    }

    pub(crate) fn set_content_loaded(&self, loaded: bool) {
        self.content_loaded.set(loaded);
    }

    /// Literal, case-sensitive substring match; the empty filter matches all.
    pub fn matches(&self, filter: &str) -> bool {
        self.name.contains(filter)
    }

    /// Visibility under the current shared filter
    pub fn is_visible(&self) -> bool {
        self.filter.with(|filter| self.matches(filter))
    }
}

impl fmt::Debug for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Place")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("content", &self.content.get())
            .field("content_loaded", &self.content_loaded.get())
            .finish()
    }
}

/// The session's area: map center, zoom, shared filter and ordered places.
///
/// Place order is significant: a place's position is the index of its marker
/// and popup.
#[derive(Debug)]
pub struct Neighborhood {
    location: LatLng,
    zoom: f64,
    filter: Rc<Observable<String>>,
    places: Vec<Rc<Place>>,
}

impl Neighborhood {
    pub fn new(config: &NeighborhoodConfig) -> Self {
        let filter = Rc::new(Observable::new(String::new()));
        let places = config
            .places
            .iter()
            .map(|seed| Rc::new(Place::new(seed.name.clone(), seed.location, filter.clone())))
            .collect();

        Self {
            location: config.center,
            zoom: config.zoom,
            filter,
            places,
        }
    }

    pub fn location(&self) -> LatLng {
        self.location
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn filter(&self) -> &Observable<String> {
        &self.filter
    }

    /// Replaces the shared filter. Dependents are notified through the
    /// filter's subscribers; nothing else happens here.
    pub fn set_filter(&self, text: impl Into<String>) -> bool {
        self.filter.set(text.into())
    }

    pub fn visibility_of(&self, place: &Place) -> bool {
        self.filter.with(|filter| place.matches(filter))
    }

    pub fn places(&self) -> &[Rc<Place>] {
        &self.places
    }

    pub fn place(&self, index: usize) -> Option<&Rc<Place>> {
        self.places.get(index)
    }

    /// Indices of the places visible under the current filter
    pub fn visible_indices(&self) -> Vec<usize> {
        self.places
            .iter()
            .enumerate()
            .filter(|(_, place)| place.is_visible())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self::new(&NeighborhoodConfig::default())
    }
}
