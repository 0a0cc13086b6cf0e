use crate::core::{config::MapOptions, geo::LatLng};

/// The map widget the core drives.
///
/// Implementations draw a base map and hold markers and popups. Handles are
/// owned by the caller for the whole session; a detached marker keeps its
/// handle and may be attached again. Click routing is not part of the
/// surface: the embedding adapter turns marker clicks into
/// [`UiEvent::MarkerClicked`](crate::input::events::UiEvent::MarkerClicked).
///
/// The `index` carried by that event is the marker's creation order: the
/// n-th `create_marker` call is index n, which is also the place order.
pub trait MapSurface {
    type Map: Clone;
    type Marker: Clone;
    type Popup: Clone;

    fn create_map(&mut self, center: LatLng, zoom: f64, options: &MapOptions) -> Self::Map;

    /// Markers are created detached, once per place, in place order
    fn create_marker(&mut self, position: LatLng, title: &str) -> Self::Marker;

    /// Shows the marker on `map`
    fn attach(&mut self, marker: &Self::Marker, map: &Self::Map);

    /// Removes the marker from the map without destroying it
    fn detach(&mut self, marker: &Self::Marker);

    fn create_popup(&mut self, content_html: &str) -> Self::Popup;

    fn set_content(&mut self, popup: &Self::Popup, html: &str);

    /// Opens `popup` on `map`, anchored to `marker`
    fn open(&mut self, popup: &Self::Popup, map: &Self::Map, marker: &Self::Marker);

    /// Closes `popup`; closing a closed popup is a no-op
    fn close(&mut self, popup: &Self::Popup);
}
