use crate::{
    content::fetcher::ContentFetcher,
    core::{config::MapOptions, neighborhood::Neighborhood, neighborhood::Place},
    layers::marker::MarkerRecord,
    ui::{
        popup::{escape_html, render_infobox},
        surface::MapSurface,
    },
    MapError, Result,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Owns one marker and one popup per place, in place order, and keeps at
/// most one popup open.
pub struct MarkerRegistry<S: MapSurface> {
    surface: Rc<RefCell<S>>,
    map: S::Map,
    records: Vec<MarkerRecord<S>>,
    fetcher: Rc<ContentFetcher>,
    open: Cell<Option<usize>>,
}

impl<S: MapSurface + 'static> MarkerRegistry<S> {
    /// Creates the map and, for every place in order, its marker, its popup
    /// (showing `loading_html` until content arrives) and the subscription
    /// that re-renders the popup whenever the place's content changes.
    ///
    /// Markers start detached; visibility is applied by the
    /// [`FilterProjector`](crate::layers::projector::FilterProjector).
    pub fn init(
        surface: Rc<RefCell<S>>,
        neighborhood: &Neighborhood,
        options: &MapOptions,
        loading_html: &str,
        fetcher: Rc<ContentFetcher>,
    ) -> Self {
        let map = surface
            .borrow_mut()
            .create_map(neighborhood.location(), neighborhood.zoom(), options);

        let mut records = Vec::with_capacity(neighborhood.len());
        for place in neighborhood.places() {
            let (marker, popup) = {
                let mut s = surface.borrow_mut();
                let marker = s.create_marker(place.location(), place.name());
                let popup = s.create_popup(&render_infobox(place.name(), loading_html));
                (marker, popup)
            };

            let subscription = {
                let surface = surface.clone();
                let popup = popup.clone();
                let name = place.name().to_owned();
                place.content().subscribe(move |content: &String| {
                    let html = render_infobox(&name, &escape_html(content));
                    match surface.try_borrow_mut() {
                        Ok(mut s) => s.set_content(&popup, &html),
                        Err(_) => log::error!("map surface busy, dropped popup update for '{}'", name),
                    }
                })
            };

            records.push(MarkerRecord::new(marker, popup, subscription));
        }
        log::debug!("created {} markers", records.len());

        Self {
            surface,
            map,
            records,
            fetcher,
            open: Cell::new(None),
        }
    }

    /// Closes every popup, starts loading `place`'s content if needed, then
    /// opens the popup at `index` on its marker.
    pub fn open_popup(&self, place: &Rc<Place>, index: usize) -> Result<()> {
        let record = self
            .records
            .get(index)
            .ok_or(MapError::UnknownMarker(index))?;

        self.close_all();
        self.fetcher.populate(place);

        self.surface
            .borrow_mut()
            .open(record.popup(), &self.map, record.marker());
        self.open.set(Some(index));
        log::debug!("opened popup {} for '{}'", index, place.name());
        Ok(())
    }

    /// Closes all popups unconditionally
    pub fn close_all(&self) {
        let mut surface = self.surface.borrow_mut();
        for record in &self.records {
            surface.close(record.popup());
        }
        self.open.set(None);
    }

    /// Attaches the marker at `index` if `place` is visible, detaches it
    /// otherwise. The handle is kept either way.
    pub fn render_visibility(&self, place: &Place, index: usize) -> Result<()> {
        let record = self
            .records
            .get(index)
            .ok_or(MapError::UnknownMarker(index))?;

        let visible = place.is_visible();
        let mut surface = self.surface.borrow_mut();
        if visible {
            surface.attach(record.marker(), &self.map);
        } else {
            surface.detach(record.marker());
        }
        log::trace!("marker {} ('{}') visible: {}", index, place.name(), visible);
        Ok(())
    }

    /// Index of the popup opened last, if it has not been closed since
    pub fn open_index(&self) -> Option<usize> {
        self.open.get()
    }

    pub fn record(&self, index: usize) -> Option<&MarkerRecord<S>> {
        self.records.get(index)
    }

    pub fn map(&self) -> &S::Map {
        &self.map
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
