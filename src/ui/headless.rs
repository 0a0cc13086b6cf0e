use crate::{
    core::{config::MapOptions, geo::LatLng},
    ui::surface::MapSurface,
};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMap {
    pub center: LatLng,
    pub zoom: f64,
    pub options: MapOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMarker {
    pub title: String,
    pub position: LatLng,
    pub attached: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessPopup {
    pub content: String,
    /// Marker the popup is open on, if open
    pub anchor: Option<usize>,
}

/// In-memory map surface.
///
/// Records what a real widget would display: which markers are on the map,
/// each popup's markup and which popups are open. Used by the terminal
/// driver and by tests.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    map: Option<HeadlessMap>,
    markers: Vec<HeadlessMarker>,
    popups: Vec<HeadlessPopup>,
    peak_open: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&self) -> Option<&HeadlessMap> {
        self.map.as_ref()
    }

    pub fn markers(&self) -> &[HeadlessMarker] {
        &self.markers
    }

    pub fn marker(&self, index: usize) -> Option<&HeadlessMarker> {
        self.markers.get(index)
    }

    pub fn popup(&self, index: usize) -> Option<&HeadlessPopup> {
        self.popups.get(index)
    }

    pub fn popup_content(&self, index: usize) -> Option<&str> {
        self.popups.get(index).map(|p| p.content.as_str())
    }

    pub fn attached_markers(&self) -> Vec<usize> {
        self.markers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.attached)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn open_popups(&self) -> Vec<usize> {
        self.popups
            .iter()
            .enumerate()
            .filter(|(_, p)| p.anchor.is_some())
            .map(|(i, _)| i)
            .collect()
    }

    /// Highest number of popups ever open at the same time
    pub fn peak_open_popups(&self) -> usize {
        self.peak_open
    }

    /// Plain-text summary of what the map currently shows
    pub fn describe(&self) -> String {
        let mut out = String::new();
        if let Some(map) = &self.map {
            let _ = writeln!(out, "map at {} zoom {}", map.center, map.zoom);
        }
        for (i, marker) in self.markers.iter().enumerate() {
            let state = if marker.attached { "shown" } else { "hidden" };
            let _ = writeln!(out, "  [{}] {} {} ({})", i, marker.title, marker.position, state);
        }
        for i in self.open_popups() {
            let _ = writeln!(out, "  popup [{}]: {}", i, self.popups[i].content);
        }
        out
    }
}

impl MapSurface for HeadlessSurface {
    type Map = ();
    type Marker = usize;
    type Popup = usize;

    fn create_map(&mut self, center: LatLng, zoom: f64, options: &MapOptions) {
        self.map = Some(HeadlessMap {
            center,
            zoom,
            options: options.clone(),
        });
    }

    fn create_marker(&mut self, position: LatLng, title: &str) -> usize {
        self.markers.push(HeadlessMarker {
            title: title.to_string(),
            position,
            attached: false,
        });
        self.markers.len() - 1
    }

    fn attach(&mut self, marker: &usize, _map: &()) {
        if let Some(m) = self.markers.get_mut(*marker) {
            m.attached = true;
        }
    }

    fn detach(&mut self, marker: &usize) {
        if let Some(m) = self.markers.get_mut(*marker) {
            m.attached = false;
        }
    }

    fn create_popup(&mut self, content_html: &str) -> usize {
        self.popups.push(HeadlessPopup {
            content: content_html.to_string(),
            anchor: None,
        });
        self.popups.len() - 1
    }

    fn set_content(&mut self, popup: &usize, html: &str) {
        if let Some(p) = self.popups.get_mut(*popup) {
            p.content = html.to_string();
        }
    }

    fn open(&mut self, popup: &usize, _map: &(), marker: &usize) {
        if let Some(p) = self.popups.get_mut(*popup) {
            p.anchor = Some(*marker);
        }
        self.peak_open = self.peak_open.max(self.open_popups().len());
    }

    fn close(&mut self, popup: &usize) {
        if let Some(p) = self.popups.get_mut(*popup) {
            p.anchor = None;
        }
    }
}
