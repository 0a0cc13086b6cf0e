use crate::{core::observable::SubscriptionId, ui::surface::MapSurface};

/// The map-side objects of one place: its marker, its popup and the content
/// subscription that keeps the popup current. Created once at startup and
/// kept for the whole session.
pub struct MarkerRecord<S: MapSurface> {
    marker: S::Marker,
    popup: S::Popup,
    subscription: SubscriptionId,
}

impl<S: MapSurface> MarkerRecord<S> {
    pub fn new(marker: S::Marker, popup: S::Popup, subscription: SubscriptionId) -> Self {
        Self {
            marker,
            popup,
            subscription,
        }
    }

    pub fn marker(&self) -> &S::Marker {
        &self.marker
    }

    pub fn popup(&self) -> &S::Popup {
        &self.popup
    }

    /// Subscription on the place's content that re-renders the popup
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }
}
