use crate::{
    core::{
        neighborhood::{Neighborhood, Place},
        observable::SubscriptionId,
    },
    layers::registry::MarkerRegistry,
    ui::surface::MapSurface,
};
use std::rc::{Rc, Weak};

/// Keeps marker visibility in step with the shared filter.
///
/// Every filter change re-renders the visibility of every place, in order.
/// Each place depends only on its own name and the filter, so the result
/// does not depend on the order.
pub struct FilterProjector {
    subscription: SubscriptionId,
}

impl FilterProjector {
    /// Applies the current filter once, then subscribes to filter changes.
    pub fn install<S: MapSurface + 'static>(
        neighborhood: &Neighborhood,
        registry: &Rc<MarkerRegistry<S>>,
    ) -> Self {
        let places: Vec<Weak<Place>> = neighborhood.places().iter().map(Rc::downgrade).collect();
        let registry = Rc::downgrade(registry);

        let project = move || {
            let Some(registry) = registry.upgrade() else {
                return;
            };
            for (index, place) in places.iter().enumerate() {
                if let Some(place) = place.upgrade() {
                    if let Err(e) = registry.render_visibility(&place, index) {
                        log::warn!("could not render marker {}: {}", index, e);
                    }
                }
            }
        };

        project();
        let subscription = neighborhood.filter().subscribe(move |filter: &String| {
            log::debug!("filter changed to {:?}", filter);
            project();
        });

        Self { subscription }
    }

    /// Removes the filter subscription; markers keep their last visibility.
    pub fn uninstall(self, neighborhood: &Neighborhood) -> bool {
        neighborhood.filter().unsubscribe(self.subscription)
    }

    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }
}
