pub mod headless;
pub mod popup;
pub mod surface;

pub use headless::{HeadlessMap, HeadlessMarker, HeadlessPopup, HeadlessSurface};
pub use popup::{escape_html, render_infobox};
pub use surface::MapSurface;
