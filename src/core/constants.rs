//! Reference defaults for the Antwerp neighborhood view and its description
//! fetches. Keeping them in a single place makes it easier to tweak them.

/// Map center (latitude, longitude).
pub const DEFAULT_CENTER: (f64, f64) = (51.214089, 4.414368);

/// Initial zoom level of the map.
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Seed places in display order: (name, latitude, longitude).
pub const SEED_PLACES: [(&str, f64, f64); 3] = [
    ("Antwerpen-Centraal railway station", 51.216191, 4.421215),
    ("Cathedral of Our Lady", 51.220291, 4.401515),
    ("Het steen", 51.222724, 4.397364),
];

/// Description search endpoint.
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Client-enforced timeout for a description fetch.
pub const FETCH_TIMEOUT_MS: u64 = 5000;

/// Popup text shown when a fetch fails or times out.
pub const FALLBACK_CONTENT: &str = "Could not fetch content.";

/// Popup body shown until the first fetch resolves.
pub const LOADING_HTML: &str = r#"<img src="img/loading.gif">"#;

/// Feature types hidden from the base map.
pub const HIDDEN_FEATURE_TYPES: [&str; 2] = ["poi", "transit"];

/// User agent sent with description requests.
pub const USER_AGENT: &str = "neighborhood-map/0.1";
