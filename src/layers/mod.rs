pub mod marker;
pub mod projector;
pub mod registry;

pub use marker::MarkerRecord;
pub use projector::FilterProjector;
pub use registry::MarkerRegistry;
