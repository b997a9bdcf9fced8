// Adapters layer: concrete implementations of the domain ports (http provider, clocks).

pub mod clock;
pub mod http;

pub use clock::{FixedClock, SystemClock};
pub use http::TrackingMoreClient;
