pub mod viewport;

pub use viewport::{MAX_SCALE, MIN_SCALE, Viewport, ZOOM_STEP};
