mod globe;
mod overlay;

pub use globe::GlobeViewport;
pub use overlay::{render_overlay, Overlay};
