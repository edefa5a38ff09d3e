mod crosshair;
mod transform;

#[cfg(test)]
mod tests;

pub use crosshair::{CrosshairSegment, PixelPoint, Viewport, recompute};
pub use transform::{
    ViewState, ViewTransform, WHEEL_DEGREES_PER_NOTCH, wheel_zoom_delta,
};
