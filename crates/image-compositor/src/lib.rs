//! Two-layer image compositing engine.
//!
//! Takes a base raster, an overlay raster and a placement transform
//! (translation + uniform scale) and produces a deterministic, flattened
//! RGB composite. Pure CPU work on in-memory buffers: no I/O, no shared state.

pub mod codec;
pub mod compose;
pub mod error;
pub mod raster;
pub mod resize;
pub mod transform;

// Re-exports for convenience
pub use codec::{decode, encode_png, encode_rgba_png};
pub use compose::{composite, merge, CompositeResult};
pub use error::CompositeError;
pub use raster::RasterBuffer;
pub use resize::resample;
pub use transform::{RawNumber, RawTransform, TransformSpec};

/// Opaque background that composites are flattened onto.
pub const BACKGROUND: [u8; 3] = [255, 255, 255];
