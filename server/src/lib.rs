//! Image merger web application: upload two images, position and scale the
//! overlay, download the flattened composite.

pub mod app;
pub mod background;
pub mod bootstrap;
pub mod config;
pub mod server;
pub mod services;

pub use bootstrap::init_foundation;
