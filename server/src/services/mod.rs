//! Services behind the HTTP handlers: upload storage, merged output storage,
//! the compositing job and preview encoding.

pub mod compositing;
pub mod filename;
pub mod merged;
pub mod preview;
pub mod uploads;
