//! Domain rules independent of storage and transport.

pub mod markdown;
pub mod patch;
pub mod timestamp;

pub use patch::Patch;
