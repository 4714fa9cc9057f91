//! Platform abstraction layer
//!
//! Browser shell for the simulation:
//! - Animation-frame scheduling (one tick per frame)
//! - Input events (Space, click, touch) mapped to the flap impulse
//! - Storage (LocalStorage best score)
//! - JS-facing API for mode selection and snapshots

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{WebGame, init};
