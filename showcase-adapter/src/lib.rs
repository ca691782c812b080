//! Host-facing runtime for the `showcase` crate.
//!
//! The `showcase` crate holds pure state machines. This crate owns many of them at once behind
//! generational handles and maps host events onto them:
//!
//! - `on_scroll` / `on_resize` are the page's scroll and resize listeners
//! - `on_frame` is the animation-frame callback (scroll sampling + intersection pass)
//! - `tick(now_ms)` is the single timer callback (carousel transitions, auto-advance, splash)
//!
//! Viewport size, scroll position and region geometry come from an injectable [`Environment`],
//! so the whole stage runs deterministically in tests without a display surface.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod env;
mod error;
mod handle;
mod stage;

#[cfg(test)]
mod tests;

pub use env::{Environment, ManualEnvironment, RegionId};
pub use error::{Error, Result};
pub use handle::{CarouselHandle, LoadingHandle, SamplerHandle, TriggerHandle};
pub use stage::Stage;
