//! Headless motion utilities for single-page storefronts.
//!
//! This crate holds the state machines behind a landing page's "alive" feel: reveal-on-scroll
//! triggers, a frame-coalesced scroll sampler, and an auto-advancing review carousel with a
//! transition lock. A small parallax helper and a splash-screen progress model round it out.
//!
//! It is UI-agnostic. Nothing here owns a clock, a timer or a DOM node. A host layer is
//! expected to provide:
//! - viewport size and region rectangles
//! - raw scroll positions and animation-frame callbacks
//! - a monotonic `now_ms` whenever it calls into a timed state machine
//!
//! For a handle-based runtime that wires these to host events, see the `showcase-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod carousel;
mod error;
mod loading;
mod margin;
mod options;
mod parallax;
mod scroll;
mod state;
mod types;
mod visibility;


pub use carousel::Carousel;
pub use error::ConfigError;
pub use loading::{LoadingOptions, LoadingPhase, LoadingProgress};
pub use margin::{Length, Margin};
pub use options::{
    CarouselOptions, ChangeCallback, DEFAULT_COMPACT_BREAKPOINT, DEFAULT_INTERVAL_MS,
    DEFAULT_TRANSITION_MS, ScrollOptions, VisibilityOptions,
};
pub use parallax::{LayerStyle, ParallaxLayer};
pub use scroll::ScrollSampler;
pub use state::{CarouselState, ScrollState};
pub use types::{DeviceClass, Rect, Viewport};
pub use visibility::{VisibilityTrigger, intersection_ratio};
