use crate::DeviceClass;

/// A lightweight snapshot of a scroll sampler.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// Latest applied scroll position, never negative.
    pub raw_offset: f64,
    /// `raw_offset` scaled for the device class.
    pub offset: f64,
    pub is_past_threshold: bool,
    pub device_class: DeviceClass,
}

/// A lightweight snapshot of a carousel.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselState {
    pub index: usize,
    pub len: usize,
    /// `true` while a transition holds the lock. Hosts typically disable navigation controls
    /// and fade the current slide out while this is set.
    pub is_transitioning: bool,
}
