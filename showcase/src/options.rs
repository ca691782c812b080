use alloc::sync::Arc;

use crate::{ConfigError, Margin, ScrollState};

/// A callback fired after a component's observable state changes.
pub type ChangeCallback<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Viewport width at or below which a device counts as compact.
pub const DEFAULT_COMPACT_BREAKPOINT: f64 = 768.0;
/// Default auto-advance cadence for carousels.
pub const DEFAULT_INTERVAL_MS: u64 = 4000;
/// Default duration a carousel transition holds the lock.
pub const DEFAULT_TRANSITION_MS: u64 = 300;

/// Configuration for [`crate::VisibilityTrigger`].
pub struct VisibilityOptions {
    /// Fraction of the region's area that must be inside the expanded viewport.
    pub threshold: f64,
    pub root_margin: Margin,
    /// Stop observing after the first time the region becomes visible.
    pub once: bool,
    /// Fired with the new visibility on every transition.
    pub on_change: Option<ChangeCallback<bool>>,
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: Margin::px(50.0),
            once: true,
            on_change: None,
        }
    }
}

impl Clone for VisibilityOptions {
    fn clone(&self) -> Self {
        Self {
            threshold: self.threshold,
            root_margin: self.root_margin,
            once: self.once,
            on_change: self.on_change.clone(),
        }
    }
}

impl VisibilityOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_root_margin(mut self, root_margin: Margin) -> Self {
        self.root_margin = root_margin;
        self
    }

    /// Parses and sets the root margin from CSS shorthand (`"50px"`, `"0px 0px -10% 0px"`).
    pub fn with_root_margin_str(mut self, root_margin: &str) -> Result<Self, ConfigError> {
        self.root_margin = root_margin.parse()?;
        Ok(self)
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            swarn!(threshold = self.threshold, "VisibilityOptions: threshold out of range");
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        Ok(())
    }
}

impl core::fmt::Debug for VisibilityOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityOptions")
            .field("threshold", &self.threshold)
            .field("root_margin", &self.root_margin)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::ScrollSampler`].
pub struct ScrollOptions {
    pub compact_breakpoint: f64,
    /// Multiplier applied to the raw position on compact devices.
    pub compact_scale: f64,
    /// Raw position (unscaled) beyond which the page counts as scrolled.
    pub past_threshold: f64,
    pub on_change: Option<ChangeCallback<ScrollState>>,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            compact_breakpoint: DEFAULT_COMPACT_BREAKPOINT,
            compact_scale: 0.5,
            past_threshold: 50.0,
            on_change: None,
        }
    }
}

impl Clone for ScrollOptions {
    fn clone(&self) -> Self {
        Self {
            compact_breakpoint: self.compact_breakpoint,
            compact_scale: self.compact_scale,
            past_threshold: self.past_threshold,
            on_change: self.on_change.clone(),
        }
    }
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compact_breakpoint(mut self, compact_breakpoint: f64) -> Self {
        self.compact_breakpoint = compact_breakpoint;
        self
    }

    pub fn with_compact_scale(mut self, compact_scale: f64) -> Self {
        self.compact_scale = compact_scale;
        self
    }

    pub fn with_past_threshold(mut self, past_threshold: f64) -> Self {
        self.past_threshold = past_threshold;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ScrollState) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("compact_breakpoint", self.compact_breakpoint),
            ("compact_scale", self.compact_scale),
            ("past_threshold", self.past_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                swarn!(name, value, "ScrollOptions: invalid value");
                return Err(ConfigError::InvalidOption { name, value });
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for ScrollOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("compact_breakpoint", &self.compact_breakpoint)
            .field("compact_scale", &self.compact_scale)
            .field("past_threshold", &self.past_threshold)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::Carousel`].
pub struct CarouselOptions {
    pub auto_play: bool,
    pub interval_ms: u64,
    /// How long a transition holds the lock before the index changes.
    pub transition_ms: u64,
    /// Fired when the index changes and when the lock is taken or released.
    pub on_change: Option<ChangeCallback<crate::CarouselState>>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_play: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
            on_change: None,
        }
    }
}

impl Clone for CarouselOptions {
    fn clone(&self) -> Self {
        Self {
            auto_play: self.auto_play,
            interval_ms: self.interval_ms,
            transition_ms: self.transition_ms,
            on_change: self.on_change.clone(),
        }
    }
}

impl CarouselOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_transition_ms(mut self, transition_ms: u64) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&crate::CarouselState) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            swarn!("CarouselOptions: zero interval");
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

impl core::fmt::Debug for CarouselOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CarouselOptions")
            .field("auto_play", &self.auto_play)
            .field("interval_ms", &self.interval_ms)
            .field("transition_ms", &self.transition_ms)
            .finish_non_exhaustive()
    }
}
