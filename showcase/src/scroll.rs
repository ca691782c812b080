use crate::{ConfigError, DeviceClass, ScrollOptions, ScrollState};

/// Frame-coalesced page scroll sampler.
///
/// Scroll notifications are cheap to report and may arrive many times per display refresh.
/// The sampler only remembers the latest raw position and applies it on the next frame:
///
/// - `on_scroll(raw)` returns `true` when the host must request an animation frame, and `false`
///   when one is already pending (the new position replaces the pending one).
/// - `on_frame()` applies the pending position, if any.
///
/// On compact devices the reported offset is scaled down to soften motion effects. The
/// "past threshold" flag always uses the unscaled position.
#[derive(Clone, Debug)]
pub struct ScrollSampler {
    options: ScrollOptions,
    state: ScrollState,
    pending: Option<f64>,
}

impl ScrollSampler {
    pub fn new(options: ScrollOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        sdebug!(
            compact_breakpoint = options.compact_breakpoint,
            past_threshold = options.past_threshold,
            "ScrollSampler::new"
        );
        Ok(Self {
            options,
            state: ScrollState::default(),
            pending: None,
        })
    }

    /// Creates a sampler seeded with the current viewport width and scroll position.
    pub fn with_initial(
        options: ScrollOptions,
        viewport_width: f64,
        raw_offset: f64,
    ) -> Result<Self, ConfigError> {
        let mut s = Self::new(options)?;
        s.state.device_class =
            DeviceClass::for_width(viewport_width, s.options.compact_breakpoint);
        s.apply(raw_offset);
        Ok(s)
    }

    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn raw_offset(&self) -> f64 {
        self.state.raw_offset
    }

    pub fn is_past_threshold(&self) -> bool {
        self.state.is_past_threshold
    }

    pub fn device_class(&self) -> DeviceClass {
        self.state.device_class
    }

    pub fn is_frame_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Reports a viewport resize. The device class is re-evaluated and the offset re-derived
    /// from the last applied raw position right away.
    pub fn on_resize(&mut self, viewport_width: f64) {
        let class = DeviceClass::for_width(viewport_width, self.options.compact_breakpoint);
        if class == self.state.device_class {
            return;
        }
        sdebug!(viewport_width, ?class, "ScrollSampler: device class changed");
        self.state.device_class = class;
        let raw = self.state.raw_offset;
        self.apply(raw);
        self.notify();
    }

    /// Reports a scroll notification.
    ///
    /// Returns `true` if the host must schedule a frame callback.
    pub fn on_scroll(&mut self, raw_offset: f64) -> bool {
        let request = self.pending.is_none();
        if !request {
            strace!(raw_offset, "ScrollSampler: coalesced");
        }
        self.pending = Some(raw_offset);
        request
    }

    /// Frame callback. Applies the latest pending position.
    ///
    /// Returns `true` when the observable state changed.
    pub fn on_frame(&mut self) -> bool {
        let Some(raw) = self.pending.take() else {
            return false;
        };
        let before = self.state;
        self.apply(raw);
        if self.state == before {
            return false;
        }
        self.notify();
        true
    }

    fn apply(&mut self, raw_offset: f64) {
        // Overscroll bounce can report negative positions; NaN is treated the same way.
        let raw = if raw_offset > 0.0 { raw_offset } else { 0.0 };
        let offset = match self.state.device_class {
            DeviceClass::Compact => raw * self.options.compact_scale,
            DeviceClass::Standard => raw,
        };
        self.state.raw_offset = raw;
        self.state.offset = offset;
        self.state.is_past_threshold = raw > self.options.past_threshold;
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(&self.state);
        }
    }
}
