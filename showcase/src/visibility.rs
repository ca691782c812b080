use crate::{ConfigError, Rect, Viewport, VisibilityOptions};

/// Fraction of `region`'s area that lies inside `root`, in `[0, 1]`.
///
/// A zero-area region reports `1.0` when it touches `root` and `0.0` otherwise.
pub fn intersection_ratio(region: &Rect, root: &Rect) -> f64 {
    let Some(overlap) = region.intersection(root) else {
        return 0.0;
    };
    let area = region.area();
    if area <= 0.0 {
        return 1.0;
    }
    (overlap.area() / area).clamp(0.0, 1.0)
}

/// Reveal-on-visibility trigger for a single region.
///
/// The trigger does not observe anything by itself. The host reports the region's current
/// rectangle (in viewport coordinates) whenever layout or scroll position may have changed, and
/// the trigger decides whether the region crossed the visibility threshold.
#[derive(Clone, Debug)]
pub struct VisibilityTrigger {
    options: VisibilityOptions,
    visible: bool,
    observing: bool,
    last_ratio: f64,
}

impl VisibilityTrigger {
    pub fn new(options: VisibilityOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        sdebug!(
            threshold = options.threshold,
            once = options.once,
            "VisibilityTrigger::new"
        );
        Ok(Self {
            options,
            visible: false,
            observing: true,
            last_ratio: 0.0,
        })
    }

    pub fn options(&self) -> &VisibilityOptions {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `false` once the trigger has disconnected, either explicitly or after a one-shot reveal.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// The intersection ratio seen by the last accepted observation.
    pub fn last_ratio(&self) -> f64 {
        self.last_ratio
    }

    /// Feeds one observation.
    ///
    /// Returns the new visibility when it changed, `None` otherwise (including when the trigger
    /// is no longer observing).
    pub fn observe(&mut self, region: Rect, viewport: Viewport) -> Option<bool> {
        if !self.observing {
            return None;
        }
        let root = self.options.root_margin.expand(viewport);
        let ratio = intersection_ratio(&region, &root);
        self.last_ratio = ratio;

        let visible = region.intersection(&root).is_some() && ratio >= self.options.threshold;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        strace!(visible, ratio, "VisibilityTrigger: transition");

        if visible && self.options.once {
            self.observing = false;
            sdebug!("VisibilityTrigger: one-shot reveal, disconnecting");
        }
        if let Some(cb) = &self.options.on_change {
            cb(&visible);
        }
        Some(visible)
    }

    /// Stops observing. The current visibility is frozen and no callback fires afterwards.
    pub fn disconnect(&mut self) {
        if self.observing {
            sdebug!(visible = self.visible, "VisibilityTrigger::disconnect");
        }
        self.observing = false;
    }
}
