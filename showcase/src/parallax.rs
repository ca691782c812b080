use alloc::format;
use alloc::string::String;

/// Per-frame style for one parallax layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerStyle {
    pub translate_y: f64,
    pub opacity: f64,
    pub scale: f64,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            translate_y: 0.0,
            opacity: 1.0,
            scale: 1.0,
        }
    }
}

impl LayerStyle {
    /// Renders the transform as a GPU-friendly CSS value.
    pub fn to_transform_css(&self) -> String {
        if self.scale == 1.0 {
            format!("translate3d(0, {}px, 0)", self.translate_y)
        } else {
            format!("translate3d(0, {}px, 0) scale({})", self.translate_y, self.scale)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Fade {
    None,
    Out(f64),
    In(f64),
}

/// Maps a scroll offset to a layer's translation, opacity and scale.
///
/// Feed it [`crate::ScrollSampler::offset`], which is already toned down on compact devices.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallaxLayer {
    translate_factor: f64,
    fade: Fade,
    scale_falloff: Option<(f64, f64)>,
}

impl ParallaxLayer {
    /// A layer that moves `translate_factor` units per unit of scroll.
    pub fn new(translate_factor: f64) -> Self {
        Self {
            translate_factor,
            fade: Fade::None,
            scale_falloff: None,
        }
    }

    /// Opacity drops from 1 by `rate` per unit of scroll, bottoming out at 0.
    pub fn with_fade_out(mut self, rate: f64) -> Self {
        self.fade = Fade::Out(rate);
        self
    }

    /// Opacity rises from 0 by `rate` per unit of scroll, capped at 1.
    pub fn with_fade_in(mut self, rate: f64) -> Self {
        self.fade = Fade::In(rate);
        self
    }

    /// Scale shrinks from 1 by `rate` per unit of scroll, never below `min_scale`.
    pub fn with_scale_falloff(mut self, rate: f64, min_scale: f64) -> Self {
        self.scale_falloff = Some((rate, min_scale));
        self
    }

    pub fn sample(&self, offset: f64) -> LayerStyle {
        let opacity = match self.fade {
            Fade::None => 1.0,
            Fade::Out(rate) => (1.0 - offset * rate).max(0.0),
            Fade::In(rate) => (offset * rate).clamp(0.0, 1.0),
        };
        let scale = match self.scale_falloff {
            Some((rate, min_scale)) => (1.0 - offset * rate).max(min_scale),
            None => 1.0,
        };
        LayerStyle {
            translate_y: offset * self.translate_factor,
            opacity: opacity.min(1.0),
            scale,
        }
    }
}
