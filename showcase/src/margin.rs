use core::fmt;
use core::str::FromStr;

use alloc::string::ToString;

use crate::{ConfigError, Rect, Viewport};

/// A single margin length: logical pixels or a percentage of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl Length {
    /// Resolves to logical pixels. Percentages are taken of `basis`.
    pub fn resolve(self, basis: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => basis * p / 100.0,
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Self::Px(0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

impl FromStr for Length {
    type Err = ConfigError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidMargin(token.to_string());
        let (number, percent) = if let Some(n) = token.strip_suffix("px") {
            (n, false)
        } else if let Some(n) = token.strip_suffix('%') {
            (n, true)
        } else {
            // A bare number is only accepted for zero, like CSS.
            (token, false)
        };
        let value: f64 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        if number.len() == token.len() && value != 0.0 {
            return Err(invalid());
        }
        Ok(if percent {
            Self::Percent(value)
        } else {
            Self::Px(value)
        })
    }
}

/// Expansion (or, with negative lengths, contraction) applied to the viewport before testing
/// regions for intersection.
///
/// Parses CSS margin shorthand: one to four lengths, e.g. `"50px"`, `"10px 0"`,
/// `"0px 0px -20% 0px"`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Margin {
    pub fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }

    pub fn px(v: f64) -> Self {
        Self::uniform(Length::Px(v))
    }

    /// Grows the viewport rectangle by this margin.
    ///
    /// Vertical percentages resolve against the viewport height, horizontal ones against its
    /// width.
    pub fn expand(&self, viewport: Viewport) -> Rect {
        let top = self.top.resolve(viewport.height);
        let bottom = self.bottom.resolve(viewport.height);
        let left = self.left.resolve(viewport.width);
        let right = self.right.resolve(viewport.width);
        Rect::new(
            -left,
            -top,
            viewport.width + left + right,
            viewport.height + top + bottom,
        )
    }
}

impl FromStr for Margin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [Length::default(); 4];
        let mut n = 0usize;
        for token in s.split_whitespace() {
            if n == parts.len() {
                return Err(ConfigError::InvalidMargin(s.to_string()));
            }
            parts[n] = token.parse()?;
            n += 1;
        }
        let [a, b, c, d] = parts;
        match n {
            1 => Ok(Self::uniform(a)),
            2 => Ok(Self {
                top: a,
                right: b,
                bottom: a,
                left: b,
            }),
            3 => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: b,
            }),
            4 => Ok(Self {
                top: a,
                right: b,
                bottom: c,
                left: d,
            }),
            _ => Err(ConfigError::InvalidMargin(s.to_string())),
        }
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
