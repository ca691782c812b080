use crate::ConfigError;

/// Where a splash screen is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadingPhase {
    /// Progress is still climbing.
    Loading,
    /// Progress reached 100; the overlay is fading out.
    FadingOut,
    /// The overlay is gone; waiting for the fade to settle before handing over.
    Hidden,
    /// The page may take over.
    Complete,
}

/// Timing for [`LoadingProgress`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadingOptions {
    /// Percentage points added per step.
    pub step: u8,
    pub step_ms: u64,
    /// Delay between reaching 100 and hiding the overlay.
    pub fade_delay_ms: u64,
    /// Delay between hiding the overlay and completion.
    pub fade_out_ms: u64,
}

impl Default for LoadingOptions {
    fn default() -> Self {
        Self {
            step: 2,
            step_ms: 30,
            fade_delay_ms: 300,
            fade_out_ms: 500,
        }
    }
}

impl LoadingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: u8, step_ms: u64) -> Self {
        self.step = step;
        self.step_ms = step_ms;
        self
    }

    pub fn with_fade(mut self, fade_delay_ms: u64, fade_out_ms: u64) -> Self {
        self.fade_delay_ms = fade_delay_ms;
        self.fade_out_ms = fade_out_ms;
        self
    }
}

/// Simulated splash-screen progress.
#[derive(Clone, Debug)]
pub struct LoadingProgress {
    options: LoadingOptions,
    progress: u8,
    phase: LoadingPhase,
    next_ms: u64,
}

impl LoadingProgress {
    pub fn new(options: LoadingOptions, now_ms: u64) -> Result<Self, ConfigError> {
        if options.step == 0 {
            swarn!("LoadingProgress::new: zero step");
            return Err(ConfigError::InvalidOption {
                name: "step",
                value: 0.0,
            });
        }
        if options.step_ms == 0 {
            swarn!("LoadingProgress::new: zero step period");
            return Err(ConfigError::InvalidOption {
                name: "step_ms",
                value: 0.0,
            });
        }
        Ok(Self {
            options,
            progress: 0,
            phase: LoadingPhase::Loading,
            next_ms: now_ms.saturating_add(options.step_ms),
        })
    }

    /// Percentage in `[0, 100]`.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Whether the overlay should still be rendered.
    pub fn is_visible(&self) -> bool {
        matches!(self.phase, LoadingPhase::Loading | LoadingPhase::FadingOut)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == LoadingPhase::Complete
    }

    pub fn next_deadline(&self) -> Option<u64> {
        (!self.is_complete()).then_some(self.next_ms)
    }

    /// Advances through every step due at or before `now_ms`.
    ///
    /// The overlay starts fading as soon as progress reaches 100. The fade delay is counted from
    /// the following step, so with the defaults the overlay hides 330 ms after reaching 100.
    ///
    /// Returns `true` if progress or phase changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let before = (self.progress, self.phase);
        while !self.is_complete() && self.next_ms <= now_ms {
            let at = self.next_ms;
            match self.phase {
                LoadingPhase::Loading => {
                    self.progress = self.progress.saturating_add(self.options.step).min(100);
                    if self.progress == 100 {
                        self.phase = LoadingPhase::FadingOut;
                        self.next_ms = at
                            .saturating_add(self.options.step_ms)
                            .saturating_add(self.options.fade_delay_ms);
                    } else {
                        self.next_ms = at.saturating_add(self.options.step_ms);
                    }
                }
                LoadingPhase::FadingOut => {
                    self.phase = LoadingPhase::Hidden;
                    self.next_ms = at.saturating_add(self.options.fade_out_ms);
                }
                LoadingPhase::Hidden => {
                    self.phase = LoadingPhase::Complete;
                    sdebug!(at, "LoadingProgress: complete");
                }
                LoadingPhase::Complete => {}
            }
        }
        (self.progress, self.phase) != before
    }

    /// Skips straight to completion (e.g. when assets finished early).
    pub fn finish(&mut self) {
        self.progress = 100;
        self.phase = LoadingPhase::Complete;
    }
}
