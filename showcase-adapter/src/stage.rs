use alloc::vec::Vec;

use showcase::{
    Carousel, CarouselOptions, CarouselState, LoadingOptions, LoadingPhase, LoadingProgress,
    ScrollOptions, ScrollSampler, ScrollState, VisibilityOptions, VisibilityTrigger,
};

use crate::handle::Slots;
use crate::{
    CarouselHandle, Environment, Error, LoadingHandle, RegionId, Result, SamplerHandle,
    TriggerHandle,
};

#[derive(Clone, Debug)]
struct Observation {
    region: RegionId,
    trigger: VisibilityTrigger,
}

/// Owns every motion component on a page and routes host events to them.
///
/// All operations run synchronously on the caller's thread. Removing a component (`detach`,
/// `stop`, `teardown`, `dismiss_loading`) drops its state immediately, so none of its callbacks
/// can fire afterwards and its handle resolves to [`Error::InvalidHandle`] from then on.
///
/// The stage keeps a clock that only moves forward when the host calls [`Stage::tick`] or
/// [`Stage::on_frame`]. Navigation requests are stamped with that clock, so hosts should tick
/// before dispatching input.
#[derive(Clone, Debug)]
pub struct Stage<E, I = alloc::string::String> {
    env: E,
    now_ms: u64,
    frame_requested: bool,
    // `None` marks an inert trigger attached without a region.
    triggers: Slots<Option<Observation>>,
    samplers: Slots<ScrollSampler>,
    carousels: Slots<Carousel<I>>,
    loaders: Slots<LoadingProgress>,
}

impl<E: Environment, I> Stage<E, I> {
    pub fn new(env: E, now_ms: u64) -> Self {
        adebug!(now_ms, "Stage::new");
        Self {
            env,
            now_ms,
            frame_requested: false,
            triggers: Slots::default(),
            samplers: Slots::default(),
            carousels: Slots::default(),
            loaders: Slots::default(),
        }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access to the environment. Call the matching event method (`on_scroll`,
    /// `on_resize`, `on_layout`) after changing it.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn advance_clock(&mut self, now_ms: u64) {
        if now_ms < self.now_ms {
            awarn!(now_ms, current = self.now_ms, "Stage: clock went backwards, ignoring");
            return;
        }
        self.now_ms = now_ms;
    }

    // Visibility triggers.

    /// Starts observing `region`.
    ///
    /// `None` yields an inert handle whose visibility is always `false`. Otherwise the region is
    /// evaluated once right away, the way an intersection observer reports on `observe()`.
    pub fn attach(
        &mut self,
        region: Option<RegionId>,
        options: VisibilityOptions,
    ) -> Result<TriggerHandle> {
        let trigger = VisibilityTrigger::new(options)?;
        let Some(region) = region else {
            atrace!("Stage::attach: inert trigger");
            return Ok(TriggerHandle(self.triggers.insert(None)));
        };
        let mut observation = Observation { region, trigger };
        if let Some(rect) = self.env.region_rect(region) {
            observation.trigger.observe(rect, self.env.viewport());
        }
        adebug!(region = region.0, "Stage::attach");
        Ok(TriggerHandle(self.triggers.insert(Some(observation))))
    }

    pub fn is_visible(&self, handle: TriggerHandle) -> Result<bool> {
        let entry = self.triggers.get(handle.0).ok_or(Error::InvalidHandle)?;
        Ok(entry.as_ref().is_some_and(|o| o.trigger.is_visible()))
    }

    /// Whether the trigger still receives updates (one-shot triggers stop after revealing).
    pub fn is_observing(&self, handle: TriggerHandle) -> Result<bool> {
        let entry = self.triggers.get(handle.0).ok_or(Error::InvalidHandle)?;
        Ok(entry.as_ref().is_some_and(|o| o.trigger.is_observing()))
    }

    /// Releases the observation. Re-attaching the same region later starts from scratch.
    pub fn detach(&mut self, handle: TriggerHandle) -> Result<()> {
        let Some(entry) = self.triggers.remove(handle.0) else {
            awarn!(?handle, "Stage::detach: invalid handle");
            return Err(Error::InvalidHandle);
        };
        if let Some(mut o) = entry {
            o.trigger.disconnect();
        }
        Ok(())
    }

    /// Re-evaluates every live observation against the environment.
    ///
    /// Returns the handles whose visibility changed, in attach-slot order.
    pub fn on_layout(&mut self) -> Vec<TriggerHandle> {
        let viewport = self.env.viewport();
        let env = &self.env;
        let mut changed = Vec::new();
        self.triggers.for_each_mut(|key, entry| {
            let Some(o) = entry else {
                return;
            };
            if !o.trigger.is_observing() {
                return;
            }
            let Some(rect) = env.region_rect(o.region) else {
                return;
            };
            if o.trigger.observe(rect, viewport).is_some() {
                changed.push(TriggerHandle(key));
            }
        });
        changed
    }

    // Scroll samplers.

    /// Starts a sampler seeded from the current viewport width and scroll position.
    pub fn start(&mut self, options: ScrollOptions) -> Result<SamplerHandle> {
        let sampler =
            ScrollSampler::with_initial(options, self.env.viewport().width, self.env.scroll_y())?;
        adebug!(offset = sampler.offset(), "Stage::start");
        Ok(SamplerHandle(self.samplers.insert(sampler)))
    }

    pub fn current_offset(&self, handle: SamplerHandle) -> Result<f64> {
        self.sampler(handle).map(ScrollSampler::offset)
    }

    pub fn is_past_threshold(&self, handle: SamplerHandle) -> Result<bool> {
        self.sampler(handle).map(ScrollSampler::is_past_threshold)
    }

    pub fn scroll_state(&self, handle: SamplerHandle) -> Result<ScrollState> {
        self.sampler(handle).map(ScrollSampler::state)
    }

    /// Removes the sampler; its scroll and resize subscriptions end with it.
    pub fn stop(&mut self, handle: SamplerHandle) -> Result<()> {
        self.samplers
            .remove(handle.0)
            .map(|_| ())
            .ok_or(Error::InvalidHandle)
    }

    fn sampler(&self, handle: SamplerHandle) -> Result<&ScrollSampler> {
        self.samplers.get(handle.0).ok_or(Error::InvalidHandle)
    }

    /// Scroll listener. Reads the scroll position from the environment and hands it to every
    /// sampler.
    ///
    /// Returns `true` when the host must request an animation frame. Notifications arriving
    /// while a frame is already requested are coalesced into it.
    pub fn on_scroll(&mut self) -> bool {
        let raw = self.env.scroll_y();
        for s in self.samplers.values_mut() {
            s.on_scroll(raw);
        }
        let request = !self.frame_requested;
        self.frame_requested = true;
        atrace!(raw, request, "Stage::on_scroll");
        request
    }

    /// Resize listener. Updates device classes and re-runs the intersection pass.
    pub fn on_resize(&mut self) -> Vec<TriggerHandle> {
        let width = self.env.viewport().width;
        for s in self.samplers.values_mut() {
            s.on_resize(width);
        }
        self.on_layout()
    }

    /// Whether a frame callback is outstanding.
    pub fn needs_frame(&self) -> bool {
        self.frame_requested
    }

    /// Animation-frame callback: applies the coalesced scroll samples, then re-evaluates
    /// visibility (scrolling moves regions relative to the viewport).
    pub fn on_frame(&mut self, now_ms: u64) -> Vec<TriggerHandle> {
        self.advance_clock(now_ms);
        self.frame_requested = false;
        for s in self.samplers.values_mut() {
            s.on_frame();
        }
        self.on_layout()
    }

    // Carousels.

    /// Creates a carousel whose auto-advance cadence starts at the stage clock.
    pub fn create(&mut self, items: Vec<I>, options: CarouselOptions) -> Result<CarouselHandle> {
        let carousel = Carousel::new(items, options, self.now_ms)?;
        Ok(CarouselHandle(self.carousels.insert(carousel)))
    }

    pub fn next(&mut self, handle: CarouselHandle) -> Result<bool> {
        let now_ms = self.now_ms;
        Ok(self.carousel_mut(handle)?.next(now_ms))
    }

    pub fn previous(&mut self, handle: CarouselHandle) -> Result<bool> {
        let now_ms = self.now_ms;
        Ok(self.carousel_mut(handle)?.previous(now_ms))
    }

    pub fn go_to(&mut self, handle: CarouselHandle, index: usize) -> Result<bool> {
        let now_ms = self.now_ms;
        Ok(self.carousel_mut(handle)?.go_to(index, now_ms))
    }

    pub fn set_auto_play(&mut self, handle: CarouselHandle, auto_play: bool) -> Result<()> {
        let now_ms = self.now_ms;
        self.carousel_mut(handle)?.set_auto_play(auto_play, now_ms);
        Ok(())
    }

    pub fn carousel_state(&self, handle: CarouselHandle) -> Result<CarouselState> {
        self.carousel(handle).map(Carousel::state)
    }

    pub fn current_item(&self, handle: CarouselHandle) -> Result<&I> {
        self.carousel(handle).map(Carousel::current)
    }

    pub fn carousel(&self, handle: CarouselHandle) -> Result<&Carousel<I>> {
        self.carousels.get(handle.0).ok_or(Error::InvalidHandle)
    }

    fn carousel_mut(&mut self, handle: CarouselHandle) -> Result<&mut Carousel<I>> {
        self.carousels.get_mut(handle.0).ok_or(Error::InvalidHandle)
    }

    /// Cancels the carousel's timers and releases its lock, even mid-transition.
    pub fn teardown(&mut self, handle: CarouselHandle) -> Result<()> {
        let Some(mut carousel) = self.carousels.remove(handle.0) else {
            awarn!(?handle, "Stage::teardown: invalid handle");
            return Err(Error::InvalidHandle);
        };
        carousel.teardown();
        Ok(())
    }

    // Splash screens.

    pub fn start_loading(&mut self, options: LoadingOptions) -> Result<LoadingHandle> {
        let loading = LoadingProgress::new(options, self.now_ms)?;
        Ok(LoadingHandle(self.loaders.insert(loading)))
    }

    pub fn loading_progress(&self, handle: LoadingHandle) -> Result<u8> {
        self.loader(handle).map(LoadingProgress::progress)
    }

    pub fn loading_phase(&self, handle: LoadingHandle) -> Result<LoadingPhase> {
        self.loader(handle).map(LoadingProgress::phase)
    }

    pub fn finish_loading(&mut self, handle: LoadingHandle) -> Result<()> {
        self.loaders
            .get_mut(handle.0)
            .ok_or(Error::InvalidHandle)?
            .finish();
        Ok(())
    }

    pub fn dismiss_loading(&mut self, handle: LoadingHandle) -> Result<()> {
        self.loaders
            .remove(handle.0)
            .map(|_| ())
            .ok_or(Error::InvalidHandle)
    }

    fn loader(&self, handle: LoadingHandle) -> Result<&LoadingProgress> {
        self.loaders.get(handle.0).ok_or(Error::InvalidHandle)
    }

    // Timers.

    /// Timer callback: fires every carousel and splash-screen event due at or before `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        self.advance_clock(now_ms);
        let now_ms = self.now_ms;
        for c in self.carousels.values_mut() {
            c.tick(now_ms);
        }
        for l in self.loaders.values_mut() {
            l.tick(now_ms);
        }
    }

    /// The earliest time any owned timer needs `tick`, for arming a single host timer.
    pub fn next_deadline(&self) -> Option<u64> {
        self.carousels
            .values()
            .filter_map(Carousel::next_deadline)
            .chain(self.loaders.values().filter_map(LoadingProgress::next_deadline))
            .min()
    }

    /// Number of live components (triggers, samplers, carousels, splash screens).
    pub fn live_count(&self) -> usize {
        self.triggers.len() + self.samplers.len() + self.carousels.len() + self.loaders.len()
    }
}
