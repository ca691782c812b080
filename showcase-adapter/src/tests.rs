use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use showcase::{
    CarouselOptions, ConfigError, DeviceClass, LoadingOptions, LoadingPhase, Rect, ScrollOptions,
    Viewport, VisibilityOptions,
};

const HERO: RegionId = RegionId(1);
const PRICING: RegionId = RegionId(2);

fn page(width: f64) -> ManualEnvironment {
    let mut env = ManualEnvironment::new(Viewport::new(width, 800.0));
    env.place_region(HERO, Rect::new(0.0, 0.0, width, 600.0));
    env.place_region(PRICING, Rect::new(0.0, 2400.0, width, 500.0));
    env
}

fn scroll_to(stage: &mut Stage<ManualEnvironment>, y: f64, now_ms: u64) -> Vec<TriggerHandle> {
    stage.env_mut().set_scroll_y(y);
    stage.on_scroll();
    stage.on_frame(now_ms)
}

fn reviews() -> Vec<String> {
    ["review-1.webp", "review-2.webp", "review-3.webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn inert_trigger_never_becomes_visible() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let h = stage.attach(None, VisibilityOptions::default()).unwrap();
    assert_eq!(stage.is_visible(h), Ok(false));
    scroll_to(&mut stage, 2400.0, 16);
    assert_eq!(stage.is_visible(h), Ok(false));
    assert_eq!(stage.detach(h), Ok(()));
    assert_eq!(stage.is_visible(h), Err(Error::InvalidHandle));
}

#[test]
fn attach_evaluates_immediately() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let hero = stage.attach(Some(HERO), VisibilityOptions::default()).unwrap();
    let pricing = stage.attach(Some(PRICING), VisibilityOptions::default()).unwrap();
    assert_eq!(stage.is_visible(hero), Ok(true));
    assert_eq!(stage.is_visible(pricing), Ok(false));
}

#[test]
fn one_shot_reveal_survives_scrolling_away() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let h = stage
        .attach(
            Some(PRICING),
            VisibilityOptions::default().with_on_change(Some({
                let fired = Arc::clone(&fired);
                move |_: &bool| {
                    fired.fetch_add(1, Ordering::SeqCst);
                }
            })),
        )
        .unwrap();

    assert!(scroll_to(&mut stage, 1000.0, 16).is_empty());
    assert_eq!(scroll_to(&mut stage, 2000.0, 32), vec![h]);
    assert_eq!(stage.is_visible(h), Ok(true));
    assert_eq!(stage.is_observing(h), Ok(false));

    assert!(scroll_to(&mut stage, 0.0, 48).is_empty());
    assert_eq!(stage.is_visible(h), Ok(true));
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    stage.detach(h).unwrap();
    scroll_to(&mut stage, 2400.0, 64);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(stage.is_visible(h), Err(Error::InvalidHandle));
}

#[test]
fn detaching_before_intersection_never_reveals() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let h = stage
        .attach(
            Some(PRICING),
            VisibilityOptions::default().with_on_change(Some({
                let fired = Arc::clone(&fired);
                move |_: &bool| {
                    fired.fetch_add(1, Ordering::SeqCst);
                }
            })),
        )
        .unwrap();
    stage.detach(h).unwrap();
    scroll_to(&mut stage, 2400.0, 16);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(stage.detach(h), Err(Error::InvalidHandle));
}

#[test]
fn reattaching_starts_a_fresh_observation() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let first = stage.attach(Some(HERO), VisibilityOptions::default()).unwrap();
    stage.detach(first).unwrap();
    scroll_to(&mut stage, 3000.0, 16);

    let second = stage.attach(Some(HERO), VisibilityOptions::default()).unwrap();
    assert_ne!(first, second);
    assert_eq!(stage.is_visible(second), Ok(false));
    assert_eq!(stage.is_visible(first), Err(Error::InvalidHandle));
}

#[test]
fn continuous_trigger_follows_the_viewport() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let h = stage
        .attach(Some(HERO), VisibilityOptions::default().with_once(false))
        .unwrap();
    assert_eq!(stage.is_visible(h), Ok(true));
    assert_eq!(scroll_to(&mut stage, 1500.0, 16), vec![h]);
    assert_eq!(stage.is_visible(h), Ok(false));
    assert_eq!(scroll_to(&mut stage, 100.0, 32), vec![h]);
    assert_eq!(stage.is_visible(h), Ok(true));
}

#[test]
fn unlaid_out_regions_are_skipped() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let h = stage
        .attach(Some(RegionId(99)), VisibilityOptions::default())
        .unwrap();
    assert_eq!(stage.is_visible(h), Ok(false));
    stage
        .env_mut()
        .place_region(RegionId(99), Rect::new(0.0, 100.0, 10.0, 10.0));
    assert_eq!(stage.on_layout(), vec![h]);
    stage.env_mut().remove_region(RegionId(99));
    assert!(stage.on_layout().is_empty());
    assert_eq!(stage.is_visible(h), Ok(true));
}

#[test]
fn bad_options_fail_fast() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    assert_eq!(
        stage.attach(Some(HERO), VisibilityOptions::default().with_threshold(-0.1)),
        Err(Error::Configuration(ConfigError::ThresholdOutOfRange(-0.1)))
    );
    assert_eq!(
        stage.create(Vec::new(), CarouselOptions::default()),
        Err(Error::Configuration(ConfigError::EmptyItems))
    );
    assert_eq!(
        stage.create(reviews(), CarouselOptions::default().with_interval_ms(0)),
        Err(Error::Configuration(ConfigError::ZeroInterval))
    );
    assert_eq!(stage.live_count(), 0);
}

#[test]
fn sampler_reports_scaled_offsets_per_device_class() {
    let mut env = page(500.0);
    env.set_scroll_y(200.0);
    let mut stage: Stage<_> = Stage::new(env, 0);
    let s = stage.start(ScrollOptions::default()).unwrap();
    assert_eq!(stage.current_offset(s), Ok(100.0));
    assert_eq!(stage.is_past_threshold(s), Ok(true));

    stage.env_mut().set_viewport(Viewport::new(1200.0, 800.0));
    stage.on_resize();
    assert_eq!(stage.current_offset(s), Ok(200.0));
    assert_eq!(stage.is_past_threshold(s), Ok(true));
    assert_eq!(
        stage.scroll_state(s).map(|st| st.device_class),
        Ok(DeviceClass::Standard)
    );
}

#[test]
fn scroll_bursts_coalesce_into_one_frame() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let s = stage.start(ScrollOptions::default()).unwrap();

    let mut requests = 0;
    for y in [10.0, 20.0, 30.0, 45.0] {
        stage.env_mut().set_scroll_y(y);
        if stage.on_scroll() {
            requests += 1;
        }
    }
    assert_eq!(requests, 1);
    assert!(stage.needs_frame());
    // Nothing is applied until the frame runs.
    assert_eq!(stage.current_offset(s), Ok(0.0));

    stage.on_frame(16);
    assert!(!stage.needs_frame());
    assert_eq!(stage.current_offset(s), Ok(45.0));
    assert_eq!(stage.is_past_threshold(s), Ok(false));
}

#[test]
fn stopped_sampler_handle_is_invalid() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let s = stage.start(ScrollOptions::default()).unwrap();
    stage.stop(s).unwrap();
    assert_eq!(stage.current_offset(s), Err(Error::InvalidHandle));
    assert_eq!(stage.is_past_threshold(s), Err(Error::InvalidHandle));
    assert_eq!(stage.stop(s), Err(Error::InvalidHandle));
    // Scrolling after stop is harmless.
    scroll_to(&mut stage, 500.0, 16);
}

#[test]
fn stale_handles_do_not_resolve_after_slot_reuse() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let old = stage.start(ScrollOptions::default()).unwrap();
    stage.stop(old).unwrap();
    let new = stage.start(ScrollOptions::default()).unwrap();
    assert_ne!(old, new);
    assert_eq!(stage.current_offset(old), Err(Error::InvalidHandle));
    assert_eq!(stage.current_offset(new), Ok(0.0));
}

#[test]
fn carousel_runs_on_the_stage_clock() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 1000);
    let c = stage.create(reviews(), CarouselOptions::default()).unwrap();
    assert_eq!(stage.next_deadline(), Some(5000));

    stage.tick(5000);
    assert!(stage.carousel_state(c).unwrap().is_transitioning);
    // Manual input while the auto-advance transition is in flight is dropped.
    assert_eq!(stage.next(c), Ok(false));
    assert_eq!(stage.go_to(c, 2), Ok(false));

    stage.tick(5300);
    assert_eq!(stage.current_item(c).map(String::as_str), Ok("review-2.webp"));
    assert_eq!(stage.previous(c), Ok(true));
    stage.tick(5600);
    assert_eq!(stage.carousel_state(c).unwrap().index, 0);
}

#[test]
fn go_to_current_index_is_a_no_op() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let c = stage
        .create(reviews(), CarouselOptions::default().with_auto_play(false))
        .unwrap();
    assert_eq!(stage.go_to(c, 0), Ok(false));
    assert_eq!(stage.go_to(c, 7), Ok(false));
    assert!(!stage.carousel_state(c).unwrap().is_transitioning);
    assert_eq!(stage.next_deadline(), None);
}

#[test]
fn teardown_mid_transition_stops_everything() {
    let changes = Arc::new(AtomicUsize::new(0));
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let c = stage
        .create(
            reviews(),
            CarouselOptions::default().with_on_change(Some({
                let changes = Arc::clone(&changes);
                move |_: &showcase::CarouselState| {
                    changes.fetch_add(1, Ordering::SeqCst);
                }
            })),
        )
        .unwrap();
    stage.tick(100);
    assert_eq!(stage.next(c), Ok(true));
    let seen = changes.load(Ordering::SeqCst);

    assert_eq!(stage.teardown(c), Ok(()));
    assert_eq!(stage.next_deadline(), None);
    stage.tick(60_000);
    assert_eq!(changes.load(Ordering::SeqCst), seen);
    assert_eq!(stage.carousel_state(c), Err(Error::InvalidHandle));
    assert_eq!(stage.next(c), Err(Error::InvalidHandle));
    assert_eq!(stage.teardown(c), Err(Error::InvalidHandle));
}

#[test]
fn stage_tick_at_the_end_of_the_clock_returns() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let c = stage.create(reviews(), CarouselOptions::default()).unwrap();
    stage.tick(u64::MAX);
    assert_eq!(stage.carousel_state(c).map(|s| s.index), Ok(1));
    assert_eq!(stage.next_deadline(), None);
}

#[test]
fn toggling_auto_play_through_the_stage() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let c = stage.create(reviews(), CarouselOptions::default()).unwrap();
    stage.tick(1000);
    stage.set_auto_play(c, false).unwrap();
    assert_eq!(stage.next_deadline(), None);
    stage.set_auto_play(c, true).unwrap();
    assert_eq!(stage.next_deadline(), Some(5000));
}

#[test]
fn clock_never_runs_backwards() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 500);
    stage.tick(400);
    assert_eq!(stage.now_ms(), 500);
    stage.on_frame(800);
    assert_eq!(stage.now_ms(), 800);
}

#[test]
fn splash_screen_hands_over_to_the_page() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let l = stage.start_loading(LoadingOptions::default()).unwrap();
    let c = stage
        .create(reviews(), CarouselOptions::default().with_auto_play(false))
        .unwrap();
    assert_eq!(stage.next_deadline(), Some(30));

    stage.tick(750);
    assert_eq!(stage.loading_progress(l), Ok(50));
    assert_eq!(stage.loading_phase(l), Ok(LoadingPhase::Loading));

    stage.tick(2329);
    assert_eq!(stage.loading_phase(l), Ok(LoadingPhase::Hidden));
    stage.tick(2330);
    assert_eq!(stage.loading_phase(l), Ok(LoadingPhase::Complete));
    stage.dismiss_loading(l).unwrap();
    assert_eq!(stage.loading_progress(l), Err(Error::InvalidHandle));
    assert_eq!(stage.carousel_state(c).map(|s| s.index), Ok(0));
}

#[test]
fn finish_loading_skips_ahead() {
    let mut stage: Stage<_> = Stage::new(page(1200.0), 0);
    let l = stage.start_loading(LoadingOptions::default()).unwrap();
    stage.finish_loading(l).unwrap();
    assert_eq!(stage.loading_progress(l), Ok(100));
    assert_eq!(stage.loading_phase(l), Ok(LoadingPhase::Complete));
    assert_eq!(stage.next_deadline(), None);
}

proptest! {
    #[test]
    fn frame_delivers_the_latest_scroll_position(
        width in 300.0f64..1600.0,
        positions in prop::collection::vec(0.0f64..5000.0, 1..20),
    ) {
        let mut stage: Stage<_> = Stage::new(page(width), 0);
        let s = stage.start(ScrollOptions::default()).unwrap();
        for &y in &positions {
            stage.env_mut().set_scroll_y(y);
            stage.on_scroll();
        }
        stage.on_frame(16);

        let last = positions[positions.len() - 1];
        let expected = if width <= 768.0 { last * 0.5 } else { last };
        prop_assert_eq!(stage.current_offset(s), Ok(expected));
        prop_assert_eq!(stage.is_past_threshold(s), Ok(last > 50.0));
    }
}
