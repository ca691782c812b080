// Example: a whole landing page driven through one stage.
use showcase::{CarouselOptions, LoadingOptions, Rect, ScrollOptions, Viewport, VisibilityOptions};
use showcase_adapter::{ManualEnvironment, RegionId, Stage};

const PROCESS: RegionId = RegionId(1);
const PRICING: RegionId = RegionId(2);
const REVIEWS: RegionId = RegionId(3);

fn main() -> Result<(), showcase_adapter::Error> {
    let mut env = ManualEnvironment::new(Viewport::new(390.0, 844.0));
    env.place_region(PROCESS, Rect::new(0.0, 900.0, 390.0, 700.0));
    env.place_region(PRICING, Rect::new(0.0, 1800.0, 390.0, 900.0));
    env.place_region(REVIEWS, Rect::new(0.0, 2900.0, 390.0, 600.0));

    let mut stage: Stage<_> = Stage::new(env, 0);
    let splash = stage.start_loading(LoadingOptions::default())?;
    let header = stage.start(ScrollOptions::default())?;
    let process = stage.attach(Some(PROCESS), VisibilityOptions::default())?;
    let pricing = stage.attach(Some(PRICING), VisibilityOptions::default())?;
    let reviews_section = stage.attach(Some(REVIEWS), VisibilityOptions::default())?;
    let carousel = stage.create(
        ["review-1.webp", "review-2.webp", "review-3.webp"]
            .map(String::from)
            .to_vec(),
        CarouselOptions::default(),
    )?;

    // Wait out the splash screen.
    while let Some(deadline) = stage.next_deadline() {
        stage.tick(deadline);
        if stage.loading_phase(splash)? == showcase::LoadingPhase::Complete {
            break;
        }
    }
    stage.dismiss_loading(splash)?;
    println!("t={}ms splash done", stage.now_ms());

    // The visitor scrolls down the page at a steady pace.
    let mut now_ms = stage.now_ms();
    for step in 1..=60 {
        now_ms += 100;
        stage.tick(now_ms);
        stage.env_mut().set_scroll_y(step as f64 * 50.0);
        if stage.on_scroll() {
            for h in stage.on_frame(now_ms) {
                let name = if h == process {
                    "process"
                } else if h == pricing {
                    "pricing"
                } else if h == reviews_section {
                    "reviews"
                } else {
                    "?"
                };
                println!("t={now_ms}ms revealed {name}");
            }
        }
    }

    println!(
        "header offset={} scrolled={} slide={}",
        stage.current_offset(header)?,
        stage.is_past_threshold(header)?,
        stage.current_item(carousel)?
    );

    stage.teardown(carousel)?;
    stage.stop(header)?;
    for h in [process, pricing, reviews_section] {
        stage.detach(h)?;
    }
    println!("live components left: {}", stage.live_count());
    Ok(())
}
