// Example: adapter-driven review carousel with user input racing the auto-advance timer.
use showcase::{Carousel, CarouselOptions};

fn main() {
    let reviews = vec!["anna.webp", "marko.webp", "jelena.webp", "ivan.webp"];
    let mut c = Carousel::new(
        reviews,
        CarouselOptions::new().with_on_change(Some(|s: &showcase::CarouselState| {
            println!("  state: {s:?}");
        })),
        0,
    )
    .expect("non-empty carousel");

    // Simulate a 60fps host loop for 10 seconds.
    let mut now_ms = 0u64;
    while now_ms <= 10_000 {
        if c.tick(now_ms) {
            println!("t={now_ms}ms showing {}", c.current());
        }

        // The user taps "previous" just before the first auto tick, then mashes "next".
        if now_ms == 3_904 {
            println!("t={now_ms}ms previous -> {}", c.previous(now_ms));
        }
        if (3_920..4_200).contains(&now_ms) && now_ms % 80 == 0 {
            println!("t={now_ms}ms next -> {} (dropped while locked)", c.next(now_ms));
        }

        now_ms += 16;
    }

    c.teardown();
    println!("torn down at index {}, deadline={:?}", c.current_index(), c.next_deadline());
}
