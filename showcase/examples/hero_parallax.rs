// Example: frame-coalesced scroll sampling feeding hero parallax layers.
use showcase::{ParallaxLayer, ScrollOptions, ScrollSampler};

fn main() {
    let background = ParallaxLayer::new(0.5);
    let title = ParallaxLayer::new(0.4)
        .with_fade_out(0.002)
        .with_scale_falloff(0.0005, 0.8);
    let overlay = ParallaxLayer::new(0.0).with_fade_in(0.01);

    for width in [1280.0, 390.0] {
        println!("viewport width {width}");
        let mut sampler = ScrollSampler::with_initial(ScrollOptions::new(), width, 0.0)
            .expect("default options are valid");

        // Several wheel events land between two frames; only the last one counts.
        for burst in [[20.0, 45.0, 80.0], [120.0, 180.0, 260.0], [300.0, 360.0, 420.0]] {
            let mut requested = 0;
            for raw in burst {
                if sampler.on_scroll(raw) {
                    requested += 1;
                }
            }
            sampler.on_frame();

            let offset = sampler.offset();
            println!(
                "  frames requested={requested} raw={} offset={offset} scrolled={} bg=`{}` title=`{}` opacity={:.2} overlay={:.2}",
                sampler.raw_offset(),
                sampler.is_past_threshold(),
                background.sample(offset).to_transform_css(),
                title.sample(offset).to_transform_css(),
                title.sample(offset).opacity,
                overlay.sample(offset).opacity,
            );
        }
    }
}
