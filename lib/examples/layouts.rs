/// Layout example: the same word in every horizontal layout, then wrapped
use ascii_sig::{FigletRenderer, GlyphRenderer, HorizontalLayout, RenderConfig};

fn main() {
    let renderer = FigletRenderer::new();

    for layout in HorizontalLayout::all() {
        let config = RenderConfig {
            horizontal_layout: *layout,
            ..Default::default()
        };
        let art = renderer
            .render_line("Rust", &config)
            .expect("Failed to render");
        println!("{}:\n{}\n", layout.name(), art);
    }

    let narrow = RenderConfig {
        width: 40,
        ..Default::default()
    };
    let art = renderer
        .render_line("ASCII signature", &narrow)
        .expect("Failed to render");
    println!("Wrapped at {} columns:\n{}", narrow.width, art);
}
