/// Basic example: render a two-line banner without the GUI
///
/// Loads the built-in FIGlet font, renders through the caching pipeline and
/// prints the raw art followed by the line-spacing-stripped variant.
use ascii_sig::{FigletRenderer, RenderConfig, RenderPipeline, strip_blank_separators};
use std::sync::Arc;

fn main() {
    println!("ASCII Signature - Basic Example");
    println!("===============================\n");

    let renderer = FigletRenderer::new();
    let pipeline = RenderPipeline::new(Arc::new(renderer));

    let config = RenderConfig::default();
    println!("Rendering with config:");
    println!("  - Font: {}", config.font);
    println!("  - Layout: {}", config.horizontal_layout.name());
    println!("  - Width: {}", config.width);
    println!();

    let art = pipeline
        .render("hello\nworld", &config)
        .expect("Failed to render");
    println!("{art}\n");

    println!("Without line spacing:\n");
    println!("{}", strip_blank_separators(&art));

    // Same text and config again: served from the cache
    pipeline
        .render("hello\nworld", &config)
        .expect("Failed to render");
    println!("\nCached renders: {}", pipeline.cache().len());
}
