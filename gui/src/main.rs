mod app;

use app::SignatureApp;
use ascii_sig::Settings;
use eframe::egui;

fn main() -> Result<(), eframe::Error> {
    // Configure logging
    env_logger::init();

    let settings = Settings::load().unwrap_or_else(|e| {
        log::warn!("Using default settings: {}", e);
        Settings::default()
    });

    // Configure viewport/window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("ASCII Signature Generator")
            .with_icon(load_icon()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "ASCII Signature Generator",
        options,
        Box::new(move |cc| Ok(Box::new(SignatureApp::new(cc, &settings)))),
    )
}

/// Application icon: an "A" drawn with block pixels
fn load_icon() -> egui::IconData {
    let icon_size = 32;
    let mut pixels = vec![0u8; icon_size * icon_size * 4];

    for y in 0..icon_size {
        for x in 0..icon_size {
            let idx = (y * icon_size + x) * 4;

            // Two slanted legs meeting at the top, plus a crossbar
            let left_leg = x + y / 3 >= 14 && x + y / 3 <= 17;
            let right_leg = x >= 14 + y / 3 && x <= 17 + y / 3;
            let crossbar = (18..=20).contains(&y) && (9..=23).contains(&x);
            let is_glyph = (4..=28).contains(&y) && (left_leg || right_leg || crossbar);

            if is_glyph {
                pixels[idx] = 255; // R
                pixels[idx + 1] = 255; // G
                pixels[idx + 2] = 255; // B
            } else {
                pixels[idx] = 40; // R
                pixels[idx + 1] = 40; // G
                pixels[idx + 2] = 120; // B
            }
            pixels[idx + 3] = 255; // A
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_size as u32,
        height: icon_size as u32,
    }
}
