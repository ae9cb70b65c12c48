use ascii_sig::{
    Controller, DOWNLOAD_FILE_NAME, FormAction, HorizontalLayout, Settings,
    config::{MAX_WIDTH, MIN_WIDTH},
};
use eframe::egui;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the copy button reads "Copied!"
const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

const SUBMIT_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Enter);

/// Whether the platform copy command should copy the art
///
/// Ctrl/Cmd+C arrives as [`egui::Event::Copy`] rather than a key press. It
/// belongs to the text field while that has focus.
fn wants_copy(events: &[egui::Event], widget_focused: bool) -> bool {
    !widget_focused && events.iter().any(|e| matches!(e, egui::Event::Copy))
}

/// Main application state for the signature generator window
pub struct SignatureApp {
    controller: Controller,

    /// Whether to re-render automatically when render options change
    auto_render: bool,
    /// Render options changed since the last submit
    needs_rerender: bool,

    /// When the art was last copied, for the "Copied!" label
    copied_at: Option<Instant>,
    /// Save-as failures and the About text
    status_message: Option<String>,
}

impl SignatureApp {
    /// Create the application and start loading fonts
    pub fn new(cc: &eframe::CreationContext<'_>, settings: &Settings) -> Self {
        let ctx = cc.egui_ctx.clone();
        let waker: ascii_sig::Waker = Arc::new(move || ctx.request_repaint());

        Self {
            controller: Controller::new(settings, Some(waker)),
            auto_render: settings.auto_render,
            needs_rerender: false,
            copied_at: None,
            status_message: None,
        }
    }

    /// Copy the displayed art to the clipboard
    fn copy(&mut self, ctx: &egui::Context) {
        if let Some(text) = self.controller.copy_text() {
            log::debug!("Copying {} bytes to clipboard", text.len());
            ctx.copy_text(text);
            self.copied_at = Some(Instant::now());
        }
    }

    /// Ask for a destination and save the displayed art there
    fn download(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Text", &["txt"])
            .set_file_name(DOWNLOAD_FILE_NAME)
            .save_file()
            && let Err(e) = self.controller.save_art(&path)
        {
            log::error!("{}", e);
            self.status_message = Some(e.to_string());
        }
    }

    fn submit(&mut self) {
        self.needs_rerender = false;
        self.controller.dispatch(FormAction::Submit);
    }

    /// Render the options panel; returns whether a render option changed
    fn render_options(&mut self, ui: &mut egui::Ui) -> bool {
        let mut config = self.controller.render_config().clone();
        let mut display = self.controller.display_options();

        ui.heading("Options");
        ui.separator();

        ui.collapsing("Rendering", |ui| {
            let fonts = self.controller.font_names();
            egui::ComboBox::from_label("Font")
                .selected_text(config.font.clone())
                .show_ui(ui, |ui| {
                    for font in &fonts {
                        ui.selectable_value(&mut config.font, font.clone(), font.as_str());
                    }
                });

            egui::ComboBox::from_label("Layout")
                .selected_text(config.horizontal_layout.name())
                .show_ui(ui, |ui| {
                    for layout in HorizontalLayout::all() {
                        ui.selectable_value(&mut config.horizontal_layout, *layout, layout.name());
                    }
                })
                .response
                .on_hover_text("How tightly letters are packed");

            ui.add(egui::Slider::new(&mut config.width, MIN_WIDTH..=MAX_WIDTH).text("Width"))
                .on_hover_text("Columns before a line wraps");

            ui.checkbox(&mut config.whitespace_break, "Break at spaces")
                .on_hover_text("Wrap between words instead of between letters");
        });

        ui.add_space(8.0);

        ui.collapsing("Display", |ui| {
            ui.checkbox(&mut display.remove_line_spacing, "Remove line spacing")
                .on_hover_text("Drop the blank rows between lines");
            ui.checkbox(&mut display.high_contrast, "High contrast");
        });

        ui.add_space(16.0);
        ui.separator();

        ui.checkbox(&mut self.auto_render, "Auto-render")
            .on_hover_text("Render again when an option changes");

        self.controller.set_display_options(display);
        self.controller.set_render_config(config)
    }

    /// Render the input form
    fn render_form(&mut self, ui: &mut egui::Ui) {
        let max = self.controller.input_limit().max_chars();
        let mut text = self.controller.form().text().to_string();

        ui.label("Enter Your Text");
        let response = ui.add(
            egui::TextEdit::multiline(&mut text)
                .char_limit(max)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text(format!("Enter text (max {} chars)", max)),
        );
        if response.changed() {
            self.controller.dispatch(FormAction::UpdateText(text));
        }

        ui.horizontal(|ui| {
            ui.label(format!(
                "{} / {}",
                self.controller.form().text().chars().count(),
                max
            ));
            if let Some(error) = self.controller.form().error() {
                ui.colored_label(egui::Color32::RED, error);
            }
        });

        ui.add_space(4.0);

        if self.controller.is_ready() {
            if ui.button("Generate ASCII Art").clicked() {
                self.submit();
            }
        } else if let Some(reason) = self.controller.load_error() {
            ui.colored_label(egui::Color32::RED, format!("Fonts failed to load: {}", reason));
        } else {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading fonts...");
            });
        }
    }

    /// Render the output area with its copy and download buttons
    fn render_output(&mut self, ui: &mut egui::Ui) {
        if self.controller.is_loading() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Generating...");
            });
            return;
        }

        let art = self.controller.displayed_art();

        ui.horizontal(|ui| {
            let copied = self
                .copied_at
                .is_some_and(|at| at.elapsed() < COPIED_FEEDBACK);
            let label = if copied { "Copied!" } else { "Copy" };

            if ui.add_enabled(art.is_some(), egui::Button::new(label)).clicked() {
                self.copy(ui.ctx());
            }
            if ui
                .add_enabled(art.is_some(), egui::Button::new("Download"))
                .clicked()
            {
                self.download();
            }
            if copied {
                ui.ctx().request_repaint_after(COPIED_FEEDBACK);
            }
        });

        ui.add_space(4.0);

        let high_contrast = self.controller.display_options().high_contrast;
        let (fg, bg) = if high_contrast {
            (egui::Color32::WHITE, egui::Color32::BLACK)
        } else {
            (
                ui.visuals().text_color(),
                ui.visuals().extreme_bg_color,
            )
        };

        egui::Frame::group(ui.style()).fill(bg).show(ui, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let text = match &art {
                    Some(art) => egui::RichText::new(art).monospace().color(fg),
                    None => egui::RichText::new("Your ASCII art will appear here...")
                        .monospace()
                        .weak(),
                };
                ui.add(egui::Label::new(text).extend());
            });
        });
    }
}

impl eframe::App for SignatureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();

        // Keyboard shortcuts
        if ctx.input_mut(|i| i.consume_shortcut(&SUBMIT_SHORTCUT)) && self.controller.is_ready() {
            self.submit();
        }
        let widget_focused = ctx.memory(|m| m.focused().is_some());
        if ctx.input(|i| wants_copy(&i.events, widget_focused)) {
            self.copy(ctx);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save As...").clicked() {
                        self.download();
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.status_message = Some(
                            "ASCII Signature Generator\nFIGlet fonts\n\nCtrl+Enter: generate\nCtrl+C outside the text field: copy".to_string(),
                        );
                        ui.close();
                    }
                });
            });
        });

        // Left panel: options
        egui::SidePanel::left("options_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.render_options(ui) {
                        self.needs_rerender = true;
                    }
                });
            });

        // Central panel: form and output
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("ASCII Signature Generator");
            ui.separator();

            if let Some(ref msg) = self.status_message {
                ui.label(msg.as_str());
                if ui.button("Dismiss").clicked() {
                    self.status_message = None;
                }
                ui.separator();
            }

            // Auto-render if needed
            if self.auto_render
                && self.needs_rerender
                && self.controller.is_ready()
                && self.controller.raw_art().is_some()
            {
                self.submit();
            }

            self.render_form(ui);
            ui.add_space(12.0);
            self.render_output(ui);
        });
    }
}
