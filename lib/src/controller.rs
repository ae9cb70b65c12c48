//! Form state and the controller that drives rendering
//!
//! The controller owns everything the window shows: the form, the render and
//! display options, whether the renderer is ready, and the last rendered art.
//! Renders run on the rayon pool and report back through a channel drained by
//! [`Controller::poll`].

use crate::config::{DisplayOptions, InputLimit, RenderConfig, STANDARD_FONT, Settings};
use crate::error::{ExportError, RenderError, SubmitError};
use crate::pipeline::RenderPipeline;
use crate::postprocess::strip_blank_separators;
use crate::renderer::{FigletRenderer, GlyphRenderer};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, error, info, warn};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default file name offered by the download dialog
pub const DOWNLOAD_FILE_NAME: &str = "ascii-art.txt";

/// Called from worker threads whenever a result is ready to be polled
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Everything the form can ask the controller to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Replace the text and clear any error
    UpdateText(String),
    /// Record an error, leaving the text alone
    SetError(String),
    /// Validate and start a render
    Submit,
}

/// Input text and the error shown beneath it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    text: String,
    error: Option<String>,
}

impl FormState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn update_text(&mut self, text: String) {
        self.text = text;
        self.error = None;
    }

    fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Check the text against `limit`; length counts characters, not bytes
    pub fn validate(&self, limit: InputLimit) -> Result<(), SubmitError> {
        if self.text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        let len = self.text.chars().count();
        let max = limit.max_chars();
        if len > max {
            return Err(SubmitError::TooLong { max, len });
        }
        Ok(())
    }
}

/// Handle for one submitted render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderJob(u64);

impl fmt::Display for RenderJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

enum Engine {
    Loading,
    Ready(Arc<RenderPipeline>),
    Failed(String),
}

enum Event {
    RendererLoaded(Result<Arc<dyn GlyphRenderer>, RenderError>),
    Rendered {
        job: RenderJob,
        result: Result<String, RenderError>,
    },
}

/// Owns the form, options, renderer readiness and displayed art
pub struct Controller {
    form: FormState,
    limit: InputLimit,
    render_config: RenderConfig,
    display: DisplayOptions,

    engine: Engine,
    /// Raw pipeline output; post-processing happens on the way out
    art: Option<String>,
    in_flight: usize,
    next_job: u64,

    events_tx: Sender<Event>,
    events_rx: Receiver<Event>,
    waker: Option<Waker>,
}

impl Controller {
    /// Start loading FIGlet fonts in the background
    pub fn new(settings: &Settings, waker: Option<Waker>) -> Self {
        Self::spawn_with(settings, waker, || {
            Ok(Arc::new(FigletRenderer::new()) as Arc<dyn GlyphRenderer>)
        })
    }

    /// Initialize the renderer with `loader` on a dedicated thread
    ///
    /// Until the loader reports back through [`Controller::poll`], submits
    /// fail with [`SubmitError::NotReady`].
    pub fn spawn_with<F>(settings: &Settings, waker: Option<Waker>, loader: F) -> Self
    where
        F: FnOnce() -> Result<Arc<dyn GlyphRenderer>, RenderError> + Send + 'static,
    {
        let mut controller = Self::with_engine(settings, waker, Engine::Loading);
        let tx = controller.events_tx.clone();
        let waker = controller.waker.clone();

        let spawned = std::thread::Builder::new()
            .name("font-loader".to_string())
            .spawn(move || {
                let result = loader();
                if tx.send(Event::RendererLoaded(result)).is_ok()
                    && let Some(wake) = waker
                {
                    wake();
                }
            });
        if let Err(e) = spawned {
            error!("Failed to start font loader: {}", e);
            controller.engine = Engine::Failed(e.to_string());
        }
        controller
    }

    /// Use an already initialized renderer
    pub fn with_renderer(
        settings: &Settings,
        waker: Option<Waker>,
        renderer: Arc<dyn GlyphRenderer>,
    ) -> Self {
        let mut controller = Self::with_engine(settings, waker, Engine::Loading);
        controller.install(renderer);
        controller
    }

    fn with_engine(settings: &Settings, waker: Option<Waker>, engine: Engine) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            form: FormState::default(),
            limit: settings.input_limit,
            render_config: settings.render.clone(),
            display: settings.display,
            engine,
            art: None,
            in_flight: 0,
            next_job: 0,
            events_tx,
            events_rx,
            waker,
        }
    }

    /// Apply a form action; submit failures end up in the form error
    pub fn dispatch(&mut self, action: FormAction) -> Option<RenderJob> {
        match action {
            FormAction::UpdateText(text) => {
                self.form.update_text(text);
                None
            }
            FormAction::SetError(message) => {
                self.form.set_error(message);
                None
            }
            FormAction::Submit => self.submit().ok(),
        }
    }

    /// Validate the form and start rendering the current text
    pub fn submit(&mut self) -> Result<RenderJob, SubmitError> {
        let result = self.try_submit();
        if let Err(ref err) = result {
            debug!("Submit rejected: {}", err);
            self.form.set_error(err.to_string());
        }
        result
    }

    fn try_submit(&mut self) -> Result<RenderJob, SubmitError> {
        self.form.validate(self.limit)?;
        self.render_config.validate()?;

        let pipeline = match &self.engine {
            Engine::Ready(pipeline) => Arc::clone(pipeline),
            Engine::Loading | Engine::Failed(_) => return Err(SubmitError::NotReady),
        };

        let job = RenderJob(self.next_job);
        self.next_job += 1;
        self.in_flight += 1;

        let text = self.form.text.clone();
        let config = self.render_config.clone();
        let tx = self.events_tx.clone();
        let waker = self.waker.clone();
        debug!("Starting render job {} ({} chars)", job, text.chars().count());

        rayon::spawn(move || {
            let result = pipeline.render(&text, &config);
            if tx.send(Event::Rendered { job, result }).is_ok()
                && let Some(wake) = waker
            {
                wake();
            }
        });

        Ok(job)
    }

    /// Apply every pending result; returns whether anything changed
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            changed = true;
        }
        changed
    }

    /// Block until the renderer has loaded and no render is in flight
    ///
    /// Returns `false` if `timeout` elapsed first.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        // No deadline at all when `timeout` is too large to represent
        let deadline = Instant::now().checked_add(timeout);
        self.poll();
        while self.is_busy() {
            let event = match deadline {
                Some(deadline) => self
                    .events_rx
                    .recv_timeout(deadline.saturating_duration_since(Instant::now()))
                    .ok(),
                None => self.events_rx.recv().ok(),
            };
            match event {
                Some(event) => self.apply(event),
                None => return false,
            }
        }
        true
    }

    fn is_busy(&self) -> bool {
        self.in_flight > 0 || matches!(self.engine, Engine::Loading)
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::RendererLoaded(Ok(renderer)) => {
                info!("Renderer ready");
                self.install(renderer);
            }
            Event::RendererLoaded(Err(err)) => {
                error!("Renderer failed to initialize: {}", err);
                self.engine = Engine::Failed(err.to_string());
            }
            Event::Rendered { job, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match result {
                    Ok(art) => {
                        debug!("Render job {} finished", job);
                        self.art = Some(art);
                        self.form.error = None;
                    }
                    Err(err) => {
                        error!("Render job {} failed: {}", job, err);
                        self.form.set_error(SubmitError::Rendering(err).to_string());
                    }
                }
            }
        }
    }

    /// Make `renderer` the engine, switching to an available font if the
    /// configured one is missing
    fn install(&mut self, renderer: Arc<dyn GlyphRenderer>) {
        let fonts = renderer.font_names();
        if !fonts.contains(&self.render_config.font) {
            let fallback = if fonts.iter().any(|f| f == STANDARD_FONT) {
                Some(STANDARD_FONT.to_string())
            } else {
                fonts.into_iter().next()
            };
            if let Some(font) = fallback {
                warn!(
                    "Font {} is not available, using {}",
                    self.render_config.font, font
                );
                self.render_config.font = font;
            }
        }
        self.engine = Engine::Ready(Arc::new(RenderPipeline::new(renderer)));
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn input_limit(&self) -> InputLimit {
        self.limit
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    /// Replace the render options; returns whether they changed
    pub fn set_render_config(&mut self, config: RenderConfig) -> bool {
        if self.render_config == config {
            return false;
        }
        self.render_config = config;
        true
    }

    pub fn display_options(&self) -> DisplayOptions {
        self.display
    }

    pub fn set_display_options(&mut self, display: DisplayOptions) {
        self.display = display;
    }

    /// Whether the glyph renderer finished initializing
    pub fn is_ready(&self) -> bool {
        matches!(self.engine, Engine::Ready(_))
    }

    /// Why the renderer could not be initialized, if it failed
    pub fn load_error(&self) -> Option<&str> {
        match &self.engine {
            Engine::Failed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Whether a render is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Fonts offered by the renderer; empty until it is ready
    pub fn font_names(&self) -> Vec<String> {
        match &self.engine {
            Engine::Ready(pipeline) => pipeline.renderer().font_names(),
            _ => Vec::new(),
        }
    }

    /// Art exactly as the pipeline produced it
    pub fn raw_art(&self) -> Option<&str> {
        self.art.as_deref()
    }

    /// Art with the display options applied
    pub fn displayed_art(&self) -> Option<String> {
        self.art.as_deref().map(|art| {
            if self.display.remove_line_spacing {
                strip_blank_separators(art)
            } else {
                art.to_string()
            }
        })
    }

    /// What the copy button puts on the clipboard
    pub fn copy_text(&self) -> Option<String> {
        self.displayed_art()
    }

    /// Write the displayed art to a plain-text file
    pub fn save_art(&self, path: &Path) -> Result<(), ExportError> {
        let art = self.displayed_art().ok_or(ExportError::NothingToSave)?;
        std::fs::write(path, art)?;
        info!("Saved ASCII art to {}", path.display());
        Ok(())
    }
}
