//! Glyph renderer capability and the FIGlet-backed implementation
//!
//! Fonts, kerning, smushing and width-based line breaking all come from
//! `letrs`; this module only picks the font and maps [`HorizontalLayout`]
//! onto the crate's horizontal smushing modes.

use crate::config::{HorizontalLayout, RenderConfig, STANDARD_FONT};
use crate::error::RenderError;
use letrs::font::Font;
use letrs::render::{LayoutMode, Renderer};
use log::{debug, info};
use std::collections::BTreeMap;

/// Turns one line of text into multi-line block-character art
///
/// Implementations must be fully initialized before they are handed out;
/// the controller never calls a renderer that is still loading.
pub trait GlyphRenderer: Send + Sync {
    /// Render a single line (no line breaks) with the given configuration
    fn render_line(&self, line: &str, config: &RenderConfig) -> Result<String, RenderError>;

    /// Names of the fonts this renderer can use
    fn font_names(&self) -> Vec<String>;
}

/// Renderer backed by parsed FIGlet fonts
pub struct FigletRenderer {
    fonts: BTreeMap<String, Font>,
}

impl FigletRenderer {
    /// Parse the built-in `Standard` font
    pub fn new() -> Self {
        let mut fonts = BTreeMap::new();
        fonts.insert(STANDARD_FONT.to_string(), Font::standard());
        info!("Loaded {} font(s)", fonts.len());
        Self { fonts }
    }
}

impl Default for FigletRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Smushing mode for `layout`; `None` keeps the font's own layout rules
fn smushing(layout: HorizontalLayout) -> Option<LayoutMode> {
    match layout {
        HorizontalLayout::Default => None,
        HorizontalLayout::Full => Some(LayoutMode::FullSize),
        HorizontalLayout::Fitted => Some(LayoutMode::Fitting),
        HorizontalLayout::Smushed => Some(LayoutMode::Smushing),
    }
}

/// Render `text` as one row block, without any width limit
fn render_unbounded(font: &Font, layout: HorizontalLayout, text: &str) -> String {
    let mut renderer = Renderer::new(font);
    if let Some(mode) = smushing(layout) {
        renderer = renderer.horizontal_layout(mode);
    }
    renderer.render(text)
}

fn width_of(art: &str) -> usize {
    art.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Pack as many characters per row block as fit in `width`, breaking
/// anywhere in the text
fn pack_chars(line: &str, width: usize, render: impl Fn(&str) -> String) -> String {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if current.trim().is_empty() || width_of(&render(&candidate)) <= width {
            current = candidate;
            continue;
        }
        blocks.push(render(current.trim_end()));
        current = if ch == ' ' {
            String::new()
        } else {
            ch.to_string()
        };
    }
    if !current.trim().is_empty() {
        blocks.push(render(current.trim_end()));
    }
    blocks.join("\n")
}

impl GlyphRenderer for FigletRenderer {
    fn render_line(&self, line: &str, config: &RenderConfig) -> Result<String, RenderError> {
        let font = self
            .fonts
            .get(&config.font)
            .ok_or_else(|| RenderError::UnknownFont(config.font.clone()))?;

        // Tabs and other whitespace render as plain spaces
        let line: String = line
            .chars()
            .map(|ch| if ch.is_whitespace() { ' ' } else { ch })
            .collect();

        // Characters missing from the font render as nothing at all
        let unsupported = line.chars().filter(|ch| *ch != ' ').find(|ch| {
            render_unbounded(font, config.horizontal_layout, &ch.to_string())
                .trim()
                .is_empty()
        });
        if let Some(ch) = unsupported {
            return Err(RenderError::UnsupportedCharacter(ch));
        }

        let width = config.width as usize;
        let art = render_unbounded(font, config.horizontal_layout, &line);
        if width_of(&art) <= width {
            return Ok(art);
        }

        debug!("Wrapping {} chars at {} columns", line.chars().count(), width);
        if config.whitespace_break {
            let mut renderer = Renderer::new(font).max_width(width);
            if let Some(mode) = smushing(config.horizontal_layout) {
                renderer = renderer.horizontal_layout(mode);
            }
            Ok(renderer.render(&line))
        } else {
            Ok(pack_chars(&line, width, |text| {
                render_unbounded(font, config.horizontal_layout, text)
            }))
        }
    }

    fn font_names(&self) -> Vec<String> {
        self.fonts.keys().cloned().collect()
    }
}
