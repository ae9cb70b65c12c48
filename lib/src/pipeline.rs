use crate::cache::{CacheKey, RenderCache};
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::renderer::GlyphRenderer;
use log::debug;
use rayon::prelude::*;
use std::sync::Arc;

/// Placed between consecutive line blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Stands in for a blank source line
pub const BLANK_BLOCK: &str = "";

/// Multi-line render pipeline with its memo cache
pub struct RenderPipeline {
    renderer: Arc<dyn GlyphRenderer>,
    cache: RenderCache,
}

impl RenderPipeline {
    pub fn new(renderer: Arc<dyn GlyphRenderer>) -> Self {
        Self {
            renderer,
            cache: RenderCache::new(),
        }
    }

    pub fn renderer(&self) -> &Arc<dyn GlyphRenderer> {
        &self.renderer
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Renders possibly multi-line text into one block of ASCII art
    ///
    /// 1. Return the cached art for (text, config) if there is one
    /// 2. Split on `\n`, dropping a trailing `\r` from each line
    /// 3. Blank lines become [`BLANK_BLOCK`], others go to the glyph renderer
    /// 4. Join the blocks with [`BLOCK_SEPARATOR`], in input order
    /// 5. Cache the joined art
    ///
    /// Lines are rendered in parallel and reassembled in order. The first
    /// failing line, by input position, is returned and nothing is cached.
    pub fn render(&self, text: &str, config: &RenderConfig) -> Result<String, RenderError> {
        let key = CacheKey::new(text, config);
        if let Some(art) = self.cache.get(&key) {
            return Ok(art);
        }

        let lines = split_lines(text);
        debug!("Rendering {} line(s) with font {}", lines.len(), config.font);

        let blocks: Vec<Result<String, RenderError>> = lines
            .par_iter()
            .map(|line| {
                if line.trim().is_empty() {
                    Ok(BLANK_BLOCK.to_string())
                } else {
                    self.renderer.render_line(line, config)
                }
            })
            .collect();
        let blocks = blocks.into_iter().collect::<Result<Vec<_>, _>>()?;

        let art = blocks.join(BLOCK_SEPARATOR);
        self.cache.put(key, art.clone());
        Ok(art)
    }
}

/// Split on line feeds, keeping blank lines (a trailing one included)
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HorizontalLayout;
    use crate::testing::RecordingRenderer;
    use pretty_assertions::assert_eq;

    fn pipeline() -> (Arc<RecordingRenderer>, RenderPipeline) {
        let renderer = Arc::new(RecordingRenderer::new());
        let pipeline = RenderPipeline::new(renderer.clone());
        (renderer, pipeline)
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(split_lines("A\n\nB"), vec!["A", "", "B"]);
        assert_eq!(split_lines("A\r\nB\n"), vec!["A", "B", ""]);
        assert_eq!(split_lines("A"), vec!["A"]);
    }

    #[test]
    fn test_single_line() {
        let (renderer, pipeline) = pipeline();
        let art = pipeline.render("HI", &RenderConfig::default()).unwrap();
        assert_eq!(art, "[HI]");
        assert_eq!(renderer.lines(), vec!["HI".to_string()]);
    }

    #[test]
    fn test_blank_line_becomes_spacing_block() {
        let (renderer, pipeline) = pipeline();
        let art = pipeline.render("A\n\nB", &RenderConfig::default()).unwrap();
        assert_eq!(art, "[A]\n\n\n\n[B]");

        // Blank lines never reach the renderer
        let mut rendered = renderer.lines();
        rendered.sort();
        assert_eq!(rendered, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_two_lines_in_order() {
        let (_, pipeline) = pipeline();
        let art = pipeline
            .render("hello\nworld", &RenderConfig::default())
            .unwrap();
        assert_eq!(art, "[hello]\n\n[world]");
        assert!(art.find("[hello]") < art.find("[world]"));
    }

    #[test]
    fn test_whitespace_only_line_is_blank() {
        let (renderer, pipeline) = pipeline();
        let art = pipeline.render("A\n   \nB", &RenderConfig::default()).unwrap();
        assert_eq!(art, "[A]\n\n\n\n[B]");
        assert_eq!(renderer.call_count(), 2);
    }

    #[test]
    fn test_second_render_is_cache_hit() {
        let (renderer, pipeline) = pipeline();
        let config = RenderConfig::default();

        let first = pipeline.render("hello\nworld", &config).unwrap();
        let calls = renderer.call_count();
        let second = pipeline.render("hello\nworld", &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(renderer.call_count(), calls);
        assert_eq!(pipeline.cache().len(), 1);
    }

    #[test]
    fn test_config_change_forces_fresh_render() {
        let (renderer, pipeline) = pipeline();
        let config = RenderConfig::default();
        pipeline.render("HI", &config).unwrap();

        let wider = RenderConfig {
            width: config.width + 10,
            ..config.clone()
        };
        pipeline.render("HI", &wider).unwrap();

        let fitted = RenderConfig {
            horizontal_layout: HorizontalLayout::Fitted,
            ..config
        };
        pipeline.render("HI", &fitted).unwrap();

        assert_eq!(renderer.call_count(), 3);
        assert_eq!(pipeline.cache().len(), 3);
        assert_eq!(renderer.configs()[1].width, 90);
    }

    #[test]
    fn test_failure_aborts_and_is_not_cached() {
        let renderer = Arc::new(RecordingRenderer::failing_on(&["bad"]));
        let pipeline = RenderPipeline::new(renderer);

        let result = pipeline.render("good\nbad\nalso good", &RenderConfig::default());
        assert_eq!(result, Err(RenderError::UnknownFont("bad".to_string())));
        assert!(pipeline.cache().is_empty());
    }

    #[test]
    fn test_first_failure_by_position_wins() {
        let renderer = Arc::new(RecordingRenderer::failing_on(&["one", "two"]));
        let pipeline = RenderPipeline::new(renderer);

        let result = pipeline.render("ok\none\ntwo", &RenderConfig::default());
        assert_eq!(result, Err(RenderError::UnknownFont("one".to_string())));
    }
}
