//! Presentation options: page title, color palette, and font size.
//!
//! Color strings are passed through to the page untouched; validating them is
//! the browser's job.

use super::backend::RenderBackend;
use crate::error::Result;
use crate::types::Presentation;

/// Colors parsed from a `"background,foreground,bar"` option string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    pub bg: Option<String>,
    pub fg: Option<String>,
    pub bar: Option<String>,
}

impl Palette {
    /// Parse a comma-separated palette. Missing or empty parts are `None`.
    pub fn parse(colors: Option<&str>) -> Self {
        let mut parts = colors
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .map(|part| (!part.is_empty()).then(|| part.to_string()));
        Self {
            bg: parts.next().flatten(),
            fg: parts.next().flatten(),
            bar: parts.next().flatten(),
        }
    }

    /// Style rules for this palette.
    ///
    /// Foreground and background rules need both colors; bar rules need the
    /// bar color.
    pub fn rules(&self) -> Vec<String> {
        let mut rules = Vec::new();
        if let (Some(bg), Some(fg)) = (&self.bg, &self.fg) {
            rules.push(format!("body {{ background-color: {bg} }}"));
            rules.push(format!(".axis path, .axis line {{ stroke: {fg} }}"));
            rules.push(format!("text, text.outside {{ fill: {fg} }}"));
            rules.push(format!("text.inside {{ fill: {bg} }}"));
            rules.push(format!("pre.lines {{ color: {fg} }}"));
        }
        if let Some(bar) = &self.bar {
            rules.push(format!(".dot, .bar {{ fill: {bar} }}"));
            rules.push(format!("path.line {{ stroke: {bar} }}"));
        }
        rules
    }
}

/// Every override rule for a chart's presentation options.
pub fn style_rules(presentation: &Presentation) -> Vec<String> {
    let mut rules = Palette::parse(presentation.colors.as_deref()).rules();
    if let Some(size) = presentation
        .font_size
        .as_deref()
        .map(str::trim)
        .filter(|size| !size.is_empty())
    {
        rules.push(format!("body {{ font-size: {size} }}"));
    }
    rules
}

/// Apply title and style overrides to the page.
///
/// An empty label leaves the current page title alone; the override block is
/// always replaced, so options dropped by a later update stop applying.
pub fn apply_style<B: RenderBackend + ?Sized>(
    presentation: &Presentation,
    backend: &mut B,
) -> Result<()> {
    if !presentation.label.is_empty() {
        backend.set_title(&presentation.label)?;
    }
    backend.set_style_overrides(&style_rules(presentation))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn presentation(colors: Option<&str>, font_size: Option<&str>) -> Presentation {
        Presentation {
            label: "chart".to_string(),
            colors: colors.map(str::to_string),
            font_size: font_size.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_full_palette() {
        let palette = Palette::parse(Some("black, white ,#f00"));
        assert_eq!(palette.bg.as_deref(), Some("black"));
        assert_eq!(palette.fg.as_deref(), Some("white"));
        assert_eq!(palette.bar.as_deref(), Some("#f00"));
    }

    #[test]
    fn test_parse_bar_only() {
        let palette = Palette::parse(Some(",,red"));
        assert_eq!(
            palette,
            Palette {
                bg: None,
                fg: None,
                bar: Some("red".to_string()),
            }
        );
        assert_eq!(
            palette.rules(),
            vec![".dot, .bar { fill: red }", "path.line { stroke: red }"]
        );
    }

    #[test]
    fn test_background_without_foreground_is_ignored() {
        let palette = Palette::parse(Some("black"));
        assert!(palette.rules().is_empty());
    }

    #[test]
    fn test_absent_palette() {
        assert_eq!(Palette::parse(None), Palette::default());
        assert_eq!(Palette::parse(Some("")), Palette::default());
    }

    #[test]
    fn test_fg_bg_rules() {
        let rules = Palette::parse(Some("black,white")).rules();
        assert_eq!(rules.len(), 5);
        assert_eq!(rules[0], "body { background-color: black }");
        assert_eq!(rules[3], "text.inside { fill: black }");
        assert_eq!(rules[4], "pre.lines { color: white }");
    }

    #[test]
    fn test_font_size_rule() {
        let rules = style_rules(&presentation(None, Some("18px")));
        assert_eq!(rules, vec!["body { font-size: 18px }"]);
        assert!(style_rules(&presentation(None, Some("  "))).is_empty());
    }
}
