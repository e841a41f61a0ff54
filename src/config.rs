//! Render-time configuration
//!
//! Theme colors and localized strings reach the core only through a
//! [`RenderConfig`] value that callers pass in. There is no global lookup.

use std::fmt;

use crate::geometry::defaults;
use crate::geometry::sampler::SamplerConfig;
use crate::geometry::tree::TreeLayoutConfig;
use crate::types::Viewport;

/// Color lookup by semantic token (`"axis"`, `"curve"`, `"highlight"`, ...).
pub trait Theme {
    fn color(&self, token: &str) -> Option<String>;
}

/// Text lookup by message key.
pub trait Locale {
    fn text(&self, key: &str) -> Option<String>;
}

/// Light palette used when the caller does not supply a theme.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinTheme;

impl Theme for BuiltinTheme {
    fn color(&self, token: &str) -> Option<String> {
        let color = match token {
            "axis" => "#4b5563",
            "grid" => "#e5e7eb",
            "curve" => "#2563eb",
            "highlight" => "#f59e0b",
            "error" => "#dc2626",
            "text" => "#111827",
            _ => return None,
        };
        Some(color.to_string())
    }
}

/// English strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinLocale;

impl Locale for BuiltinLocale {
    fn text(&self, key: &str) -> Option<String> {
        let text = match key {
            "step_indicator" => "Step {current} of {total}",
            "next" => "Next",
            "previous" => "Previous",
            _ => return None,
        };
        Some(text.to_string())
    }
}

/// Everything a renderer needs besides the diagram itself.
pub struct RenderConfig {
    pub theme: Box<dyn Theme>,
    pub locale: Box<dyn Locale>,
    pub viewport: Viewport,
    pub sampler: SamplerConfig,
    pub tree: TreeLayoutConfig,
    /// Vertical shift for staggered labels
    pub stagger_offset: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            theme: Box::new(BuiltinTheme),
            locale: Box::new(BuiltinLocale),
            viewport: Viewport::default(),
            sampler: SamplerConfig::default(),
            tree: TreeLayoutConfig::default(),
            stagger_offset: defaults::STAGGER_OFFSET,
        }
    }
}

impl RenderConfig {
    pub fn with_theme(mut self, theme: impl Theme + 'static) -> Self {
        self.theme = Box::new(theme);
        self
    }

    pub fn with_locale(mut self, locale: impl Locale + 'static) -> Self {
        self.locale = Box::new(locale);
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Theme color for `token`, `currentColor` when the theme has none.
    pub fn color(&self, token: &str) -> String {
        self.theme
            .color(token)
            .unwrap_or_else(|| "currentColor".to_string())
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.locale.text(key)
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("viewport", &self.viewport)
            .field("sampler", &self.sampler)
            .field("tree", &self.tree)
            .field("stagger_offset", &self.stagger_offset)
            .finish_non_exhaustive()
    }
}
