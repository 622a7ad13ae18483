//! Configuration types for chain graph emission and rendering.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be
//! loaded from TOML; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and render settings.
//! - [`StyleConfig`] - How nodes look in the emitted DOT text.
//! - [`RenderConfig`] - Which external command turns DOT text into an image.
//!
//! # Example
//!
//! ```
//! # use chaingraph::config::{AppConfig, ImageFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.style().node_shape(), "box");
//! assert_eq!(config.render().format(), ImageFormat::Svg);
//! assert!(config.render().enabled());
//! ```

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(style: StyleConfig, render: RenderConfig) -> Self {
        Self { style, render }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the render configuration for in-place overrides.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }
}

/// How chain elements are labelled in the DOT output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    /// One label holding the element label and type on two lines (default)
    #[default]
    Composite,
    /// The element label as node label; the type goes into a separate attribute
    Attribute,
}

impl FromStr for LabelStyle {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "composite" => Ok(Self::Composite),
            "attribute" => Ok(Self::Attribute),
            _ => Err("Unsupported label style"),
        }
    }
}

impl From<LabelStyle> for &'static str {
    fn from(val: LabelStyle) -> Self {
        match val {
            LabelStyle::Composite => "composite",
            LabelStyle::Attribute => "attribute",
        }
    }
}

impl Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Styling of the emitted DOT text.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Graphviz shape applied to every node.
    #[serde(default = "default_node_shape")]
    node_shape: String,

    #[serde(default)]
    label_style: LabelStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_shape: default_node_shape(),
            label_style: LabelStyle::default(),
        }
    }
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`].
    ///
    /// # Arguments
    ///
    /// * `node_shape` - Graphviz node shape, e.g. `box` or `ellipse`.
    /// * `label_style` - How element label and type are shown.
    pub fn new(node_shape: impl Into<String>, label_style: LabelStyle) -> Self {
        Self {
            node_shape: node_shape.into(),
            label_style,
        }
    }

    pub fn node_shape(&self) -> &str {
        &self.node_shape
    }

    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }
}

fn default_node_shape() -> String {
    "box".to_string()
}

/// Vector image formats the renderer may be asked for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    /// Scalable Vector Graphics (default)
    #[default]
    Svg,
    /// Portable Document Format
    Pdf,
    /// Encapsulated PostScript
    Eps,
}

impl ImageFormat {
    /// File extension of images in this format, without the dot.
    pub fn extension(self) -> &'static str {
        self.into()
    }
}

impl FromStr for ImageFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "eps" => Ok(Self::Eps),
            _ => Err("Unsupported image format, expected one of: svg, pdf, eps"),
        }
    }
}

impl From<ImageFormat> for &'static str {
    fn from(val: ImageFormat) -> Self {
        match val {
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
            ImageFormat::Eps => "eps",
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// External rendering step configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// When `false`, only `.dot` files are written.
    #[serde(default = "default_enabled")]
    enabled: bool,

    /// Renderer executable, called as `<command> -T<format> <input> -o <output>`.
    #[serde(default = "default_command")]
    command: String,

    #[serde(default)]
    format: ImageFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            command: default_command(),
            format: ImageFormat::default(),
        }
    }
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`].
    pub fn new(enabled: bool, command: impl Into<String>, format: ImageFormat) -> Self {
        Self {
            enabled,
            command: command.into(),
            format,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_format(&mut self, format: ImageFormat) {
        self.format = format;
    }
}

fn default_enabled() -> bool {
    true
}

fn default_command() -> String {
    "dot".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.style().node_shape(), "box");
        assert_eq!(config.style().label_style(), LabelStyle::Composite);
        assert!(config.render().enabled());
        assert_eq!(config.render().command(), "dot");
        assert_eq!(config.render().format(), ImageFormat::Svg);
    }

    #[test]
    fn test_deserialize_full() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            node_shape = "ellipse"
            label_style = "attribute"

            [render]
            enabled = false
            command = "/opt/graphviz/bin/dot"
            format = "pdf"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.style().node_shape(), "ellipse");
        assert_eq!(config.style().label_style(), LabelStyle::Attribute);
        assert!(!config.render().enabled());
        assert_eq!(config.render().command(), "/opt/graphviz/bin/dot");
        assert_eq!(config.render().format(), ImageFormat::Pdf);
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [render]
            format = "eps"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.style().node_shape(), "box");
        assert!(config.render().enabled());
        assert_eq!(config.render().command(), "dot");
        assert_eq!(config.render().format(), ImageFormat::Eps);
    }

    #[test]
    fn test_deserialize_rejects_raster_format() {
        let result: Result<AppConfig, _> = toml::from_str("[render]\nformat = \"png\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_image_format_from_str() {
        assert_eq!("svg".parse::<ImageFormat>(), Ok(ImageFormat::Svg));
        assert_eq!("pdf".parse::<ImageFormat>(), Ok(ImageFormat::Pdf));
        assert_eq!("eps".parse::<ImageFormat>(), Ok(ImageFormat::Eps));
        assert!("png".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_image_format_extension() {
        assert_eq!(ImageFormat::Svg.extension(), "svg");
        assert_eq!(ImageFormat::Eps.to_string(), "eps");
    }

    #[test]
    fn test_label_style_from_str() {
        assert_eq!("composite".parse::<LabelStyle>(), Ok(LabelStyle::Composite));
        assert_eq!("attribute".parse::<LabelStyle>(), Ok(LabelStyle::Attribute));
        assert!("fancy".parse::<LabelStyle>().is_err());
    }

    #[test]
    fn test_render_overrides() {
        let mut config = AppConfig::default();
        config.render_mut().set_enabled(false);
        config.render_mut().set_format(ImageFormat::Pdf);

        assert!(!config.render().enabled());
        assert_eq!(config.render().format(), ImageFormat::Pdf);
    }
}
