//! Panel styles and the document sink
//!
//! The generator hands every finished outline to a [`DocumentSink`] as a
//! `(style, path, label)` triple. [`SvgDocument`] is the in-memory sink used by
//! the CLI; it renders a standalone SVG with Inkscape labels.

use crate::error::SinkError;
use crate::path::{Bounds, PathData};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;

/// RGB colour written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(0x80, 0x80, 0x80);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode a packed `0xRRGGBBAA` value as delivered by colour pickers.
    ///
    /// Negative values are reinterpreted as unsigned 32-bit; alpha is dropped.
    pub fn from_packed_rgba(value: i64) -> Self {
        let value = if value < 0 { value & 0xFFFF_FFFF } else { value };
        let rgb = (value >> 8) & 0x00FF_FFFF;
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `#RRGGBB` or a packed `RRGGBBAA` integer as colour pickers
    /// report it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(packed) = trimmed.parse::<i64>() {
            return Ok(Self::from_packed_rgba(packed));
        }
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| format!("Colour must be #RRGGBB or a packed integer: {}", s))?;
        if hex.len() != 6 {
            return Err(format!("Colour must be #RRGGBB: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("Invalid colour {}: {}", s, e))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Stroke and fill of one emitted path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelStyle {
    pub stroke: Color,
    pub stroke_width: f64,
    /// `None` renders as `fill:none`
    pub fill: Option<Color>,
}

impl PanelStyle {
    /// Black outline on grey fill, used for cut panels
    pub fn filled(line_width: f64) -> Self {
        Self {
            stroke: Color::BLACK,
            stroke_width: line_width,
            fill: Some(Color::GREY),
        }
    }

    /// Black outline without fill, used for seam lines
    pub fn stroke_only(line_width: f64) -> Self {
        Self {
            stroke: Color::BLACK,
            stroke_width: line_width,
            fill: None,
        }
    }

    pub fn with_colors(mut self, stroke: Color, fill: impl Into<Option<Color>>) -> Self {
        self.stroke = stroke;
        self.fill = fill.into();
        self
    }
}

impl fmt::Display for PanelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stroke:{};stroke-width:{};fill:", self.stroke, self.stroke_width)?;
        match self.fill {
            Some(color) => write!(f, "{}", color),
            None => write!(f, "none"),
        }
    }
}

/// A finished outline ready for the document
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub style: PanelStyle,
    pub path: PathData,
    pub label: Option<String>,
}

impl Panel {
    pub fn new(style: PanelStyle, path: PathData, label: impl Into<String>) -> Self {
        Self {
            style,
            path,
            label: Some(label.into()),
        }
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

/// Receiver of generated panels.
///
/// Panels arrive in emission order and are never revisited. An error aborts
/// the run and is returned to the caller unchanged.
pub trait DocumentSink {
    fn insert(&mut self, panel: Panel) -> Result<(), SinkError>;
}

impl DocumentSink for Vec<Panel> {
    fn insert(&mut self, panel: Panel) -> Result<(), SinkError> {
        self.push(panel);
        Ok(())
    }
}

const SVG_MARGIN: f64 = 10.0;

/// In-memory SVG document
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    panels: Vec<Panel>,
    layer_label: Option<String>,
    page_size: Option<(f64, f64)>,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put all paths into an Inkscape layer with this label
    pub fn with_layer(mut self, label: impl Into<String>) -> Self {
        self.layer_label = Some(label.into());
        self
    }

    /// Fix the page to `width` x `height` drawing units with the origin in the
    /// upper-left corner instead of fitting it to the panels
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_size = Some((width, height));
        self
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Union of all panel bounds
    pub fn bounds(&self) -> Option<Bounds> {
        self.panels
            .iter()
            .filter_map(|panel| panel.path.bounds())
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn to_svg_string(&self) -> String {
        let mut svg = String::new();
        let (min_x, min_y, width, height) = match self.page_size {
            Some((width, height)) => (0.0, 0.0, width, height),
            None => {
                let bounds = self.bounds().unwrap_or(Bounds {
                    min_x: 0.0,
                    min_y: 0.0,
                    max_x: 0.0,
                    max_y: 0.0,
                });
                (
                    bounds.min_x - SVG_MARGIN,
                    bounds.min_y - SVG_MARGIN,
                    bounds.width() + 2.0 * SVG_MARGIN,
                    bounds.height() + 2.0 * SVG_MARGIN,
                )
            }
        };

        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             xmlns:inkscape=\"http://www.inkscape.org/namespaces/inkscape\" \
             width=\"{:.6}\" height=\"{:.6}\" viewBox=\"{:.6} {:.6} {:.6} {:.6}\">\n",
            width, height, min_x, min_y, width, height
        ));

        let indent = if let Some(layer) = &self.layer_label {
            svg.push_str(&format!(
                "  <g inkscape:groupmode=\"layer\" inkscape:label=\"{}\">\n",
                escape_xml(layer)
            ));
            "    "
        } else {
            "  "
        };

        for panel in &self.panels {
            svg.push_str(&format!(
                "{}<path style=\"{}\" d=\"{}\"",
                indent,
                panel.style,
                panel.path.to_svg()
            ));
            if let Some(label) = &panel.label {
                svg.push_str(&format!(" inkscape:label=\"{}\"", escape_xml(label)));
            }
            svg.push_str("/>\n");
        }

        if self.layer_label.is_some() {
            svg.push_str("  </g>\n");
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn write_to(&self, mut writer: impl io::Write) -> Result<(), SinkError> {
        writer.write_all(self.to_svg_string().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl DocumentSink for SvgDocument {
    fn insert(&mut self, panel: Panel) -> Result<(), SinkError> {
        self.panels.push(panel);
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_packed_rgba() {
        assert_eq!(Color::from_packed_rgba(0).to_string(), "#000000");
        assert_eq!(Color::from_packed_rgba(0xFF00_00FF).to_string(), "#FF0000");
        assert_eq!(Color::from_packed_rgba(0x1234_56FF).to_string(), "#123456");
        // -1 is 0xFFFFFFFF once masked
        assert_eq!(Color::from_packed_rgba(-1).to_string(), "#FFFFFF");
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("#808080".parse::<Color>().unwrap(), Color::GREY);
        assert_eq!("#a0b1c2".parse::<Color>().unwrap(), Color::rgb(0xA0, 0xB1, 0xC2));
        assert!("grey".parse::<Color>().is_err());
        assert_eq!("-1".parse::<Color>().unwrap(), Color::rgb(0xFF, 0xFF, 0xFF));
        assert_eq!("4278190335".parse::<Color>().unwrap(), Color::rgb(0xFF, 0, 0));
        assert!("#80808".parse::<Color>().is_err());
        assert!("#80808g".parse::<Color>().is_err());
    }

    #[test]
    fn test_style_display() {
        assert_eq!(
            PanelStyle::filled(0.5).to_string(),
            "stroke:#000000;stroke-width:0.5;fill:#808080"
        );
        assert_eq!(
            PanelStyle::stroke_only(2.0).to_string(),
            "stroke:#000000;stroke-width:2;fill:none"
        );
    }

    #[test]
    fn test_style_with_colors() {
        let red = Color::rgb(0xFF, 0, 0);
        let style = PanelStyle::filled(1.0).with_colors(red, Color::BLACK);
        assert_eq!(style.to_string(), "stroke:#FF0000;stroke-width:1;fill:#000000");

        let seam = PanelStyle::stroke_only(1.0).with_colors(red, None);
        assert_eq!(seam.to_string(), "stroke:#FF0000;stroke-width:1;fill:none");
    }

    #[test]
    fn test_svg_document_renders_paths_in_order() {
        let mut doc = SvgDocument::new().with_layer("box");
        let mut first = PathData::new();
        first.move_abs(0.0, 0.0).line_rel(10.0, 0.0).close();
        let mut second = PathData::new();
        second.move_abs(20.0, 0.0).line_rel(0.0, 5.0);

        doc.insert(Panel::new(PanelStyle::filled(1.0), first, "front"))
            .unwrap();
        doc.insert(Panel::new(PanelStyle::stroke_only(1.0), second, "cut<0>"))
            .unwrap();

        let svg = doc.to_svg_string();
        let front = svg.find("inkscape:label=\"front\"").unwrap();
        let cut = svg.find("inkscape:label=\"cut&lt;0&gt;\"").unwrap();
        assert!(front < cut);
        assert!(svg.contains("inkscape:groupmode=\"layer\" inkscape:label=\"box\""));
        assert!(svg.contains("d=\"M 0.000000,0.000000 l 10.000000,0.000000 z\""));
        assert!(svg.contains("viewBox=\"-10.000000 -10.000000 40.000000 25.000000\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_fixed_page_size() {
        let mut doc = SvgDocument::new().with_page_size(300.0, 200.0);
        let mut path = PathData::new();
        path.move_abs(50.0, 50.0).line_rel(10.0, 10.0);
        doc.insert(Panel::new(PanelStyle::filled(1.0), path, "p"))
            .unwrap();

        let svg = doc.to_svg_string();
        assert!(svg.contains("width=\"300.000000\" height=\"200.000000\""));
        assert!(svg.contains("viewBox=\"0.000000 0.000000 300.000000 200.000000\""));
    }

    #[test]
    fn test_write_to_buffer() {
        let doc = SvgDocument::new();
        let mut buffer = Vec::new();
        doc.write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("<?xml"));
    }
}
