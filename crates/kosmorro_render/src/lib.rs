//! Renderings of an [`EphemerisResult`].
//!
//! One entry point, [`render`], with a [`Renderer`] per [`OutputFormat`].
//! Renderers do no computation and cannot fail: a result is complete by
//! construction.

pub mod format;
pub mod json;
pub mod pdf;
pub mod text;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kosmorro_search::EphemerisResult;
use tracing::debug;

pub use json::JsonRenderer;
pub use pdf::PdfRenderer;
pub use text::TextRenderer;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Pdf,
}

/// All formats, in the order they are listed to users.
pub const ALL_FORMATS: [OutputFormat; 3] = [OutputFormat::Text, OutputFormat::Json, OutputFormat::Pdf];

impl OutputFormat {
    /// Lowercase name used on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Pdf => "pdf",
        }
    }

    /// Whether the payload is binary and cannot go to a terminal.
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Pdf)
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_FORMATS
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown format '{s}' (expected text, json or pdf)"))
    }
}

/// Format-specific switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw the rise/set graph (PDF only).
    pub graph: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { graph: true }
    }
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(s) => s.into_bytes(),
            Self::Binary(b) => b,
        }
    }
}

/// One output format.
pub trait Renderer {
    fn render(&self, result: &EphemerisResult, options: &RenderOptions) -> Payload;
}

/// The renderer for `format`.
pub fn renderer_for(format: OutputFormat) -> &'static dyn Renderer {
    match format {
        OutputFormat::Text => &TextRenderer,
        OutputFormat::Json => &JsonRenderer,
        OutputFormat::Pdf => &PdfRenderer,
    }
}

/// Render `result` in `format`.
pub fn render(result: &EphemerisResult, format: OutputFormat, options: &RenderOptions) -> Payload {
    let payload = renderer_for(format).render(result, options);
    debug!(%format, bytes = payload.as_bytes().len(), "rendered");
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_parse_back() {
        for f in ALL_FORMATS {
            assert_eq!(f.name().parse::<OutputFormat>().unwrap(), f);
        }
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn only_pdf_is_binary() {
        let binary: Vec<_> = ALL_FORMATS.into_iter().filter(|f| f.is_binary()).collect();
        assert_eq!(binary, [OutputFormat::Pdf]);
    }

    #[test]
    fn payload_bytes() {
        assert_eq!(Payload::Text("ab".into()).as_bytes(), b"ab");
        assert_eq!(Payload::Binary(vec![1, 2]).into_bytes(), vec![1, 2]);
    }
}
