//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;
pub mod text;

use anyhow::{anyhow, Result};
use sysdef_syntax::Lookup;

/// Trait for rendering lookup results into a specific output format.
pub trait Renderer {
    /// Render every lookup. `show_all` adds the declarations found on each
    /// page before name filtering.
    fn render(&self, lookups: &[Lookup], show_all: bool) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use text, json, or markdown",
            format
        )),
    }
}

/// One-line description of an outcome that carries no declaration.
pub(crate) fn outcome_message(outcome: &sysdef_syntax::LookupOutcome) -> Option<&'static str> {
    use sysdef_syntax::LookupOutcome::*;
    match outcome {
        NoManualEntry => Some("No man entry found for this system call name."),
        NotFound => Some("Definition not found in man page."),
        Unimplemented => Some("System call is Unimplemented"),
        Found(_) => None,
    }
}
