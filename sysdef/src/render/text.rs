//! Plain text renderer — one `Syscall Name` / `Definition` block per name.

use crate::render::{outcome_message, Renderer};
use anyhow::Result;
use sysdef_syntax::{Lookup, LookupOutcome};

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, lookups: &[Lookup], show_all: bool) -> Result<String> {
        let blocks: Vec<String> = lookups
            .iter()
            .map(|l| render_lookup(l, show_all))
            .collect();
        Ok(blocks.join("\n"))
    }
}

fn render_lookup(lookup: &Lookup, show_all: bool) -> String {
    let definition = match &lookup.outcome {
        LookupOutcome::Found(d) => d.to_string(),
        other => outcome_message(other).unwrap_or_default().to_string(),
    };

    let mut out = format!(
        "Syscall Name: {}\nDefinition:   {}\n",
        lookup.name, definition
    );

    if show_all && !lookup.declarations.is_empty() {
        out.push_str("Declarations:\n");
        for d in &lookup.declarations {
            out.push_str(&format!("              {}\n", d));
        }
    }
    out
}
