//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the lookup model directly. `declarations` is only present
//! when every declaration on the page was requested.

use crate::render::Renderer;
use anyhow::{Context, Result};
use serde::Serialize;
use sysdef_syntax::{Declaration, Lookup, LookupOutcome};

pub struct JsonRenderer;

#[derive(Serialize)]
struct LookupView<'a> {
    name: &'a str,
    #[serde(flatten)]
    outcome: &'a LookupOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    declarations: Option<&'a [Declaration]>,
}

impl Renderer for JsonRenderer {
    fn render(&self, lookups: &[Lookup], show_all: bool) -> Result<String> {
        let views: Vec<LookupView> = lookups
            .iter()
            .map(|l| LookupView {
                name: &l.name,
                outcome: &l.outcome,
                declarations: show_all.then_some(l.declarations.as_slice()),
            })
            .collect();

        let mut out = serde_json::to_string_pretty(&views).context("failed to serialize lookups")?;
        out.push('\n');
        Ok(out)
    }
}
