//! GitHub-flavored markdown renderer.

use crate::render::{outcome_message, Renderer};
use anyhow::Result;
use sysdef_syntax::{Declaration, Lookup, LookupOutcome, ParameterDescriptor};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, lookups: &[Lookup], show_all: bool) -> Result<String> {
        let mut output = String::new();
        for lookup in lookups {
            output.push_str(&render_lookup(lookup, show_all));
            output.push('\n');
        }
        Ok(output)
    }
}

fn render_lookup(lookup: &Lookup, show_all: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("## {}\n", lookup.name));

    match &lookup.outcome {
        LookupOutcome::Found(d) => {
            lines.push(code_block(std::slice::from_ref(d)));
            lines.push(String::new());
            if !d.parameters.is_empty() {
                lines.push(parameter_table(&d.parameters));
            }
        }
        other => {
            lines.push(format!("_{}_", outcome_message(other).unwrap_or_default()));
            lines.push(String::new());
        }
    }

    if show_all && !lookup.declarations.is_empty() {
        lines.push("### Declarations on page\n".to_string());
        lines.push(code_block(&lookup.declarations));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn code_block(declarations: &[Declaration]) -> String {
    let mut out = String::from("```c\n");
    for d in declarations {
        out.push_str(&format!("{};\n", d));
    }
    out.push_str("```");
    out
}

fn parameter_table(parameters: &[ParameterDescriptor]) -> String {
    let mut out = String::from("| # | Name | Type | Qualifiers |\n|---|------|------|------------|\n");
    for (i, p) in parameters.iter().enumerate() {
        let (name, ty) = match (p.name(), p.base_type()) {
            (Some(name), Some(ty)) => (format!("`{}`", escape_cell(name)), format!("`{}`", ty)),
            _ => ("`...`".to_string(), "variadic".to_string()),
        };
        let qualifiers: Vec<&str> = p.qualifiers().iter().map(|q| q.as_str()).collect();
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            i + 1,
            name,
            ty,
            qualifiers.join(", ")
        ));
    }
    out
}

/// Pipes would end the table cell.
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
