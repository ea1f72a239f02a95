//! Disambiguation — pick the declaration a queried name refers to.
//!
//! A page can document several call forms for one name and several related
//! calls at once. `man 2 open` lists two forms of `open` plus `creat`;
//! `man 2 chown32` shows the `chown` page. Selection order:
//!
//! 1. keep declarations whose name is a prefix of the query
//!    (`_exit` counts as `exit`)
//! 2. a single survivor wins
//! 3. exact-name matches win, most parameters first
//! 4. otherwise match with trailing digits stripped (`eventfd2` → `eventfd`)

use crate::declaration::Declaration;
use crate::error::{LookupError, LookupResult};
use crate::overstrike::normalize_document;
use crate::synopsis::{self, Synopsis};
use serde::Serialize;

/// Outcome of resolving one name against one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "declaration", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// No manual page exists for the name.
    NoManualEntry,
    /// A page exists but none of its declarations resolves to the name.
    NotFound,
    /// The page says the call is unimplemented.
    Unimplemented,
    Found(Declaration),
}

impl LookupOutcome {
    pub fn declaration(&self) -> Option<&Declaration> {
        match self {
            LookupOutcome::Found(d) => Some(d),
            _ => None,
        }
    }
}

/// Full result of a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    /// The queried name.
    pub name: String,
    pub outcome: LookupOutcome,
    /// Every declaration parsed from the page, before name filtering.
    pub declarations: Vec<Declaration>,
}

/// Resolve `name` against a manual page.
///
/// `document` is `None` when the page does not exist.
pub fn lookup(name: &str, document: Option<&str>) -> LookupResult<Lookup> {
    let Some(text) = document else {
        return Ok(Lookup {
            name: name.to_string(),
            outcome: LookupOutcome::NoManualEntry,
            declarations: Vec::new(),
        });
    };

    let lines = normalize_document(text);
    let candidates = match synopsis::extract(&lines)? {
        Synopsis::Unimplemented => {
            return Ok(Lookup {
                name: name.to_string(),
                outcome: LookupOutcome::Unimplemented,
                declarations: Vec::new(),
            });
        }
        Synopsis::Candidates(c) => c,
    };

    let declarations = parse_candidates(&candidates)?;
    let outcome = resolve(name, declarations.clone())?;

    Ok(Lookup {
        name: name.to_string(),
        outcome,
        declarations,
    })
}

/// Parse candidate lines, skipping the ones that are not declarations.
pub fn parse_candidates<S: AsRef<str>>(candidates: &[S]) -> LookupResult<Vec<Declaration>> {
    let mut declarations = Vec::with_capacity(candidates.len());
    for line in candidates {
        match Declaration::parse(line.as_ref()) {
            Ok(d) => declarations.push(d),
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => tracing::debug!(error = %e, "skipping candidate"),
        }
    }
    Ok(declarations)
}

/// Choose among already parsed declarations.
pub fn resolve(name: &str, declarations: Vec<Declaration>) -> LookupResult<LookupOutcome> {
    let mut matching: Vec<Declaration> = declarations
        .into_iter()
        .map(|mut d| {
            strip_underscore(&mut d, name);
            d
        })
        .filter(|d| !d.name.is_empty() && name.starts_with(d.name.as_str()))
        .collect();

    match matching.len() {
        0 => return Ok(LookupOutcome::NotFound),
        1 => return Ok(LookupOutcome::Found(matching.remove(0))),
        _ => {}
    }

    // max_by_key keeps the last maximum; reverse to keep the first
    if let Some(best) = matching
        .iter()
        .enumerate()
        .filter(|(_, d)| d.name == name)
        .max_by_key(|(i, d)| (d.parameters.len(), std::cmp::Reverse(*i)))
        .map(|(i, _)| i)
    {
        return Ok(LookupOutcome::Found(matching.swap_remove(best)));
    }

    let stem = strip_digits(name);
    let mut similar: Vec<Declaration> = matching
        .into_iter()
        .filter(|d| strip_digits(&d.name) == stem)
        .collect();

    match similar.len() {
        0 => Ok(LookupOutcome::NotFound),
        1 => Ok(LookupOutcome::Found(similar.remove(0))),
        _ => Err(LookupError::AmbiguousSuffixMatch {
            name: name.to_string(),
            candidates: similar.iter().map(ToString::to_string).collect(),
        }),
    }
}

/// `_exit` is documented for `exit`: drop one leading underscore when the
/// rest still lines up with the query.
fn strip_underscore(d: &mut Declaration, query: &str) {
    if let Some(rest) = d.name.strip_prefix('_') {
        if !rest.is_empty() && query.starts_with(rest) {
            d.name = rest.to_string();
        }
    }
}

fn strip_digits(name: &str) -> &str {
    name.trim_end_matches(|c: char| c.is_ascii_digit())
}
