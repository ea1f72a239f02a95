//! Declaration parser — `<return-type> <name>(<params>);` into a [`Declaration`].

use crate::error::ParseError;
use crate::parameter::ParameterDescriptor;
use serde::Serialize;
use std::fmt;

/// A parsed function signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub return_type: String,
    pub name: String,
    /// Empty for declarations written `(void)`.
    pub parameters: Vec<ParameterDescriptor>,
}

impl Declaration {
    /// Parse one candidate line.
    ///
    /// Unrecognized lines and parameters are reported as non-fatal
    /// [`ParseError`]s. A parameter that parses but does not print back to its
    /// own text is reported as [`ParseError::RoundTrip`], which is fatal.
    pub fn parse(line: &str) -> Result<Declaration, ParseError> {
        let unrecognized = |reason| ParseError::UnrecognizedDeclaration {
            line: line.to_string(),
            reason,
        };

        let (head, tail) = line
            .split_once('(')
            .ok_or_else(|| unrecognized("missing `(`"))?;

        let head = collapse_whitespace(head);
        let (return_type, name) = head
            .rsplit_once(' ')
            .ok_or_else(|| unrecognized("expected a return type and a name"))?;

        // `char *strerror` and `char* strerror` both become `char *` + `strerror`
        let stars = name.len() - name.trim_start_matches('*').len();
        let detached = return_type.len() - return_type.trim_end_matches('*').len();
        let name = &name[stars..];
        let mut return_type = return_type.trim_end_matches('*').trim_end().to_string();
        if return_type.is_empty() || name.is_empty() {
            return Err(unrecognized("expected a return type and a name"));
        }
        if stars + detached > 0 {
            return_type.push(' ');
            return_type.push_str(&"*".repeat(stars + detached));
        }

        let params = tail.trim_end();
        let params = params.strip_suffix(';').unwrap_or(params).trim_end();
        let params = params
            .strip_suffix(')')
            .ok_or_else(|| unrecognized("missing `)`"))?;

        let fragments = split_parameters(params);
        let mut parameters = Vec::with_capacity(fragments.len());

        if !(fragments.len() == 1 && fragments[0].trim() == "void") {
            for raw in fragments {
                // int sched_rr_get_interval(pid_t pid, struct timespec * tp);
                let fragment = collapse_whitespace(raw).replace("* ", "*");
                let parameter = ParameterDescriptor::parse(&fragment)?;

                let rendered = parameter.to_string();
                if rendered != fragment {
                    return Err(ParseError::RoundTrip { fragment, rendered });
                }
                parameters.push(parameter);
            }
        }

        Ok(Declaration {
            return_type,
            name: name.to_string(),
            parameters,
        })
    }

    /// True when the declaration takes no arguments.
    pub fn is_void(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn is_variadic(&self) -> bool {
        self.parameters.iter().any(ParameterDescriptor::is_ellipsis)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.return_type)?;
        if !self.return_type.ends_with('*') {
            f.write_str(" ")?;
        }
        write!(f, "{}(", self.name)?;
        if self.parameters.is_empty() {
            f.write_str("void")?;
        }
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{p}")?;
        }
        f.write_str(")")
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a parameter list on `", "` outside nested parentheses.
fn split_parameters(params: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = params.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 && bytes.get(i + 1) == Some(&b' ') => {
                fragments.push(&params[start..i]);
                start = i + 2;
            }
            _ => {}
        }
    }
    fragments.push(&params[start..]);
    fragments
}
