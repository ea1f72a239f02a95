//! Parameter tokenizer — one comma-separated fragment of a parameter list.
//!
//! Fragments come from manual-page synopses, so the grammar is whatever the
//! man pages actually use rather than full C:
//!
//! ```text
//! const char *pathname
//! struct sockaddr *addr
//! unsigned int count
//! char *const argv[]
//! int (*fn)(void *)
//! ...
//! ```
//!
//! Parsing and printing share the [`Qualifier::PREFIX`] ordering, and
//! printing a parsed descriptor must give back the exact fragment.

use crate::error::ParseError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single type qualifier or declarator marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualifier {
    Const,
    Struct,
    Union,
    Enum,
    Unsigned,
    ConstPointer,
    Pointer,
    Array,
    FunctionPointer,
}

impl Qualifier {
    /// Keywords written before the base type, in print order.
    pub const PREFIX: [Qualifier; 5] = [
        Qualifier::Const,
        Qualifier::Struct,
        Qualifier::Union,
        Qualifier::Enum,
        Qualifier::Unsigned,
    ];

    pub const ALL: [Qualifier; 9] = [
        Qualifier::Const,
        Qualifier::Struct,
        Qualifier::Union,
        Qualifier::Enum,
        Qualifier::Unsigned,
        Qualifier::ConstPointer,
        Qualifier::Pointer,
        Qualifier::Array,
        Qualifier::FunctionPointer,
    ];

    /// Map a leading type token to its qualifier.
    pub fn from_keyword(token: &str) -> Option<Qualifier> {
        match token {
            "const" => Some(Qualifier::Const),
            "struct" => Some(Qualifier::Struct),
            "union" => Some(Qualifier::Union),
            "enum" => Some(Qualifier::Enum),
            "unsigned" => Some(Qualifier::Unsigned),
            _ => None,
        }
    }

    /// Source text for prefix keywords.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Qualifier::Const => Some("const"),
            Qualifier::Struct => Some("struct"),
            Qualifier::Union => Some("union"),
            Qualifier::Enum => Some("enum"),
            Qualifier::Unsigned => Some("unsigned"),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Qualifier::Const => "const",
            Qualifier::Struct => "struct",
            Qualifier::Union => "union",
            Qualifier::Enum => "enum",
            Qualifier::Unsigned => "unsigned",
            Qualifier::ConstPointer => "const_pointer",
            Qualifier::Pointer => "pointer",
            Qualifier::Array => "array",
            Qualifier::FunctionPointer => "function_pointer",
        }
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of [`Qualifier`] flags. Flags are independent of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Qualifiers(u16);

impl Qualifiers {
    pub fn empty() -> Self {
        Qualifiers(0)
    }

    pub fn insert(&mut self, q: Qualifier) {
        self.0 |= q.bit();
    }

    pub fn with(mut self, q: Qualifier) -> Self {
        self.insert(q);
        self
    }

    pub fn contains(self, q: Qualifier) -> bool {
        self.0 & q.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Flags that are set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Qualifier> {
        Qualifier::ALL.into_iter().filter(move |q| self.contains(*q))
    }
}

impl FromIterator<Qualifier> for Qualifiers {
    fn from_iter<I: IntoIterator<Item = Qualifier>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Qualifiers::empty(), |set, q| set.with(q))
    }
}

impl Serialize for Qualifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// One formal parameter of a declaration, or the variadic marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterDescriptor {
    /// `...`
    Ellipsis,
    Typed {
        base_type: String,
        name: String,
        qualifiers: Qualifiers,
    },
}

const ELLIPSIS: &str = "...";
const FUNCTION_POINTER_MARK: &str = " (*";
const CONST_POINTER: &str = "*const";

impl ParameterDescriptor {
    /// Parse a cleaned fragment (whitespace already collapsed).
    pub fn parse(fragment: &str) -> Result<Self, ParseError> {
        if fragment == ELLIPSIS {
            return Ok(ParameterDescriptor::Ellipsis);
        }

        let unrecognized = |reason| ParseError::UnrecognizedParameter {
            fragment: fragment.to_string(),
            reason,
        };

        let mut qualifiers = Qualifiers::empty();

        // int clone(int (*fn)(void *), ...) => `int (*fn)(void *)`
        let (mut ty, mut name) = if fragment.ends_with(')') {
            let split = fragment
                .find(FUNCTION_POINTER_MARK)
                .ok_or_else(|| unrecognized("trailing `)` without a `(*` declarator"))?;
            qualifiers.insert(Qualifier::FunctionPointer);
            (fragment[..split].trim(), fragment[split..].trim())
        } else {
            fragment
                .rsplit_once(char::is_whitespace)
                .map(|(ty, name)| (ty.trim_end(), name))
                .ok_or_else(|| unrecognized("expected a type and a name"))?
        };

        if ty.is_empty() || name.is_empty() {
            return Err(unrecognized("expected a type and a name"));
        }

        if let Some(rest) = name.strip_prefix('*') {
            qualifiers.insert(Qualifier::Pointer);
            name = rest;
        }

        if let Some(rest) = name.strip_suffix("[]") {
            qualifiers.insert(Qualifier::Array);
            name = rest;
        }

        while let Some((token, rest)) = ty.split_once(char::is_whitespace) {
            let rest = rest.trim_start();
            if let Some(q) = Qualifier::from_keyword(token) {
                qualifiers.insert(q);
                ty = rest;
            } else if rest == CONST_POINTER {
                // char *const argv[]
                qualifiers.insert(Qualifier::ConstPointer);
                ty = token;
            } else {
                return Err(unrecognized("unexpected token in type"));
            }
        }

        Ok(ParameterDescriptor::Typed {
            base_type: ty.to_string(),
            name: name.to_string(),
            qualifiers,
        })
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, ParameterDescriptor::Ellipsis)
    }

    /// Base type with qualifiers and declarator markers removed (`char` for `const char *path`).
    pub fn base_type(&self) -> Option<&str> {
        match self {
            ParameterDescriptor::Typed { base_type, .. } => Some(base_type),
            ParameterDescriptor::Ellipsis => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ParameterDescriptor::Typed { name, .. } => Some(name),
            ParameterDescriptor::Ellipsis => None,
        }
    }

    pub fn qualifiers(&self) -> Qualifiers {
        match self {
            ParameterDescriptor::Typed { qualifiers, .. } => *qualifiers,
            ParameterDescriptor::Ellipsis => Qualifiers::empty(),
        }
    }

    pub fn has(&self, q: Qualifier) -> bool {
        self.qualifiers().contains(q)
    }

    pub fn is_const(&self) -> bool {
        self.has(Qualifier::Const)
    }

    pub fn is_struct(&self) -> bool {
        self.has(Qualifier::Struct)
    }

    pub fn is_union(&self) -> bool {
        self.has(Qualifier::Union)
    }

    pub fn is_enum(&self) -> bool {
        self.has(Qualifier::Enum)
    }

    pub fn is_unsigned(&self) -> bool {
        self.has(Qualifier::Unsigned)
    }

    pub fn is_const_pointer(&self) -> bool {
        self.has(Qualifier::ConstPointer)
    }

    pub fn is_pointer(&self) -> bool {
        self.has(Qualifier::Pointer)
    }

    pub fn is_array(&self) -> bool {
        self.has(Qualifier::Array)
    }

    pub fn is_function_pointer(&self) -> bool {
        self.has(Qualifier::FunctionPointer)
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (base_type, name, qualifiers) = match self {
            ParameterDescriptor::Ellipsis => return f.write_str(ELLIPSIS),
            ParameterDescriptor::Typed {
                base_type,
                name,
                qualifiers,
            } => (base_type, name, *qualifiers),
        };

        for q in Qualifier::PREFIX {
            if let Some(kw) = q.keyword().filter(|_| qualifiers.contains(q)) {
                write!(f, "{kw} ")?;
            }
        }
        write!(f, "{base_type} ")?;
        if qualifiers.contains(Qualifier::ConstPointer) {
            write!(f, "{CONST_POINTER} ")?;
        }
        if qualifiers.contains(Qualifier::Pointer) {
            f.write_str("*")?;
        }
        f.write_str(name)?;
        if qualifiers.contains(Qualifier::Array) {
            f.write_str("[]")?;
        }
        Ok(())
    }
}
