//! sysdef-syntax — recover C function declarations from manual-page synopses.
//!
//! Pipeline for one queried name:
//!
//! - **overstrike** — collapse `X\bX` bold/underline sequences
//! - **synopsis** — collect candidate lines between `SYNOPSIS` and `DESCRIPTION`
//! - **declaration** / **parameter** — parse candidates into typed signatures
//! - **resolve** — pick the declaration the name refers to
//!
//! Everything here is pure: the caller supplies the page text and decides
//! how to fetch it.
//!
//! ```
//! use sysdef_syntax::{lookup, LookupOutcome};
//!
//! let page = "SYNOPSIS\n       pid_t fork(void);\nDESCRIPTION\n";
//! let found = lookup("fork", Some(page)).unwrap();
//! match found.outcome {
//!     LookupOutcome::Found(d) => assert_eq!(d.to_string(), "pid_t fork(void)"),
//!     other => panic!("{other:?}"),
//! }
//! ```

pub mod declaration;
pub mod error;
pub mod overstrike;
pub mod parameter;
pub mod resolve;
pub mod synopsis;

pub use declaration::Declaration;
pub use error::{LookupError, LookupResult, ParseError};
pub use overstrike::{normalize_document, normalize_line};
pub use parameter::{ParameterDescriptor, Qualifier, Qualifiers};
pub use resolve::{lookup, resolve, Lookup, LookupOutcome};
pub use synopsis::Synopsis;
