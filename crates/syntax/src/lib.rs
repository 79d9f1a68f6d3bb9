//! # Reorder Syntax
//!
//! Comment-preserving view of a Go source file at declaration granularity.
//!
//! ## Philosophy
//!
//! The reorderer never rewrites code, it only moves it. This crate therefore keeps
//! every top-level declaration as exact source text and records just enough
//! structure to classify it:
//! - Doc comments and same-line trailing comments travel with their declaration
//! - `const`/`var`/`type` blocks expose their specs, each with its own comments
//! - Function results and method receivers are reduced to base type names
//!
//! ## Architecture
//!
//! ```text
//! Source Code
//!     │
//!     ├──> Tree-sitter Parsing → CST (syntax errors rejected with position)
//!     │
//!     ├──> Declaration Extraction
//!     │    ├─> Header (file comments, build tags, package clause)
//!     │    ├─> Decl[] with doc / text / trailing / spacing
//!     │    └─> Trailer (comments after the last declaration)
//!     │
//!     └──> Printing
//!          └─> Decl[] rendered in order, blank lines per spacing directive
//! ```
//!
//! ## Example
//!
//! ```rust
//! use reorder_syntax::{parse_source, print_source};
//!
//! let code = "package demo\n\nfunc b() {}\n\nfunc a() {}\n";
//! let mut file = parse_source(code).unwrap();
//! file.decls.reverse();
//! assert_eq!(print_source(&file), "package demo\n\nfunc a() {}\n\nfunc b() {}\n");
//! ```

mod error;
mod language;
mod parser;
mod printer;
mod types;

pub use error::{Result, SyntaxError};
pub use language::Language;
pub use parser::{parse_source, GoParser};
pub use printer::print_source;
pub use types::{
    is_exported, reindent, Decl, DeclKind, FuncDecl, GenDecl, Keyword, SourceFile, Spacing, Spec,
};
