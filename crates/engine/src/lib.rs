//! # Reorder Engine
//!
//! Deterministic, configurable ordering of the top-level declarations of a Go file.
//!
//! ## Pipeline
//!
//! ```text
//! Source Code
//!     │
//!     ├──> reorder_syntax::parse_source → Decl[]
//!     │
//!     ├──> Categorizer (four passes)
//!     │    ├─> collect type names
//!     │    ├─> classify into sections / type groups / enum candidates
//!     │    ├─> pair enum blocks with their types
//!     │    └─> promote method-only type groups
//!     │
//!     ├──> Sorter (byte-wise, stable; init and uncategorized untouched)
//!     │
//!     ├──> Reassembler
//!     │    ├─> mode: strict | warn | append | drop
//!     │    ├─> Emitter per configured section
//!     │    └─> conservation check
//!     │
//!     └──> reorder_syntax::print_source → String
//! ```
//!
//! ## Example
//!
//! ```rust
//! use reorder_engine::reorder_source;
//!
//! let code = "package demo\n\nfunc helper() {}\n\nconst Version = \"1.0\"\n\nfunc main() {}\n";
//! let reordered = reorder_source(code).unwrap();
//! assert_eq!(
//!     reordered,
//!     "package demo\n\nfunc main() {}\n\n// Exported constants.\nconst (\n\tVersion = \"1.0\"\n)\n\nfunc helper() {}\n"
//! );
//! ```

mod analyze;
mod categorize;
mod config;
mod emit;
mod error;
mod reassemble;
mod section;
mod sort;

pub use analyze::{analyze_section_order, identify_section, SectionOrder, SectionPosition};
pub use categorize::{categorize, CategorizedDecls, EnumGroup, TypeGroup};
pub use config::{
    find_config, BehaviorConfig, Config, SectionsConfig, TypesConfig, CONFIG_FILE_NAME,
};
pub use emit::emit_section;
pub use error::{ConfigError, ReorderError, Result};
pub use reassemble::{reassemble, Reassembled};
pub use section::{EnumElement, Mode, Section, TypeElement};
pub use sort::sort_categorized;

use reorder_syntax::{parse_source, print_source, Decl};

/// Reordered source with what warn mode appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reordered {
    pub source: String,
    pub unmatched: Vec<Section>,
}

/// Reorder Go source with the default configuration
pub fn reorder_source(source: &str) -> Result<String> {
    Ok(reorder_source_with_config(source, &Config::default())?.source)
}

/// Reorder Go source with `config`
pub fn reorder_source_with_config(source: &str, config: &Config) -> Result<Reordered> {
    config.validate()?;
    let mut file = parse_source(source)?;
    let decls = std::mem::take(&mut file.decls);

    let Reassembled { decls, unmatched } = reorder_declarations(decls, config)?;

    Ok(Reordered {
        source: print_source(&file.with_decls(decls)),
        unmatched,
    })
}

/// Categorize, sort and reassemble already parsed declarations
pub fn reorder_declarations(decls: Vec<Decl>, config: &Config) -> Result<Reassembled> {
    let mut cat = categorize(decls);
    sort_categorized(&mut cat);
    reassemble(cat, config)
}
