use crate::section::Section;
use reorder_syntax::SyntaxError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for reorder operations
pub type Result<T> = std::result::Result<T, ReorderError>;

/// Invalid or unreadable configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown section \"{0}\" in sections.order (see --list-sections)")]
    UnknownSection(String),

    #[error("section \"{0}\" appears more than once in sections.order")]
    DuplicateSection(String),

    #[error("unknown element \"{element}\" in types.{layout}")]
    UnknownLayoutElement {
        layout: &'static str,
        element: String,
    },

    #[error("element \"{element}\" appears more than once in types.{layout}")]
    DuplicateLayoutElement {
        layout: &'static str,
        element: String,
    },

    #[error("unknown mode \"{0}\" (expected strict, warn, append or drop)")]
    UnknownMode(String),

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by the reordering pipeline
#[derive(Error, Debug)]
pub enum ReorderError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to parse source: {0}")]
    Parse(#[from] SyntaxError),

    #[error("{}", unmatched_message(.sections))]
    UnmatchedSections { sections: Vec<Section> },

    #[error("internal error: {expected} declarations in, {actual} out")]
    ConservationViolated { expected: usize, actual: usize },
}

impl ReorderError {
    pub fn unmatched(sections: Vec<Section>) -> Self {
        Self::UnmatchedSections { sections }
    }
}

fn unmatched_message(sections: &[Section]) -> String {
    let names = sections
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "declarations found in sections not listed in sections.order: {names}\n\
         Hints:\n  \
         - add the sections to sections.order in .go-reorder.toml\n  \
         - add \"uncategorized\" to sections.order to collect leftovers at the end\n  \
         - use --mode=warn or --mode=append to append them after the configured sections\n  \
         - use --mode=drop to discard them"
    )
}
