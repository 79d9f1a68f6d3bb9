use crate::types::{SourceFile, Spacing};

/// Render a source file back to text.
///
/// The first declaration is always separated from the header by one blank line;
/// later ones follow their spacing directive.
#[must_use]
pub fn print_source(file: &SourceFile) -> String {
    let mut out = String::with_capacity(
        file.header.len() + file.decls.iter().map(|d| d.text.len() + 2).sum::<usize>(),
    );
    out.push_str(file.header.trim_end());
    out.push('\n');

    for (idx, decl) in file.decls.iter().enumerate() {
        if idx == 0 || decl.spacing == Spacing::EmptyLine {
            out.push('\n');
        }
        if let Some(doc) = &decl.doc {
            out.push_str(doc);
            out.push('\n');
        }
        out.push_str(&decl.text);
        if let Some(trailing) = &decl.trailing {
            out.push(' ');
            out.push_str(trailing);
        }
        out.push('\n');
    }

    if let Some(trailer) = &file.trailer {
        out.push('\n');
        out.push_str(trailer);
        out.push('\n');
    }

    out
}
