/// One parsed Go source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Everything up to and including the package clause (file docs, build tags)
    pub header: String,

    /// Top-level declarations in source order
    pub decls: Vec<Decl>,

    /// Comments after the last declaration
    pub trailer: Option<String>,
}

impl SourceFile {
    /// Replace the declarations, keeping header and trailer
    #[must_use]
    pub fn with_decls(self, decls: Vec<Decl>) -> Self {
        Self { decls, ..self }
    }
}

/// Vertical spacing directive in front of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    /// Preceded by exactly one blank line
    #[default]
    EmptyLine,
    /// Starts on the next line, no blank line
    Line,
}

/// A top-level declaration with its attached comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub spacing: Spacing,

    /// Comment lines directly above the declaration, verbatim
    pub doc: Option<String>,

    /// Exact source text of the declaration
    pub text: String,

    /// Comment on the same line after the declaration
    pub trailing: Option<String>,

    pub kind: DeclKind,
}

/// What a declaration is, with the facts needed to classify it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    /// `import "x"` or `import ( ... )`
    Import,
    /// Function or method
    Func(FuncDecl),
    /// `const`, `var` or `type` declaration
    Gen(GenDecl),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,

    /// Declared with a receiver
    pub has_receiver: bool,

    /// Base type name of the receiver (pointer and type arguments stripped)
    pub receiver: Option<String>,

    /// First declared result when it is `T` or `*T`
    pub first_result: Option<String>,
}

impl FuncDecl {
    #[must_use]
    pub const fn is_method(&self) -> bool {
        self.has_receiver
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Const,
    Var,
    Type,
}

impl Keyword {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Var => "var",
            Self::Type => "type",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    pub keyword: Keyword,

    /// Written with parentheses
    pub grouped: bool,

    pub specs: Vec<Spec>,

    /// Built by merging specs from several declarations
    pub merged: bool,
}

/// One const/var/type spec inside a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    pub doc: Option<String>,
    pub text: String,
    pub trailing: Option<String>,

    /// Leading whitespace of the line the spec starts on
    pub indent: String,

    /// Declared names (`a, b = 1, 2` has two)
    pub names: Vec<String>,

    /// Explicit named-type annotation, qualifier/pointer/type arguments stripped
    pub type_name: Option<String>,

    /// A value expression references `iota`
    pub uses_iota: bool,
}

impl Spec {
    /// First declared name, used for sorting and visibility
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }
}

impl Decl {
    /// Name used for sorting: function/method name, first spec name, or empty
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.kind {
            DeclKind::Func(func) => &func.name,
            DeclKind::Gen(gen) => gen.specs.first().map_or("", Spec::name),
            DeclKind::Import => "",
        }
    }

    #[must_use]
    pub const fn as_func(&self) -> Option<&FuncDecl> {
        match &self.kind {
            DeclKind::Func(func) => Some(func),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_gen(&self) -> Option<&GenDecl> {
        match &self.kind {
            DeclKind::Gen(gen) => Some(gen),
            _ => None,
        }
    }

    /// Builder: set spacing
    #[must_use]
    pub const fn spaced(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Number of original declarations this one stands for.
    ///
    /// Merged blocks count every spec; everything else counts once.
    #[must_use]
    pub fn units(&self) -> usize {
        match &self.kind {
            DeclKind::Gen(gen) if gen.merged => gen.specs.len(),
            _ => 1,
        }
    }

    /// Render a parenthesized block holding `specs`, headed by a `// {header}` comment
    #[must_use]
    pub fn merged_block(keyword: Keyword, header: &str, specs: Vec<Spec>) -> Self {
        let mut text = format!("{} (\n", keyword.as_str());
        for spec in &specs {
            if let Some(doc) = &spec.doc {
                for line in reindent(doc, &spec.indent, "").lines() {
                    push_indented(&mut text, line);
                }
            }
            text.push('\t');
            text.push_str(&reindent(&spec.text, &spec.indent, "\t"));
            if let Some(trailing) = &spec.trailing {
                text.push(' ');
                text.push_str(trailing);
            }
            text.push('\n');
        }
        text.push(')');

        Self {
            spacing: Spacing::EmptyLine,
            doc: Some(format!("// {header}")),
            text,
            trailing: None,
            kind: DeclKind::Gen(GenDecl {
                keyword,
                grouped: true,
                specs,
                merged: true,
            }),
        }
    }

    /// Lift one spec of a `type ( ... )` block into its own `type` declaration
    #[must_use]
    pub fn from_type_spec(spec: Spec) -> Self {
        let text = format!("type {}", reindent(&spec.text, &spec.indent, ""));
        let doc = spec.doc.as_deref().map(|doc| reindent(doc, &spec.indent, ""));
        let trailing = spec.trailing.clone();
        let spec = Spec {
            indent: String::new(),
            ..spec
        };

        Self {
            spacing: Spacing::EmptyLine,
            doc,
            text,
            trailing,
            kind: DeclKind::Gen(GenDecl {
                keyword: Keyword::Type,
                grouped: false,
                specs: vec![spec],
                merged: false,
            }),
        }
    }
}

fn push_indented(out: &mut String, line: &str) {
    if !line.is_empty() {
        out.push('\t');
        out.push_str(line);
    }
    out.push('\n');
}

/// Move the continuation lines of `text` from indentation `from` to `to`.
///
/// The first line is left alone (callers place it). Text containing a raw string
/// literal is returned unchanged since its lines are content.
#[must_use]
pub fn reindent(text: &str, from: &str, to: &str) -> String {
    if from == to || text.contains('`') || !text.contains('\n') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
            match line.strip_prefix(from) {
                Some(rest) if !line.trim().is_empty() => {
                    out.push_str(to);
                    out.push_str(rest);
                }
                _ => out.push_str(line),
            }
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Go visibility rule: exported names start with an upper-case letter
#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
