use crate::error::{Result, SyntaxError};
use crate::language::Language;
use crate::types::{Decl, DeclKind, FuncDecl, GenDecl, Keyword, SourceFile, Spacing, Spec};
use tree_sitter::{Node, Parser};

/// Tree-sitter based parser producing top-level Go declarations with their comments
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let ts_language = Language::Go.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| SyntaxError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser })
    }

    /// Parse one source file
    pub fn parse(&mut self, source: &str) -> Result<SourceFile> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| SyntaxError::tree_sitter("parser produced no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(first_error(source, root));
        }

        let mut builder = FileBuilder::new(source);
        let mut cursor = root.walk();
        let children: Vec<_> = root.named_children(&mut cursor).collect();
        for child in children {
            builder.visit(child)?;
        }

        let file = builder.finish()?;
        log::debug!("parsed {} top-level declarations", file.decls.len());
        Ok(file)
    }
}

/// Parse Go source with a fresh parser
pub fn parse_source(source: &str) -> Result<SourceFile> {
    GoParser::new()?.parse(source)
}

/// Accumulates declarations while walking `source_file` children
struct FileBuilder<'a, 'tree> {
    source: &'a str,
    header_end: Option<usize>,
    decls: Vec<Decl>,
    pending: Vec<Node<'tree>>,
    /// Byte offset right after the previous item (including its trailing comment)
    last_end: usize,
    /// Row where the previous item's code ends
    last_row: Option<usize>,
}

impl<'a, 'tree> FileBuilder<'a, 'tree> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            header_end: None,
            decls: Vec::new(),
            pending: Vec::new(),
            last_end: 0,
            last_row: None,
        }
    }

    fn visit(&mut self, node: Node<'tree>) -> Result<()> {
        match node.kind() {
            "comment" => {
                self.visit_comment(node);
                Ok(())
            }
            "package_clause" => {
                if self.header_end.is_some() {
                    return Err(self.unexpected(node));
                }
                // Comments above the package clause belong to the header
                self.pending.clear();
                let end = code_end(node);
                self.header_end = Some(end.end_byte());
                self.last_end = end.end_byte();
                self.last_row = Some(end.end_position().row);
                Ok(())
            }
            "import_declaration" | "function_declaration" | "method_declaration"
            | "const_declaration" | "var_declaration" | "type_declaration" => {
                if self.header_end.is_none() {
                    return Err(SyntaxError::MissingPackage);
                }
                let decl = self.build_decl(node)?;
                self.decls.push(decl);
                Ok(())
            }
            _ => Err(self.unexpected(node)),
        }
    }

    fn visit_comment(&mut self, node: Node<'tree>) {
        let same_line = self.pending.is_empty()
            && self.last_row == Some(node.start_position().row);
        if !same_line {
            self.pending.push(node);
            return;
        }

        let comment = node_text(self.source, node).to_string();
        match self.decls.last_mut() {
            Some(decl) => decl.trailing = Some(join_trailing(decl.trailing.take(), comment)),
            None => self.header_end = Some(node.end_byte()),
        }
        self.last_end = node.end_byte();
    }

    fn build_decl(&mut self, node: Node<'tree>) -> Result<Decl> {
        let source = self.source;
        let (doc, doc_start) = take_comments(source, &mut self.pending);
        let content_start = doc_start.unwrap_or_else(|| node.start_byte());
        let spacing = spacing_between(&source[self.last_end..content_start]);

        let end = code_end(node);
        let text = source[node.start_byte()..end.end_byte()].to_string();
        let trailing = non_empty(&source[end.end_byte()..node.end_byte()]);

        let kind = match node.kind() {
            "import_declaration" => DeclKind::Import,
            "function_declaration" | "method_declaration" => DeclKind::Func(func_decl(source, node)),
            "const_declaration" => DeclKind::Gen(gen_decl(source, node, Keyword::Const)),
            "var_declaration" => DeclKind::Gen(gen_decl(source, node, Keyword::Var)),
            "type_declaration" => DeclKind::Gen(gen_decl(source, node, Keyword::Type)),
            _ => return Err(self.unexpected(node)),
        };

        self.last_end = node.end_byte();
        self.last_row = Some(end.end_position().row);

        Ok(Decl {
            spacing,
            doc,
            text,
            trailing,
            kind,
        })
    }

    fn unexpected(&self, node: Node<'_>) -> SyntaxError {
        SyntaxError::parse_at(node.start_position(), snippet(self.source, node))
    }

    fn finish(mut self) -> Result<SourceFile> {
        let header_end = self.header_end.ok_or(SyntaxError::MissingPackage)?;
        let (trailer, _) = take_comments(self.source, &mut self.pending);

        Ok(SourceFile {
            header: self.source[..header_end].to_string(),
            decls: self.decls,
            trailer,
        })
    }
}

fn func_decl(source: &str, node: Node<'_>) -> FuncDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(source, n).to_string())
        .unwrap_or_default();

    let receiver_list = node.child_by_field_name("receiver");
    let receiver = receiver_list
        .and_then(first_parameter_type)
        .and_then(|ty| type_name(source, ty));

    let first_result = node.child_by_field_name("result").and_then(|result| {
        let ty = if result.kind() == "parameter_list" {
            first_parameter_type(result)?
        } else {
            result
        };
        constructor_type_name(source, ty)
    });

    FuncDecl {
        name,
        has_receiver: receiver_list.is_some(),
        receiver,
        first_result,
    }
}

/// Type of the first entry in a `parameter_list`
fn first_parameter_type(list: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = list.walk();
    let first = list.named_children(&mut cursor).find(|child| {
        matches!(
            child.kind(),
            "parameter_declaration" | "variadic_parameter_declaration"
        )
    })?;
    first.child_by_field_name("type")
}

/// Base name of a type expression: `pkg.T`, `*T`, `T[K, V]` all yield `T`
fn type_name(source: &str, node: Node<'_>) -> Option<String> {
    match node.kind() {
        "type_identifier" => Some(node_text(source, node).to_string()),
        "qualified_type" => node
            .child_by_field_name("name")
            .map(|name| node_text(source, name).to_string()),
        "generic_type" => node
            .child_by_field_name("type")
            .and_then(|inner| type_name(source, inner)),
        "pointer_type" | "parenthesized_type" => {
            node.named_child(0).and_then(|inner| type_name(source, inner))
        }
        _ => None,
    }
}

/// Constructor results only match `T` or `*T`
fn constructor_type_name(source: &str, node: Node<'_>) -> Option<String> {
    match node.kind() {
        "type_identifier" => Some(node_text(source, node).to_string()),
        "pointer_type" => node
            .named_child(0)
            .filter(|inner| inner.kind() == "type_identifier")
            .map(|inner| node_text(source, inner).to_string()),
        _ => None,
    }
}

fn gen_decl(source: &str, node: Node<'_>, keyword: Keyword) -> GenDecl {
    let mut grouped = false;
    let mut items = Vec::new();
    collect_block_items(node, &mut grouped, &mut items);

    let mut specs: Vec<Spec> = Vec::new();
    let mut pending = Vec::new();
    let mut last_row = None;

    for item in items {
        if item.kind() == "comment" {
            let same_line = grouped
                && pending.is_empty()
                && !specs.is_empty()
                && last_row == Some(item.start_position().row);
            if same_line {
                if let Some(spec) = specs.last_mut() {
                    let comment = node_text(source, item).to_string();
                    spec.trailing = Some(join_trailing(spec.trailing.take(), comment));
                }
            } else {
                pending.push(item);
            }
            continue;
        }

        let (doc, _) = take_comments(source, &mut pending);
        let end = code_end(item);
        let trailing = if grouped {
            non_empty(&source[end.end_byte()..item.end_byte()])
        } else {
            None
        };
        last_row = Some(end.end_position().row);
        specs.push(build_spec(source, item, end.end_byte(), doc, trailing));
    }

    // Comments dangling before `)` stay with the last spec
    let (dangling, _) = take_comments(source, &mut pending);
    if let (Some(dangling), Some(last)) = (dangling, specs.last_mut()) {
        last.doc = Some(match last.doc.take() {
            Some(doc) => format!("{doc}\n{}{dangling}", last.indent),
            None => dangling,
        });
    }

    GenDecl {
        keyword,
        grouped,
        specs,
        merged: false,
    }
}

fn collect_block_items<'tree>(node: Node<'tree>, grouped: &mut bool, items: &mut Vec<Node<'tree>>) {
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    for child in children {
        let kind = child.kind();
        if kind == "(" {
            *grouped = true;
        } else if kind.ends_with("_spec_list") {
            collect_block_items(child, grouped, items);
        } else if child.is_named() {
            items.push(child);
        }
    }
}

fn build_spec(
    source: &str,
    node: Node<'_>,
    end_byte: usize,
    doc: Option<String>,
    trailing: Option<String>,
) -> Spec {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    // The field also covers the separating commas
    for name in node.children_by_field_name("name", &mut cursor) {
        if name.is_named() {
            names.push(node_text(source, name).to_string());
        }
    }

    let type_name = match node.kind() {
        "const_spec" | "var_spec" => node
            .child_by_field_name("type")
            .and_then(|ty| type_name(source, ty)),
        _ => None,
    };

    let uses_iota = node
        .child_by_field_name("value")
        .is_some_and(|value| contains_iota(source, value));

    Spec {
        doc,
        text: source[node.start_byte()..end_byte].to_string(),
        trailing,
        indent: line_indent(source, node.start_byte()).to_string(),
        names,
        type_name,
        uses_iota,
    }
}

fn contains_iota(source: &str, node: Node<'_>) -> bool {
    if node.kind() == "iota" || (node.kind() == "identifier" && node_text(source, node) == "iota") {
        return true;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.named_children(&mut cursor).collect();
    children.into_iter().any(|child| contains_iota(source, child))
}

/// Deepest last non-comment descendant; its end is where the code stops
fn code_end(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    loop {
        let last = (0..current.child_count())
            .rev()
            .filter_map(|idx| current.child(idx))
            .find(|child| !child.is_extra());
        match last {
            Some(child) => current = child,
            None => return current,
        }
    }
}

/// Join pending comments into one verbatim block, returning it with its start offset
fn take_comments(source: &str, pending: &mut Vec<Node<'_>>) -> (Option<String>, Option<usize>) {
    let (Some(first), Some(last)) = (pending.first(), pending.last()) else {
        return (None, None);
    };
    let start = first.start_byte();
    let text = source[start..last.end_byte()].to_string();
    pending.clear();
    (Some(text), Some(start))
}

fn spacing_between(gap: &str) -> Spacing {
    if gap.matches('\n').count() >= 2 {
        Spacing::EmptyLine
    } else {
        Spacing::Line
    }
}

fn join_trailing(existing: Option<String>, comment: String) -> String {
    match existing {
        Some(existing) => format!("{existing} {comment}"),
        None => comment,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Leading whitespace of the line containing `offset`
fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |idx| idx + 1);
    let line = &source[line_start..offset];
    let width = line.len() - line.trim_start().len();
    &line[..width]
}

fn node_text<'a>(source: &'a str, node: Node<'_>) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

fn snippet(source: &str, node: Node<'_>) -> String {
    let text = node_text(source, node);
    let line = text.lines().next().unwrap_or_default();
    line.chars().take(40).collect()
}

fn first_error(source: &str, root: Node<'_>) -> SyntaxError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let near = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                snippet(source, node)
            };
            return SyntaxError::parse_at(node.start_position(), near);
        }
        // Push in reverse so the leftmost child is visited first
        for idx in (0..node.child_count()).rev() {
            if let Some(child) = node.child(idx) {
                if child.has_error() || child.is_error() || child.is_missing() {
                    stack.push(child);
                }
            }
        }
    }
    SyntaxError::parse_at(root.start_position(), snippet(source, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(code: &str) -> SourceFile {
        parse_source(code).unwrap()
    }

    fn gen(decl: &Decl) -> &GenDecl {
        decl.as_gen().unwrap()
    }

    #[test]
    fn test_header_and_decls() {
        let code = r#"// Package demo does things.
package demo // trailing

import "fmt"

func main() { fmt.Println("hi") }
"#;
        let file = parse(code);
        assert_eq!(file.header, "// Package demo does things.\npackage demo // trailing");
        assert_eq!(file.decls.len(), 2);
        assert_eq!(file.decls[0].kind, DeclKind::Import);
        assert_eq!(file.decls[0].text, "import \"fmt\"");
        assert_eq!(file.decls[1].name(), "main");
        assert!(file.trailer.is_none());
    }

    #[test]
    fn test_doc_and_trailing_comments() {
        let code = r#"package demo

// Version is the release.
// It is exported.
const Version = "1.0" // keep in sync

func helper() {}
// dangling at end
"#;
        let file = parse(code);
        let version = &file.decls[0];
        assert_eq!(
            version.doc.as_deref(),
            Some("// Version is the release.\n// It is exported.")
        );
        assert_eq!(version.text, "const Version = \"1.0\"");
        assert_eq!(version.trailing.as_deref(), Some("// keep in sync"));
        assert_eq!(version.spacing, Spacing::EmptyLine);

        let helper = &file.decls[1];
        assert!(helper.doc.is_none());
        assert_eq!(file.trailer.as_deref(), Some("// dangling at end"));
    }

    #[test]
    fn test_adjacent_declarations_have_line_spacing() {
        let file = parse("package demo\n\nfunc a() {}\nfunc b() {}\n");
        assert_eq!(file.decls[1].spacing, Spacing::Line);
    }

    #[test]
    fn test_methods_and_receivers() {
        let code = r#"package demo

func (s *Server) Start() {}

func (s Stack[T]) Push(v T) {}

func (q *Queue[K, V]) pop() {}
"#;
        let file = parse(code);
        let receivers: Vec<_> = file
            .decls
            .iter()
            .map(|d| d.as_func().unwrap().receiver.clone().unwrap())
            .collect();
        assert_eq!(receivers, vec!["Server", "Stack", "Queue"]);
    }

    #[test]
    fn test_first_result_type() {
        let code = r#"package demo

func NewServer() *Server { return nil }

func NewClient() (Client, error) { return Client{}, nil }

func NewList() []Item { return nil }

func NewRemote() pkg.Remote { return pkg.Remote{} }

func Run() {}
"#;
        let file = parse(code);
        let results: Vec<_> = file
            .decls
            .iter()
            .map(|d| d.as_func().unwrap().first_result.clone())
            .collect();
        assert_eq!(
            results,
            vec![
                Some("Server".to_string()),
                Some("Client".to_string()),
                None,
                None,
                None
            ]
        );
    }

    #[test]
    fn test_const_block_specs() {
        let code = r#"package demo

// Status codes.
const (
	// StatusPending waits.
	StatusPending Status = iota // first
	StatusActive
	// closing note
)
"#;
        let file = parse(code);
        let decl = &file.decls[0];
        assert_eq!(decl.doc.as_deref(), Some("// Status codes."));
        let block = gen(decl);
        assert!(block.grouped);
        assert_eq!(block.keyword, Keyword::Const);
        assert_eq!(block.specs.len(), 2);

        let pending = &block.specs[0];
        assert_eq!(pending.names, vec!["StatusPending"]);
        assert_eq!(pending.doc.as_deref(), Some("// StatusPending waits."));
        assert_eq!(pending.text, "StatusPending Status = iota");
        assert_eq!(pending.trailing.as_deref(), Some("// first"));
        assert_eq!(pending.indent, "\t");
        assert_eq!(pending.type_name.as_deref(), Some("Status"));
        assert!(pending.uses_iota);

        let active = &block.specs[1];
        assert_eq!(active.type_name, None);
        assert!(!active.uses_iota);
        assert_eq!(active.doc.as_deref(), Some("// closing note"));
    }

    #[test]
    fn test_iota_inside_expression() {
        let file = parse("package demo\n\nconst (\n\tKB = 1 << (10 * (iota + 1))\n\tMB\n)\n");
        assert!(gen(&file.decls[0]).specs[0].uses_iota);
    }

    #[test]
    fn test_var_and_type_blocks() {
        let code = r#"package demo

var (
	zebra bool // z
	apple, pear = 1, 2
)

type (
	A int
	B = string
)
"#;
        let file = parse(code);
        let vars = gen(&file.decls[0]);
        assert_eq!(vars.keyword, Keyword::Var);
        assert_eq!(vars.specs[0].trailing.as_deref(), Some("// z"));
        assert_eq!(vars.specs[0].type_name.as_deref(), Some("bool"));
        assert_eq!(vars.specs[1].names, vec!["apple", "pear"]);

        let types = gen(&file.decls[1]);
        assert_eq!(types.keyword, Keyword::Type);
        let names: Vec<_> = types.specs.iter().map(Spec::name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_single_spec_trailing_stays_on_decl() {
        let file = parse("package demo\n\nvar debug = false // toggled by tests\n");
        let decl = &file.decls[0];
        assert_eq!(decl.trailing.as_deref(), Some("// toggled by tests"));
        assert!(gen(decl).specs[0].trailing.is_none());
        assert!(!gen(decl).grouped);
    }

    #[test]
    fn test_parse_error_reports_position() {
        let err = parse_source("package demo\n\nfunc 123InvalidName() {}\n").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("3:"), "unexpected message: {message}");
    }

    #[test]
    fn test_missing_package() {
        assert!(parse_source("func main() {}\n").is_err());
    }
}
