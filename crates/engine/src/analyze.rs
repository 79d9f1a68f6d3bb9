use crate::categorize::enum_type;
use crate::error::Result;
use crate::section::Section;
use reorder_syntax::{is_exported, parse_source, Decl, DeclKind, Keyword};

/// Where a section first shows up in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPosition {
    pub section: Section,
    /// 1-based index of the first declaration in this section
    pub position: usize,
    /// 1-based position in the default order
    pub expected: usize,
}

/// Sections present in a file, by first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionOrder {
    pub sections: Vec<SectionPosition>,
}

impl SectionOrder {
    /// Sections already appear in default relative order
    pub fn is_canonical(&self) -> bool {
        self.sections
            .windows(2)
            .all(|pair| pair[0].expected <= pair[1].expected)
    }
}

/// Report which sections a source file contains and where they start
pub fn analyze_section_order(source: &str) -> Result<SectionOrder> {
    let file = parse_source(source)?;
    let mut order = SectionOrder::default();

    for (idx, decl) in file.decls.iter().enumerate() {
        let Some(section) = identify_section(decl) else {
            continue;
        };
        if order.sections.iter().any(|s| s.section == section) {
            continue;
        }
        order.sections.push(SectionPosition {
            section,
            position: idx + 1,
            expected: section.default_position(),
        });
    }

    Ok(order)
}

/// Section a single declaration belongs to, judged on its own.
///
/// Methods count toward their receiver's type section.
pub fn identify_section(decl: &Decl) -> Option<Section> {
    let by_case = |name: &str, exported: Section, unexported: Section| {
        if is_exported(name) {
            exported
        } else {
            unexported
        }
    };

    match &decl.kind {
        DeclKind::Import => Some(Section::Imports),
        DeclKind::Func(func) if func.is_method() => func
            .receiver
            .as_deref()
            .map(|r| by_case(r, Section::ExportedTypes, Section::UnexportedTypes)),
        DeclKind::Func(func) if func.name == "main" => Some(Section::Main),
        DeclKind::Func(func) if func.name == "init" => Some(Section::Init),
        DeclKind::Func(func) => Some(by_case(
            &func.name,
            Section::ExportedFuncs,
            Section::UnexportedFuncs,
        )),
        DeclKind::Gen(gen) if gen.specs.is_empty() => None,
        DeclKind::Gen(gen) => match gen.keyword {
            Keyword::Const => match enum_type(gen) {
                Some(ty) => Some(by_case(&ty, Section::ExportedEnums, Section::UnexportedEnums)),
                None => Some(by_case(
                    decl.name(),
                    Section::ExportedConsts,
                    Section::UnexportedConsts,
                )),
            },
            Keyword::Var => Some(by_case(
                decl.name(),
                Section::ExportedVars,
                Section::UnexportedVars,
            )),
            Keyword::Type => Some(by_case(
                decl.name(),
                Section::ExportedTypes,
                Section::UnexportedTypes,
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_positions_and_expectations() {
        let order = analyze_section_order(
            r#"package demo

import "fmt"

func helper() {}

type Server struct{}

func (s *Server) Start() {}

func main() { fmt.Println() }
"#,
        )
        .unwrap();

        let summary: Vec<_> = order
            .sections
            .iter()
            .map(|s| (s.section, s.position, s.expected))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Section::Imports, 1, 1),
                (Section::UnexportedFuncs, 2, 13),
                (Section::ExportedTypes, 3, 7),
                (Section::Main, 5, 2),
            ]
        );
        assert!(!order.is_canonical());
    }

    #[test]
    fn test_enum_block_identified() {
        let order = analyze_section_order(
            "package demo\n\nconst (\n\tlow level = iota\n)\n\nconst Max = 3\n",
        )
        .unwrap();
        let sections: Vec<_> = order.sections.iter().map(|s| s.section).collect();
        assert_eq!(sections, vec![Section::UnexportedEnums, Section::ExportedConsts]);
        assert!(!order.is_canonical());
    }

    #[test]
    fn test_reordered_output_is_canonical() {
        let source = "package demo\n\nfunc b() {}\n\nfunc main() {}\n";
        let reordered = crate::reorder_source(source).unwrap();
        assert!(analyze_section_order(&reordered).unwrap().is_canonical());
    }

    #[test]
    fn test_parse_failure() {
        assert!(analyze_section_order("package demo\n\nfunc (\n").is_err());
    }
}
