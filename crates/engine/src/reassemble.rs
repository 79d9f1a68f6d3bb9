use crate::categorize::CategorizedDecls;
use crate::config::Config;
use crate::emit::{drain_section, emit_section};
use crate::error::{ReorderError, Result};
use crate::section::{EnumElement, Mode, Section, TypeElement};
use reorder_syntax::Decl;

/// Ordered output of [`reassemble`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassembled {
    pub decls: Vec<Decl>,
    /// Sections appended after the configured ones (warn mode only)
    pub unmatched: Vec<Section>,
}

/// Emit `cat` in configured section order, applying the configured mode.
pub fn reassemble(mut cat: CategorizedDecls, config: &Config) -> Result<Reassembled> {
    config.validate()?;
    let mode = config.behavior.mode;

    if mode == Mode::Drop {
        let dropped: Vec<_> = cat
            .non_empty_sections()
            .into_iter()
            .filter(|s| !config.includes(*s))
            .collect();
        if !dropped.is_empty() {
            log::debug!("dropping sections: {}", join(&dropped));
        }
        let decls = emit_all(&mut cat, config);
        return Ok(Reassembled {
            decls,
            unmatched: Vec::new(),
        });
    }

    let expected = cat.unit_count();
    let mut unmatched: Vec<_> = cat
        .non_empty_sections()
        .into_iter()
        .filter(|s| !config.includes(*s))
        .collect();
    if mode == Mode::Strict && !unmatched.is_empty() {
        return Err(ReorderError::unmatched(unmatched));
    }

    fold_unconfigured(&mut cat, config);
    fold_layout_omissions(&mut cat, config);

    let leftovers = !config.includes(Section::Uncategorized) && !cat.uncategorized.is_empty();
    // Only layout omissions can fill it once every section is configured
    if leftovers && unmatched.is_empty() {
        unmatched.push(Section::Uncategorized);
    }
    if mode == Mode::Strict && leftovers {
        return Err(ReorderError::unmatched(unmatched));
    }

    let mut decls = emit_all(&mut cat, config);
    if leftovers {
        decls.extend(emit_section(Section::Uncategorized, &mut cat, config));
    }

    let actual: usize = decls.iter().map(Decl::units).sum();
    if actual != expected {
        return Err(ReorderError::ConservationViolated { expected, actual });
    }

    if mode == Mode::Warn && !unmatched.is_empty() {
        log::warn!(
            "sections not in sections.order were appended at the end: {}",
            join(&unmatched)
        );
    } else {
        unmatched.clear();
    }

    Ok(Reassembled { decls, unmatched })
}

fn emit_all(cat: &mut CategorizedDecls, config: &Config) -> Vec<Decl> {
    let mut decls = Vec::new();
    for section in &config.sections.order {
        decls.extend(emit_section(*section, cat, config));
    }
    decls
}

/// Move every non-empty unconfigured section into `uncategorized`
fn fold_unconfigured(cat: &mut CategorizedDecls, config: &Config) {
    for section in Section::ALL {
        if section == Section::Uncategorized || config.includes(section) {
            continue;
        }
        let folded = drain_section(section, cat);
        if !folded.is_empty() {
            log::debug!("folding {} declarations from {section}", folded.len());
        }
        cat.uncategorized.extend(folded);
    }
}

/// Move group elements that the layouts leave out into `uncategorized`
fn fold_layout_omissions(cat: &mut CategorizedDecls, config: &Config) {
    let type_layout = &config.types.type_layout;
    let enum_layout = &config.types.enum_layout;

    let mut folded = Vec::new();
    for group in cat.exported_enums.iter_mut().chain(cat.unexported_enums.iter_mut()) {
        for element in EnumElement::ALL {
            if !enum_layout.contains(&element) {
                folded.extend(group.take_element(element));
            }
        }
    }
    for group in cat.exported_types.iter_mut().chain(cat.unexported_types.iter_mut()) {
        for element in TypeElement::ALL {
            if !type_layout.contains(&element) {
                folded.extend(group.take_element(element));
            }
        }
    }

    if !folded.is_empty() {
        log::debug!("{} declarations left out by type/enum layouts", folded.len());
    }
    cat.uncategorized.extend(folded);
}

fn join(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::categorize;
    use crate::sort::sort_categorized;
    use pretty_assertions::assert_eq;
    use reorder_syntax::parse_source;

    const SOURCE: &str = r#"package demo

func helper() {}

const Version = "1.0"

func main() {}
"#;

    fn categorized(source: &str) -> CategorizedDecls {
        let file = parse_source(source).unwrap();
        let mut cat = categorize(file.decls);
        sort_categorized(&mut cat);
        cat
    }

    fn config(order: &[Section], mode: Mode) -> Config {
        let mut config = Config::default();
        config.sections.order = order.to_vec();
        config.behavior.mode = mode;
        config
    }

    fn names(decls: &[Decl]) -> Vec<&str> {
        decls.iter().map(Decl::name).collect()
    }

    #[test]
    fn test_default_order() {
        let out = reassemble(categorized(SOURCE), &Config::default()).unwrap();
        assert_eq!(names(&out.decls), vec!["main", "Version", "helper"]);
        assert!(out.unmatched.is_empty());
    }

    #[test]
    fn test_strict_names_unmatched_sections() {
        let cfg = config(&[Section::Main, Section::ExportedConsts], Mode::Strict);
        let err = reassemble(categorized(SOURCE), &cfg).unwrap_err();
        match err {
            ReorderError::UnmatchedSections { sections } => {
                assert_eq!(sections, vec![Section::UnexportedFuncs]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_append_puts_leftovers_last() {
        let cfg = config(&[Section::ExportedConsts, Section::Main], Mode::Append);
        let out = reassemble(categorized(SOURCE), &cfg).unwrap();
        assert_eq!(names(&out.decls), vec!["Version", "main", "helper"]);
        assert!(out.unmatched.is_empty());
    }

    #[test]
    fn test_warn_reports_unmatched() {
        let cfg = config(&[Section::Main], Mode::Warn);
        let out = reassemble(categorized(SOURCE), &cfg).unwrap();
        assert_eq!(names(&out.decls), vec!["main", "Version", "helper"]);
        assert_eq!(
            out.unmatched,
            vec![Section::ExportedConsts, Section::UnexportedFuncs]
        );
    }

    #[test]
    fn test_configured_uncategorized_collects_folded() {
        let cfg = config(&[Section::Uncategorized, Section::Main], Mode::Strict);
        let err = reassemble(categorized(SOURCE), &cfg).unwrap_err();
        assert!(matches!(err, ReorderError::UnmatchedSections { .. }));

        let cfg = config(&[Section::Uncategorized, Section::Main], Mode::Append);
        let out = reassemble(categorized(SOURCE), &cfg).unwrap();
        assert_eq!(names(&out.decls), vec!["Version", "helper", "main"]);
    }

    #[test]
    fn test_drop_discards_unconfigured() {
        let cfg = config(&[Section::Imports, Section::Main], Mode::Drop);
        let out = reassemble(categorized(SOURCE), &cfg).unwrap();
        assert_eq!(names(&out.decls), vec!["main"]);
    }

    #[test]
    fn test_layout_omission_goes_to_uncategorized() {
        let source = "package demo\n\ntype Server struct{}\n\nfunc (s *Server) stop() {}\n";
        let mut cfg = Config::default();
        cfg.types.type_layout = vec![TypeElement::Typedef];
        let out = reassemble(categorized(source), &cfg).unwrap();
        assert_eq!(names(&out.decls), vec!["Server", "stop"]);

        cfg.behavior.mode = Mode::Drop;
        let out = reassemble(categorized(source), &cfg).unwrap();
        assert_eq!(names(&out.decls), vec!["Server"]);
    }

    #[test]
    fn test_layout_omission_strict_without_uncategorized() {
        let source = "package demo\n\ntype Server struct{}\n\nfunc (s *Server) stop() {}\n";
        let mut cfg = Config::default();
        cfg.sections.order.retain(|s| *s != Section::Uncategorized);
        cfg.types.type_layout = vec![TypeElement::Typedef];
        let err = reassemble(categorized(source), &cfg).unwrap_err();
        match err {
            ReorderError::UnmatchedSections { sections } => {
                assert_eq!(sections, vec![Section::Uncategorized]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
