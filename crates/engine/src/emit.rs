use crate::categorize::{strip_block_headers, CategorizedDecls, EnumGroup, TypeGroup};
use crate::config::Config;
use crate::section::{EnumElement, Section, TypeElement};
use reorder_syntax::{Decl, Keyword, Spacing, Spec};

/// Take the declarations of `section` out of `cat`, rendered for output.
///
/// Type and enum groups follow the configured layouts; elements missing from a layout
/// are not emitted and stay behind in the dropped group.
pub fn emit_section(section: Section, cat: &mut CategorizedDecls, config: &Config) -> Vec<Decl> {
    render(
        section,
        cat,
        &config.types.type_layout,
        &config.types.enum_layout,
    )
}

/// Same as [`emit_section`] with complete layouts, so nothing is left behind
pub(crate) fn drain_section(section: Section, cat: &mut CategorizedDecls) -> Vec<Decl> {
    render(section, cat, &TypeElement::ALL, &EnumElement::ALL)
}

fn render(
    section: Section,
    cat: &mut CategorizedDecls,
    type_layout: &[TypeElement],
    enum_layout: &[EnumElement],
) -> Vec<Decl> {
    match section {
        Section::Imports => {
            let mut imports = std::mem::take(&mut cat.imports);
            if let Some(first) = imports.first_mut() {
                first.spacing = Spacing::EmptyLine;
            }
            imports
        }
        Section::Main => cat.main.take().map(spaced).into_iter().collect(),
        Section::Init => spaced_all(std::mem::take(&mut cat.init)),
        Section::ExportedConsts => {
            merged(Keyword::Const, "Exported constants.", &mut cat.exported_consts)
        }
        Section::UnexportedConsts => {
            merged(Keyword::Const, "unexported constants.", &mut cat.unexported_consts)
        }
        Section::ExportedVars => {
            merged(Keyword::Var, "Exported variables.", &mut cat.exported_vars)
        }
        Section::UnexportedVars => {
            merged(Keyword::Var, "unexported variables.", &mut cat.unexported_vars)
        }
        Section::ExportedEnums => std::mem::take(&mut cat.exported_enums)
            .into_iter()
            .flat_map(|group| render_enum(group, enum_layout))
            .collect(),
        Section::UnexportedEnums => std::mem::take(&mut cat.unexported_enums)
            .into_iter()
            .flat_map(|group| render_enum(group, enum_layout))
            .collect(),
        Section::ExportedTypes => std::mem::take(&mut cat.exported_types)
            .into_iter()
            .flat_map(|group| render_type(group, type_layout))
            .collect(),
        Section::UnexportedTypes => std::mem::take(&mut cat.unexported_types)
            .into_iter()
            .flat_map(|group| render_type(group, type_layout))
            .collect(),
        Section::ExportedFuncs => spaced_all(std::mem::take(&mut cat.exported_funcs)),
        Section::UnexportedFuncs => spaced_all(std::mem::take(&mut cat.unexported_funcs)),
        Section::Uncategorized => spaced_all(std::mem::take(&mut cat.uncategorized)),
    }
}

fn merged(keyword: Keyword, header: &str, specs: &mut Vec<Spec>) -> Vec<Decl> {
    if specs.is_empty() {
        return Vec::new();
    }
    vec![Decl::merged_block(keyword, header, std::mem::take(specs))]
}

fn render_type(mut group: TypeGroup, layout: &[TypeElement]) -> Vec<Decl> {
    let mut out = Vec::new();
    for element in layout {
        out.extend(group.take_element(*element));
    }
    spaced_all(out)
}

fn render_enum(mut group: EnumGroup, layout: &[EnumElement]) -> Vec<Decl> {
    let mut out = Vec::new();
    for element in layout {
        let decls = group.take_element(*element);
        if *element == EnumElement::Iota {
            out.extend(decls.into_iter().map(|d| with_values_header(d, &group.name)));
        } else {
            out.extend(decls);
        }
    }
    spaced_all(out)
}

/// Put `// {Type} values.` on top of the value block, replacing any earlier emitter header
fn with_values_header(mut decl: Decl, type_name: &str) -> Decl {
    let header = format!("// {type_name} values.");
    decl.doc = Some(match decl.doc.as_deref().and_then(strip_block_headers) {
        Some(rest) => format!("{header}\n{rest}"),
        None => header,
    });
    decl
}

impl TypeGroup {
    /// Remove and return the declarations of one layout element
    pub fn take_element(&mut self, element: TypeElement) -> Vec<Decl> {
        match element {
            TypeElement::Typedef => self.typedef.take().into_iter().collect(),
            TypeElement::Constructors => std::mem::take(&mut self.constructors),
            TypeElement::ExportedMethods => std::mem::take(&mut self.exported_methods),
            TypeElement::UnexportedMethods => std::mem::take(&mut self.unexported_methods),
        }
    }
}

impl EnumGroup {
    /// Remove and return the declarations of one layout element
    pub fn take_element(&mut self, element: EnumElement) -> Vec<Decl> {
        match element {
            EnumElement::Typedef => self.typedef.take().into_iter().collect(),
            EnumElement::Iota => self.values.take().into_iter().collect(),
            EnumElement::ExportedMethods => std::mem::take(&mut self.exported_methods),
            EnumElement::UnexportedMethods => std::mem::take(&mut self.unexported_methods),
        }
    }
}

fn spaced(decl: Decl) -> Decl {
    decl.spaced(Spacing::EmptyLine)
}

fn spaced_all(decls: Vec<Decl>) -> Vec<Decl> {
    decls.into_iter().map(spaced).collect()
}
