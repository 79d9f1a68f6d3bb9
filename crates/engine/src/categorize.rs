use crate::section::Section;
use reorder_syntax::{is_exported, Decl, DeclKind, GenDecl, Keyword, Spec};
use std::collections::{HashMap, HashSet};

/// Synthetic block headers written by the emitter; stripped again when a block is split
const BLOCK_HEADERS: [&str; 4] = [
    "// Exported constants.",
    "// unexported constants.",
    "// Exported variables.",
    "// unexported variables.",
];

/// Constructor name prefixes
const CONSTRUCTOR_PREFIXES: [&str; 2] = ["New", "Must"];

/// A type with its constructors and methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGroup {
    pub name: String,
    /// Absent when the type is defined in another file
    pub typedef: Option<Decl>,
    pub constructors: Vec<Decl>,
    pub exported_methods: Vec<Decl>,
    pub unexported_methods: Vec<Decl>,
}

impl TypeGroup {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typedef: None,
            constructors: Vec::new(),
            exported_methods: Vec::new(),
            unexported_methods: Vec::new(),
        }
    }

    fn push_method(&mut self, method: Decl) {
        if is_exported(method.name()) {
            self.exported_methods.push(method);
        } else {
            self.unexported_methods.push(method);
        }
    }

    fn has_methods(&self) -> bool {
        !self.exported_methods.is_empty() || !self.unexported_methods.is_empty()
    }

    fn is_empty(&self) -> bool {
        self.typedef.is_none() && self.constructors.is_empty() && !self.has_methods()
    }

    pub fn units(&self) -> usize {
        usize::from(self.typedef.is_some())
            + self.constructors.len()
            + self.exported_methods.len()
            + self.unexported_methods.len()
    }
}

/// An iota-valued type with its value block and methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumGroup {
    pub name: String,
    pub typedef: Option<Decl>,
    /// The const block holding the values; taken out only when rerouted elsewhere
    pub values: Option<Decl>,
    pub exported_methods: Vec<Decl>,
    pub unexported_methods: Vec<Decl>,
}

impl EnumGroup {
    pub fn units(&self) -> usize {
        usize::from(self.typedef.is_some())
            + usize::from(self.values.is_some())
            + self.exported_methods.len()
            + self.unexported_methods.len()
    }
}

/// Declarations of one file, bucketed by section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedDecls {
    pub imports: Vec<Decl>,
    pub main: Option<Decl>,
    pub init: Vec<Decl>,
    pub exported_consts: Vec<Spec>,
    pub unexported_consts: Vec<Spec>,
    pub exported_vars: Vec<Spec>,
    pub unexported_vars: Vec<Spec>,
    pub exported_enums: Vec<EnumGroup>,
    pub unexported_enums: Vec<EnumGroup>,
    pub exported_types: Vec<TypeGroup>,
    pub unexported_types: Vec<TypeGroup>,
    pub exported_funcs: Vec<Decl>,
    pub unexported_funcs: Vec<Decl>,
    pub uncategorized: Vec<Decl>,
}

impl CategorizedDecls {
    /// Output units held by `section`; specs count one each
    pub fn section_units(&self, section: Section) -> usize {
        match section {
            Section::Imports => self.imports.len(),
            Section::Main => usize::from(self.main.is_some()),
            Section::Init => self.init.len(),
            Section::ExportedConsts => self.exported_consts.len(),
            Section::ExportedEnums => self.exported_enums.iter().map(EnumGroup::units).sum(),
            Section::ExportedVars => self.exported_vars.len(),
            Section::ExportedTypes => self.exported_types.iter().map(TypeGroup::units).sum(),
            Section::ExportedFuncs => self.exported_funcs.len(),
            Section::UnexportedConsts => self.unexported_consts.len(),
            Section::UnexportedEnums => self.unexported_enums.iter().map(EnumGroup::units).sum(),
            Section::UnexportedVars => self.unexported_vars.len(),
            Section::UnexportedTypes => self.unexported_types.iter().map(TypeGroup::units).sum(),
            Section::UnexportedFuncs => self.unexported_funcs.len(),
            Section::Uncategorized => self.uncategorized.iter().map(Decl::units).sum(),
        }
    }

    pub fn unit_count(&self) -> usize {
        Section::ALL.iter().map(|s| self.section_units(*s)).sum()
    }

    pub fn is_section_empty(&self, section: Section) -> bool {
        self.section_units(section) == 0
    }

    /// Sections holding at least one declaration, in default order
    pub fn non_empty_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|s| !self.is_section_empty(*s))
            .collect()
    }
}

/// Sort declarations into sections and groups.
///
/// Never fails: anything that cannot be placed goes to `uncategorized`.
pub fn categorize(decls: Vec<Decl>) -> CategorizedDecls {
    let mut categorizer = Categorizer::default();
    categorizer.collect_type_names(&decls);
    for decl in decls {
        categorizer.classify(decl);
    }
    categorizer.pair_enums();
    categorizer.promote_groups();

    let cat = categorizer.cat;
    log::debug!(
        "categorized {} units into {} sections",
        cat.unit_count(),
        cat.non_empty_sections().len()
    );
    cat
}

/// Where a single declaration goes during classification
enum Placement {
    Import,
    Main,
    Init,
    Method(String),
    Constructor(String),
    Func,
    Enum(String),
    Consts,
    Vars,
    Types,
    Uncategorized,
}

#[derive(Default)]
struct Categorizer {
    cat: CategorizedDecls,
    /// Type groups by first appearance; `None` once moved into an enum group
    groups: Vec<Option<TypeGroup>>,
    index: HashMap<String, usize>,
    /// Types declared in this file
    defined: HashSet<String>,
    /// Enum value blocks with their type name, in source order
    enum_blocks: Vec<(String, Decl)>,
}

impl Categorizer {
    fn collect_type_names(&mut self, decls: &[Decl]) {
        for decl in decls {
            let Some(gen) = decl.as_gen() else { continue };
            if gen.keyword != Keyword::Type {
                continue;
            }
            for spec in &gen.specs {
                let name = spec.name().to_string();
                self.group_mut(&name);
                self.defined.insert(name);
            }
        }
    }

    fn group_mut(&mut self, name: &str) -> &mut TypeGroup {
        let idx = match self.index.get(name) {
            Some(idx) => *idx,
            None => {
                self.groups.push(Some(TypeGroup::new(name)));
                let idx = self.groups.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        self.groups[idx].get_or_insert_with(|| TypeGroup::new(name))
    }

    fn placement(&self, decl: &Decl) -> Placement {
        match &decl.kind {
            DeclKind::Import => Placement::Import,
            DeclKind::Func(func) if func.is_method() => match &func.receiver {
                Some(receiver) => Placement::Method(receiver.clone()),
                None => Placement::Uncategorized,
            },
            DeclKind::Func(func) if func.name == "main" => {
                if self.cat.main.is_none() {
                    Placement::Main
                } else {
                    Placement::Uncategorized
                }
            }
            DeclKind::Func(func) if func.name == "init" => Placement::Init,
            DeclKind::Func(func) => self
                .constructed_type(&func.name, func.first_result.as_deref())
                .map_or(Placement::Func, Placement::Constructor),
            DeclKind::Gen(gen) if gen.specs.is_empty() => Placement::Uncategorized,
            DeclKind::Gen(gen) => match gen.keyword {
                Keyword::Const => enum_type(gen).map_or(Placement::Consts, Placement::Enum),
                Keyword::Var => Placement::Vars,
                Keyword::Type => Placement::Types,
            },
        }
    }

    fn classify(&mut self, decl: Decl) {
        match self.placement(&decl) {
            Placement::Import => self.cat.imports.push(decl),
            Placement::Main => self.cat.main = Some(decl),
            Placement::Init => self.cat.init.push(decl),
            Placement::Method(receiver) => self.group_mut(&receiver).push_method(decl),
            Placement::Constructor(ty) => self.group_mut(&ty).constructors.push(decl),
            Placement::Func => self.push_func(decl),
            Placement::Enum(ty) => self.enum_blocks.push((ty, decl)),
            Placement::Consts => {
                for spec in split_values(decl) {
                    if is_exported(spec.name()) {
                        self.cat.exported_consts.push(spec);
                    } else {
                        self.cat.unexported_consts.push(spec);
                    }
                }
            }
            Placement::Vars => {
                for spec in split_values(decl) {
                    if is_exported(spec.name()) {
                        self.cat.exported_vars.push(spec);
                    } else {
                        self.cat.unexported_vars.push(spec);
                    }
                }
            }
            Placement::Types => {
                for typedef in split_types(decl) {
                    let name = typedef.name().to_string();
                    let group = self.group_mut(&name);
                    if group.typedef.is_none() {
                        group.typedef = Some(typedef);
                    } else {
                        self.cat.uncategorized.push(typedef);
                    }
                }
            }
            Placement::Uncategorized => self.cat.uncategorized.push(decl),
        }
    }

    /// Type built by a `New*`/`Must*` function, if it is defined in this file
    fn constructed_type(&self, name: &str, first_result: Option<&str>) -> Option<String> {
        if !CONSTRUCTOR_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
            return None;
        }
        first_result
            .filter(|ty| self.defined.contains(*ty))
            .map(str::to_string)
    }

    fn push_func(&mut self, func: Decl) {
        if is_exported(func.name()) {
            self.cat.exported_funcs.push(func);
        } else {
            self.cat.unexported_funcs.push(func);
        }
    }

    fn pair_enums(&mut self) {
        let mut paired = HashSet::new();
        for (name, values) in std::mem::take(&mut self.enum_blocks) {
            let mut group = EnumGroup {
                name: name.clone(),
                typedef: None,
                values: Some(values),
                exported_methods: Vec::new(),
                unexported_methods: Vec::new(),
            };

            // Only the first block of a type takes its definition and methods
            if paired.insert(name.clone()) {
                if let Some(types) = self.index.get(&name).and_then(|idx| self.groups[*idx].take()) {
                    group.typedef = types.typedef;
                    group.exported_methods = types.exported_methods;
                    group.unexported_methods = types.unexported_methods;
                    for constructor in types.constructors {
                        self.push_func(constructor);
                    }
                }
            }

            if is_exported(&name) {
                self.cat.exported_enums.push(group);
            } else {
                self.cat.unexported_enums.push(group);
            }
        }
    }

    fn promote_groups(&mut self) {
        for group in self.groups.drain(..).flatten() {
            if group.is_empty() {
                continue;
            }
            if is_exported(&group.name) {
                self.cat.exported_types.push(group);
            } else {
                self.cat.unexported_types.push(group);
            }
        }
    }
}

/// Type of an enumeration block: needs `iota` and at least one annotated spec
pub fn enum_type(gen: &GenDecl) -> Option<String> {
    if gen.keyword != Keyword::Const || !gen.specs.iter().any(|s| s.uses_iota) {
        return None;
    }
    gen.specs.iter().find_map(|s| s.type_name.clone())
}

/// Break a const/var declaration into specs, moving block comments onto them
fn split_values(decl: Decl) -> Vec<Spec> {
    let Decl {
        doc, trailing, kind, ..
    } = decl;
    let DeclKind::Gen(gen) = kind else {
        return Vec::new();
    };
    let mut specs = gen.specs;

    if let Some(doc) = doc.and_then(|doc| strip_block_headers(&doc)) {
        if let Some(first) = specs.first_mut() {
            first.doc = Some(match first.doc.take() {
                Some(own) => format!("{doc}\n{}{own}", first.indent),
                None => doc,
            });
        }
    }
    if let (Some(trailing), Some(last)) = (trailing, specs.last_mut()) {
        last.trailing = Some(match last.trailing.take() {
            Some(own) => format!("{own} {trailing}"),
            None => trailing,
        });
    }
    specs
}

/// One declaration per type spec; single-spec declarations pass through untouched
fn split_types(decl: Decl) -> Vec<Decl> {
    let grouped = decl.as_gen().is_some_and(|gen| gen.grouped);
    if !grouped {
        return vec![decl];
    }
    split_values(decl)
        .into_iter()
        .map(Decl::from_type_spec)
        .collect()
}

/// Drop emitter headers (merged block and `// T values.` lines) from a doc comment
pub(crate) fn strip_block_headers(doc: &str) -> Option<String> {
    let kept: Vec<&str> = doc
        .lines()
        .filter(|line| !is_block_header(line.trim()))
        .collect();
    let joined = kept.join("\n");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_block_header(line: &str) -> bool {
    if BLOCK_HEADERS.contains(&line) {
        return true;
    }
    line.strip_prefix("// ")
        .and_then(|rest| rest.strip_suffix(" values."))
        .is_some_and(|name| {
            !name.is_empty() && name.chars().all(|c| c == '_' || c.is_alphanumeric())
        })
}
