use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Named bucket of declarations, emitted as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Imports,
    Main,
    Init,
    ExportedConsts,
    ExportedEnums,
    ExportedVars,
    ExportedTypes,
    ExportedFuncs,
    UnexportedConsts,
    UnexportedEnums,
    UnexportedVars,
    UnexportedTypes,
    UnexportedFuncs,
    Uncategorized,
}

impl Section {
    /// Every section, in default emission order
    pub const ALL: [Section; 14] = [
        Section::Imports,
        Section::Main,
        Section::Init,
        Section::ExportedConsts,
        Section::ExportedEnums,
        Section::ExportedVars,
        Section::ExportedTypes,
        Section::ExportedFuncs,
        Section::UnexportedConsts,
        Section::UnexportedEnums,
        Section::UnexportedVars,
        Section::UnexportedTypes,
        Section::UnexportedFuncs,
        Section::Uncategorized,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Section::Imports => "imports",
            Section::Main => "main",
            Section::Init => "init",
            Section::ExportedConsts => "exported_consts",
            Section::ExportedEnums => "exported_enums",
            Section::ExportedVars => "exported_vars",
            Section::ExportedTypes => "exported_types",
            Section::ExportedFuncs => "exported_funcs",
            Section::UnexportedConsts => "unexported_consts",
            Section::UnexportedEnums => "unexported_enums",
            Section::UnexportedVars => "unexported_vars",
            Section::UnexportedTypes => "unexported_types",
            Section::UnexportedFuncs => "unexported_funcs",
            Section::Uncategorized => "uncategorized",
        }
    }

    /// 1-based position in the default order
    pub fn default_position(self) -> usize {
        Self::ALL
            .iter()
            .position(|s| *s == self)
            .map_or(Self::ALL.len(), |idx| idx + 1)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownSection(s.to_string()))
    }
}

/// Element of a type group layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeElement {
    Typedef,
    Constructors,
    ExportedMethods,
    UnexportedMethods,
}

impl TypeElement {
    pub const ALL: [TypeElement; 4] = [
        TypeElement::Typedef,
        TypeElement::Constructors,
        TypeElement::ExportedMethods,
        TypeElement::UnexportedMethods,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TypeElement::Typedef => "typedef",
            TypeElement::Constructors => "constructors",
            TypeElement::ExportedMethods => "exported_methods",
            TypeElement::UnexportedMethods => "unexported_methods",
        }
    }
}

impl fmt::Display for TypeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeElement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|element| element.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownLayoutElement {
                layout: "type_layout",
                element: s.to_string(),
            })
    }
}

/// Element of an enum group layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumElement {
    Typedef,
    Iota,
    ExportedMethods,
    UnexportedMethods,
}

impl EnumElement {
    pub const ALL: [EnumElement; 4] = [
        EnumElement::Typedef,
        EnumElement::Iota,
        EnumElement::ExportedMethods,
        EnumElement::UnexportedMethods,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EnumElement::Typedef => "typedef",
            EnumElement::Iota => "iota",
            EnumElement::ExportedMethods => "exported_methods",
            EnumElement::UnexportedMethods => "unexported_methods",
        }
    }
}

impl fmt::Display for EnumElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnumElement {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|element| element.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownLayoutElement {
                layout: "enum_layout",
                element: s.to_string(),
            })
    }
}

/// What to do with declarations whose section is not in the configured order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Fail without producing output
    #[default]
    Strict,
    /// Append them after the configured sections and log a warning
    Warn,
    /// Append them after the configured sections
    Append,
    /// Discard them
    Drop,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Strict, Mode::Warn, Mode::Append, Mode::Drop];

    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Strict => "strict",
            Mode::Warn => "warn",
            Mode::Append => "append",
            Mode::Drop => "drop",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownMode(s.to_string()))
    }
}
