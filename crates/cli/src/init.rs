use anyhow::{bail, Context, Result};
use reorder_engine::CONFIG_FILE_NAME;
use std::fs;
use std::path::Path;

const TEMPLATE: &str = r#"# go-reorder configuration

[sections]
# Order of declaration sections in each file
# Remove sections you don't want, or reorder as needed
order = [
  "imports",
  "main",
  "init",
  "exported_consts",
  "exported_enums",
  "exported_vars",
  "exported_types",
  "exported_funcs",
  "unexported_consts",
  "unexported_enums",
  "unexported_vars",
  "unexported_types",
  "unexported_funcs",
  "uncategorized",
]

[types]
# How to order elements within a type group
type_layout = ["typedef", "constructors", "exported_methods", "unexported_methods"]

# How to order elements within an enum group
enum_layout = ["typedef", "iota", "exported_methods", "unexported_methods"]

[behavior]
# strict: Error if code has no matching section (default)
# warn:   Append unmatched code at end with warning
# append: Silently append unmatched code at end
# drop:   Discard unmatched code (dangerous!)
mode = "strict"
"#;

/// Write the documented default config into `dir`, refusing to overwrite
pub(crate) fn write_default_config(dir: &Path) -> Result<()> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("{CONFIG_FILE_NAME} already exists");
    }
    fs::write(&path, TEMPLATE).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
