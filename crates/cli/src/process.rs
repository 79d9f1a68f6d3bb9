use crate::flags::OutputMode;
use anyhow::{Context, Result};
use reorder_engine::{analyze_section_order, reorder_source_with_config, Config};
use similar::TextDiff;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

const DIFF_CONTEXT: usize = 3;

/// Reorder one file and emit the result according to `output`.
///
/// Returns whether the reordered source differs from what is on disk.
pub(crate) fn process_file(
    path: &Path,
    config: &Config,
    output: OutputMode,
    out: &mut impl Write,
) -> Result<bool> {
    let original =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    if log::log_enabled!(log::Level::Debug) {
        log_section_order(path, &original);
    }

    let reordered = reorder_source_with_config(&original, config)?;
    let changed = reordered.source != original;

    match output {
        OutputMode::Check => {}
        OutputMode::Diff => {
            if changed {
                let name = path.display().to_string();
                write!(out, "{}", unified_diff(&name, &original, &reordered.source))?;
            }
        }
        OutputMode::Write => {
            eprintln!("{}", path.display());
            if changed {
                fs::write(path, &reordered.source)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        OutputMode::Stdout => write!(out, "{}", reordered.source)?,
    }

    Ok(changed)
}

/// Reorder stdin to `out`; output flags do not apply here
pub(crate) fn process_stdin(config: &Config, input: &mut impl Read, out: &mut impl Write) -> Result<()> {
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .context("Failed to read stdin")?;
    let reordered = reorder_source_with_config(&source, config)?;
    write!(out, "{}", reordered.source)?;
    Ok(())
}

pub(crate) fn unified_diff(name: &str, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(DIFF_CONTEXT)
        .header(name, name)
        .to_string()
}

fn log_section_order(path: &Path, source: &str) {
    let Ok(order) = analyze_section_order(source) else {
        return;
    };
    let sections: Vec<String> = order
        .sections
        .iter()
        .map(|s| format!("{}@{}", s.section, s.position))
        .collect();
    log::debug!(
        "{}: {} ({})",
        path.display(),
        sections.join(", "),
        if order.is_canonical() { "in order" } else { "out of order" }
    );
}
