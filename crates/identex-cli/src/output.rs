use std::io::Write;
use std::path::Path;

use anyhow::Context;
use identex_core::{Dataset, Entry, ExtractionResult, ExtractionStats, SectionKey};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Write the dataset as pretty-printed JSON, creating parent directories.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = dataset.to_json_pretty()?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Print the run summary after the dataset was written.
pub fn print_summary(
    w: &mut dyn Write,
    stats: &ExtractionStats,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(
        w,
        "Extracted {} entries from {} pages",
        stats.toc_entries, stats.total_pages
    )?;

    let anomalies = [
        (stats.entries_without_headings, "without any known heading"),
        (stats.repeated_headings, "repeated headings"),
        (stats.inverted_ranges, "inverted page ranges"),
    ];
    for (count, label) in anomalies {
        if count == 0 {
            continue;
        }
        let line = format!("  {} {}", count, label);
        if color.enabled() {
            writeln!(w, "{}", line.yellow())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}

/// Print every extracted entry without writing anything to disk.
pub fn print_dry_run(
    w: &mut dyn Write,
    file_name: &str,
    result: &ExtractionResult,
    color: ColorMode,
) -> std::io::Result<()> {
    let entries = &result.dataset.false_identities;
    if color.enabled() {
        writeln!(
            w,
            "{} {} ({} entries)\n",
            "DRY RUN:".bold().cyan(),
            file_name.bold(),
            entries.len()
        )?;
    } else {
        writeln!(w, "DRY RUN: {} ({} entries)\n", file_name, entries.len())?;
    }

    for (i, entry) in entries.iter().enumerate() {
        print_entry(w, i, entry, color)?;
    }

    writeln!(w, "Total: {} entries", entries.len())?;
    Ok(())
}

fn print_entry(w: &mut dyn Write, index: usize, entry: &Entry, color: ColorMode) -> std::io::Result<()> {
    let header = format!("[{}] {}", index + 1, entry.title);
    if color.enabled() {
        writeln!(w, "{}", header.bold().yellow())?;
    } else {
        writeln!(w, "{}", header)?;
    }

    writeln!(
        w,
        "  Pages:   {}-{}",
        entry.sources.pdf_page_start, entry.sources.pdf_page_end
    )?;
    writeln!(
        w,
        "  a.k.a.:  {}",
        if entry.aka.is_empty() {
            "(none)".to_string()
        } else {
            entry.aka.join("; ")
        }
    )?;

    for key in SectionKey::ALL {
        let Some(items) = entry.sections.get(key) else {
            continue;
        };
        if items.is_empty() {
            continue;
        }
        writeln!(w, "  {:<26}{} items", format!("{}:", key), items.len())?;
    }

    if entry.true_identity.is_empty() {
        if color.enabled() {
            writeln!(w, "  {}", "MISSING trueIdentity".red())?;
        } else {
            writeln!(w, "  MISSING trueIdentity")?;
        }
    } else {
        writeln!(w, "  {:<26}{}", "trueIdentity:", entry.true_identity)?;
    }

    if entry.sections.is_empty() {
        if color.enabled() {
            writeln!(w, "  {}", "NO SECTIONS FOUND".red())?;
        } else {
            writeln!(w, "  NO SECTIONS FOUND")?;
        }
    }

    writeln!(w)?;
    Ok(())
}
