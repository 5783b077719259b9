//! # Custom Code Merge
//!
//! Regeneration is a non-destructive merge. Generated files carry two
//! delimited regions - custom imports and custom code - whose contents are
//! hand-authored. Before an item is written, the regions are extracted
//! from the current on-disk file and re-spliced into the freshly
//! synthesized line sequence, so a regenerate never loses an edit.
//!
//! When a target file about to be replaced carries no markers at all
//! (incompatible prior content, e.g. after an artifact rename), it is
//! copied once to a sibling backup file with a reserved suffix; later
//! extractions fall back to that backup, so edits survive even across
//! renames.
//!
//! Merging twice with no intervening edits is byte-identical: extraction
//! returns the non-blank lines strictly between the first marker pair,
//! and injection writes exactly marker, lines, marker.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Sentinel marker lines, embedded as literal comments in generated files.
pub const CUSTOM_IMPORTS_BEGIN: &str = "// <custom-imports>";
pub const CUSTOM_IMPORTS_END: &str = "// </custom-imports>";
pub const CUSTOM_CODE_BEGIN: &str = "// <custom-code>";
pub const CUSTOM_CODE_END: &str = "// </custom-code>";

/// Reserved suffix of the sibling backup file.
pub const BACKUP_SUFFIX: &str = "custom.bak";

/// The two custom-region kinds a generated file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Hand-added imports; anchored before the first synthesized import.
    Imports,
    /// Hand-added code; anchored before the final closing brace.
    Code,
}

impl RegionKind {
    pub fn begin_marker(&self) -> &'static str {
        match self {
            RegionKind::Imports => CUSTOM_IMPORTS_BEGIN,
            RegionKind::Code => CUSTOM_CODE_BEGIN,
        }
    }

    pub fn end_marker(&self) -> &'static str {
        match self {
            RegionKind::Imports => CUSTOM_IMPORTS_END,
            RegionKind::Code => CUSTOM_CODE_END,
        }
    }
}

/// A captured region: markers plus the preserved lines between them.
/// Lives only between extraction and re-injection.
#[derive(Debug, Clone)]
pub struct CustomRegion {
    pub kind: RegionKind,
    pub lines: Vec<String>,
}

impl CustomRegion {
    pub fn empty(kind: RegionKind) -> Self {
        CustomRegion { kind, lines: Vec::new() }
    }
}

/// Sibling backup path: `Customer.cs` → `Customer.cs.custom.bak`.
pub fn backup_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push('.');
    name.push_str(BACKUP_SUFFIX);
    target.with_file_name(name)
}

/// Whether content carries any custom marker line.
pub fn has_custom_markers(content: &str) -> bool {
    content.lines().any(|line| {
        let t = line.trim();
        t == CUSTOM_IMPORTS_BEGIN || t == CUSTOM_CODE_BEGIN
    })
}

/// Non-blank lines strictly between the first marker pair of `kind`, or
/// `None` when the content has no such pair.
fn extract_from_content(content: &str, kind: RegionKind) -> Option<Vec<String>> {
    let mut inside = false;
    let mut lines = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if !inside {
            if trimmed == kind.begin_marker() {
                inside = true;
            }
        } else {
            if trimmed == kind.end_marker() {
                return Some(lines);
            }
            if !trimmed.is_empty() {
                lines.push(line.to_string());
            }
        }
    }
    None
}

/// Extract one region kind for a target file.
///
/// The current on-disk file is consulted first; when it is missing or
/// carries no marker pair, the sibling backup is consulted instead. No
/// prior content yields an empty region, never an error. Filesystem
/// faults other than absence propagate.
pub fn extract_custom_region(target: &Path, kind: RegionKind) -> anyhow::Result<CustomRegion> {
    for candidate in [target.to_path_buf(), backup_path(target)] {
        match std::fs::read_to_string(&candidate) {
            Ok(content) => {
                if let Some(lines) = extract_from_content(&content, kind) {
                    return Ok(CustomRegion { kind, lines });
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read custom regions from {}", candidate.display())
                })
            }
        }
    }
    Ok(CustomRegion::empty(kind))
}

/// Write the one-time backup when a marker-less target is about to be
/// destructively replaced. Returns whether a backup was written. An
/// already-present backup is never overwritten.
pub fn backup_before_replace(target: &Path) -> anyhow::Result<bool> {
    let content = match std::fs::read_to_string(target) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read {} for backup", target.display()))
        }
    };
    if has_custom_markers(&content) {
        return Ok(false);
    }
    let backup = backup_path(target);
    if backup.exists() {
        return Ok(false);
    }
    std::fs::write(&backup, content)
        .with_context(|| format!("failed to write backup {}", backup.display()))?;
    Ok(true)
}

fn is_import_line(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("using ") || t.starts_with("import ")
}

/// Index the region's marker block is inserted at.
fn anchor_index(lines: &[String], kind: RegionKind) -> usize {
    match kind {
        RegionKind::Imports => lines
            .iter()
            .position(|l| is_import_line(l))
            .unwrap_or(0),
        RegionKind::Code => lines
            .iter()
            .rposition(|l| l.trim() == "}")
            .unwrap_or(lines.len()),
    }
}

/// Insert begin marker, preserved lines, end marker at the region's fixed
/// anchor. A sequence already carrying the marker is left untouched -
/// markers are never duplicated.
pub fn inject_region(mut lines: Vec<String>, region: &CustomRegion) -> Vec<String> {
    if lines.iter().any(|l| l.trim() == region.kind.begin_marker()) {
        return lines;
    }
    let at = anchor_index(&lines, region.kind);
    let mut block = Vec::with_capacity(region.lines.len() + 2);
    block.push(region.kind.begin_marker().to_string());
    block.extend(region.lines.iter().cloned());
    block.push(region.kind.end_marker().to_string());
    lines.splice(at..at, block);
    lines
}

/// Region kinds an artifact carries, by file extension. Markup partials
/// carry none - a `//` sentinel line would render as page text - and are
/// regenerated wholesale.
pub fn region_kinds_for(extension: &str) -> &'static [RegionKind] {
    match extension {
        "cshtml" | "html" => &[],
        _ => &[RegionKind::Imports, RegionKind::Code],
    }
}

/// Full merge step for one item: extract the carried regions for the
/// target and splice them into the fresh synthesis.
pub fn merge_with_existing(
    fresh: Vec<String>,
    target: &Path,
    kinds: &[RegionKind],
) -> anyhow::Result<Vec<String>> {
    // Code first: its end-of-file anchor is stable under the later
    // imports insertion near the top.
    let mut merged = fresh;
    if kinds.contains(&RegionKind::Code) {
        let code = extract_custom_region(target, RegionKind::Code)?;
        merged = inject_region(merged, &code);
    }
    if kinds.contains(&RegionKind::Imports) {
        let imports = extract_custom_region(target, RegionKind::Imports)?;
        merged = inject_region(merged, &imports);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("merge_{tag}_{}_{nanos}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fresh_file() -> Vec<String> {
        vec![
            "using System;".to_string(),
            "using System.Collections.Generic;".to_string(),
            "".to_string(),
            "namespace App.Logic.Models".to_string(),
            "{".to_string(),
            "    public partial class Customer".to_string(),
            "    {".to_string(),
            "    }".to_string(),
            "}".to_string(),
        ]
    }

    #[test]
    fn test_inject_empty_regions() {
        let merged = inject_region(fresh_file(), &CustomRegion::empty(RegionKind::Imports));
        assert_eq!(merged[0], CUSTOM_IMPORTS_BEGIN);
        assert_eq!(merged[1], CUSTOM_IMPORTS_END);
        assert_eq!(merged[2], "using System;");

        let merged = inject_region(fresh_file(), &CustomRegion::empty(RegionKind::Code));
        let closing = merged.iter().rposition(|l| l.trim() == "}").unwrap();
        assert_eq!(merged[closing - 2], CUSTOM_CODE_BEGIN);
        assert_eq!(merged[closing - 1], CUSTOM_CODE_END);
    }

    #[test]
    fn test_inject_never_duplicates_markers() {
        let once = inject_region(fresh_file(), &CustomRegion::empty(RegionKind::Code));
        let twice = inject_region(once.clone(), &CustomRegion::empty(RegionKind::Code));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_extract_strictly_between_first_pair() {
        let content = format!(
            "head\n{CUSTOM_CODE_BEGIN}\n\nint x;\n{CUSTOM_CODE_END}\n{CUSTOM_CODE_BEGIN}\nignored\n{CUSTOM_CODE_END}\n"
        );
        let lines = extract_from_content(&content, RegionKind::Code).unwrap();
        assert_eq!(lines, vec!["int x;"]);
        assert!(extract_from_content("no markers", RegionKind::Code).is_none());
    }

    #[test]
    fn test_merge_round_trip_is_idempotent() {
        let dir = temp_dir("idem");
        let target = dir.join("Customer.cs");

        // First generation: empty regions.
        let first =
            merge_with_existing(fresh_file(), &target, region_kinds_for("cs")).unwrap();
        fs::write(&target, first.join("\n")).unwrap();

        // Hand edit inside the code region.
        let edited = fs::read_to_string(&target).unwrap().replace(
            &format!("{CUSTOM_CODE_BEGIN}\n{CUSTOM_CODE_END}"),
            &format!("{CUSTOM_CODE_BEGIN}\n        public int Custom;\n{CUSTOM_CODE_END}"),
        );
        fs::write(&target, &edited).unwrap();

        // Regenerate twice; the edit survives verbatim, exactly once.
        let second =
            merge_with_existing(fresh_file(), &target, region_kinds_for("cs")).unwrap();
        fs::write(&target, second.join("\n")).unwrap();
        let third =
            merge_with_existing(fresh_file(), &target, region_kinds_for("cs")).unwrap();
        assert_eq!(second, third);
        assert_eq!(
            second.iter().filter(|l| l.contains("public int Custom;")).count(),
            1
        );
        let pos = second.iter().position(|l| l.contains("public int Custom;")).unwrap();
        assert_eq!(second[pos - 1].trim(), CUSTOM_CODE_BEGIN);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_backup_fallback_across_rename() {
        let dir = temp_dir("bak");
        let target = dir.join("Customer.cs");

        // Prior incompatible content without markers gets backed up once.
        fs::write(&target, "using Old;\nclass Customer { int Kept; }\n").unwrap();
        assert!(backup_before_replace(&target).unwrap());
        assert!(!backup_before_replace(&target).unwrap());
        assert!(backup_path(&target).exists());

        // A marker-bearing backup is consulted when the target has none.
        fs::write(
            backup_path(&target),
            format!("{CUSTOM_CODE_BEGIN}\nint preserved;\n{CUSTOM_CODE_END}\n"),
        )
        .unwrap();
        fs::write(&target, "no markers here\n").unwrap();
        let region = extract_custom_region(&target, RegionKind::Code).unwrap();
        assert_eq!(region.lines, vec!["int preserved;"]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_marker_bearing_target_is_not_backed_up() {
        let dir = temp_dir("nobak");
        let target = dir.join("Customer.cs");
        fs::write(&target, format!("{CUSTOM_CODE_BEGIN}\n{CUSTOM_CODE_END}\n")).unwrap();
        assert!(!backup_before_replace(&target).unwrap());
        assert!(!backup_path(&target).exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_target_yields_empty_region() {
        let dir = temp_dir("none");
        let region =
            extract_custom_region(&dir.join("Ghost.cs"), RegionKind::Imports).unwrap();
        assert!(region.lines.is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_imports_anchor_without_imports_is_top() {
        let lines = vec!["namespace X".to_string(), "{".to_string(), "}".to_string()];
        let merged = inject_region(lines, &CustomRegion::empty(RegionKind::Imports));
        assert_eq!(merged[0], CUSTOM_IMPORTS_BEGIN);
    }
}
