//! The unit of generation: one artifact's identity plus its ordered text
//! lines. Items are appended to during synthesis, finalized exactly once
//! (the custom-region merge happens there), then written to disk. An item
//! lives for one pass.

use std::path::{Path, PathBuf};

use crate::settings::{ItemKind, UnitKind};

/// One generated artifact being assembled.
#[derive(Debug, Clone)]
pub struct GeneratedItem {
    pub unit: UnitKind,
    pub item: ItemKind,
    /// Fully qualified logical name (`App.Logic.Models.Sales.Customer`).
    pub logical_name: String,
    /// File path relative to the layer's project root.
    pub relative_path: PathBuf,
    /// File extension without the leading dot.
    pub extension: String,
    lines: Vec<String>,
    finalized: bool,
}

impl GeneratedItem {
    pub fn new(
        unit: UnitKind,
        item: ItemKind,
        logical_name: impl Into<String>,
        relative_path: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        GeneratedItem {
            unit,
            item,
            logical_name: logical_name.into(),
            relative_path: relative_path.into(),
            extension: extension.into(),
            lines: Vec::new(),
            finalized: false,
        }
    }

    /// Append one line.
    pub fn push(&mut self, line: impl Into<String>) {
        debug_assert!(!self.finalized, "append after finalize");
        self.lines.push(line.into());
    }

    /// Append a block of lines in order.
    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        debug_assert!(!self.finalized, "append after finalize");
        self.lines.extend(lines);
    }

    /// Append an empty separator line.
    pub fn blank(&mut self) {
        self.push("");
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Replace the line sequence with its merged form and seal the item.
    /// Called exactly once per pass, by the emission step.
    pub fn finalize(&mut self, merged: Vec<String>) {
        debug_assert!(!self.finalized, "finalize called twice");
        self.lines = merged;
        self.finalized = true;
    }

    /// Rendered file content: lines joined with `\n`, trailing newline.
    pub fn content(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Target path under the given layer project root.
    pub fn target_path(&self, layer_root: &Path) -> PathBuf {
        layer_root.join(&self.relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_joins_lines_with_trailing_newline() {
        let mut item = GeneratedItem::new(
            UnitKind::Logic,
            ItemKind::Model,
            "App.Logic.Models.Customer",
            "Models/Customer.cs",
            "cs",
        );
        item.push("namespace App.Logic.Models");
        item.push("{");
        item.blank();
        item.push("}");
        assert_eq!(item.content(), "namespace App.Logic.Models\n{\n\n}\n");
    }

    #[test]
    fn finalize_replaces_lines() {
        let mut item = GeneratedItem::new(
            UnitKind::Api,
            ItemKind::Controller,
            "App.Api.OrdersController",
            "Controllers/OrdersController.cs",
            "cs",
        );
        item.push("original");
        item.finalize(vec!["merged".to_string()]);
        assert!(item.is_finalized());
        assert_eq!(item.lines(), ["merged"]);
    }
}
