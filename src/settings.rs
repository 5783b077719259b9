//! # Settings Store
//!
//! A flat override table controlling what gets generated. The table is a
//! semicolon-delimited file with a header row and the columns
//! `unit;item;itemName;setting;value`, loaded once from the fixed file
//! name `layerforge.settings` at the solution root.
//!
//! Resolution is deliberately loose: a row matches when its unit and item
//! kinds match exactly, the queried item name **ends with** the row's
//! stored fragment, and the setting name matches case-insensitively. The
//! first matching row in table order wins; no match falls back to the
//! caller's default. Suffix containment lets one row such as
//! `Logic;Property;Filter.Name;Generate;False` switch off the `Name`
//! member of every `*Filter` type in one line - and, by the same token,
//! of any unrelated type whose name happens to share the suffix.
//!
//! A missing settings file is not an error; every query then simply
//! returns its default.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

/// Fixed file name of the override table at the solution root.
pub const SETTINGS_FILE_NAME: &str = "layerforge.settings";

/// Generation target addressed by a settings row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Data-access layer.
    Logic,
    /// Web API layer.
    Api,
    /// Server-rendered site layer.
    Site,
    /// First single-page-app client flavor.
    ClientApp,
    /// Second single-page-app client flavor.
    ClientScript,
    /// Desktop/mobile presentation layer.
    Facade,
}

impl UnitKind {
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Logic,
        UnitKind::Api,
        UnitKind::Site,
        UnitKind::ClientApp,
        UnitKind::ClientScript,
        UnitKind::Facade,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Logic => "Logic",
            UnitKind::Api => "Api",
            UnitKind::Site => "Site",
            UnitKind::ClientApp => "ClientApp",
            UnitKind::ClientScript => "ClientScript",
            UnitKind::Facade => "Facade",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::ALL
            .iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown unit kind: {s:?}"))
    }
}

/// Kind of item a settings row (or a generated artifact) addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A whole type within a unit.
    Type,
    /// A model artifact.
    Model,
    /// A property of a model artifact.
    ModelProperty,
    /// A property irrespective of which artifact carries it.
    Property,
    /// An edit-model artifact.
    EditModel,
    /// A repository-style access artifact.
    Access,
    /// A controller artifact.
    Controller,
    /// An HTTP service client artifact.
    Service,
    /// A contract artifact.
    Contract,
    /// A mirrored enumeration artifact.
    Enum,
    /// A view partial artifact.
    View,
    /// A delegate-wrapping facade artifact.
    Facade,
    /// A dependency-registration artifact, one per layer.
    Registration,
}

impl ItemKind {
    pub const ALL: [ItemKind; 13] = [
        ItemKind::Type,
        ItemKind::Model,
        ItemKind::ModelProperty,
        ItemKind::Property,
        ItemKind::EditModel,
        ItemKind::Access,
        ItemKind::Controller,
        ItemKind::Service,
        ItemKind::Contract,
        ItemKind::Enum,
        ItemKind::View,
        ItemKind::Facade,
        ItemKind::Registration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Type => "Type",
            ItemKind::Model => "Model",
            ItemKind::ModelProperty => "ModelProperty",
            ItemKind::Property => "Property",
            ItemKind::EditModel => "EditModel",
            ItemKind::Access => "Access",
            ItemKind::Controller => "Controller",
            ItemKind::Service => "Service",
            ItemKind::Contract => "Contract",
            ItemKind::Enum => "Enum",
            ItemKind::View => "View",
            ItemKind::Facade => "Facade",
            ItemKind::Registration => "Registration",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown item kind: {s:?}"))
    }
}

/// One override row of the settings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSetting {
    pub unit: UnitKind,
    pub item: ItemKind,
    /// Stored item-name fragment, matched as a suffix of queried names.
    pub name_suffix: String,
    pub setting: String,
    pub value: String,
}

/// The loaded override table. Rows keep file order; first match wins.
#[derive(Debug, Default)]
pub struct SettingsStore {
    rows: Vec<GenerationSetting>,
}

impl SettingsStore {
    pub fn new(rows: Vec<GenerationSetting>) -> Self {
        SettingsStore { rows }
    }

    /// Load the table from the fixed-name file under `solution_root`.
    ///
    /// An absent file yields an empty table (pure default behavior).
    /// Malformed rows are logged and skipped; the rest of the table still
    /// loads.
    pub fn load(solution_root: &Path) -> Self {
        let path = solution_root.join(SETTINGS_FILE_NAME);
        let Ok(content) = std::fs::read_to_string(&path) else {
            debug!(path = %path.display(), "no settings file; using defaults");
            return SettingsStore::default();
        };
        Self::parse(&content)
    }

    /// Parse table content: header row first, then data rows. Blank lines
    /// and `#`-prefixed lines are skipped.
    pub fn parse(content: &str) -> Self {
        let mut rows = Vec::new();
        let mut data_lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'));
        // Header row carries no data.
        let _ = data_lines.next();
        for (number, line) in data_lines {
            match parse_row(line) {
                Ok(row) => rows.push(row),
                Err(reason) => {
                    warn!(line = number + 1, reason, "skipping malformed settings row");
                }
            }
        }
        SettingsStore::new(rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[GenerationSetting] {
        &self.rows
    }

    /// Find the first row matching the query, if any.
    ///
    /// Match rule: unit and item equal exactly, `item_name` ends with the
    /// row's stored fragment, setting name equal case-insensitively.
    pub fn find(
        &self,
        unit: UnitKind,
        item: ItemKind,
        item_name: &str,
        setting: &str,
    ) -> Option<&GenerationSetting> {
        self.rows.iter().find(|row| {
            row.unit == unit
                && row.item == item
                && item_name.ends_with(&row.name_suffix)
                && row.setting.eq_ignore_ascii_case(setting)
        })
    }

    /// Effective raw value of a setting, or the caller's default.
    pub fn query<'a>(
        &'a self,
        unit: UnitKind,
        item: ItemKind,
        item_name: &str,
        setting: &str,
        default: &'a str,
    ) -> &'a str {
        self.find(unit, item, item_name, setting)
            .map(|row| row.value.as_str())
            .unwrap_or(default)
    }

    /// Typed overload: parse the raw value to `T`, substituting the
    /// default on parse failure. Never errors.
    pub fn query_as<T: FromStr + Copy>(
        &self,
        unit: UnitKind,
        item: ItemKind,
        item_name: &str,
        setting: &str,
        default: T,
    ) -> T {
        match self.find(unit, item, item_name, setting) {
            Some(row) => row.value.parse().unwrap_or_else(|_| {
                warn!(
                    unit = %unit,
                    item = %item,
                    item_name,
                    setting,
                    value = %row.value,
                    "setting value not convertible; using default"
                );
                default
            }),
            None => default,
        }
    }

    /// Boolean overload accepting the spellings the table actually uses
    /// (`True`/`False` in any case, `1`/`0`).
    pub fn query_flag(
        &self,
        unit: UnitKind,
        item: ItemKind,
        item_name: &str,
        setting: &str,
        default: bool,
    ) -> bool {
        match self.find(unit, item, item_name, setting) {
            Some(row) => match parse_flag(&row.value) {
                Some(flag) => flag,
                None => {
                    warn!(
                        unit = %unit,
                        item = %item,
                        item_name,
                        setting,
                        value = %row.value,
                        "setting value is not a flag; using default"
                    );
                    default
                }
            },
            None => default,
        }
    }

    /// `Generate` toggle shorthand; defaults to generating.
    pub fn generates(&self, unit: UnitKind, item: ItemKind, item_name: &str) -> bool {
        self.query_flag(unit, item, item_name, "Generate", true)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("true") || v == "1" {
        Some(true)
    } else if v.eq_ignore_ascii_case("false") || v == "0" {
        Some(false)
    } else {
        None
    }
}

fn parse_row(line: &str) -> Result<GenerationSetting, String> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(format!("expected 5 fields, found {}", fields.len()));
    }
    let unit = fields[0].parse::<UnitKind>()?;
    let item = fields[1].parse::<ItemKind>()?;
    if fields[3].is_empty() {
        return Err("empty setting name".to_string());
    }
    Ok(GenerationSetting {
        unit,
        item,
        name_suffix: fields[2].to_string(),
        setting: fields[3].to_string(),
        value: fields[4].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
unit;item;itemName;setting;value
Logic;Property;Filter.Name;Generate;False
Logic;ModelProperty;Customer.Orders;Generate;False
Api;Controller;Order;PageSize;25
Api;Controller;Order;BadNumber;lots
# comment row
Site;View;;Theme;compact
";

    #[test]
    fn suffix_match_resolution() {
        let store = SettingsStore::parse(TABLE);
        assert!(!store.query_flag(
            UnitKind::Logic,
            ItemKind::Property,
            "CustomerFilter.Name",
            "Generate",
            true
        ));
        // No row matches a different member: caller default.
        assert!(store.query_flag(
            UnitKind::Logic,
            ItemKind::Property,
            "CustomerFilter.Address",
            "Generate",
            true
        ));
    }

    #[test]
    fn first_row_wins_in_table_order() {
        let table = "\
unit;item;itemName;setting;value
Logic;Property;Name;Generate;False
Logic;Property;Customer.Name;Generate;True
";
        let store = SettingsStore::parse(table);
        // Both rows suffix-match "Customer.Name"; the earlier one wins.
        assert!(!store.generates(UnitKind::Logic, ItemKind::Property, "Customer.Name"));
    }

    #[test]
    fn empty_suffix_matches_everything() {
        let store = SettingsStore::parse(TABLE);
        assert_eq!(
            store.query(UnitKind::Site, ItemKind::View, "AnythingAtAll", "Theme", "roomy"),
            "compact"
        );
    }

    #[test]
    fn setting_name_is_case_insensitive() {
        let store = SettingsStore::parse(TABLE);
        assert!(!store.query_flag(
            UnitKind::Logic,
            ItemKind::Property,
            "CustomerFilter.Name",
            "generate",
            true
        ));
    }

    #[test]
    fn typed_query_parses_and_falls_back() {
        let store = SettingsStore::parse(TABLE);
        assert_eq!(
            store.query_as(UnitKind::Api, ItemKind::Controller, "Order", "PageSize", 10usize),
            25
        );
        // Non-convertible value substitutes the default, never errors.
        assert_eq!(
            store.query_as(UnitKind::Api, ItemKind::Controller, "Order", "BadNumber", 10usize),
            10
        );
        // Unmatched query returns the default.
        assert_eq!(
            store.query_as(UnitKind::Api, ItemKind::Controller, "Order", "NoSuch", 7usize),
            7
        );
    }

    #[test]
    fn flag_accepts_table_spellings() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let table = "\
unit;item;itemName;setting;value
Nonsense;Property;X;Generate;False
Logic;Property;X;Generate
Logic;Property;X;;False
Logic;Property;X.Y;Generate;False
";
        let store = SettingsStore::parse(table);
        assert_eq!(store.rows().len(), 1);
        assert_eq!(store.rows()[0].name_suffix, "X.Y");
    }

    #[test]
    fn missing_file_yields_empty_table() {
        let store = SettingsStore::load(std::path::Path::new("/definitely/not/here"));
        assert!(store.is_empty());
        assert!(store.generates(UnitKind::Logic, ItemKind::Model, "Customer"));
    }

    #[test]
    fn kind_round_trip() {
        for unit in UnitKind::ALL {
            assert_eq!(unit.as_str().parse::<UnitKind>().unwrap(), unit);
        }
        for item in ItemKind::ALL {
            assert_eq!(item.as_str().to_lowercase().parse::<ItemKind>().unwrap(), item);
        }
    }
}
