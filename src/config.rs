// Tab bar configuration loaded from host key/value form data

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::colour::ColourConfig;
use crate::error::{Error, Result};
use crate::label::LabelGenerator;

pub const KEY_PATTERN_ACTIVE: &str = "patternActiveTab";
pub const KEY_PATTERN_INACTIVE: &str = "patternInactiveTab";
pub const KEY_CONDITION_ACTIVE: &str = "conditionActiveTab";
pub const KEY_CONDITION_INACTIVE: &str = "conditionInactiveTab";
pub const KEY_SHORT_NAME_LENGTH: &str = "shortNameLength";
pub const KEY_NAME_REGEX_MATCH: &str = "nameRegexMatch";
pub const KEY_NAME_REGEX_REPLACEMENT: &str = "nameRegexReplacement";

const DEFAULT_PATTERN: &str = "$N1";
const DEFAULT_SHORT_NAME_LENGTH: usize = 3;
// First letter of each word, whitespace dropped: "display name" -> "dn"
const DEFAULT_NAME_REGEX_MATCH: &str = r"(\w)\w*|\s";
const DEFAULT_NAME_REGEX_REPLACEMENT: &str = "$1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub pattern_active_tab: String,
    pub pattern_inactive_tab: String,
    /// Only apply the active pattern when some job needs attention.
    pub condition_active_tab: bool,
    pub condition_inactive_tab: bool,
    pub short_name_length: usize,
    pub name_regex_match: String,
    pub name_regex_replacement: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            pattern_active_tab: DEFAULT_PATTERN.to_string(),
            pattern_inactive_tab: DEFAULT_PATTERN.to_string(),
            condition_active_tab: false,
            condition_inactive_tab: false,
            short_name_length: DEFAULT_SHORT_NAME_LENGTH,
            name_regex_match: DEFAULT_NAME_REGEX_MATCH.to_string(),
            name_regex_replacement: DEFAULT_NAME_REGEX_REPLACEMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabBarConfig {
    pub template: TemplateConfig,
    pub colours: ColourConfig,
}

impl TabBarConfig {
    /// Load from form data, starting from defaults.
    pub fn from_btreemap(config: &BTreeMap<String, String>) -> Result<Self> {
        Self::default().merge_btreemap(config)
    }

    /// Load from a JSON form object. Scalars are taken as their string form; nulls are skipped.
    pub fn from_form(form: &Value) -> Result<Self> {
        Self::from_btreemap(&form_to_btreemap(form)?)
    }

    /// A copy of this configuration with the given keys applied. Keys that are
    /// absent keep their current value. Nothing is applied if any value is invalid.
    pub fn merge_btreemap(&self, config: &BTreeMap<String, String>) -> Result<Self> {
        let mut merged = self.clone();
        let template = &mut merged.template;

        if let Some(pattern) = config.get(KEY_PATTERN_ACTIVE) {
            template.pattern_active_tab = pattern.clone();
        }
        if let Some(pattern) = config.get(KEY_PATTERN_INACTIVE) {
            template.pattern_inactive_tab = pattern.clone();
        }
        if let Some(value) = config.get(KEY_CONDITION_ACTIVE) {
            template.condition_active_tab = parse_bool(KEY_CONDITION_ACTIVE, value)?;
        }
        if let Some(value) = config.get(KEY_CONDITION_INACTIVE) {
            template.condition_inactive_tab = parse_bool(KEY_CONDITION_INACTIVE, value)?;
        }
        if let Some(value) = config.get(KEY_SHORT_NAME_LENGTH) {
            template.short_name_length = parse_short_name_length(value)?;
        }
        if let Some(regex) = config.get(KEY_NAME_REGEX_MATCH) {
            template.name_regex_match = regex.clone();
        }
        if let Some(replacement) = config.get(KEY_NAME_REGEX_REPLACEMENT) {
            template.name_regex_replacement = replacement.clone();
        }

        // Reject a bad regex now rather than on every render
        LabelGenerator::from_config(template)?;

        merged.colours.configure(config);
        Ok(merged)
    }

    pub fn merge_form(&self, form: &Value) -> Result<Self> {
        self.merge_btreemap(&form_to_btreemap(form)?)
    }

    pub fn to_btreemap(&self) -> BTreeMap<String, String> {
        let t = &self.template;
        let mut map = BTreeMap::new();
        map.insert(KEY_PATTERN_ACTIVE.to_string(), t.pattern_active_tab.clone());
        map.insert(KEY_PATTERN_INACTIVE.to_string(), t.pattern_inactive_tab.clone());
        map.insert(KEY_CONDITION_ACTIVE.to_string(), t.condition_active_tab.to_string());
        map.insert(KEY_CONDITION_INACTIVE.to_string(), t.condition_inactive_tab.to_string());
        map.insert(KEY_SHORT_NAME_LENGTH.to_string(), t.short_name_length.to_string());
        map.insert(KEY_NAME_REGEX_MATCH.to_string(), t.name_regex_match.clone());
        map.insert(KEY_NAME_REGEX_REPLACEMENT.to_string(), t.name_regex_replacement.clone());
        self.colours.to_btreemap(&mut map);
        map
    }
}

fn form_to_btreemap(form: &Value) -> Result<BTreeMap<String, String>> {
    let object = form
        .as_object()
        .ok_or_else(|| Error::InvalidForm(form.to_string()))?;

    let mut map = BTreeMap::new();
    for (key, value) in object {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Number(n) => number_to_string(n),
            other => other.to_string(),
        };
        map.insert(key.clone(), value);
    }
    Ok(map)
}

// Whole-valued floats such as 4.0 read as integers
fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        _ => n.to_string(),
    }
}

// Checkboxes post "on" when ticked
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" => Ok(true),
        "false" | "" => Ok(false),
        _ => {
            log::warn!("rejecting {}={:?}", key, value);
            Err(Error::InvalidBoolean {
                key: key.to_string(),
                value: value.to_string(),
            })
        }
    }
}

fn parse_short_name_length(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(len) if len > 0 => Ok(len),
        _ => {
            log::warn!("rejecting {}={:?}", KEY_SHORT_NAME_LENGTH, value);
            Err(Error::InvalidShortNameLength(value.to_string()))
        }
    }
}
