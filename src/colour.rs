// Tab colour settings and selection

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::count::JobStatusCount;

pub const KEY_DEFAULT: &str = "tabColourDefault";
pub const KEY_DISABLED: &str = "tabColourDisabled";
pub const KEY_UNSTABLE: &str = "tabColourUnstable";
pub const KEY_FAILED: &str = "tabColourFailed";
pub const KEY_CUSTOM: [&str; 4] = [
    "tabColourCustom1",
    "tabColourCustom2",
    "tabColourCustom3",
    "tabColourCustom4",
];

/// Choices offered by the colour picker, as (label, value).
/// `CustomN` values are placeholders resolved against the custom slots on save.
const COLOUR_CHOICES: &[(&str, &str)] = &[
    ("None", ""),
    ("Green", "98fb98"),
    ("Blue", "0000ff"),
    ("Grey", "cdc9c9"),
    ("Yellow", "ffff00"),
    ("Red", "ff0000"),
    ("Custom1", "Custom1"),
    ("Custom2", "Custom2"),
    ("Custom3", "Custom3"),
    ("Custom4", "Custom4"),
];

/// The four colour settings a tab can end up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourField {
    Default,
    Disabled,
    Unstable,
    Failed,
}

impl ColourField {
    pub const ALL: [ColourField; 4] = [
        ColourField::Default,
        ColourField::Disabled,
        ColourField::Unstable,
        ColourField::Failed,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Default => KEY_DEFAULT,
            Self::Disabled => KEY_DISABLED,
            Self::Unstable => KEY_UNSTABLE,
            Self::Failed => KEY_FAILED,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "disabled" => Some(Self::Disabled),
            "unstable" => Some(Self::Unstable),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// One entry in the colour picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourOption {
    pub name: &'static str,
    pub value: &'static str,
    pub selected: bool,
}

/// Colour per worst status, plus four user-defined custom slots.
/// Status colours never hold a `CustomN` reference; those are resolved when configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourConfig {
    pub default: String,
    pub disabled: String,
    pub unstable: String,
    pub failed: String,
    pub custom: [String; 4],
}

impl ColourConfig {
    /// Apply colour keys from form data. Custom slots are stored first so the
    /// status colours can refer to the values just submitted.
    pub fn configure(&mut self, form: &BTreeMap<String, String>) {
        for (slot, key) in self.custom.iter_mut().zip(KEY_CUSTOM) {
            if let Some(value) = form.get(key) {
                *slot = value.clone();
            }
        }

        for field in ColourField::ALL {
            if let Some(value) = form.get(field.key()) {
                let resolved = self.resolve_custom(value);
                *self.field_mut(field) = resolved;
            }
        }
    }

    pub fn to_btreemap(&self, map: &mut BTreeMap<String, String>) {
        for field in ColourField::ALL {
            map.insert(field.key().to_string(), self.get(field).to_string());
        }
        for (slot, key) in self.custom.iter().zip(KEY_CUSTOM) {
            map.insert(key.to_string(), slot.clone());
        }
    }

    pub fn get(&self, field: ColourField) -> &str {
        match field {
            ColourField::Default => &self.default,
            ColourField::Disabled => &self.disabled,
            ColourField::Unstable => &self.unstable,
            ColourField::Failed => &self.failed,
        }
    }

    fn field_mut(&mut self, field: ColourField) -> &mut String {
        match field {
            ColourField::Default => &mut self.default,
            ColourField::Disabled => &mut self.disabled,
            ColourField::Unstable => &mut self.unstable,
            ColourField::Failed => &mut self.failed,
        }
    }

    /// Colour for the worst status present: failed, then unstable, then disabled.
    pub fn colour_for(&self, count: &JobStatusCount) -> &str {
        if count.has_failures() {
            &self.failed
        } else if count.has_unstable() {
            &self.unstable
        } else if count.has_disabled() {
            &self.disabled
        } else {
            &self.default
        }
    }

    /// Picker entries for one field, with its current value selected.
    pub fn options_for(&self, field: ColourField) -> Vec<ColourOption> {
        colour_options_for(self.get(field))
    }

    fn resolve_custom(&self, colour: &str) -> String {
        match custom_slot(colour) {
            Some(slot) => self.custom[slot].clone(),
            None => colour.to_string(),
        }
    }
}

/// Index of the slot named by a `CustomN` reference (any case), N in 1..=4.
fn custom_slot(colour: &str) -> Option<usize> {
    let prefix = colour.get(..6)?;
    if !prefix.eq_ignore_ascii_case("custom") {
        return None;
    }
    match colour.get(6..)? {
        "1" => Some(0),
        "2" => Some(1),
        "3" => Some(2),
        "4" => Some(3),
        _ => None,
    }
}

pub fn colour_options_for(selection: &str) -> Vec<ColourOption> {
    COLOUR_CHOICES
        .iter()
        .map(|&(name, value)| ColourOption {
            name,
            value,
            selected: value.eq_ignore_ascii_case(selection),
        })
        .collect()
}
