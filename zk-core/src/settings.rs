// SPDX-License-Identifier: AGPL-3.0-or-later
//! Per-user card generator settings
//!
//! The blob is stored as the client sent it: fields may be absent, unknown
//! fields are kept, and object keys keep their order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ZkError, ZkResult};

/// Property key the settings blob is stored under
pub const SETTINGS_KEY: &str = "zettelkasten_settings";

/// A card category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub subcategories: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    fn new(name: &str, color: &str, subcategories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
            extra: Map::new(),
        }
    }
}

/// Settings blob, saved and loaded as a whole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards_per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_instructions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
    /// Category objects by key, in the order the client gave them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Map<String, Value>>,
    /// Fields this version does not know about, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    pub fn from_value(value: Value) -> ZkResult<Self> {
        if !value.is_object() {
            return Err(ZkError::InvalidInput("settings must be a JSON object".into()));
        }
        let settings: Settings = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> ZkResult<()> {
        if self.cards_per_page == Some(0) {
            return Err(ZkError::InvalidInput("cardsPerPage must be at least 1".into()));
        }
        if let Some((key, _)) = self.categories.iter().flatten().find(|(_, v)| !v.is_object()) {
            return Err(ZkError::InvalidInput(format!("category {} must be an object", key)));
        }
        Ok(())
    }

    /// Number of categories, zero when the field is absent
    pub fn category_count(&self) -> usize {
        self.categories.as_ref().map_or(0, Map::len)
    }

    /// Typed view of one category
    pub fn category(&self, key: &str) -> ZkResult<Option<Category>> {
        match self.categories.as_ref().and_then(|c| c.get(key)) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }
}

/// Settings a user gets before saving any
impl Default for Settings {
    fn default() -> Self {
        let categories = [
            ("tech", Category::new("Технические", "#e3f2fd", &["Frontend", "Backend", "Arch", "DevOps"])),
            ("biz", Category::new("Бизнес/Gambling", "#fff3e0", &["Mexico", "Product", "UX", "Analytics"])),
            ("art", Category::new("Искусство", "#f3e5f5", &["Живопись", "Теория", "История"])),
            ("lit", Category::new("Литература", "#e8f5e9", &["Классика", "Современ", "Теория"])),
            ("personal", Category::new("Личное", "#fce4ec", &["Идея", "Синтез", "Проект"])),
        ]
        .into_iter()
        .map(|(key, category)| (key.to_string(), category_value(category)))
        .collect();

        Self {
            default_category: Some("tech".to_string()),
            cards_per_page: Some(8),
            show_instructions: Some(true),
            auto_save: Some(false),
            categories: Some(categories),
            extra: Map::new(),
        }
    }
}

fn category_value(category: Category) -> Value {
    let mut object = Map::new();
    object.insert("name".into(), Value::String(category.name));
    object.insert("color".into(), Value::String(category.color));
    object.insert(
        "subcategories".into(),
        Value::Array(category.subcategories.into_iter().map(Value::String).collect()),
    );
    object.extend(category.extra);
    Value::Object(object)
}
