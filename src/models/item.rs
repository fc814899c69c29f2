use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A single collectible record as stored and returned by the API.
///
/// Optional fields that were never set stay absent from the JSON output, and
/// `value` keeps the exact numeric form it was submitted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Item {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            year: None,
            condition: None,
            location: None,
            group: None,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Number>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Build from an already validated JSON body
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Partial update body. Only the fields present are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ItemPatch {
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Name the record will carry once the patch is applied
    pub fn target_name<'a>(&'a self, current: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(current)
    }

    pub fn apply(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(value) = &self.value {
            item.value = Some(value.clone());
        }
        if let Some(year) = &self.year {
            item.year = Some(year.clone());
        }
        if let Some(condition) = &self.condition {
            item.condition = Some(condition.clone());
        }
        if let Some(location) = &self.location {
            item.location = Some(location.clone());
        }
        if let Some(group) = &self.group {
            item.group = Some(group.clone());
        }
    }
}

/// One row of the count-by-group aggregation. Records without a group are
/// reported under `group: null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub group: Option<String>,
    pub count: i64,
}
