use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Urgency ranking for a to-do item. Backed by its integer rank so values
/// compare by urgency and travel on the wire as plain `1..=3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = ModelError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(ModelError::Validation(format!(
                "priority must be 1, 2 or 3, got {}",
                other
            ))),
        }
    }
}

/// A stored to-do record. `todo_id` is assigned by the store and never
/// changes afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub todo_id: i64,
    pub name: String,
    pub description: String,
    pub priority: Priority,
}

/// Input model for creating a record; the id is assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TodoCreate {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Patch model for partial updates. A field left out of the request body
/// (or sent as null) keeps its stored value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    let len = name.chars().count();
    if !(3..=100).contains(&len) {
        return Err(ModelError::Validation(
            "name must be between 3 and 100 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ModelError> {
    let len = description.chars().count();
    if !(5..=512).contains(&len) {
        return Err(ModelError::Validation(
            "description must be between 5 and 512 characters".into(),
        ));
    }
    Ok(())
}

impl TodoCreate {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_description(&self.description)?;
        Ok(())
    }
}

impl TodoUpdate {
    /// Validate only the fields present in the patch.
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}
