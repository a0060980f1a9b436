use crate::model::{generate_id, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A physical location ("object") that can be inspected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Id,
    pub name: String,
    pub street: String,
    pub number: String,
    pub city: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    /// Derived count of referencing inspections, populated on list reads only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection_count: Option<i64>,
}

/// Input model for creating a new property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub name: String,
    pub street: String,
    pub number: String,
    pub city: String,
    pub postal_code: String,
}

impl NewProperty {
    /// Convert to a full Property with server-generated fields
    pub fn into_property(self) -> Property {
        Property {
            id: generate_id(),
            name: self.name,
            street: self.street,
            number: self.number,
            city: self.city,
            postal_code: self.postal_code,
            created_at: Utc::now(),
            inspection_count: None,
        }
    }
}

/// Update payload; overwrites all five address fields of the row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProperty {
    pub id: Id,
    pub name: String,
    pub street: String,
    pub number: String,
    pub city: String,
    pub postal_code: String,
}
