//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Expense,
    /// The monthly budget scalar
    Budget,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Expense => write!(f, "Expense"),
            EntityType::Budget => write!(f, "Budget"),
        }
    }
}

/// A single audit log entry
///
/// Records one committed mutation with the entity state before and after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// ID of the affected entity ("exp-7", "monthly")
    pub entity_id: String,

    /// Human-readable description of the entity (e.g. expense name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Entity before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Entity after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly created entity
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Entry for a modified entity
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Entry for a removed entity
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            before: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Delete, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(EntityType::Expense.to_string(), "Expense");
        assert_eq!(EntityType::Budget.to_string(), "Budget");
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            EntityType::Expense,
            "exp-1",
            Some("Lunch".to_string()),
            &json!({"name": "Lunch", "amount": 1250}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_id, "exp-1");
        assert!(entry.before.is_none());
        assert_eq!(entry.after.unwrap()["amount"], 1250);
    }

    #[test]
    fn test_update_entry() {
        let entry = AuditEntry::update(
            EntityType::Budget,
            "monthly",
            None,
            &json!(50000),
            &json!(60000),
            Some("50000 -> 60000".to_string()),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.before, Some(json!(50000)));
        assert_eq!(entry.after, Some(json!(60000)));
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(
            EntityType::Expense,
            "exp-3",
            Some("Taxi".to_string()),
            &json!({"name": "Taxi"}),
        );

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let entry = AuditEntry::create(EntityType::Expense, "exp-9", None, &json!({}));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["operation"], "create");
        assert_eq!(value["entity_type"], "expense");
        assert!(value.get("entity_name").is_none());
        assert!(value.get("before").is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let mut entry = AuditEntry::create(
            EntityType::Expense,
            "exp-12",
            Some("Groceries".to_string()),
            &json!({"name": "Groceries"}),
        );
        entry.diff_summary = Some("amount: 100 -> 200".into());

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE Expense exp-12 (Groceries)"));
        assert!(formatted.contains("Changes: amount: 100 -> 200"));
    }
}
