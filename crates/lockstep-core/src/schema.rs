//! The canonical schema: an ordered set of uniquely named, typed fields.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::enums::TypeCategory;

/// One field declared in the canonical schema block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    /// Normalized type: internal whitespace removed, array suffix appended.
    #[serde(rename = "type")]
    pub ty: String,
    /// 1-based line of the declaration in the schema artifact.
    pub line: usize,
}

impl SchemaField {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            line,
        }
    }

    #[must_use]
    pub fn category(&self) -> TypeCategory {
        TypeCategory::classify(&self.ty)
    }
}

/// Fields in declaration order with a by-name index.
///
/// Iteration order is declaration order so that anything derived from the
/// schema (completeness diagnostics, listings) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<SchemaField>,
    index: HashMap<String, usize>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field unless the name is already declared.
    ///
    /// Returns the earlier declaration on conflict; the schema keeps it.
    pub fn insert(&mut self, field: SchemaField) -> Result<(), &SchemaField> {
        if let Some(&existing) = self.index.get(&field.name) {
            return Err(&self.fields[existing]);
        }
        self.index.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SchemaField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter()
    }

    #[must_use]
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<SchemaField> for Schema {
    /// Collect fields, keeping the first declaration of any repeated name.
    fn from_iter<I: IntoIterator<Item = SchemaField>>(iter: I) -> Self {
        let mut schema = Self::new();
        for field in iter {
            let _ = schema.insert(field);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_keeps_declaration_order() {
        let schema: Schema = [
            SchemaField::new("ssid", "char[32]", 2),
            SchemaField::new("port", "int", 3),
            SchemaField::new("enabled", "bool", 4),
        ]
        .into_iter()
        .collect();

        let names = schema.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["ssid", "port", "enabled"]);
    }

    #[test]
    fn duplicate_insert_returns_first_declaration() {
        let mut schema = Schema::new();
        schema
            .insert(SchemaField::new("port", "int", 3))
            .expect("first insert succeeds");

        let existing = schema
            .insert(SchemaField::new("port", "byte", 9))
            .expect_err("duplicate must be rejected");
        assert_eq!(existing.line, 3);
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("port").map(|f| f.ty.as_str()), Some("int"));
    }

    #[test]
    fn field_category_follows_type() {
        assert_eq!(
            SchemaField::new("ssid", "char[32]", 1).category(),
            TypeCategory::StringLike
        );
        assert_eq!(SchemaField::new("port", "int", 1).category(), TypeCategory::Integer);
    }

    #[test]
    fn serializes_type_under_type_key() {
        let json = serde_json::to_value(SchemaField::new("port", "int", 3)).expect("serialize");
        assert_eq!(json["type"], "int");
        assert_eq!(json["name"], "port");
    }
}
