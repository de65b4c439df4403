//! Model Registry (C1): a process-wide keyed lookup from model-type
//! identifier to a [`Model`] implementation.

use crate::model::Model;
use sm_core::{validate_schema, ModelTypeId, ValidationError};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Raised only by [`ModelRegistry::require`] — `register` reports its own
/// failures as [`ValidationError`]s since they are schema problems, not
/// lookup problems.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("model type {0:?} is not registered")]
    NotFound(String),
}

/// Query for [`ModelRegistry::list`]: a case-insensitive substring match
/// against name, category, tags, and description. All fields are
/// optional; an empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ModelFilter {
    pub category: Option<String>,
    pub query: Option<String>,
}

impl ModelFilter {
    fn matches(&self, model: &dyn Model) -> bool {
        let meta = model.metadata();
        if let Some(category) = &self.category {
            if !meta.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let q = query.to_lowercase();
            let haystack = format!(
                "{} {} {} {}",
                meta.display_name,
                meta.category,
                meta.tags.join(" "),
                meta.description
            )
            .to_lowercase();
            if !haystack.contains(&q) {
                return false;
            }
        }
        true
    }
}

/// Populated once at startup with the built-in models and, optionally,
/// validated runtime registrations. Immutable after startup is the
/// expectation of callers; nothing here enforces it structurally beyond
/// `register` rejecting duplicate identifiers.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<ModelTypeId, Arc<dyn Model>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model. Fails if the identifier is already taken or the
    /// declared schema has any blocking [`ValidationError`].
    pub fn register(&mut self, model: Arc<dyn Model>) -> Result<(), Vec<ValidationError>> {
        let type_id = model.metadata().type_id.clone();

        if self.models.contains_key(&type_id) {
            return Err(vec![ValidationError::error(
                "type_id",
                "duplicate_type",
                format!("model type {:?} is already registered", type_id.0),
            )]);
        }

        let errors = validate_schema(model.parameter_schema());
        if sm_core::has_blocking_errors(&errors) {
            return Err(errors);
        }

        self.models.insert(type_id, model);
        Ok(())
    }

    /// Total, pure.
    pub fn lookup(&self, type_id: &ModelTypeId) -> Option<Arc<dyn Model>> {
        self.models.get(type_id).cloned()
    }

    /// Like [`Self::lookup`], but surfaces the failure as an error instead
    /// of `None` for callers (the Transport) that treat a missing model
    /// type as a reportable condition rather than an expected branch.
    pub fn require(&self, type_id: &ModelTypeId) -> Result<Arc<dyn Model>, RegistryError> {
        self.lookup(type_id).ok_or_else(|| RegistryError::NotFound(type_id.0.clone()))
    }

    pub fn list(&self, filter: &ModelFilter) -> Vec<Arc<dyn Model>> {
        let mut out: Vec<_> = self
            .models
            .values()
            .filter(|m| filter.matches(m.as_ref()))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.metadata().type_id.0.cmp(&b.metadata().type_id.0));
        out
    }

    pub fn unregister(&mut self, type_id: &ModelTypeId) -> bool {
        self.models.remove(type_id).is_some()
    }

    pub fn list_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .models
            .values()
            .map(|m| m.metadata().category.clone())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort();
        categories
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::linear::LinearModel;

    #[test]
    fn register_and_lookup() {
        let mut registry = ModelRegistry::new();
        let model = Arc::new(LinearModel::default());
        registry.register(model).unwrap();

        let type_id = ModelTypeId::new("linear");
        assert!(registry.lookup(&type_id).is_some());
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = ModelRegistry::new();
        registry.register(Arc::new(LinearModel::default())).unwrap();
        let err = registry.register(Arc::new(LinearModel::default())).unwrap_err();
        assert!(sm_core::has_blocking_errors(&err));
    }

    #[test]
    fn list_filters_by_query() {
        let mut registry = ModelRegistry::new();
        registry.register(Arc::new(LinearModel::default())).unwrap();

        let found = registry.list(&ModelFilter {
            category: None,
            query: Some("linear".to_string()),
        });
        assert_eq!(found.len(), 1);

        let not_found = registry.list(&ModelFilter {
            category: None,
            query: Some("nonexistent".to_string()),
        });
        assert!(not_found.is_empty());
    }

    #[test]
    fn require_reports_missing_type() {
        let registry = ModelRegistry::new();
        let err = registry.require(&ModelTypeId::new("missing")).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(name) if name == "missing"));
    }

    #[test]
    fn unregister_removes_model() {
        let mut registry = ModelRegistry::new();
        registry.register(Arc::new(LinearModel::default())).unwrap();
        let type_id = ModelTypeId::new("linear");
        assert!(registry.unregister(&type_id));
        assert!(registry.lookup(&type_id).is_none());
    }
}
