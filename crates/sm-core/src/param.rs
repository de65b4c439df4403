//! Animation parameters: a tagged-union value, an ordered keyed map, and
//! the per-model parameter schema used to validate both.

use crate::{Position, Severity, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single parameter value.
///
/// `Opaque` preserves unknown keys verbatim (§3: "Unknown keys MUST NOT
/// fail validation but MUST be preserved verbatim") without the core
/// needing to understand their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum ParamValue {
    Scalar(f64),
    Bool(bool),
    Enum(String),
    Position(Position),
    PositionSeq(Vec<Position>),
    Opaque(serde_json::Value),
}

impl ParamValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParamValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&str> {
        match self {
            ParamValue::Enum(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_position(&self) -> Option<Position> {
        match self {
            ParamValue::Position(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_position_seq(&self) -> Option<&[Position]> {
        match self {
            ParamValue::PositionSeq(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// An ordered, keyed mapping from parameter name to value.
///
/// Backed by a `BTreeMap` rather than a `HashMap` so that iteration
/// order (used when generating stable cache keys) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationParameters(pub BTreeMap<String, ParamValue>);

impl AnimationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn scalar(&self, name: &str, default: f64) -> f64 {
        self.0.get(name).and_then(ParamValue::as_scalar).unwrap_or(default)
    }

    pub fn boolean(&self, name: &str, default: bool) -> bool {
        self.0.get(name).and_then(ParamValue::as_bool).unwrap_or(default)
    }

    pub fn enumerant<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.0.get(name).and_then(ParamValue::as_enum).unwrap_or(default)
    }

    pub fn position(&self, name: &str, default: Position) -> Position {
        self.0.get(name).and_then(ParamValue::as_position).unwrap_or(default)
    }

    pub fn position_seq(&self, name: &str) -> Vec<Position> {
        self.0
            .get(name)
            .and_then(ParamValue::as_position_seq)
            .map(|s| s.to_vec())
            .unwrap_or_default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: ParamValue) {
        self.0.insert(name.into(), value);
    }

    pub fn merge_defaults(&mut self, defaults: &AnimationParameters) {
        for (k, v) in &defaults.0 {
            self.0.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
}

/// The kind of value a [`ParameterDefinition`] accepts, independent of
/// any concrete value (used for schema validation before a value exists).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Scalar,
    Bool,
    Enum,
    Position,
    PositionSeq,
    Opaque,
}

/// UI hint for how a host editor should render this parameter. Purely
/// advisory; the core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiHint {
    Slider,
    Stepper,
    Checkbox,
    Dropdown,
    PositionPicker,
    ControlPointList,
    Text,
}

/// A dependency predicate controlling whether a parameter is visible in
/// an editor, expressed as "this other parameter's enum value must be
/// one of these" — intentionally not a general expression language (see
/// the "closures embedded in JSON" redesign note): it can only ever
/// reference one other field by name, so evaluating it can never cycle
/// back to itself, and a registry can check for cycles by walking the
/// named references as a simple graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityPredicate {
    pub depends_on: String,
    pub one_of: Vec<String>,
}

/// One entry in a model's parameter schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub kind: ParamKind,
    pub default: ParamValue,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub enum_values: Option<Vec<String>>,
    pub visible_when: Option<VisibilityPredicate>,
    pub ui_hint: UiHint,
}

impl ParameterDefinition {
    pub fn scalar(name: &str, default: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Scalar,
            default: ParamValue::Scalar(default),
            min: None,
            max: None,
            step: None,
            enum_values: None,
            visible_when: None,
            ui_hint: UiHint::Slider,
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn boolean(name: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Bool,
            default: ParamValue::Bool(default),
            min: None,
            max: None,
            step: None,
            enum_values: None,
            visible_when: None,
            ui_hint: UiHint::Checkbox,
        }
    }

    pub fn enumerant(name: &str, default: &str, values: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Enum,
            default: ParamValue::Enum(default.to_string()),
            min: None,
            max: None,
            step: None,
            enum_values: Some(values.iter().map(|s| s.to_string()).collect()),
            visible_when: None,
            ui_hint: UiHint::Dropdown,
        }
    }

    pub fn position(name: &str, default: Position) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::Position,
            default: ParamValue::Position(default),
            min: None,
            max: None,
            step: None,
            enum_values: None,
            visible_when: None,
            ui_hint: UiHint::PositionPicker,
        }
    }

    pub fn position_seq(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ParamKind::PositionSeq,
            default: ParamValue::PositionSeq(Vec::new()),
            min: None,
            max: None,
            step: None,
            enum_values: None,
            visible_when: None,
            ui_hint: UiHint::ControlPointList,
        }
    }

    /// Validate the static shape of this definition (not a value against
    /// it — see [`validate_schema`] for that; this checks the definition
    /// makes sense on its own, e.g. a scalar default within its own
    /// min/max, an enum default that is one of its own `enum_values`).
    fn validate_self(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let path = format!("schema.{}", self.name);

        if let (ParamValue::Scalar(v), Some(min), Some(max)) = (&self.default, self.min, self.max) {
            if *v < min || *v > max {
                errors.push(ValidationError::error(
                    &path,
                    "default_out_of_range",
                    format!("default {v} is outside [{min}, {max}]"),
                ));
            }
        }

        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                errors.push(ValidationError::error(&path, "inverted_range", format!("min {min} > max {max}")));
            }
        }

        if let ParamValue::Enum(default) = &self.default {
            if let Some(values) = &self.enum_values {
                if !values.contains(default) {
                    errors.push(ValidationError::error(
                        &path,
                        "unknown_enumerant",
                        format!("default {default:?} is not in {values:?}"),
                    ));
                }
            }
        }

        errors
    }
}

/// Validate an entire parameter schema: each definition's own shape, no
/// duplicate names, and no dependency predicate referencing a field that
/// does not exist (the only way this schema's restricted predicate shape
/// could misbehave, since it cannot reference itself by construction).
pub fn validate_schema(schema: &[ParameterDefinition]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for def in schema {
        if !seen.insert(def.name.clone()) {
            errors.push(ValidationError::error(
                "schema",
                "duplicate_parameter_name",
                format!("parameter {:?} declared more than once", def.name),
            ));
        }
        errors.extend(def.validate_self());
    }

    let names: std::collections::HashSet<&str> = schema.iter().map(|d| d.name.as_str()).collect();
    for def in schema {
        if let Some(pred) = &def.visible_when {
            if pred.depends_on == def.name {
                errors.push(ValidationError::error(
                    format!("schema.{}", def.name),
                    "self_referential_predicate",
                    "visibility predicate depends on its own parameter",
                ));
            } else if !names.contains(pred.depends_on.as_str()) {
                errors.push(ValidationError::warning(
                    format!("schema.{}", def.name),
                    "dangling_predicate",
                    format!("visibility predicate depends on unknown parameter {:?}", pred.depends_on),
                ));
            }
        }
    }

    errors
}

/// True if `errors` contains no blocking [`Severity::Error`] entry.
pub fn schema_is_valid(errors: &[ValidationError]) -> bool {
    !errors.iter().any(|e| e.severity == Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_preserved() {
        let mut params = AnimationParameters::new();
        params.set("totallyUnknownField", ParamValue::Opaque(serde_json::json!({"x": 1})));
        assert!(params.get("totallyUnknownField").is_some());
    }

    #[test]
    fn merge_defaults_does_not_override() {
        let mut params = AnimationParameters::new();
        params.set("radius", ParamValue::Scalar(5.0));
        let mut defaults = AnimationParameters::new();
        defaults.set("radius", ParamValue::Scalar(1.0));
        defaults.set("speed", ParamValue::Scalar(0.25));
        params.merge_defaults(&defaults);
        assert_eq!(params.scalar("radius", 0.0), 5.0);
        assert_eq!(params.scalar("speed", 0.0), 0.25);
    }

    #[test]
    fn schema_rejects_default_out_of_range() {
        let def = ParameterDefinition::scalar("radius", 50.0).with_range(0.0, 10.0);
        let errors = validate_schema(&[def]);
        assert!(!schema_is_valid(&errors));
    }

    #[test]
    fn schema_rejects_duplicate_names() {
        let schema = vec![ParameterDefinition::scalar("radius", 1.0), ParameterDefinition::scalar("radius", 2.0)];
        let errors = validate_schema(&schema);
        assert!(!schema_is_valid(&errors));
    }

    #[test]
    fn schema_rejects_self_referential_predicate() {
        let mut def = ParameterDefinition::scalar("radius", 1.0);
        def.visible_when = Some(VisibilityPredicate {
            depends_on: "radius".to_string(),
            one_of: vec!["x".to_string()],
        });
        let errors = validate_schema(&[def]);
        assert!(!schema_is_valid(&errors));
    }

    #[test]
    fn schema_accepts_well_formed_definitions() {
        let schema = vec![
            ParameterDefinition::scalar("radius", 1.0).with_range(0.0, 10.0),
            ParameterDefinition::enumerant("direction", "cw", &["cw", "ccw"]),
        ];
        let errors = validate_schema(&schema);
        assert!(schema_is_valid(&errors));
    }
}
