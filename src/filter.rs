//! Query-by-example filter construction from request parameters.
//!
//! Every entity that supports filtered listing declares a static
//! [`FieldRegistry`]: the filterable field names, their value kinds, any
//! per-field match-mode override, and the fields excluded from filtering
//! outright (surrogate keys). [`build_filter`] walks the raw query
//! parameters against that registry and produces a typed
//! [`FilterCriteria`]; a field that is absent from the request imposes no
//! constraint.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};

use crate::pagination::{ParamError, RESERVED_PARAMS};

/// Comparison semantics applied to a single filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Exact equality.
    Exact,
    /// Case-insensitive substring containment.
    Contains,
}

/// Declared value kind of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

impl FieldKind {
    /// Match mode applied when the field spec carries no override.
    pub const fn default_match_mode(self) -> MatchMode {
        match self {
            FieldKind::Text => MatchMode::Contains,
            FieldKind::Integer => MatchMode::Exact,
        }
    }
}

/// One filterable field of an entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    match_mode: Option<MatchMode>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            match_mode: None,
        }
    }

    /// Overrides the kind's default match mode for this field.
    pub const fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode.unwrap_or(self.kind.default_match_mode())
    }
}

/// Static per-entity table of filterable fields and declared exclusions.
#[derive(Debug, Clone, Copy)]
pub struct FieldRegistry {
    fields: &'static [FieldSpec],
    excluded: &'static [&'static str],
}

impl FieldRegistry {
    pub const fn new(fields: &'static [FieldSpec], excluded: &'static [&'static str]) -> Self {
        Self { fields, excluded }
    }

    pub fn lookup(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Whether the field never participates in filtering, even when the
    /// request supplies a value for it.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(&name)
    }
}

/// A filter value converted to the field's declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

impl Display for FilterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Text(value) => write!(f, "{value}"),
            FilterValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// The predicate applied to one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatcher {
    pub value: FilterValue,
    pub mode: MatchMode,
}

/// The full set of per-field predicates for one collection query.
///
/// Matchers are keyed by field name in a `BTreeMap`, so iteration order is
/// stable regardless of the order the request supplied the parameters in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    matchers: BTreeMap<String, FieldMatcher>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn get(&self, name: &str) -> Option<&FieldMatcher> {
        self.matchers.get(name)
    }

    /// Matchers in stable (field-name) order.
    pub fn matchers(&self) -> impl Iterator<Item = (&str, &FieldMatcher)> {
        self.matchers
            .iter()
            .map(|(name, matcher)| (name.as_str(), matcher))
    }
}

/// Builds the filter criteria for one request.
///
/// Reserved pagination keys and parameters that do not name a registered
/// field are ignored; excluded fields are skipped even when supplied; a
/// blank value imposes no constraint. A value that cannot be converted to
/// the field's declared kind fails the whole build naming the field, so a
/// malformed filter never degrades into an over-broad query.
pub fn build_filter(
    params: &HashMap<String, String>,
    registry: &FieldRegistry,
) -> Result<FilterCriteria, ParamError> {
    let mut matchers = BTreeMap::new();

    for (name, raw) in params {
        if RESERVED_PARAMS.contains(&name.as_str()) {
            continue;
        }
        let Some(spec) = registry.lookup(name) else {
            continue;
        };
        if registry.is_excluded(name) {
            continue;
        }
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let value = match spec.kind() {
            FieldKind::Text => FilterValue::Text(raw.to_string()),
            FieldKind::Integer => raw
                .parse::<i64>()
                .map(FilterValue::Integer)
                .map_err(|_| ParamError::new(name.clone(), "expected an integer value"))?,
        };

        matchers.insert(
            name.clone(),
            FieldMatcher {
                value,
                mode: spec.match_mode(),
            },
        );
    }

    Ok(FilterCriteria { matchers })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: FieldRegistry = FieldRegistry::new(
        &[
            FieldSpec::new("id", FieldKind::Integer),
            FieldSpec::new("name", FieldKind::Text),
            FieldSpec::new("email", FieldKind::Text).with_match_mode(MatchMode::Exact),
            FieldSpec::new("rating", FieldKind::Integer),
        ],
        &["id"],
    );

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn builds_matchers_for_registered_fields_only() {
        let criteria =
            build_filter(&params(&[("name", "al"), ("unknown", "x")]), &FIELDS).unwrap();
        assert_eq!(criteria.len(), 1);
        assert!(criteria.get("name").is_some());
    }

    #[test]
    fn reserved_pagination_keys_are_not_filter_fields() {
        let criteria = build_filter(
            &params(&[("page", "1"), ("size", "10"), ("sort", "name")]),
            &FIELDS,
        )
        .unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn excluded_fields_never_become_predicates() {
        let criteria = build_filter(&params(&[("id", "5"), ("name", "al")]), &FIELDS).unwrap();
        assert!(criteria.get("id").is_none());
        assert_eq!(criteria.len(), 1);
    }

    #[test]
    fn text_fields_default_to_contains() {
        let criteria = build_filter(&params(&[("name", "ally")]), &FIELDS).unwrap();
        let matcher = criteria.get("name").unwrap();
        assert_eq!(matcher.mode, MatchMode::Contains);
        assert_eq!(matcher.value, FilterValue::Text("ally".to_string()));
    }

    #[test]
    fn match_mode_override_applies() {
        let criteria = build_filter(&params(&[("email", "a@b.c")]), &FIELDS).unwrap();
        assert_eq!(criteria.get("email").unwrap().mode, MatchMode::Exact);
    }

    #[test]
    fn integer_fields_default_to_exact() {
        let criteria = build_filter(&params(&[("rating", "7")]), &FIELDS).unwrap();
        let matcher = criteria.get("rating").unwrap();
        assert_eq!(matcher.mode, MatchMode::Exact);
        assert_eq!(matcher.value, FilterValue::Integer(7));
    }

    #[test]
    fn malformed_integer_fails_the_build_naming_the_field() {
        let err = build_filter(&params(&[("rating", "notanumber")]), &FIELDS).unwrap_err();
        assert_eq!(err.param, "rating");
    }

    #[test]
    fn blank_values_impose_no_constraint() {
        let criteria = build_filter(&params(&[("name", "   ")]), &FIELDS).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn round_trips_the_supplied_field_set() {
        let supplied = params(&[("name", "al"), ("rating", "7"), ("email", "a@b.c")]);
        let criteria = build_filter(&supplied, &FIELDS).unwrap();

        let derived: HashMap<String, String> = criteria
            .matchers()
            .map(|(name, matcher)| (name.to_string(), matcher.value.to_string()))
            .collect();
        assert_eq!(derived, supplied);
    }

    #[test]
    fn parameter_order_does_not_change_the_criteria() {
        let forward = build_filter(&params(&[("name", "al"), ("rating", "7")]), &FIELDS).unwrap();
        let reverse = build_filter(&params(&[("rating", "7"), ("name", "al")]), &FIELDS).unwrap();
        assert_eq!(forward, reverse);

        let keys: Vec<&str> = forward.matchers().map(|(name, _)| name).collect();
        assert_eq!(keys, ["name", "rating"]);
    }
}
