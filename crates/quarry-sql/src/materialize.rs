//! Turning flat result rows back into model instances.
//!
//! Joined SELECTs project every model's fields side by side, so one result
//! row may describe several models and one model row may repeat across many
//! result rows. Materialization runs in two passes: group and deduplicate
//! rows per model, then build root instances with their related instances
//! attached.

use crate::generator::Generator;

use quarry_core::{
    schema::Model,
    stmt::{Query, Value},
    Instance, Result,
};

use indexmap::IndexMap;
use std::collections::HashMap;

/// Flat result of a driver query: column names as the statement projected
/// them, rows in result order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }
}

/// Rows grouped and deduplicated per model, with join edges recorded as
/// indices. All indices are scoped to one materialization call.
#[derive(Debug, Default)]
pub struct ModelData {
    /// Name of the root model.
    pub root: String,

    /// Deduplicated attribute rows per model, root first, joined models in
    /// dependency order.
    pub models: IndexMap<String, Vec<IndexMap<String, Value>>>,

    /// For each root row, related model name to indices into that model's
    /// row list.
    pub relations: Vec<IndexMap<String, Vec<usize>>>,
}

impl Generator<'_> {
    /// First materialization pass: split each result row by model, drop
    /// all-NULL fragments left behind by outer joins, and deduplicate rows
    /// on primary key (or full attribute identity for keyless models).
    pub fn group_rows_by_model(&self, query: &Query, result: &QueryResult) -> Result<ModelData> {
        let root = self.model(&query.model)?;

        let joins = self.collect_joins(query)?;
        let mut model_order = vec![root.name.clone()];
        for name in self.order_joins(&joins) {
            if !model_order.contains(&name) {
                model_order.push(name);
            }
        }

        // Route each column to (model, field) through the projection alias.
        let mut column_targets = Vec::with_capacity(result.columns.len());
        for column in &result.columns {
            match Generator::parse_field_projection(column) {
                Some((model, field)) => column_targets.push((model.to_string(), field.to_string())),
                None => column_targets.push((root.name.clone(), column.clone())),
            }
        }

        let mut data = ModelData {
            root: root.name.clone(),
            models: IndexMap::new(),
            relations: vec![],
        };
        for name in &model_order {
            data.models.insert(name.clone(), vec![]);
        }
        let mut seen: HashMap<String, HashMap<String, usize>> = HashMap::new();

        for row in &result.rows {
            let mut per_model: IndexMap<&str, IndexMap<String, Value>> = IndexMap::new();
            for ((model, field), value) in column_targets.iter().zip(row) {
                per_model
                    .entry(model.as_str())
                    .or_default()
                    .insert(field.clone(), value.clone());
            }

            let mut root_index = None;
            for model_name in &model_order {
                let Some(attributes) = per_model.get(model_name.as_str()) else {
                    continue;
                };
                // An unmatched outer-join side comes back all NULL.
                if attributes.values().all(Value::is_null) {
                    continue;
                }

                let key = self.identity_key(model_name, attributes)?;
                let is_root = *model_name == data.root;
                let rows = data.models.get_mut(model_name).unwrap();
                let keys = seen.entry(model_name.clone()).or_default();
                let index = match keys.get(&key) {
                    Some(&index) => index,
                    None => {
                        rows.push(attributes.clone());
                        let index = rows.len() - 1;
                        keys.insert(key, index);
                        if is_root {
                            data.relations.push(IndexMap::new());
                        }
                        index
                    }
                };

                if is_root {
                    root_index = Some(index);
                } else if let Some(root_index) = root_index {
                    let related = data.relations[root_index]
                        .entry(model_name.clone())
                        .or_default();
                    if !related.contains(&index) {
                        related.push(index);
                    }
                }
            }
        }

        Ok(data)
    }

    /// Second materialization pass: one clean instance per deduplicated root
    /// row, related instances attached under their model names. The hook
    /// runs once per constructed instance, root and related alike.
    pub fn build_model_graph<F>(&self, data: &ModelData, mut hook: F) -> Result<Vec<Instance>>
    where
        F: FnMut(&mut Instance),
    {
        let root_rows = data
            .models
            .get(&data.root)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut instances = Vec::with_capacity(root_rows.len());
        for (index, attributes) in root_rows.iter().enumerate() {
            let mut instance = Instance::from_attributes(data.root.clone(), attributes.clone());
            instance.set_persisted(true);
            hook(&mut instance);

            if let Some(relations) = data.relations.get(index) {
                for (model_name, indices) in relations {
                    for &related_index in indices {
                        let Some(attributes) = data
                            .models
                            .get(model_name)
                            .and_then(|rows| rows.get(related_index))
                        else {
                            continue;
                        };
                        let mut related =
                            Instance::from_attributes(model_name.clone(), attributes.clone());
                        related.set_persisted(true);
                        hook(&mut related);
                        instance.associate(model_name.clone(), related);
                    }
                }
            }

            instances.push(instance);
        }

        Ok(instances)
    }

    /// Writes RETURNING rows back onto the instances that produced them.
    /// Rows pair with instances positionally, in statement order. Assigned
    /// fields do not re-dirty; the write is considered settled.
    pub fn apply_write_results(
        &self,
        model: &Model,
        instances: &mut [Instance],
        result: &QueryResult,
    ) {
        for (instance, row) in instances.iter_mut().zip(&result.rows) {
            for (column, value) in result.columns.iter().zip(row) {
                let name = Generator::parse_field_projection(column)
                    .map(|(_, field)| field)
                    .unwrap_or(column);
                // RETURNING yields column names; map back to field names.
                let field = model
                    .stored_fields()
                    .find(|field| field.column_name() == name || field.name == name)
                    .map(|field| field.name.clone())
                    .unwrap_or_else(|| name.to_string());
                instance.assign(field, value.clone());
            }
            instance.clear_dirty();
            instance.set_persisted(true);
        }
    }

    /// Dedup key for one model fragment: primary key value when present,
    /// otherwise the full attribute set.
    fn identity_key(
        &self,
        model_name: &str,
        attributes: &IndexMap<String, Value>,
    ) -> Result<String> {
        let model = self.model(model_name)?;
        if let Some(pk) = model.primary_key_field() {
            if let Some(value) = attributes.get(&pk.name) {
                if !value.is_null() {
                    return Ok(format!("pk:{}", value_key(value)));
                }
            }
        }

        let mut names: Vec<&String> = attributes.keys().collect();
        names.sort_unstable();
        Ok(names
            .iter()
            .map(|name| format!("{name}={}", value_key(&attributes[name.as_str()])))
            .collect::<Vec<_>>()
            .join(";"))
    }
}

fn value_key(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::F64(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::List(values) => values
            .iter()
            .map(value_key)
            .collect::<Vec<_>>()
            .join(","),
        Value::Literal(_) => "literal".to_string(),
    }
}
