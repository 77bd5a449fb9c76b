use crate::stmt::Value;

use indexmap::IndexMap;

/// One row's data bound to a model.
///
/// Tracks the set of fields mutated since construction or the last
/// [`clear_dirty`](Instance::clear_dirty), and whether the row has been
/// persisted. Related instances attached during materialization live in an
/// explicit association map.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    model: String,
    attributes: IndexMap<String, Value>,
    dirty: IndexMap<String, DirtyEntry>,
    persisted: bool,
    associations: IndexMap<String, Vec<Instance>>,
}

/// Previous and current value of a dirty field.
#[derive(Debug, Clone, PartialEq)]
pub struct DirtyEntry {
    pub previous: Value,
    pub current: Value,
}

impl Instance {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            attributes: IndexMap::new(),
            dirty: IndexMap::new(),
            persisted: false,
            associations: IndexMap::new(),
        }
    }

    /// Builds a clean instance from raw attributes, e.g. a row loaded from
    /// storage. Nothing is marked dirty.
    pub fn from_attributes(model: impl Into<String>, attributes: IndexMap<String, Value>) -> Self {
        Self {
            model: model.into(),
            attributes,
            dirty: IndexMap::new(),
            persisted: false,
            associations: IndexMap::new(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    /// Assigns a field, marking it dirty when the value changed. Setting a
    /// field back to its pre-dirty value clears the mark.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        let current = self.attributes.get(&field).cloned().unwrap_or(Value::Null);

        match self.dirty.get_mut(&field) {
            Some(entry) if entry.previous == value => {
                self.dirty.shift_remove(&field);
            }
            Some(entry) => {
                entry.current = value.clone();
            }
            None if current == value => return,
            None => {
                self.dirty.insert(
                    field.clone(),
                    DirtyEntry {
                        previous: current,
                        current: value.clone(),
                    },
                );
            }
        }

        self.attributes.insert(field, value);
    }

    /// Assigns a field without touching dirty state, e.g. for write-back
    /// results returned by the database.
    pub fn assign(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(field.into(), value.into());
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty_fields(&self) -> impl Iterator<Item = (&str, &DirtyEntry)> + '_ {
        self.dirty.iter().map(|(name, entry)| (&name[..], entry))
    }

    pub fn dirty_value(&self, field: &str) -> Option<&Value> {
        self.dirty.get(field).map(|entry| &entry.current)
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    pub fn set_persisted(&mut self, persisted: bool) {
        self.persisted = persisted;
    }

    pub fn associate(&mut self, name: impl Into<String>, related: Instance) {
        self.associations.entry(name.into()).or_default().push(related);
    }

    pub fn associated(&self, name: &str) -> &[Instance] {
        self.associations
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn associations(&self) -> &IndexMap<String, Vec<Instance>> {
        &self.associations
    }
}
