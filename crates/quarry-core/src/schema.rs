mod default_value;
pub use default_value::{DefaultKind, DefaultValue};

mod field;
pub use field::{Field, FieldId};

mod index;
pub use index::IndexSpec;

mod model;
pub use model::{Model, ModelId};

mod ty;
pub use ty::FieldType;

mod verify;

/// The full set of models known to a connection.
#[derive(Debug, Default)]
pub struct Schema {
    /// All models, indexed by `ModelId`.
    pub models: Vec<Model>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schema from a list of model definitions, assigning ids.
    pub fn from_models(models: impl IntoIterator<Item = Model>) -> Self {
        let mut schema = Self::new();
        for model in models {
            schema.add_model(model);
        }
        schema
    }

    /// Adds a model, assigning ids to the model and its fields.
    pub fn add_model(&mut self, mut model: Model) -> ModelId {
        let id = ModelId(self.models.len());
        model.id = id;
        for (index, field) in model.fields.iter_mut().enumerate() {
            field.id = FieldId { model: id, index };
        }
        self.models.push(model);
        id
    }

    pub fn model(&self, id: ModelId) -> &Model {
        &self.models[id.0]
    }

    /// Looks up a model by name.
    pub fn resolve(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name == name)
    }
}
