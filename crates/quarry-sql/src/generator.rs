mod alter;
mod condition;
mod ddl;
mod delete;
mod index;
mod insert;
mod join;
mod literal;
mod naming;
mod returning;
mod select;
mod update;
mod where_clause;

pub use ddl::{CreateTableOptions, DropBehavior, DropColumnOptions, DropTableOptions};
pub use delete::DeleteTarget;
pub use index::{CreateIndexOptions, DropIndexOptions};
pub use select::SelectOptions;

pub(crate) use condition::ValueShape;
pub(crate) use join::JoinInfo;
pub(crate) use literal::LiteralCtx;

use crate::dialect::Dialect;

use quarry_core::{
    schema::{Field, FieldType, Model},
    stmt::{FieldRef, Value},
    Result, Schema,
};

use anyhow::anyhow;

/// Turns queries, instances, and schema definitions into SQL strings for one
/// dialect. Holds no mutable state; every method is a pure function of its
/// arguments, so a generator can be shared freely.
pub struct Generator<'a> {
    schema: &'a Schema,
    dialect: &'a dyn Dialect,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, dialect: &'a dyn Dialect) -> Self {
        Self { schema, dialect }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect
    }

    pub(crate) fn model(&self, name: &str) -> Result<&'a Model> {
        self.schema
            .resolve(name)
            .ok_or_else(|| anyhow!("unable to resolve model `{name}`"))
    }

    pub(crate) fn field<'m>(&self, model: &'m Model, name: &str) -> Result<&'m Field> {
        model.resolve_field(name).ok_or_else(|| {
            anyhow!(
                "unable to resolve field `{name}` on model `{}`",
                model.name
            )
        })
    }

    /// Resolves a field reference against the schema, defaulting the model
    /// to `root` when the reference carries none.
    pub(crate) fn resolve_ref(
        &self,
        field_ref: &FieldRef,
        root: &str,
    ) -> Result<(&'a Model, &'a Field)> {
        let model = self.model(field_ref.model.as_deref().unwrap_or(root))?;
        let field = self.field(model, &field_ref.field)?;
        Ok((model, field))
    }

    pub(crate) fn primary_key<'m>(&self, model: &'m Model) -> Result<&'m Field> {
        model
            .primary_key_field()
            .ok_or_else(|| anyhow!("model `{}` has no primary key field", model.name))
    }

    /// Storage type of a field, following foreign keys to the referenced
    /// column's type.
    pub(crate) fn storage_type(&self, field: &Field) -> Result<String> {
        match &field.ty {
            FieldType::ForeignKey {
                model: target_model,
                field: target_field,
            } => {
                let model = self.model(target_model)?;
                let target = self.field(model, target_field)?;
                self.dialect.column_type(&target.ty)
            }
            ty => self.dialect.column_type(ty),
        }
    }

    /// Escapes a value for embedding in SQL. Literal values render as raw
    /// SQL expressions rather than escaped data.
    pub(crate) fn render_value(&self, root_model: &str, value: &Value) -> Result<String> {
        match value {
            Value::Literal(literal) => {
                self.render_literal(literal, &LiteralCtx::expression(root_model))
            }
            value => self.dialect.escape_value(value),
        }
    }
}
