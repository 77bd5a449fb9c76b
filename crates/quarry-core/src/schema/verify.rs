use super::Schema;
use crate::Result;

use std::collections::HashSet;

impl Schema {
    /// Checks the schema for structural problems: duplicate model and field
    /// names, multiple primary keys, and dangling foreign keys.
    pub fn verify(&self) -> Result<()> {
        let mut model_names = HashSet::new();

        for model in &self.models {
            if !model_names.insert(&model.name) {
                anyhow::bail!("duplicate model name `{}`", model.name);
            }

            let mut field_names = HashSet::new();
            let mut primary_keys = 0;

            for field in &model.fields {
                if !field_names.insert(&field.name) {
                    anyhow::bail!(
                        "duplicate field name `{}` on model `{}`",
                        field.name,
                        model.name
                    );
                }

                if field.primary_key {
                    primary_keys += 1;
                }

                if let super::FieldType::ForeignKey {
                    model: target_model,
                    field: target_field,
                } = &field.ty
                {
                    let Some(target) = self.resolve(target_model) else {
                        anyhow::bail!(
                            "field `{}.{}` references unknown model `{}`",
                            model.name,
                            field.name,
                            target_model
                        );
                    };
                    if target.resolve_field(target_field).is_none() {
                        anyhow::bail!(
                            "field `{}.{}` references unknown field `{}.{}`",
                            model.name,
                            field.name,
                            target_model,
                            target_field
                        );
                    }
                }

                for index in &field.indexes {
                    for companion in &index.companions {
                        if model.resolve_field(companion).is_none() {
                            anyhow::bail!(
                                "index on `{}.{}` names unknown companion field `{}`",
                                model.name,
                                field.name,
                                companion
                            );
                        }
                    }
                }
            }

            if primary_keys > 1 {
                anyhow::bail!("model `{}` declares more than one primary key", model.name);
            }
        }

        Ok(())
    }
}
