//! Java rendition of the Android sources. Same files and policies as the
//! Kotlin output, written as `.java` classes.

mod database;
mod entity;
pub(crate) mod field;
mod manager;

use std::path::PathBuf;

use dbtools_schema::DatabaseSchema;

use crate::error::Result;
use crate::generators::android::{AndroidGenerator, EntityContext, WritePolicy};
use crate::java::JavaClass;

/// Every class of one entity, in the order the Kotlin output uses.
pub(crate) fn entity_classes(ctx: &EntityContext<'_>) -> Result<Vec<(JavaClass, WritePolicy)>> {
    let mut classes = vec![(entity::constants_class(ctx)?, WritePolicy::Overwrite)];

    if ctx.entity.is_enumeration_table() {
        classes.push((entity::enum_class(ctx)?, WritePolicy::Overwrite));
        return Ok(classes);
    }

    classes.push((entity::base_record_class(ctx)?, WritePolicy::Overwrite));
    classes.push((entity::record_class(ctx)?, WritePolicy::CreateOnly));
    classes.push((manager::base_manager_class(ctx)?, WritePolicy::Overwrite));
    classes.push((manager::manager_class(ctx)?, WritePolicy::CreateOnly));
    Ok(classes)
}

pub(crate) fn lifecycle_classes(
    generator: &AndroidGenerator,
    schema: &DatabaseSchema,
    created: &str,
) -> Result<Vec<(PathBuf, JavaClass, WritePolicy)>> {
    database::lifecycle_classes(generator, schema, created)
}
