use dbtools_schema::EntityType;

use crate::error::Result;
use crate::generators::android::{editable_header, EntityContext};
use crate::kotlin::{ClassKind, KotlinClass, KotlinFun};

/// Editable `<Entity>Manager`, created once and then owned by the app.
pub(crate) fn manager_class(ctx: &EntityContext<'_>) -> Result<KotlinClass> {
    let mut class = KotlinClass::new(ctx.manager_name(), ctx.package(), ClassKind::Class);
    class.extends = ctx.base_manager_name();
    class.file_header_comment = editable_header(&class.file_name(), &ctx.created);
    class.add_import(&format!("{}.DatabaseManager", ctx.package_base));

    let mut constructor = KotlinFun::constructor()
        .with_parameter("databaseManager", "DatabaseManager")
        .with_delegate("super(databaseManager)");
    if ctx.config.injection_support {
        class.add_annotation("javax.inject.Singleton")?;
        constructor.add_annotation("javax.inject.Inject")?;
    }
    class.add_constructor(constructor)?;

    if ctx.entity.kind == EntityType::Query {
        class.add_fun(
            KotlinFun::new("getQuery", "String")
                .overriding()
                .with_content(format!("return {}.QUERY", ctx.class_name())),
        );
    }
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::android::tests::context_for;
    use crate::kotlin::SourceStyle;
    use dbtools_schema::{SchemaDatabase, SchemaEntity};

    fn database(kind: EntityType) -> SchemaDatabase {
        SchemaDatabase {
            name: "main".to_string(),
            tables: vec![SchemaEntity::new(kind, "PERSON")],
            ..Default::default()
        }
    }

    #[test]
    fn delegates_to_base_manager() {
        let db = database(EntityType::Table);
        let text = manager_class(&context_for(&db, 0))
            .unwrap()
            .render(&SourceStyle::default());
        assert!(text.contains("class PersonManager : PersonBaseManager {\n"));
        assert!(text.contains(
            "    constructor(databaseManager: DatabaseManager) : super(databaseManager)\n"
        ));
        assert!(!text.contains("@Inject"));
    }

    #[test]
    fn injection_annotates_class_and_constructor() {
        let db = database(EntityType::Query);
        let mut ctx = context_for(&db, 0);
        ctx.config.injection_support = true;
        let text = manager_class(&ctx).unwrap().render(&SourceStyle::default());

        assert!(text.contains("@javax.inject.Singleton\nclass PersonManager"));
        assert!(text.contains("    @javax.inject.Inject\n    constructor("));
        assert!(text.contains("override fun getQuery(): String {\n        return Person.QUERY\n"));
    }
}
