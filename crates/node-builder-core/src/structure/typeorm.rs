//! TypeORM `DataSource` generation

use crate::choice::{Database, ProjectChoice};

/// Used when the project name spells another database's driver id
const NEUTRAL_NAME: &str = "app_db";

/// Database name derived from the project name.
/// Server databases get an identifier-safe name, sqlite gets a file name.
/// The generated config must never mention a driver other than the chosen one.
pub fn database_name(project: &str, database: Database) -> String {
    let ident: String = project
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();

    let foreign = Database::ALL
        .iter()
        .filter(|other| **other != database)
        .any(|other| ident.contains(other.typeorm_driver()));
    let ident = if foreign || ident.is_empty() {
        NEUTRAL_NAME.to_string()
    } else {
        ident
    };

    match database {
        Database::Sqlite => format!("{}.sqlite", ident),
        Database::Mysql | Database::Postgresql => ident,
    }
}

/// Render `data-source.ts`; `prefix` is where entities/migrations/subscribers live
pub fn data_source(choice: &ProjectChoice, project: &str, prefix: &str) -> String {
    format!(
        r#"import {{ DataSource }} from "typeorm"

export const AppDataSource = new DataSource({{
    type: "{driver}",
    database: "{database}",
    entities: ["{prefix}entities/**/*.ts"],
    migrations: ["{prefix}migrations/**/*.ts"],
    subscribers: ["{prefix}subscribers/**/*.ts"],
    synchronize: {synchronize},
}})
"#,
        driver = choice.database.typeorm_driver(),
        database = database_name(project, choice.database),
        prefix = prefix,
        synchronize = choice.synchronize,
    )
}
