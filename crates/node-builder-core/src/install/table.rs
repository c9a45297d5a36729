//! Package routing tables
//!
//! The one place that knows which npm packages a selection turns into.

use crate::choice::{Database, Orm, PackageManager};
use crate::error::{Result, ScaffoldError};

/// Dev toolchain installed into every project
pub const BASE_DEV_PACKAGES: &[&str] = &[
    "typescript@latest",
    "ts-node@latest",
    "@types/node@latest",
    "prettier",
];

pub const LINT_DEV_PACKAGES: &[&str] = &[
    "eslint",
    "@typescript-eslint/parser",
    "@typescript-eslint/eslint-plugin",
];

/// (install verb, dev flag) per package manager
const PACKAGE_MANAGER_COMMANDS: &[(PackageManager, &str, &str)] = &[
    (PackageManager::Npm, "install", "--save-dev"),
    (PackageManager::Yarn, "add", "--dev"),
    (PackageManager::Pnpm, "add", "--save-dev"),
    (PackageManager::Bun, "add", "--dev"),
];

/// ORM package plus database driver(s), in install order
const ORM_PACKAGES: &[OrmRoute] = &[
    (Orm::Drizzle, Database::Mysql, &["drizzle-orm", "mysql2"]),
    (Orm::Drizzle, Database::Postgresql, &["drizzle-orm", "pg"]),
    (Orm::Drizzle, Database::Sqlite, &["drizzle-orm", "better-sqlite3"]),
    (Orm::Sequelize, Database::Mysql, &["sequelize", "mysql2"]),
    (Orm::Sequelize, Database::Postgresql, &["sequelize", "pg", "pg-hstore"]),
    (Orm::Sequelize, Database::Sqlite, &["sequelize", "sqlite3"]),
    (Orm::Typeorm, Database::Mysql, &["typeorm", "mysql2"]),
    (Orm::Typeorm, Database::Postgresql, &["typeorm", "pg"]),
    (Orm::Typeorm, Database::Sqlite, &["typeorm", "sqlite3"]),
];

/// Prisma ships its own engines; the driver is not an npm package
const PRISMA_PACKAGES: &[&str] = &["prisma"];

pub type OrmRoute = (Orm, Database, &'static [&'static str]);

/// Lookup tables queried by the installer
#[derive(Debug, Clone, Copy)]
pub struct PackageTable {
    managers: &'static [(PackageManager, &'static str, &'static str)],
    orm: &'static [OrmRoute],
}

impl PackageTable {
    pub const fn standard() -> Self {
        Self {
            managers: PACKAGE_MANAGER_COMMANDS,
            orm: ORM_PACKAGES,
        }
    }

    /// A table with a custom ORM routing (prisma is always routed)
    pub const fn with_orm_routes(orm: &'static [OrmRoute]) -> Self {
        Self {
            managers: PACKAGE_MANAGER_COMMANDS,
            orm,
        }
    }

    /// Install subcommand and dev-dependency flag for a package manager
    pub fn commands_for(&self, pm: PackageManager) -> (&'static str, &'static str) {
        self.managers
            .iter()
            .find(|(p, _, _)| *p == pm)
            .map(|(_, verb, dev)| (*verb, *dev))
            .unwrap_or(("install", "--save-dev"))
    }

    /// Packages for an (ORM, database) pair
    pub fn orm_packages(&self, orm: Orm, database: Database) -> Result<&'static [&'static str]> {
        if orm == Orm::Prisma {
            return Ok(PRISMA_PACKAGES);
        }

        self.orm
            .iter()
            .find(|(o, d, _)| *o == orm && *d == database)
            .map(|(_, _, packages)| *packages)
            .ok_or_else(|| {
                ScaffoldError::UnsupportedCombination(format!(
                    "ORM '{}' with database '{}'",
                    orm, database
                ))
            })
    }
}

impl Default for PackageTable {
    fn default() -> Self {
        Self::standard()
    }
}
