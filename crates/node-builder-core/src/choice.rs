//! Operator selections for a single run

use crate::error::{Result, ScaffoldError};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Minimum length of a project name other than `.`
pub const MIN_NAME_LEN: usize = 3;

/// Declares an allow-listed selection enum with its canonical spelling,
/// display name and documentation link.
macro_rules! selection {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => ($key:literal, $display:literal, $url:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every allowed value, in prompt order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical lowercase key (also the npm package or template suffix)
            pub fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn display_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $display),+
                }
            }

            /// Documentation link used in the generated README
            pub fn docs_url(&self) -> &'static str {
                match self {
                    $($name::$variant => $url),+
                }
            }

            fn lookup(s: &str) -> Option<Self> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key().eq_ignore_ascii_case(wanted))
            }

            fn allowed() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.key())
                    .collect::<Vec<_>>()
                    .join(", ")
            }

            const FIELD: &'static str = $field;
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.key())
            }
        }
    };
}

selection!(
    /// Package manager used for every install step
    PackageManager, "package manager" {
        Npm => ("npm", "npm", "https://docs.npmjs.com/"),
        Yarn => ("yarn", "Yarn", "https://yarnpkg.com/"),
        Pnpm => ("pnpm", "pnpm", "https://pnpm.io/"),
        Bun => ("bun", "Bun", "https://bun.sh/"),
    }
);

selection!(
    /// Web framework installed as a runtime dependency
    Framework, "framework" {
        Express => ("express", "Express", "https://expressjs.com/"),
        Fastify => ("fastify", "Fastify", "https://www.fastify.io/"),
    }
);

selection!(
    Database, "database" {
        Mysql => ("mysql", "MySQL", "https://www.mysql.com/"),
        Postgresql => ("postgresql", "PostgreSQL", "https://www.postgresql.org/"),
        Sqlite => ("sqlite", "SQLite", "https://www.sqlite.org/"),
    }
);

selection!(
    Orm, "ORM" {
        Prisma => ("prisma", "Prisma", "https://www.prisma.io/"),
        Drizzle => ("drizzle", "Drizzle", "https://github.com/drizzle-team/drizzle-orm"),
        Typeorm => ("typeorm", "TypeORM", "https://typeorm.io/"),
        Sequelize => ("sequelize", "Sequelize", "https://sequelize.org/"),
    }
);

impl FromStr for PackageManager {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| invalid(Self::FIELD, s, &Self::allowed()))
    }
}

impl FromStr for Framework {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| invalid(Self::FIELD, s, &Self::allowed()))
    }
}

impl FromStr for Database {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| invalid(Self::FIELD, s, &Self::allowed()))
    }
}

impl FromStr for Orm {
    type Err = ScaffoldError;

    /// An ORM nobody can route packages or config for is an unsupported
    /// combination rather than a typo-level input error.
    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| {
            ScaffoldError::UnsupportedCombination(format!(
                "{} '{}' (supported: {})",
                Self::FIELD,
                s.trim(),
                Self::allowed()
            ))
        })
    }
}

impl Database {
    /// Value of the `type` option in a TypeORM `DataSource`
    pub fn typeorm_driver(&self) -> &'static str {
        match self {
            Database::Mysql => "mysql",
            Database::Postgresql => "postgres",
            Database::Sqlite => "sqlite",
        }
    }
}

fn invalid(field: &'static str, value: &str, allowed: &str) -> ScaffoldError {
    ScaffoldError::InvalidInput {
        field,
        reason: format!("'{}' is not one of: {}", value.trim(), allowed),
    }
}

/// Target of the run: the current directory or a new named directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectName {
    CurrentDir,
    Named(String),
}

impl ProjectName {
    /// Name written into README and package.json.
    /// For `.` this is the last component of `root`.
    pub fn resolve(&self, root: &Path) -> String {
        match self {
            ProjectName::Named(name) => name.clone(),
            ProjectName::CurrentDir => root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "app".to_string()),
        }
    }
}

impl FromStr for ProjectName {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        validate_project_name(s)?;
        if s == "." {
            Ok(ProjectName::CurrentDir)
        } else {
            Ok(ProjectName::Named(s.to_string()))
        }
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectName::CurrentDir => write!(f, "."),
            ProjectName::Named(name) => write!(f, "{}", name),
        }
    }
}

/// `.` or at least [`MIN_NAME_LEN`] characters
pub fn validate_project_name(input: &str) -> Result<()> {
    if input == "." || input.chars().count() >= MIN_NAME_LEN {
        return Ok(());
    }
    Err(ScaffoldError::InvalidInput {
        field: "project name",
        reason: format!("must be '.' or at least {} characters", MIN_NAME_LEN),
    })
}

/// The validated, immutable record of every selection for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectChoice {
    pub name: ProjectName,
    pub package_manager: PackageManager,
    pub framework: Framework,
    pub database: Database,
    pub orm: Orm,
    pub use_lint: bool,
    /// TypeORM `synchronize` option; ignored for other ORMs
    pub synchronize: bool,
}

impl ProjectChoice {
    pub fn new(
        name: ProjectName,
        package_manager: PackageManager,
        framework: Framework,
        database: Database,
        orm: Orm,
    ) -> Self {
        Self {
            name,
            package_manager,
            framework,
            database,
            orm,
            use_lint: false,
            synchronize: false,
        }
    }

    pub fn with_lint(mut self, use_lint: bool) -> Self {
        self.use_lint = use_lint;
        self
    }

    pub fn with_synchronize(mut self, synchronize: bool) -> Self {
        self.synchronize = synchronize;
        self
    }
}

/// Use a preset value when it parses, otherwise fall back to `prompt`.
///
/// A preset that fails validation is handed to `on_invalid` (for a warning)
/// and the operator is asked instead; an invalid value never passes through.
pub fn preset_or_prompt<T, P, W>(preset: Option<&str>, on_invalid: W, prompt: P) -> Result<T>
where
    T: FromStr<Err = ScaffoldError>,
    P: FnOnce() -> Result<T>,
    W: FnOnce(&ScaffoldError) -> Result<()>,
{
    if let Some(raw) = preset {
        match raw.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(e) => on_invalid(&e)?,
        }
    }
    prompt()
}
