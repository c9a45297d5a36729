//! README.md for the generated project

use super::Layout;
use crate::choice::ProjectChoice;

/// `sources` are the files present under the source directory, relative to
/// it with `/` separators (`main.ts`, `config/db.ts`, ...).
pub fn render(choice: &ProjectChoice, project: &str, layout: Layout, sources: &[String]) -> String {
    let pm = choice.package_manager.key();
    let tree = structure_tree(choice, project, layout, sources);

    format!(
        r#"# {project}

This project was generated with node-builder.

## Quick Start

### Prerequisites

- Node.js (version 14 or higher)
- {pm} (package manager)

### Installation

1. Install dependencies:
   ```bash
   {pm} install
   ```

2. Set up your environment variables in `.env`.

### Running the Application

```bash
{pm} run dev
```

The application will be available at `http://localhost:5000` (or the port set in `PORT`).

## Project Structure

```
{tree}```

## Built With

- [Node.js](https://nodejs.org/)
- [{framework}]({framework_url}) - Web framework
- [{database}]({database_url}) - Database
- [{orm}]({orm_url}) - ORM

## License

This project is licensed under the MIT License.
"#,
        project = project,
        pm = pm,
        tree = tree,
        framework = choice.framework.display_name(),
        framework_url = choice.framework.docs_url(),
        database = choice.database.display_name(),
        database_url = choice.database.docs_url(),
        orm = choice.orm.display_name(),
        orm_url = choice.orm.docs_url(),
    )
}

struct Node {
    name: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }
}

fn structure_tree(choice: &ProjectChoice, project: &str, layout: Layout, sources: &[String]) -> String {
    let mut source_nodes: Vec<Node> = super::folders_for(choice.orm)
        .into_iter()
        .map(|folder| Node {
            name: format!("{}/", folder),
            children: sources
                .iter()
                .filter_map(|s| s.strip_prefix(folder)?.strip_prefix('/'))
                .map(Node::leaf)
                .collect(),
        })
        .collect();
    source_nodes.extend(
        sources
            .iter()
            .filter(|s| !s.contains('/'))
            .map(|s| Node::leaf(s)),
    );

    let mut nodes = match layout {
        Layout::Src => vec![Node {
            name: "src/".to_string(),
            children: source_nodes,
        }],
        Layout::Flat => source_nodes,
    };
    nodes.extend([".env", ".gitignore", "README.md", "package.json"].map(Node::leaf));

    let mut lines = vec![format!("{}/", project)];
    draw(&mut lines, "", &nodes);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn draw(lines: &mut Vec<String>, indent: &str, nodes: &[Node]) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let (branch, nested) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        lines.push(format!("{}{}{}", indent, branch, node.name));
        draw(lines, &format!("{}{}", indent, nested), &node.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{Database, Framework, Orm, PackageManager, ProjectName};

    fn choice() -> ProjectChoice {
        with_orm(Orm::Drizzle)
    }

    fn with_orm(orm: Orm) -> ProjectChoice {
        ProjectChoice::new(
            ProjectName::Named("myapp".to_string()),
            PackageManager::Pnpm,
            Framework::Fastify,
            Database::Postgresql,
            orm,
        )
    }

    fn sources(files: &[&str]) -> Vec<String> {
        files.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_readme_mentions_selections() {
        let readme = render(&choice(), "myapp", Layout::Src, &sources(&["main.ts"]));
        assert!(readme.starts_with("# myapp\n"));
        assert!(readme.contains("pnpm run dev"));
        assert!(readme.contains("[Fastify](https://www.fastify.io/)"));
        assert!(readme.contains("[PostgreSQL](https://www.postgresql.org/)"));
        assert!(readme.contains("[Drizzle](https://github.com/drizzle-team/drizzle-orm)"));
    }

    #[test]
    fn test_tree_follows_layout() {
        let files = sources(&["main.ts"]);
        let src = render(&choice(), "myapp", Layout::Src, &files);
        assert!(src.contains("├── src/"));
        assert!(src.contains("│   ├── controllers/"));
        assert!(src.contains("│   └── main.ts"));

        let flat = render(&choice(), "myapp", Layout::Flat, &files);
        assert!(!flat.contains("src/"));
        assert!(flat.contains("├── controllers/"));
        assert!(flat.contains("├── main.ts"));
    }

    #[test]
    fn test_tree_lists_only_present_sources() {
        let readme = render(&choice(), "myapp", Layout::Src, &[]);
        assert!(!readme.contains("main.ts"));
        assert!(readme.contains("│   └── config/"));
    }

    #[test]
    fn test_tree_shows_orm_config() {
        let drizzle = render(
            &choice(),
            "myapp",
            Layout::Src,
            &sources(&["main.ts", "config/db.ts"]),
        );
        assert!(drizzle.contains("│   ├── config/\n│   │   └── db.ts\n│   └── main.ts"));

        let typeorm = render(
            &with_orm(Orm::Typeorm),
            "myapp",
            Layout::Flat,
            &sources(&["main.ts", "data-source.ts"]),
        );
        assert!(typeorm.contains("├── subscribers/"));
        assert!(typeorm.contains("├── main.ts\n├── data-source.ts\n├── .env"));
        assert!(typeorm.contains("└── package.json\n```"));
    }
}
