//! Template store
//!
//! This module provides:
//! - The embedded template set compiled into the binary
//! - Local template directories (with or without a `template.yaml` manifest)
//! - Placeholder rendering (tera) for templates that depend on the layout

pub mod manifest;
pub mod store;

pub use manifest::TemplateManifest;
pub use store::{TemplateSource, TemplateStore, TEMPLATE_DIR_ENV};

use crate::error::{Result, ScaffoldError};
use tera::{Context, Tera};

/// Render `{{ key }}` placeholders in a template with tera
pub fn render(name: &str, content: &[u8], vars: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut context = Context::new();
    for (key, value) in vars {
        context.insert(*key, value);
    }

    let text = String::from_utf8_lossy(content);
    Tera::one_off(&text, &context, false)
        .map(String::into_bytes)
        .map_err(|source| ScaffoldError::TemplateRender {
            name: name.to_string(),
            source,
        })
}
