//! The HTML admin console.
//!
//! Pages are handlebars templates living in an assets directory. Templates
//! are re-read and re-parsed on every request: the console trades
//! per-request cost for never serving a stale template while an operator
//! is editing it. Unknown pages and render failures surface as not-found,
//! matching the rest of the console's 404 behavior.

use std::path::Path;

use handlebars::Handlebars;
use quotaserve_config::ServiceConfig;

use crate::error::AdminError;

/// Template rendered for the console index.
const INDEX_TEMPLATE: &str = "index.html";

/// Render a console page from the templates in `assets_dir`.
///
/// The current configuration (in wire form) is the template data, so pages
/// can iterate namespaces and buckets directly.
pub fn render_console(
    assets_dir: &Path,
    page: &str,
    config: &ServiceConfig,
) -> Result<String, AdminError> {
    let registry = load_templates(assets_dir)?;

    let template = if page.is_empty() { INDEX_TEMPLATE } else { page };
    if !registry.has_template(template) {
        return Err(AdminError::PageNotFound(template.to_owned()));
    }

    registry
        .render(template, &config.to_wire())
        .map_err(|e| AdminError::Render(e.to_string()))
}

/// Read every `.html` file in `assets_dir` into a fresh template registry.
fn load_templates(assets_dir: &Path) -> Result<Handlebars<'static>, AdminError> {
    let mut registry = Handlebars::new();

    let entries = std::fs::read_dir(assets_dir)
        .map_err(|e| AdminError::Render(format!("cannot read {}: {e}", assets_dir.display())))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| AdminError::Render(format!("cannot read {}: {e}", path.display())))?;
        registry
            .register_template_string(name, contents)
            .map_err(|e| AdminError::Render(format!("bad template {name}: {e}")))?;
    }

    Ok(registry)
}
