//! Product equations: one feature per line.

use std::path::{Path, PathBuf};

use ape_util::errors::ApeError;
use ape_util::fs::read_file;

pub const EQUATION_FILE: &str = "product.equation";
pub const EQUATION_CONFIG_FILE: &str = "product.equation.config";

/// `<container>/products/<product>/product.equation`
pub fn equation_path(container_dir: &Path, product: &str) -> PathBuf {
    container_dir
        .join(crate::container::PRODUCTS_DIR)
        .join(product)
        .join(EQUATION_FILE)
}

/// Parse equation text: trimmed lines, without blank lines and `#` comments.
pub fn parse_equation(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_equation(path: &Path) -> Result<Vec<String>, ApeError> {
    Ok(parse_equation(&read_file(path)?))
}

/// Prepare raw lines for ordering: trimmed, without blank lines, comments
/// and `_`-prefixed entries.
pub fn feature_selection<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty() && !line.starts_with('_') && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Translate one FeatureIDE configuration line to an equation entry.
///
/// FeatureIDE cannot use `.` in feature names, so sub-feature paths are
/// spelled with `__` (`django_productline__features__development`). A line
/// with two or more `__` separators is translated back to dotted form.
/// Abstract features have no implementation and yield `None`.
pub fn transform_config_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.starts_with("abstract_") {
        return None;
    }
    if line.split("__").count() <= 2 {
        Some(line.to_string())
    } else {
        Some(line.replace("__", "."))
    }
}

/// Translate the contents of a `product.equation.config` file.
pub fn config_to_features(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(transform_config_line)
        .filter(|feature| !feature.is_empty())
        .collect()
}

/// Render features as equation text, one per line.
pub fn render_equation<S: AsRef<str>>(features: &[S]) -> String {
    let mut out = String::new();
    for feature in features {
        out.push_str(feature.as_ref());
        out.push('\n');
    }
    out
}

pub fn write_equation<S: AsRef<str>>(path: &Path, features: &[S]) -> Result<(), ApeError> {
    if let Some(parent) = path.parent() {
        ape_util::fs::ensure_dir(parent)?;
    }
    std::fs::write(path, render_equation(features))?;
    Ok(())
}
