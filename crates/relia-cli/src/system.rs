//! System description files.
//!
//! A system file is a serialized [`HardwareTree`]: the root ID plus a flat
//! list of nodes with their parent, children, attributes and allocation
//! records. Files ending in `.json` are JSON; anything else is TOML.

use crate::error::Result;
use relia_domain::HardwareTree;
use std::fs;
use std::path::Path;
use tracing::debug;

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a system file.
///
/// The tree is not validated here; broken links are reported by the
/// commands that walk it.
pub fn load_system(path: &Path) -> Result<HardwareTree> {
    let contents = fs::read_to_string(path)?;
    let tree: HardwareTree = if is_json(path) {
        serde_json::from_str(&contents)?
    } else {
        toml::from_str(&contents)?
    };
    debug!(path = %path.display(), nodes = tree.len(), "system loaded");
    Ok(tree)
}

/// Write a system file in the format its extension names.
pub fn save_system(path: &Path, tree: &HardwareTree) -> Result<()> {
    let contents = if is_json(path) {
        serde_json::to_string_pretty(tree)?
    } else {
        toml::to_string_pretty(tree)?
    };
    fs::write(path, contents)?;
    debug!(path = %path.display(), nodes = tree.len(), "system saved");
    Ok(())
}
