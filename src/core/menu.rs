//! # Menu Tree
//!
//! The static navigation structure, loaded once from a JSON document:
//!
//! ```text
//! { "menu": [ { "id": 1, "label": "Users", "action": "user.List",
//!               "subMenu": [ ... ] } ] }
//! ```
//!
//! A tree is only ever built through [`MenuTree::new`], [`MenuTree::from_json`]
//! or [`load_menu`], all of which validate it. Ids are unique per sibling list
//! and `0` is reserved for "go back" below the root.

use log::{debug, info};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::core::config::ConfigError;

/// Selection key of the synthetic "go back" option in submenus.
pub const BACK_ID: i64 = 0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuEntry {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, rename = "subMenu")]
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            action: None,
            children: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuEntry>) -> Self {
        self.children = children;
        self
    }

    /// The bound action name, if present and non-empty.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref().filter(|name| !name.is_empty())
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Shape of the menu document on disk.
#[derive(Deserialize)]
struct MenuDocument {
    menu: Vec<MenuEntry>,
}

/// Validated, read-only menu hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuTree {
    entries: Vec<MenuEntry>,
}

impl MenuTree {
    pub fn new(entries: Vec<MenuEntry>) -> Result<Self, ConfigError> {
        validate_level(&entries, &[])?;
        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let document: MenuDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::new(document.menu)
    }

    /// Root-level entries in declared order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Every non-empty action name referenced anywhere in the tree, depth-first.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut pending: Vec<&MenuEntry> = self.entries.iter().rev().collect();
        while let Some(entry) = pending.pop() {
            if let Some(name) = entry.action() {
                names.push(name);
            }
            pending.extend(entry.children.iter().rev());
        }
        names
    }
}

/// Checks one sibling list, then recurses into each child list.
/// `path` holds the labels leading to this level, for error messages.
fn validate_level(entries: &[MenuEntry], path: &[&str]) -> Result<(), ConfigError> {
    let location = if path.is_empty() {
        "root menu".to_string()
    } else {
        format!("submenu '{}'", path.join(" > "))
    };

    let mut seen = HashSet::new();
    for entry in entries {
        if !path.is_empty() && entry.id == BACK_ID {
            return Err(ConfigError::Invalid(format!(
                "{location}: entry '{}' uses id {BACK_ID}, which is reserved for going back",
                entry.label
            )));
        }
        if !seen.insert(entry.id) {
            return Err(ConfigError::Invalid(format!(
                "{location}: duplicate id {} (entry '{}')",
                entry.id, entry.label
            )));
        }
    }

    for entry in entries.iter().filter(|e| e.has_children()) {
        let mut child_path = path.to_vec();
        child_path.push(&entry.label);
        validate_level(&entry.children, &child_path)?;
    }
    Ok(())
}

/// Load and validate the menu document at `path`.
pub fn load_menu(path: &Path) -> Result<MenuTree, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let tree = MenuTree::from_json(&contents)?;
    info!(
        "Loaded menu from {} ({} root entries)",
        path.display(),
        tree.entries().len()
    );
    debug!("Menu: {:?}", tree);
    Ok(tree)
}
