//! JSON data loader
//!
//! Loads game data from the JSON files in the data directory, with fallback
//! to hardcoded defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ammo::{default_ammunition_types, AmmoRegistry, AmmunitionType};
use super::items::{default_item_templates, AmmoTemplate, ArmorTemplate, ItemTemplates};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate ammunition type: {0}")]
    DuplicateAmmo(String),
    #[error("duplicate item template: {0}")]
    DuplicateItem(String),
    #[error("inconsistent ammunition types: {}", .0.join("; "))]
    Inconsistent(Vec<String>),
}

/// One entry of a data file, dispatched on its "type" field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Definition {
    #[serde(rename = "ammunition_type")]
    AmmunitionType(AmmunitionType),
    #[serde(rename = "ARMOR")]
    Armor(ArmorTemplate),
    #[serde(rename = "AMMO")]
    Ammo(AmmoTemplate),
}

const KNOWN_TYPES: [&str; 3] = ["ammunition_type", "ARMOR", "AMMO"];

/// Manages all external game data
#[derive(Debug, Clone)]
pub struct DataManager {
    pub ammo: AmmoRegistry,
    pub items: ItemTemplates,
    /// Directory this data came from; `None` for built-in data
    source: Option<PathBuf>,
}

impl DataManager {
    /// Load from `dir`, falling back to built-in data on failure
    pub fn new(dir: &Path) -> Self {
        Self::load(dir).unwrap_or_else(|e| {
            log::warn!("Failed to load data files: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Load every `*.json` file in `dir`, in file name order
    pub fn load(dir: &Path) -> Result<Self, DataError> {
        let io_err = |source| DataError::Io { path: dir.to_path_buf(), source };

        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        let mut defs = Vec::new();
        for path in &files {
            let content = fs::read_to_string(path).map_err(|source| DataError::Io {
                path: path.clone(),
                source,
            })?;
            defs.extend(parse_definitions(&content, &path.display().to_string())?);
        }

        let mut manager = Self::from_definitions(defs)?;
        manager.source = Some(dir.to_path_buf());
        log::info!(
            "Loaded {} ammunition types and {} item templates from {} files in {}",
            manager.ammo.len(),
            manager.items.len(),
            files.len(),
            dir.display()
        );
        Ok(manager)
    }

    /// Load from a single JSON document
    pub fn from_json_str(content: &str) -> Result<Self, DataError> {
        Self::from_definitions(parse_definitions(content, "<string>")?)
    }

    pub fn from_definitions(defs: impl IntoIterator<Item = Definition>) -> Result<Self, DataError> {
        let mut ammo_types = Vec::new();
        let mut items = ItemTemplates::default();

        for def in defs {
            match def {
                Definition::AmmunitionType(at) => ammo_types.push(at),
                Definition::Armor(t) => {
                    if items.contains(&t.id) {
                        return Err(DataError::DuplicateItem(t.id));
                    }
                    items.armor.push(t);
                }
                Definition::Ammo(t) => {
                    if items.contains(&t.id) {
                        return Err(DataError::DuplicateItem(t.id));
                    }
                    items.ammo.push(t);
                }
            }
        }

        Ok(Self {
            ammo: AmmoRegistry::from_definitions(ammo_types)?,
            items,
            source: None,
        })
    }

    /// Build a fresh manager from the same source
    pub fn reload(&self) -> Result<Self, DataError> {
        match &self.source {
            Some(dir) => Self::load(dir),
            None => Ok(Self::default()),
        }
    }

    /// Every ammunition type's default ammo must exist and match it
    pub fn check_consistency(&self) -> Result<(), DataError> {
        let problems = self.ammo.check_consistency(&self.items);
        if problems.is_empty() {
            Ok(())
        } else {
            for problem in &problems {
                log::error!("{}", problem);
            }
            Err(DataError::Inconsistent(problems))
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// All loaded data as definitions
    pub fn definitions(&self) -> Vec<Definition> {
        self.ammo
            .iter()
            .cloned()
            .map(Definition::AmmunitionType)
            .chain(self.items.armor.iter().cloned().map(Definition::Armor))
            .chain(self.items.ammo.iter().cloned().map(Definition::Ammo))
            .collect()
    }
}

impl Default for DataManager {
    fn default() -> Self {
        let items = default_item_templates();
        let ammo = AmmoRegistry::from_definitions(default_ammunition_types()).unwrap_or_else(|e| {
            log::error!("Built-in ammunition types are invalid: {}", e);
            AmmoRegistry::default()
        });
        Self { ammo, items, source: None }
    }
}

/// Parse a JSON array of definitions. Entries of unknown type are skipped.
fn parse_definitions(content: &str, origin: &str) -> Result<Vec<Definition>, DataError> {
    let json_err = |source| DataError::Json { origin: origin.to_string(), source };
    let values: Vec<serde_json::Value> = serde_json::from_str(content).map_err(json_err)?;

    let mut defs = Vec::with_capacity(values.len());
    for value in values {
        let kind = value.get("type").and_then(|t| t.as_str()).unwrap_or_default();
        if !KNOWN_TYPES.contains(&kind) {
            log::debug!("Skipping definition of type {:?} in {}", kind, origin);
            continue;
        }
        defs.push(serde_json::from_value(value).map_err(json_err)?);
    }
    Ok(defs)
}

/// Write the built-in data to `dir` as JSON (one file per kind)
pub fn export_default_data(dir: &Path) -> Result<(), DataError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| DataError::Io { path, source }
    };
    fs::create_dir_all(dir).map_err(io_err(dir))?;

    let defaults = DataManager::default();
    let defs = defaults.definitions();
    let files: [(&str, fn(&Definition) -> bool); 3] = [
        ("ammunition_types.json", |d| matches!(d, Definition::AmmunitionType(_))),
        ("ammo.json", |d| matches!(d, Definition::Ammo(_))),
        ("clothing.json", |d| matches!(d, Definition::Armor(_))),
    ];

    for (name, belongs) in files {
        let subset: Vec<&Definition> = defs.iter().filter(|d| belongs(d)).collect();
        let json = serde_json::to_string_pretty(&subset).map_err(|source| DataError::Json {
            origin: name.to_string(),
            source,
        })?;
        let path = dir.join(name);
        fs::write(&path, json).map_err(io_err(&path))?;
    }

    log::info!("Exported default data to {}", dir.display());
    Ok(())
}
