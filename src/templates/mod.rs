//! Stored search-template registration.
//!
//! A template file is JSON of the form
//!
//! ```json
//! { "templates": { "exclusion_search": { "description": "...", "template": { ... } } } }
//! ```
//!
//! Each template is registered as a mustache stored script under its id,
//! replacing any existing script with that id. The search modes depend on
//! these ids, so [`missing_templates`] reports the ones a file leaves out.

use crate::client::ScriptStore;
use crate::model::{SearchError, SearchMode};
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{error, info};

// `{{name}}` mustache placeholder.
static PLACEHOLDER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").ok());

/// Errors while reading or registering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("Failed to read template file {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The template file is not valid template JSON.
    #[error("Invalid template file {path}: {reason}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// The search service rejected a delete or create.
    #[error("Failed to register template {id}: {source}")]
    Register {
        /// Template id being registered.
        id: String,
        /// Service error.
        #[source]
        source: SearchError,
    },
}

/// Contents of a template file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateFile {
    /// Template definitions keyed by stored-script id.
    pub templates: BTreeMap<String, TemplateDef>,
}

/// One search template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateDef {
    /// Free-form description; not sent to the service.
    #[serde(default)]
    pub description: Option<String>,
    /// Query body with `{{param}}` placeholders.
    pub template: Value,
}

/// Outcome of registering one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    /// Stored-script id.
    pub id: String,
    /// Whether an older script with this id was deleted first.
    pub replaced: bool,
}

impl TemplateFile {
    /// Parse template JSON.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Read and parse a template file.
pub fn load_template_file(path: &Path) -> Result<TemplateFile, TemplateError> {
    let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    TemplateFile::from_json(&text).map_err(|e| TemplateError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Placeholder names used in `template`, each mapped to `null`.
pub fn extract_params(template: &Value) -> BTreeMap<String, Value> {
    let text = template.to_string();
    PLACEHOLDER
        .iter()
        .flat_map(|pattern| pattern.captures_iter(&text))
        .map(|caps| (caps[1].to_string(), Value::Null))
        .collect()
}

/// Stored-script body for one template.
///
/// The service expects the mustache source as a string, not an object.
pub fn script_body(def: &TemplateDef) -> Value {
    json!({
        "script": {
            "lang": "mustache",
            "source": def.template.to_string(),
            "params": extract_params(&def.template),
        }
    })
}

/// Template ids the search modes need that `file` does not define.
pub fn missing_templates(file: &TemplateFile) -> Vec<&'static str> {
    SearchMode::ALL
        .iter()
        .map(|mode| mode.template_id())
        .filter(|id| !file.templates.contains_key(*id))
        .collect()
}

/// Delete then re-create every template in `file`, in id order.
///
/// Stops at the first failure; templates registered before it stay.
pub fn register_templates(
    store: &dyn ScriptStore,
    file: &TemplateFile,
) -> Result<Vec<Registered>, TemplateError> {
    let mut registered = Vec::with_capacity(file.templates.len());
    for (id, def) in &file.templates {
        let outcome = store
            .delete_script(id)
            .and_then(|replaced| store.put_script(id, &script_body(def)).map(|()| replaced));
        match outcome {
            Ok(replaced) => {
                info!(template = %id, replaced, "Registered search template");
                registered.push(Registered {
                    id: id.clone(),
                    replaced,
                });
            }
            Err(source) => {
                error!(template = %id, error = %source, "Failed to register search template");
                return Err(TemplateError::Register {
                    id: id.clone(),
                    source,
                });
            }
        }
    }
    Ok(registered)
}

#[cfg(test)]
#[path = "templates_tests.rs"]
mod tests;
