// Language registry: the closed, ordered set of languages a run can select from

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ConfigError, Result};

use super::builtin::builtin_descriptors;
use super::descriptor::LanguageDescriptor;

static BUILTIN: Lazy<LanguageRegistry> =
    Lazy::new(|| LanguageRegistry::new(builtin_descriptors()));

/// Ordered, read-only collection of language descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LanguageRegistry {
    languages: Vec<LanguageDescriptor>,
}

impl LanguageRegistry {
    pub fn new(languages: Vec<LanguageDescriptor>) -> Self {
        Self { languages }
    }

    /// The built-in table, constructed once per process
    pub fn builtin() -> &'static LanguageRegistry {
        &BUILTIN
    }

    /// Load and validate a registry from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let registry = Self::from_yaml_str(&content).map_err(|e| match e {
            crate::error::CheckError::Config(config_err) => match *config_err {
                ConfigError::InvalidYaml {
                    message,
                    line,
                    column,
                    ..
                } => ConfigError::InvalidYaml {
                    message,
                    line,
                    column,
                    file_path: Some(path.to_path_buf()),
                }
                .into(),
                other => other.into(),
            },
            other => other,
        })?;

        tracing::debug!(
            path = %path.display(),
            languages = registry.len(),
            "Loaded language registry"
        );
        Ok(registry)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let registry: Self = serde_yaml::from_str(content).map_err(Box::<ConfigError>::from)?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ConfigError::InvalidRegistry {
                message: "no languages defined".to_string(),
                language: None,
            }
            .into());
        }

        let mut seen = HashSet::new();
        for language in &self.languages {
            language.validate()?;
            if !seen.insert(language.id.as_str()) {
                return Err(ConfigError::InvalidRegistry {
                    message: format!("duplicate language id '{}'", language.id),
                    language: Some(language.id.clone()),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&LanguageDescriptor> {
        self.languages.iter().find(|l| l.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.languages.iter().map(|l| l.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageDescriptor> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
