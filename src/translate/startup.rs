//! Migration of startup configuration keys.
//!
//! Many settings were renamed in 1.0.3, a few were dropped and some changed meaning
//! (`nologger` became `executionLog` with the opposite value). The changes are
//! described by a [`RuleTable`] so callers can extend or replace them.

use super::{Translator, check_source_version};
use crate::schema::{ConfigKey, ConfigValue, Configuration, Startup, StartupPackage};
use crate::version::TARGET_VERSION;
use ahash::AHashMap;
use tracing::{debug, trace};

/// A transformation applied to a leaf value whose key has a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueConversion {
    /// `"true"` in any case becomes `"False"`; anything else becomes `"True"`.
    InvertBool,
    /// Keeps the directory part of a path, as Python's `os.path.dirname` does.
    Dirname,
}

impl ValueConversion {
    pub fn apply(&self, value: &ConfigValue) -> ConfigValue {
        let text = value.text().unwrap_or_default();
        match self {
            ValueConversion::InvertBool => {
                let inverted = if text.eq_ignore_ascii_case("true") {
                    "False"
                } else {
                    "True"
                };
                ConfigValue::Bool(inverted.to_string())
            }
            ValueConversion::Dirname => ConfigValue::Str(dirname(text)),
        }
    }
}

/// `os.path.dirname` for POSIX paths: everything before the last `/`, with trailing
/// slashes removed unless the result is made of slashes only.
pub fn dirname(path: &str) -> String {
    let Some(index) = path.rfind('/') else {
        return String::new();
    };
    let head = &path[..=index];
    let trimmed = head.trim_end_matches('/');
    if trimmed.is_empty() {
        head.to_string()
    } else {
        trimmed.to_string()
    }
}

/// What happens to one configuration key.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyRule {
    Rename(String),
    Delete,
    /// Optionally renames the key, converts its value, or migrates its nested
    /// configuration with its own table.
    Rewrite {
        name: Option<String>,
        convert: Option<ValueConversion>,
        inner: Option<RuleTable>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleTable {
    rules: AHashMap<String, KeyRule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, old_name: &str, rule: KeyRule) -> Self {
        self.rules.insert(old_name.to_string(), rule);
        self
    }

    pub fn rename(self, old_name: &str, new_name: &str) -> Self {
        self.with_rule(old_name, KeyRule::Rename(new_name.to_string()))
    }

    pub fn delete(self, old_name: &str) -> Self {
        self.with_rule(old_name, KeyRule::Delete)
    }

    pub fn convert(self, old_name: &str, new_name: &str, convert: ValueConversion) -> Self {
        self.with_rule(
            old_name,
            KeyRule::Rewrite {
                name: Some(new_name.to_string()),
                convert: Some(convert),
                inner: None,
            },
        )
    }

    pub fn nested(self, name: &str, inner: RuleTable) -> Self {
        self.with_rule(
            name,
            KeyRule::Rewrite {
                name: None,
                convert: None,
                inner: Some(inner),
            },
        )
    }

    pub fn get(&self, name: &str) -> Option<&KeyRule> {
        self.rules.get(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The key changes between the 1.0.2 and 1.0.3 startup formats.
    pub fn v1_0_3() -> Self {
        let shell = RuleTable::new()
            .rename("font_face", "fontFace")
            .rename("font_size", "fontSize");

        RuleTable::new()
            .rename("alwaysShowDebugPopup", "showDebugPopups")
            .rename("autosave", "autoSave")
            .rename("errorOnConnectionTypeerror", "showConnectionErrors")
            .rename("errorOnVariantTypeerror", "showVariantErrors")
            .convert("interactiveMode", "batch", ValueConversion::InvertBool)
            .convert("logFile", "logDirectory", ValueConversion::Dirname)
            .delete("logger")
            .delete("maxMemory")
            .delete("minMemory")
            .convert("nologger", "executionLog", ValueConversion::InvertBool)
            .delete("pythonPrompt")
            .delete("reviewMode")
            .nested("shell", shell)
            .delete("showMovies")
            .convert("showSpreadsheetOnly", "showWindow", ValueConversion::InvertBool)
            .rename("spreadsheetDumpCells", "outputDirectory")
            .rename("upgradeOn", "upgrades")
            .rename("useCache", "cache")
            .rename("verbosenessLevel", "debugLevel")
            // The misspelling is the key name 1.0.3 reads.
            .rename("webRepositoryLogin", "webRespositoryUser")
            .rename("evolutionGraph", "withVersionTree")
            .rename("workflowGraph", "withWorkflow")
            .rename("workflowInfo", "outputDirectory")
            .rename("executeWorkflows", "execute")
            .rename("abstractionsDirectory", "subworkflowsDirectory")
    }
}

fn migrate_key(key: &ConfigKey, rules: &RuleTable) -> Option<ConfigKey> {
    let (name, convert, inner) = match rules.get(&key.name) {
        Some(KeyRule::Delete) => {
            trace!(key = %key.name, "dropping configuration key");
            return None;
        }
        Some(KeyRule::Rename(new_name)) => (new_name.as_str(), None, None),
        Some(KeyRule::Rewrite {
            name,
            convert,
            inner,
        }) => (
            name.as_deref().unwrap_or(&key.name),
            *convert,
            inner.as_ref(),
        ),
        None => (key.name.as_str(), None, None),
    };

    let value = match &key.value {
        ConfigValue::Configuration(nested) => {
            ConfigValue::Configuration(migrate_configuration(nested, inner.unwrap_or(rules)))
        }
        scalar => match convert {
            Some(conversion) => conversion.apply(scalar),
            None => scalar.clone(),
        },
    };
    Some(ConfigKey {
        name: name.to_string(),
        value,
    })
}

/// Applies `rules` to every key of `config`, recursing into nested configurations.
///
/// Keys keep their relative order. A nested configuration is migrated with the inner
/// table of its key's rule when there is one, otherwise with `rules` itself.
pub fn migrate_configuration(config: &Configuration, rules: &RuleTable) -> Configuration {
    Configuration {
        config_keys: config
            .config_keys
            .iter()
            .filter_map(|key| migrate_key(key, rules))
            .collect(),
    }
}

fn migrate_packages(packages: &[StartupPackage], rules: &RuleTable) -> Vec<StartupPackage> {
    packages
        .iter()
        .map(|package| StartupPackage {
            name: package.name.clone(),
            configuration: package
                .configuration
                .as_ref()
                .map(|c| migrate_configuration(c, rules)),
        })
        .collect()
}

impl Translator {
    /// Migrates the startup document's configuration and every package configuration
    /// with this translator's rule table.
    pub fn translate_startup(&self, old: &Startup) -> Startup {
        check_source_version("startup", &old.version);
        let rules = &self.startup_rules;
        let startup = Startup {
            version: TARGET_VERSION.to_string(),
            configuration: old
                .configuration
                .as_ref()
                .map(|c| migrate_configuration(c, rules)),
            enabled_packages: migrate_packages(&old.enabled_packages, rules),
            disabled_packages: migrate_packages(&old.disabled_packages, rules),
        };
        debug!(
            keys = startup
                .configuration
                .as_ref()
                .map_or(0, |c| c.config_keys.len()),
            "translated startup configuration"
        );
        startup
    }
}
