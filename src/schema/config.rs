use serde::{Deserialize, Serialize};

/// A tree of named settings, as stored in a startup file or a package section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub config_keys: Vec<ConfigKey>,
}

impl Configuration {
    pub fn get(&self, name: &str) -> Option<&ConfigKey> {
        self.config_keys.iter().find(|k| k.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigKey {
    pub name: String,
    pub value: ConfigValue,
}

/// The value of a configuration key.
///
/// Scalar values keep the text they were stored with; booleans are written the way
/// Python prints them (`"True"` / `"False"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConfigValue {
    Bool(String),
    Str(String),
    Int(String),
    Float(String),
    Configuration(Configuration),
}

impl ConfigValue {
    /// The stored text of a scalar value; `None` for a nested configuration.
    pub fn text(&self) -> Option<&str> {
        match self {
            ConfigValue::Bool(s)
            | ConfigValue::Str(s)
            | ConfigValue::Int(s)
            | ConfigValue::Float(s) => Some(s),
            ConfigValue::Configuration(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartupPackage {
    pub name: String,
    pub configuration: Option<Configuration>,
}

/// The application's startup settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Startup {
    pub version: String,
    pub configuration: Option<Configuration>,
    pub enabled_packages: Vec<StartupPackage>,
    pub disabled_packages: Vec<StartupPackage>,
}
