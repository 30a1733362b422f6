use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gitflow-release.toml";

/// Config file looked up in the user config directory
pub const USER_CONFIG_FILE_NAME: &str = ".gitflow-release.toml";

/// Represents the complete configuration for gitflow-release.
///
/// Contains git-flow branch prefixes, git-flow command flags, the ordered
/// branch policy set, and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gitflow: GitflowConfig,

    #[serde(default = "default_command_args")]
    pub command_args: BTreeMap<String, CommandArgsConfig>,

    #[serde(default = "default_policyset")]
    pub policyset: PolicySetConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gitflow: GitflowConfig::default(),
            command_args: default_command_args(),
            policyset: default_policyset(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Git-flow branch naming, as set up by `git flow init`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GitflowConfig {
    pub master: String,
    pub develop: String,
    pub feature: String,
    pub release: String,
    pub hotfix: String,
    pub support: String,
    /// Prefix of version tags, e.g. `v`
    pub version_tag: String,
}

impl Default for GitflowConfig {
    fn default() -> Self {
        GitflowConfig {
            master: "master".to_string(),
            develop: "develop".to_string(),
            feature: "feature/".to_string(),
            release: "release/".to_string(),
            hotfix: "hotfix/".to_string(),
            support: "support/".to_string(),
            version_tag: String::new(),
        }
    }
}

/// Flags passed to `git flow <kind> start|finish`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct CommandArgsConfig {
    #[serde(default)]
    pub start: BTreeMap<String, FlagValue>,

    #[serde(default)]
    pub finish: BTreeMap<String, FlagValue>,
}

/// A git-flow flag: `true` enables `-X`, a non-empty string gives `-X value`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FlagValue {
    Switch(bool),
    Value(String),
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Non-interactive mode: take the first candidate and dist-tag
    #[serde(default)]
    pub ci: bool,
}

/// Branch patterns mapped to release policies, in declaration order.
///
/// Resolution is first-match-wins, so specific patterns (`feature/*`) must
/// be declared before generic ones (`*`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicySetConfig {
    entries: Vec<(String, PolicyEntries)>,
}

impl PolicySetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pattern; later patterns have lower priority
    pub fn push(&mut self, pattern: impl Into<String>, policies: PolicyEntries) {
        self.entries.push((pattern.into(), policies));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PolicyEntries)> {
        self.entries.iter().map(|(p, e)| (p.as_str(), e))
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.entries.iter().map(|(p, _)| p.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for PolicySetConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PolicySetVisitor;

        impl<'de> Visitor<'de> for PolicySetVisitor {
            type Value = PolicySetConfig;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of branch patterns to release policies")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut policyset = PolicySetConfig::new();
                while let Some((pattern, policies)) = map.next_entry::<String, PolicyEntries>()? {
                    policyset.push(pattern, policies);
                }
                Ok(policyset)
            }
        }

        deserializer.deserialize_map(PolicySetVisitor)
    }
}

impl Serialize for PolicySetConfig {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|(p, e)| (p, e)))
    }
}

/// The policies configured for one pattern: a single entry or a list.
///
/// Anything else is kept as raw TOML so it can be reported as a malformed
/// policy instead of a parse failure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PolicyEntries {
    Many(Vec<PolicyEntry>),
    One(PolicyEntry),
    Invalid(toml::Value),
}

impl From<PolicyEntry> for PolicyEntries {
    fn from(entry: PolicyEntry) -> Self {
        PolicyEntries::One(entry)
    }
}

/// A policy entry as written in configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PolicyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<PrereleaseField>,

    #[serde(default, alias = "npm_tags", skip_serializing_if = "Option::is_none")]
    pub npm_tags: Option<Vec<String>>,

    #[serde(default, alias = "finish_args", skip_serializing_if = "Option::is_none")]
    pub finish_args: Option<String>,
}

impl PolicyEntry {
    /// A final release entry
    pub fn release() -> Self {
        PolicyEntry {
            release: Some(true),
            ..Default::default()
        }
    }

    /// A prerelease entry with one or more identifier templates
    pub fn prerelease(items: Vec<PrereleaseItem>) -> Self {
        PolicyEntry {
            prerelease: Some(PrereleaseField::Many(items)),
            ..Default::default()
        }
    }
}

/// `prerelease = "beta"`, `prerelease = { name = "beta" }` or a list of those
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PrereleaseField {
    Many(Vec<PrereleaseItem>),
    One(PrereleaseItem),
}

impl PrereleaseField {
    pub fn items(&self) -> &[PrereleaseItem] {
        match self {
            PrereleaseField::Many(items) => items,
            PrereleaseField::One(item) => std::slice::from_ref(item),
        }
    }
}

/// One prerelease identifier template with optional metadata overrides
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PrereleaseItem {
    Name(String),
    Detailed(PrereleaseDetail),
    Invalid(toml::Value),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PrereleaseDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, alias = "npm_tags", skip_serializing_if = "Option::is_none")]
    pub npm_tags: Option<Vec<String>>,

    #[serde(default, alias = "finish_args", skip_serializing_if = "Option::is_none")]
    pub finish_args: Option<String>,
}

impl PrereleaseItem {
    pub fn name(name: impl Into<String>) -> Self {
        PrereleaseItem::Name(name.into())
    }

    pub fn tagged(name: impl Into<String>, npm_tags: &[&str]) -> Self {
        PrereleaseItem::Detailed(PrereleaseDetail {
            name: Some(name.into()),
            npm_tags: Some(npm_tags.iter().map(|t| t.to_string()).collect()),
            finish_args: None,
        })
    }
}

fn switch(on: bool) -> FlagValue {
    FlagValue::Switch(on)
}

fn flags(pairs: &[(&str, FlagValue)]) -> BTreeMap<String, FlagValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Returns the default git-flow command flags.
fn default_command_args() -> BTreeMap<String, CommandArgsConfig> {
    let empty = || FlagValue::Value(String::new());
    let mut args = BTreeMap::new();
    args.insert(
        "feature".to_string(),
        CommandArgsConfig {
            start: flags(&[("F", switch(false))]),
            finish: flags(&[("F", switch(false)), ("r", switch(true)), ("k", switch(false))]),
        },
    );
    args.insert(
        "release".to_string(),
        CommandArgsConfig {
            start: flags(&[("F", switch(false))]),
            finish: flags(&[
                ("F", switch(false)),
                ("s", switch(false)),
                ("u", empty()),
                ("m", empty()),
                ("p", switch(true)),
                ("k", switch(false)),
                ("n", switch(false)),
            ]),
        },
    );
    args.insert(
        "hotfix".to_string(),
        CommandArgsConfig {
            start: flags(&[("F", switch(false))]),
            finish: flags(&[
                ("F", switch(false)),
                ("s", switch(false)),
                ("u", empty()),
                ("m", empty()),
                ("p", switch(false)),
                ("k", switch(false)),
                ("n", switch(false)),
            ]),
        },
    );
    args.insert(
        "support".to_string(),
        CommandArgsConfig {
            start: flags(&[("F", switch(false))]),
            finish: BTreeMap::new(),
        },
    );
    args
}

/// Returns the default policy set.
///
/// Final releases come from the production branches, `develop` publishes
/// alpha and per-commit builds, feature branches publish builds named after
/// the feature, release and hotfix branches go through beta and rc.
fn default_policyset() -> PolicySetConfig {
    let next = &["alpha", "next"];
    let mut policyset = PolicySetConfig::new();

    policyset.push("master", PolicyEntry::release().into());
    policyset.push("main", PolicyEntry::release().into());
    policyset.push(
        "develop",
        PolicyEntry::prerelease(vec![
            PrereleaseItem::tagged("alpha", next),
            PrereleaseItem::name("%h"),
        ])
        .into(),
    );
    policyset.push(
        "feature/*",
        PolicyEntry {
            npm_tags: Some(next.iter().map(|t| t.to_string()).collect()),
            finish_args: Some("rFk".to_string()),
            ..PolicyEntry::prerelease(vec![
                PrereleaseItem::name("%r"),
                PrereleaseItem::tagged("experimental-%h", next),
            ])
        }
        .into(),
    );
    for pattern in ["release/*", "hotfix/*"] {
        policyset.push(
            pattern,
            PolicyEntry::prerelease(vec![PrereleaseItem::name("beta"), PrereleaseItem::name("rc")])
                .into(),
        );
    }
    policyset
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitflow-release.toml` in current directory
/// 3. `.gitflow-release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}
