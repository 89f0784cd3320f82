use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{Error, IoContext, Result};

/// Optional project description read from the invocation root.
pub const CONFIG_FILE: &str = "modbuild.toml";

const DEFAULT_MOD_ID: &str = "p5rpc.freecam";
const DEFAULT_DEPLOY_VARIABLE: &str = "RELOADEDIIMODS";
const DEFAULT_BINDING_URL: &str =
    "https://raw.githubusercontent.com/rirurin/opengfd-globals/main/middata/ext_xrd744.rs";
const DEFAULT_TOOLS_URL: &str =
    "https://github.com/Reloaded-Project/Reloaded-II/releases/latest/download/Tools.zip";

/// Describes the two sub-projects and where their inputs and outputs live.
///
/// Every field has a default matching the freecam mod, so the file only needs
/// to mention what differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Reloaded-II mod id; names the deployment folder and the published package.
    pub mod_id: String,
    /// Environment variable holding the Reloaded-II mods directory.
    pub deploy_variable: String,
    pub native: NativeConfig,
    pub managed: ManagedConfig,
    pub binding: BindingConfig,
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NativeConfig {
    pub name: String,
    /// Directory relative to the root.
    pub path: PathBuf,
    /// File extensions copied out of the cargo target directory.
    pub artifacts: Vec<String>,
    /// Directory created under the crate before building.
    pub working_dir: PathBuf,
    /// Static mod files under the crate, copied verbatim when present.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagedConfig {
    pub name: String,
    pub path: PathBuf,
}

/// Where the generated globals binding comes from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BindingConfig {
    /// `env.local.yaml` key naming the local checkout of the upstream project.
    pub env_key: String,
    /// File path inside that checkout.
    pub source: PathBuf,
    /// Download location used when publishing.
    pub url: String,
    /// Destination relative to the native crate.
    pub target: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Archive containing the packaging tool.
    pub tools_url: String,
    /// Packager executable, relative to the tools directory.
    pub packager: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            mod_id: DEFAULT_MOD_ID.to_string(),
            deploy_variable: DEFAULT_DEPLOY_VARIABLE.to_string(),
            native: NativeConfig::default(),
            managed: ManagedConfig::default(),
            binding: BindingConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            name: "p5r-freecam".to_string(),
            path: PathBuf::from("p5r-freecam"),
            artifacts: ["dll", "pdb", "so", "dylib"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            working_dir: PathBuf::from("riri_hook"),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Default for ManagedConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MOD_ID.to_string(),
            path: PathBuf::from(DEFAULT_MOD_ID),
        }
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            env_key: "opengfd-path".to_string(),
            source: PathBuf::from("opengfd-globals/middata/ext_xrd744.rs"),
            url: DEFAULT_BINDING_URL.to_string(),
            target: PathBuf::from("src/globals.rs"),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            tools_url: DEFAULT_TOOLS_URL.to_string(),
            packager: PathBuf::from("Reloaded.Publisher.exe"),
        }
    }
}

impl BuildConfig {
    /// Load `modbuild.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).at(&path)?;
        let config: Self = toml::from_str(&contents).map_err(|err| invalid(&path, err))?;
        config.validate(&path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for (field, value) in [
            ("binding.url", &self.binding.url),
            ("publish.tools_url", &self.publish.tools_url),
        ] {
            Url::parse(value)
                .map_err(|err| invalid(path, format!("{field} '{value}' is not a URL: {err}")))?;
        }

        if self.native.name == self.managed.name {
            return Err(invalid(
                path,
                format!("native and managed projects share the name '{}'", self.native.name),
            ));
        }

        for (field, value) in [
            ("mod_id", &self.mod_id),
            ("deploy_variable", &self.deploy_variable),
            ("binding.env_key", &self.binding.env_key),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(path, format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

fn invalid(path: &Path, message: impl ToString) -> Error {
    Error::InvalidProjectConfig {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Expand `~` and `$VAR` references in a configured path.
pub fn expand_path(value: &str) -> PathBuf {
    match shellexpand::full(value) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(value),
    }
}
