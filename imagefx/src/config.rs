use anyhow::{Context, Result, bail};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_FILE: &str = "imagefx.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Derivative)]
#[derivative(Default)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[derivative(Default(value = "PathBuf::from(\"uploads\")"))]
    pub upload_dir: PathBuf,

    #[derivative(Default(value = "PathBuf::from(\"processed\")"))]
    pub processed_dir: PathBuf,

    #[derivative(Default(value = "PathBuf::from(\"imagefx.db\")"))]
    pub db_path: PathBuf,

    // bytes
    #[derivative(Default(value = "16 * 1024 * 1024"))]
    pub max_upload_size: u64,

    #[derivative(Default(value = "allowed_extensions_default()"))]
    pub allowed_extensions: Vec<String>,
}

fn allowed_extensions_default() -> Vec<String> {
    ["png", "jpg", "jpeg"].map(String::from).to_vec()
}

impl Config {
    /// Loads the configuration file, writing the defaults when it is missing.
    ///
    /// A file that fails to parse is kept as `<path>.bak` and replaced by the
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = match fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(c) => c,
                Err(e) => {
                    warn!("parse {} failed, restoring defaults. {e}", path.display());
                    _ = fs::copy(path, format!("{}.bak", path.display()));
                    Self::write_default(path)?
                }
            },
            Err(_) => Self::write_default(path)?,
        };

        config.config_path = path.to_path_buf();
        debug!("{:?}", config);
        Ok(config)
    }

    fn write_default(path: &Path) -> Result<Self> {
        let config = Config {
            config_path: path.to_path_buf(),
            ..Default::default()
        };
        config.save()?;
        Ok(config)
    }

    /// Saves the current configuration to `config_path`
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| format!("save config {} failed", self.config_path.display()))?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }

    /// Creates the upload and processed directories and the database's parent.
    pub fn create_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.upload_dir)
            .with_context(|| format!("create {} failed", self.upload_dir.display()))?;
        fs::create_dir_all(&self.processed_dir)
            .with_context(|| format!("create {} failed", self.processed_dir.display()))?;

        if let Some(dir) = self.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        Ok(())
    }

    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}
