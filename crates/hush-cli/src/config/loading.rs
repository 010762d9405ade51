use crate::cli::Cli;
use crate::config::HushConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "hush.toml";

/// Settings given on the command line. Absent flags are not serialized so
/// they never mask lower-priority sources.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    compiler: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    watch: bool,
}

impl From<&Cli> for CliOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            project: cli.project.clone(),
            compiler: cli.compiler.clone(),
            watch: cli.watch,
        }
    }
}

impl HushConfig {
    /// Load configuration relative to the current directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load_from(cli, &cwd)
    }

    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > hush.toml > defaults
    ///
    /// The returned `project` path is absolute.
    pub fn load_from(cli: &Cli, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        if let Some(path) = Self::find_config_file(cli, cwd) {
            tracing::debug!(config = %path.display(), "using configuration file");
            figment = figment.merge(Toml::file(path));
        }

        // HUSH_COMPILER, HUSH_REWRITE__PROJECT, HUSH_REWRITE__BASE_URL, ...
        figment = figment.merge(Env::prefixed("HUSH_").split("__"));
        figment = figment.merge(Serialized::defaults(CliOverrides::from(cli)));

        let mut config: Self = figment.extract().map_err(ConfigError::from)?;
        if config.project.is_relative() {
            config.project = cwd.join(&config.project);
        }

        config.validate()?;
        Ok(config)
    }

    /// `hush.toml` next to the project file, then in `cwd`.
    fn find_config_file(cli: &Cli, cwd: &Path) -> Option<PathBuf> {
        let project = cli
            .project
            .clone()
            .unwrap_or_else(crate::config::default_project);
        let project_dir = cwd
            .join(project)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());

        [project_dir, cwd.to_path_buf()]
            .into_iter()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Get default configuration values.
    pub(crate) fn default_config() -> Self {
        use crate::config::defaults::*;

        Self {
            project: default_project(),
            compiler: default_compiler(),
            watch: false,
            rewrite: Default::default(),
        }
    }
}
