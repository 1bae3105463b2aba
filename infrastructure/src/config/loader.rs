//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["agent-toolkit.toml", ".agent-toolkit.toml"];

/// Environment override prefix: `AGENT_TOOLKIT_AGENT__MAX_TURNS=3`
const ENV_PREFIX: &str = "AGENT_TOOLKIT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `AGENT_TOOLKIT_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided; must exist)
    /// 3. Project root: `./agent-toolkit.toml` or `./.agent-toolkit.toml`
    /// 4. Global config: `agent-toolkit/config.toml` under the platform config dir
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path();
        Self::figment(global.as_deref(), Path::new("."), config_path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load from files only, resolving the project file against `project_dir`
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(global_path, project_dir, config_path)
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::find_project_config(project_dir) {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment
    }

    /// Get the global config file path
    ///
    /// `agent-toolkit/config.toml` under [`dirs::config_dir`]: `$XDG_CONFIG_HOME`
    /// or `~/.config` on Linux, `~/Library/Application Support` on macOS,
    /// `%APPDATA%` on Windows
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agent-toolkit").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::find_project_config(Path::new("."))
    }

    fn find_project_config(dir: &Path) -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        for line in Self::config_sources(config_path) {
            println!("  {}", line);
        }
    }

    /// One line per merged source, highest priority first
    fn config_sources(config_path: Option<&Path>) -> Vec<String> {
        let mut lines = vec![format!("[     ] Env:      {}<SECTION>__<KEY>", ENV_PREFIX)];

        if let Some(path) = config_path {
            lines.push(format!("{} Explicit: {}", marker(path), path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("[FOUND] Project:  {}", path.display())),
            None => lines.push(
                "[     ] Project:  ./agent-toolkit.toml or ./.agent-toolkit.toml".to_string(),
            ),
        }

        if let Some(path) = Self::global_config_path() {
            lines.push(format!("{} Global:   {}", marker(&path), path.display()));
        }

        lines.push("[     ] Default:  built-in defaults".to_string());
        lines
    }
}

fn marker(path: &Path) -> &'static str {
    if path.exists() { "[FOUND]" } else { "[     ]" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.agent.max_turns, 10);
        assert_eq!(config.model.api_key_env, "OPENROUTER_API_KEY");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("agent-toolkit"));
    }

    #[test]
    fn test_load_from_empty_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from(None, dir.path(), None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "[agent]\nmax_turns = 7\n\n[model]\nname = \"global/model\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("agent-toolkit.toml"),
            "[agent]\nmax_turns = 3\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from(Some(&global), dir.path(), None).unwrap();
        assert_eq!(config.agent.max_turns, 3);
        // Untouched keys fall through from the lower layer
        assert_eq!(config.model.name, "global/model");
    }

    #[test]
    fn test_dotfile_project_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".agent-toolkit.toml"),
            "[fetch]\nmax_body_bytes = 2048\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from(None, dir.path(), None).unwrap();
        assert_eq!(config.fetch.max_body_bytes, 2048);
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("agent-toolkit.toml"),
            "[agent]\nmax_turns = 3\n",
        )
        .unwrap();
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "[agent]\nmax_turns = 5\n").unwrap();

        let config = ConfigLoader::load_from(None, dir.path(), Some(&explicit)).unwrap();
        assert_eq!(config.agent.max_turns, 5);
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigLoader::load_from(None, dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_config_sources_list_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "[agent]\nmax_turns = 5\n").unwrap();

        let lines = ConfigLoader::config_sources(Some(&explicit));
        assert!(lines[0].contains("Env:"));
        assert_eq!(lines[1], format!("[FOUND] Explicit: {}", explicit.display()));
        assert!(lines.last().unwrap().contains("Default:"));

        let missing = dir.path().join("nope.toml");
        let lines = ConfigLoader::config_sources(Some(&missing));
        assert_eq!(lines[1], format!("[     ] Explicit: {}", missing.display()));

        let lines = ConfigLoader::config_sources(None);
        assert!(!lines.iter().any(|line| line.contains("Explicit:")));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("agent-toolkit.toml"), "[agent\nmax_turns = ").unwrap();
        assert!(ConfigLoader::load_from(None, dir.path(), None).is_err());
    }
}
