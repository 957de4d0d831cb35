use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// External programs launched by the shortcuts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_editor")]
    pub editor: String,
    #[serde(default = "default_diff")]
    pub diff: String,
    #[serde(default = "default_vcs_client")]
    pub vcs_client: String,
    /// Used when the desktop configuration does not name a terminal
    #[serde(default = "default_terminal")]
    pub terminal: String,
}

fn default_editor() -> String {
    "gedit".to_string()
}

fn default_diff() -> String {
    "meld".to_string()
}

fn default_vcs_client() -> String {
    "gitg".to_string()
}

fn default_terminal() -> String {
    "x-terminal-emulator".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            diff: default_diff(),
            vcs_client: default_vcs_client(),
            terminal: default_terminal(),
        }
    }
}

/// Internal widget names of the host window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkNames {
    pub toolbar: String,
    pub menubar: String,
    pub location_entry: String,
    /// Parents of the list/grid widgets that display a directory
    pub directory_views: Vec<String>,
    pub copy_item: String,
    pub move_item: String,
    pub mkdir_item: String,
    pub trash_item: String,
    pub edit_menu: String,
    pub extra_pane_item: String,
}

impl Default for LandmarkNames {
    fn default() -> Self {
        Self {
            toolbar: "NautilusToolbar".to_string(),
            menubar: "MenuBar".to_string(),
            location_entry: "NautilusLocationEntry".to_string(),
            directory_views: vec!["NautilusListView".to_string(), "NautilusIconView".to_string()],
            copy_item: "Copy to next pane".to_string(),
            move_item: "Move to next pane".to_string(),
            mkdir_item: "New Folder".to_string(),
            trash_item: "Trash".to_string(),
            edit_menu: "Edit".to_string(),
            extra_pane_item: "Show Hide Extra Pane".to_string(),
        }
    }
}

/// Host action paths whose default keys collide with the orthodox scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostActions {
    /// Default F3, cleared
    pub extra_pane: String,
    /// Default F6, cleared
    pub next_pane: String,
    /// Default Ctrl+O, moved to the orthodox view key
    pub open: String,
}

impl Default for HostActions {
    fn default() -> Self {
        Self {
            extra_pane: "<Actions>/ShellActions/Show Hide Extra Pane".to_string(),
            next_pane: "<Actions>/ShellActions/SplitViewNextPane".to_string(),
            open: "<Actions>/DirViewActions/Open".to_string(),
        }
    }
}

/// Orthodox key assignments, in key string form (e.g. "ctrl+o")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthodoxKeys {
    pub view: String,
    pub edit: String,
    pub copy: String,
    #[serde(rename = "move")]
    pub move_to: String,
    pub mkdir: String,
    pub delete: String,
    pub terminal: String,
    pub vcs_client: String,
}

impl Default for OrthodoxKeys {
    fn default() -> Self {
        Self {
            view: "f3".to_string(),
            edit: "f4".to_string(),
            copy: "f5".to_string(),
            move_to: "f6".to_string(),
            mkdir: "f7".to_string(),
            delete: "f8".to_string(),
            terminal: "ctrl+o".to_string(),
            vcs_client: "ctrl+g".to_string(),
        }
    }
}

/// Accelerators the host ships with, used to seed a fresh table
pub fn default_host_accels() -> BTreeMap<String, String> {
    let mut m = BTreeMap::new();
    m.insert("<Actions>/ShellActions/Show Hide Extra Pane".into(), "f3".into());
    m.insert("<Actions>/ShellActions/SplitViewNextPane".into(), "f6".into());
    m.insert("<Actions>/DirViewActions/Open".into(), "ctrl+o".into());
    m.insert("<Actions>/DirViewActions/Copy to next pane".into(), String::new());
    m.insert("<Actions>/DirViewActions/Move to next pane".into(), String::new());
    m.insert("<Actions>/DirViewActions/New Folder".into(), "ctrl+shift+n".into());
    m.insert("<Actions>/DirViewActions/Trash".into(), "delete".into());
    m.insert("<Actions>/DirViewActions/Rename".into(), "f2".into());
    m.insert("<Actions>/ShellActions/Reload".into(), "ctrl+r".into());
    m.insert("<Actions>/ShellActions/Close".into(), "ctrl+w".into());
    m.insert("<Actions>/ShellActions/Search".into(), "ctrl+f".into());
    m.insert("<Actions>/ShellActions/Show Hidden Files".into(), "ctrl+h".into());
    m
}

fn default_ignored_uris() -> Vec<String> {
    vec!["x-nautilus-desktop:///".to_string()]
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tools: ToolSettings,
    #[serde(default)]
    pub landmarks: LandmarkNames,
    #[serde(default)]
    pub host_actions: HostActions,
    #[serde(default = "default_host_accels")]
    pub host_defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub orthodox: OrthodoxKeys,
    /// Locations whose windows are left alone (the desktop pseudo-window)
    #[serde(default = "default_ignored_uris")]
    pub ignored_uris: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tools: ToolSettings::default(),
            landmarks: LandmarkNames::default(),
            host_actions: HostActions::default(),
            host_defaults: default_host_accels(),
            orthodox: OrthodoxKeys::default(),
            ignored_uris: default_ignored_uris(),
        }
    }
}

impl Settings {
    /// Returns the config directory path (~/.orthokeys)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".orthokeys"))
    }

    /// Returns the config file path (~/.orthokeys/settings.json)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Returns the persisted accelerator table path (~/.orthokeys/accels.json)
    pub fn accels_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("accels.json"))
    }

    /// Ensures the config directory and a default settings file exist
    pub fn ensure_config_exists() {
        if let Some(config_dir) = Self::config_dir() {
            if !config_dir.exists() && fs::create_dir_all(&config_dir).is_ok() {
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    let perms = fs::Permissions::from_mode(0o700);
                    let _ = fs::set_permissions(&config_dir, perms);
                }
            }
        }

        if let Some(config_path) = Self::config_path() {
            if !config_path.exists() {
                let _ = Self::default().save();
            }
        }
    }

    /// Loads settings from the config file, returns default if not found or invalid
    pub fn load() -> Self {
        match Self::load_with_error() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Loads settings from the config file with error information
    pub fn load_with_error() -> Result<Self, String> {
        Self::ensure_config_exists();

        let config_path = Self::config_path()
            .ok_or_else(|| "Could not determine config path".to_string())?;

        let content = fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content)
            .map_err(|e| format!("Invalid JSON in settings.json: {}", e))
    }

    /// Saves settings to the config file using atomic write pattern
    pub fn save(&self) -> io::Result<()> {
        let Some(config_dir) = Self::config_dir() else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            ));
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = config_dir.join("settings.json");
        let temp_path = config_dir.join("settings.json.tmp");
        let content = serde_json::to_string_pretty(self)?;

        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &config_path)?;

        Ok(())
    }

    pub fn is_ignored_uri(&self, uri: &str) -> bool {
        self.ignored_uris.iter().any(|u| u == uri)
    }
}
