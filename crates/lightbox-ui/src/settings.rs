// crates/lightbox-ui/src/settings.rs
//
// Persistent viewer settings: the move/copy destination slots, the slideshow
// interval, and the trash directory. Stored as JSON under the user config
// dir; the file is created with defaults on first run so users have
// something concrete to edit.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sorting slots: pressing `m` or `c` followed by one of these keys moves
    /// or copies the current image into the bound directory.
    pub destinations: BTreeMap<char, PathBuf>,
    pub slideshow_interval_secs: f64,
    /// How long transient feedback messages stay on screen.
    pub feedback_secs: f64,
    pub trash_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let mut destinations = BTreeMap::new();
        for key in ['a', 'd', 'f', 'w', 't'] {
            destinations.insert(key, PathBuf::from(format!("~/Pictures/lightbox/dest-{key}")));
        }
        Self {
            destinations,
            slideshow_interval_secs: 20.0,
            feedback_secs: 2.0,
            trash_dir: PathBuf::from("~/.Trash"),
        }
    }
}

impl Settings {
    /// Load from `path`, or write defaults there and return them when the
    /// file doesn't exist yet. A malformed file is an error, not a silent
    /// reset — overwriting a hand-edited config would destroy the user's
    /// destination bindings.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("can't read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("can't parse {}", path.display()))
        } else {
            let settings = Self::default();
            settings.save(path)?;
            Ok(settings)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("can't create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("can't write {}", path.display()))
    }

    /// Directory bound to a sorting key, tilde-expanded. None when unbound.
    pub fn destination(&self, key: char) -> Option<PathBuf> {
        self.destinations.get(&key).map(|p| expand_tilde(p))
    }

    pub fn trash(&self) -> PathBuf {
        expand_tilde(&self.trash_dir)
    }
}

/// Default settings location: `<config dir>/lightbox/settings.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lightbox").join("settings.json"))
}

fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map_or_else(|| path.to_path_buf(), |h| h.join(rest)),
        Err(_) => path.to_path_buf(),
    }
}
