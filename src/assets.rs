//! Startup asset loading and fallback art
//!
//! Assets are loaded once, in bulk, before the home screen is reachable.
//! Individual failures never block the game: the affected role is drawn as a
//! flat-color silhouette instead.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::error::AssetError;
use crate::skin::{AssetRole, SkinCatalog};

/// Source of loaded visual resources
pub trait AssetStore {
    /// Load the asset `key` stored at `path` (relative to the store's root)
    fn load(&mut self, key: &str, path: &str) -> Result<(), AssetError>;
}

/// Logical asset key -> relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    entries: BTreeMap<String, String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AssetManifest {
    /// Shared assets plus everything the built-in skins reference
    pub fn builtin() -> Self {
        let entries = [
            ("coin", "assets/coin.png"),
            ("spike", "assets/spike.png"),
            ("blocker", "assets/blocker.png"),
            ("player_classic_idle", "assets/player_idle.png"),
            ("player_classic_jump", "assets/player_jump.png"),
            ("player_classic_slide", "assets/player_slide.png"),
            ("enemy_classic", "assets/enemy_basic.png"),
            ("ground_classic", "assets/ground_default.png"),
            ("preview_classic", "assets/preview_classic.png"),
            ("player_desert_idle", "assets/player_desert_idle.png"),
            ("player_desert_jump", "assets/player_desert_jump.png"),
            ("player_desert_slide", "assets/player_desert_slide.png"),
            ("enemy_desert", "assets/enemy_scorpion.png"),
            ("ground_desert", "assets/ground_desert.png"),
            ("preview_desert", "assets/preview_desert.png"),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(k, p)| (k.to_string(), p.to_string()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: &str, path: &str) {
        self.entries.insert(key.to_string(), path.to_string());
    }

    pub fn path(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p.as_str()))
    }
}

/// Outcome of the startup load: which keys are usable, which failed and why
#[derive(Debug, Default)]
pub struct LoadReport {
    loaded: BTreeSet<String>,
    failed: BTreeMap<String, AssetError>,
}

impl LoadReport {
    pub fn is_loaded(&self, key: &str) -> bool {
        self.loaded.contains(key)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &AssetError)> {
        self.failed.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Load every manifest entry. Always completes; failures are recorded and
/// logged, never returned.
pub fn load_all<S: AssetStore + ?Sized>(store: &mut S, manifest: &AssetManifest) -> LoadReport {
    let mut report = LoadReport::default();
    for (key, path) in manifest.iter() {
        match store.load(key, path) {
            Ok(()) => {
                report.loaded.insert(key.to_string());
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}. Using fallback color.", path, e);
                report.failed.insert(key.to_string(), e);
            }
        }
    }
    log::info!(
        "Assets ready: {} loaded, {} using fallback",
        report.loaded_count(),
        report.failed_count()
    );
    report
}

/// Store backed by a directory on disk. A file that exists and is non-empty
/// counts as loaded.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetStore for DirectoryStore {
    fn load(&mut self, key: &str, path: &str) -> Result<(), AssetError> {
        let full = self.root.join(path);
        match std::fs::metadata(&full) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
            Ok(_) => Err(AssetError::Empty {
                key: key.to_string(),
                path: full.display().to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AssetError::NotFound {
                key: key.to_string(),
                path: full.display().to_string(),
            }),
            Err(source) => Err(AssetError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Silhouette shape for fallback drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shape {
    Rect,
    Circle,
}

/// How the renderer should draw a role this frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Appearance {
    /// A successfully loaded asset
    Sprite { key: String },
    /// Flat 0xRRGGBB silhouette
    Flat { color: u32, shape: Shape },
}

/// Fixed fallback silhouette per role
pub fn fallback(role: AssetRole) -> Appearance {
    let (color, shape) = match role {
        AssetRole::PlayerIdle | AssetRole::PlayerJump => (0xff6347, Shape::Rect),
        AssetRole::PlayerSlide => (0xff9933, Shape::Rect),
        AssetRole::Enemy => (0xb22222, Shape::Rect),
        AssetRole::Ground => (0x556b2f, Shape::Rect),
        AssetRole::Coin => (0xffd700, Shape::Circle),
        AssetRole::Spike => (0x777777, Shape::Rect),
        AssetRole::Blocker => (0x8b4513, Shape::Rect),
        AssetRole::Preview => (0x888888, Shape::Rect),
    };
    Appearance::Flat { color, shape }
}

/// Resolve `role` through the active skin; use the fallback when the skin
/// has no key for it or the asset failed to load
pub fn appearance(skins: &SkinCatalog, report: &LoadReport, role: AssetRole) -> Appearance {
    match skins.resolve(role) {
        Some(key) if report.is_loaded(key) => Appearance::Sprite {
            key: key.to_string(),
        },
        _ => fallback(role),
    }
}
