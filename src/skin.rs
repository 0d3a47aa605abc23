//! Skins and asset-role resolution
//!
//! A skin remaps logical visual roles to asset keys. Roles a skin does not
//! customize fall back to the shared keys (coin, spike, blocker).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SkinError;
use crate::sim::{ObstacleKind, PlayerState};

/// Logical visual purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetRole {
    PlayerIdle,
    PlayerJump,
    PlayerSlide,
    Enemy,
    Ground,
    Coin,
    Spike,
    Blocker,
    Preview,
}

impl AssetRole {
    pub const ALL: [AssetRole; 9] = [
        AssetRole::PlayerIdle,
        AssetRole::PlayerJump,
        AssetRole::PlayerSlide,
        AssetRole::Enemy,
        AssetRole::Ground,
        AssetRole::Coin,
        AssetRole::Spike,
        AssetRole::Blocker,
        AssetRole::Preview,
    ];

    pub fn for_player(state: PlayerState) -> Self {
        match state {
            PlayerState::Idle => AssetRole::PlayerIdle,
            PlayerState::Jumping => AssetRole::PlayerJump,
            PlayerState::Sliding => AssetRole::PlayerSlide,
        }
    }

    pub fn for_obstacle(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Spike => AssetRole::Spike,
            ObstacleKind::Blocker => AssetRole::Blocker,
            ObstacleKind::Enemy => AssetRole::Enemy,
        }
    }

    /// Asset key shared by every skin, for roles that are not skin-specific
    pub fn shared_key(self) -> Option<&'static str> {
        match self {
            AssetRole::Coin => Some("coin"),
            AssetRole::Spike => Some("spike"),
            AssetRole::Blocker => Some("blocker"),
            _ => None,
        }
    }
}

/// A named bundle of role -> asset key overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub id: String,
    pub name: String,
    pub roles: BTreeMap<AssetRole, String>,
}

impl Skin {
    pub fn new(id: &str, name: &str, roles: &[(AssetRole, &str)]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            roles: roles
                .iter()
                .map(|(role, key)| (*role, key.to_string()))
                .collect(),
        }
    }

    /// Asset key for `role`: this skin's override, else the shared key
    pub fn resolve(&self, role: AssetRole) -> Option<&str> {
        self.roles
            .get(&role)
            .map(String::as_str)
            .or_else(|| role.shared_key())
    }

    pub fn preview_key(&self) -> Option<&str> {
        self.resolve(AssetRole::Preview)
    }
}

/// The fixed list of skins plus the active selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinCatalog {
    skins: Vec<Skin>,
    active: usize,
}

impl Default for SkinCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkinCatalog {
    /// Classic and Desert skins; Classic is active
    pub fn builtin() -> Self {
        use AssetRole::*;
        let skins = vec![
            Skin::new(
                "classic",
                "Classic Runner",
                &[
                    (PlayerIdle, "player_classic_idle"),
                    (PlayerJump, "player_classic_jump"),
                    (PlayerSlide, "player_classic_slide"),
                    (Enemy, "enemy_classic"),
                    (Ground, "ground_classic"),
                    (Preview, "preview_classic"),
                ],
            ),
            Skin::new(
                "desert",
                "Desert Explorer",
                &[
                    (PlayerIdle, "player_desert_idle"),
                    (PlayerJump, "player_desert_jump"),
                    (PlayerSlide, "player_desert_slide"),
                    (Enemy, "enemy_desert"),
                    (Ground, "ground_desert"),
                    (Preview, "preview_desert"),
                ],
            ),
        ];
        Self { skins, active: 0 }
    }

    /// Build a catalog; the first skin starts active
    pub fn new(skins: Vec<Skin>) -> Result<Self, SkinError> {
        if skins.is_empty() {
            return Err(SkinError::EmptyCatalog);
        }
        Ok(Self { skins, active: 0 })
    }

    /// Load a JSON array of skins
    pub fn from_json(json: &str) -> Result<Self, SkinError> {
        let skins: Vec<Skin> =
            serde_json::from_str(json).map_err(|e| SkinError::Parse(e.to_string()))?;
        Self::new(skins)
    }

    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    pub fn get(&self, id: &str) -> Option<&Skin> {
        self.skins.iter().find(|s| s.id == id)
    }

    pub fn active(&self) -> &Skin {
        &self.skins[self.active]
    }

    /// Make `id` the active skin. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &str) -> Result<&Skin, SkinError> {
        let index = self
            .skins
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SkinError::UnknownSkin(id.to_string()))?;
        self.active = index;
        log::info!("Selected skin: {}", self.skins[index].name);
        Ok(&self.skins[index])
    }

    /// Resolve a role against the active skin
    pub fn resolve(&self, role: AssetRole) -> Option<&str> {
        self.active().resolve(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skin_resolution() {
        let catalog = SkinCatalog::builtin();
        assert_eq!(catalog.active().id, "classic");
        assert_eq!(catalog.resolve(AssetRole::PlayerIdle), Some("player_classic_idle"));
        assert_eq!(catalog.resolve(AssetRole::Ground), Some("ground_classic"));
        // Shared roles
        assert_eq!(catalog.resolve(AssetRole::Coin), Some("coin"));
        assert_eq!(catalog.resolve(AssetRole::Spike), Some("spike"));
        assert_eq!(catalog.resolve(AssetRole::Blocker), Some("blocker"));
    }

    #[test]
    fn test_select_switches_resolution() {
        let mut catalog = SkinCatalog::builtin();
        catalog.select("desert").unwrap();
        assert_eq!(catalog.resolve(AssetRole::PlayerIdle), Some("player_desert_idle"));
        assert_eq!(catalog.resolve(AssetRole::Enemy), Some("enemy_desert"));
        assert_eq!(catalog.active().preview_key(), Some("preview_desert"));
    }

    #[test]
    fn test_unknown_skin_keeps_selection() {
        let mut catalog = SkinCatalog::builtin();
        catalog.select("desert").unwrap();
        assert_eq!(
            catalog.select("neon"),
            Err(SkinError::UnknownSkin("neon".to_string()))
        );
        assert_eq!(catalog.active().id, "desert");
    }

    #[test]
    fn test_skin_override_beats_shared_key() {
        let skin = Skin::new("gold", "Gold", &[(AssetRole::Coin, "coin_gold")]);
        assert_eq!(skin.resolve(AssetRole::Coin), Some("coin_gold"));
        assert_eq!(skin.resolve(AssetRole::Spike), Some("spike"));
        assert_eq!(skin.resolve(AssetRole::PlayerIdle), None);
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"[{ "id": "night", "name": "Night Run", "roles": { "player_idle": "night_idle", "ground": "night_ground" } }]"#;
        let catalog = SkinCatalog::from_json(json).unwrap();
        assert_eq!(catalog.active().name, "Night Run");
        assert_eq!(catalog.resolve(AssetRole::Ground), Some("night_ground"));
        assert_eq!(SkinCatalog::from_json("[]"), Err(SkinError::EmptyCatalog));
        assert!(matches!(SkinCatalog::from_json("{"), Err(SkinError::Parse(_))));
    }

    #[test]
    fn test_roles_for_entities() {
        assert_eq!(AssetRole::for_player(PlayerState::Sliding), AssetRole::PlayerSlide);
        assert_eq!(AssetRole::for_obstacle(ObstacleKind::Enemy), AssetRole::Enemy);
    }
}
