use serde::{Deserialize, Serialize};

use crate::process::PointerWidth;

/// Byte offsets into the game's entities, versioned per game build.
///
/// `playlayer` is relative to the module base; player and object fields are
/// relative to their owning entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetTable {
    pub version: String,
    pub pointer_width: PointerWidth,
    pub playlayer: u64,
    pub player_object: u64,
    pub player_x: u64,
    pub player_y: u64,
    pub player_dead: u64,
    pub objects_array: u64,
    pub object_count: u64,
    pub obj_x: u64,
    pub obj_y: u64,
    pub obj_width: u64,
    pub obj_type: u64,
    pub game_speed: u64,
}

impl Default for OffsetTable {
    /// GD 2.2 layout
    fn default() -> Self {
        Self {
            version: "2.2".to_string(),
            pointer_width: PointerWidth::W32,
            playlayer: 0x3222D0,
            player_object: 0x164,
            player_x: 0x64,
            player_y: 0x68,
            player_dead: 0x320,
            objects_array: 0x2A0,
            object_count: 0x2A4,
            obj_x: 0x30,
            obj_y: 0x34,
            obj_width: 0x38,
            obj_type: 0x3A0,
            game_speed: 0x2E0,
        }
    }
}

impl OffsetTable {
    /// A table is usable once it has a version and a play layer root
    pub fn is_valid(&self) -> bool {
        !self.version.is_empty() && self.playlayer != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_gd_22() {
        let table = OffsetTable::default();
        assert!(table.is_valid());
        assert_eq!(table.playlayer, 0x3222D0);
        assert_eq!(table.obj_type, 0x3A0);
        assert_eq!(table.pointer_width, PointerWidth::W32);
    }

    #[test]
    fn test_missing_root_is_invalid() {
        let table = OffsetTable {
            playlayer: 0,
            ..Default::default()
        };
        assert!(!table.is_valid());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let table: OffsetTable =
            serde_json::from_str(r#"{"version": "2.21", "playlayer": 4096, "pointer_width": "w64"}"#)
                .unwrap();
        assert_eq!(table.version, "2.21");
        assert_eq!(table.playlayer, 0x1000);
        assert_eq!(table.pointer_width, PointerWidth::W64);
        assert_eq!(table.player_object, 0x164);
    }
}
