//! hk-save: Save/restore system for Hikari
//!
//! Persists a snapshot of the player between runs. Best-effort by contract:
//! callers log failures and carry on; nothing here ever surfaces to the
//! player as an error.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hk_core::player::Player;

/// Current save file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Save file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid save file header")]
    InvalidHeader,
}

/// Save file header for versioning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// Player name
    pub player_name: String,
    /// Timestamp of save
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "HKRS";

    pub fn new(player: &Player) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            player_name: player.name.clone(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete save file structure
#[derive(Serialize, Deserialize)]
pub struct SaveFile {
    pub header: SaveHeader,
    pub player: Player,
}

/// Save a player snapshot to a file
pub fn save_snapshot(player: &Player, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let save_file = SaveFile {
        header: SaveHeader::new(player),
        player: player.clone(),
    };

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &save_file)?;
    Ok(())
}

/// Load a player snapshot from a file
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Player, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let save_file: SaveFile = serde_json::from_reader(reader)?;

    save_file.header.validate()?;
    Ok(save_file.player)
}

/// Load only the header from a save file
pub fn load_header(path: impl AsRef<Path>) -> Result<SaveHeader, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    let save_file: SaveFile = serde_json::from_reader(reader)?;
    save_file.header.validate()?;
    Ok(save_file.header)
}

/// Check if a save file exists
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete a save file
pub fn delete_save(path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Get the default save path for a player name
pub fn default_save_path(player_name: &str) -> std::path::PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    path.push("hikari");
    path.push("saves");
    std::fs::create_dir_all(&path).ok();
    path.push(format!("{}.json", player_name));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use hk_core::player::{Player, Variant};

    #[test]
    fn save_and_load_roundtrip() {
        let path = std::env::temp_dir().join("hikari_test_save.json");

        let mut player = Player::new("Hana", Variant::Girl);
        player.level = 3;
        player.exp = 42;
        save_snapshot(&player, &path).unwrap();

        assert!(save_exists(&path));

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.name, "Hana");
        assert_eq!(loaded.variant, Variant::Girl);
        assert_eq!(loaded.level, 3);
        assert_eq!(loaded.exp, 42);

        // Cleanup
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn header_validation() {
        let player = Player::default();
        let header = SaveHeader::new(&player);

        assert!(header.validate().is_ok());

        let mut bad_header = header.clone();
        bad_header.magic = "XXXX".to_string();
        assert!(matches!(
            bad_header.validate(),
            Err(SaveError::InvalidHeader)
        ));

        let mut old_header = header;
        old_header.version = 999;
        assert!(matches!(
            old_header.validate(),
            Err(SaveError::IncompatibleVersion { .. })
        ));
    }

    #[test]
    fn load_nonexistent() {
        let result = load_snapshot("/nonexistent/path/save.json");
        assert!(matches!(result, Err(SaveError::NotFound)));
    }

    #[test]
    fn header_readable_without_full_load() {
        let path = std::env::temp_dir().join("hikari_test_header.json");
        let player = Player::new("Kakeru", Variant::Boy);
        save_snapshot(&player, &path).unwrap();

        let header = load_header(&path).unwrap();
        assert_eq!(header.player_name, "Kakeru");
        assert_eq!(header.version, SAVE_VERSION);

        std::fs::remove_file(&path).ok();
    }
}
