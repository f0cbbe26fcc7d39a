use log::{trace, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::data_dir;
use super::GameSession;

fn session_snapshot_path() -> PathBuf {
    data_dir().join("session.json")
}

/// Best-effort save of the current session so the next run can resume it.
pub fn save_session_snapshot(session: &GameSession) -> bool {
    save_session_snapshot_to(&session_snapshot_path(), session)
}

pub fn load_session_snapshot() -> Option<GameSession> {
    load_session_snapshot_from(&session_snapshot_path())
}

pub fn save_session_snapshot_to(path: &Path, session: &GameSession) -> bool {
    if let Some(dir) = path.parent() {
        if let Err(err) = fs::create_dir_all(dir) {
            warn!(target: "game_state", "Could not create {:?}: {}", dir, err);
            return false;
        }
    }
    match serde_json::to_string(session) {
        Ok(contents) => match fs::write(path, contents) {
            Ok(()) => true,
            Err(err) => {
                warn!(target: "game_state", "Could not write {:?}: {}", path, err);
                false
            }
        },
        Err(err) => {
            warn!(target: "game_state", "Could not serialize session: {}", err);
            false
        }
    }
}

/// Snapshots that no sequence of moves could produce are discarded.
pub fn load_session_snapshot_from(path: &Path) -> Option<GameSession> {
    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<GameSession>(&contents) {
        Ok(session) if session.is_consistent() => {
            trace!(target: "game_state", "Loaded session snapshot {:?}", session);
            Some(session)
        }
        Ok(_) => {
            warn!(target: "game_state", "Discarding inconsistent snapshot {:?}", path);
            None
        }
        Err(err) => {
            warn!(target: "game_state", "Discarding unreadable snapshot {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn snapshot_path(dir: &TempDir) -> PathBuf {
        dir.path().join("nested").join("session.json")
    }

    fn write_edited(path: &Path, session: &GameSession, edit: impl FnOnce(&mut serde_json::Value)) {
        let mut value = serde_json::to_value(session).unwrap();
        edit(&mut value);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, value.to_string()).unwrap();
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir);
        let mut rng = StdRng::seed_from_u64(77);
        let session = GameSession::new(Difficulty::Medium, "/uploads/a.jpg")
            .shuffled(&mut rng, SystemTime::now());

        assert!(save_session_snapshot_to(&path, &session));
        let loaded = load_session_snapshot_from(&path).unwrap();
        assert_eq!(loaded.tiles(), session.tiles());
        assert_eq!(loaded.difficulty(), Difficulty::Medium);
        assert_eq!(loaded.current_image(), "/uploads/a.jpg");
    }

    #[test]
    fn test_inconsistent_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir);
        let session = GameSession::new(Difficulty::Easy, "img");
        write_edited(&path, &session, |value| {
            value["difficulty"] = serde_json::json!("5x5");
        });

        assert!(load_session_snapshot_from(&path).is_none());
    }

    #[test]
    fn test_won_flag_on_unsolved_board_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir);
        let moved = GameSession::new(Difficulty::Easy, "img").with_move(8, SystemTime::now());
        write_edited(&path, &moved, |value| {
            value["isWon"] = serde_json::json!(true);
        });
        assert!(load_session_snapshot_from(&path).is_none());

        write_edited(&path, &moved, |value| {
            value["isPlaying"] = serde_json::json!(false);
        });
        assert!(load_session_snapshot_from(&path).is_none());

        // the untouched session still loads
        assert!(save_session_snapshot_to(&path, &moved));
        let loaded = load_session_snapshot_from(&path).unwrap();
        assert_eq!(loaded.tiles(), moved.tiles());
        assert!(loaded.is_playing());
        assert!(!loaded.is_won());
    }

    #[test]
    fn test_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_session_snapshot_from(&snapshot_path(&dir)).is_none());
    }
}
