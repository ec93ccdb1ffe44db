//! Явный объект сессии вместо глобального состояния: токен и профиль
//! пользователя с жизненным циклом load/save/clear поверх JSON-файла.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::types::UserRecord;

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserRecord,
}

impl Session {
    pub fn load() -> Option<Session> {
        Self::load_from(SESSION_FILE)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Option<Session> {
        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(SESSION_FILE)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    pub fn clear() {
        Self::clear_at(SESSION_FILE);
    }

    pub fn clear_at(path: impl AsRef<Path>) {
        // отсутствие файла — уже "вышел из системы"
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Role;

    fn sample() -> Session {
        Session {
            token: "abc123".to_string(),
            user: UserRecord {
                id: 1,
                name: "Иванова А. П.".to_string(),
                email: "ivanova@school.ru".to_string(),
                dob: None,
                phone: None,
                gender: None,
                role: Role::Manager,
            },
        }
    }

    #[test]
    fn save_load_clear_roundtrip() {
        let path = std::env::temp_dir().join(format!("session_test_{}.json", std::process::id()));
        let session = sample();
        session.save_to(&path).unwrap();

        let loaded = Session::load_from(&path).unwrap();
        assert_eq!(loaded.token, session.token);
        assert_eq!(loaded.user.id, session.user.id);
        assert_eq!(loaded.user.role, Role::Manager);

        Session::clear_at(&path);
        assert!(Session::load_from(&path).is_none());
    }

    #[test]
    fn corrupt_file_reads_as_logged_out() {
        let path = std::env::temp_dir().join(format!("session_bad_{}.json", std::process::id()));
        std::fs::write(&path, "{не json").unwrap();
        assert!(Session::load_from(&path).is_none());
        Session::clear_at(&path);
    }
}
