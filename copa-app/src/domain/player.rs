use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    ServiceError, ServiceResult,
    domain::{PlayerId, Timestamp, now},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "idade")]
    pub age: i32,
    /// Notification address.
    #[serde(rename = "contato")]
    pub contact: String,
    #[serde(rename = "ativa", default = "default_active")]
    pub active: bool,
    #[serde(with = "crate::domain::timestamp")]
    pub created_at: Timestamp,
}

fn default_active() -> bool {
    true
}

impl Player {
    pub fn create(new_player: NewPlayer) -> ServiceResult<Self> {
        if new_player.validate().is_err() {
            return ServiceError::validation("Nome e contato são obrigatórios");
        }
        Ok(Self {
            id: PlayerId::generate(),
            name: new_player.name,
            age: new_player.age,
            contact: new_player.contact,
            active: true,
            created_at: now(),
        })
    }

    pub fn update(&mut self, update: &PlayerUpdate) {
        if let Some(name) = non_blank(update.name.as_deref()) {
            self.name = name;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(contact) = non_blank(update.contact.as_deref()) {
            self.contact = contact;
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewPlayer {
    #[validate(length(min = 1))]
    pub name: String,
    pub age: i32,
    #[validate(length(min = 1))]
    pub contact: String,
}

impl NewPlayer {
    pub fn new(name: &str, age: i32, contact: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            age,
            contact: contact.trim().to_string(),
        }
    }
}

/// Field-level delta. Absent fields, and blank strings, leave the stored
/// value untouched.
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub contact: Option<String>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trims_fields() {
        let player = Player::create(NewPlayer::new("  Marta ", 30, " marta@example.com\n")).unwrap();
        assert_eq!(player.name, "Marta");
        assert_eq!(player.contact, "marta@example.com");
        assert_eq!(player.age, 30);
        assert!(player.active);
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        assert!(matches!(
            Player::create(NewPlayer::new("   ", 20, "x@y.z")),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            Player::create(NewPlayer::new("Formiga", 20, "\t")),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_update_skips_blank_and_absent_fields() {
        let mut player = Player::create(NewPlayer::new("Cristiane", 28, "cris@example.com")).unwrap();
        player.update(&PlayerUpdate {
            name: Some("  ".to_string()),
            age: Some(29),
            contact: None,
        });
        assert_eq!(player.name, "Cristiane");
        assert_eq!(player.age, 29);
        assert_eq!(player.contact, "cris@example.com");

        player.update(&PlayerUpdate {
            name: Some(" Cris ".to_string()),
            ..Default::default()
        });
        assert_eq!(player.name, "Cris");
    }

    #[test]
    fn test_serialized_field_names() {
        let player = Player::create(NewPlayer::new("Débora", 25, "debora@example.com")).unwrap();
        let value = serde_json::to_value(&player).unwrap();
        assert_eq!(value["nome"], "Débora");
        assert_eq!(value["idade"], 25);
        assert_eq!(value["contato"], "debora@example.com");
        assert_eq!(value["ativa"], true);
        assert!(value.get("created_at").is_some());
    }

    #[test]
    fn test_missing_active_flag_defaults_to_true() {
        let json = r#"{"id":"p1","nome":"Ana","idade":20,"contato":"ana@x","created_at":"2024-05-01T12:00:00.123456"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert!(player.active);
    }
}
