use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, TeamId, Timestamp, now, player::non_blank};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    #[serde(rename = "nome")]
    pub name: String,
    /// Player ids in the order supplied. Repeats are allowed.
    #[serde(rename = "integrantes")]
    pub members: Vec<PlayerId>,
    #[serde(with = "crate::domain::timestamp")]
    pub created_at: Timestamp,
}

impl Team {
    pub fn new(name: String, members: Vec<PlayerId>) -> Self {
        Self {
            id: TeamId::generate(),
            name,
            members,
            created_at: now(),
        }
    }

    pub fn update(&mut self, update: TeamUpdate) {
        if let Some(name) = non_blank(update.name.as_deref()) {
            self.name = name;
        }
        if let Some(members) = update.members {
            self.members = members;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub members: Option<Vec<PlayerId>>,
}

/// First member id that is not among `known`, in roster order.
pub fn first_unknown_member<'a>(
    members: &'a [PlayerId],
    known: &HashSet<&PlayerId>,
) -> Option<&'a PlayerId> {
    members.iter().find(|member| !known.contains(member))
}
