use serde::{Deserialize, Serialize};

use crate::domain::{EnrollmentId, TeamId, Timestamp, TournamentId, now};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    #[serde(rename = "nome")]
    pub name: String,
    /// Maximum number of confirmed enrollments. Not bounded below: zero or a
    /// negative value sends every enrollment to the waitlist.
    #[serde(rename = "vagas")]
    pub capacity: i64,
    /// Denormalized roster. Admission counts enrollments, not this list.
    #[serde(rename = "inscritos", default)]
    pub enrolled_teams: Vec<TeamId>,
    #[serde(with = "crate::domain::timestamp")]
    pub created_at: Timestamp,
}

impl Tournament {
    pub fn new(name: String, capacity: i64) -> Self {
        Self {
            id: TournamentId::generate(),
            name,
            capacity,
            enrolled_teams: Vec::new(),
            created_at: now(),
        }
    }

    pub fn confirmed_count(&self, enrollments: &[Enrollment]) -> usize {
        enrollments
            .iter()
            .filter(|e| e.tournament_id == self.id && e.status == EnrollmentStatus::Confirmed)
            .count()
    }

    /// Status for the next enrollment: confirmed while a slot is free,
    /// waiting otherwise. Earlier waiting enrollments are never promoted.
    pub fn admission_status(&self, enrollments: &[Enrollment]) -> EnrollmentStatus {
        let confirmed = i64::try_from(self.confirmed_count(enrollments)).unwrap_or(i64::MAX);
        if confirmed < self.capacity {
            EnrollmentStatus::Confirmed
        } else {
            EnrollmentStatus::Waiting
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Confirmed,
    Waiting,
    /// Reserved; no operation assigns it.
    Canceled,
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EnrollmentStatus::Confirmed => "confirmed",
            EnrollmentStatus::Waiting => "waiting",
            EnrollmentStatus::Canceled => "canceled",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    #[serde(rename = "torneio_id")]
    pub tournament_id: TournamentId,
    #[serde(rename = "time_id")]
    pub team_id: TeamId,
    pub status: EnrollmentStatus,
    #[serde(with = "crate::domain::timestamp")]
    pub created_at: Timestamp,
}

impl Enrollment {
    pub fn new(tournament_id: TournamentId, team_id: TeamId, status: EnrollmentStatus) -> Self {
        Self {
            id: EnrollmentId::generate(),
            tournament_id,
            team_id,
            status,
            created_at: now(),
        }
    }
}
