use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Character {
    /// "Name (Job Lv.N)" with placeholders for missing fields.
    pub fn summary(&self) -> String {
        let star = if self.is_default { " *" } else { "" };
        format!(
            "{}{} ({} Lv.{})",
            self.name,
            star,
            self.job.as_deref().unwrap_or("no job"),
            self.level.map(|l| l.to_string()).unwrap_or_else(|| "?".into())
        )
    }
}

/// Body shared by `POST /me/characters` and `PUT /me/characters/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterForm {
    pub name: String,
    pub job: Option<String>,
    pub level: Option<i32>,
    pub is_default: bool,
}

impl From<&Character> for CharacterForm {
    fn from(c: &Character) -> Self {
        Self {
            name: c.name.clone(),
            job: c.job.clone(),
            level: c.level,
            is_default: c.is_default,
        }
    }
}

/// Pick the character to pre-select: the default one, else the only one.
pub fn preselect(characters: &[Character]) -> Option<&Character> {
    characters
        .iter()
        .find(|c| c.is_default)
        .or(if characters.len() == 1 {
            characters.first()
        } else {
            None
        })
}
