use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::{
    domain::{
        chat::Chat,
        expert::{Expert, ExpertId, Gender},
        message::Message,
    },
    infra::error::AppError,
    usecases::contracts::{SeedData, SeedSource},
};

/// Loads the roster and initial chats from a TOML file.
///
/// ```toml
/// [[experts]]
/// name = "Dr. Aisha Verma"
/// gender = "female"
/// specialties = ["Psychiatry"]
/// rate_per_minute = 200
///
/// [[chats]]
/// expert = "Dr. Aisha Verma"
/// [[chats.messages]]
/// text = "Hello"
/// from = "expert"
/// seconds_ago = 60
/// ```
#[derive(Debug, Clone)]
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl SeedSource for FileSeedSource {
    fn load(&self) -> Result<SeedData, AppError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| AppError::SeedRead {
            path: self.path.clone(),
            source,
        })?;

        let file: SeedFile = toml::from_str(&raw).map_err(|source| AppError::SeedParse {
            path: self.path.clone(),
            source,
        })?;

        file.into_seed(&self.path)
    }
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    experts: Vec<SeedExpert>,
    #[serde(default)]
    chats: Vec<SeedChat>,
}

#[derive(Debug, Deserialize)]
struct SeedExpert {
    name: String,
    gender: Gender,
    #[serde(default)]
    specialties: Vec<String>,
    #[serde(default)]
    bio: String,
    rate_per_minute: f64,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeedChat {
    expert: String,
    #[serde(default)]
    messages: Vec<SeedMessage>,
}

#[derive(Debug, Deserialize)]
struct SeedMessage {
    text: String,
    from: SeedAuthor,
    #[serde(default)]
    seconds_ago: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SeedAuthor {
    User,
    Expert,
}

impl SeedFile {
    fn into_seed(self, path: &Path) -> Result<SeedData, AppError> {
        let experts: Vec<Expert> = self
            .experts
            .into_iter()
            .map(|seed| Expert {
                id: ExpertId::new(),
                name: seed.name,
                gender: seed.gender,
                specialties: seed.specialties,
                bio: seed.bio,
                rate_per_minute: seed.rate_per_minute,
                image: seed.image,
            })
            .collect();

        let now = Utc::now();
        let chats = self
            .chats
            .into_iter()
            .map(|seed| {
                let expert = experts
                    .iter()
                    .find(|expert| expert.name == seed.expert)
                    .cloned()
                    .ok_or_else(|| AppError::SeedUnknownExpert {
                        name: seed.expert.clone(),
                    })?;

                let messages = seed
                    .messages
                    .into_iter()
                    .map(|message| {
                        let at = seconds_before(now, message.seconds_ago).ok_or_else(|| {
                            AppError::SeedTimestamp {
                                path: path.to_path_buf(),
                                seconds_ago: message.seconds_ago,
                            }
                        })?;
                        Ok(match message.from {
                            SeedAuthor::User => Message::from_user(message.text, at),
                            SeedAuthor::Expert => Message::from_expert(message.text, at),
                        })
                    })
                    .collect::<Result<Vec<_>, AppError>>()?;

                Ok(Chat::seeded(expert, messages))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(SeedData { experts, chats })
    }
}

fn seconds_before(now: DateTime<Utc>, seconds_ago: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(seconds_ago).and_then(|delta| now.checked_sub_signed(delta))
}
