//! UseCase: ルーム作成モーダル
//!
//! 入力の検証はネットワーク呼び出しの前に行います。検証エラーの場合は
//! リクエストを送らず、モーダルは開いたままです。

use std::sync::Arc;

use crate::domain::{
    Difficulty, NewRoom, Notice, Platform, RoomCard, RoomGateway, transform_room,
};

use super::error::CreateRoomError;

/// Max-player choices offered by the form
pub const MAX_PARTICIPANT_OPTIONS: [u32; 4] = [2, 4, 6, 8];

/// Timer choices (minutes) offered by the form
pub const TIMER_OPTIONS: [u32; 4] = [15, 30, 45, 60];

/// Raw form values, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRoomForm {
    pub title: String,
    pub difficulty: Option<Difficulty>,
    pub max_participants: String,
    pub timer: String,
    pub platforms: Vec<Platform>,
}

impl CreateRoomForm {
    /// Check or uncheck a platform, keeping the canonical order
    pub fn set_platform(&mut self, platform: Platform, checked: bool) {
        self.platforms.retain(|p| *p != platform);
        if checked {
            self.platforms.push(platform);
            self.platforms
                .sort_by_key(|p| Platform::ALL.iter().position(|x| x == p));
        }
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        let checked = !self.platforms.contains(&platform);
        self.set_platform(platform, checked);
    }

    pub fn validate(&self, host: &str) -> Result<NewRoom, CreateRoomError> {
        let name = self.title.trim();
        if name.is_empty() {
            return Err(CreateRoomError::TitleRequired);
        }
        let difficulty = self.difficulty.ok_or(CreateRoomError::DifficultyRequired)?;
        let max_participants = parse_option(&self.max_participants, &MAX_PARTICIPANT_OPTIONS)
            .ok_or_else(|| CreateRoomError::InvalidMaxParticipants(self.max_participants.clone()))?;
        let timer_minutes = parse_option(&self.timer, &TIMER_OPTIONS)
            .ok_or_else(|| CreateRoomError::InvalidTimer(self.timer.clone()))?;
        if self.platforms.is_empty() {
            return Err(CreateRoomError::NoPlatformSelected);
        }
        Ok(NewRoom {
            name: name.to_string(),
            difficulty,
            max_participants,
            timer_minutes,
            platforms: self.platforms.clone(),
            host: host.to_string(),
        })
    }
}

fn parse_option(raw: &str, options: &[u32]) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| options.contains(value))
}

/// A room created on the backend, ready for the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub card: RoomCard,
    pub notice: Notice,
}

pub struct CreateRoomModal {
    gateway: Arc<dyn RoomGateway>,
    host: String,
    open: bool,
    submitting: bool,
    form: CreateRoomForm,
}

impl CreateRoomModal {
    pub fn new(gateway: Arc<dyn RoomGateway>, host: impl Into<String>) -> Self {
        Self {
            gateway,
            host: host.into(),
            open: false,
            submitting: false,
            form: CreateRoomForm::default(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn form(&self) -> &CreateRoomForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateRoomForm {
        &mut self.form
    }

    /// Validate and send the form.
    ///
    /// On success the modal closes and the form resets. On any failure the
    /// modal stays open with its values.
    pub async fn submit(&mut self) -> Result<CreatedRoom, CreateRoomError> {
        if self.submitting {
            return Err(CreateRoomError::InFlight);
        }
        let room = self.form.validate(&self.host)?;

        self.submitting = true;
        let result = self.gateway.create_room(room).await;
        self.submitting = false;

        match result {
            Ok(record) => {
                let card = transform_room(&record);
                tracing::info!("Room created: {} ({})", card.title, card.id);
                self.open = false;
                self.form = CreateRoomForm::default();
                Ok(CreatedRoom {
                    card,
                    notice: Notice::info(
                        "Room Created!",
                        "Your coding battle room has been created successfully.",
                    ),
                })
            }
            Err(e) => {
                tracing::warn!("Failed to create room: {}", e);
                Err(CreateRoomError::Gateway(e))
            }
        }
    }
}
