//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::error::ValueObjectError;

/// Maximum length accepted for identifiers coming from the backend or the URL
const MAX_ID_LEN: usize = 100;

/// Room identifier value object.
///
/// Opaque and stable: the backend assigns it (`_id`) and it never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Create a new RoomId.
    ///
    /// # Arguments
    ///
    /// * `id` - The room identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomId or an error if validation fails
    pub fn new(id: impl Into<String>) -> Result<Self, ValueObjectError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = id.len();
        if len > MAX_ID_LEN {
            return Err(ValueObjectError::RoomIdTooLong {
                max: MAX_ID_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomId> for String {
    fn from(value: RoomId) -> Self {
        value.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Participant identifier value object.
///
/// The identity reported in `cheat-detected` events and used to find the
/// viewer in a lobby roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Identity used when nothing is stored locally
    pub const ANONYMOUS: &'static str = "anonymous";

    pub fn new(id: impl Into<String>) -> Result<Self, ValueObjectError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValueObjectError::ParticipantIdEmpty);
        }
        let len = id.len();
        if len > MAX_ID_LEN {
            return Err(ValueObjectError::ParticipantIdTooLong {
                max: MAX_ID_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParticipantId> for String {
    fn from(value: ParticipantId) -> Self {
        value.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room code typed into the join form.
///
/// Always uppercase and at most [`RoomCode::MAX_LEN`] characters; input beyond
/// the cap is dropped, like a length-capped text field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    pub const MAX_LEN: usize = 12;

    /// Normalise raw input: uppercase, then truncate to the cap.
    pub fn from_input(input: &str) -> Self {
        Self(input.to_uppercase().chars().take(Self::MAX_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code with surrounding whitespace removed, as submitted.
    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Battle difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ValueObjectError;

    /// Case-insensitive parse of `Easy | Medium | Hard`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValueObjectError::UnknownDifficulty(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Room status as shown on a room card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Waiting,
    Live,
    Finished,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Waiting => "waiting",
            RoomStatus::Live => "live",
            RoomStatus::Finished => "finished",
        }
    }

    /// Label shown on the card badge
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Waiting => "Waiting",
            RoomStatus::Live => "Live",
            RoomStatus::Finished => "Finished",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "waiting" => Ok(RoomStatus::Waiting),
            "live" => Ok(RoomStatus::Live),
            "finished" => Ok(RoomStatus::Finished),
            _ => Err(ValueObjectError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External judge a room draws problems from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    LeetCode,
    GeeksforGeeks,
    CodeChef,
    Codeforces,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::LeetCode,
        Platform::GeeksforGeeks,
        Platform::CodeChef,
        Platform::Codeforces,
    ];

    /// Identifier sent to the backend
    pub fn id(&self) -> &'static str {
        match self {
            Platform::LeetCode => "leetcode",
            Platform::GeeksforGeeks => "gfg",
            Platform::CodeChef => "codechef",
            Platform::Codeforces => "codeforces",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::GeeksforGeeks => "GeeksforGeeks",
            Platform::CodeChef => "CodeChef",
            Platform::Codeforces => "Codeforces",
        }
    }
}

impl FromStr for Platform {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValueObjectError::UnknownPlatform(s.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_new_success() {
        // テスト項目: 有効なルーム ID を作成できる
        // given (前提条件):
        let id = "65f1c0ffee".to_string();

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "65f1c0ffee");
    }

    #[test]
    fn test_room_id_new_empty_fails() {
        // テスト項目: 空のルーム ID は作成できない
        // when (操作):
        let result = RoomId::new("");

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomIdEmpty);
    }

    #[test]
    fn test_room_id_new_too_long_fails() {
        // テスト項目: 101 文字以上のルーム ID は作成できない
        // given (前提条件):
        let id = "a".repeat(101);

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::RoomIdTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_room_id_deserialize_rejects_empty() {
        // テスト項目: JSON からのデシリアライズでも空の ID は拒否される
        // when (操作):
        let result: Result<RoomId, _> = serde_json::from_str("\"\"");

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_participant_id_anonymous() {
        // テスト項目: 匿名の参加者 ID は "anonymous"
        // then (期待する結果):
        assert_eq!(ParticipantId::anonymous().as_str(), "anonymous");
    }

    #[test]
    fn test_room_code_is_uppercased_and_capped() {
        // テスト項目: ルームコードは大文字化され 12 文字に切り詰められる
        // when (操作):
        let code = RoomCode::from_input("arena-abcdefghijk");

        // then (期待する結果):
        assert_eq!(code.as_str(), "ARENA-ABCDEF");
        assert_eq!(code.as_str().chars().count(), RoomCode::MAX_LEN);
    }

    #[test]
    fn test_room_code_blank() {
        // テスト項目: 空白のみのコードは blank と判定される
        // then (期待する結果):
        assert!(RoomCode::from_input("   ").is_blank());
        assert!(!RoomCode::from_input(" r1 ").is_blank());
        assert_eq!(RoomCode::from_input(" r1 ").trimmed(), "R1");
    }

    #[test]
    fn test_difficulty_parse_case_insensitive() {
        // テスト項目: 難易度は大文字小文字を区別せずにパースできる
        // then (期待する結果):
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_status_parse() {
        // テスト項目: ステータスをパースできる
        // then (期待する結果):
        assert_eq!("live".parse::<RoomStatus>().unwrap(), RoomStatus::Live);
        assert_eq!(
            "Finished".parse::<RoomStatus>().unwrap(),
            RoomStatus::Finished
        );
        assert_eq!(
            "closed".parse::<RoomStatus>().unwrap_err(),
            ValueObjectError::UnknownStatus("closed".to_string())
        );
    }

    #[test]
    fn test_platform_ids() {
        // テスト項目: プラットフォーム ID とパースが対応している
        // then (期待する結果):
        for platform in Platform::ALL {
            assert_eq!(platform.id().parse::<Platform>().unwrap(), platform);
        }
        assert_eq!("gfg".parse::<Platform>().unwrap(), Platform::GeeksforGeeks);
    }
}
