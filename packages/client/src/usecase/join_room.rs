//! UseCase: ルームコードでの参加
//!
//! コードは入力時に大文字化され、12 文字に制限されます。
//! 参加ポリシーが `VerifyExists` の場合だけ、遷移の前に一覧で存在を確認します。

use std::{fmt, str::FromStr, sync::Arc};

use rand::Rng;

use crate::domain::{Navigation, Notice, RoomCode, RoomGateway, RoomId, Route};

use super::error::JoinRoomError;

/// Prefix of generated demo codes
pub const DEMO_CODE_PREFIX: &str = "ARENA";

const DEMO_CODE_SUFFIX_LEN: usize = 6;
const BASE36_UPPER: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// How a typed room code is checked before navigating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Navigate straight to the lobby; the lobby deals with unknown rooms
    #[default]
    Optimistic,
    /// Look the code up in the room list first
    VerifyExists,
}

impl JoinPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinPolicy::Optimistic => "optimistic",
            JoinPolicy::VerifyExists => "verify-exists",
        }
    }
}

impl fmt::Display for JoinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "optimistic" => Ok(JoinPolicy::Optimistic),
            "verify-exists" | "verify" => Ok(JoinPolicy::VerifyExists),
            other => Err(format!("unknown join policy: {other}")),
        }
    }
}

/// `ARENA` followed by six random base-36 characters
pub fn generate_demo_code<R: Rng + ?Sized>(rng: &mut R) -> RoomCode {
    let suffix: String = (0..DEMO_CODE_SUFFIX_LEN)
        .map(|_| char::from(BASE36_UPPER[rng.gen_range(0..BASE36_UPPER.len())]))
        .collect();
    RoomCode::from_input(&format!("{DEMO_CODE_PREFIX}{suffix}"))
}

pub struct JoinRoomModal {
    gateway: Arc<dyn RoomGateway>,
    policy: JoinPolicy,
    open: bool,
    joining: bool,
    code: RoomCode,
}

impl JoinRoomModal {
    pub fn new(gateway: Arc<dyn RoomGateway>, policy: JoinPolicy) -> Self {
        Self {
            gateway,
            policy,
            open: false,
            joining: false,
            code: RoomCode::default(),
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

    pub fn is_joining(&self) -> bool {
        self.joining
    }

    pub fn policy(&self) -> JoinPolicy {
        self.policy
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn set_code(&mut self, input: &str) {
        self.code = RoomCode::from_input(input);
    }

    /// Fill the field with a demo code
    pub fn fill_demo_code(&mut self) -> &RoomCode {
        self.code = generate_demo_code(&mut rand::thread_rng());
        &self.code
    }

    pub async fn submit(&mut self) -> Result<Navigation, JoinRoomError> {
        if self.joining {
            return Err(JoinRoomError::InFlight);
        }
        if self.code.is_blank() {
            return Err(JoinRoomError::EmptyCode);
        }
        let code = self.code.trimmed().to_string();
        let room_id =
            RoomId::new(code.clone()).map_err(|_| JoinRoomError::InvalidCode(code.clone()))?;

        self.joining = true;
        let checked = self.check(&room_id).await;
        self.joining = false;
        let room_id = checked?;

        tracing::info!("Joining room {} ({})", room_id, self.policy);
        self.open = false;
        self.code = RoomCode::default();
        Ok(Navigation::with_notice(
            Route::Room(room_id),
            Notice::info("Joining Room", format!("Successfully joined room: {code}")),
        ))
    }

    /// Apply the join policy; returns the id to navigate to
    async fn check(&self, room_id: &RoomId) -> Result<RoomId, JoinRoomError> {
        match self.policy {
            JoinPolicy::Optimistic => Ok(room_id.clone()),
            JoinPolicy::VerifyExists => {
                let rooms = self.gateway.list_rooms().await?;
                rooms
                    .into_iter()
                    .map(|record| record.id)
                    .find(|id| id.as_str().eq_ignore_ascii_case(room_id.as_str()))
                    .ok_or_else(|| JoinRoomError::RoomNotFound(room_id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockRoomGateway, RoomRecord};
    use rand::{SeedableRng, rngs::StdRng};

    fn optimistic() -> JoinRoomModal {
        let mut gateway = MockRoomGateway::new();
        gateway.expect_list_rooms().never();
        JoinRoomModal::new(Arc::new(gateway), JoinPolicy::Optimistic)
    }

    #[test]
    fn test_demo_code_shape() {
        // テスト項目: デモコードは ARENA + 英大文字/数字 6 文字
        // given (前提条件):
        let mut rng = StdRng::seed_from_u64(7);

        // when (操作):
        let codes: Vec<RoomCode> = (0..50).map(|_| generate_demo_code(&mut rng)).collect();

        // then (期待する結果):
        for code in codes {
            let text = code.as_str();
            assert_eq!(text.len(), 11);
            assert!(text.starts_with("ARENA"));
            assert!(
                text[5..]
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
            );
        }
    }

    #[tokio::test]
    async fn test_optimistic_join_navigates_without_lookup() {
        // テスト項目: 楽観的ポリシーでは一覧を確認せずにロビーへ遷移する
        // given (前提条件):
        let mut modal = optimistic();
        modal.open();
        modal.set_code("arena7k2m9q");

        // when (操作):
        let navigation = modal.submit().await.unwrap();

        // then (期待する結果):
        assert_eq!(
            navigation.route,
            Route::Room(RoomId::new("ARENA7K2M9Q").unwrap())
        );
        let notice = navigation.notice.unwrap();
        assert_eq!(notice.title, "Joining Room");
        assert_eq!(notice.description, "Successfully joined room: ARENA7K2M9Q");
        assert!(!modal.is_open());
        assert!(modal.code().is_blank());
    }

    #[tokio::test]
    async fn test_blank_code_is_rejected() {
        // テスト項目: 空白だけのコードでは参加できない
        // given (前提条件):
        let mut modal = optimistic();
        modal.open();
        modal.set_code("   ");

        // when (操作):
        let result = modal.submit().await;

        // then (期待する結果):
        assert!(matches!(result, Err(JoinRoomError::EmptyCode)));
        assert!(modal.is_open());
    }

    #[tokio::test]
    async fn test_verify_exists_policy() {
        // テスト項目: 存在確認ポリシーでは未知のコードを拒否する
        // given (前提条件):
        let mut gateway = MockRoomGateway::new();
        gateway.expect_list_rooms().times(2).returning(|| {
            Ok(vec![RoomRecord::new(
                RoomId::new("abc123").unwrap(),
                "Known",
                vec![],
            )])
        });
        let mut modal = JoinRoomModal::new(Arc::new(gateway), JoinPolicy::VerifyExists);

        // when (操作):
        modal.set_code("nope");
        let unknown = modal.submit().await;
        modal.set_code("abc123");
        let known = modal.submit().await;

        // then (期待する結果):
        assert!(matches!(unknown, Err(JoinRoomError::RoomNotFound(_))));
        assert_eq!(
            known.unwrap().route,
            Route::Room(RoomId::new("abc123").unwrap())
        );
    }

    #[test]
    fn test_join_policy_parse() {
        // テスト項目: 参加ポリシーの文字列表現
        // then (期待する結果):
        assert_eq!("optimistic".parse::<JoinPolicy>(), Ok(JoinPolicy::Optimistic));
        assert_eq!(
            "verify-exists".parse::<JoinPolicy>(),
            Ok(JoinPolicy::VerifyExists)
        );
        assert!("maybe".parse::<JoinPolicy>().is_err());
        assert_eq!(JoinPolicy::default().to_string(), "optimistic");
    }
}
