//! UseCase 層
//!
//! 画面ごとの処理（一覧の同期、作成、参加、認証、ロビー、アリーナ）を
//! ドメインのポートを通して実行します。

pub mod arena;
pub mod authenticate;
pub mod create_room;
pub mod directory;
pub mod error;
pub mod join_room;
pub mod lobby;

pub use arena::{ArenaController, ArenaInput, ArenaPorts, ArenaUpdate, STARTER_CODE};
pub use authenticate::{AuthForm, AuthMode, AuthenticateUseCase};
pub use create_room::{
    CreateRoomForm, CreateRoomModal, CreatedRoom, MAX_PARTICIPANT_OPTIONS, TIMER_OPTIONS,
};
pub use directory::{DirectoryStatus, MountedDirectory};
pub use error::{AuthError, CreateRoomError, JoinRoomError, LobbyOpenError};
pub use join_room::{JoinPolicy, JoinRoomModal, generate_demo_code};
pub use lobby::{LobbyController, LobbyInput, LobbyUpdate, open_lobby, share_code};
