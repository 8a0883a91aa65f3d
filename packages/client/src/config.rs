//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    domain::{DEFAULT_LOBBY_COUNTDOWN_SECS, RoomId, Route, ValueObjectError},
    infrastructure::{gateway::OAuthProvider, realtime::derive_ws_url},
    usecase::{AuthMode, JoinPolicy},
};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";
pub const DEFAULT_STORAGE_PATH: &str = ".codearena/storage.json";

#[derive(Parser, Debug)]
#[command(name = "codearena-client", author, version, about = "Terminal client for CodeArena coding battles", long_about = None)]
pub struct Cli {
    /// Base URL of the CodeArena backend
    #[arg(long, env = "CODEARENA_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Realtime socket URL (defaults to the backend URL with a ws scheme plus /ws)
    #[arg(long, env = "CODEARENA_WS_URL")]
    pub ws_url: Option<String>,

    /// File backing the local storage (session token, user id)
    #[arg(long, env = "CODEARENA_STORAGE", default_value = DEFAULT_STORAGE_PATH)]
    pub storage: PathBuf,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "CODEARENA_LOG", default_value = "info")]
    pub log_level: String,

    /// How room codes are checked before joining (optimistic or verify-exists)
    #[arg(long, default_value = "optimistic")]
    pub join_policy: JoinPolicy,

    /// Seconds between full readiness and the automatic start
    #[arg(long, default_value_t = DEFAULT_LOBBY_COUNTDOWN_SECS)]
    pub lobby_countdown: u32,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with email and password
    Login,
    /// Create an account
    Register,
    /// Print the OAuth sign-in URL of a provider
    Oauth { provider: OAuthProvider },
    /// Open the room dashboard
    Dashboard,
    /// Open the waiting lobby of a room
    Room { id: String },
    /// Enter the arena of a room
    Arena { id: String },
}

/// Where the client starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Auth(AuthMode),
    OAuth(OAuthProvider),
    Route(Route),
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend_url: String,
    pub ws_url: String,
    pub storage_path: PathBuf,
    pub join_policy: JoinPolicy,
    pub lobby_countdown_secs: u32,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            backend_url: self.backend_url.clone(),
            ws_url: self
                .ws_url
                .clone()
                .unwrap_or_else(|| derive_ws_url(&self.backend_url)),
            storage_path: self.storage.clone(),
            join_policy: self.join_policy,
            lobby_countdown_secs: self.lobby_countdown,
        }
    }

    /// Starting point; without a subcommand the client decides from the stored session
    pub fn launch(&self) -> Result<Option<Launch>, ValueObjectError> {
        let launch = match &self.command {
            None => return Ok(None),
            Some(Command::Login) => Launch::Auth(AuthMode::Login),
            Some(Command::Register) => Launch::Auth(AuthMode::Register),
            Some(Command::Oauth { provider }) => Launch::OAuth(*provider),
            Some(Command::Dashboard) => Launch::Route(Route::Dashboard),
            Some(Command::Room { id }) => Launch::Route(Route::Room(RoomId::new(id.clone())?)),
            Some(Command::Arena { id }) => Launch::Route(Route::Arena(RoomId::new(id.clone())?)),
        };
        Ok(Some(launch))
    }
}
