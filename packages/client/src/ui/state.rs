//! Application state shared by every screen.

use std::sync::Arc;

use crate::{
    config::Settings,
    domain::{AuthGateway, LocalStorage, ParticipantId, RoomGateway, stored_participant},
    error::ClientError,
    infrastructure::{
        gateway::{HttpGateway, SampleCodeRunner, SimulatedSubmitter, TerminalPresentation},
        realtime::{EventHub, RealtimeConnection},
        storage::FileStorage,
    },
    usecase::{ArenaPorts, AuthenticateUseCase},
};

/// Shared application context
pub struct AppContext {
    pub settings: Settings,
    /// Local storage (session token, user id)
    pub storage: Arc<dyn LocalStorage>,
    pub http: HttpGateway,
    pub rooms: Arc<dyn RoomGateway>,
    pub auth: Arc<dyn AuthGateway>,
    /// Live channel; `None` when the backend socket was unreachable
    connection: Option<RealtimeConnection>,
    hub: EventHub,
}

impl AppContext {
    /// Open local storage and connect the realtime channel.
    ///
    /// An unreachable socket is not fatal: the client keeps working on REST
    /// snapshots with a closed hub.
    pub async fn connect(settings: Settings) -> Result<Self, ClientError> {
        let storage: Arc<dyn LocalStorage> = Arc::new(FileStorage::open(&settings.storage_path)?);
        let http = HttpGateway::new(&settings.backend_url, storage.clone());

        let (connection, hub) = match RealtimeConnection::connect(&settings.ws_url).await {
            Ok(connection) => {
                let hub = connection.hub().clone();
                (Some(connection), hub)
            }
            Err(e) => {
                tracing::warn!("Realtime channel unavailable, continuing offline: {}", e);
                let (hub, _outbound) = EventHub::new();
                hub.close();
                (None, hub)
            }
        };

        Ok(Self {
            rooms: Arc::new(http.clone()),
            auth: Arc::new(http.clone()),
            settings,
            storage,
            http,
            connection,
            hub,
        })
    }

    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    pub fn is_online(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(RealtimeConnection::is_connected)
    }

    /// Participant id of the signed-in user
    pub fn viewer(&self) -> ParticipantId {
        stored_participant(self.storage.as_ref())
    }

    pub fn authenticator(&self) -> AuthenticateUseCase {
        AuthenticateUseCase::new(self.auth.clone(), self.storage.clone())
    }

    pub fn arena_ports(&self) -> ArenaPorts {
        ArenaPorts {
            emitter: Arc::new(self.hub.clone()),
            runner: Arc::new(SampleCodeRunner::default()),
            submitter: Arc::new(SimulatedSubmitter::default()),
            presentation: Arc::new(TerminalPresentation),
        }
    }

    pub async fn shutdown(self) {
        match self.connection {
            Some(connection) => connection.disconnect().await,
            None => self.hub.close(),
        }
    }
}

