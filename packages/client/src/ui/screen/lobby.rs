//! `/room/:roomId`: waiting lobby.

use tokio::sync::mpsc;

use crate::{
    domain::{Navigation, Route, RoomId},
    ui::{input::LineReader, render, state::AppContext},
    usecase::{LobbyController, LobbyInput, open_lobby, share_code},
};

use super::{ScreenResult, auth::split_command};

const COMMANDS: &[(&str, &str)] = &[
    ("ready", "mark yourself ready"),
    ("unready", "take it back"),
    ("start", "start now (host, everyone ready)"),
    ("code", "show the room code to share"),
    ("leave", "back to the dashboard"),
    ("quit", "exit"),
];

pub async fn show(ctx: &AppContext, terminal: &mut LineReader, room_id: &RoomId) -> ScreenResult {
    let lobby = match open_lobby(
        ctx.rooms.as_ref(),
        ctx.storage.as_ref(),
        room_id,
        ctx.settings.lobby_countdown_secs,
    )
    .await
    {
        Ok(lobby) => lobby,
        Err(e) => {
            tracing::warn!("Cannot open lobby of room {}: {}", room_id, e);
            return Ok(Some(Navigation::with_notice(Route::Dashboard, e.notice())));
        }
    };
    render::lobby(&lobby);
    render::help(COMMANDS);
    let code = lobby.room().id.clone();

    let events = ctx.hub().subscribe(&LobbyController::EVENTS);
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();
    let (inputs_tx, inputs_rx) = mpsc::channel(8);
    let run = LobbyController::new(lobby, updates_tx).run(events, inputs_rx);
    tokio::pin!(run);

    loop {
        terminal.request("lobby> ");
        tokio::select! {
            navigation = &mut run => return Ok(Some(navigation)),

            Some(update) = updates_rx.recv() => render::lobby_update(&update),

            line = terminal.next() => {
                let Some(line) = line? else {
                    return Ok(None);
                };
                let input = match split_command(&line).0 {
                    "" => continue,
                    "ready" => LobbyInput::SetReady(true),
                    "unready" => LobbyInput::SetReady(false),
                    "start" => LobbyInput::StartNow,
                    "leave" => LobbyInput::Leave,
                    "code" => {
                        println!("{code}");
                        render::notice(&share_code(&code));
                        continue;
                    }
                    "help" => {
                        render::help(COMMANDS);
                        continue;
                    }
                    "quit" | "exit" => return Ok(None),
                    other => {
                        println!("Unknown command: {other}");
                        continue;
                    }
                };
                if inputs_tx.send(input).await.is_err() {
                    tracing::debug!("Lobby already finished");
                }
            }
        }
    }
}
