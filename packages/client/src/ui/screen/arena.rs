//! `/arena/:roomId`: timed coding session.

use tokio::sync::mpsc;

use crate::{
    domain::{ARENA_DURATION_SECS, ArenaSession, PageSignal, RoomId, format_mm_ss},
    ui::{input::LineReader, render, state::AppContext},
    usecase::{ArenaController, ArenaInput, ArenaUpdate, STARTER_CODE},
};

use super::{ScreenResult, auth::split_command};

const COMMANDS: &[(&str, &str)] = &[
    ("edit", "replace the code; end with a line holding only `.`"),
    ("show", "print the code"),
    ("run", "run the sample tests"),
    ("submit", "submit the solution"),
    ("time", "time left"),
    ("blur", "switch to another tab"),
    ("exit-fullscreen", "leave fullscreen"),
    ("copy | paste", "press Ctrl+C / Ctrl+V"),
    ("confirm", "acknowledge a disqualification"),
    ("quit", "exit"),
];

pub async fn show(ctx: &AppContext, terminal: &mut LineReader, room_id: &RoomId) -> ScreenResult {
    let session = ArenaSession::new(room_id.clone(), ctx.viewer(), ARENA_DURATION_SECS);
    println!("== Arena {} ==  Time left {}", room_id, session.time_left());
    render::help(COMMANDS);
    println!("{STARTER_CODE}");

    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();
    let (inputs_tx, inputs_rx) = mpsc::channel(16);
    let run = ArenaController::new(session, ctx.arena_ports(), updates_tx).run(inputs_rx);
    tokio::pin!(run);

    let mut source = STARTER_CODE.to_string();
    let mut editing: Option<Vec<String>> = None;
    let mut remaining = ARENA_DURATION_SECS;

    loop {
        terminal.request(if editing.is_some() { "... " } else { "arena> " });
        tokio::select! {
            navigation = &mut run => return Ok(Some(navigation)),

            Some(update) = updates_rx.recv() => {
                if let ArenaUpdate::Tick(secs) = update {
                    remaining = secs;
                }
                render::arena_update(&update);
            }

            line = terminal.next() => {
                let Some(line) = line? else {
                    return Ok(None);
                };
                if let Some(buffer) = editing.as_mut() {
                    if line.trim() == "." {
                        source = buffer.join("\n");
                        editing = None;
                        send(&inputs_tx, ArenaInput::Edit(source.clone())).await;
                    } else {
                        buffer.push(line);
                    }
                    continue;
                }
                let input = match split_command(&line).0 {
                    "" => continue,
                    "edit" => {
                        editing = Some(Vec::new());
                        continue;
                    }
                    "show" => {
                        println!("{source}");
                        continue;
                    }
                    "time" => {
                        println!("Time left {}", format_mm_ss(remaining));
                        continue;
                    }
                    "run" => ArenaInput::Run,
                    "submit" => ArenaInput::Submit,
                    "blur" => ArenaInput::Signal(PageSignal::VisibilityChanged { hidden: true }),
                    "exit-fullscreen" => {
                        ArenaInput::Signal(PageSignal::FullscreenChanged { active: false })
                    }
                    "copy" => ArenaInput::Signal(shortcut("c")),
                    "paste" => ArenaInput::Signal(shortcut("v")),
                    "confirm" => ArenaInput::ConfirmDisqualification,
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
                send(&inputs_tx, input).await;
            }
        }
    }
}

fn shortcut(key: &str) -> PageSignal {
    PageSignal::KeyDown {
        key: key.to_string(),
        ctrl: true,
        meta: false,
    }
}

async fn send(inputs: &mpsc::Sender<ArenaInput>, input: ArenaInput) {
    if inputs.send(input).await.is_err() {
        tracing::debug!("Arena already finished");
    }
}
