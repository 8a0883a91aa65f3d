//! Plain-text rendering of screens.

use crate::{
    domain::{Notice, RoomCard, WaitingLobby, format_mm_ss},
    usecase::{ArenaUpdate, DirectoryStatus, LobbyUpdate},
};

pub fn notice(notice: &Notice) {
    if notice.is_destructive() {
        println!("[!] {}: {}", notice.title, notice.description);
    } else {
        println!("[i] {}: {}", notice.title, notice.description);
    }
}

pub fn help(commands: &[(&str, &str)]) {
    println!("Commands:");
    for (name, what) in commands {
        println!("  {name:<18} {what}");
    }
}

pub fn room_list(rooms: &[RoomCard], status: &DirectoryStatus, query: &str) {
    match status {
        DirectoryStatus::Loading => println!("Loading rooms..."),
        DirectoryStatus::Failed(reason) => println!("Could not load rooms: {reason}"),
        DirectoryStatus::Ready => {}
    }
    if !query.is_empty() {
        println!("Rooms matching \"{query}\":");
    }
    if rooms.is_empty() {
        println!("  (no rooms)");
        return;
    }
    for room in rooms {
        let time_left = room
            .visible_time_left()
            .map(|t| format!(" starts in {t}"))
            .unwrap_or_default();
        println!(
            "  {:<14} {:<28} {:<7} {:<9} {}/{} host {}{}  [{}]  {}",
            room.id.as_str(),
            room.title,
            room.difficulty.as_str(),
            room.status.label(),
            room.participants,
            room.max_participants,
            room.host,
            time_left,
            room.platforms.join(", "),
            room.join_label(),
        );
    }
}

pub fn lobby(lobby: &WaitingLobby) {
    let room = lobby.room();
    println!("== {} ({}) ==", room.title, room.id);
    println!(
        "Difficulty {}  Max {}  Platforms {}{}",
        room.difficulty.as_str(),
        room.max_participants,
        room.platforms.join(", "),
        room.timer_minutes
            .map(|m| format!("  Timer {m} min"))
            .unwrap_or_default()
    );
    for participant in lobby.participants() {
        println!(
            "  {} {}{}{}",
            if participant.ready { "[x]" } else { "[ ]" },
            participant.name,
            if participant.is_host { " (host)" } else { "" },
            if &participant.id == lobby.viewer() { " (you)" } else { "" },
        );
    }
    println!("{}/{} ready", lobby.ready_count(), lobby.total());
}

pub fn lobby_update(update: &LobbyUpdate) {
    match update {
        LobbyUpdate::Tick(remaining) => {
            if *remaining % 10 == 0 || *remaining <= 5 {
                println!("Battle starts in {}", format_mm_ss(*remaining));
            }
        }
        LobbyUpdate::Roster { ready, total } => println!("{ready}/{total} ready"),
        LobbyUpdate::Rejected(e) => notice(&Notice::from(e)),
    }
}

pub fn arena_update(update: &ArenaUpdate) {
    match update {
        ArenaUpdate::Tick(remaining) => {
            if *remaining % 60 == 0 || *remaining <= 10 {
                println!("Time left {}", format_mm_ss(*remaining));
            }
        }
        ArenaUpdate::RunStarted => println!("Running..."),
        ArenaUpdate::RunFinished(output) => println!("{output}"),
        ArenaUpdate::Submitting(kind) => println!("Submitting ({kind:?})..."),
        ArenaUpdate::CheatDetected(reason) => {
            println!("*** Cheating detected: {reason} ***");
            println!("You have been disqualified. Type `confirm` to leave the arena.");
        }
        ArenaUpdate::Notice(n) => notice(n),
        ArenaUpdate::Rejected(e) => notice(&Notice::from(e)),
    }
}
