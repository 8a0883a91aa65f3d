//! `/results/:roomId`

use crate::{
    domain::{Navigation, RoomId, Route},
    ui::input::LineReader,
};

use super::{ScreenResult, auth::split_command};

pub async fn show(terminal: &mut LineReader, room_id: &RoomId) -> ScreenResult {
    println!("== Results for room {room_id} ==");
    println!("Your solution has been recorded. Type `dashboard` to go back or `quit` to exit.");
    loop {
        let Some(line) = terminal.read("results> ").await? else {
            return Ok(None);
        };
        match split_command(&line).0 {
            "" => {}
            "dashboard" | "back" => return Ok(Some(Navigation::to(Route::Dashboard))),
            "quit" | "exit" => return Ok(None),
            other => println!("Unknown command: {other}"),
        }
    }
}
