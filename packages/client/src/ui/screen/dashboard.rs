//! `/dashboard`: live room list with the create and join modals.

use crate::{
    domain::{Difficulty, Navigation, Platform, RoomId, Route},
    error::ClientError,
    ui::{input::LineReader, render, state::AppContext},
    usecase::{
        CreateRoomForm, CreateRoomModal, JoinRoomModal, MAX_PARTICIPANT_OPTIONS, MountedDirectory,
        TIMER_OPTIONS,
    },
};

use super::{ScreenResult, auth::split_command};

const COMMANDS: &[(&str, &str)] = &[
    ("list", "show the rooms"),
    ("search <text>", "filter by title or host"),
    ("clear", "drop the filter"),
    ("create", "create a room"),
    ("join [code]", "join with a room code"),
    ("demo-code", "fill in a demo room code"),
    ("enter <room id>", "join a listed room"),
    ("logout", "sign out"),
    ("quit", "exit"),
];

pub async fn show(ctx: &AppContext, terminal: &mut LineReader) -> ScreenResult {
    let viewer = ctx.viewer();
    let directory = MountedDirectory::mount(ctx.rooms.clone(), ctx.hub());
    let mut create = CreateRoomModal::new(ctx.rooms.clone(), viewer.as_str());
    let mut join = JoinRoomModal::new(ctx.rooms.clone(), ctx.settings.join_policy);
    let mut changes = directory.changes();
    let mut watching = true;
    let mut query = String::new();

    println!("Signed in as {viewer}{}", if ctx.is_online() { "" } else { " (offline)" });
    render::help(COMMANDS);
    let status = directory.loaded().await;
    render::room_list(&directory.rooms().await, &status, &query);
    changes.mark_unchanged();

    loop {
        terminal.request("dashboard> ");
        tokio::select! {
            changed = changes.changed(), if watching => {
                if changed.is_err() {
                    watching = false;
                    continue;
                }
                tracing::debug!("Room list changed");
                println!();
                render::room_list(&directory.search(&query).await, &directory.status().await, &query);
            }

            line = terminal.next() => {
                let Some(line) = line? else {
                    return Ok(None);
                };
                let (command, arg) = split_command(&line);
                match command {
                    "" => {}
                    "list" => {
                        render::room_list(&directory.search(&query).await, &directory.status().await, &query);
                    }
                    "search" => {
                        query = arg.to_string();
                        render::room_list(&directory.search(&query).await, &directory.status().await, &query);
                    }
                    "clear" => {
                        query.clear();
                        render::room_list(&directory.rooms().await, &directory.status().await, &query);
                    }
                    "create" => {
                        create.open();
                        if !fill_create_form(terminal, create.form_mut()).await? {
                            return Ok(None);
                        }
                        match create.submit().await {
                            Ok(created) => {
                                directory.insert_created(created.card).await;
                                render::notice(&created.notice);
                            }
                            Err(e) => {
                                render::notice(&e.notice());
                                // values stay in the form for the next attempt
                                create.close();
                            }
                        }
                    }
                    "join" => {
                        join.open();
                        if !arg.is_empty() {
                            join.set_code(arg);
                        }
                        match join.submit().await {
                            Ok(navigation) => return Ok(Some(navigation)),
                            Err(e) => {
                                render::notice(&e.notice());
                                join.close();
                            }
                        }
                    }
                    "demo-code" => {
                        let code = join.fill_demo_code();
                        println!("Room code: {code} (type `join` to use it)");
                    }
                    "enter" => match RoomId::new(arg) {
                        Ok(id) => match directory.join_listed(&id).await {
                            Ok(navigation) => return Ok(Some(navigation)),
                            Err(e) => render::notice(&e.notice()),
                        },
                        Err(e) => println!("{e}"),
                    },
                    "logout" => {
                        if let Err(e) = ctx.authenticator().sign_out() {
                            render::notice(&e.notice());
                            continue;
                        }
                        return Ok(Some(Navigation::to(Route::Home)));
                    }
                    "help" => render::help(COMMANDS),
                    "quit" | "exit" => return Ok(None),
                    other => println!("Unknown command: {other}"),
                }
            }
        }
    }
}

/// Prompt for every field; an empty answer keeps the current value.
///
/// Returns `false` when the terminal closed.
async fn fill_create_form(
    terminal: &mut LineReader,
    form: &mut CreateRoomForm,
) -> Result<bool, ClientError> {
    let Some(title) = ask(terminal, "Title", &form.title).await? else {
        return Ok(false);
    };
    form.title = title;

    let current = form.difficulty.map(|d| d.as_str().to_string()).unwrap_or_default();
    let Some(difficulty) = ask(terminal, "Difficulty (Easy/Medium/Hard)", &current).await? else {
        return Ok(false);
    };
    form.difficulty = difficulty.parse::<Difficulty>().ok();

    let label = format!("Max participants {MAX_PARTICIPANT_OPTIONS:?}");
    let Some(max) = ask(terminal, &label, &form.max_participants).await? else {
        return Ok(false);
    };
    form.max_participants = max;

    let label = format!("Timer minutes {TIMER_OPTIONS:?}");
    let Some(timer) = ask(terminal, &label, &form.timer).await? else {
        return Ok(false);
    };
    form.timer = timer;

    let current = form
        .platforms
        .iter()
        .map(Platform::id)
        .collect::<Vec<_>>()
        .join(",");
    let ids = Platform::ALL.map(|p| p.id()).join("/");
    let Some(platforms) = ask(terminal, &format!("Platforms, comma separated ({ids})"), &current).await?
    else {
        return Ok(false);
    };
    let mut selected = Vec::new();
    for id in platforms.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match id.parse::<Platform>() {
            Ok(platform) => selected.push(platform),
            Err(e) => println!("{e}"),
        }
    }
    for platform in Platform::ALL {
        form.set_platform(platform, selected.contains(&platform));
    }
    Ok(true)
}

async fn ask(
    terminal: &mut LineReader,
    label: &str,
    current: &str,
) -> Result<Option<String>, ClientError> {
    let prompt = if current.is_empty() {
        format!("{label}: ")
    } else {
        format!("{label} [{current}]: ")
    };
    Ok(terminal.read(&prompt).await?.map(|answer| {
        if answer.trim().is_empty() {
            current.to_string()
        } else {
            answer.trim().to_string()
        }
    }))
}
