//! `/`: sign in, sign up, OAuth hand-off.

use crate::{
    domain::{Navigation, Route},
    error::ClientError,
    infrastructure::gateway::OAuthProvider,
    ui::{input::LineReader, render, state::AppContext},
    usecase::{AuthForm, AuthMode},
};

use super::ScreenResult;

const COMMANDS: &[(&str, &str)] = &[
    ("login", "sign in with email and password"),
    ("register", "create an account"),
    ("oauth <provider>", "sign in with google or github"),
    ("browse", "open the dashboard without signing in"),
    ("quit", "exit"),
];

/// Home screen; with `mode` set the matching form opens right away.
pub async fn show(ctx: &AppContext, terminal: &mut LineReader, mode: Option<AuthMode>) -> ScreenResult {
    if let Some(mode) = mode {
        if let Some(navigation) = submit_form(ctx, terminal, mode).await? {
            return Ok(Some(navigation));
        }
    }

    println!("Welcome to CodeArena");
    render::help(COMMANDS);
    loop {
        let Some(line) = terminal.read("codearena> ").await? else {
            return Ok(None);
        };
        let (command, arg) = split_command(&line);
        match command {
            "" => {}
            "login" | "register" => {
                let mode = if command == "login" {
                    AuthMode::Login
                } else {
                    AuthMode::Register
                };
                if let Some(navigation) = submit_form(ctx, terminal, mode).await? {
                    return Ok(Some(navigation));
                }
            }
            "oauth" => match arg.parse::<OAuthProvider>() {
                Ok(provider) => println!("Open {} in your browser", ctx.http.oauth_url(provider)),
                Err(e) => println!("{e}"),
            },
            "browse" => return Ok(Some(Navigation::to(Route::Dashboard))),
            "help" => render::help(COMMANDS),
            "quit" | "exit" => return Ok(None),
            other => println!("Unknown command: {other}"),
        }
    }
}

/// Prompt for the form fields and authenticate. `None` on failure or cancel.
async fn submit_form(
    ctx: &AppContext,
    terminal: &mut LineReader,
    mode: AuthMode,
) -> Result<Option<Navigation>, ClientError> {
    let Some(email) = terminal.read("Email: ").await? else {
        return Ok(None);
    };
    let Some(password) = terminal.read("Password: ").await? else {
        return Ok(None);
    };
    let form = match mode {
        AuthMode::Login => AuthForm::login(email, password),
        AuthMode::Register => {
            let Some(confirm) = terminal.read("Confirm password: ").await? else {
                return Ok(None);
            };
            AuthForm::register(email, password, confirm)
        }
    };

    match ctx.authenticator().execute(&form).await {
        Ok(navigation) => Ok(Some(navigation)),
        Err(e) => {
            render::notice(&e.notice());
            Ok(None)
        }
    }
}

/// `"join ABC"` → `("join", "ABC")`
pub(super) fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        // テスト項目: コマンドと引数の分割
        // then (期待する結果):
        assert_eq!(split_command("  join  arena42 "), ("join", "arena42"));
        assert_eq!(split_command("list"), ("list", ""));
        assert_eq!(split_command("   "), ("", ""));
        assert_eq!(split_command("search two words"), ("search", "two words"));
    }
}
