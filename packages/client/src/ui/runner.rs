//! Navigation loop.

use crate::{
    config::{Cli, Launch},
    domain::{Navigation, Route},
    error::ClientError,
};

use super::{input::LineReader, render, screen, state::AppContext};

/// Run the client until the user quits
pub async fn run(cli: Cli) -> Result<(), ClientError> {
    let settings = cli.settings();
    let launch = cli.launch()?;
    tracing::info!(
        "Starting client: backend={} ws={} join_policy={}",
        settings.backend_url,
        settings.ws_url,
        settings.join_policy
    );

    let ctx = AppContext::connect(settings).await?;

    if let Some(Launch::OAuth(provider)) = launch {
        println!("{}", ctx.http.oauth_url(provider));
        ctx.shutdown().await;
        return Ok(());
    }

    let result = match LineReader::spawn() {
        Ok(mut terminal) => navigate(&ctx, &mut terminal, launch).await,
        Err(e) => Err(e),
    };
    ctx.shutdown().await;
    result
}

async fn navigate(
    ctx: &AppContext,
    terminal: &mut LineReader,
    launch: Option<Launch>,
) -> Result<(), ClientError> {
    let mut navigation = match launch {
        Some(Launch::Route(route)) => Navigation::to(route),
        Some(Launch::Auth(mode)) => match screen::auth::show(ctx, terminal, Some(mode)).await? {
            Some(navigation) => navigation,
            None => return Ok(()),
        },
        Some(Launch::OAuth(_)) | None => {
            if ctx.authenticator().is_signed_in() {
                Navigation::to(Route::Dashboard)
            } else {
                Navigation::to(Route::Home)
            }
        }
    };

    loop {
        if let Some(notice) = &navigation.notice {
            render::notice(notice);
        }
        tracing::info!("Navigating to {}", navigation.route);
        let next = match &navigation.route {
            Route::Home => screen::auth::show(ctx, terminal, None).await?,
            Route::Dashboard => screen::dashboard::show(ctx, terminal).await?,
            Route::Room(id) => screen::lobby::show(ctx, terminal, id).await?,
            Route::Arena(id) => screen::arena::show(ctx, terminal, id).await?,
            Route::Results(id) => screen::results::show(terminal, id).await?,
        };
        match next {
            Some(next) => navigation = next,
            None => {
                tracing::info!("Quit from {}", navigation.route);
                return Ok(());
            }
        }
    }
}
