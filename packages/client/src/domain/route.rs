//! Client-side routing surface.

use std::fmt;

use super::{notice::Notice, value_object::RoomId};

/// Page the client navigates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` (sign-in)
    Home,
    /// `/dashboard`
    Dashboard,
    /// `/room/:roomId` (waiting lobby)
    Room(RoomId),
    /// `/arena/:roomId`
    Arena(RoomId),
    /// `/results/:roomId`
    Results(RoomId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Room(id) => format!("/room/{id}"),
            Route::Arena(id) => format!("/arena/{id}"),
            Route::Results(id) => format!("/results/{id}"),
        }
    }

    /// Parse a path. Unknown paths and invalid room ids yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["dashboard"] => Some(Route::Dashboard),
            ["room", id] => RoomId::new(*id).ok().map(Route::Room),
            ["arena", id] => RoomId::new(*id).ok().map(Route::Arena),
            ["results", id] => RoomId::new(*id).ok().map(Route::Results),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A route change, optionally announced with a notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub notice: Option<Notice>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self {
            route,
            notice: None,
        }
    }

    pub fn with_notice(route: Route, notice: Notice) -> Self {
        Self {
            route,
            notice: Some(notice),
        }
    }
}
