//! One module per route.

pub(super) mod arena;
pub(super) mod auth;
pub(super) mod dashboard;
pub(super) mod lobby;
pub(super) mod results;

use crate::{domain::Navigation, error::ClientError};

/// Where to go next; `None` quits the client
pub(super) type ScreenResult = Result<Option<Navigation>, ClientError>;
