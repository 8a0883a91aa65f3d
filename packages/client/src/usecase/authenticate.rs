//! UseCase: サインイン / サインアップ
//!
//! ログインに成功するとトークンをローカルストレージに保存します。
//! 以降のリクエストはゲートウェイがトークンを付与します。

use std::sync::Arc;

use crate::domain::{
    AuthGateway, Credentials, LocalStorage, Navigation, Notice, Registration, Route, TOKEN_KEY,
    USER_ID_KEY,
};

use super::error::AuthError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl AuthForm {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            email: email.into(),
            password: password.into(),
            confirm_password: String::new(),
        }
    }

    pub fn register(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::Register,
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    fn check_common(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::EmailRequired);
        }
        if self.password.is_empty() {
            return Err(AuthError::PasswordRequired);
        }
        Ok(())
    }

    pub fn credentials(&self) -> Result<Credentials, AuthError> {
        self.check_common()?;
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn registration(&self) -> Result<Registration, AuthError> {
        self.check_common()?;
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(Registration {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

pub struct AuthenticateUseCase {
    gateway: Arc<dyn AuthGateway>,
    storage: Arc<dyn LocalStorage>,
}

impl AuthenticateUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>, storage: Arc<dyn LocalStorage>) -> Self {
        Self { gateway, storage }
    }

    /// Sign in or sign up depending on the form mode
    pub async fn execute(&self, form: &AuthForm) -> Result<Navigation, AuthError> {
        match form.mode {
            AuthMode::Login => self.login(form).await,
            AuthMode::Register => self.register(form).await,
        }
    }

    async fn login(&self, form: &AuthForm) -> Result<Navigation, AuthError> {
        let credentials = form.credentials()?;
        let email = credentials.email.clone();
        let session = self.gateway.login(credentials).await?;
        match session.token {
            Some(token) => self.storage.set(TOKEN_KEY, &token)?,
            None => tracing::warn!("Login succeeded without a token"),
        }
        self.storage.set(USER_ID_KEY, &email)?;
        tracing::info!("Signed in as {}", email);
        Ok(Navigation::with_notice(
            Route::Dashboard,
            Notice::info("Welcome back!", "You've successfully logged in."),
        ))
    }

    async fn register(&self, form: &AuthForm) -> Result<Navigation, AuthError> {
        let registration = form.registration()?;
        let email = registration.email.clone();
        let session = self.gateway.register(registration).await?;
        tracing::info!(
            "Registered {}{}",
            email,
            session
                .message
                .map(|m| format!(": {m}"))
                .unwrap_or_default()
        );
        Ok(Navigation::with_notice(
            Route::Dashboard,
            Notice::info("Account created!", "Your account has been created."),
        ))
    }

    /// Forget the stored session
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_ID_KEY)?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn is_signed_in(&self) -> bool {
        self.storage.get(TOKEN_KEY).is_some_and(|t| !t.is_empty())
    }
}
