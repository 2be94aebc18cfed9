//! Authentication service
//!
//! Handles user registration, login, server-side sessions and the bootstrap administrator.

use desk_common::auth::{generate_session_token, hash_password, verify_dummy, verify_password};
use desk_common::{AdminConfig, AppError};
use desk_core::entities::{NewUser, Session, User};
use desk_core::value_objects::Role;
use desk_core::DomainError;
use tracing::{debug, info, instrument, warn};

use crate::dto::{validate_request, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A successful login: the user and the session that now identifies them
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub session: Session,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user with role `user`
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        let request = request.normalized();
        validate_request(&request)?;

        // Email first: when both collide the email message wins
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .ctx
            .user_repo()
            .create(&NewUser::new(request.username, request.email, password_hash))
            .await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(user)
    }

    /// Login with email and password, opening a new session
    ///
    /// Unknown email and wrong password fail identically.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginOutcome> {
        let email = request.email.trim();

        let Some(user) = self.ctx.user_repo().find_by_email(email).await? else {
            verify_dummy(&request.password);
            warn!("Login failed: unknown email");
            return Err(AppError::InvalidCredentials.into());
        };

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let purged = self.ctx.session_repo().delete_expired().await?;
        if purged > 0 {
            debug!(purged, "Expired sessions removed");
        }

        let session = Session::new(generate_session_token(), user.id, self.ctx.session_ttl());
        self.ctx.session_repo().create(&session).await?;

        info!(user_id = %user.id, "User logged in successfully");
        Ok(LoginOutcome { user, session })
    }

    /// End a session; unknown tokens are ignored
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        self.ctx.session_repo().delete(token).await?;
        debug!("Session ended");
        Ok(())
    }

    /// Resolve a session token to its user, if the session is still valid
    #[instrument(skip_all)]
    pub async fn resolve_session(&self, token: &str) -> ServiceResult<Option<User>> {
        let Some(session) = self.ctx.session_repo().find_valid(token).await? else {
            return Ok(None);
        };

        Ok(self.ctx.user_repo().find_by_id(session.user_id).await?)
    }

    /// Make sure the configured administrator exists and holds the admin role
    ///
    /// Creates the account when the email is unknown, otherwise promotes it.
    /// An existing account keeps its password.
    #[instrument(skip(self, admin), fields(email = %admin.email))]
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> ServiceResult<User> {
        if let Some(mut user) = self.ctx.user_repo().find_by_email(&admin.email).await? {
            if !user.is_admin() {
                self.ctx.user_repo().set_role(user.id, Role::Admin).await?;
                user.role = Role::Admin;
                info!(user_id = %user.id, "Existing account promoted to admin");
            }
            return Ok(user);
        }

        let password_hash = hash_password(&admin.password)?;
        let user = self
            .ctx
            .user_repo()
            .create(
                &NewUser::new(admin.username.clone(), admin.email.clone(), password_hash)
                    .with_role(Role::Admin),
            )
            .await?;

        info!(user_id = %user.id, "Admin account created");
        Ok(user)
    }
}
