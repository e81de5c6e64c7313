//! User use-case service.
//!
//! # Invariants
//! - Service APIs never bypass the repository's save contract.
//! - The service stays storage-agnostic.

use crate::model::user::User;
use crate::repo::user_repo::{RepoResult, UserRepository};
use crate::store::context::RequestContext;
use serde::{Deserialize, Serialize};

/// Business fields accepted when registering a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Use-case wrapper around a `UserRepository`.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a user from request fields.
    ///
    /// # Contract
    /// - Returned user carries the generated id and creation timestamps.
    /// - Repository errors are returned unchanged.
    pub fn create_user(&self, ctx: &RequestContext, request: &CreateUserRequest) -> RepoResult<User> {
        let user = User::new(
            request.first_name.as_str(),
            request.last_name.as_str(),
            request.phone.as_str(),
        );
        self.repo.save(ctx, user)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}
