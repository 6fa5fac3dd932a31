//! User service

use tomon_common::{ClientError, ClientResult};
use tomon_core::{Snowflake, User};
use tracing::instrument;

use super::context::ServiceContext;

/// User lookups
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Find a user among cached channel recipients and guild members
    ///
    /// Cache only: there is no REST lookup for arbitrary users.
    #[instrument(skip(self))]
    pub fn user(&self, user_id: Snowflake) -> ClientResult<User> {
        self.ctx
            .cache()
            .find_user(user_id)
            .ok_or_else(|| ClientError::not_found(format!("user {user_id}")))
    }
}
