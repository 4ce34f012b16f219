use async_trait::async_trait;

use crate::error::Error;
use crate::model::{NewUser, UserRecord};

/// Something that can create a user.
///
/// Implemented by [`SignupClient`](crate::SignupClient); tests substitute a
/// scripted implementation.
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, Error>;
}
