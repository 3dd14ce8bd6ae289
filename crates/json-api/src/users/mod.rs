//! User credential handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

pub(crate) mod apitoken;
pub(crate) mod gittoken;

/// Credential issued for a user
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserTokenResponse {
    /// The login the credential belongs to
    pub login: String,

    /// The credential itself
    pub token: String,
}
