use serde::Deserialize;

use crate::traits::Resolve;


/// Name of the environment variable that, when set, overrides `admin.token`.
pub const ADMIN_TOKEN_ENVIRONMENT_VARIABLE_NAME: &str = "LIRIK_ADMIN_TOKEN";


#[derive(Deserialize, Debug, Clone)]
pub(super) struct UnresolvedAdminConfiguration {
    token: Option<String>,
}

/// Administrator access configuration.
#[derive(Clone)]
pub struct AdminConfiguration {
    /// Shared secret for administrative endpoints.
    /// `None` when neither the configuration file nor the environment provide a non-empty token.
    pub token: Option<String>,
}

impl std::fmt::Debug for AdminConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfiguration")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

fn non_blank_token(token: Option<String>) -> Option<String> {
    token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// A non-blank environment token wins over the configuration file token.
fn pick_admin_token(
    token_from_environment: Option<String>,
    token_from_file: Option<String>,
) -> Option<String> {
    non_blank_token(token_from_environment).or_else(|| non_blank_token(token_from_file))
}

impl Resolve for UnresolvedAdminConfiguration {
    type Resolved = AdminConfiguration;

    fn resolve(self) -> Self::Resolved {
        let token_from_environment = std::env::var(ADMIN_TOKEN_ENVIRONMENT_VARIABLE_NAME).ok();

        Self::Resolved {
            token: pick_admin_token(token_from_environment, self.token),
        }
    }
}
