use crate::model::auth::Role;

/// Whether `user_id` is the configured administrator.
///
/// False when nothing is configured or the configured value is not an integer, so a
/// misconfiguration never grants access.
pub fn is_admin(user_id: i64, configured: Option<&str>) -> bool {
    configured
        .and_then(|value| value.trim().parse::<i64>().ok())
        .is_some_and(|admin_id| admin_id == user_id)
}

/// Admin capability check against the administrator configured at startup.
#[derive(Clone, Debug, Default)]
pub struct AdminAuthorizer {
    admin_user_id: Option<i64>,
}

impl AdminAuthorizer {
    pub fn new(configured: Option<&str>) -> Self {
        let admin_user_id = configured.and_then(|value| match value.trim().parse::<i64>() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "ADMIN_USER_ID is not a valid integer; admin access is disabled"
                );
                None
            }
        });

        Self { admin_user_id }
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_user_id == Some(user_id)
    }

    /// Whether a valid administrator ID was configured.
    pub fn is_configured(&self) -> bool {
        self.admin_user_id.is_some()
    }

    pub fn role_for(&self, user_id: i64) -> Role {
        if self.is_admin(user_id) {
            Role::Admin
        } else {
            Role::User
        }
    }
}
