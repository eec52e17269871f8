//! Account entity <-> model mapper

use lifecycle_core::entities::Account;
use lifecycle_core::value_objects::Snowflake;

use crate::models::AccountModel;

/// Convert AccountModel to Account entity
impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: Snowflake::new(model.id),
            email: model.email,
            display_name: model.display_name,
            email_verified: model.email_verified,
            created_at: model.created_at,
            last_activity: model.last_activity,
            warned_at: model.warned_at,
            deleted_at: model.deleted_at,
            anonymized: model.anonymized,
            updated_at: model.updated_at,
        }
    }
}
