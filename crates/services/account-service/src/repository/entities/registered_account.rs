//! Registered account database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{CredentialRecord, Password};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registered_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub lowercase_key: String,
    pub nickname: String,
    /// NULL marks a passwordless account
    pub password_hash: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for CredentialRecord {
    fn from(model: Model) -> Self {
        CredentialRecord {
            lowercase_key: model.lowercase_key,
            nickname: model.nickname,
            password_hash: model.password_hash.map(Password::from_hash),
            created_at: model.created_at,
        }
    }
}
