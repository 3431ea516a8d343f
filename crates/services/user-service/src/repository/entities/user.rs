//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use domain::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User::from_persisted(
            model.id,
            model.username,
            model.email,
            model.password_hash,
            model.created_at,
            model.updated_at,
        )
    }
}

/// Every column of a domain entity, written verbatim
impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id()),
            username: Set(user.username().to_string()),
            email: Set(user.email().to_string()),
            password_hash: Set(user.password_hash().to_string()),
            created_at: Set(user.created_at()),
            updated_at: Set(user.updated_at()),
        }
    }
}
