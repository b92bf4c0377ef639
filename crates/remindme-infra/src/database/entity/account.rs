//! Account entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reminder::Entity")]
    Reminder,
    #[sea_orm(has_one = "super::session_token::Entity")]
    SessionToken,
}

impl Related<super::reminder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reminder.def()
    }
}

impl Related<super::session_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for remindme_core::domain::Account {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
        }
    }
}

impl From<remindme_core::domain::Account> for ActiveModel {
    fn from(account: remindme_core::domain::Account) -> Self {
        Self {
            id: Set(account.id),
            username: Set(account.username),
            password_hash: Set(account.password_hash),
            created_at: Set(account.created_at.into()),
        }
    }
}
