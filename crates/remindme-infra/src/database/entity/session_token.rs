//! Session token entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "session_tokens")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(unique)]
    pub account_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for remindme_core::domain::SessionToken {
    fn from(model: Model) -> Self {
        Self {
            key: model.key,
            account_id: model.account_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<remindme_core::domain::SessionToken> for ActiveModel {
    fn from(token: remindme_core::domain::SessionToken) -> Self {
        Self {
            key: Set(token.key),
            account_id: Set(token.account_id),
            created_at: Set(token.created_at.into()),
        }
    }
}
