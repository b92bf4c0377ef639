//! Reminder entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reminders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub reminder_title: String,
    pub end_date_time: DateTimeWithTimeZone,
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

impl From<Model> for remindme_core::domain::Reminder {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            owner_id: model.account_id,
            title: model.reminder_title,
            end_date_time: model.end_date_time.into(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<remindme_core::domain::Reminder> for ActiveModel {
    fn from(reminder: remindme_core::domain::Reminder) -> Self {
        Self {
            id: Set(reminder.id),
            account_id: Set(reminder.owner_id),
            reminder_title: Set(reminder.title),
            end_date_time: Set(reminder.end_date_time.into()),
            created_at: Set(reminder.created_at.into()),
        }
    }
}
