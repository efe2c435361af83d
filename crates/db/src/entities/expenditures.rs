//! `SeaORM` Entity for the expenditures table.
//!
//! One expenditure per activity and date. The appropriation, allotment,
//! and allotment balance columns are snapshots computed server-side at
//! creation time; they are never taken from caller input.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::RecordStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expenditures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub activity: String,
    pub date: Date,
    pub economic_classification: String,
    pub funding_source: String,
    pub natural_account: String,
    pub description: String,
    pub appropriation: Decimal,
    pub allotment: Decimal,
    pub allotment_balance: Decimal,
    pub releases: Decimal,
    pub actual_expenditure: Decimal,
    pub actual_payment: Decimal,
    pub status: RecordStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTimeWithTimeZone>,
    pub review_comment: Option<String>,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub organization: String,
    pub created_by: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
