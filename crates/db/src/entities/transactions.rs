//! `SeaORM` Entity for transactions table.
//!
//! `amount_minor` holds the amount in hundredths; `timestamp` is the local
//! payment time as entered.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub person_id: i64,
    pub amount_minor: i64,
    pub timestamp: DateTime,
    pub proof_path: Option<String>,
    pub note: Option<String>,
    pub category: Option<String>,
    pub download_count: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::personnel::Entity",
        from = "Column::PersonId",
        to = "super::personnel::Column::Id"
    )]
    Personnel,
}

impl Related<super::personnel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Personnel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
