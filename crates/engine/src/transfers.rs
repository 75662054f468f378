//! Transfers ("ajustes"): cash handed from one partner to the other.
//!
//! The partner who logged a transfer is not necessarily the payer or the
//! payee.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, PartnerId, aggregate::Amounted};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub id: Uuid,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
    pub payer: PartnerId,
    pub payee: PartnerId,
    pub recorded_by: PartnerId,
}

impl Amounted for Transfer {
    fn amount(&self) -> Money {
        self.amount
    }
}

#[derive(Clone, Debug)]
pub struct TransferInput {
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
    pub payer: String,
    pub payee: String,
    pub recorded_by: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub amount_minor: i64,
    pub occurred_at: DateTimeUtc,
    pub description: Option<String>,
    pub payer: String,
    pub payee: String,
    pub recorded_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transfer> for ActiveModel {
    fn from(transfer: &Transfer) -> Self {
        Self {
            id: ActiveValue::Set(transfer.id),
            amount_minor: ActiveValue::Set(transfer.amount.minor()),
            occurred_at: ActiveValue::Set(transfer.occurred_at),
            description: ActiveValue::Set(transfer.description.clone()),
            payer: ActiveValue::Set(transfer.payer.as_str().to_string()),
            payee: ActiveValue::Set(transfer.payee.as_str().to_string()),
            recorded_by: ActiveValue::Set(transfer.recorded_by.as_str().to_string()),
        }
    }
}

impl TryFrom<Model> for Transfer {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            amount: Money::new(model.amount_minor),
            occurred_at: model.occurred_at,
            description: model.description,
            payer: PartnerId::new(&model.payer)?,
            payee: PartnerId::new(&model.payee)?,
            recorded_by: PartnerId::new(&model.recorded_by)?,
        })
    }
}
