//! Sales ("ventas").
//!
//! A `Sale` is revenue collected in cash by the partner who recorded it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, PartnerId, aggregate::Amounted};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sale {
    pub id: Uuid,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub quantity: Option<u32>,
    pub product_type_id: Uuid,
    pub recorded_by: PartnerId,
}

impl Amounted for Sale {
    fn amount(&self) -> Money {
        self.amount
    }
}

/// Unvalidated sale fields, as received from the write boundary.
#[derive(Clone, Debug)]
pub struct SaleInput {
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
    pub client: Option<String>,
    pub quantity: Option<u32>,
    pub product_type_id: Uuid,
    pub recorded_by: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub amount_minor: i64,
    pub occurred_at: DateTimeUtc,
    pub description: Option<String>,
    pub client: Option<String>,
    pub quantity: Option<i64>,
    pub product_type_id: Uuid,
    pub recorded_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_types::Entity",
        from = "Column::ProductTypeId",
        to = "super::product_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    ProductType,
}

impl Related<super::product_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Sale> for ActiveModel {
    fn from(sale: &Sale) -> Self {
        Self {
            id: ActiveValue::Set(sale.id),
            amount_minor: ActiveValue::Set(sale.amount.minor()),
            occurred_at: ActiveValue::Set(sale.occurred_at),
            description: ActiveValue::Set(sale.description.clone()),
            client: ActiveValue::Set(sale.client.clone()),
            quantity: ActiveValue::Set(sale.quantity.map(i64::from)),
            product_type_id: ActiveValue::Set(sale.product_type_id),
            recorded_by: ActiveValue::Set(sale.recorded_by.as_str().to_string()),
        }
    }
}

impl TryFrom<Model> for Sale {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let quantity = model
            .quantity
            .map(u32::try_from)
            .transpose()
            .map_err(|_| {
                EngineError::InvalidRecord(format!("sale {}: quantity out of range", model.id))
            })?;
        Ok(Self {
            id: model.id,
            amount: Money::new(model.amount_minor),
            occurred_at: model.occurred_at,
            description: model.description,
            client: model.client,
            quantity,
            product_type_id: model.product_type_id,
            recorded_by: PartnerId::new(&model.recorded_by)?,
        })
    }
}
