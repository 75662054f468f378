//! Expenses ("gastos").
//!
//! An `Expense` is paid in cash by the partner who recorded it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, PartnerId, aggregate::Amounted};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub expense_category_id: Uuid,
    pub recorded_by: PartnerId,
}

impl Amounted for Expense {
    fn amount(&self) -> Money {
        self.amount
    }
}

#[derive(Clone, Debug)]
pub struct ExpenseInput {
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub expense_category_id: Uuid,
    pub recorded_by: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub amount_minor: i64,
    pub occurred_at: DateTimeUtc,
    pub description: Option<String>,
    pub supplier: Option<String>,
    pub expense_category_id: Uuid,
    pub recorded_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expense_categories::Entity",
        from = "Column::ExpenseCategoryId",
        to = "super::expense_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    ExpenseCategory,
}

impl Related<super::expense_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id),
            amount_minor: ActiveValue::Set(expense.amount.minor()),
            occurred_at: ActiveValue::Set(expense.occurred_at),
            description: ActiveValue::Set(expense.description.clone()),
            supplier: ActiveValue::Set(expense.supplier.clone()),
            expense_category_id: ActiveValue::Set(expense.expense_category_id),
            recorded_by: ActiveValue::Set(expense.recorded_by.as_str().to_string()),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            amount: Money::new(model.amount_minor),
            occurred_at: model.occurred_at,
            description: model.description,
            supplier: model.supplier,
            expense_category_id: model.expense_category_id,
            recorded_by: PartnerId::new(&model.recorded_by)?,
        })
    }
}
