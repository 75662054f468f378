use sea_orm::{QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Expense, ExpenseInput, ResultEngine, expenses, validation::expense_from_input,
};

use super::Engine;

impl Engine {
    pub async fn create_expense(&self, input: ExpenseInput) -> ResultEngine<Expense> {
        let expense = expense_from_input(&self.partners, Uuid::new_v4(), input)?;
        self.require_expense_category(expense.expense_category_id)
            .await?;

        expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        tracing::info!(expense_id = %expense.id, recorded_by = %expense.recorded_by, amount = %expense.amount, "expense created");
        Ok(expense)
    }

    pub async fn expense(&self, id: Uuid) -> ResultEngine<Expense> {
        let model = expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense {id}")))?;
        Expense::try_from(model)
    }

    /// All expenses, newest first.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .order_by_desc(expenses::Column::OccurredAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    pub async fn update_expense(&self, id: Uuid, input: ExpenseInput) -> ResultEngine<Expense> {
        self.expense(id).await?;
        let expense = expense_from_input(&self.partners, id, input)?;
        self.require_expense_category(expense.expense_category_id)
            .await?;

        expenses::ActiveModel::from(&expense)
            .update(&self.database)
            .await?;
        tracing::info!(expense_id = %id, "expense updated");
        Ok(expense)
    }

    pub async fn delete_expense(&self, id: Uuid) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("expense {id}")));
        }
        tracing::info!(expense_id = %id, "expense deleted");
        Ok(())
    }
}
