use sea_orm::{QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, Sale, SaleInput, sales, validation::sale_from_input};

use super::Engine;

impl Engine {
    pub async fn create_sale(&self, input: SaleInput) -> ResultEngine<Sale> {
        let sale = sale_from_input(&self.partners, Uuid::new_v4(), input)?;
        self.require_product_type(sale.product_type_id).await?;

        sales::ActiveModel::from(&sale).insert(&self.database).await?;
        tracing::info!(sale_id = %sale.id, recorded_by = %sale.recorded_by, amount = %sale.amount, "sale created");
        Ok(sale)
    }

    pub async fn sale(&self, id: Uuid) -> ResultEngine<Sale> {
        let model = sales::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("sale {id}")))?;
        Sale::try_from(model)
    }

    /// All sales, newest first.
    pub async fn list_sales(&self) -> ResultEngine<Vec<Sale>> {
        sales::Entity::find()
            .order_by_desc(sales::Column::OccurredAt)
            .order_by_asc(sales::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Sale::try_from)
            .collect()
    }

    /// Replaces every field of an existing sale.
    pub async fn update_sale(&self, id: Uuid, input: SaleInput) -> ResultEngine<Sale> {
        self.sale(id).await?;
        let sale = sale_from_input(&self.partners, id, input)?;
        self.require_product_type(sale.product_type_id).await?;

        sales::ActiveModel::from(&sale).update(&self.database).await?;
        tracing::info!(sale_id = %id, "sale updated");
        Ok(sale)
    }

    pub async fn delete_sale(&self, id: Uuid) -> ResultEngine<()> {
        let result = sales::Entity::delete_by_id(id).exec(&self.database).await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("sale {id}")));
        }
        tracing::info!(sale_id = %id, "sale deleted");
        Ok(())
    }
}
