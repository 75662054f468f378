use sea_orm::{QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Transfer, TransferInput, transfers, validation::transfer_from_input,
};

use super::Engine;

impl Engine {
    /// Records cash handed from `payer` to `payee`.
    pub async fn create_transfer(&self, input: TransferInput) -> ResultEngine<Transfer> {
        let transfer = transfer_from_input(&self.partners, Uuid::new_v4(), input)?;

        transfers::ActiveModel::from(&transfer)
            .insert(&self.database)
            .await?;
        tracing::info!(
            transfer_id = %transfer.id,
            payer = %transfer.payer,
            payee = %transfer.payee,
            amount = %transfer.amount,
            "transfer created"
        );
        Ok(transfer)
    }

    pub async fn transfer(&self, id: Uuid) -> ResultEngine<Transfer> {
        let model = transfers::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("transfer {id}")))?;
        Transfer::try_from(model)
    }

    /// All transfers, newest first.
    pub async fn list_transfers(&self) -> ResultEngine<Vec<Transfer>> {
        transfers::Entity::find()
            .order_by_desc(transfers::Column::OccurredAt)
            .order_by_asc(transfers::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transfer::try_from)
            .collect()
    }

    pub async fn update_transfer(&self, id: Uuid, input: TransferInput) -> ResultEngine<Transfer> {
        self.transfer(id).await?;
        let transfer = transfer_from_input(&self.partners, id, input)?;

        transfers::ActiveModel::from(&transfer)
            .update(&self.database)
            .await?;
        tracing::info!(transfer_id = %id, "transfer updated");
        Ok(transfer)
    }

    pub async fn delete_transfer(&self, id: Uuid) -> ResultEngine<()> {
        let result = transfers::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(format!("transfer {id}")));
        }
        tracing::info!(transfer_id = %id, "transfer deleted");
        Ok(())
    }
}
