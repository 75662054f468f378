use crate::{
    Category, CategoryKind, Dashboard, Expense, ResultEngine, Sale, Transfer,
    dashboard::summarize,
    store::{EventStore, Snapshot},
    timeline::{Timeline, merge},
};

use super::Engine;

impl EventStore for Engine {
    async fn fetch_sales(&self) -> ResultEngine<Vec<Sale>> {
        self.list_sales().await
    }

    async fn fetch_expenses(&self) -> ResultEngine<Vec<Expense>> {
        self.list_expenses().await
    }

    async fn fetch_transfers(&self) -> ResultEngine<Vec<Transfer>> {
        self.list_transfers().await
    }

    async fn fetch_product_types(&self) -> ResultEngine<Vec<Category>> {
        self.list_categories(CategoryKind::ProductType).await
    }

    async fn fetch_expense_categories(&self) -> ResultEngine<Vec<Category>> {
        self.list_categories(CategoryKind::ExpenseCategory).await
    }
}

impl Engine {
    pub async fn snapshot(&self) -> ResultEngine<Snapshot> {
        Snapshot::load(self).await
    }

    /// Totals, breakdowns and settlement over every stored record.
    pub async fn dashboard(&self) -> ResultEngine<Dashboard> {
        let snapshot = self.snapshot().await?;
        summarize(&self.partners, &snapshot.category_names(), &snapshot)
    }

    pub async fn timeline(&self) -> ResultEngine<Timeline> {
        let snapshot = self.snapshot().await?;
        let events = merge(
            &self.partners,
            &snapshot.category_names(),
            &snapshot.sales,
            &snapshot.expenses,
            &snapshot.transfers,
        );
        tracing::debug!(events = events.len(), degraded = snapshot.degraded(), "timeline merged");
        Ok(Timeline {
            events,
            unavailable: snapshot.unavailable,
        })
    }
}
