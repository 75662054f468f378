//! Read side of the record store.
//!
//! [`EventStore`] is the seam between the reconciliation code and whatever
//! holds the records. [`Snapshot::load`] pulls every collection once,
//! concurrently, and keeps going when one of them fails: the failed
//! collection is treated as empty and reported in [`Snapshot::unavailable`].

use std::future::Future;

use crate::{Category, CategoryNames, EngineError, Expense, ResultEngine, Sale, Transfer};

/// A collection fetched from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    Sales,
    Expenses,
    Transfers,
    ProductTypes,
    ExpenseCategories,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Expenses => "expenses",
            Self::Transfers => "transfers",
            Self::ProductTypes => "product_types",
            Self::ExpenseCategories => "expense_categories",
        }
    }
}

pub trait EventStore {
    fn fetch_sales(&self) -> impl Future<Output = ResultEngine<Vec<Sale>>> + Send;
    fn fetch_expenses(&self) -> impl Future<Output = ResultEngine<Vec<Expense>>> + Send;
    fn fetch_transfers(&self) -> impl Future<Output = ResultEngine<Vec<Transfer>>> + Send;
    fn fetch_product_types(&self) -> impl Future<Output = ResultEngine<Vec<Category>>> + Send;
    fn fetch_expense_categories(&self)
    -> impl Future<Output = ResultEngine<Vec<Category>>> + Send;
}

/// Fully materialized copy of the store, taken once per request.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub sales: Vec<Sale>,
    pub expenses: Vec<Expense>,
    pub transfers: Vec<Transfer>,
    pub product_types: Vec<Category>,
    pub expense_categories: Vec<Category>,
    /// Collections that failed to load and were replaced by empty lists.
    pub unavailable: Vec<Source>,
}

fn or_empty<T>(source: Source, result: ResultEngine<Vec<T>>, unavailable: &mut Vec<Source>) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(source = source.as_str(), "failed to load collection: {err}");
            unavailable.push(source);
            Vec::new()
        }
    }
}

impl Snapshot {
    /// Loads every collection from `store`.
    ///
    /// Fails with [`EngineError::Unavailable`] only when sales, expenses and
    /// transfers all failed; any smaller failure yields a degraded snapshot.
    pub async fn load<S>(store: &S) -> ResultEngine<Self>
    where
        S: EventStore + Sync,
    {
        let (sales, expenses, transfers, product_types, expense_categories) = tokio::join!(
            store.fetch_sales(),
            store.fetch_expenses(),
            store.fetch_transfers(),
            store.fetch_product_types(),
            store.fetch_expense_categories(),
        );

        let mut unavailable = Vec::new();
        let sales = or_empty(Source::Sales, sales, &mut unavailable);
        let expenses = or_empty(Source::Expenses, expenses, &mut unavailable);
        let transfers = or_empty(Source::Transfers, transfers, &mut unavailable);

        let records_missing = [Source::Sales, Source::Expenses, Source::Transfers]
            .iter()
            .all(|s| unavailable.contains(s));
        if records_missing {
            return Err(EngineError::Unavailable(
                "no record collection could be loaded".to_string(),
            ));
        }

        let product_types = or_empty(Source::ProductTypes, product_types, &mut unavailable);
        let expense_categories = or_empty(
            Source::ExpenseCategories,
            expense_categories,
            &mut unavailable,
        );

        Ok(Self {
            sales,
            expenses,
            transfers,
            product_types,
            expense_categories,
            unavailable,
        })
    }

    pub fn degraded(&self) -> bool {
        !self.unavailable.is_empty()
    }

    pub fn category_names(&self) -> CategoryNames {
        CategoryNames::new(&self.product_types, &self.expense_categories)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory store; `failing` collections return a database error.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) snapshot: Snapshot,
        pub(crate) failing: Vec<Source>,
    }

    impl MemoryStore {
        fn answer<T: Clone>(&self, source: Source, records: &[T]) -> ResultEngine<Vec<T>> {
            if self.failing.contains(&source) {
                return Err(EngineError::Database(sea_orm::DbErr::Custom(format!(
                    "{} offline",
                    source.as_str()
                ))));
            }
            Ok(records.to_vec())
        }
    }

    impl EventStore for MemoryStore {
        async fn fetch_sales(&self) -> ResultEngine<Vec<Sale>> {
            self.answer(Source::Sales, &self.snapshot.sales)
        }

        async fn fetch_expenses(&self) -> ResultEngine<Vec<Expense>> {
            self.answer(Source::Expenses, &self.snapshot.expenses)
        }

        async fn fetch_transfers(&self) -> ResultEngine<Vec<Transfer>> {
            self.answer(Source::Transfers, &self.snapshot.transfers)
        }

        async fn fetch_product_types(&self) -> ResultEngine<Vec<Category>> {
            self.answer(Source::ProductTypes, &self.snapshot.product_types)
        }

        async fn fetch_expense_categories(&self) -> ResultEngine<Vec<Category>> {
            self.answer(Source::ExpenseCategories, &self.snapshot.expense_categories)
        }
    }

    #[tokio::test]
    async fn healthy_store_is_not_degraded() {
        let store = MemoryStore::default();
        let snapshot = Snapshot::load(&store).await.unwrap();
        assert!(!snapshot.degraded());
    }

    #[tokio::test]
    async fn failed_collection_degrades_to_empty() {
        let store = MemoryStore {
            failing: vec![Source::Expenses, Source::ProductTypes],
            ..Default::default()
        };
        let snapshot = Snapshot::load(&store).await.unwrap();
        assert!(snapshot.degraded());
        assert!(snapshot.expenses.is_empty());
        assert_eq!(
            snapshot.unavailable,
            vec![Source::Expenses, Source::ProductTypes]
        );
    }

    #[tokio::test]
    async fn total_outage_is_an_error() {
        let store = MemoryStore {
            failing: vec![Source::Sales, Source::Expenses, Source::Transfers],
            ..Default::default()
        };
        let err = Snapshot::load(&store).await.unwrap_err();
        assert!(matches!(err, EngineError::Unavailable(_)));
    }

    /// Every fetch waits until all five have started.
    struct GatedStore {
        gate: tokio::sync::Barrier,
    }

    impl GatedStore {
        async fn pass<T>(&self) -> ResultEngine<Vec<T>> {
            self.gate.wait().await;
            Ok(Vec::new())
        }
    }

    impl EventStore for GatedStore {
        async fn fetch_sales(&self) -> ResultEngine<Vec<Sale>> {
            self.pass().await
        }

        async fn fetch_expenses(&self) -> ResultEngine<Vec<Expense>> {
            self.pass().await
        }

        async fn fetch_transfers(&self) -> ResultEngine<Vec<Transfer>> {
            self.pass().await
        }

        async fn fetch_product_types(&self) -> ResultEngine<Vec<Category>> {
            self.pass().await
        }

        async fn fetch_expense_categories(&self) -> ResultEngine<Vec<Category>> {
            self.pass().await
        }
    }

    #[tokio::test]
    async fn collections_are_fetched_concurrently() {
        let store = GatedStore {
            gate: tokio::sync::Barrier::new(5),
        };
        let snapshot = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            Snapshot::load(&store),
        )
        .await
        .expect("fetches ran one after another")
        .unwrap();
        assert!(!snapshot.degraded());
    }

    #[tokio::test]
    async fn taxonomies_load_even_when_records_fail() {
        let store = MemoryStore {
            failing: vec![Source::Transfers, Source::ExpenseCategories],
            ..Default::default()
        };
        let snapshot = Snapshot::load(&store).await.unwrap();
        assert_eq!(
            snapshot.unavailable,
            vec![Source::Transfers, Source::ExpenseCategories]
        );
    }
}
