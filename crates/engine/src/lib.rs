//! Bookkeeping engine for a two-partner business.
//!
//! Records (sales, expenses and transfers between partners) live in the
//! database behind [`Engine`]. Everything derived from them, the per-partner
//! [`Settlement`], the [`Dashboard`] and the [`Timeline`], is computed by
//! pure functions over a [`Snapshot`].

pub use categories::{Category, CategoryInput, CategoryKind, CategoryLookup, CategoryNames};
pub use dashboard::Dashboard;
pub use error::EngineError;
pub use expenses::{Expense, ExpenseInput};
pub use money::Money;
pub use ops::{Engine, EngineBuilder};
pub use partners::{Partner, PartnerId, Partners};
pub use sales::{Sale, SaleInput};
pub use settlement::{Settlement, SettlementSummary};
pub use store::{EventStore, Snapshot, Source};
pub use timeline::{Direction, EventDetails, EventKind, Timeline, TimelineEvent};
pub use transfers::{Transfer, TransferInput};

pub mod aggregate;
pub mod categories;
pub mod dashboard;
pub mod dates;
mod error;
mod expense_categories;
mod expenses;
mod money;
mod ops;
mod partners;
mod product_types;
mod sales;
pub mod settlement;
pub mod store;
pub mod timeline;
mod transfers;
mod util;
pub mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;
