use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod partner {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartnerView {
        pub id: String,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartnersResponse {
        pub partners: Vec<PartnerView>,
    }
}

pub mod category {
    use super::*;

    /// Body for creating or renaming a product type or expense category.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpsert {
        pub name: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoriesResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod record {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordCreated {
        pub id: Uuid,
    }

    /// Body for creating or replacing a sale.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleUpsert {
        /// Must be > 0.
        pub amount_minor: i64,
        /// RFC3339 timestamp, or a `YYYY-MM-DD` date read as local midnight.
        pub occurred_at: String,
        pub description: Option<String>,
        pub client: Option<String>,
        pub quantity: Option<u32>,
        pub product_type_id: Uuid,
        /// Partner tag of whoever collected the cash.
        pub recorded_by: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleView {
        pub id: Uuid,
        pub amount_minor: i64,
        /// RFC3339 timestamp in the business timezone.
        pub occurred_at: DateTime<FixedOffset>,
        pub description: Option<String>,
        pub client: Option<String>,
        pub quantity: Option<u32>,
        pub product_type_id: Uuid,
        /// Product type name, `"unknown"` if it no longer resolves.
        pub product_type: String,
        pub recorded_by: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SalesResponse {
        pub sales: Vec<SaleView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpsert {
        /// Must be > 0.
        pub amount_minor: i64,
        /// RFC3339 timestamp, or a `YYYY-MM-DD` date read as local midnight.
        pub occurred_at: String,
        pub description: Option<String>,
        pub supplier: Option<String>,
        pub expense_category_id: Uuid,
        /// Partner tag of whoever paid.
        pub recorded_by: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub occurred_at: DateTime<FixedOffset>,
        pub description: Option<String>,
        pub supplier: Option<String>,
        pub expense_category_id: Uuid,
        pub expense_category: String,
        pub recorded_by: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesResponse {
        pub expenses: Vec<ExpenseView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferUpsert {
        /// Must be > 0.
        pub amount_minor: i64,
        pub occurred_at: String,
        pub description: Option<String>,
        pub payer: String,
        pub payee: String,
        /// Defaults to `payer` when absent.
        pub recorded_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub occurred_at: DateTime<FixedOffset>,
        pub description: Option<String>,
        pub payer: String,
        pub payee: String,
        pub recorded_by: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransfersResponse {
        pub transfers: Vec<TransferView>,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub partner: String,
        pub name: String,
        pub entitlement_minor: i64,
        pub obligation_minor: i64,
        pub collected_minor: i64,
        pub paid_minor: i64,
        pub transfers_out_minor: i64,
        pub transfers_in_minor: i64,
        pub net_transfers_minor: i64,
        pub cash_on_hand_minor: i64,
        /// Positive: owed to the partner. Negative: owed by the partner.
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DashboardResponse {
        pub total_sales_minor: i64,
        pub total_expenses_minor: i64,
        pub total_balance_minor: i64,
        /// Informational only, see `settlement` for what each partner owes.
        pub half_share_minor: i64,
        pub sales_by_category: BTreeMap<String, i64>,
        pub expenses_by_category: BTreeMap<String, i64>,
        pub sales_by_recorder: BTreeMap<String, i64>,
        pub expenses_by_recorder: BTreeMap<String, i64>,
        pub settlement: Vec<SettlementView>,
        pub sales_count: usize,
        pub expenses_count: usize,
        pub transfers_count: usize,
        /// True when some collection failed to load and was counted as empty.
        pub degraded: bool,
        pub unavailable: Vec<String>,
    }
}

pub mod timeline {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum EventKind {
        Sale,
        Expense,
        Transfer,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Direction {
        Inflow,
        Outflow,
        Internal,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventView {
        pub id: Uuid,
        pub kind: EventKind,
        pub occurred_at: DateTime<FixedOffset>,
        pub amount_minor: i64,
        /// Sales positive, expenses negative, transfers zero.
        pub signed_amount_minor: i64,
        pub direction: Direction,
        pub description: String,
        pub recorded_by: String,
        pub client: Option<String>,
        pub quantity: Option<u32>,
        pub supplier: Option<String>,
        /// Product type for sales, expense category for expenses.
        pub category: Option<String>,
        pub payer: Option<String>,
        pub payee: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TimelineResponse {
        pub events: Vec<EventView>,
        pub degraded: bool,
        pub unavailable: Vec<String>,
    }
}
