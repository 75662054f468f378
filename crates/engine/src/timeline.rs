//! Merged, newest-first view of sales, expenses and transfers.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{CategoryLookup, Expense, Money, PartnerId, Partners, Sale, Transfer, store::Source};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Sale,
    Expense,
    Transfer,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

/// Effect of an event on the partnership's cash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Inflow,
    Outflow,
    /// Cash moved between partners, the partnership total is unchanged.
    Internal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventDetails {
    Sale {
        client: Option<String>,
        quantity: Option<u32>,
        product_type: String,
    },
    Expense {
        supplier: Option<String>,
        category: String,
    },
    Transfer {
        payer: PartnerId,
        payee: PartnerId,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub kind: EventKind,
    pub occurred_at: DateTime<Utc>,
    pub amount: Money,
    pub direction: Direction,
    pub description: String,
    pub recorded_by: PartnerId,
    pub details: EventDetails,
}

impl TimelineEvent {
    /// Amount with display sign: sales positive, expenses negative, transfers zero.
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Inflow => self.amount,
            Direction::Outflow => -self.amount,
            Direction::Internal => Money::ZERO,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    /// Collections missing from `events` because they failed to load.
    pub unavailable: Vec<Source>,
}

impl Timeline {
    pub fn degraded(&self) -> bool {
        !self.unavailable.is_empty()
    }
}

/// Merges the three collections newest first.
///
/// Events sharing a timestamp keep their input order: sales, then expenses,
/// then transfers, each in the order given.
pub fn merge(
    partners: &Partners,
    lookup: &impl CategoryLookup,
    sales: &[Sale],
    expenses: &[Expense],
    transfers: &[Transfer],
) -> Vec<TimelineEvent> {
    let mut events = Vec::with_capacity(sales.len() + expenses.len() + transfers.len());

    events.extend(sales.iter().map(|sale| {
        let product_type = lookup.product_type_label(sale.product_type_id).to_string();
        TimelineEvent {
            id: sale.id,
            kind: EventKind::Sale,
            occurred_at: sale.occurred_at,
            amount: sale.amount,
            direction: Direction::Inflow,
            description: sale
                .description
                .clone()
                .unwrap_or_else(|| format!("Sale of {product_type}")),
            recorded_by: sale.recorded_by.clone(),
            details: EventDetails::Sale {
                client: sale.client.clone(),
                quantity: sale.quantity,
                product_type,
            },
        }
    }));

    events.extend(expenses.iter().map(|expense| {
        let category = lookup
            .expense_category_label(expense.expense_category_id)
            .to_string();
        TimelineEvent {
            id: expense.id,
            kind: EventKind::Expense,
            occurred_at: expense.occurred_at,
            amount: expense.amount,
            direction: Direction::Outflow,
            description: expense
                .description
                .clone()
                .unwrap_or_else(|| format!("Expense on {category}")),
            recorded_by: expense.recorded_by.clone(),
            details: EventDetails::Expense {
                supplier: expense.supplier.clone(),
                category,
            },
        }
    }));

    events.extend(transfers.iter().map(|transfer| TimelineEvent {
        id: transfer.id,
        kind: EventKind::Transfer,
        occurred_at: transfer.occurred_at,
        amount: transfer.amount,
        direction: Direction::Internal,
        description: transfer.description.clone().unwrap_or_else(|| {
            format!(
                "Transfer from {} to {}",
                partners.display_name(&transfer.payer),
                partners.display_name(&transfer.payee)
            )
        }),
        recorded_by: transfer.recorded_by.clone(),
        details: EventDetails::Transfer {
            payer: transfer.payer.clone(),
            payee: transfer.payee.clone(),
        },
    }));

    // `sort_by` is stable.
    events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    events
}
