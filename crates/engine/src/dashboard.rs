//! Dashboard summary: totals, breakdowns and the per-partner settlement.

use std::collections::BTreeMap;

use crate::{
    CategoryLookup, EngineError, Money, PartnerId, Partners, ResultEngine, Settlement,
    aggregate::{group_sum, total_amount},
    settlement::settle,
    store::{Snapshot, Source},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dashboard {
    pub total_sales: Money,
    pub total_expenses: Money,
    /// `total_sales - total_expenses`.
    pub total_balance: Money,
    /// Half of `total_balance`. Informational: it ignores who holds the
    /// cash, use `settlement` for what each partner owes.
    pub half_share: Money,
    pub sales_by_category: BTreeMap<String, Money>,
    pub expenses_by_category: BTreeMap<String, Money>,
    pub sales_by_recorder: BTreeMap<PartnerId, Money>,
    pub expenses_by_recorder: BTreeMap<PartnerId, Money>,
    pub settlement: Settlement,
    pub sales_count: usize,
    pub expenses_count: usize,
    pub transfers_count: usize,
    pub unavailable: Vec<Source>,
}

impl Dashboard {
    pub fn degraded(&self) -> bool {
        !self.unavailable.is_empty()
    }
}

fn with_both_partners(
    partners: &Partners,
    mut sums: BTreeMap<PartnerId, Money>,
) -> BTreeMap<PartnerId, Money> {
    for id in partners.ids() {
        sums.entry(id.clone()).or_insert(Money::ZERO);
    }
    sums
}

pub fn summarize(
    partners: &Partners,
    lookup: &impl CategoryLookup,
    snapshot: &Snapshot,
) -> ResultEngine<Dashboard> {
    let Snapshot {
        sales,
        expenses,
        transfers,
        ..
    } = snapshot;

    let settlement = settle(partners, sales, expenses, transfers)?;

    let total_sales = total_amount(sales)?;
    let total_expenses = total_amount(expenses)?;
    let total_balance = total_sales
        .checked_sub(total_expenses)
        .ok_or(EngineError::Overflow)?;

    let sales_by_category = group_sum(sales, |s| {
        lookup.product_type_label(s.product_type_id).to_string()
    })?;
    let expenses_by_category = group_sum(expenses, |e| {
        lookup.expense_category_label(e.expense_category_id).to_string()
    })?;
    let sales_by_recorder = with_both_partners(partners, group_sum(sales, |s| s.recorded_by.clone())?);
    let expenses_by_recorder =
        with_both_partners(partners, group_sum(expenses, |e| e.recorded_by.clone())?);

    tracing::debug!(
        sales = sales.len(),
        expenses = expenses.len(),
        transfers = transfers.len(),
        degraded = snapshot.degraded(),
        "dashboard summarized"
    );

    Ok(Dashboard {
        total_sales,
        total_expenses,
        total_balance,
        half_share: total_balance.half(),
        sales_by_category,
        expenses_by_category,
        sales_by_recorder,
        expenses_by_recorder,
        settlement,
        sales_count: sales.len(),
        expenses_count: expenses.len(),
        transfers_count: transfers.len(),
        unavailable: snapshot.unavailable.clone(),
    })
}
