//! Per-partner settlement: who owes whom.
//!
//! Every sale and expense belongs 50/50 to both partners, but the cash sits
//! with whoever collected or paid it. For a partner `P`:
//!
//! ```text
//! entitlement  = total_sales / 2
//! obligation   = total_expenses / 2
//! cash_on_hand = collected(P) - paid(P) + transfers_in(P) - transfers_out(P)
//! balance      = (entitlement - obligation) - cash_on_hand
//! ```
//!
//! A positive balance is owed **to** `P`, a negative one is owed **by** `P`.
//! The two balances always sum to zero.
//!
//! The balance is derived from the doubled figure
//! `(total_sales - total_expenses) - 2 * cash_on_hand`, which is exact in
//! minor units, and halved toward zero. Halving toward zero commutes with
//! negation, so conservation also holds when totals are odd.

use crate::{
    EngineError, Expense, Money, PartnerId, Partners, ResultEngine, Sale, Transfer,
    aggregate::total_amount, validation::check_records,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementSummary {
    pub partner: PartnerId,
    /// 50% claim on all sales.
    pub entitlement: Money,
    /// 50% share of all expenses.
    pub obligation: Money,
    /// Sales this partner recorded, i.e. cash they collected.
    pub collected: Money,
    /// Expenses this partner recorded, i.e. cash they paid out.
    pub paid: Money,
    pub transfers_out: Money,
    pub transfers_in: Money,
    pub net_transfers: Money,
    pub cash_on_hand: Money,
    pub balance: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub partners: [SettlementSummary; 2],
    /// `false` when the balances failed to sum to zero.
    pub conserved: bool,
}

impl Settlement {
    pub fn get(&self, id: &PartnerId) -> Option<&SettlementSummary> {
        self.partners.iter().find(|s| &s.partner == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettlementSummary> {
        self.partners.iter()
    }
}

fn add(a: Money, b: Money) -> ResultEngine<Money> {
    a.checked_add(b).ok_or(EngineError::Overflow)
}

fn sub(a: Money, b: Money) -> ResultEngine<Money> {
    a.checked_sub(b).ok_or(EngineError::Overflow)
}

/// Computes both partners' settlement from the full record collections.
///
/// Records are checked first: an unknown partner tag, a negative amount or a
/// transfer with payer equal to payee is an [`EngineError::InvalidRecord`].
pub fn settle(
    partners: &Partners,
    sales: &[Sale],
    expenses: &[Expense],
    transfers: &[Transfer],
) -> ResultEngine<Settlement> {
    check_records(partners, sales, expenses, transfers)?;

    let total_sales = total_amount(sales)?;
    let total_expenses = total_amount(expenses)?;
    let net_total = sub(total_sales, total_expenses)?;

    let [first, second] = partners.ids();
    let summary = |id: &PartnerId| -> ResultEngine<SettlementSummary> {
        let collected = total_amount(sales.iter().filter(|s| &s.recorded_by == id))?;
        let paid = total_amount(expenses.iter().filter(|e| &e.recorded_by == id))?;
        let transfers_out = total_amount(transfers.iter().filter(|t| &t.payer == id))?;
        let transfers_in = total_amount(transfers.iter().filter(|t| &t.payee == id))?;
        let net_transfers = sub(transfers_in, transfers_out)?;
        let cash_on_hand = add(sub(collected, paid)?, net_transfers)?;

        let doubled_cash = cash_on_hand.checked_double().ok_or(EngineError::Overflow)?;
        let balance = sub(net_total, doubled_cash)?.half();

        Ok(SettlementSummary {
            partner: id.clone(),
            entitlement: total_sales.half(),
            obligation: total_expenses.half(),
            collected,
            paid,
            transfers_out,
            transfers_in,
            net_transfers,
            cash_on_hand,
            balance,
        })
    };

    let summaries = [summary(first)?, summary(second)?];
    let residue = add(summaries[0].balance, summaries[1].balance)?;
    let conserved = residue.is_zero();
    if !conserved {
        tracing::error!(
            residue = residue.minor(),
            "settlement balances do not sum to zero"
        );
    }

    Ok(Settlement {
        partners: summaries,
        conserved,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn rodri() -> PartnerId {
        PartnerId::new("rodri").unwrap()
    }

    fn juanchi() -> PartnerId {
        PartnerId::new("juanchi").unwrap()
    }

    fn sale(amount: i64, by: PartnerId) -> Sale {
        Sale {
            id: Uuid::new_v4(),
            amount: Money::new(amount),
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            description: None,
            client: None,
            quantity: None,
            product_type_id: Uuid::new_v4(),
            recorded_by: by,
        }
    }

    fn expense(amount: i64, by: PartnerId) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            amount: Money::new(amount),
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
            description: None,
            supplier: None,
            expense_category_id: Uuid::new_v4(),
            recorded_by: by,
        }
    }

    fn transfer(amount: i64, payer: PartnerId, payee: PartnerId) -> Transfer {
        Transfer {
            id: Uuid::new_v4(),
            amount: Money::new(amount),
            occurred_at: Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap(),
            description: None,
            recorded_by: payee.clone(),
            payer,
            payee,
        }
    }

    fn balance(settlement: &Settlement, id: &PartnerId) -> i64 {
        settlement.get(id).unwrap().balance.minor()
    }

    #[test]
    fn empty_input_settles_to_zero() {
        let settlement = settle(&Partners::default(), &[], &[], &[]).unwrap();
        for summary in settlement.iter() {
            assert_eq!(summary.entitlement, Money::ZERO);
            assert_eq!(summary.obligation, Money::ZERO);
            assert_eq!(summary.cash_on_hand, Money::ZERO);
            assert_eq!(summary.balance, Money::ZERO);
        }
        assert!(settlement.conserved);
    }

    #[test]
    fn collector_owes_half_of_a_sale() {
        let sales = [sale(20_000, rodri())];
        let settlement = settle(&Partners::default(), &sales, &[], &[]).unwrap();

        let r = settlement.get(&rodri()).unwrap();
        let j = settlement.get(&juanchi()).unwrap();
        assert_eq!(r.entitlement.minor(), 10_000);
        assert_eq!(j.entitlement.minor(), 10_000);
        assert_eq!(r.obligation, Money::ZERO);
        assert_eq!(r.collected.minor(), 20_000);
        assert_eq!(j.collected, Money::ZERO);
        assert_eq!(r.balance.minor(), -10_000);
        assert_eq!(j.balance.minor(), 10_000);
    }

    #[test]
    fn transfer_settles_the_imbalance() {
        let sales = [sale(20_000, rodri())];
        let transfers = [transfer(10_000, rodri(), juanchi())];
        let settlement = settle(&Partners::default(), &sales, &[], &transfers).unwrap();

        let r = settlement.get(&rodri()).unwrap();
        let j = settlement.get(&juanchi()).unwrap();
        assert_eq!(r.net_transfers.minor(), -10_000);
        assert_eq!(j.net_transfers.minor(), 10_000);
        assert_eq!(r.transfers_out.minor(), 10_000);
        assert_eq!(j.transfers_in.minor(), 10_000);
        assert_eq!(r.cash_on_hand.minor(), 10_000);
        assert_eq!(j.cash_on_hand.minor(), 10_000);
        assert_eq!(r.balance, Money::ZERO);
        assert_eq!(j.balance, Money::ZERO);
    }

    #[test]
    fn payer_of_an_expense_is_owed_half() {
        let expenses = [expense(6_000, juanchi())];
        let settlement = settle(&Partners::default(), &[], &expenses, &[]).unwrap();

        let j = settlement.get(&juanchi()).unwrap();
        assert_eq!(j.obligation.minor(), 3_000);
        assert_eq!(j.cash_on_hand.minor(), -6_000);
        assert_eq!(j.balance.minor(), 3_000);
        assert_eq!(balance(&settlement, &rodri()), -3_000);
    }

    #[test]
    fn balances_are_conserved_with_odd_totals() {
        let sales = [sale(3, rodri()), sale(10_001, juanchi()), sale(7, rodri())];
        let expenses = [expense(1, juanchi()), expense(999, rodri())];
        let transfers = [transfer(333, juanchi(), rodri())];
        let settlement = settle(&Partners::default(), &sales, &expenses, &transfers).unwrap();

        assert!(settlement.conserved);
        assert_eq!(
            balance(&settlement, &rodri()) + balance(&settlement, &juanchi()),
            0
        );
    }

    #[test]
    fn conservation_holds_across_many_mixes() {
        let partners = Partners::default();
        let ids = [rodri(), juanchi()];
        for seed in 0..50_i64 {
            let sales: Vec<Sale> = (0..seed % 7)
                .map(|i| sale(seed * 37 + i * 11 + 1, ids[(i % 2) as usize].clone()))
                .collect();
            let expenses: Vec<Expense> = (0..seed % 5)
                .map(|i| expense(seed * 13 + i * 7 + 3, ids[((i + seed) % 2) as usize].clone()))
                .collect();
            let transfers: Vec<Transfer> = (0..seed % 3)
                .map(|i| {
                    let payer = (i + seed) % 2;
                    transfer(
                        seed * 5 + i + 1,
                        ids[payer as usize].clone(),
                        ids[(1 - payer) as usize].clone(),
                    )
                })
                .collect();

            let settlement = settle(&partners, &sales, &expenses, &transfers).unwrap();
            assert!(settlement.conserved, "seed {seed}");
            assert_eq!(
                balance(&settlement, &ids[0]) + balance(&settlement, &ids[1]),
                0,
                "seed {seed}"
            );
        }
    }

    #[test]
    fn settle_is_idempotent() {
        let sales = [sale(1_500, rodri()), sale(2_500, juanchi())];
        let expenses = [expense(700, rodri())];
        let transfers = [transfer(100, juanchi(), rodri())];
        let partners = Partners::default();

        let first = settle(&partners, &sales, &expenses, &transfers).unwrap();
        let second = settle(&partners, &sales, &expenses, &transfers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn works_with_synthetic_partner_labels() {
        let partners = Partners::from_entries([("a", "Ann"), ("b", "Bob")]).unwrap();
        let a = PartnerId::new("a").unwrap();
        let b = PartnerId::new("b").unwrap();
        let sales = [sale(800, a.clone())];
        let settlement = settle(&partners, &sales, &[], &[]).unwrap();

        assert_eq!(balance(&settlement, &a), -400);
        assert_eq!(balance(&settlement, &b), 400);
    }

    #[test]
    fn unknown_partner_is_rejected() {
        let sales = [sale(100, PartnerId::new("pepe").unwrap())];
        let err = settle(&Partners::default(), &sales, &[], &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord(_)));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let expenses = [expense(-5, rodri())];
        let err = settle(&Partners::default(), &[], &expenses, &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord(_)));
    }

    #[test]
    fn self_transfer_is_rejected() {
        let transfers = [transfer(5, rodri(), rodri())];
        let err = settle(&Partners::default(), &[], &[], &transfers).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord(_)));
    }
}
