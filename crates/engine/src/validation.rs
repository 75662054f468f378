//! Record validation.
//!
//! Write-time checks turn `*Input` values into records and reject anything
//! the settlement cannot account for. The same record checks run again
//! before every settlement so bad rows fail loudly instead of skewing a
//! balance.

use uuid::Uuid;

use crate::{
    EngineError, Expense, ExpenseInput, Money, Partners, ResultEngine, Sale, SaleInput, Transfer,
    TransferInput, util::normalize_optional_text,
};

fn ensure_positive(kind: &str, amount: Money) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "{kind} amount must be > 0, got {amount}"
        )));
    }
    Ok(())
}

pub(crate) fn sale_from_input(partners: &Partners, id: Uuid, input: SaleInput) -> ResultEngine<Sale> {
    ensure_positive("sale", input.amount)?;
    if input.quantity == Some(0) {
        return Err(EngineError::InvalidRecord(
            "sale quantity must be > 0".to_string(),
        ));
    }
    Ok(Sale {
        id,
        amount: input.amount,
        occurred_at: input.occurred_at,
        description: normalize_optional_text(input.description.as_deref()),
        client: normalize_optional_text(input.client.as_deref()),
        quantity: input.quantity,
        product_type_id: input.product_type_id,
        recorded_by: partners.resolve(&input.recorded_by)?,
    })
}

pub(crate) fn expense_from_input(
    partners: &Partners,
    id: Uuid,
    input: ExpenseInput,
) -> ResultEngine<Expense> {
    ensure_positive("expense", input.amount)?;
    Ok(Expense {
        id,
        amount: input.amount,
        occurred_at: input.occurred_at,
        description: normalize_optional_text(input.description.as_deref()),
        supplier: normalize_optional_text(input.supplier.as_deref()),
        expense_category_id: input.expense_category_id,
        recorded_by: partners.resolve(&input.recorded_by)?,
    })
}

pub(crate) fn transfer_from_input(
    partners: &Partners,
    id: Uuid,
    input: TransferInput,
) -> ResultEngine<Transfer> {
    ensure_positive("transfer", input.amount)?;
    let transfer = Transfer {
        id,
        amount: input.amount,
        occurred_at: input.occurred_at,
        description: normalize_optional_text(input.description.as_deref()),
        payer: partners.resolve(&input.payer)?,
        payee: partners.resolve(&input.payee)?,
        recorded_by: partners.resolve(&input.recorded_by)?,
    };
    check_transfer(partners, &transfer)?;
    Ok(transfer)
}

fn check_partner(partners: &Partners, id: &crate::PartnerId, what: &str) -> ResultEngine<()> {
    if !partners.contains(id) {
        return Err(EngineError::InvalidRecord(format!(
            "{what}: unknown partner \"{id}\""
        )));
    }
    Ok(())
}

fn check_amount(amount: Money, what: &str) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidRecord(format!(
            "{what}: negative amount {amount}"
        )));
    }
    Ok(())
}

pub(crate) fn check_sale(partners: &Partners, sale: &Sale) -> ResultEngine<()> {
    let what = format!("sale {}", sale.id);
    check_amount(sale.amount, &what)?;
    check_partner(partners, &sale.recorded_by, &what)
}

pub(crate) fn check_expense(partners: &Partners, expense: &Expense) -> ResultEngine<()> {
    let what = format!("expense {}", expense.id);
    check_amount(expense.amount, &what)?;
    check_partner(partners, &expense.recorded_by, &what)
}

pub(crate) fn check_transfer(partners: &Partners, transfer: &Transfer) -> ResultEngine<()> {
    let what = format!("transfer {}", transfer.id);
    check_amount(transfer.amount, &what)?;
    check_partner(partners, &transfer.payer, &what)?;
    check_partner(partners, &transfer.payee, &what)?;
    check_partner(partners, &transfer.recorded_by, &what)?;
    if transfer.payer == transfer.payee {
        return Err(EngineError::InvalidRecord(format!(
            "{what}: payer and payee are both \"{}\"",
            transfer.payer
        )));
    }
    Ok(())
}

/// Checks every record of a snapshot, stopping at the first bad one.
pub fn check_records(
    partners: &Partners,
    sales: &[Sale],
    expenses: &[Expense],
    transfers: &[Transfer],
) -> ResultEngine<()> {
    sales.iter().try_for_each(|s| check_sale(partners, s))?;
    expenses.iter().try_for_each(|e| check_expense(partners, e))?;
    transfers.iter().try_for_each(|t| check_transfer(partners, t))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn transfer_input(payer: &str, payee: &str, amount: i64) -> TransferInput {
        TransferInput {
            amount: Money::new(amount),
            occurred_at: Utc::now(),
            description: Some("  ".to_string()),
            payer: payer.to_string(),
            payee: payee.to_string(),
            recorded_by: "rodri".to_string(),
        }
    }

    #[test]
    fn transfer_input_is_normalized() {
        let partners = Partners::default();
        let transfer =
            transfer_from_input(&partners, Uuid::new_v4(), transfer_input("Rodri", "juanchi", 500))
                .unwrap();
        assert_eq!(transfer.payer.as_str(), "rodri");
        assert_eq!(transfer.description, None);
    }

    #[test]
    fn transfer_to_self_is_rejected() {
        let partners = Partners::default();
        let err =
            transfer_from_input(&partners, Uuid::new_v4(), transfer_input("rodri", "rodri", 500))
                .unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord(_)));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let partners = Partners::default();
        let err =
            transfer_from_input(&partners, Uuid::new_v4(), transfer_input("rodri", "juanchi", 0))
                .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn unknown_partner_is_rejected() {
        let partners = Partners::default();
        let err =
            transfer_from_input(&partners, Uuid::new_v4(), transfer_input("pepe", "juanchi", 10))
                .unwrap_err();
        assert_eq!(err, EngineError::UnknownPartner("pepe".to_string()));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let partners = Partners::default();
        let input = SaleInput {
            amount: Money::new(100),
            occurred_at: Utc::now(),
            description: None,
            client: None,
            quantity: Some(0),
            product_type_id: Uuid::new_v4(),
            recorded_by: "rodri".to_string(),
        };
        assert!(sale_from_input(&partners, Uuid::new_v4(), input).is_err());
    }
}
