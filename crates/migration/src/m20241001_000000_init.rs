//! Initial schema.
//!
//! - `product_types` and `expense_categories`: the two category taxonomies,
//!   unique by normalized name.
//! - `sales`, `expenses`: cash collected or paid by the recording partner.
//! - `transfers`: cash handed from one partner to the other.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum ProductTypes {
    Table,
    Id,
    Name,
    NameNorm,
    Description,
}

#[derive(Iden)]
enum ExpenseCategories {
    Table,
    Id,
    Name,
    NameNorm,
    Description,
}

#[derive(Iden)]
enum Sales {
    Table,
    Id,
    AmountMinor,
    OccurredAt,
    Description,
    Client,
    Quantity,
    ProductTypeId,
    RecordedBy,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    AmountMinor,
    OccurredAt,
    Description,
    Supplier,
    ExpenseCategoryId,
    RecordedBy,
}

#[derive(Iden)]
enum Transfers {
    Table,
    Id,
    AmountMinor,
    OccurredAt,
    Description,
    Payer,
    Payee,
    RecordedBy,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Taxonomies
        manager
            .create_table(
                Table::create()
                    .table(ProductTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductTypes::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductTypes::Name).string().not_null())
                    .col(ColumnDef::new(ProductTypes::NameNorm).string().not_null())
                    .col(ColumnDef::new(ProductTypes::Description).string())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-product_types-name_norm-unique")
                    .table(ProductTypes::Table)
                    .col(ProductTypes::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExpenseCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExpenseCategories::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExpenseCategories::Name).string().not_null())
                    .col(
                        ColumnDef::new(ExpenseCategories::NameNorm)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExpenseCategories::Description).string())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-expense_categories-name_norm-unique")
                    .table(ExpenseCategories::Table)
                    .col(ExpenseCategories::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Sales
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sales::Id).blob().not_null().primary_key())
                    .col(ColumnDef::new(Sales::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Sales::OccurredAt).timestamp().not_null())
                    .col(ColumnDef::new(Sales::Description).string())
                    .col(ColumnDef::new(Sales::Client).string())
                    .col(ColumnDef::new(Sales::Quantity).big_integer())
                    .col(ColumnDef::new(Sales::ProductTypeId).blob().not_null())
                    .col(ColumnDef::new(Sales::RecordedBy).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales-product_type_id")
                            .from(Sales::Table, Sales::ProductTypeId)
                            .to(ProductTypes::Table, ProductTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-sales-occurred_at")
                    .table(Sales::Table)
                    .col(Sales::OccurredAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-sales-product_type_id")
                    .table(Sales::Table)
                    .col(Sales::ProductTypeId)
                    .to_owned(),
            )
            .await?;

        // Expenses
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Expenses::Id).blob().not_null().primary_key())
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::OccurredAt).timestamp().not_null())
                    .col(ColumnDef::new(Expenses::Description).string())
                    .col(ColumnDef::new(Expenses::Supplier).string())
                    .col(
                        ColumnDef::new(Expenses::ExpenseCategoryId)
                            .blob()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::RecordedBy).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-expense_category_id")
                            .from(Expenses::Table, Expenses::ExpenseCategoryId)
                            .to(ExpenseCategories::Table, ExpenseCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-occurred_at")
                    .table(Expenses::Table)
                    .col(Expenses::OccurredAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-expense_category_id")
                    .table(Expenses::Table)
                    .col(Expenses::ExpenseCategoryId)
                    .to_owned(),
            )
            .await?;

        // Transfers
        manager
            .create_table(
                Table::create()
                    .table(Transfers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transfers::Id)
                            .blob()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transfers::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transfers::OccurredAt).timestamp().not_null())
                    .col(ColumnDef::new(Transfers::Description).string())
                    .col(ColumnDef::new(Transfers::Payer).string().not_null())
                    .col(ColumnDef::new(Transfers::Payee).string().not_null())
                    .col(ColumnDef::new(Transfers::RecordedBy).string().not_null())
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-transfers-occurred_at")
                    .table(Transfers::Table)
                    .col(Transfers::OccurredAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before the taxonomies they reference.
        manager
            .drop_table(Table::drop().table(Transfers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExpenseCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}
