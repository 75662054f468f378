use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{
    CategoryInput, CategoryKind, Direction, Engine, EngineError, EventKind, ExpenseInput, Money,
    PartnerId, Partners, SaleInput, TransferInput,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .partners(Partners::default())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
}

fn id(tag: &str) -> PartnerId {
    PartnerId::new(tag).unwrap()
}

fn named(name: &str) -> CategoryInput {
    CategoryInput {
        name: name.to_string(),
        description: None,
    }
}

fn sale_input(amount: i64, day: u32, product_type_id: Uuid, by: &str) -> SaleInput {
    SaleInput {
        amount: Money::new(amount),
        occurred_at: at(day),
        description: None,
        client: Some("  Ana  ".to_string()),
        quantity: Some(3),
        product_type_id,
        recorded_by: by.to_string(),
    }
}

fn expense_input(amount: i64, day: u32, expense_category_id: Uuid, by: &str) -> ExpenseInput {
    ExpenseInput {
        amount: Money::new(amount),
        occurred_at: at(day),
        description: Some("Sawdust".to_string()),
        supplier: None,
        expense_category_id,
        recorded_by: by.to_string(),
    }
}

fn transfer_input(amount: i64, day: u32, payer: &str, payee: &str) -> TransferInput {
    TransferInput {
        amount: Money::new(amount),
        occurred_at: at(day),
        description: None,
        payer: payer.to_string(),
        payee: payee.to_string(),
        recorded_by: payer.to_string(),
    }
}

#[tokio::test]
async fn sale_crud_round_trip() {
    let (engine, _db) = engine_with_db().await;
    let oyster = engine
        .create_category(CategoryKind::ProductType, named("Oyster"))
        .await
        .unwrap();

    let sale = engine
        .create_sale(sale_input(1_500, 1, oyster.id, "Rodri"))
        .await
        .unwrap();
    assert_eq!(sale.recorded_by, id("rodri"));
    assert_eq!(sale.client.as_deref(), Some("Ana"));

    let fetched = engine.sale(sale.id).await.unwrap();
    assert_eq!(fetched, sale);

    let updated = engine
        .update_sale(sale.id, sale_input(2_000, 2, oyster.id, "juanchi"))
        .await
        .unwrap();
    assert_eq!(updated.id, sale.id);
    assert_eq!(engine.sale(sale.id).await.unwrap().amount, Money::new(2_000));
    assert_eq!(
        engine.sale(sale.id).await.unwrap().recorded_by,
        id("juanchi")
    );

    engine.delete_sale(sale.id).await.unwrap();
    assert!(matches!(
        engine.sale(sale.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_sale(sale.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn invalid_sales_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let oyster = engine
        .create_category(CategoryKind::ProductType, named("Oyster"))
        .await
        .unwrap();

    let zero = engine.create_sale(sale_input(0, 1, oyster.id, "rodri")).await;
    assert!(matches!(zero, Err(EngineError::InvalidAmount(_))));

    let negative = engine
        .create_sale(sale_input(-10, 1, oyster.id, "rodri"))
        .await;
    assert!(matches!(negative, Err(EngineError::InvalidAmount(_))));

    let stranger = engine
        .create_sale(sale_input(10, 1, oyster.id, "mallory"))
        .await;
    assert!(matches!(stranger, Err(EngineError::UnknownPartner(_))));

    let dangling = engine
        .create_sale(sale_input(10, 1, Uuid::new_v4(), "rodri"))
        .await;
    assert!(matches!(dangling, Err(EngineError::KeyNotFound(_))));

    let mut no_quantity = sale_input(10, 1, oyster.id, "rodri");
    no_quantity.quantity = Some(0);
    assert!(matches!(
        engine.create_sale(no_quantity).await,
        Err(EngineError::InvalidRecord(_))
    ));

    assert!(engine.list_sales().await.unwrap().is_empty());
}

#[tokio::test]
async fn large_quantity_is_stored_intact() {
    let (engine, _db) = engine_with_db().await;
    let oyster = engine
        .create_category(CategoryKind::ProductType, named("Oyster"))
        .await
        .unwrap();

    let mut input = sale_input(10, 1, oyster.id, "rodri");
    input.quantity = Some(3_000_000_000);
    let created = engine.create_sale(input).await.unwrap();

    let stored = engine.sale(created.id).await.unwrap();
    assert_eq!(stored.quantity, Some(3_000_000_000));

    let mut input = sale_input(10, 1, oyster.id, "rodri");
    input.quantity = Some(u32::MAX);
    let updated = engine.update_sale(created.id, input).await.unwrap();
    assert_eq!(engine.sale(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn lists_are_newest_first() {
    let (engine, _db) = engine_with_db().await;
    let substrate = engine
        .create_category(CategoryKind::ExpenseCategory, named("Substrate"))
        .await
        .unwrap();

    for day in [3, 1, 2] {
        engine
            .create_expense(expense_input(100, day, substrate.id, "juanchi"))
            .await
            .unwrap();
    }

    let days: Vec<_> = engine
        .list_expenses()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.occurred_at)
        .collect();
    assert_eq!(days, vec![at(3), at(2), at(1)]);
}

#[tokio::test]
async fn transfer_between_same_partner_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let result = engine
        .create_transfer(transfer_input(500, 1, "rodri", "RODRI"))
        .await;
    assert!(matches!(result, Err(EngineError::InvalidRecord(_))));

    let transfer = engine
        .create_transfer(transfer_input(500, 1, "rodri", "juanchi"))
        .await
        .unwrap();
    let updated = engine
        .update_transfer(transfer.id, transfer_input(700, 2, "juanchi", "rodri"))
        .await
        .unwrap();
    assert_eq!(updated.payer, id("juanchi"));
    assert_eq!(engine.list_transfers().await.unwrap(), vec![updated]);

    let missing = engine
        .update_transfer(Uuid::new_v4(), transfer_input(1, 1, "rodri", "juanchi"))
        .await;
    assert!(matches!(missing, Err(EngineError::KeyNotFound(_))));
}

#[tokio::test]
async fn categories_are_unique_and_protected() {
    let (engine, _db) = engine_with_db().await;

    let oyster = engine
        .create_category(CategoryKind::ProductType, named("  Hongo   Ostra "))
        .await
        .unwrap();
    assert_eq!(oyster.name, "Hongo Ostra");

    let duplicate = engine
        .create_category(CategoryKind::ProductType, named("hongo ostra"))
        .await;
    assert!(matches!(duplicate, Err(EngineError::ExistingKey(_))));

    // Same name in the other taxonomy is fine.
    engine
        .create_category(CategoryKind::ExpenseCategory, named("Hongo Ostra"))
        .await
        .unwrap();

    let blank = engine
        .create_category(CategoryKind::ProductType, named("   "))
        .await;
    assert!(matches!(blank, Err(EngineError::InvalidName(_))));

    let shiitake = engine
        .create_category(CategoryKind::ProductType, named("Shiitake"))
        .await
        .unwrap();
    let names: Vec<_> = engine
        .list_categories(CategoryKind::ProductType)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Hongo Ostra", "Shiitake"]);

    // Renaming onto itself keeps working, onto another name conflicts.
    engine
        .update_category(CategoryKind::ProductType, oyster.id, named("HONGO OSTRA"))
        .await
        .unwrap();
    let clash = engine
        .update_category(CategoryKind::ProductType, oyster.id, named("shiitake"))
        .await;
    assert!(matches!(clash, Err(EngineError::ExistingKey(_))));

    engine
        .create_sale(sale_input(100, 1, oyster.id, "rodri"))
        .await
        .unwrap();
    let in_use = engine
        .delete_category(CategoryKind::ProductType, oyster.id)
        .await;
    assert!(matches!(in_use, Err(EngineError::InUse(_))));

    engine
        .delete_category(CategoryKind::ProductType, shiitake.id)
        .await
        .unwrap();
    assert!(matches!(
        engine
            .delete_category(CategoryKind::ProductType, shiitake.id)
            .await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn dashboard_settles_stored_records() {
    let (engine, _db) = engine_with_db().await;
    let oyster = engine
        .create_category(CategoryKind::ProductType, named("Oyster"))
        .await
        .unwrap();
    let substrate = engine
        .create_category(CategoryKind::ExpenseCategory, named("Substrate"))
        .await
        .unwrap();

    // Rodri collects 10000, Juanchi pays 4000, Rodri hands over 1000.
    engine
        .create_sale(sale_input(10_000, 1, oyster.id, "rodri"))
        .await
        .unwrap();
    engine
        .create_expense(expense_input(4_000, 2, substrate.id, "juanchi"))
        .await
        .unwrap();
    engine
        .create_transfer(transfer_input(1_000, 3, "rodri", "juanchi"))
        .await
        .unwrap();

    let dashboard = engine.dashboard().await.unwrap();
    assert!(!dashboard.degraded());
    assert_eq!(dashboard.total_sales, Money::new(10_000));
    assert_eq!(dashboard.total_expenses, Money::new(4_000));
    assert_eq!(dashboard.total_balance, Money::new(6_000));
    assert_eq!(dashboard.sales_by_category["Oyster"], Money::new(10_000));
    assert_eq!(dashboard.expenses_by_category["Substrate"], Money::new(4_000));

    // Each should end with 3000. Rodri holds 9000, Juanchi holds -3000.
    let rodri = dashboard.settlement.get(&id("rodri")).unwrap();
    let juanchi = dashboard.settlement.get(&id("juanchi")).unwrap();
    assert_eq!(rodri.cash_on_hand, Money::new(9_000));
    assert_eq!(juanchi.cash_on_hand, Money::new(-3_000));
    assert_eq!(rodri.balance, Money::new(-6_000));
    assert_eq!(juanchi.balance, Money::new(6_000));
    assert!(dashboard.settlement.conserved);
}

#[tokio::test]
async fn timeline_merges_all_records() {
    let (engine, _db) = engine_with_db().await;
    let oyster = engine
        .create_category(CategoryKind::ProductType, named("Oyster"))
        .await
        .unwrap();
    let substrate = engine
        .create_category(CategoryKind::ExpenseCategory, named("Substrate"))
        .await
        .unwrap();

    engine
        .create_sale(sale_input(1_000, 1, oyster.id, "rodri"))
        .await
        .unwrap();
    engine
        .create_transfer(transfer_input(300, 2, "juanchi", "rodri"))
        .await
        .unwrap();
    engine
        .create_expense(expense_input(400, 3, substrate.id, "juanchi"))
        .await
        .unwrap();

    let timeline = engine.timeline().await.unwrap();
    assert!(!timeline.degraded());
    let kinds: Vec<_> = timeline.events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EventKind::Expense, EventKind::Transfer, EventKind::Sale]
    );
    assert_eq!(timeline.events[0].direction, Direction::Outflow);
    assert_eq!(timeline.events[1].description, "Transfer from Juanchi to Rodri");
    assert_eq!(timeline.events[2].description, "Sale of Oyster");
}

#[tokio::test]
async fn empty_store_gives_zero_views() {
    let (engine, _db) = engine_with_db().await;

    let dashboard = engine.dashboard().await.unwrap();
    assert_eq!(dashboard.total_balance, Money::ZERO);
    assert!(dashboard.settlement.iter().all(|s| s.balance.is_zero()));

    let timeline = engine.timeline().await.unwrap();
    assert!(timeline.events.is_empty());
}
