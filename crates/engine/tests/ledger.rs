use chrono::{Duration, TimeZone, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Engine, EngineError, MoneyCents, NewTransaction, TransactionKind, TransactionUpdate,
    UNCATEGORIZED_NAME, User,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn alice(engine: &Engine) -> User {
    engine.register_user("alice", "password").await.unwrap()
}

fn new_tx(cents: i64, kind: &str) -> NewTransaction {
    NewTransaction {
        amount: MoneyCents::new(cents),
        kind: kind.to_string(),
        description: None,
        category_id: None,
        occurred_at: None,
    }
}

async fn count_rows(db: &DatabaseConnection) -> i64 {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT COUNT(*) AS n FROM transactions",
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<i64>("", "n").unwrap()
}

#[tokio::test]
async fn recorded_transaction_is_counted_once() {
    let (engine, db) = engine_with_db().await;
    let user = alice(&engine).await;

    let tx = engine
        .record_transaction(user.id, new_tx(42_50, "income"))
        .await
        .unwrap();
    assert_eq!(tx.kind, TransactionKind::Income);
    assert_eq!(tx.amount, MoneyCents::new(42_50));
    assert_eq!(count_rows(&db).await, 1);

    let balance = engine.calculate_balance(user.id, None, None).await.unwrap();
    assert_eq!(balance.total_income, MoneyCents::new(42_50));
    assert_eq!(balance.net_balance, MoneyCents::new(42_50));
}

#[tokio::test]
async fn non_positive_amount_persists_nothing() {
    let (engine, db) = engine_with_db().await;
    let user = alice(&engine).await;

    for cents in [0, -100] {
        let err = engine
            .record_transaction(user.id, new_tx(cents, "expense"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount("amount must be positive".to_string())
        );
    }
    assert_eq!(count_rows(&db).await, 0);
}

#[tokio::test]
async fn unknown_kind_is_rejected() {
    let (engine, db) = engine_with_db().await;
    let user = alice(&engine).await;

    let err = engine
        .record_transaction(user.id, new_tx(10_00, "transfer"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(count_rows(&db).await, 0);
}

#[tokio::test]
async fn spanish_kind_labels_are_accepted() {
    let (engine, _db) = engine_with_db().await;
    let user = alice(&engine).await;

    let tx = engine
        .record_transaction(user.id, new_tx(5_00, "GASTO"))
        .await
        .unwrap();
    assert_eq!(tx.kind, TransactionKind::Expense);
}

#[tokio::test]
async fn balance_sums_by_kind() {
    let (engine, _db) = engine_with_db().await;
    let user = alice(&engine).await;

    for (cents, kind) in [
        (1000_00, "income"),
        (500_00, "income"),
        (200_00, "expense"),
        (150_00, "expense"),
    ] {
        engine
            .record_transaction(user.id, new_tx(cents, kind))
            .await
            .unwrap();
    }

    let first = engine.calculate_balance(user.id, None, None).await.unwrap();
    assert_eq!(first.total_income, MoneyCents::new(1500_00));
    assert_eq!(first.total_expense, MoneyCents::new(350_00));
    assert_eq!(first.net_balance, MoneyCents::new(1150_00));
    assert_eq!(first.net_balance.to_major(), 1150.0);

    let second = engine.calculate_balance(user.id, None, None).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn balance_range_is_inclusive_and_per_user() {
    let (engine, _db) = engine_with_db().await;
    let user = alice(&engine).await;
    let bob = engine.register_user("bob", "password").await.unwrap();

    let day = |d: u32| Utc.with_ymd_and_hms(2026, 2, d, 12, 0, 0).unwrap();
    for (d, cents) in [(1, 10_00), (5, 20_00), (9, 40_00)] {
        let mut tx = new_tx(cents, "income");
        tx.occurred_at = Some(day(d));
        engine.record_transaction(user.id, tx).await.unwrap();
    }
    engine
        .record_transaction(bob.id, new_tx(999_00, "income"))
        .await
        .unwrap();

    let balance = engine
        .calculate_balance(user.id, Some(day(5)), Some(day(9)))
        .await
        .unwrap();
    assert_eq!(balance.total_income, MoneyCents::new(60_00));

    let inverted = engine
        .calculate_balance(user.id, Some(day(9)), Some(day(1)))
        .await
        .unwrap();
    assert_eq!(inverted.net_balance, MoneyCents::ZERO);
}

#[tokio::test]
async fn recent_entries_are_newest_first_with_category_names() {
    let (engine, _db) = engine_with_db().await;
    let user = alice(&engine).await;
    let food = engine
        .create_custom_category(user.id, "Food", "expense")
        .await
        .unwrap();

    let now = Utc::now();
    let mut older = new_tx(3_00, "expense");
    older.occurred_at = Some(now - Duration::hours(2));
    older.category_id = Some(food.id);
    older.description = Some("  lunch ".to_string());
    engine.record_transaction(user.id, older).await.unwrap();

    let mut newer = new_tx(7_00, "income");
    newer.occurred_at = Some(now - Duration::hours(1));
    engine.record_transaction(user.id, newer).await.unwrap();

    let recent = engine.list_recent(user.id, 10).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].transaction.amount, MoneyCents::new(7_00));
    assert_eq!(recent[0].category_name, UNCATEGORIZED_NAME);
    assert_eq!(recent[1].category_name, "Food");
    assert_eq!(recent[1].transaction.description.as_deref(), Some("lunch"));

    let limited = engine.list_recent(user.id, 1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn transactions_of_other_users_cannot_be_touched() {
    let (engine, _db) = engine_with_db().await;
    let user = alice(&engine).await;
    let bob = engine.register_user("bob", "password").await.unwrap();

    let tx = engine
        .record_transaction(user.id, new_tx(10_00, "expense"))
        .await
        .unwrap();
    let update = TransactionUpdate {
        amount: MoneyCents::new(1),
        description: None,
        category_id: None,
    };

    let not_found = EngineError::KeyNotFound("transaction not exists".to_string());
    assert_eq!(
        engine
            .update_transaction(bob.id, tx.id, update.clone())
            .await
            .unwrap_err(),
        not_found
    );
    assert_eq!(
        engine.delete_transaction(bob.id, tx.id).await.unwrap_err(),
        not_found
    );
    assert_eq!(
        engine
            .delete_transaction(user.id, Uuid::new_v4())
            .await
            .unwrap_err(),
        not_found
    );

    let recent = engine.list_recent(user.id, 10).await.unwrap();
    assert_eq!(recent[0].transaction.amount, MoneyCents::new(10_00));
}

#[tokio::test]
async fn owner_updates_and_deletes() {
    let (engine, db) = engine_with_db().await;
    let user = alice(&engine).await;

    let tx = engine
        .record_transaction(user.id, new_tx(10_00, "expense"))
        .await
        .unwrap();

    let updated = engine
        .update_transaction(
            user.id,
            tx.id,
            TransactionUpdate {
                amount: MoneyCents::new(12_34),
                description: Some("groceries".to_string()),
                category_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, MoneyCents::new(12_34));
    assert_eq!(updated.kind, TransactionKind::Expense);
    assert_eq!(updated.occurred_at, tx.occurred_at);

    let err = engine
        .update_transaction(
            user.id,
            tx.id,
            TransactionUpdate {
                amount: MoneyCents::ZERO,
                description: None,
                category_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());

    engine.delete_transaction(user.id, tx.id).await.unwrap();
    assert_eq!(count_rows(&db).await, 0);
}

#[tokio::test]
async fn list_transactions_filters_by_range() {
    let (engine, _db) = engine_with_db().await;
    let user = alice(&engine).await;

    let day = |d: u32| Utc.with_ymd_and_hms(2026, 1, d, 8, 0, 0).unwrap();
    for d in [3, 10, 20] {
        let mut tx = new_tx(1_00, "expense");
        tx.occurred_at = Some(day(d));
        engine.record_transaction(user.id, tx).await.unwrap();
    }

    let all = engine.list_transactions(user.id, None, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].transaction.occurred_at, day(20));

    let some = engine
        .list_transactions(user.id, Some(day(4)), Some(day(20)))
        .await
        .unwrap();
    assert_eq!(some.len(), 2);
}
