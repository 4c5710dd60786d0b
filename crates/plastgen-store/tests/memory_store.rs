use chrono::{NaiveDate, NaiveTime};

use plastgen_core::{
    BaseProductRow, BatchRow, BatchStamp, Dni, Error, PersonRow, PlasticCategory,
    QuotedProductRow, Store,
};
use plastgen_store::MemStore;

fn person(dni: &str) -> PersonRow {
    PersonRow {
        dni: Dni(dni.to_string()),
        name: "Test Person".to_string(),
        phone: "912345678".to_string(),
        email: "person@example.com".to_string(),
        address: "1 Main St".to_string(),
    }
}

fn stamp(seconds: u32) -> BatchStamp {
    BatchStamp {
        date: NaiveDate::from_ymd_opt(2020, 6, 1).expect("valid date"),
        time: NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).expect("valid time"),
    }
}

#[tokio::test]
async fn duplicate_dni_is_a_constraint_violation() {
    let mut store = MemStore::new();
    store.insert_person(&person("00000001")).await.expect("first insert");
    let result = store.insert_person(&person("00000001")).await;
    assert!(matches!(result, Err(Error::Constraint(_))));
}

#[tokio::test]
async fn specialization_requires_the_base_row() {
    let mut store = MemStore::new();
    let result = store.insert_employee(&Dni("00000009".to_string())).await;
    assert!(matches!(result, Err(Error::Constraint(_))));

    store.insert_person(&person("00000009")).await.expect("insert person");
    store
        .insert_employee(&Dni("00000009".to_string()))
        .await
        .expect("employee after person");
}

#[tokio::test]
async fn base_product_requires_a_product_identity_row() {
    let mut store = MemStore::new();
    let row = BaseProductRow {
        code: plastgen_core::ProductCode(99),
        name: "Rigid Polypropylene Pipe".to_string(),
        stock: 10,
        unit_price: 5,
        category: PlasticCategory::Pp,
    };
    let result = store.insert_base_product(&row).await;
    assert!(matches!(result, Err(Error::Constraint(_))));
}

#[tokio::test]
async fn duplicate_quoted_product_code_is_rejected() {
    let mut store = MemStore::new();
    let base_code = store.insert_product().await.expect("base identity");
    store
        .insert_base_product(&BaseProductRow {
            code: base_code,
            name: "Durable Polystyrene Sheet".to_string(),
            stock: 50,
            unit_price: 9,
            category: PlasticCategory::Ps,
        })
        .await
        .expect("base product");

    let quoted_code = store.insert_product().await.expect("quoted identity");
    let quoted = QuotedProductRow {
        code: quoted_code,
        new_unit_price: 7,
        base_code,
    };
    store.insert_quoted_product(&quoted).await.expect("first quote");
    let result = store.insert_quoted_product(&quoted).await;
    assert!(matches!(result, Err(Error::Constraint(_))));
}

#[tokio::test]
async fn duplicate_batch_stamp_is_rejected() {
    let mut store = MemStore::new();
    let row = BatchRow {
        stamp: stamp(600),
        total_cost: 100,
    };
    store.insert_batch(&row).await.expect("first batch");
    let result = store.insert_batch(&row).await;
    assert!(matches!(result, Err(Error::Constraint(_))));

    let other = BatchRow {
        stamp: stamp(601),
        total_cost: 100,
    };
    store.insert_batch(&other).await.expect("distinct stamp");
}

#[tokio::test]
async fn zero_quantities_are_rejected() {
    let mut store = MemStore::new();
    let result = store
        .insert_contains(plastgen_core::SaleCode(1), plastgen_core::ProductCode(1), 0)
        .await;
    assert!(matches!(result, Err(Error::Constraint(_))));
}

#[tokio::test]
async fn surrogate_codes_are_assigned_sequentially() {
    let mut store = MemStore::new();
    let first = store.insert_product().await.expect("insert");
    let second = store.insert_product().await.expect("insert");
    assert_eq!(first.0 + 1, second.0);
}
