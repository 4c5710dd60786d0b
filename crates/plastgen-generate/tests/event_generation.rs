use plastgen_core::{BranchPolicy, Dni, IdPolicy, PersonRow, RunConfig, Store};
use plastgen_generate::BatchDriver;
use plastgen_store::MemStore;

fn run_config(id_policy: IdPolicy, p_legal: f64, p_quoted: f64, seed: u64) -> RunConfig {
    RunConfig {
        id_policy,
        branches: BranchPolicy {
            legal_representation: p_legal,
            quoted_sale: p_quoted,
        },
        seed: Some(seed),
    }
}

#[tokio::test]
async fn counts_match_the_requested_volume() {
    let store = MemStore::new();
    let database = store.handle();
    let config = run_config(IdPolicy::Sequential, 0.5, 0.5, 42);

    let report = BatchDriver::new(store, config)
        .generate(25)
        .await
        .expect("run succeeds");

    let data = database.snapshot();
    assert!(data.committed);
    assert_eq!(data.persons.len(), 50);
    assert_eq!(data.employees.len(), 25);
    assert_eq!(data.natural_buyers.len(), 25);
    assert_eq!(data.products.len(), 50);
    assert_eq!(data.base_products.len(), 25);
    assert_eq!(data.quoted_products.len(), 25);
    assert_eq!(data.raw_materials.len(), 25);
    assert_eq!(data.batches.len(), 25);
    assert_eq!(data.sales.len(), 25);
    assert_eq!(data.contains.len(), 25);
    assert_eq!(data.produces.len(), 25);
    assert_eq!(data.requires.len(), 25);
    assert_eq!(data.requests.len(), 25);
    assert!(data.legal_buyers.len() <= 25);
    assert_eq!(data.legal_buyers.len(), data.represents.len());
    assert_eq!(report.counts.legal_buyers as usize, data.legal_buyers.len());
    assert_eq!(report.records, 25);
}

#[tokio::test]
async fn single_event_produces_the_full_eleven_insert_chain() {
    let store = MemStore::new();
    let database = store.handle();
    // Both branches forced on: the full chain includes the legal buyer and
    // links the sale to the quoted product.
    let config = run_config(IdPolicy::Sequential, 1.0, 1.0, 7);

    BatchDriver::new(store, config)
        .generate(1)
        .await
        .expect("run succeeds");

    let data = database.snapshot();
    assert_eq!(data.persons.len(), 2);
    assert_eq!(data.employees.len(), 1);
    assert_eq!(data.natural_buyers.len(), 1);
    assert_eq!(data.legal_buyers.len(), 1);
    assert_eq!(data.products.len(), 2);
    assert_eq!(data.base_products.len(), 1);
    assert_eq!(data.quoted_products.len(), 1);

    // No dangling reference anywhere in the event's key graph.
    let base = &data.base_products[0];
    let quoted = &data.quoted_products[0];
    assert_eq!(quoted.base_code, base.code);

    let (sale_code, sale) = &data.sales[0];
    assert_eq!(sale.employee, data.employees[0]);
    assert_eq!(sale.buyer, data.natural_buyers[0]);

    let (contained_sale, contained_product, _) = data.contains[0];
    assert_eq!(contained_sale, *sale_code);
    assert_eq!(contained_product, quoted.code);

    let (represented, representing) = &data.represents[0];
    assert_eq!(represented, &data.natural_buyers[0]);
    assert_eq!(representing, &data.legal_buyers[0].ruc);

    let (requested, req_employee, req_buyer) = &data.requests[0];
    assert_eq!(*requested, quoted.code);
    assert_eq!(req_employee, &data.employees[0]);
    assert_eq!(req_buyer, &data.natural_buyers[0]);

    let (produced, batch, _) = data.produces[0];
    assert_eq!(produced, base.code);
    assert_eq!(batch, data.batches[0].stamp);

    let (requiring, material, _) = data.requires[0];
    assert_eq!(requiring, base.code);
    assert_eq!(material, data.raw_materials[0].0);
}

#[tokio::test]
async fn zeroed_branches_skip_legal_buyers_and_quote_lines() {
    let store = MemStore::new();
    let database = store.handle();
    let config = run_config(IdPolicy::Sequential, 0.0, 0.0, 3);

    let report = BatchDriver::new(store, config)
        .generate(40)
        .await
        .expect("run succeeds");

    let data = database.snapshot();
    assert!(data.legal_buyers.is_empty());
    assert!(data.represents.is_empty());
    assert_eq!(report.legal_representation_events, 0);
    assert_eq!(report.quoted_sale_events, 0);
    for (index, (_, product, _)) in data.contains.iter().enumerate() {
        assert_eq!(*product, data.base_products[index].code);
    }
}

#[tokio::test]
async fn sale_lines_reference_only_the_same_events_products() {
    let store = MemStore::new();
    let database = store.handle();
    let config = run_config(IdPolicy::Sequential, 0.5, 0.5, 99);

    BatchDriver::new(store, config)
        .generate(100)
        .await
        .expect("run succeeds");

    // One sale, one base product, one quoted product per event, in
    // insertion order, so index i correlates event i across tables.
    let data = database.snapshot();
    for index in 0..100 {
        let (sale_code, sale) = &data.sales[index];
        let (contained_sale, product, _) = data.contains[index];
        assert_eq!(contained_sale, *sale_code);
        let base = data.base_products[index].code;
        let quoted = data.quoted_products[index].code;
        assert!(product == base || product == quoted);
        assert_eq!(data.quoted_products[index].base_code, base);
        assert_eq!(sale.employee, data.employees[index]);
        assert_eq!(sale.buyer, data.natural_buyers[index]);
    }
}

#[tokio::test]
async fn relationship_quantities_are_strictly_positive() {
    let store = MemStore::new();
    let database = store.handle();
    let config = run_config(IdPolicy::Sequential, 0.5, 0.5, 11);

    BatchDriver::new(store, config)
        .generate(200)
        .await
        .expect("run succeeds");

    let data = database.snapshot();
    assert!(data.contains.iter().all(|(_, _, qty)| *qty >= 1));
    assert!(data.produces.iter().all(|(_, _, qty)| *qty >= 1));
    assert!(data.requires.iter().all(|(_, _, qty)| *qty >= 1));
}

#[tokio::test]
async fn sequential_run_mints_no_duplicate_identity() {
    // The memory store rejects duplicate DNIs, RUCs, and batch stamps, so a
    // completed sequential run at volume is itself the uniqueness proof.
    let store = MemStore::new();
    let database = store.handle();
    let config = run_config(IdPolicy::Sequential, 1.0, 0.5, 5);

    BatchDriver::new(store, config)
        .generate(2_000)
        .await
        .expect("no identity collisions");

    let data = database.snapshot();
    assert_eq!(data.persons.len(), 4_000);
    assert_eq!(data.legal_buyers.len(), 2_000);
    assert_eq!(data.batches.len(), 2_000);
}

#[tokio::test]
async fn multi_volume_runs_continue_one_event_sequence() {
    // Mirrors `generate --records 5 10` against one database: the second
    // volume starts where the first stopped, so sequential identities
    // never restart and never collide.
    let database = MemStore::new();
    let config = run_config(IdPolicy::Sequential, 0.5, 0.5, 8);

    BatchDriver::new(database.handle(), config)
        .generate(5)
        .await
        .expect("first volume");
    BatchDriver::new(database.handle(), config)
        .starting_at(5)
        .generate(10)
        .await
        .expect("second volume continues collision-free");

    let data = database.snapshot();
    assert_eq!(data.persons.len(), 30);
    assert_eq!(data.sales.len(), 15);
    assert_eq!(data.batches.len(), 15);

    // Restarting the sequence instead repeats the first volume's DNIs.
    let result = BatchDriver::new(database.handle(), config).generate(5).await;
    assert!(matches!(result, Err(plastgen_core::Error::Constraint(_))));
}

#[tokio::test]
async fn random_policy_run_succeeds_at_low_volume() {
    let store = MemStore::new();
    let database = store.handle();
    let config = run_config(IdPolicy::Random, 1.0, 0.5, 12345);

    let report = BatchDriver::new(store, config)
        .generate(50)
        .await
        .expect("seeded low-volume run draws no colliding identity");

    let data = database.snapshot();
    assert!(data.committed);
    assert_eq!(data.persons.len(), 100);
    assert_eq!(data.legal_buyers.len(), 50);
    assert!(data.persons.iter().all(|p| p.dni.0.len() == 8));
    assert!(data.legal_buyers.iter().all(|b| b.ruc.0.len() == 11));
    assert_eq!(report.records, 50);
}

#[tokio::test]
async fn constraint_violation_aborts_the_batch_uncommitted() {
    let mut store = MemStore::new();
    let database = store.handle();
    // Occupy the DNI the sequential allocator will mint for event 0's
    // employee; the first insert of the run must fail.
    store
        .insert_person(&PersonRow {
            dni: Dni("00000001".to_string()),
            name: "occupant".to_string(),
            phone: "900000000".to_string(),
            email: "occupant@example.com".to_string(),
            address: "1 Main St".to_string(),
        })
        .await
        .expect("seed row");

    let config = run_config(IdPolicy::Sequential, 0.5, 0.5, 1);
    let result = BatchDriver::new(store, config).generate(3).await;

    assert!(matches!(result, Err(plastgen_core::Error::Constraint(_))));
    let data = database.snapshot();
    assert!(!data.committed);
    // The failed run added nothing beyond the seeded row.
    assert_eq!(data.persons.len(), 1);
    assert!(data.employees.is_empty());
}

#[tokio::test]
async fn reset_clears_every_table_and_restarts_counters() {
    let store = MemStore::new();
    let database = store.handle();
    let config = run_config(IdPolicy::Sequential, 0.5, 0.5, 23);

    BatchDriver::new(store, config)
        .generate(10)
        .await
        .expect("run succeeds");
    assert!(!database.snapshot().is_empty());

    database.reset_all().expect("reset");
    assert!(database.snapshot().is_empty());

    // Surrogate sequences restart from 1 after the reset.
    BatchDriver::new(database.handle(), config)
        .generate(1)
        .await
        .expect("run succeeds");
    let data = database.snapshot();
    assert_eq!(data.products[0].0, 1);
    assert_eq!(data.sales[0].0 .0, 1);
    assert_eq!(data.raw_materials[0].0 .0, 1);
}
