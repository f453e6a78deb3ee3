//! Storage round trips, hydration and wire-format laws.

#![allow(clippy::unwrap_used)]

use sweetshop_cart::controller::{CartController, CartEvent};
use sweetshop_cart::storage::{CartStorage, FileStore, KeyValueStore, MemoryStore};
use sweetshop_cart::store::{CartSnapshot, LineItem};
use sweetshop_cart::view::{ProductControl, Region};
use sweetshop_integration_tests::{RecordingHost, init_tracing, memory_controller, price};

fn item(name: &str, quantity: u32, unit_price: &str) -> LineItem {
    LineItem {
        name: name.into(),
        quantity,
        unit_price: price(unit_price),
    }
}

fn snapshot(items: Vec<LineItem>) -> CartSnapshot {
    let total = items.iter().map(LineItem::line_total).sum();
    CartSnapshot { items, total }
}

#[test]
fn test_round_trip_zero_one_and_many() {
    for count in [0_u32, 1, 4] {
        let items: Vec<LineItem> = (0..count)
            .map(|i| item(&format!("Dessert {i}"), i + 1, "2.50"))
            .collect();
        let snap = snapshot(items);

        let mut storage = CartStorage::new(MemoryStore::new());
        storage.save(&snap).unwrap();

        if count == 0 {
            // the empty list reads back as absent, the caller's empty cart
            assert_eq!(storage.load(), None);
        } else {
            assert_eq!(storage.load(), Some(snap));
        }
    }
}

#[test]
fn test_reset_then_load_is_absent() {
    let mut cart = memory_controller();
    cart.handle(CartEvent::AddToCart {
        name: "Waffle".into(),
        unit_price: price("6.50"),
        quantity: 2,
    });
    cart.handle(CartEvent::StartNewOrder);

    assert_eq!(cart.storage().load(), None);
}

#[test]
fn test_cart_survives_a_page_reload() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    // first session: put two products in the cart
    let backend = FileStore::open(dir.path()).unwrap();
    let mut first = CartController::new(CartStorage::new(backend), RecordingHost::new());
    first.start();
    first.handle(CartEvent::AddToCart {
        name: "Waffle".into(),
        unit_price: price("6.50"),
        quantity: 3,
    });
    first.handle(CartEvent::AddToCart {
        name: "Baklava".into(),
        unit_price: price("5.50"),
        quantity: 1,
    });
    drop(first);

    // second session over the same directory
    let backend = FileStore::open(dir.path()).unwrap();
    let mut second = CartController::new(CartStorage::new(backend), RecordingHost::new());
    second.start();

    assert_eq!(second.store().quantity_of(&"Waffle".into()), Some(3));
    assert_eq!(second.store().quantity_of(&"Baklava".into()), Some(1));
    assert_eq!(second.host().total, "$25.00");
    assert_eq!(second.host().cart_count, 2);
    assert!(second.host().is_visible(Region::ItemsContainer));
    assert_eq!(
        second.host().control_of("Waffle"),
        Some(ProductControl::Stepper { quantity: 3 })
    );
}

#[test]
fn test_hydration_trusts_the_persisted_total_once() {
    // a hand-edited total is adopted at hydration and recomputed on the
    // next mutation
    let mut backend = MemoryStore::new();
    backend
        .set("cart", r#"[{"name":"Waffle","quantity":1,"price":6.5}]"#)
        .unwrap();
    backend.set("totalPrice", "99.00").unwrap();

    let mut cart = CartController::new(CartStorage::new(backend), RecordingHost::new());
    cart.start();
    assert_eq!(cart.host().total, "$99.00");

    cart.handle(CartEvent::Increment {
        name: "Waffle".into(),
    });
    assert_eq!(cart.host().total, "$13.00");
}

#[test]
fn test_malformed_entries_hydrate_as_empty() {
    init_tracing();
    let cases: [(&str, Option<&str>); 4] = [
        ("{definitely not json", Some("6.50")),
        (r#"[{"name":"Waffle","quantity":1,"price":6.5}]"#, None),
        (r#"[{"name":"Waffle","quantity":1,"price":6.5}]"#, Some("a lot")),
        ("[]", Some("0.00")),
    ];

    for (cart_entry, total_entry) in cases {
        let mut backend = MemoryStore::new();
        backend.set("cart", cart_entry).unwrap();
        if let Some(total) = total_entry {
            backend.set("totalPrice", total).unwrap();
        }

        let mut cart = CartController::new(CartStorage::new(backend), RecordingHost::new());
        cart.start();

        assert!(cart.store().is_empty(), "entry {cart_entry:?} should hydrate empty");
        assert!(cart.host().is_visible(Region::EmptyPlaceholder));
        assert_eq!(cart.host().total, "$0.00");
    }
}

#[test]
fn test_persisted_entries_match_the_storage_layout() {
    let mut cart = memory_controller();
    cart.handle(CartEvent::AddToCart {
        name: "Waffle".into(),
        unit_price: price("6.50"),
        quantity: 2,
    });
    cart.handle(CartEvent::AddToCart {
        name: "Baklava".into(),
        unit_price: price("5.50"),
        quantity: 1,
    });

    let raw = cart.storage().backend().get("cart").unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            {"name": "Waffle", "quantity": 2, "price": 6.5},
            {"name": "Baklava", "quantity": 1, "price": 5.5},
        ])
    );

    let total = cart.storage().backend().get("totalPrice").unwrap().unwrap();
    assert_eq!(total, "18.50");
}

#[test]
fn test_every_mutation_persists_the_new_state() {
    let mut cart = memory_controller();

    cart.handle(CartEvent::AddToCart {
        name: "Waffle".into(),
        unit_price: price("6.50"),
        quantity: 1,
    });
    assert_eq!(cart.storage().load().unwrap().total, price("6.50"));

    cart.handle(CartEvent::Increment {
        name: "Waffle".into(),
    });
    assert_eq!(cart.storage().load().unwrap().total, price("13.00"));

    cart.handle(CartEvent::Decrement {
        name: "Waffle".into(),
    });
    assert_eq!(cart.storage().load().unwrap().total, price("6.50"));

    cart.handle(CartEvent::RemoveItem {
        name: "Waffle".into(),
    });
    assert_eq!(cart.storage().load(), None);
}
