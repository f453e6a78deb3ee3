//! End-to-end interaction scenarios.
//!
//! Each test drives the controller the way the page would: events in,
//! captured markup and visibility out of the recording host.

#![allow(clippy::unwrap_used)]

use sweetshop_cart::controller::CartEvent;
use sweetshop_cart::storage::KeyValueStore as _;
use sweetshop_cart::view::{ProductControl, Region};
use sweetshop_integration_tests::{RecordingHost, init_tracing, memory_controller, price};

fn add(name: &str, unit_price: &str, quantity: u32) -> CartEvent {
    CartEvent::AddToCart {
        name: name.into(),
        unit_price: price(unit_price),
        quantity,
    }
}

/// The walkthrough from the storefront's order flow: add one waffle,
/// step it to three, add two more, then delete the line.
#[test]
fn test_waffle_order_walkthrough() {
    init_tracing();
    let mut cart = memory_controller();
    cart.start();

    cart.handle(add("Waffle", "6.50", 1));
    assert_eq!(cart.host().total, "$6.50");
    assert_eq!(
        cart.host().control_of("Waffle"),
        Some(ProductControl::Stepper { quantity: 1 })
    );

    cart.handle(CartEvent::Increment {
        name: "Waffle".into(),
    });
    cart.handle(CartEvent::Increment {
        name: "Waffle".into(),
    });
    assert_eq!(cart.store().quantity_of(&"Waffle".into()), Some(3));
    assert_eq!(cart.host().total, "$19.50");

    cart.handle(add("Waffle", "6.50", 2));
    assert_eq!(cart.store().quantity_of(&"Waffle".into()), Some(5));
    assert_eq!(cart.host().total, "$32.50");
    assert_eq!(cart.host().cart_count, 1);

    cart.handle(CartEvent::RemoveItem {
        name: "Waffle".into(),
    });
    assert!(cart.store().is_empty());
    assert!(cart.host().is_visible(Region::EmptyPlaceholder));
    assert!(!cart.host().is_visible(Region::ItemsContainer));
    assert!(!cart.host().is_visible(Region::TotalSummary));
    assert!(!cart.host().is_visible(Region::ConfirmAction));
    // cleared-equivalent: the empty list sentinel is what storage holds
    assert_eq!(
        cart.storage().backend().get("cart").unwrap().as_deref(),
        Some("[]")
    );
    assert_eq!(cart.storage().load(), None);
}

#[test]
fn test_add_renders_rows_before_persisting() {
    let mut cart = memory_controller();
    cart.handle(add("Waffle", "6.50", 1));

    assert!(cart.host().cart_items_html.contains("Waffle"));
    assert!(cart.host().cart_items_html.contains("1x"));
    assert!(cart.host().cart_items_html.contains("@ $6.50"));

    let persisted = cart.storage().load().unwrap();
    assert_eq!(persisted.items.len(), 1);
    assert_eq!(persisted.total, price("6.50"));
}

#[test]
fn test_two_products_render_in_insertion_order() {
    let mut cart = memory_controller();
    cart.handle(add("Waffle", "6.50", 1));
    cart.handle(add("Baklava", "5.50", 2));

    let html = &cart.host().cart_items_html;
    let waffle = html.find("Waffle").unwrap();
    let baklava = html.find("Baklava").unwrap();
    assert!(waffle < baklava);
    assert_eq!(cart.host().cart_count, 2);
    assert_eq!(cart.host().total, "$17.50");
}

#[test]
fn test_removed_product_readded_lands_at_the_end() {
    let mut cart = memory_controller();
    cart.handle(add("Waffle", "6.50", 3));
    cart.handle(add("Baklava", "5.50", 1));
    cart.handle(CartEvent::RemoveItem {
        name: "Waffle".into(),
    });
    cart.handle(add("Waffle", "6.50", 1));

    // fresh item: the pre-removal quantity is gone
    assert_eq!(cart.store().quantity_of(&"Waffle".into()), Some(1));
    let html = &cart.host().cart_items_html;
    assert!(html.find("Baklava").unwrap() < html.find("Waffle").unwrap());
}

#[test]
fn test_decrement_floor_never_reaches_zero() {
    let mut cart = memory_controller();
    cart.handle(add("Waffle", "6.50", 1));

    for _ in 0..5 {
        cart.handle(CartEvent::Decrement {
            name: "Waffle".into(),
        });
    }

    assert_eq!(cart.store().quantity_of(&"Waffle".into()), Some(1));
    assert_eq!(
        cart.host().control_of("Waffle"),
        Some(ProductControl::Stepper { quantity: 1 })
    );
    assert_eq!(cart.host().total, "$6.50");
}

#[test]
fn test_confirm_freezes_the_summary() {
    let mut cart = memory_controller();
    cart.handle(add("Waffle", "6.50", 1));
    cart.handle(add("Baklava", "5.50", 2));
    cart.handle(CartEvent::ConfirmOrder);

    let (html, total) = cart.host().confirmation.clone().unwrap();
    assert!(html.contains("Waffle"));
    assert!(html.contains("2x"));
    assert_eq!(total, "$17.50");

    // later mutations leave the shown confirmation untouched
    cart.handle(CartEvent::Increment {
        name: "Baklava".into(),
    });
    let (frozen_html, frozen_total) = cart.host().confirmation.clone().unwrap();
    assert_eq!(frozen_html, html);
    assert_eq!(frozen_total, "$17.50");
    assert_eq!(cart.host().total, "$23.00");
}

#[test]
fn test_start_new_order_returns_to_empty_state() {
    let mut cart = memory_controller();
    cart.handle(add("Waffle", "6.50", 1));
    cart.handle(add("Baklava", "5.50", 1));
    cart.handle(CartEvent::ConfirmOrder);
    cart.handle(CartEvent::StartNewOrder);

    assert!(cart.store().is_empty());
    assert_eq!(cart.host().total, "$0.00");
    assert_eq!(cart.host().cart_count, 0);
    assert!(cart.host().confirmation.is_none());
    assert!(cart.host().is_visible(Region::EmptyPlaceholder));
    assert_eq!(cart.host().control_of("Waffle"), Some(ProductControl::AddButton));
    assert_eq!(cart.host().control_of("Baklava"), Some(ProductControl::AddButton));
    assert_eq!(cart.storage().backend().get("cart").unwrap(), None);
    assert_eq!(cart.storage().backend().get("totalPrice").unwrap(), None);
}

#[test]
fn test_repeat_confirm_is_idempotent() {
    let mut cart = memory_controller();
    cart.handle(add("Waffle", "6.50", 1));
    cart.handle(CartEvent::ConfirmOrder);
    let first = cart.host().confirmation.clone();
    cart.handle(CartEvent::ConfirmOrder);

    assert_eq!(cart.host().confirmation, first);
}

#[test]
fn test_events_against_fresh_page_are_noops() {
    let mut cart = memory_controller();
    cart.start();
    cart.handle(CartEvent::Increment {
        name: "Waffle".into(),
    });
    cart.handle(CartEvent::RemoveItem {
        name: "Waffle".into(),
    });

    assert!(cart.store().is_empty());
    assert_eq!(cart.storage().load(), None);
    let untouched = RecordingHost::new();
    assert_eq!(cart.host().product_controls.len(), untouched.product_controls.len());
}
