//! Integration tests for checkout scenarios against the boutique catalog

use boutique::{
    checkout::Checkout, fixtures::Shop, pricing::format_amount, products::Product,
    session::Session,
};
use decimal_percentage::Percentage;
use rusty_money::{Money, iso::SEK};
use testresult::TestResult;

#[test]
fn buying_coffeecups_takes_them_off_the_shelf() -> TestResult {
    let mut shop = Shop::boutique()?;
    let mut checkout = Checkout::new("Emma");

    let product = shop.catalog.lookup_mut("coffeecup").ok_or("coffeecup missing")?;
    let receipt = checkout.transaction(product, 3);

    assert!(receipt.is_success());
    assert_eq!(format_amount(&receipt.total()?), "42.00 SEK");
    assert_eq!(
        receipt.render(),
        "You have purchased 3 coffeecup(s) for 42.00 SEK from Emma."
    );
    assert_eq!(shop.catalog.lookup("coffeecup").map(Product::quantity), Some(17));
    assert_eq!(checkout.completed_sales(), 1);

    Ok(())
}

#[test]
fn buying_more_sporks_than_stocked_is_declined() -> TestResult {
    let mut shop = Shop::boutique()?;
    let mut checkout = Checkout::new("Emma");

    let product = shop.catalog.lookup_mut("spork").ok_or("spork missing")?;
    let receipt = checkout.transaction(product, 8);

    assert!(!receipt.is_success());
    assert_eq!(
        receipt.render(),
        "Purchase declined. We only have 5 items left."
    );
    assert_eq!(shop.catalog.lookup("spork").map(Product::quantity), Some(5));
    assert_eq!(checkout.completed_sales(), 0);

    Ok(())
}

#[test]
fn discounted_vase_sells_at_forty() -> TestResult {
    let mut shop = Shop::boutique()?;
    let mut checkout = Checkout::new("Emma");

    let product = shop.catalog.lookup_mut("vase").ok_or("vase missing")?;
    assert_eq!(product.effective_price(), Money::from_minor(4000, SEK));

    let receipt = checkout.transaction(product, 1);

    assert_eq!(receipt.total()?, Money::from_minor(4000, SEK));
    assert_eq!(
        receipt.render(),
        "You have purchased 1 (20%) vase(s) for 40.00 SEK from Emma."
    );
    assert_eq!(shop.catalog.lookup("vase").map(Product::quantity), Some(3));

    Ok(())
}

#[test]
fn unknown_items_are_not_found() -> TestResult {
    let shop = Shop::boutique()?;

    assert!(shop.catalog.lookup("widget").is_none());
    assert_eq!(
        shop.catalog.iter().map(Product::quantity).collect::<Vec<_>>(),
        [20, 32, 5, 4, 5]
    );

    Ok(())
}

#[test]
fn asking_for_an_unknown_item_changes_nothing() -> TestResult {
    let mut session = Session::new(Shop::boutique()?, Checkout::new("Emma"))?;
    let mut output = Vec::new();

    session.purchase("widget", &mut output)?;

    assert_eq!(String::from_utf8(output)?, "Sorry we're out of widget.\n");
    assert_eq!(
        session
            .shop()
            .catalog
            .iter()
            .map(Product::quantity)
            .collect::<Vec<_>>(),
        [20, 32, 5, 4, 5]
    );
    assert_eq!(session.checkout().completed_sales(), 0);

    Ok(())
}

#[test]
fn discounted_line_is_rounded_on_the_total() -> TestResult {
    let mut checkout = Checkout::new("Emma");
    let mut eggcup = Product::discounted(
        "eggcup",
        Money::from_minor(100, SEK),
        10,
        "kitchenware",
        Percentage::from(0.125),
    )?;

    let receipt = checkout.transaction(&mut eggcup, 8);

    assert_eq!(format_amount(&receipt.total()?), "7.00 SEK");
    assert_eq!(
        receipt.render(),
        "You have purchased 8 (12.5%) eggcup(s) for 7.00 SEK from Emma."
    );

    Ok(())
}

#[test]
fn sales_count_once_per_transaction() -> TestResult {
    let mut shop = Shop::boutique()?;
    let mut checkout = Checkout::new("Emma");

    for (key, quantity) in [("plate", 10), ("plate", 10), ("plate", 10), ("plate", 10)] {
        let product = shop.catalog.lookup_mut(key).ok_or("plate missing")?;
        let _receipt = checkout.transaction(product, quantity);
    }

    assert_eq!(shop.catalog.lookup("plate").map(Product::quantity), Some(2));
    assert_eq!(checkout.completed_sales(), 3);

    Ok(())
}
