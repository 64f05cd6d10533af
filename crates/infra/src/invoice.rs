//! Human-readable invoice blocks.

use chrono::{DateTime, Utc};

use stockbook_ledger::{Expense, Product, Sale};

const RULE_WIDTH: usize = 50;
const TIMESTAMP: &str = "%d/%m/%Y %H:%M:%S";

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn header(title: &str) -> String {
    let rule = rule();
    format!("\n{rule}\n{title:^width$}\n{rule}\n", width = RULE_WIDTH)
}

/// Invoice for a stock receipt of `quantity` units.
///
/// `product` is the state after the receipt; the amount shown covers only the
/// incoming units at the product's current price and discount.
pub fn incoming(product: &Product, quantity: i64, at: DateTime<Utc>) -> String {
    format!(
        "{}Received: {}\nProduct: {}\nUnit price: ${:.2}\nQuantity: {}\nDiscount: {}\n\
         Amount due: ${:.2}\nOn hand: {}\n{}\n",
        header("INCOMING STOCK INVOICE"),
        at.format(TIMESTAMP),
        product.name(),
        product.price(),
        quantity,
        product.discount(),
        product.quote(quantity),
        product.quantity(),
        rule(),
    )
}

/// Invoice for one sale. `product` supplies the price and discount applied.
pub fn sale(product: &Product, sale: &Sale) -> String {
    format!(
        "{}Sold: {}\nProduct: {}\nQuantity sold: {}\nUnit price: ${:.2}\nDiscount: {}\n\
         Amount due: ${:.2}\nDestination city: {}\nLocation: {}\n{}\n",
        header("SALE INVOICE"),
        sale.sold_at().format(TIMESTAMP),
        product.name(),
        sale.quantity(),
        product.price(),
        product.discount(),
        sale.total(),
        sale.city(),
        sale.location(),
        rule(),
    )
}

pub fn expense(expense: &Expense) -> String {
    format!(
        "{}Recorded: {}\nDescription: {}\nAmount: ${:.2}\nCity: {}\nLocation: {}\n{}\n",
        header("EXPENSE INVOICE"),
        expense.recorded_at().format(TIMESTAMP),
        expense.description(),
        expense.amount(),
        expense.city().unwrap_or("-"),
        expense.location().unwrap_or("-"),
        rule(),
    )
}

/// One line of the per-sale city/location log.
pub fn city_line(product: &str, sale: &Sale) -> String {
    format!(
        "Product: {} | Quantity: {} | City: {} | Location: {} | Date: {}\n",
        product,
        sale.quantity(),
        sale.city(),
        sale.location(),
        sale.sold_at().format(TIMESTAMP),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockbook_ledger::Ledger;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap()
    }

    #[test]
    fn sale_invoice_shows_discounted_amount() {
        let mut ledger = Ledger::new();
        ledger.add_stock("Widget", 10.0, 5, 10.0).unwrap();
        let sale = ledger.sell_at("Widget", 2, "Lima", "StoreA", test_time()).unwrap();

        let text = super::sale(ledger.product("Widget").unwrap(), &sale);
        assert!(text.contains("SALE INVOICE"));
        assert!(text.contains("Sold: 01/03/2024 14:30:00"));
        assert!(text.contains("Amount due: $18.00"));
        assert!(text.contains("Destination city: Lima"));
        assert!(text.contains(&"=".repeat(50)));
    }

    #[test]
    fn incoming_invoice_prices_only_the_received_lot() {
        let mut ledger = Ledger::new();
        ledger.add_stock("Widget", 10.0, 5, 10.0).unwrap();
        let product = ledger.add_stock("Widget", 10.0, 2, 10.0).unwrap();

        let text = incoming(&product, 2, test_time());
        assert!(text.contains("Quantity: 2\n"));
        assert!(text.contains("Amount due: $18.00"));
        assert!(text.contains("On hand: 7"));
    }

    #[test]
    fn expense_without_site_uses_placeholders() {
        let mut ledger = Ledger::new();
        let e = ledger
            .record_expense_at("cleaning", 42.0, None, test_time())
            .unwrap();

        let text = expense(&e);
        assert!(text.contains("Amount: $42.00"));
        assert!(text.contains("City: -"));
    }

    #[test]
    fn city_line_is_single_line() {
        let mut ledger = Ledger::new();
        ledger.add_stock("Widget", 1.0, 5, 0.0).unwrap();
        let sale = ledger.sell_at("Widget", 1, "Cusco", "Market", test_time()).unwrap();

        let line = city_line("Widget", &sale);
        assert_eq!(
            line,
            "Product: Widget | Quantity: 1 | City: Cusco | Location: Market | Date: 01/03/2024 14:30:00\n"
        );
    }
}
