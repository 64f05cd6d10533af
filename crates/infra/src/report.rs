//! Distribution summary report (rewritten in full on every refresh).

use std::path::Path;

use stockbook_ledger::Ledger;

use crate::error::InfraResult;
use crate::fs;

/// Render the report table for the current ledger state.
pub fn render(ledger: &Ledger) -> String {
    let summary = ledger.distribution_summary();
    let mut out = format!(
        "{:<20} {:>10} {:>12} {:>10}\n",
        "Product", "On hand", "Price", "Sold"
    );
    out.push_str(&format!("{}\n", "-".repeat(55)));

    for line in ledger.inventory_snapshot() {
        out.push_str(&format!(
            "{:<20} {:>10} {:>12} {:>10}\n",
            line.name,
            line.quantity,
            format!("${:.2}", line.price),
            line.sold
        ));

        if let Some(destinations) = summary.destinations(&line.name) {
            for (destination, quantity) in destinations {
                out.push_str(&format!(
                    "    City: {} | Location: {} | Sold: {}\n",
                    destination.city, destination.location, quantity
                ));
            }
        }
    }

    out.push_str(&format!(
        "{}\nTotal on hand: {}\nRevenue: ${:.2}\nExpenses: ${:.2}\n",
        "-".repeat(55),
        ledger.total_stock(),
        ledger.total_revenue(),
        ledger.total_expenses(),
    ));
    out
}

pub fn write(path: &Path, ledger: &Ledger) -> InfraResult<()> {
    fs::atomic_write(path, render(ledger).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn report_breaks_sales_down_by_destination() {
        let mut ledger = Ledger::new();
        ledger.add_stock("Widget", 10.0, 5, 10.0).unwrap();
        ledger.sell("Widget", 2, "Lima", "StoreA").unwrap();
        ledger.sell("Widget", 1, "Lima", "StoreA").unwrap();

        let text = render(&ledger);
        assert!(text.contains("Widget"));
        assert!(text.contains("    City: Lima | Location: StoreA | Sold: 3\n"));
        assert!(text.contains("Total on hand: 2"));
        assert!(text.contains("Revenue: $27.00"));
    }

    #[test]
    fn write_overwrites_previous_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("distribution").join("summary.txt");

        let mut ledger = Ledger::new();
        ledger.add_stock("Widget", 1.0, 1, 0.0).unwrap();
        write(&path, &ledger).unwrap();
        ledger.add_stock("Gadget", 1.0, 1, 0.0).unwrap();
        write(&path, &ledger).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, render(&ledger));
        assert_eq!(text.matches("Product").count(), 1);
    }
}
