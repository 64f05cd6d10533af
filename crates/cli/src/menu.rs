//! Numbered menus and the actions behind them.

use stockbook_core::round_cents;
use stockbook_infra::{Bookkeeper, InfraError, InvoiceKind, StaffStore};
use stockbook_staff::NewEmployee;

use crate::input::{Prompter, Stop};

pub struct App {
    pub books: Bookkeeper,
    pub staff: StaffStore,
}

/// Run the main menu until the operator exits, input ends, or Ctrl-C arrives.
pub fn run(app: &mut App, prompt: &Prompter) -> Result<(), Stop> {
    loop {
        println!();
        println!("Choose an option:");
        println!("-------------------------------------------");
        println!("1. Add product");
        println!("2. Sell product");
        println!("3. Record expense");
        println!("4. Show invoices");
        println!("5. Show inventory");
        println!("6. Refresh distribution report");
        println!("7. Change price");
        println!("8. Manage employees");
        println!("9. Exit");

        match prompt.ask("Option: ")?.as_str() {
            "1" => add_product(app, prompt)?,
            "2" => sell_product(app, prompt)?,
            "3" => record_expense(app, prompt)?,
            "4" => show_invoices(app),
            "5" => show_inventory(app),
            "6" => match app.books.refresh_report() {
                Ok(()) => println!("Distribution report refreshed."),
                Err(e) => report(&e),
            },
            "7" => change_price(app, prompt)?,
            "8" => staff_menu(app, prompt)?,
            "9" => return Ok(()),
            _ => println!("Invalid option, try again."),
        }
    }
}

fn report(err: &InfraError) {
    match err.as_domain() {
        Some(domain) => println!("Rejected: {domain}"),
        None => {
            tracing::error!(error = %err, "storage failure");
            println!("Error: {err}");
        }
    }
}

fn add_product(app: &mut App, prompt: &Prompter) -> Result<(), Stop> {
    let name = prompt.ask("Product name: ")?;
    let price: f64 = prompt.ask_parsed("Unit price: ")?;
    let quantity: i64 = prompt.ask_parsed("Quantity: ")?;
    let discount: f64 = prompt.ask_parsed("Discount (%): ")?;

    match app.books.add_stock(&name, price, quantity, discount) {
        Ok(p) => println!(
            "{} now has {} on hand (stock value ${:.2}).",
            p.name(),
            p.quantity(),
            p.total()
        ),
        Err(e) => report(&e),
    }
    Ok(())
}

fn sell_product(app: &mut App, prompt: &Prompter) -> Result<(), Stop> {
    let name = prompt.ask("Product to sell: ")?;
    let Some(product) = app.books.ledger().product(&name) else {
        println!("Product '{name}' is not in the inventory.");
        return Ok(());
    };
    println!("{} on hand.", product.quantity());

    let quantity: i64 = prompt.ask_parsed("Quantity to sell: ")?;
    let city = prompt.ask("Destination city: ")?;
    let location = prompt.ask("Selling location: ")?;

    match app.books.sell(&name, quantity, &city, &location) {
        Ok(sale) => println!(
            "Sold {} x {} to {} / {} for ${:.2}.",
            sale.quantity(),
            name,
            sale.city(),
            sale.location(),
            round_cents(sale.total())
        ),
        Err(e) => report(&e),
    }
    Ok(())
}

fn record_expense(app: &mut App, prompt: &Prompter) -> Result<(), Stop> {
    let description = prompt.ask("Description: ")?;
    let amount: f64 = prompt.ask_parsed("Amount: ")?;
    let city = prompt.ask("City (optional): ")?;
    let location = prompt.ask("Location (optional): ")?;

    let site = (!city.is_empty() || !location.is_empty()).then_some((city.as_str(), location.as_str()));
    match app.books.record_expense(&description, amount, site) {
        Ok(e) => println!("Expense of ${:.2} recorded.", e.amount()),
        Err(e) => report(&e),
    }
    Ok(())
}

fn show_invoices(app: &App) {
    for kind in [InvoiceKind::Incoming, InvoiceKind::Sale, InvoiceKind::Expense] {
        println!("--- {kind} invoices ---");
        match app.books.invoices(kind) {
            Ok(text) if text.is_empty() => println!("(none yet)"),
            Ok(text) => println!("{text}"),
            Err(e) => report(&e),
        }
    }
}

fn show_inventory(app: &App) {
    let ledger = app.books.ledger();
    let lines = ledger.inventory_snapshot();
    if lines.is_empty() {
        println!("Inventory is empty.");
        return;
    }
    for line in lines {
        println!(
            "Name: {} | Price: ${:.2} | Quantity: {} | Discount: {} | Sold: {}",
            line.name, line.price, line.quantity, line.discount, line.sold
        );
    }
    println!(
        "Total on hand: {} | Revenue: ${:.2} | Expenses: ${:.2}",
        ledger.total_stock(),
        ledger.total_revenue(),
        ledger.total_expenses()
    );
}

fn change_price(app: &mut App, prompt: &Prompter) -> Result<(), Stop> {
    let name = prompt.ask("Product: ")?;
    let price: f64 = prompt.ask_parsed("New unit price: ")?;
    match app.books.set_price(&name, price) {
        Ok(p) => println!("{} now costs ${:.2}.", p.name(), p.price()),
        Err(e) => report(&e),
    }
    Ok(())
}

fn staff_menu(app: &mut App, prompt: &Prompter) -> Result<(), Stop> {
    loop {
        println!();
        println!("Employees:");
        println!("1. Register employee");
        println!("2. Start shift");
        println!("3. End shift");
        println!("4. Employee report");
        println!("5. List employees");
        println!("6. Back");

        match prompt.ask("Option: ")?.as_str() {
            "1" => {
                let data = NewEmployee {
                    first_name: prompt.ask("First name: ")?,
                    last_name: prompt.ask("Last name: ")?,
                    age: prompt.ask_optional("Age (optional): ")?,
                    phone: prompt.ask("Phone: ")?,
                    email: prompt.ask("Email: ")?,
                    address: prompt.ask("Address: ")?,
                };
                match app.staff.register(data) {
                    Ok(e) => println!("{} registered.", e.full_name()),
                    Err(e) => report(&e),
                }
            }
            "2" => {
                let name = prompt.ask("First name: ")?;
                match app.staff.start_shift(&name) {
                    Ok(at) => println!("Shift started at {}.", at.format("%H:%M:%S")),
                    Err(e) => report(&e),
                }
            }
            "3" => {
                let name = prompt.ask("First name: ")?;
                match app.staff.end_shift(&name) {
                    Ok(shift) => {
                        let minutes = shift.duration().map(|d| d.num_minutes()).unwrap_or(0);
                        println!("Shift ended after {}h {:02}m.", minutes / 60, minutes % 60);
                    }
                    Err(e) => report(&e),
                }
            }
            "4" => {
                let name = prompt.ask("First name: ")?;
                match app.staff.report(&name) {
                    Ok(text) => println!("{text}"),
                    Err(e) => report(&e),
                }
            }
            "5" => {
                let employees = app.staff.roster().employees();
                if employees.is_empty() {
                    println!("No employees registered.");
                }
                for e in employees {
                    println!("{}", e.full_name());
                }
            }
            "6" => return Ok(()),
            _ => println!("Invalid option, try again."),
        }
    }
}
