use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use expense_ledger::{Amount, ExpenseStore, NewExpense, SQLiteExpenseStore, initialize_db};

/// A utility for creating a test database for the expense_ledger server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The number of months of expenses to create, ending with the current month.
    #[arg(long, short, default_value_t = 6)]
    months: u32,
}

/// The recurring expenses created for each month as `(name, amount, day of month, category)`.
const MONTHLY_EXPENSES: [(&str, &str, u8, &str); 8] = [
    ("Rent", "1450.00", 1, "Housing"),
    ("Power bill", "132.47", 3, "Utilities"),
    ("Supermarket", "187.35", 6, "Groceries"),
    ("Bus pass", "60", 9, "Transport"),
    ("Pizza night", "38.50", 13, "Eating out"),
    ("Supermarket", "164.02", 20, "Groceries"),
    ("Cinema", "24.99", 24, "Entertainment"),
    ("Jacket refund", "-59.95", 27, "Clothing"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let store = SQLiteExpenseStore::new(Arc::new(Mutex::new(conn)));

    println!("Creating expenses for the last {} months...", args.months);

    let mut month_start = OffsetDateTime::now_utc().date().replace_day(1)?;
    let mut count = 0;

    for _ in 0..args.months {
        for (name, amount, day, category) in MONTHLY_EXPENSES {
            let date = month_start.replace_day(day)?;
            store.create(NewExpense::new(
                name,
                Amount::from_str(amount)?,
                date,
                category,
            )?)?;
            count += 1;
        }

        month_start = previous_month_start(month_start)?;
    }

    println!("Created {count} expenses.");
    println!("Success!");

    Ok(())
}

fn previous_month_start(month_start: Date) -> Result<Date, time::error::ComponentRange> {
    (month_start - Duration::days(1)).replace_day(1)
}
