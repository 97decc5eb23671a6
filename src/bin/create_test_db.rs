use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use checkout_rs::{
    PasswordHash, Tags, TransactionBuilder, ValidatedPassword,
    stores::{TransactionStore, UserStore, sqlite::create_app_state},
};

/// A utility for creating a test database for the REST API server of checkout_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The password for the demo user.
    #[arg(long, default_value = "test")]
    password: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    // The secret is only needed to issue tokens, which this tool never does.
    let mut state = create_app_state(conn, "create_test_db")?;

    println!("Creating demo user...");
    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked(&args.password),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = state.user_store.create("demo", password_hash)?;

    println!("Creating transactions...");
    let now = OffsetDateTime::now_utc();
    let expenses = [
        ("Groceries", 85.20, 2, &["food"][..]),
        ("Coffee", 4.50, 3, &["food", "treats"][..]),
        ("Rent", 450.00, 10, &["home"][..]),
        ("Bus fare", 3.20, 35, &["transport"][..]),
        ("Power bill", 120.75, 40, &["home", "utilities"][..]),
        ("Cinema", 18.00, 70, &["treats"][..]),
    ];

    for (name, price, days_ago, tags) in expenses {
        state.transaction_store.create(
            TransactionBuilder::expense(user.id, name, price)?
                .date(now - Duration::days(days_ago))?
                .tags(Tags::new(tags)),
        )?;
    }

    for days_ago in [1, 31, 61] {
        state.transaction_store.create(
            TransactionBuilder::payment(user.id, "Salary", 2500.0)?
                .date(now - Duration::days(days_ago))?
                .seller(Some("Employer".to_owned())),
        )?;
    }

    println!("Success! Log in as 'demo' with the password '{}'.", args.password);

    Ok(())
}
