//! # Seed Data Generator
//!
//! Populates a database with stock data for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./stockroom_dev.db (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database URL
//! cargo run -p stockroom-db --bin seed -- --db sqlite://./data/stockroom.db
//! ```
//!
//! ## Generated Data
//! - One category per department, each with a supplier and a product range
//! - Memberships `classic` and `premium`
//! - Customers on each tier and one without a membership
//! - A supplier order per product (which opens its inbound bill)
//! - A few customer orders so the sales reports have something to rank
//!
//! Everything is written in a single session; a failure leaves the
//! database untouched.

use std::env;
use std::time::Instant;

use anyhow::Context;
use stockroom_core::{
    NewCategory, NewCustomer, NewCustomerOrder, NewMembership, NewProduct, NewSupplier,
    NewSupplierOrder,
};
use stockroom_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_URL: &str = "sqlite://stockroom_dev.db";

/// (category, supplier, [(product, unit price in cents, reorder level)])
const DEPARTMENTS: &[(&str, &str, &[(&str, i64, i64)])] = &[
    (
        "Beverages",
        "Northwind Drinks",
        &[
            ("Sparkling Water 1L", 129, 24),
            ("Orange Juice 1L", 349, 12),
            ("Cold Brew Coffee", 499, 10),
            ("Green Tea 500ml", 219, 12),
        ],
    ),
    (
        "Dairy",
        "Valley Creamery",
        &[
            ("Whole Milk 2L", 289, 20),
            ("Greek Yogurt 500g", 399, 10),
            ("Cheddar Block 250g", 549, 8),
        ],
    ),
    (
        "Hardware",
        "Acme Wholesale",
        &[
            ("Claw Hammer", 1_899, 4),
            ("Screwdriver Set", 2_499, 3),
            ("Wood Screws (100)", 649, 10),
            ("Measuring Tape 5m", 1_099, 5),
        ],
    ),
    (
        "Garden",
        "Greenfield Supply",
        &[
            ("Potting Soil 20L", 1_299, 6),
            ("Hose Nozzle", 899, 4),
            ("Pruning Shears", 1_749, 3),
        ],
    ),
];

/// (name, email, membership type)
const CUSTOMERS: &[(&str, &str, Option<&str>)] = &[
    ("Dana Whitfield", "dana@example.com", Some("premium")),
    ("Marcus Lee", "marcus.lee@example.com", Some("classic")),
    ("Priya Raman", "priya.r@example.com", Some("classic")),
    ("Tom Okafor", "tom.okafor@example.com", None),
];

struct Args {
    db_url: String,
}

fn parse_args() -> Option<Args> {
    let args: Vec<String> = env::args().collect();
    let mut db_url = String::from(DEFAULT_DB_URL);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <URL>     Database URL (default: {DEFAULT_DB_URL})");
                println!("  -h, --help         Show this help message");
                return None;
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    Some(Args { db_url })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("seed=info,stockroom_db=info")),
        )
        .init();

    let Some(args) = parse_args() else {
        return Ok(());
    };

    info!(database = %args.db_url, "Stockroom seed starting");

    let db = Database::new(DbConfig::new(&args.db_url))
        .await
        .context("failed to open database")?;

    let mut session = db.begin().await?;

    let existing = session.categories().list_all().await?;
    if !existing.is_empty() {
        warn!(
            categories = existing.len(),
            "Database already has data; skipping seed to avoid duplicates"
        );
        return Ok(());
    }

    let start = Instant::now();

    // Memberships
    let classic = session
        .memberships()
        .create(&NewMembership::default())
        .await?;
    let premium = session
        .memberships()
        .create(&NewMembership {
            membership_type: "premium".to_string(),
        })
        .await?;

    // Catalogue and restocking
    let mut products = Vec::new();
    for (index, (category_name, supplier_name, range)) in DEPARTMENTS.iter().enumerate() {
        let category = session
            .categories()
            .create(&NewCategory {
                name: category_name.to_string(),
            })
            .await?;

        let supplier = session
            .suppliers()
            .create(&NewSupplier {
                name: supplier_name.to_string(),
                contact_person: Some("Accounts".to_string()),
                contact_number: Some(format!("55501000{index:02}")),
                email: Some(format!(
                    "orders@{}.example.com",
                    supplier_name.to_lowercase().replace(' ', "-")
                )),
                address: None,
                category_id: category.id,
            })
            .await?;

        for (name, unit_price_cents, reorder_level) in range.iter() {
            let product = session
                .products()
                .create(&NewProduct {
                    name: name.to_string(),
                    description: None,
                    category_id: category.id,
                    unit_price_cents: *unit_price_cents,
                    units_in_stock: 0,
                    units_on_order: 0,
                    reorder_level: *reorder_level,
                    discontinued: false,
                })
                .await?;

            // Stock arrives through supplier orders so every unit has a bill
            session
                .supplier_orders()
                .create(&NewSupplierOrder {
                    supplier_id: supplier.id,
                    product_id: product.id,
                    quantity: reorder_level * 3,
                })
                .await?;

            products.push(product);
        }

        info!(category = %category.name, products = range.len(), "Department seeded");
    }

    // Customers and a handful of sales
    for (index, (name, email, tier)) in CUSTOMERS.iter().enumerate() {
        let membership_id = match tier {
            Some("premium") => Some(premium.id),
            Some(_) => Some(classic.id),
            None => None,
        };
        let customer = session
            .customers()
            .create(&NewCustomer {
                name: name.to_string(),
                contact_person: None,
                contact_number: format!("55502000{index:02}"),
                email: email.to_string(),
                address: format!("{} Market Street", 10 + index),
                membership_id,
            })
            .await?;

        for product in products.iter().skip(index).step_by(3) {
            session
                .customer_orders()
                .create(&NewCustomerOrder {
                    customer_id: customer.id,
                    product_id: product.id,
                    quantity: (index as i64) + 1,
                    shipping_address: customer.address.clone(),
                })
                .await?;
        }
    }

    session.commit().await?;

    info!(
        categories = DEPARTMENTS.len(),
        products = products.len(),
        customers = CUSTOMERS.len(),
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    Ok(())
}
