//! # Seed Data Generator
//!
//! Populates the database with demo categories, suppliers and products.
//!
//! ## Usage
//! ```bash
//! # Generate 60 products (default)
//! cargo run -p depot-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p depot-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p depot-db --bin seed -- --db ./data/depot.db
//! ```
//!
//! Opening stock is booked as IN transactions, so the ledger and
//! `current_stock` agree from the start. Roughly one product in five starts
//! at or below its reorder level.

use std::path::PathBuf;

use clap::Parser;

use depot_core::stock::StockMovement;
use depot_core::{Category, Product, Supplier, TransactionType};
use depot_db::{Database, DbConfig};

/// Categories with their product names.
const CATEGORIES: &[(&str, &str, &[&str])] = &[
    (
        "Fasteners",
        "Screws, bolts, nuts and anchors",
        &[
            "Wood Screw",
            "Machine Bolt",
            "Hex Nut",
            "Wall Anchor",
            "Lag Screw",
            "Washer",
            "Rivet",
            "Carriage Bolt",
        ],
    ),
    (
        "Hand Tools",
        "Non-powered tools",
        &[
            "Claw Hammer",
            "Screwdriver Set",
            "Adjustable Wrench",
            "Tape Measure",
            "Utility Knife",
            "Pliers",
            "Hand Saw",
            "Level",
        ],
    ),
    (
        "Paint",
        "Paint, primer and supplies",
        &[
            "Interior Emulsion",
            "Exterior Gloss",
            "Primer",
            "Paint Roller",
            "Brush Set",
            "Masking Tape",
            "Drop Cloth",
            "Paint Tray",
        ],
    ),
    (
        "Electrical",
        "Wiring and fittings",
        &[
            "Light Switch",
            "Wall Socket",
            "Cable Reel",
            "Junction Box",
            "Fuse",
            "LED Bulb",
            "Extension Lead",
            "Cable Ties",
        ],
    ),
];

/// Suppliers: (name, contact, phone, email, address)
const SUPPLIERS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "Northwind Hardware",
        "Ana Trujillo",
        "555-0101",
        "sales@northwind.test",
        "12 Harbour St",
    ),
    (
        "Contoso Supply",
        "Yoshi Tannamuri",
        "555-0102",
        "orders@contoso.test",
        "400 Mill Rd",
    ),
    (
        "Fabrikam Tools",
        "Pat Morgan",
        "555-0103",
        "trade@fabrikam.test",
        "7 Forge Ln",
    ),
];

/// Size variants for products
const SIZES: &[(&str, i64)] = &[("", 0), ("Pro", 450), ("Bulk", 900)];

/// Populates a Depot database with demo data.
#[derive(Debug, Parser)]
#[command(name = "seed", about = "Fill a Depot database with demo suppliers, categories and products")]
struct Args {
    /// Number of products to generate
    #[arg(short, long, default_value_t = 60)]
    count: usize,

    /// Database file path
    #[arg(short, long, value_name = "PATH", default_value = "./depot_dev.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Args { count, db: db_path } = Args::parse();

    println!("Seeding {} with {} products", db_path.display(), count);

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("{} products already present; nothing seeded", existing);
        db.close().await;
        return Ok(());
    }

    let mut supplier_ids = Vec::with_capacity(SUPPLIERS.len());
    for (name, contact, phone, email, address) in SUPPLIERS {
        let supplier = db
            .suppliers()
            .insert(&Supplier {
                id: 0,
                name: name.to_string(),
                contact_person: contact.to_string(),
                phone: phone.to_string(),
                email: email.to_string(),
                address: address.to_string(),
            })
            .await?;
        supplier_ids.push(supplier.id);
    }
    let mut generated = 0;
    let mut low = 0;
    let start = std::time::Instant::now();

    'outer: for (name, description, products) in CATEGORIES {
        let category = db
            .categories()
            .insert(&Category {
                id: 0,
                name: name.to_string(),
                description: description.to_string(),
            })
            .await?;

        for (product_idx, product_name) in products.iter().enumerate() {
            for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = generated * 7 + product_idx * 3 + size_idx;
                let supplier_id = supplier_ids[seed % supplier_ids.len()];
                let product = generate_product(
                    product_name,
                    size,
                    *price_addon,
                    category.id,
                    supplier_id,
                    seed,
                );

                let stored = match db.products().insert(&product).await {
                    Ok(stored) => stored,
                    Err(e) => {
                        eprintln!("Failed to insert {}: {}", product.name, e);
                        continue;
                    }
                };

                let opening = opening_stock(&stored, seed);
                if opening > 0 {
                    let movement = StockMovement::new(
                        stored.id,
                        TransactionType::In,
                        opening,
                        Some("Opening stock"),
                    )?;
                    db.transactions().record(&movement, false).await?;
                }
                if opening <= stored.reorder_level {
                    low += 1;
                }

                generated += 1;
            }
        }
    }

    let flagged = db.products().low_stock().await?;
    println!(
        "{} suppliers, {} products in {:?}; {} seeded low, {} flagged by the low-stock query",
        supplier_ids.len(),
        generated,
        start.elapsed(),
        low,
        flagged.len()
    );

    db.close().await;

    Ok(())
}

/// Generates a single product with deterministic demo data.
fn generate_product(
    name: &str,
    size: &str,
    price_addon: i64,
    category_id: i64,
    supplier_id: i64,
    seed: usize,
) -> Product {
    // Selling price: 1.49 - 24.48 + size addon
    let selling_cents = 149 + ((seed * 37) % 2300) as i64 + price_addon;

    // Cost: 55-75% of the selling price
    let cost_pct = 55 + (seed % 21) as i64;
    let cost_cents = selling_cents * cost_pct / 100;

    let full_name = if size.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", name, size)
    };

    Product {
        id: 0,
        name: full_name,
        description: String::new(),
        category_id,
        supplier_id,
        cost_cents,
        selling_cents,
        reorder_level: 5 + (seed % 4) as i64 * 5,
        current_stock: 0,
    }
}

/// Opening stock; every fifth product starts at or below its reorder level.
fn opening_stock(product: &Product, seed: usize) -> i64 {
    if seed % 5 == 0 {
        product.reorder_level / 2
    } else {
        product.reorder_level + 1 + (seed % 60) as i64
    }
}
