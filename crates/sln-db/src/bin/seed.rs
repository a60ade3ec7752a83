//! # Seed Data Generator
//!
//! Populates the database with test data for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 parts (default)
//! cargo run -p sln-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p sln-db --bin seed -- --count 2000
//!
//! # Specify database path
//! cargo run -p sln-db --bin seed -- --db ./data/sln_parts.db
//! ```
//!
//! ## Generated Data
//! Creates realistic auto-parts catalog data across categories:
//! - Filters (oil, air, fuel, cabin)
//! - Ignition (spark plugs, coils)
//! - Brakes (pads, rotors, calipers)
//! - Suspension (struts, shocks, control arms)
//! - Electrical (batteries, alternators, starters)
//!
//! Plus a small fixed set of well-known parts, customers across all
//! pricing tiers, and a handful of expenses.
//!
//! Each generated part has:
//! - Unique part number: `{BRAND}-{INDEX}`
//! - Realistic name and vehicle compatibility
//! - Price: $5.00 - $250.00
//! - Stock: 0 - 60, minimum stock level 5 - 25

use chrono::Utc;
use std::env;
use uuid::Uuid;

use sln_core::{Customer, CustomerTier, Expense, Part};
use sln_db::repository::customer::generate_customer_id;
use sln_db::repository::expense::generate_expense_id;
use sln_db::{Database, DbConfig};

/// Part categories with brands and product names for realistic test data
const CATEGORIES: &[(&str, &[&str], &[&str])] = &[
    (
        "Filters",
        &["BOS", "MAN", "FRA", "WIX"],
        &[
            "Oil Filter",
            "Air Filter",
            "Fuel Filter",
            "Cabin Air Filter",
            "Transmission Filter",
        ],
    ),
    (
        "Ignition",
        &["NGK", "DEN", "CHA", "ACD"],
        &[
            "Spark Plug",
            "Ignition Coil",
            "Glow Plug",
            "Distributor Cap",
            "Ignition Wire Set",
        ],
    ),
    (
        "Brakes",
        &["BRE", "ATE", "TRW", "WAG"],
        &[
            "Brake Pad Set",
            "Brake Rotor",
            "Brake Caliper",
            "Brake Hose",
            "Brake Master Cylinder",
        ],
    ),
    (
        "Suspension",
        &["KYB", "MON", "SAC", "BIL"],
        &[
            "Front Strut",
            "Rear Shock Absorber",
            "Control Arm",
            "Sway Bar Link",
            "Coil Spring",
        ],
    ),
    (
        "Electrical",
        &["BOS", "DEN", "VAL", "HEL"],
        &[
            "Battery 12V",
            "Alternator",
            "Starter Motor",
            "Headlight Bulb",
            "Wiper Motor",
        ],
    ),
];

/// Vehicle compatibility strings cycled across generated parts
const VEHICLES: &[&str] = &[
    "Toyota Corolla 2015-2022",
    "Honda Civic 2016-2023",
    "Ford F-150 2015-2020",
    "Suzuki Alto 2014-2021",
    "Toyota Hilux 2016-2023",
    "Honda City 2017-2022",
    "Nissan Sunny 2013-2019",
    "Universal",
];

/// Shelf locations cycled across generated parts
const LOCATIONS: &[&str] = &["A1", "A2", "B1", "B2", "C1", "C2", "D1", "Back Room"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Repository-level logging, controlled via RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut db_path = String::from("./sln_parts_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SLN Parts Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of parts to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./sln_parts_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 SLN Parts Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Parts:    {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing parts
    let existing = db.parts().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} parts", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Well-known parts used throughout manual testing
    println!();
    println!("Inserting fixed parts...");
    for part in fixed_parts() {
        db.parts().insert(&part).await?;
        println!("  {} {} ({})", part.part_number, part.part_name, part.brand);
    }

    // Generate the bulk catalog
    println!();
    println!("Generating parts...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (category_idx, (category, brands, names)) in CATEGORIES.iter().enumerate() {
        for (name_idx, part_name) in names.iter().enumerate() {
            for (brand_idx, brand) in brands.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = category_idx * 1000 + name_idx * 40 + brand_idx;
                let part = generate_part(category, brand, part_name, seed);

                if let Err(e) = db.parts().insert(&part).await {
                    eprintln!("Failed to insert {}: {}", part.part_number, e);
                    continue;
                }

                generated += 1;

                if generated % 100 == 0 {
                    println!("  Generated {} parts...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} parts in {:?}", generated, elapsed);

    // Customers across all pricing tiers
    println!();
    println!("Inserting customers...");
    for customer in fixed_customers() {
        db.customers().insert(&customer).await?;
        println!(
            "  {} {} ({:?})",
            customer.customer_id, customer.name, customer.tier
        );
    }

    // Sample expenses for the dashboard
    println!();
    println!("Inserting expenses...");
    for expense in fixed_expenses() {
        db.expenses().insert(&expense).await?;
        println!("  {} ({})", expense.amount, expense.description);
    }

    // Verify search
    println!();
    println!("Verifying search...");
    let results = db.parts().search("oil filter", 10).await?;
    println!("  Search 'oil filter': {} results", results.len());

    let results = db.parts().search("NGK", 10).await?;
    println!("  Search 'NGK': {} results", results.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single catalog part with realistic data.
fn generate_part(category: &str, brand: &str, name: &str, seed: usize) -> Part {
    let now = Utc::now();

    // Unique part number: BRAND-NNN
    let part_number = format!("{}-{:03}", brand, 100 + seed);

    // Price: $5.00 - $250.00 in deterministic steps
    let unit_price_cents = 500 + ((seed * 731) % 24_500) as i64;

    // Stock 0-60, minimum level 5-25
    let quantity_in_stock = (seed * 7 % 61) as i64;
    let minimum_stock_level = 5 + (seed % 21) as i64;

    Part {
        id: Uuid::new_v4().to_string(),
        part_number,
        part_name: name.to_string(),
        brand: brand.to_string(),
        vehicle_compatibility: VEHICLES[seed % VEHICLES.len()].to_string(),
        category: category.to_string(),
        quantity_in_stock,
        minimum_stock_level,
        unit_price_cents,
        supplier: Some("AutoParts Wholesale Ltd".to_string()),
        location_in_shop: Some(LOCATIONS[seed % LOCATIONS.len()].to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// The small set of hand-picked parts with stable part numbers.
fn fixed_parts() -> Vec<Part> {
    let now = Utc::now();

    vec![
        Part {
            id: Uuid::new_v4().to_string(),
            part_number: "BOS-001".to_string(),
            part_name: "Oil Filter".to_string(),
            brand: "Bosch".to_string(),
            vehicle_compatibility: "Toyota Corolla 2015-2022".to_string(),
            category: "Filters".to_string(),
            quantity_in_stock: 25,
            minimum_stock_level: 10,
            unit_price_cents: 1250,
            supplier: Some("Bosch Distribution".to_string()),
            location_in_shop: Some("A1".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        },
        Part {
            id: Uuid::new_v4().to_string(),
            part_number: "NGK-002".to_string(),
            part_name: "Spark Plug".to_string(),
            brand: "NGK".to_string(),
            vehicle_compatibility: "Honda Civic 2016-2023".to_string(),
            category: "Ignition".to_string(),
            quantity_in_stock: 50,
            minimum_stock_level: 20,
            unit_price_cents: 875,
            supplier: Some("NGK Pakistan".to_string()),
            location_in_shop: Some("B2".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        },
    ]
}

/// Customers covering every pricing tier.
fn fixed_customers() -> Vec<Customer> {
    let now = Utc::now();

    vec![
        Customer {
            id: generate_customer_id(),
            customer_id: "CUST001".to_string(),
            name: "John Doe".to_string(),
            email: Some("john.doe@example.com".to_string()),
            phone: Some("+92-300-1234567".to_string()),
            address: Some("12 Mall Road, Lahore".to_string()),
            tier: CustomerTier::Regular,
            created_at: now,
        },
        Customer {
            id: generate_customer_id(),
            customer_id: "CUST002".to_string(),
            name: "Jane Smith".to_string(),
            email: Some("jane.smith@example.com".to_string()),
            phone: Some("+92-321-7654321".to_string()),
            address: None,
            tier: CustomerTier::Wholesale,
            created_at: now,
        },
        Customer {
            id: generate_customer_id(),
            customer_id: "CUST003".to_string(),
            name: "Karachi Motors Workshop".to_string(),
            email: None,
            phone: Some("+92-333-1112223".to_string()),
            address: Some("Shahrah-e-Faisal, Karachi".to_string()),
            tier: CustomerTier::Vip,
            created_at: now,
        },
    ]
}

/// A handful of sample expenses, including one unparseable legacy amount.
fn fixed_expenses() -> Vec<Expense> {
    let now = Utc::now();

    vec![
        Expense {
            id: generate_expense_id(),
            description: "Shop rent".to_string(),
            category: Some("Rent".to_string()),
            amount: "450.00".to_string(),
            incurred_at: now,
            created_at: now,
        },
        Expense {
            id: generate_expense_id(),
            description: "Electricity bill".to_string(),
            category: Some("Utilities".to_string()),
            amount: "85.50".to_string(),
            incurred_at: now,
            created_at: now,
        },
        Expense {
            id: generate_expense_id(),
            description: "Imported from old ledger".to_string(),
            category: None,
            amount: "approx 30".to_string(),
            incurred_at: now,
            created_at: now,
        },
    ]
}
