//! Database seeder for Remit development and testing.
//!
//! Accounts are opened out-of-band, so local development needs one seeded
//! holder: user `demo` with PIN `1234` owning account `0123456789` with a
//! balance of 100000.00.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use remit_db::{AccountRepository, UserRepository};
use remit_shared::types::UserId;
use remit_shared::{AppConfig, Money};
use rust_decimal_macros::dec;

const DEMO_USERNAME: &str = "demo";
const DEMO_PIN: &str = "1234";
const DEMO_ACCOUNT_NUMBER: &str = "0123456789";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = remit_db::connect(&config.database).await?;

    let users = UserRepository::new(db.clone());
    let accounts = AccountRepository::new(db);

    println!("Seeding demo user...");
    let user = match users.find_by_username(DEMO_USERNAME).await? {
        Some(user) => {
            println!("  Demo user already exists, skipping...");
            user
        }
        None => {
            let user = users.create(DEMO_USERNAME, DEMO_PIN).await?;
            println!("  Created user {DEMO_USERNAME} with PIN {DEMO_PIN}");
            user
        }
    };

    println!("Seeding demo account...");
    if accounts
        .find_by_account_number(DEMO_ACCOUNT_NUMBER)
        .await?
        .is_some()
    {
        println!("  Demo account already exists, skipping...");
    } else {
        let balance = Money::new(dec!(100000.00))?;
        accounts
            .create(UserId::new(user.id), DEMO_ACCOUNT_NUMBER, balance)
            .await?;
        println!("  Created account {DEMO_ACCOUNT_NUMBER} with balance {balance}");
    }

    println!("Seeding complete!");
    Ok(())
}
