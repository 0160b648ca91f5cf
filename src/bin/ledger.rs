//! Ledger Binary
//!
//! Interactive cash ledger and session log for the member named in the
//! environment. Uses PostgreSQL when `DB_URL` is set, memory otherwise.

use pokerledger::cli::CLI;
use pokerledger::config::Config;
use pokerledger::identity::Member;
use pokerledger::storage::Memory;
use pokerledger::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    kys();
    let config = Config::from_env()?;
    let member = Member::new(ID::default(), config.username.clone(), config.email.clone());
    match config.db_url.as_deref() {
        #[cfg(feature = "database")]
        Some(url) => {
            let client = pokerledger::storage::db(url).await?;
            pokerledger::storage::migrate(&client).await?;
            let member = pokerledger::storage::enroll(&client, &member).await?;
            CLI::open(Arc::new(client), &member, &config).await?.run().await;
        }
        #[cfg(not(feature = "database"))]
        Some(_) => {
            log::warn!("DB_URL is set but this build has no database support");
            CLI::open(Arc::new(Memory::default()), &member, &config).await?.run().await;
        }
        None => {
            log::warn!("DB_URL not set, nothing will outlive this process");
            CLI::open(Arc::new(Memory::default()), &member, &config).await?.run().await;
        }
    }
    Ok(())
}
