use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;
use crate::database::models::{Coupon, Product, Review, User};

/// Errors from StoreManager
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

static CLIENT: OnceCell<Client> = OnceCell::const_new();

/// Centralized handle to the document store. The client is created lazily on
/// first use and shared for the lifetime of the process.
pub struct StoreManager;

impl StoreManager {
    async fn client() -> Result<&'static Client, StoreError> {
        CLIENT
            .get_or_try_init(|| async {
                let uri = &config::config().database.uri;
                if uri.is_empty() {
                    return Err(StoreError::ConfigMissing("MONGODB_URI"));
                }

                let options = ClientOptions::parse(uri).await?;
                let client = Client::with_options(options)?;
                info!("Created document store client");
                Ok(client)
            })
            .await
    }

    pub async fn database() -> Result<Database, StoreError> {
        let name = &config::config().database.db_name;
        Ok(Self::client().await?.database(name))
    }

    pub async fn products() -> Result<Collection<Product>, StoreError> {
        Ok(Self::database().await?.collection("products"))
    }

    pub async fn reviews() -> Result<Collection<Review>, StoreError> {
        Ok(Self::database().await?.collection("reviews"))
    }

    pub async fn users() -> Result<Collection<User>, StoreError> {
        Ok(Self::database().await?.collection("users"))
    }

    pub async fn coupons() -> Result<Collection<Coupon>, StoreError> {
        Ok(Self::database().await?.collection("coupons"))
    }

    /// Pings the store to ensure connectivity
    pub async fn health_check() -> Result<(), StoreError> {
        let db = Self::database().await?;
        db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    /// Create the indexes the application relies on. The unique email index
    /// closes the duplicate-signup race on first login.
    pub async fn ensure_indexes() -> Result<(), StoreError> {
        let db = Self::database().await?;
        db.run_command(
            doc! {
                "createIndexes": "users",
                "indexes": [{
                    "name": "unique_user_email",
                    "key": { "user_email": 1 },
                    "unique": true
                }],
            },
            None,
        )
        .await?;
        info!("Ensured unique index on users.user_email");
        Ok(())
    }

    /// Startup probe: connectivity check plus index creation
    pub async fn bootstrap() -> Result<(), StoreError> {
        Self::health_check().await?;
        Self::ensure_indexes().await?;
        Ok(())
    }

    /// True when the error is a unique-index violation (duplicate key)
    pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        matches!(
            *err.kind,
            mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(ref e))
                if e.code == 11000
        )
    }
}
