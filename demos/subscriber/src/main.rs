//! Subscriber lifecycle demo.
//!
//! Reads `SMX_HOST`, `SMX_USERNAME` and `SMX_PASSWORD`, then looks up one
//! subscriber account. Pass `--lifecycle` to create, update and delete a
//! throw-away subscriber instead.
//!
//! ```text
//! RUST_LOG=axos=debug cargo run -p subscriber-demo -- 777
//! ```

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use axos::prelude::*;
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

const ORG_ID: &str = "Calix";
const SUBSCRIBER_PATH: &str = "/ems/subscriber";
const ACCOUNT_PATH: &str = "/ems/subscriber/org/{org-id}/account/{account-name}";

// ============================================================================
// Data Types
// ============================================================================

/// Subscriber record as stored by SMx.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub custom_id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "account-name", default)]
    pub account_name: Option<String>,
    #[serde(rename = "org-id", default)]
    pub org_id: Option<String>,
}

impl Subscriber {
    fn residential(account: &str, name: &str) -> Self {
        Self {
            custom_id: account.to_string(),
            name: name.to_string(),
            kind: Some("Residential".to_string()),
            account_name: Some(account.to_string()),
            org_id: Some(ORG_ID.to_string()),
        }
    }
}

// ============================================================================
// Typed wrapper
// ============================================================================

/// Subscriber endpoints on top of the generic client.
pub struct Subscribers<C = HyperClient> {
    client: AxosClient<C>,
}

impl<C: HttpClient> Subscribers<C> {
    pub const fn new(client: AxosClient<C>) -> Self {
        Self { client }
    }

    fn account_query(account: &str) -> Query {
        Query::new()
            .param("org-id", ORG_ID)
            .param("account-name", account)
    }

    /// Look up a subscriber; `None` when SMx reports no such account.
    pub async fn get(&self, account: &str) -> Result<Option<Subscriber>> {
        let response = self
            .client
            .full(Call::get(ACCOUNT_PATH).query(Self::account_query(account)))
            .await?;

        if response.result_code().is_some() {
            info!(
                account,
                code = response.result_code(),
                message = response.user_message(),
                "lookup returned an outcome instead of a subscriber"
            );
            return Ok(None);
        }
        response.json().map(Some)
    }

    pub async fn create(&self, subscriber: &Subscriber) -> Result<ApiResponse> {
        self.client
            .full(Call::post(SUBSCRIBER_PATH).json(subscriber)?)
            .await
    }

    pub async fn update(&self, account: &str, changes: Value) -> Result<ApiResponse> {
        self.client
            .full(
                Call::put(ACCOUNT_PATH)
                    .query(Self::account_query(account))
                    .body(changes),
            )
            .await
    }

    pub async fn delete(&self, account: &str) -> Result<ApiResponse> {
        self.client
            .full(Call::delete(ACCOUNT_PATH).query(Self::account_query(account)))
            .await
    }
}

fn outcome(step: &str, response: &ApiResponse) {
    println!(
        "{step}: {} {} {} {}",
        response.status(),
        response.status_message(),
        response.result_code().unwrap_or("-"),
        response.user_message().unwrap_or(""),
    );
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("axos=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let first = args.next();
    let lifecycle = first.as_deref() == Some("--lifecycle");
    let account = if lifecycle { args.next() } else { first }.unwrap_or_else(|| "777".to_string());

    let config = AxosConfig::from_env()?;
    info!(url = %config.url, "connecting to SMx");
    let subscribers = Subscribers::new(AxosClient::new(config)?);

    if lifecycle {
        let created = subscribers
            .create(&Subscriber::residential(&account, "axos-rs demo"))
            .await?;
        outcome("create", &created);

        let updated = subscribers
            .update(&account, json!({"name": "axos-rs demo (renamed)"}))
            .await?;
        outcome("update", &updated);

        let deleted = subscribers.delete(&account).await?;
        outcome("delete", &deleted);
        return Ok(());
    }

    match subscribers.get(&account).await? {
        Some(subscriber) => println!("{subscriber:#?}"),
        None => println!("no subscriber for account {account}"),
    }
    Ok(())
}

// ============================================================================
// Tests using wiremock
// ============================================================================
