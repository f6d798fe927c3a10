//! Fetches the current user and runs a search.
//!
//! ```bash
//! ARENA_TOKEN=... cargo run --example basic -- "brutalist architecture"
//! ```

use arena_http::v3::{SearchQuery, SearchTypeFilter};
use arena_http::{ArenaClient, ArenaError, RequestOptions};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = ArenaClient::from_env()?;
    let term = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "brutalist architecture".to_owned());

    let ping = client.v3().system().ping().await?;
    println!("ping: {}", serde_json::Value::Object(ping));

    if client.http().has_token() {
        let me = client.v3().users().current().await?;
        println!("signed in as {}", me.get("slug").unwrap_or(&serde_json::Value::Null));
    }

    let cancel = CancellationToken::new();
    let search = SearchQuery {
        types: vec![SearchTypeFilter::Channel],
        per: Some(5),
        ..SearchQuery::new(term)
    };
    match client
        .v3()
        .search()
        .with_options(RequestOptions::new().signal(cancel.clone()))
        .query(&search)
        .await
    {
        Ok(page) => {
            for channel in &page.data {
                println!("- {}", channel.get("title").unwrap_or(&serde_json::Value::Null));
            }
            println!("{} results in total", page.meta.total_count);
        }
        Err(ArenaError::Api(err)) if err.status == 429 => {
            let wait = err.rate_limit.as_ref().and_then(|limit| limit.retry_after_seconds);
            println!("rate limited, retry after {wait:?}s");
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
