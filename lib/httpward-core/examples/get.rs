use httpward_core::{HttpHelper, HttpHelperApi};
use serde::Deserialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // Every request carries `Authorization: Basic dXNlcjpwYXNz`
    let mut client = HttpHelper::basic("user", "pass")?;

    let response = client
        .get("https://httpbin.org/basic-auth/user/pass")
        .with_header("Accept", "application/json")
        .throw_on_bad_status()
        .await?;

    let body = response.text().await?;
    let result = serde_json::from_str::<BasicAuthResult>(&body)?;
    println!(
        "authenticated: {}, user: {}",
        result.authenticated, result.user
    );

    client.close().await;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct BasicAuthResult {
    authenticated: bool,
    user: String,
}
