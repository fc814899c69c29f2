//! End-to-end check of the built binary against PostgreSQL.
//! Skipped unless DATABASE_URL is set.

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

struct ServerProcess {
    child: Child,
    base_url: String,
}

impl ServerProcess {
    fn spawn(database_url: &str) -> Result<Self> {
        let port = portpicker::pick_unused_port().ok_or_else(|| anyhow::anyhow!("no free port"))?;
        let child = Command::new(env!("CARGO_BIN_EXE_collectibles-api"))
            .args(["serve", "--host", "127.0.0.1", "--port", &port.to_string(), "--backend", "postgres"])
            .env("DATABASE_URL", database_url)
            .env("RUST_LOG", "warn")
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()?;
        Ok(Self { child, base_url: format!("http://127.0.0.1:{}", port) })
    }

    async fn wait_until_healthy(&mut self, client: &Client) -> Result<()> {
        for _ in 0..100 {
            if let Some(status) = self.child.try_wait()? {
                bail!("server exited early with {}", status);
            }
            if let Ok(response) = client.get(format!("{}/health", self.base_url)).send().await {
                if response.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        bail!("server at {} did not become healthy", self.base_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[tokio::test]
async fn crud_round_trip_against_postgres() -> Result<()> {
    dotenvy::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping live server test");
        return Ok(());
    };

    let client = Client::new();
    let mut server = ServerProcess::spawn(&database_url)?;
    server.wait_until_healthy(&client).await?;

    let name = format!("live-{}", uuid::Uuid::new_v4());
    let renamed = format!("{}-renamed", name);
    let record = json!({ "name": name, "value": 10, "group": "live-test" });

    let response = client.post(server.url("/collectives")).json(&record).send().await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>().await?, record);

    let response = client.post(server.url("/collectives")).json(&record).send().await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client.get(server.url(&format!("/collectives/{}", name))).send().await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await?, record);

    let response = client
        .patch(server.url(&format!("/collectives/{}", name)))
        .json(&json!({ "name": renamed, "condition": "mint" }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>().await?,
        json!({ "name": renamed, "value": 10, "group": "live-test", "condition": "mint" })
    );

    let groups: Value = client.get(server.url("/collectives/groups")).send().await?.json().await?;
    let live_group = groups
        .as_array()
        .and_then(|groups| groups.iter().find(|g| g["group"] == "live-test"));
    assert!(live_group.map(|g| g["count"].as_i64() >= Some(1)).unwrap_or(false), "{}", groups);

    let response = client.delete(server.url(&format!("/collectives/{}", renamed))).send().await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.get(server.url(&format!("/collectives/{}", renamed))).send().await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>().await?["title"], "Collective Not Found");

    Ok(())
}
