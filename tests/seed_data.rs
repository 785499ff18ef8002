use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use workshop_tracker::infrastructure::seed::IMAGE_FAILURE_PREFIX;

mod test_harness;

use test_harness::{ids, spawn_app, spawn_app_with};

#[tokio::test]
async fn missing_images_are_recorded_per_elf() -> Result<()> {
    let app = spawn_app().await?;

    let keys = app.state.kv.keys(IMAGE_FAILURE_PREFIX).await?;
    assert_eq!(
        keys,
        [
            "seed.image_failures.Jingleberry.jpeg",
            "seed.image_failures.Peppermint.jpeg",
            "seed.image_failures.Snowflake.jpeg",
        ]
    );

    let failure = app
        .state
        .kv
        .get("seed.image_failures.Snowflake.jpeg")
        .await?
        .unwrap_or(Value::Null);
    assert_eq!(failure["elf"], json!("Snowflake Tinselwhisk"));
    assert!(failure["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn available_images_become_data_uris() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut file = std::fs::File::create(dir.path().join("Jingleberry.jpeg"))?;
    file.write_all(b"elf")?;
    let images_dir = dir.path().to_path_buf();

    let app = spawn_app_with(move |config| config.seed.images_dir = images_dir).await?;

    let (_, elves) = app.get("/api/elves").await?;
    assert_eq!(
        elves,
        json!([
            { "name": "Jingleberry Sparkletoes", "profile_image": "data:image/jpeg;base64,ZWxm" },
            { "name": "Peppermint Candycane", "profile_image": null },
            { "name": "Snowflake Tinselwhisk", "profile_image": null },
        ])
    );

    let keys = app.state.kv.keys(IMAGE_FAILURE_PREFIX).await?;
    assert_eq!(keys.len(), 2);
    assert!(!keys.contains(&"seed.image_failures.Jingleberry.jpeg".to_string()));
    Ok(())
}

#[tokio::test]
async fn generated_orders_can_be_turned_off() -> Result<()> {
    let app = spawn_app_with(|config| config.seed.generated_orders = 0).await?;

    let (_, body) = app
        .request(
            axum::http::Method::POST,
            "/graphql",
            Some(json!({ "query": "{ toyOrders { id } }" })),
        )
        .await?;

    assert_eq!(ids(&body["data"]["toyOrders"]), ["1", "2", "4", "5", "6"]);
    Ok(())
}

#[tokio::test]
async fn service_start_dates_are_relative_to_the_current_year() -> Result<()> {
    let app = spawn_app().await?;
    let year = Utc::now().year();

    let (_, jingleberry) = app.get("/api/elf/Jingleberry%20Sparkletoes").await?;
    let (_, snowflake) = app.get("/api/elf/Snowflake%20Tinselwhisk").await?;
    let (_, peppermint) = app.get("/api/elf/Peppermint%20Candycane").await?;

    assert_eq!(
        jingleberry["service_start_date"],
        json!(format!("{}-12-01", year - 127))
    );
    assert_eq!(
        snowflake["service_start_date"],
        json!(format!("{}-12-15", year - 43))
    );
    assert_eq!(
        peppermint["service_start_date"],
        json!(format!("{}-01-10", year - 15))
    );
    Ok(())
}

#[tokio::test]
async fn disabled_seed_starts_empty() -> Result<()> {
    let app = spawn_app_with(|config| config.seed.enabled = false).await?;

    let (_, elves) = app.get("/api/elves").await?;
    assert_eq!(elves, json!([]));
    assert!(app.state.kv.keys(IMAGE_FAILURE_PREFIX).await?.is_empty());
    Ok(())
}
