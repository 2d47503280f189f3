//! Live PostgreSQL tests for pg-edge-bench
//!
//! Needs a reachable database with a `games` table in `DATABASE_URL`.
//! The serverless test instead reads `SERVERLESS_DATABASE_URL` and an
//! optional `WS_PROXY` template (`WS_INSECURE=1` selects `ws://`).
//! Run: `DATABASE_URL=postgres://... cargo test --test live_postgres -- --nocapture --ignored`

use pg_edge_bench::prelude::*;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Direct connection: every phase is timed and positive
#[tokio::test]
#[ignore = "Requires DATABASE_URL - run with --ignored"]
async fn test_direct_benchmark() -> BenchResult<()> {
    let factory = PgFactory::from_url(&database_url())?;

    let summary = BenchmarkRunner::new().run(&factory, 3).await?;
    println!("📊 {:?}", summary);

    assert!(summary.average_connection_time > 0.0);
    assert!(summary.average_query_time > 0.0);
    assert!(summary.average_total_time >= summary.average_connection_time);
    Ok(())
}

/// A failing query aborts the benchmark
#[tokio::test]
#[ignore = "Requires DATABASE_URL - run with --ignored"]
async fn test_missing_table_aborts() -> BenchResult<()> {
    let factory = PgFactory::from_url(&database_url())?;
    let runner = BenchmarkRunner::new().query("SELECT * FROM pg_edge_bench_no_such_table");

    let err = runner.run(&factory, 2).await.unwrap_err();
    assert!(matches!(err, BenchError::Query(_)));
    Ok(())
}

/// Wrong password fails in the connection phase
#[tokio::test]
#[ignore = "Requires DATABASE_URL - run with --ignored"]
async fn test_bad_credentials() -> BenchResult<()> {
    let mut url = url::Url::parse(&database_url()).expect("valid DATABASE_URL");
    url.set_password(Some("definitely-wrong")).expect("URL with credentials");
    let factory = PgFactory::from_url(url.as_str())?;

    let err = BenchmarkRunner::new().run(&factory, 1).await.unwrap_err();
    assert!(matches!(err, BenchError::Connection(_)));
    Ok(())
}

/// Serverless driver through the WebSocket proxy, end to end
#[tokio::test]
#[ignore = "Requires SERVERLESS_DATABASE_URL - run with --ignored"]
async fn test_serverless_benchmark() -> BenchResult<()> {
    let url = std::env::var("SERVERLESS_DATABASE_URL").expect("SERVERLESS_DATABASE_URL must be set");
    let mut settings = ServerlessConfig {
        enabled: true,
        database_url: Some(url.clone()),
        ..Default::default()
    };
    if let Ok(proxy) = std::env::var("WS_PROXY") {
        settings.ws_proxy = proxy;
    }
    if std::env::var("WS_INSECURE").is_ok_and(|v| v == "1") {
        settings.use_secure_websocket = false;
    }

    let factory = ServerlessFactory::new(&url, &settings)?;
    println!("🔌 {}", factory.websocket_url());

    let summary = BenchmarkRunner::new().run(&factory, 2).await?;
    println!("📊 {:?}", summary);

    assert!(summary.average_connection_time > 0.0);
    assert!(summary.average_total_time >= summary.average_connection_time);
    Ok(())
}
