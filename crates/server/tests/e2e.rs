use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

mod support;

use support::{cleanup, temp_data_file, test_config, ADMIN_PASS, ADMIN_USER};

struct TestApp {
    base_url: String,
}

async fn start_server(data_file: &std::path::Path) -> anyhow::Result<TestApp> {
    let app = server::startup::build_app(&test_config(data_file)?)?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().cookie_store(true).build()?)
}

#[tokio::test]
async fn e2e_admin_session_lifecycle() -> anyhow::Result<()> {
    let data_file = temp_data_file();
    let app = start_server(&data_file).await?;
    let http = client()?;
    let services_url = format!("{}/services", app.base_url);
    let auth_url = format!("{}/auth", app.base_url);

    // anonymous writes bounce
    let res = http.post(&services_url).json(&json!({"name": "Balanceo", "price": "Consultar"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    // the cookie store keeps the session marker after login
    let res = http.post(&auth_url).json(&json!({"username": ADMIN_USER, "password": ADMIN_PASS})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = http.get(&auth_url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let created: Value = http
        .post(&services_url)
        .json(&json!({"name": "Balanceo", "price": "Consultar"}))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());

    // anonymous readers see it
    let listed: Value = reqwest::get(&services_url).await?.json().await?;
    assert_eq!(listed, json!([{"id": id, "name": "Balanceo", "price": "Consultar"}]));

    // logout drops the marker from the cookie store
    let res = http.delete(&auth_url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = http.get(&auth_url).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    let res = http.delete(format!("{services_url}?id={id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let listed: Value = reqwest::get(&services_url).await?.json().await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    cleanup(&data_file).await;
    Ok(())
}
