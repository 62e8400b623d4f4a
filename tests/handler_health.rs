mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_ok() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/healthz").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["ok"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["storage"]["status"], "ok");
}
