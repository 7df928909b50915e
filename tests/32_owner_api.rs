mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::TestApp;

fn coleman() -> serde_json::Value {
    json!({
        "firstName": "Jean",
        "lastName": "Coleman",
        "address": "105 N. Lake St.",
        "city": "Monona",
        "telephone": "6085552654"
    })
}

#[tokio::test]
async fn owner_lifecycle() -> Result<()> {
    let app = TestApp::new();
    let token = common::user_token();

    let res = app.send(Method::POST, "/rest/owner", None, Some(coleman())).await?;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.location.as_deref(), Some("/rest/owner/1"));

    let res = app.get("/rest/owner/1", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["firstName"], "Jean");
    assert_eq!(res.body["id"], 1);

    let res = app.get("/rest/owners", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().map(Vec::len), Some(1));
    assert_eq!(res.body[0]["lastName"], "Coleman");

    let res = app
        .send(Method::PUT, "/rest/owner/1", None, Some(json!({ "firstName": "Jeanette" })))
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_null());

    let res = app.get("/rest/owner/1", None).await?;
    assert_eq!(res.body["firstName"], "Jeanette");
    assert_eq!(res.body["lastName"], "Coleman");
    assert_eq!(res.body["city"], "Monona");

    let res = app.send(Method::DELETE, "/rest/owner/1", None, None).await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get("/rest/owner/1", None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn created_owner_round_trips() -> Result<()> {
    let app = TestApp::new();

    let res = app.send(Method::POST, "/rest/owner", None, Some(coleman())).await?;
    let location = res.location.expect("location header");

    let res = app.get(&location, None).await?;
    let mut expected = coleman();
    expected["id"] = json!(1);
    assert_eq!(res.body, expected);
    Ok(())
}

#[tokio::test]
async fn client_supplied_id_is_ignored() -> Result<()> {
    let app = TestApp::new();
    let mut body = coleman();
    body["id"] = json!(500);

    let res = app.send(Method::POST, "/rest/owner", None, Some(body)).await?;

    assert_eq!(res.location.as_deref(), Some("/rest/owner/1"));
    assert_eq!(app.get("/rest/owner/500", None).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_owner_is_404_for_every_verb() -> Result<()> {
    let app = TestApp::new();

    assert_eq!(app.get("/rest/owner/42", None).await?.status, StatusCode::NOT_FOUND);
    let res = app
        .send(Method::PUT, "/rest/owner/42", None, Some(json!({ "firstName": "Nobody" })))
        .await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    let res = app.send(Method::DELETE, "/rest/owner/42", None, None).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn search_matches_last_name_exactly() -> Result<()> {
    let app = TestApp::new();
    for (first, last) in [("Betty", "Davis"), ("Harold", "Davis"), ("Jeff", "Black")] {
        app.send(
            Method::POST,
            "/rest/owner",
            None,
            Some(json!({ "firstName": first, "lastName": last })),
        )
        .await?;
    }

    let res = app.get("/rest/owner?lastName=Davis", None).await?;
    assert_eq!(res.status, StatusCode::OK);
    let names: Vec<_> = res
        .body
        .as_array()
        .expect("array")
        .iter()
        .map(|o| o["firstName"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Betty", "Harold"]);

    let res = app.get("/rest/owner?lastName=Dav", None).await?;
    assert_eq!(res.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn delete_takes_pets_along() -> Result<()> {
    let app = TestApp::new();
    app.send(Method::POST, "/rest/owner", None, Some(coleman())).await?;
    app.store.add_pet(1, "Samantha").await?;
    app.store.add_pet(1, "Max").await?;

    let res = app.send(Method::DELETE, "/rest/owner/1", None, None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert!(app.store.pets_of(1).await.is_empty());
    Ok(())
}

#[tokio::test]
async fn store_failures_surface_as_generic_500() -> Result<()> {
    use petclinic_owners::database::FailPoint;

    let app = TestApp::new();
    app.send(Method::POST, "/rest/owner", None, Some(coleman())).await?;
    app.store.add_pet(1, "Samantha").await?;

    app.store.fail_next(FailPoint::InsertOwner).await;
    let res = app.send(Method::POST, "/rest/owner", None, Some(coleman())).await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.location.is_none());
    assert!(!res.body["message"].as_str().unwrap_or_default().contains("injected"));

    app.store.fail_next(FailPoint::DeleteOwner).await;
    let res = app.send(Method::DELETE, "/rest/owner/1", None, None).await?;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.store.pets_of(1).await.len(), 1);
    assert_eq!(app.get("/rest/owner/1", None).await?.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn malformed_requests_are_client_errors() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/rest/owner/abc", None).await?;
    assert!(res.status.is_client_error());

    let res = app
        .send(Method::POST, "/rest/owner", None, Some(json!({ "lastName": "Only" })))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], true);
    assert_eq!(res.body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn rejected_bodies_leave_records_untouched() -> Result<()> {
    let app = TestApp::new();
    app.send(Method::POST, "/rest/owner", None, Some(coleman())).await?;

    let res = app
        .send(Method::PUT, "/rest/owner/1", None, Some(json!({ "firstName": 42 })))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "INVALID_JSON");
    assert!(res.body["message"].is_string());

    let res = app
        .send(Method::POST, "/rest/owner", None, Some(json!("Jean Coleman")))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "INVALID_JSON");

    let res = app.get("/rest/owner/1", None).await?;
    assert_eq!(res.body["firstName"], "Jean");
    assert_eq!(app.get("/rest/owner/2", None).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn custom_prefix_moves_routes_and_locations() -> Result<()> {
    let mut config = common::test_config();
    config.api.path_prefix = "/api/v1".to_string();
    let app = TestApp::with_config(config);

    let res = app.send(Method::POST, "/api/v1/owner", None, Some(coleman())).await?;
    assert_eq!(res.location.as_deref(), Some("/api/v1/owner/1"));
    assert_eq!(app.get("/rest/owner/1", None).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/health", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "ok");
    Ok(())
}
