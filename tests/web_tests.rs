//! Login, standup and item pages driven through the router.

#![allow(clippy::unwrap_used)]

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{TestApp, PASSWORD, USERNAME};
use whiteboard::db::services;

#[tokio::test]
async fn health_check_needs_no_login() {
    let app = TestApp::spawn().await;
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "OK");
}

#[tokio::test]
async fn pages_redirect_to_login_without_a_token() {
    let app = TestApp::spawn().await;
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/login");
}

#[tokio::test]
async fn bearer_token_is_accepted() {
    let app = TestApp::spawn().await;
    let request = Request::builder()
        .uri("/")
        .header(header::AUTHORIZATION, format!("Bearer {}", app.token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn login_sets_token_cookie() {
    let app = TestApp::spawn().await;
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={USERNAME}&password={PASSWORD}")))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), "/");
    assert!(response.set_cookies().iter().any(|cookie| cookie.starts_with("token=")));
}

#[tokio::test]
async fn wrong_password_rerenders_login() {
    let app = TestApp::spawn().await;
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={USERNAME}&password=wrong-password")))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.contains("Invalid username or password."));
    assert!(response.set_cookies().is_empty());
}

#[tokio::test]
async fn index_lists_standups_by_title() {
    let app = TestApp::spawn().await;
    app.create_standup("Round Table", false).await;
    app.create_standup("Camelot", true).await;

    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    let camelot = response.body.find("Camelot").unwrap();
    let round_table = response.body.find("Round Table").unwrap();
    assert!(camelot < round_table);
}

#[tokio::test]
async fn standup_form_creates_and_updates() {
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/standups/new").await.status, StatusCode::OK);

    let response = app
        .post_form(
            "/standups",
            "title=Camelot&subject_prefix=%5BStandup%5D&to_address=camelot%40example.com\
             &one_click_post=true&closing_message=&image_urls=&image_days=Mon%2C+Fri",
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let standups = services::get_all_standups(&app.db).await.unwrap();
    assert_eq!(standups.len(), 1);
    let standup = &standups[0];
    assert!(standup.one_click_post);
    assert!(standup.closing_message.is_none());
    assert_eq!(response.location(), format!("/standups/{}", standup.id));

    let edit = app.get(&format!("/standups/{}/edit", standup.id)).await;
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.body.contains("Camelot"));

    let response = app
        .post_form(
            &format!("/standups/{}", standup.id),
            "title=Camelot&subject_prefix=%5BStandup%5D&to_address=camelot%40example.com\
             &closing_message=Ni%21&image_urls=&image_days=",
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let updated = services::get_standup_by_id(&app.db, standup.id).await.unwrap().unwrap();
    assert!(!updated.one_click_post);
    assert_eq!(updated.closing_message.as_deref(), Some("Ni!"));

    let board = app.get(&format!("/standups/{}", standup.id)).await;
    assert!(board.body.contains("Ni!"));
}

#[tokio::test]
async fn standup_without_title_is_rejected() {
    let app = TestApp::spawn().await;
    let response = app
        .post_form("/standups", "title=&subject_prefix=&to_address=camelot%40example.com")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(services::get_all_standups(&app.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn items_are_added_and_removed_from_the_board() {
    let app = TestApp::spawn().await;
    let standup = app.create_standup("Camelot", true).await;

    let response = app
        .post_form(
            &format!("/standups/{}/items", standup.id),
            "kind=New+face&title=Galahad&author=&description=",
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let items = services::get_board_items(&app.db, standup.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].author.is_none());

    let board = app.get(&format!("/standups/{}", standup.id)).await;
    assert!(board.body.contains("Galahad"));

    let response = app.post_form(&format!("/items/{}/delete", items[0].id), "").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(services::get_board_items(&app.db, standup.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_standup_is_not_found() {
    let app = TestApp::spawn().await;
    assert_eq!(app.get("/standups/42").await.status, StatusCode::NOT_FOUND);
}
