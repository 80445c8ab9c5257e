mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test::TestRequest;
use common::*;
use lirik_core::api_models::{
    AdminAcknowledgementResponse,
    AdminSongsResponse,
    ErrorReason,
    InvalidJsonBodyReason,
    ResponseWithErrorReason,
    SongUpsertRequest,
    SongsErrorReason,
};


#[actix_web::test]
async fn admin_endpoints_reject_missing_or_wrong_tokens() {
    let (service, _state) = initialize_test_application(Some(TEST_ADMIN_TOKEN)).await;

    let missing_token = call(&service, TestRequest::get().uri("/api/admin/songs")).await;
    assert_eq!(missing_token.status(), StatusCode::UNAUTHORIZED);

    let body: ResponseWithErrorReason = read_json(missing_token).await;
    assert_eq!(body.reason, ErrorReason::MissingAuthentication);


    let wrong_token = call(
        &service,
        TestRequest::get()
            .uri("/api/admin/songs")
            .insert_header(bearer("guess")),
    )
    .await;
    assert_eq!(wrong_token.status(), StatusCode::UNAUTHORIZED);

    let unauthenticated_reindex = call(&service, TestRequest::post().uri("/api/admin/reindex")).await;
    assert_eq!(unauthenticated_reindex.status(), StatusCode::UNAUTHORIZED);
}


#[actix_web::test]
async fn admin_endpoints_are_closed_without_configured_token() {
    let (service, _state) = initialize_test_application(None).await;

    let response = call(
        &service,
        TestRequest::get()
            .uri("/api/admin/songs")
            .insert_header(bearer("anything")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: ResponseWithErrorReason = read_json(response).await;
    assert_eq!(body.reason, ErrorReason::AdminTokenNotConfigured);
}


#[actix_web::test]
async fn unauthenticated_upsert_is_rejected_before_parsing() {
    let (service, _state) = initialize_test_application(Some(TEST_ADMIN_TOKEN)).await;

    let response = call(
        &service,
        TestRequest::post()
            .uri("/api/admin/songs")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{ this is not json"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}


#[actix_web::test]
async fn upsert_validates_its_body() {
    let (service, _state) = initialize_test_application(Some(TEST_ADMIN_TOKEN)).await;

    let empty_body = call(
        &service,
        TestRequest::post()
            .uri("/api/admin/songs")
            .insert_header(bearer(TEST_ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(empty_body.status(), StatusCode::BAD_REQUEST);

    let body: ResponseWithErrorReason = read_json(empty_body).await;
    assert_eq!(body.reason, ErrorReason::MissingJsonBody);


    let not_json = call(
        &service,
        TestRequest::post()
            .uri("/api/admin/songs")
            .insert_header(bearer(TEST_ADMIN_TOKEN))
            .set_payload("{ this is not json"),
    )
    .await;
    assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);

    let body: ResponseWithErrorReason = read_json(not_json).await;
    assert_eq!(
        body.reason,
        ErrorReason::invalid_json_body(InvalidJsonBodyReason::NotJson)
    );


    let missing_fields = call(
        &service,
        TestRequest::post()
            .uri("/api/admin/songs")
            .insert_header(bearer(TEST_ADMIN_TOKEN))
            .set_json(SongUpsertRequest {
                title: Some("   ".to_string()),
                ..Default::default()
            }),
    )
    .await;
    assert_eq!(missing_fields.status(), StatusCode::BAD_REQUEST);

    let body: ResponseWithErrorReason = read_json(missing_fields).await;
    assert_eq!(
        body.reason,
        ErrorReason::Songs(SongsErrorReason::missing_fields(vec![
            "title".into(),
            "body".into()
        ]))
    );
}


#[actix_web::test]
async fn upsert_is_idempotent_per_slug() {
    let (service, _state) = initialize_test_application(Some(TEST_ADMIN_TOKEN)).await;

    let first = upsert_song(&service, "Allah Itu Baik", None, None, "Allah itu baik").await;
    let second = upsert_song(
        &service,
        "Allah Itu Baik",
        Some("Sidney Mohede"),
        None,
        "Allah itu baik, sungguh baik",
    )
    .await;
    assert_eq!(first.data.slug, "allah-itu-baik");
    assert_eq!(second.data.slug, first.data.slug);


    let response = call(
        &service,
        TestRequest::get()
            .uri("/api/admin/songs")
            .insert_header(bearer(TEST_ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );

    let songs: AdminSongsResponse = read_json(response).await;
    assert!(songs.ok);
    assert_eq!(songs.data.len(), 1);
    assert_eq!(songs.data[0].artist.as_deref(), Some("Sidney Mohede"));
    assert_eq!(songs.data[0].language, "id");
}


#[actix_web::test]
async fn delete_requires_slug() {
    let (service, _state) = initialize_test_application(Some(TEST_ADMIN_TOKEN)).await;

    let response = call(
        &service,
        TestRequest::delete()
            .uri("/api/admin/songs")
            .insert_header(bearer(TEST_ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: ResponseWithErrorReason = read_json(response).await;
    assert_eq!(
        body.reason,
        ErrorReason::Songs(SongsErrorReason::missing_slug())
    );


    let unknown_slug = call(
        &service,
        TestRequest::delete()
            .uri("/api/admin/songs?slug=does-not-exist")
            .insert_header(bearer(TEST_ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(unknown_slug.status(), StatusCode::OK);
}


#[actix_web::test]
async fn session_cookie_authenticates_later_requests() {
    let (service, _state) = initialize_test_application(Some(TEST_ADMIN_TOKEN)).await;

    let cookie_only_session = call(
        &service,
        TestRequest::post()
            .uri("/api/admin/session")
            .insert_header((header::COOKIE, format!("admin_token={TEST_ADMIN_TOKEN}"))),
    )
    .await;
    assert_eq!(cookie_only_session.status(), StatusCode::UNAUTHORIZED);


    let session = call(
        &service,
        TestRequest::post()
            .uri("/api/admin/session")
            .insert_header(bearer(TEST_ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(session.status(), StatusCode::OK);

    let set_cookie = session
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));

    let cookie_pair = set_cookie.split(';').next().unwrap().to_string();
    assert_eq!(cookie_pair, format!("admin_token={TEST_ADMIN_TOKEN}"));

    let acknowledgement: AdminAcknowledgementResponse = read_json(session).await;
    assert!(acknowledgement.ok);


    let with_cookie = call(
        &service,
        TestRequest::get()
            .uri("/api/admin/songs")
            .insert_header((header::COOKIE, cookie_pair)),
    )
    .await;
    assert_eq!(with_cookie.status(), StatusCode::OK);
}


#[actix_web::test]
async fn token_query_parameter_is_accepted() {
    let (service, _state) = initialize_test_application(Some(TEST_ADMIN_TOKEN)).await;

    let response = call(
        &service,
        TestRequest::get().uri(&format!("/api/admin/songs?token={TEST_ADMIN_TOKEN}")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}


#[actix_web::test]
async fn reindex_keeps_songs_searchable() {
    let (service, _state) = initialize_test_application(Some(TEST_ADMIN_TOKEN)).await;

    upsert_song(&service, "Yesus Kekasih Jiwaku", None, None, "Yesus kekasih jiwaku").await;

    let response = call(
        &service,
        TestRequest::post()
            .uri("/api/admin/reindex")
            .insert_header(bearer(TEST_ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let acknowledgement: AdminAcknowledgementResponse = read_json(response).await;
    assert!(acknowledgement.ok);

    let results = search(&service, "q=kekasih").await;
    assert_eq!(result_slugs(&results), vec!["yesus-kekasih-jiwaku"]);
}
