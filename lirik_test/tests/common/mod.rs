//! Shared setup for the end-to-end tests: a fully constructed application
//! (real router, real state, migrated in-memory database) behind actix's test service.

#![allow(dead_code)]

use std::path::PathBuf;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use lirik::api::{api_router, configure_pages};
use lirik::state::{ApplicationState, ApplicationStateInner};
use lirik_configuration::Configuration;
use lirik_core::api_models::{SearchResponse, SongUpsertRequest, SongUpsertResponse};
use lirik_database::connection::establish_in_memory_database_connection_pool;
use lirik_database::migrations::apply_pending_migrations;
use serde::de::DeserializeOwned;


pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";


/// Builds a configuration for tests. Note that `LIRIK_ADMIN_TOKEN`, if set
/// in the environment, still overrides `admin_token`.
pub fn test_configuration(admin_token: Option<&str>) -> Configuration {
    let admin_section = match admin_token {
        Some(token) => format!("token = \"{token}\""),
        None => String::new(),
    };

    let configuration_string = format!(
        r#"
[base_paths]
base_data_directory_path = "./data"

[logging]
console_output_level_filter = "info"
log_file_output_level_filter = "info"
log_file_output_directory = "{{BASE_DATA_DIRECTORY}}/logs"

[http]
host = "127.0.0.1"
port = 8866

[database]
database_file_path = "{{BASE_DATA_DIRECTORY}}/lirik.sqlite3"
max_connections = 1

[cache]
enabled = true
max_entries = 1000

[admin]
{admin_section}

[site]
public_base_url = "https://lirikrohani.test/"
"#
    );

    Configuration::load_from_str(
        &configuration_string,
        PathBuf::from("test-configuration.toml"),
    )
    .expect("failed to load test configuration")
}


pub async fn initialize_test_application(
    admin_token: Option<&str>,
) -> (
    impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
    ApplicationState,
) {
    let database_pool = establish_in_memory_database_connection_pool()
        .await
        .expect("failed to open in-memory database");

    let mut database_connection = database_pool
        .acquire()
        .await
        .expect("failed to acquire database connection");
    apply_pending_migrations(&mut database_connection)
        .await
        .expect("failed to apply migrations");
    drop(database_connection);

    let state = web::Data::new(ApplicationStateInner::new(
        test_configuration(admin_token),
        database_pool,
    ));

    let service = test::init_service(
        App::new()
            .app_data(state.clone())
            .service(api_router())
            .configure(configure_pages),
    )
    .await;

    (service, state)
}


pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}


pub async fn call<S>(service: &S, request: test::TestRequest) -> ServiceResponse<BoxBody>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    test::call_service(service, request.to_request()).await
}


pub async fn read_json<T>(response: ServiceResponse<BoxBody>) -> T
where
    T: DeserializeOwned,
{
    test::read_body_json(response).await
}


pub async fn upsert_song<S>(
    service: &S,
    title: &str,
    artist: Option<&str>,
    language: Option<&str>,
    body: &str,
) -> SongUpsertResponse
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = call(
        service,
        test::TestRequest::post()
            .uri("/api/admin/songs")
            .insert_header(bearer(TEST_ADMIN_TOKEN))
            .set_json(SongUpsertRequest {
                slug: None,
                title: Some(title.to_string()),
                artist: artist.map(str::to_string),
                language: language.map(str::to_string),
                body: Some(body.to_string()),
            }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    read_json(response).await
}


pub async fn search<S>(service: &S, query_string: &str) -> SearchResponse
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = call(
        service,
        test::TestRequest::get().uri(&format!("/api/search?{query_string}")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    read_json(response).await
}


pub fn result_slugs(response: &SearchResponse) -> Vec<&str> {
    response
        .results
        .iter()
        .map(|result| result.slug.as_str())
        .collect()
}
