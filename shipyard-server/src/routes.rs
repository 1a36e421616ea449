//! HTTP handlers for the Shipyard server.

use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, guard, post, put, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use shipyard_core::{InMemoryShipRepository, Ship, ShipService, ShipyardError};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::dto::ShipDto;
use crate::openapi::ApiDoc;
use crate::uri::{API_PATH, base_uri, parse_search_params};
use crate::version::{self, requested_version};

/// Shared application state for handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ship use cases over the shared in-memory registry.
    pub ships: ShipService<InMemoryShipRepository>,
}

impl AppState {
    /// State serving the ships held by `repo`.
    pub fn new(repo: InMemoryShipRepository) -> Self {
        Self {
            ships: ShipService::new(repo),
        }
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Placeholder answered by the retired API version.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeprecationNotice {
    /// Deprecation message.
    pub deprecated: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn error_response(err: &ShipyardError) -> HttpResponse {
    let body = ErrorResponse::new(err.to_string());
    match err {
        ShipyardError::ShipNotFound(_) | ShipyardError::NoMatches(_) => {
            HttpResponse::NotFound().json(body)
        }
        ShipyardError::NameConflict { .. } => HttpResponse::Conflict().json(body),
        ShipyardError::StoreUnavailable(_) => {
            log::error!("{err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn validation_response(violations: &[String]) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ErrorResponse::new(violations.join("; ")))
}

/// Reject unreadable JSON bodies with 400 and an [`ErrorResponse`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Answer unparseable ship ids with 404 and an [`ErrorResponse`].
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ErrorResponse::new(err.to_string()));
        InternalError::from_response(err, response).into()
    })
}

/// Answer requests naming an unsupported `X-Version` with 400.
async fn unsupported_version(req: HttpRequest) -> HttpResponse {
    let requested = requested_version(req.headers()).err().unwrap_or_default();
    log::debug!("unsupported_version: {requested}");
    HttpResponse::BadRequest().json(ErrorResponse::new(format!(
        "unsupported API version '{requested}', supported: {}",
        version::SUPPORTED_VERSIONS
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

/// Register every ship endpoint and extractor configuration.
///
/// Endpoints are grouped by the `X-Version` they serve; a request without the
/// header gets the current API. Inside the current scope the OpenAPI route is
/// registered ahead of `/{id}` so it is not shadowed by the id matcher.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope(API_PATH)
                .guard(guard::fn_guard(version::current_api))
                .service(openapi_json)
                .service(search_ships)
                .service(ship_by_id)
                .service(create_ship)
                .service(update_ship)
                .service(delete_ship),
        )
        .service(
            web::scope(API_PATH)
                .guard(guard::fn_guard(version::deprecated_api))
                .service(deprecated),
        )
        .service(web::scope(API_PATH).default_service(web::to(unsupported_version)));
}

#[utoipa::path(
    get,
    path = "/api/{id}",
    params(
        ("id" = Uuid, Path, description = "Ship identifier"),
        ("X-Version" = Option<String>, Header, description = "API version, defaults to 1.0.0")
    ),
    responses(
        (status = 200, description = "Ship", body = Ship),
        (status = 404, description = "Ship not found", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("/{id}")]
/// Fetch a single ship.
pub async fn ship_by_id(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.ships.find_by_id(path.into_inner()) {
        Ok(ship) => HttpResponse::Ok().json(ship),
        Err(err) => error_response(&err),
    }
}

#[utoipa::path(
    get,
    path = "/api",
    params(
        ("name" = Option<String>, Query, description = "Substring of the ship name"),
        ("typ" = Option<Vec<String>>, Query, description = "Ship type codes, repeatable"),
        ("X-Version" = Option<String>, Header, description = "API version, defaults to 1.0.0")
    ),
    responses(
        (status = 200, description = "Matching ships", body = [Ship]),
        (status = 404, description = "No ship matches", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[get("")]
/// Search ships by query parameters; no parameters lists every ship.
pub async fn search_ships(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let params = parse_search_params(req.query_string());
    match state.ships.find(&params) {
        Ok(ships) => HttpResponse::Ok().json(ships),
        Err(err) => error_response(&err),
    }
}

#[utoipa::path(
    post,
    path = "/api",
    params(
        ("X-Version" = Option<String>, Header, description = "API version, defaults to 1.0.0")
    ),
    request_body = ShipDto,
    responses(
        (status = 201, description = "Ship created, see Location header"),
        (status = 400, description = "Unreadable body", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[post("")]
/// Create a ship and point at it through the Location header.
pub async fn create_ship(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<ShipDto>,
) -> impl Responder {
    let ship = match payload.into_inner().into_ship(Utc::now().date_naive()) {
        Ok(ship) => ship,
        Err(violations) => return validation_response(&violations),
    };
    match state.ships.create(ship) {
        Ok(created) => {
            let id = created.id.map(|id| id.to_string()).unwrap_or_default();
            let location = format!("{}/{id}", base_uri(&req));
            log::info!("created ship '{}' at {location}", created.name);
            HttpResponse::Created()
                .insert_header((header::LOCATION, location))
                .finish()
        }
        Err(err) => error_response(&err),
    }
}

#[utoipa::path(
    put,
    path = "/api/{id}",
    params(
        ("id" = Uuid, Path, description = "Ship identifier"),
        ("X-Version" = Option<String>, Header, description = "API version, defaults to 1.0.0")
    ),
    request_body = ShipDto,
    responses(
        (status = 204, description = "Ship replaced"),
        (status = 400, description = "Unreadable body", body = ErrorResponse),
        (status = 404, description = "Ship not found", body = ErrorResponse),
        (status = 409, description = "Name already taken", body = ErrorResponse),
        (status = 422, description = "Invalid ship", body = ErrorResponse)
    ),
    tag = "ships"
)]
#[put("/{id}")]
/// Replace the ship stored under the id.
pub async fn update_ship(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<ShipDto>,
) -> impl Responder {
    let ship = match payload.into_inner().into_ship(Utc::now().date_naive()) {
        Ok(ship) => ship,
        Err(violations) => return validation_response(&violations),
    };
    match state.ships.update(ship, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}

#[utoipa::path(
    delete,
    path = "/api/{id}",
    params(
        ("id" = Uuid, Path, description = "Ship identifier"),
        ("X-Version" = Option<String>, Header, description = "API version, defaults to 1.0.0")
    ),
    responses(
        (status = 204, description = "Ship removed or never existed")
    ),
    tag = "ships"
)]
#[delete("/{id}")]
/// Delete the ship stored under the id.
pub async fn delete_ship(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.ships.delete_by_id(path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}

#[utoipa::path(
    get,
    path = "/api/deprecated",
    params(
        ("X-Version" = String, Header, description = "Retired API version 0.0.1")
    ),
    responses(
        (status = 200, description = "Deprecation notice", body = DeprecationNotice)
    ),
    tag = "system"
)]
#[get("/deprecated")]
/// Tell clients of the retired API that support has ended.
pub async fn deprecated() -> impl Responder {
    log::debug!("deprecated");
    HttpResponse::Ok().json(DeprecationNotice {
        deprecated: "support has ended".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document", body = serde_json::Value)
    ),
    tag = "system"
)]
#[get("/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::ContentType;
    use actix_web::{App, test};
    use serde_json::json;

    use crate::version::X_VERSION;

    const TITANIC: Uuid = Uuid::from_u128(0x10);
    const QUEEN_MARY: Uuid = Uuid::from_u128(0x02);

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(InMemoryShipRepository::seeded()))
    }

    fn payload(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "buildYear": "2004-03-23",
            "capacity": 1500,
            "typ": "F",
            "homePort": {"name": "Hamburg", "country": "Germany"},
            "crew": [{"firstName": "Max", "lastName": "Mustermann", "role": "Captain"}]
        })
    }

    fn names(ships: &[Ship]) -> Vec<String> {
        let mut names: Vec<String> = ships.iter().map(|ship| ship.name.clone()).collect();
        names.sort();
        names
    }

    #[actix_web::test]
    async fn ship_by_id_returns_seeded_ship() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/{TITANIC}"))
            .to_request();
        let ship: Ship = test::call_and_read_body_json(&app, req).await;

        assert_eq!(ship.id, Some(TITANIC));
        assert_eq!(ship.name, "Titanic");
        assert_eq!(ship.crew.len(), 2);
    }

    #[actix_web::test]
    async fn unknown_or_malformed_id_is_not_found() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/{}", Uuid::from_u128(0xdead)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.contains("no ship found"));

        let req = test::TestRequest::get().uri("/api/not-a-uuid").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn search_without_parameters_lists_everything() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api").to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(ships.len(), 6);
    }

    #[actix_web::test]
    async fn search_by_type_and_name() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api?typ=x").to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&ships), vec!["Queen-Mary", "Titanic"]);

        let req = test::TestRequest::get().uri("/api?typ=X&typ=C").to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&ships), vec!["Ever-Given", "Queen-Mary", "Titanic"]);

        let req = test::TestRequest::get().uri("/api?name=Queen").to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&ships), vec!["Queen-Mary"]);

        let req = test::TestRequest::get()
            .uri("/api?name=Titanic&typ=S")
            .to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&ships), vec!["Black-Pearl"]);
    }

    #[actix_web::test]
    async fn rejected_filters_answer_not_found() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        for uri in [
            "/api?typ=Q",
            "/api?typ=X&typ=Q",
            "/api?name=Titanic&owner=White+Star",
            "/api?name=Titanic&name=Queen",
            "/api?captain=Smith",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[actix_web::test]
    async fn create_returns_location_of_new_ship() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api")
            .set_json(payload("Aurora"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("location")
            .to_string();
        assert!(location.starts_with("http://localhost:8080/api/"), "{location}");
        let id: Uuid = location
            .rsplit('/')
            .next()
            .and_then(|raw| raw.parse().ok())
            .expect("uuid");

        let req = test::TestRequest::get()
            .uri(&format!("/api/{id}"))
            .to_request();
        let ship: Ship = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ship.id, Some(id));
        assert_eq!(ship.name, "Aurora");
        assert_eq!(ship.home_port.name, "Hamburg");
        assert_eq!(ship.crew[0].last_name, "Mustermann");
    }

    #[actix_web::test]
    async fn create_behind_proxy_uses_forwarded_base() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api")
            .insert_header(("x-forwarded-host", "fleet.example"))
            .insert_header(("x-forwarded-proto", "https"))
            .set_json(payload("Aurora"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(location.starts_with("https://fleet.example/ships/api/"), "{location}");
    }

    #[actix_web::test]
    async fn create_with_taken_name_conflicts() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        for name in ["Titanic", "Queen"] {
            let req = test::TestRequest::post()
                .uri("/api")
                .set_json(payload(name))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CONFLICT, "{name}");
        }

        let req = test::TestRequest::get().uri("/api").to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ships.len(), 6);
    }

    #[actix_web::test]
    async fn invalid_payloads_are_rejected() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let mut invalid = payload("aurora");
        invalid["capacity"] = json!(0);
        let req = test::TestRequest::post()
            .uri("/api")
            .set_json(invalid)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.contains("name"));
        assert!(body.message.contains("capacity"));

        let req = test::TestRequest::post()
            .uri("/api")
            .insert_header(ContentType::json())
            .set_payload("{\"name\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn update_replaces_ship() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::put()
            .uri(&format!("/api/{TITANIC}"))
            .set_json(payload("Olympic"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/{TITANIC}"))
            .to_request();
        let ship: Ship = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ship.id, Some(TITANIC));
        assert_eq!(ship.name, "Olympic");
        assert_eq!(ship.capacity, 1500);
    }

    #[actix_web::test]
    async fn update_keeping_own_name_succeeds() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::put()
            .uri(&format!("/api/{QUEEN_MARY}"))
            .set_json(payload("Queen-Mary"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn update_failures_map_to_statuses() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/{}", Uuid::from_u128(0xbeef)))
            .set_json(payload("Olympic"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri(&format!("/api/{TITANIC}"))
            .set_json(payload("Queen-Mary"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let mut invalid = payload("Olympic");
        invalid["homePort"] = serde_json::Value::Null;
        let req = test::TestRequest::put()
            .uri(&format!("/api/{TITANIC}"))
            .set_json(invalid)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn delete_is_idempotent() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri(&format!("/api/{QUEEN_MARY}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/{QUEEN_MARY}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api").to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ships.len(), 5);
    }

    #[actix_web::test]
    async fn openapi_json_is_served_ahead_of_id_route() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/openapi.json").to_request();
        let doc: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert!(doc["paths"]["/api/{id}"].is_object());
    }

    #[actix_web::test]
    async fn current_version_header_is_served() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        for version in ["1.0.0", "1.0", "1"] {
            let req = test::TestRequest::get()
                .uri(&format!("/api/{TITANIC}"))
                .insert_header((X_VERSION, version))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{version}");
        }

        let req = test::TestRequest::post()
            .uri("/api")
            .insert_header((X_VERSION, "1.0.0"))
            .set_json(payload("Aurora"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn missing_version_header_selects_current_api() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api?typ=S").to_request();
        let ships: Vec<Ship> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names(&ships), vec!["Black-Pearl"]);

        let req = test::TestRequest::get().uri("/api/deprecated").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unsupported_version_is_bad_request() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        for version in ["2.0.0", "latest"] {
            let req = test::TestRequest::delete()
                .uri(&format!("/api/{QUEEN_MARY}"))
                .insert_header((X_VERSION, version))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{version}");
            let body: ErrorResponse = test::read_body_json(resp).await;
            assert!(body.message.contains(version));
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/{QUEEN_MARY}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn retired_version_only_serves_deprecation_notice() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/deprecated")
            .insert_header((X_VERSION, "0.0.1"))
            .to_request();
        let notice: DeprecationNotice = test::call_and_read_body_json(&app, req).await;
        assert_eq!(notice.deprecated, "support has ended");

        let req = test::TestRequest::get()
            .uri(&format!("/api/{TITANIC}"))
            .insert_header((X_VERSION, "0.0.1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unknown_type_code_is_a_validation_error() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let mut invalid = payload("Aurora");
        invalid["typ"] = json!("Q");
        let req = test::TestRequest::post()
            .uri("/api")
            .set_json(invalid)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.contains("typ"));
    }
}
