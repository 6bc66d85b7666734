use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use std::sync::Arc;
use teammove::{
    config::config_model::PlanCache,
    domain::{
        entities::companies::CompanyPlanEntity,
        repositories::{
            companies::MockCompanyRepository, resource_counters::MockResourceCounterRepository,
        },
        value_objects::enums::resource_types::ResourceType,
    },
    infrastructure::axum_http::{
        auth::{AccessClaims, JwtVerifier},
        http_serve,
        routers::plans::PlansState,
    },
};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "router-test-secret-0123456789abcdef";

fn plan_cache() -> PlanCache {
    PlanCache {
        ttl_seconds: 300,
        max_capacity: 100,
        poll_interval_seconds: 60,
    }
}

fn token(company_id: Uuid, role: &str) -> String {
    let claims = AccessClaims {
        sub: Uuid::new_v4().to_string(),
        company_id: company_id.to_string(),
        role: role.to_string(),
        exp: 9999999999,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn company_repo(tier: &'static str) -> MockCompanyRepository {
    let mut repo = MockCompanyRepository::new();
    repo.expect_find_plan().returning(move |company_id| {
        Ok(Some(CompanyPlanEntity {
            id: company_id,
            plan_tier: tier.to_string(),
            requested_tier: None,
            quote_pending: false,
            plan_is_active: true,
        }))
    });
    repo
}

fn counter_repo(count: i64) -> MockResourceCounterRepository {
    let mut repo = MockResourceCounterRepository::new();
    repo.expect_count().returning(move |_, _| Ok(count));
    repo
}

fn app(company: MockCompanyRepository, counter: MockResourceCounterRepository) -> Router {
    let state = PlansState::new(Arc::new(company), Arc::new(counter), &plan_cache());
    http_serve::app(state, JwtVerifier::new(SECRET))
}

fn get(uri: &str, bearer: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, bearer: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn current_features_returns_plan_data() {
    let company_id = Uuid::new_v4();
    let app = app(company_repo("PRO"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(get("/api/v1/plans/current-features", &token(company_id, "member")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["plan"]["tier"], "PRO");
    assert_eq!(body["plan"]["features"]["hasCRM"], true);
    assert_eq!(body["plan"]["quotePending"], false);
    assert!(body["plan"]["requestedTier"].is_null());
    assert_eq!(body["limits"]["maxEvents"], 50);
    assert_eq!(body["pollIntervalSeconds"], 60);
}

#[tokio::test]
async fn unknown_stored_tier_returns_no_plan_and_empty_menu() {
    let company_id = Uuid::new_v4();
    let bearer = token(company_id, "member");
    let app = app(company_repo("GOLD"), MockResourceCounterRepository::new());

    let response = app
        .clone()
        .oneshot(get("/api/v1/plans/current-features", &bearer))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body["plan"].is_null());

    let response = app.oneshot(get("/api/v1/plans/menu", &bearer)).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = app(company_repo("PRO"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/plans/current-features")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn quota_usage_reports_near_limit() {
    let app = app(company_repo("ESSENTIEL"), counter_repo(45));

    let response = app
        .oneshot(get(
            "/api/v1/plans/quota/vehicles",
            &token(Uuid::new_v4(), "member"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["resource"], ResourceType::Vehicles.as_str());
    assert_eq!(body["limit"], 50);
    assert_eq!(body["status"], "near_limit");
    assert_eq!(body["decision"]["canAdd"], true);
}

#[tokio::test]
async fn unsupported_resource_is_bad_request() {
    let app = app(company_repo("ESSENTIEL"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(get(
            "/api/v1/plans/quota/spaceships",
            &token(Uuid::new_v4(), "member"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn enforce_blocks_at_the_limit() {
    let app = app(company_repo("DECOUVERTE"), counter_repo(2));

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/v1/plans/quota/events/enforce",
            &token(Uuid::new_v4(), "member"),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["code"], 403);
    assert!(body["message"].as_str().unwrap().contains('2'));
}

#[tokio::test]
async fn enforce_allows_under_the_limit() {
    let app = app(company_repo("ESSENTIEL"), counter_repo(49));

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/v1/plans/quota/vehicles/enforce",
            &token(Uuid::new_v4(), "member"),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn gate_blocks_and_suggests_next_plan() {
    let app = app(company_repo("ESSENTIEL"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(get(
            "/api/v1/plans/gate?feature=hasCRM&label=CRM",
            &token(Uuid::new_v4(), "member"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["hasAccess"], false);
    assert_eq!(body["outcome"], "fallback");
    assert_eq!(body["nextPlan"], "PRO");
    assert!(body["upgradeMessage"].as_str().unwrap().starts_with("CRM"));
}

#[tokio::test]
async fn gate_alert_mode_keeps_content() {
    let app = app(company_repo("DECOUVERTE"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(get(
            "/api/v1/plans/gate?feature=hasNotifications&mode=alert",
            &token(Uuid::new_v4(), "member"),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["outcome"], "content_with_warning");
}

#[tokio::test]
async fn pro_upgrade_request_is_accepted_as_quote() {
    let mut company = company_repo("ESSENTIEL");
    company.expect_update_plan().times(1).returning(|_, _| Ok(()));
    let app = app(company, MockResourceCounterRepository::new());

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/v1/plans/upgrade-requests",
            &token(Uuid::new_v4(), "member"),
            json!({ "targetTier": "PRO" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "path": "quote_requested", "targetTier": "PRO" }));
}

#[tokio::test]
async fn admin_plan_change_requires_admin_role() {
    let company_id = Uuid::new_v4();
    let app = app(company_repo("ESSENTIEL"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(send_json(
            "PUT",
            &format!("/api/v1/admin/companies/{company_id}/plan"),
            &token(company_id, "member"),
            json!({ "tier": "PREMIUM" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_plan_change_reports_transition() {
    let company_id = Uuid::new_v4();
    let mut company = company_repo("ESSENTIEL");
    company.expect_update_plan().times(1).returning(|_, _| Ok(()));
    let app = app(company, MockResourceCounterRepository::new());

    let response = app
        .oneshot(send_json(
            "PUT",
            &format!("/api/v1/admin/companies/{company_id}/plan"),
            &token(Uuid::new_v4(), "admin"),
            json!({ "tier": "PREMIUM" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["from"], "ESSENTIEL");
    assert_eq!(body["to"], "PREMIUM");
    assert_eq!(body["direction"], "upgrade");
}

#[tokio::test]
async fn unknown_route_falls_back_to_not_found() {
    let app = app(company_repo("PRO"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(get("/api/v1/nothing-here", "irrelevant"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check_needs_no_token() {
    let app = app(MockCompanyRepository::new(), MockResourceCounterRepository::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health-check")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_reloads_the_plan_on_next_read() {
    let company_id = Uuid::new_v4();
    let bearer = token(company_id, "member");
    let mut company = MockCompanyRepository::new();
    company.expect_find_plan().times(2).returning(|company_id| {
        Ok(Some(CompanyPlanEntity {
            id: company_id,
            plan_tier: "PRO".to_string(),
            requested_tier: None,
            quote_pending: false,
            plan_is_active: true,
        }))
    });
    let app = app(company, MockResourceCounterRepository::new());

    let response = app
        .clone()
        .oneshot(get("/api/v1/plans/current-features", &bearer))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/v1/plans/refresh", &bearer, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get("/api/v1/plans/current-features", &bearer))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn gate_names_the_tier_that_grants_the_feature() {
    let app = app(company_repo("ESSENTIEL"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(get(
            "/api/v1/plans/gate?feature=hasAPI&label=API",
            &token(Uuid::new_v4(), "member"),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["hasAccess"], false);
    assert_eq!(body["nextPlan"], "PRO");
    assert_eq!(body["requiredPlan"], "PREMIUM");
    assert_eq!(
        body["upgradeMessage"],
        "API is available from the Premium plan. Upgrade to unlock it."
    );
}

#[tokio::test]
async fn invalid_gate_mode_is_a_json_bad_request() {
    let app = app(company_repo("PRO"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(get(
            "/api/v1/plans/gate?feature=hasCRM&mode=explode",
            &token(Uuid::new_v4(), "member"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 400);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn unknown_target_tier_is_a_json_bad_request() {
    let app = app(company_repo("ESSENTIEL"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(send_json(
            "POST",
            "/api/v1/plans/upgrade-requests",
            &token(Uuid::new_v4(), "member"),
            json!({ "targetTier": "GOLD" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn admin_path_with_bad_company_id_is_a_json_bad_request() {
    let app = app(company_repo("ESSENTIEL"), MockResourceCounterRepository::new());

    let response = app
        .oneshot(send_json(
            "PUT",
            "/api/v1/admin/companies/not-a-uuid/plan",
            &token(Uuid::new_v4(), "admin"),
            json!({ "tier": "PRO" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], 400);
}
