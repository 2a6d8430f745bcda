use std::sync::Arc;

use launchpad_core::{AppError, CallerCredential};
use launchpad_domain::Tenant;

use crate::test_support::{
    FakeControlPlane, FakeState, FakeTenantDirectory, access_token, caller,
};

use super::{TenantService, TenantSource};

fn build_service(
    control_plane: Arc<FakeControlPlane>,
    directory: FakeTenantDirectory,
) -> TenantService {
    TenantService::new(control_plane, Arc::new(directory))
}

#[tokio::test]
async fn loopback_listing_normalizes_ids_and_marks_current() {
    let control_plane = Arc::new(FakeControlPlane::new(FakeState {
        tenant_ids: vec!["t1".to_owned(), "t2".to_owned()],
        ..FakeState::default()
    }));
    let service = build_service(control_plane.clone(), FakeTenantDirectory::default());

    let tenants = service
        .list_tenants(&caller("t1"), &TenantSource::Loopback)
        .await;

    assert!(tenants.is_ok());
    let tenants = tenants.unwrap_or_default();
    assert_eq!(tenants.len(), 2);
    assert_eq!(tenants[0].display_name, "t1");
    assert_eq!(tenants[0].domain_name, "t1");
    assert!(tenants[0].is_current);
    assert!(!tenants[1].is_current);
    assert_eq!(control_plane.call_count("list_tenant_ids").await, 1);
}

#[tokio::test]
async fn hosted_listing_reads_tenant_details() {
    let control_plane = Arc::new(FakeControlPlane::default());
    let directory = FakeTenantDirectory {
        tenants: vec![Tenant {
            display_name: "Contoso".to_owned(),
            domain_name: "contoso.onmicrosoft.com".to_owned(),
            tenant_id: "t2".to_owned(),
            is_current: false,
        }],
        failure_status: None,
    };
    let service = build_service(control_plane.clone(), directory);

    let tenants = service
        .list_tenants(&caller("t2"), &TenantSource::Hosted)
        .await
        .unwrap_or_default();

    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0].display_name, "Contoso");
    assert!(tenants[0].is_current);
    assert_eq!(control_plane.call_count("list_tenant_ids").await, 0);
}

#[tokio::test]
async fn hosted_listing_relays_upstream_failures() {
    let service = build_service(
        Arc::new(FakeControlPlane::default()),
        FakeTenantDirectory {
            tenants: Vec::new(),
            failure_status: Some(503),
        },
    );

    let tenants = service
        .list_tenants(&caller("t1"), &TenantSource::Hosted)
        .await;

    assert!(matches!(
        tenants,
        Err(AppError::Upstream {
            status_code: 503,
            ..
        })
    ));
}

#[tokio::test]
async fn malformed_token_fails_before_any_upstream_call() {
    let control_plane = Arc::new(FakeControlPlane::default());
    let service = build_service(control_plane.clone(), FakeTenantDirectory::default());
    let credential = CallerCredential::new(
        launchpad_core::AccessToken::new("not-a-jwt").unwrap_or_else(|_| unreachable!()),
        None,
        None,
    );

    let tenants = service
        .list_tenants(&credential, &TenantSource::Loopback)
        .await;

    assert!(matches!(tenants, Err(AppError::MalformedToken(_))));
    assert_eq!(control_plane.call_count("list_tenant_ids").await, 0);
}

#[tokio::test]
async fn token_without_tid_marks_nothing_current() {
    let control_plane = Arc::new(FakeControlPlane::new(FakeState {
        tenant_ids: vec!["t1".to_owned()],
        ..FakeState::default()
    }));
    let service = build_service(control_plane, FakeTenantDirectory::default());
    let credential = CallerCredential::new(
        access_token(serde_json::json!({"upn": "dev@contoso.com"})),
        None,
        None,
    );

    let tenants = service
        .list_tenants(&credential, &TenantSource::Loopback)
        .await
        .unwrap_or_default();

    assert_eq!(tenants.len(), 1);
    assert!(!tenants[0].is_current);
}

#[test]
fn switch_strips_tenant_route_and_sets_cookie() {
    let service = build_service(
        Arc::new(FakeControlPlane::default()),
        FakeTenantDirectory::default(),
    );

    let switch = service.switch_tenant(
        "https://console.contoso.com/API/Tenants/72f988bf-86f1-41af-91ab-2d7cd011db47",
        "72f988bf-86f1-41af-91ab-2d7cd011db47",
    );

    assert!(switch.is_ok());
    let switch = switch.unwrap_or_else(|_| unreachable!());
    assert_eq!(switch.location, "https://console.contoso.com");
    assert_eq!(
        switch.cookie,
        "OAuthTenant=72f988bf-86f1-41af-91ab-2d7cd011db47; path=/; secure; HttpOnly"
    );
}

#[test]
fn switch_falls_back_to_root_and_rejects_bad_ids() {
    let service = build_service(
        Arc::new(FakeControlPlane::default()),
        FakeTenantDirectory::default(),
    );

    let relative = service
        .switch_tenant(
            "/api/tenants/72f988bf-86f1-41af-91ab-2d7cd011db47",
            "72f988bf-86f1-41af-91ab-2d7cd011db47",
        )
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(relative.location, "/");

    let invalid = service.switch_tenant("https://console.contoso.com/api/tenants/x", "x");
    assert!(matches!(invalid, Err(AppError::Validation(_))));
}
