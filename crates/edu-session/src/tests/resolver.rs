use crate::tests::{FakeOrganizations, clock, credential, key, organization};
use crate::{
    DefaultKey, HostLabel, OrganizationLookup, ResolutionSource, ResolutionStrategy,
    ResolveRequest, TenantResolver,
};

use edu_core::{ManualClock, OrganizationId};

use std::sync::Arc;

use chrono::TimeDelta;

fn standard(
    organizations: &Arc<FakeOrganizations>,
    host: Option<&str>,
) -> TenantResolver {
    standard_at(organizations, clock(), host)
}

fn standard_at(
    organizations: &Arc<FakeOrganizations>,
    clock: Arc<ManualClock>,
    host: Option<&str>,
) -> TenantResolver {
    TenantResolver::standard(
        organizations.clone(),
        clock,
        host.map(str::to_string),
        key("default"),
    )
}

#[tokio::test]
async fn given_org_with_subdomain_when_resolve_then_uses_subdomain_over_host() {
    // Given
    let organizations =
        Arc::new(FakeOrganizations::new().with_organization(organization("7", Some("lincoln"))));
    let resolver = standard(&organizations, Some("acme.example.com"));
    let org_id = OrganizationId::new("7");
    let cred = credential("tok-a");

    // When
    let resolution = resolver
        .resolve_with_source(Some(&org_id), Some(&cred))
        .await;

    // Then
    assert_eq!(resolution.key.as_str(), "lincoln");
    assert_eq!(resolution.source, ResolutionSource::Organization);
    assert_eq!(organizations.lookup_tokens(), vec![Some(String::from("tok-a"))]);
}

#[tokio::test]
async fn given_no_org_when_resolve_with_host_then_uses_first_host_label() {
    // Given
    let organizations = Arc::new(FakeOrganizations::new());
    let resolver = standard(&organizations, Some("acme.example.com"));

    // When
    let resolution = resolver.resolve_with_source(None, None).await;

    // Then
    assert_eq!(resolution.key.as_str(), "acme");
    assert_eq!(resolution.source, ResolutionSource::Host);
    assert_eq!(organizations.lookup_calls(), 0);
}

#[tokio::test]
async fn given_no_org_and_single_label_host_when_resolve_then_default() {
    let organizations = Arc::new(FakeOrganizations::new());
    let resolver = standard(&organizations, Some("localhost"));

    let resolution = resolver.resolve_with_source(None, None).await;

    assert_eq!(resolution.key.as_str(), "default");
    assert_eq!(resolution.source, ResolutionSource::Default);
}

#[tokio::test]
async fn given_org_lookup_fails_when_resolve_then_falls_through_to_host() {
    // Given
    let organizations = Arc::new(FakeOrganizations::new().failing_lookup(500));
    let resolver = standard(&organizations, Some("acme.example.com"));
    let org_id = OrganizationId::new("7");

    // When
    let resolution = resolver.resolve_with_source(Some(&org_id), None).await;

    // Then
    assert_eq!(resolution.key.as_str(), "acme");
    assert_eq!(resolution.source, ResolutionSource::Host);
    assert_eq!(organizations.lookup_calls(), 1);
}

#[tokio::test]
async fn given_org_without_subdomain_when_resolve_then_falls_through() {
    let organizations =
        Arc::new(FakeOrganizations::new().with_organization(organization("7", None)));
    let resolver = standard(&organizations, None);
    let org_id = OrganizationId::new("7");

    let key = resolver.resolve(Some(&org_id), None).await;

    assert_eq!(key.as_str(), "default");
}

#[tokio::test]
async fn given_same_inputs_when_resolved_twice_then_same_key() {
    let organizations =
        Arc::new(FakeOrganizations::new().with_organization(organization("7", Some("lincoln"))));
    let resolver = standard(&organizations, Some("acme.example.com"));
    let org_id = OrganizationId::new("7");

    let first = resolver.resolve(Some(&org_id), None).await;
    let second = resolver.resolve(Some(&org_id), None).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn given_empty_chain_when_resolve_then_fallback() {
    let resolver = TenantResolver::new(key("fallback"));

    let resolution = resolver.resolve_with_source(None, None).await;

    assert_eq!(resolution.key.as_str(), "fallback");
    assert_eq!(resolution.source, ResolutionSource::Default);
}

#[tokio::test]
async fn given_custom_chain_when_resolve_then_strategies_run_in_order() {
    let resolver = TenantResolver::new(key("fallback"))
        .with_strategy(HostLabel::new(None))
        .with_strategy(DefaultKey::new(key("configured")));

    let key = resolver.resolve(None, None).await;

    assert_eq!(key.as_str(), "configured");
    assert_eq!(
        resolver.sources(),
        vec![ResolutionSource::Host, ResolutionSource::Default]
    );
}

#[tokio::test]
async fn given_no_org_id_when_lookup_attempted_then_not_applicable() {
    let lookup = OrganizationLookup::new(Arc::new(FakeOrganizations::new()), clock());

    let err = lookup.attempt(&ResolveRequest::default()).await.unwrap_err();

    assert!(err.is_not_applicable());
}

#[tokio::test]
async fn given_unusable_host_when_host_strategy_attempted_then_real_failure() {
    let strategy = HostLabel::new(Some(String::from("127.0.0.1")));

    let err = strategy
        .attempt(&ResolveRequest::default())
        .await
        .unwrap_err();

    assert!(!err.is_not_applicable());
}

#[tokio::test]
async fn given_dotted_subdomain_when_resolve_then_subdomain_wins_over_host() {
    // Given
    let organizations =
        Arc::new(FakeOrganizations::new().with_organization(organization("7", Some("st.marys"))));
    let resolver = standard(&organizations, Some("acme.example.com"));
    let org_id = OrganizationId::new("7");

    // When
    let resolution = resolver.resolve_with_source(Some(&org_id), None).await;

    // Then
    assert_eq!(resolution.key.as_str(), "st.marys");
    assert_eq!(resolution.source, ResolutionSource::Organization);
}

#[tokio::test]
async fn given_mixed_case_subdomain_when_resolve_then_kept_as_stored() {
    let organizations =
        Arc::new(FakeOrganizations::new().with_organization(organization("7", Some("Lincoln"))));
    let resolver = standard(&organizations, Some("acme.example.com"));
    let org_id = OrganizationId::new("7");

    let key = resolver.resolve(Some(&org_id), None).await;

    assert_eq!(key.as_str(), "Lincoln");
}

#[tokio::test]
async fn given_blank_subdomain_when_resolve_then_falls_through_to_host() {
    let organizations =
        Arc::new(FakeOrganizations::new().with_organization(organization("7", Some("  "))));
    let resolver = standard(&organizations, Some("acme.example.com"));
    let org_id = OrganizationId::new("7");

    let resolution = resolver.resolve_with_source(Some(&org_id), None).await;

    assert_eq!(resolution.source, ResolutionSource::Host);
}

#[tokio::test]
async fn given_expired_credential_when_resolve_then_lookup_runs_without_it() {
    // Given
    let organizations =
        Arc::new(FakeOrganizations::new().with_organization(organization("7", Some("lincoln"))));
    let clock = clock();
    let resolver = standard_at(&organizations, clock.clone(), Some("acme.example.com"));
    let org_id = OrganizationId::new("7");
    let cred = credential("tok-a");
    clock.advance(TimeDelta::days(2));

    // When
    let resolution = resolver
        .resolve_with_source(Some(&org_id), Some(&cred))
        .await;

    // Then
    assert_eq!(resolution.key.as_str(), "lincoln");
    assert_eq!(resolution.source, ResolutionSource::Organization);
    assert_eq!(organizations.lookup_tokens(), vec![None]);
}
