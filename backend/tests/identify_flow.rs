//! End-to-end HTTP scenarios for the identify endpoint, driven against
//! an in-memory contact store so every response shape and store
//! mutation can be asserted without a database.

mod support;

use std::sync::Arc;

use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use backend::Trace;
use backend::domain::IdentityResolver;
use backend::domain::contact::{ContactId, LinkPrecedence};
use backend::domain::ports::IdentifyContact;
use backend::inbound::http::identify::identify;
use backend::inbound::http::state::HttpState;

use support::InMemoryContactRepository;

async fn post_identify(
    repo: &Arc<InMemoryContactRepository>,
    email: &str,
    phone_number: &str,
) -> (actix_web::http::StatusCode, Value) {
    let resolver: Arc<dyn IdentifyContact> = Arc::new(IdentityResolver::new(repo.clone()));
    let state = web::Data::new(HttpState::new(resolver));
    let app = actix_test::init_service(
        App::new().app_data(state).wrap(Trace).service(identify),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/identify")
        .set_json(json!({ "email": email, "phoneNumber": phone_number }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[actix_web::test]
async fn a_new_identity_is_created_with_the_flat_response_shape() {
    let repo = Arc::new(InMemoryContactRepository::new());

    let (status, body) = post_identify(&repo, "doc@fluxkart.com", "123456").await;

    assert_eq!(status, actix_web::http::StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "primaryContactId": 1,
            "emails": ["doc@fluxkart.com"],
            "phoneNumbers": ["123456"],
            "secondaryContactIds": []
        })
    );

    let rows = repo.snapshot();
    assert_eq!(rows.len(), 1);
    let Some(row) = rows.first() else {
        panic!("one row expected");
    };
    assert_eq!(row.link_precedence, LinkPrecedence::Primary);
    assert!(row.linked_id.is_none());
    assert!(row.deleted_at.is_none());
}

#[actix_web::test]
async fn resubmitting_a_known_pair_is_a_conflict_and_mutates_nothing() {
    let repo = Arc::new(InMemoryContactRepository::new());
    repo.seed(
        Some("doc@fluxkart.com"),
        Some("123456"),
        LinkPrecedence::Primary,
        None,
    );

    let (status, body) = post_identify(&repo, "doc@fluxkart.com", "123456").await;

    assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "Error": "Email and Phone Number Already Exist" }));
    assert_eq!(repo.row_count(), 1);
}

#[actix_web::test]
async fn a_new_phone_for_a_known_email_extends_the_cluster() {
    let repo = Arc::new(InMemoryContactRepository::new());
    let primary = repo.seed(
        Some("doc@fluxkart.com"),
        Some("123456"),
        LinkPrecedence::Primary,
        None,
    );

    let (status, body) = post_identify(&repo, "doc@fluxkart.com", "789012").await;

    assert_eq!(status, actix_web::http::StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "contact": {
                "primaryContactId": 1,
                "emails": ["doc@fluxkart.com"],
                "phoneNumbers": ["123456", "789012"],
                "secondaryContactIds": [2]
            }
        })
    );

    let rows = repo.snapshot();
    assert_eq!(rows.len(), 2);
    let Some(secondary) = rows.iter().find(|c| c.id == ContactId::new(2)) else {
        panic!("secondary row expected");
    };
    assert_eq!(secondary.link_precedence, LinkPrecedence::Secondary);
    assert_eq!(secondary.linked_id, Some(primary));
}

#[actix_web::test]
async fn a_bridging_pair_merges_two_clusters_keeping_the_older_primary() {
    let repo = Arc::new(InMemoryContactRepository::new());
    let first = repo.seed(
        Some("george@hillvalley.edu"),
        Some("919191"),
        LinkPrecedence::Primary,
        None,
    );
    let second = repo.seed(
        Some("biffsucks@hillvalley.edu"),
        Some("717171"),
        LinkPrecedence::Primary,
        None,
    );

    let (status, body) = post_identify(&repo, "george@hillvalley.edu", "717171").await;

    assert_eq!(status, actix_web::http::StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "contact": {
                "primaryContactId": 1,
                "emails": ["george@hillvalley.edu", "biffsucks@hillvalley.edu"],
                "phoneNumbers": ["919191", "717171"],
                "secondaryContactIds": [2]
            }
        })
    );

    // No new row; the younger primary was rewritten in place.
    let rows = repo.snapshot();
    assert_eq!(rows.len(), 2);
    let primaries: Vec<_> = rows.iter().filter(|c| c.is_primary()).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries.first().map(|c| c.id), Some(first));
    let Some(demoted) = rows.iter().find(|c| c.id == second) else {
        panic!("demoted row expected");
    };
    assert_eq!(demoted.link_precedence, LinkPrecedence::Secondary);
    assert_eq!(demoted.linked_id, Some(first));
}

#[actix_web::test]
async fn a_known_email_inside_one_cluster_reported_twice_is_a_conflict() {
    // Both ends of the submission are already known inside the same
    // cluster: the primary holds the email, its secondary re-states it.
    let repo = Arc::new(InMemoryContactRepository::new());
    let primary = repo.seed(
        Some("doc@fluxkart.com"),
        Some("123456"),
        LinkPrecedence::Primary,
        None,
    );
    repo.seed(
        Some("doc@fluxkart.com"),
        Some("789012"),
        LinkPrecedence::Secondary,
        Some(primary),
    );

    let (status, body) = post_identify(&repo, "doc@fluxkart.com", "555555").await;

    assert_eq!(status, actix_web::http::StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "Error": "Email and Phone Number Already Exist" }));
    assert_eq!(repo.row_count(), 2);
}

#[actix_web::test]
async fn consolidated_lists_never_repeat_values() {
    // A matched secondary belonging to another cluster shares the
    // primary's email; the union must list it once.
    let repo = Arc::new(InMemoryContactRepository::new());
    repo.seed(
        Some("doc@fluxkart.com"),
        Some("123456"),
        LinkPrecedence::Primary,
        None,
    );
    repo.seed(
        Some("doc@fluxkart.com"),
        Some("789012"),
        LinkPrecedence::Secondary,
        Some(ContactId::new(99)),
    );

    let (status, body) = post_identify(&repo, "doc@fluxkart.com", "555555").await;

    assert_eq!(status, actix_web::http::StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "contact": {
                "primaryContactId": 1,
                "emails": ["doc@fluxkart.com"],
                "phoneNumbers": ["123456", "789012", "555555"],
                "secondaryContactIds": [2, 3]
            }
        })
    );
    assert_eq!(repo.row_count(), 3);
}

#[actix_web::test]
async fn a_cluster_without_a_primary_is_reported_not_repaired() {
    let repo = Arc::new(InMemoryContactRepository::new());
    repo.seed(
        Some("orphan@x.io"),
        Some("111"),
        LinkPrecedence::Secondary,
        Some(ContactId::new(99)),
    );
    repo.seed(
        Some("stray@x.io"),
        Some("222"),
        LinkPrecedence::Secondary,
        Some(ContactId::new(98)),
    );

    let (status, body) = post_identify(&repo, "orphan@x.io", "222").await;

    assert_eq!(status, actix_web::http::StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Primary contact not found" }));
    assert_eq!(repo.row_count(), 2);
}

#[actix_web::test]
async fn responses_carry_a_trace_id_header() {
    let repo = Arc::new(InMemoryContactRepository::new());
    let resolver: Arc<dyn IdentifyContact> = Arc::new(IdentityResolver::new(repo));
    let state = web::Data::new(HttpState::new(resolver));
    let app = actix_test::init_service(
        App::new().app_data(state).wrap(Trace).service(identify),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/identify")
        .set_json(json!({ "email": "doc@fluxkart.com", "phoneNumber": "123456" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert!(response.headers().contains_key("trace-id"));
}
