mod common;

use common::*;
use contact_enricher_lib::{ApolloError, EmailState, PeopleApi, SearchQuery};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_domain_identifier_searches_by_domain_only() {
    let mock = MockApollo::start();
    mock.mount_search(
        ("q_organization_domains", "acme.io"),
        vec![person("p1", "Jane", "Doe", "Founder", Some("jane@acme.io"))],
    );

    let people = mock.client().search_people(&SearchQuery::new("Acme.io", 1, 9)).unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].email, EmailState::Revealed("jane@acme.io".into()));

    let requests = mock.requests_to(SEARCH_PATH);
    assert_eq!(requests.len(), 1);
    assert_eq!(query_value(&requests[0], "q_organization_domains").as_deref(), Some("acme.io"));
    assert_eq!(query_value(&requests[0], "q_organization_name"), None);
    assert_eq!(query_value(&requests[0], "per_page").as_deref(), Some("9"));
    assert_eq!(query_value(&requests[0], "sort_by_most_recent_activity").as_deref(), Some("desc"));
}

#[test]
fn test_name_identifier_searches_by_name_only() {
    let mock = MockApollo::start();
    mock.mount_search(("q_organization_name", "Acme Labs"), vec![]);

    let people = mock.client().search_people(&SearchQuery::new("Acme Labs", 1, 3)).unwrap();
    assert!(people.is_empty());

    let requests = mock.requests_to(SEARCH_PATH);
    assert_eq!(query_value(&requests[0], "q_organization_name").as_deref(), Some("Acme Labs"));
    assert_eq!(query_value(&requests[0], "q_organization_domains"), None);
}

#[test]
fn test_titles_sent_as_repeated_parameter() {
    let mock = MockApollo::start();
    mock.mount_search(("q_organization_domains", "acme.io"), vec![]);

    let titles = vec!["CEO".to_string(), "Founder".to_string()];
    let query = SearchQuery::new("acme.io", 1, 25).with_titles(&titles);
    mock.client().search_people(&query).unwrap();

    let request = &mock.requests_to(SEARCH_PATH)[0];
    let sent: Vec<String> = request
        .url
        .query_pairs()
        .filter(|(k, _)| k == "person_titles[]")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(sent, vec!["CEO", "Founder"]);
}

#[test]
fn test_locked_and_missing_emails_are_classified() {
    let mock = MockApollo::start();
    mock.mount_search(
        ("q_organization_domains", "acme.io"),
        vec![
            person("p1", "A", "One", "CEO", Some(LOCKED)),
            person("p2", "B", "Two", "CTO", None),
        ],
    );

    let people = mock.client().search_people(&SearchQuery::new("acme.io", 1, 9)).unwrap();
    assert_eq!(people[0].email, EmailState::Locked);
    assert_eq!(people[1].email, EmailState::Missing);
}

#[test]
fn test_search_error_status_is_reported() {
    let mock = MockApollo::start();
    mock.mount_search_status(("q_organization_domains", "acme.io"), 500);

    let err = mock.client().search_people(&SearchQuery::new("acme.io", 1, 9)).unwrap_err();
    assert!(matches!(err, ApolloError::Api { status: 500, .. }), "{:?}", err);
}

#[test]
fn test_malformed_search_body_is_a_parse_error() {
    let mock = MockApollo::start();
    mock.mount(
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>")),
    );

    let err = mock.client().search_people(&SearchQuery::new("acme.io", 1, 9)).unwrap_err();
    assert!(matches!(err, ApolloError::Parse(_)), "{:?}", err);
}

#[test]
fn test_unlock_reveals_email() {
    let mock = MockApollo::start();
    mock.mount_unlock("p1", "jane@acme.io");

    let email = mock.client().reveal_email("p1").unwrap();
    assert_eq!(email, EmailState::Revealed("jane@acme.io".into()));
}

#[test]
fn test_unlock_credit_and_rate_limit_statuses() {
    let mock = MockApollo::start();
    mock.mount_unlock_status("broke", 402);
    mock.mount_unlock_status("busy", 429);
    mock.mount_unlock_status("gone", 404);

    let client = mock.client();
    assert!(matches!(client.reveal_email("broke"), Err(ApolloError::OutOfCredits)));
    assert!(matches!(client.reveal_email("busy"), Err(ApolloError::RateLimited)));
    assert!(matches!(client.reveal_email("gone"), Err(ApolloError::Api { status: 404, .. })));

    // One attempt each, never retried.
    assert_eq!(mock.requests_to(MATCH_PATH).len(), 3);
}

#[test]
fn test_unlock_without_person_is_missing() {
    let mock = MockApollo::start();
    mock.mount(
        Mock::given(method("POST"))
            .and(path(MATCH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({}))),
    );

    assert_eq!(mock.client().reveal_email("p9").unwrap(), EmailState::Missing);
}
