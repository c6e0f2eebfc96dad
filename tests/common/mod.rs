#![allow(dead_code)]

use contact_enricher_lib::config::{ApiConfig, ResolverConfig};
use contact_enricher_lib::{ContactResolver, PeopleSearchClient};
use serde_json::{json, Value};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const API_KEY: &str = "test-key";
pub const LOCKED: &str = "email_not_unlocked@domain.com";
pub const SEARCH_PATH: &str = "/v1/mixed_people/search";
pub const MATCH_PATH: &str = "/v1/people/match";

/// A mock people-search API driven from synchronous tests.
pub struct MockApollo {
    // Dropped before the runtime that started it.
    server: MockServer,
    rt: Runtime,
}

impl MockApollo {
    pub fn start() -> Self {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let server = rt.block_on(MockServer::start());
        MockApollo { server, rt }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    /// Search results for a company filter, e.g. `("q_organization_domains", "acme.io")`.
    pub fn mount_search(&self, filter: (&str, &str), people: Vec<Value>) {
        self.mount(
            Mock::given(method("GET"))
                .and(path(SEARCH_PATH))
                .and(header("x-api-key", API_KEY))
                .and(query_param(filter.0, filter.1))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({ "people": people })),
                ),
        );
    }

    pub fn mount_search_status(&self, filter: (&str, &str), status: u16) {
        self.mount(
            Mock::given(method("GET"))
                .and(path(SEARCH_PATH))
                .and(query_param(filter.0, filter.1))
                .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure")),
        );
    }

    pub fn mount_unlock(&self, person_id: &str, email: &str) {
        self.mount(
            Mock::given(method("POST"))
                .and(path(MATCH_PATH))
                .and(header("x-api-key", API_KEY))
                .and(body_partial_json(json!({ "id": person_id, "reveal_personal_emails": true })))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "person": { "id": person_id, "email": email }
                }))),
        );
    }

    pub fn mount_unlock_status(&self, person_id: &str, status: u16) {
        self.mount(
            Mock::given(method("POST"))
                .and(path(MATCH_PATH))
                .and(body_partial_json(json!({ "id": person_id })))
                .respond_with(ResponseTemplate::new(status)),
        );
    }

    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Request> {
        self.requests().into_iter().filter(|r| r.url.path() == path).collect()
    }

    pub fn client(&self) -> PeopleSearchClient {
        PeopleSearchClient::new(&api_config(&self.uri()), API_KEY).unwrap()
    }

    pub fn resolver(&self, config: ResolverConfig) -> ContactResolver<PeopleSearchClient> {
        ContactResolver::new(self.client(), config)
    }
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ApiConfig::default()
    }
}

pub fn resolver_config(titles: &[&str]) -> ResolverConfig {
    ResolverConfig {
        preferred_titles: titles.iter().map(|t| t.to_string()).collect(),
        search_delay_ms: 0,
        ..ResolverConfig::default()
    }
}

pub fn person(id: &str, first: &str, last: &str, title: &str, email: Option<&str>) -> Value {
    json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "title": title,
        "email": email,
        "linkedin_url": format!("https://linkedin.com/in/{}", id),
    })
}

pub fn query_value(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
