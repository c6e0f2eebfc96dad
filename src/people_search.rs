use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use log::debug;

use crate::config::ApiConfig;
use crate::error::ApolloError;
use crate::models::{CandidatePerson, EmailState};

const SEARCH_PATH: &str = "/v1/mixed_people/search";
const MATCH_PATH: &str = "/v1/people/match";
const CLIENT_USER_AGENT: &str = concat!("contact-enricher/", env!("CARGO_PKG_VERSION"));

/// Company filter sent with a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrgFilter {
    Domain(String),
    Name(String),
}

impl OrgFilter {
    /// Anything containing a dot is treated as a domain.
    pub fn from_identifier(identifier: &str) -> Self {
        let identifier = identifier.trim();
        if identifier.contains('.') {
            OrgFilter::Domain(identifier.to_lowercase())
        } else {
            OrgFilter::Name(identifier.to_string())
        }
    }

    fn query_pair(&self) -> (&'static str, String) {
        match self {
            OrgFilter::Domain(d) => ("q_organization_domains", d.clone()),
            OrgFilter::Name(n) => ("q_organization_name", n.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub filter: OrgFilter,
    pub page: u32,
    pub per_page: usize,
    /// Sent as repeated `person_titles[]`; empty means no server-side filter.
    pub titles: Vec<String>,
}

impl SearchQuery {
    pub fn new(identifier: &str, page: u32, per_page: usize) -> Self {
        SearchQuery {
            filter: OrgFilter::from_identifier(identifier),
            page,
            per_page,
            titles: Vec::new(),
        }
    }

    pub fn with_titles(mut self, titles: &[String]) -> Self {
        self.titles = titles.to_vec();
        self
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("sort_by_most_recent_activity", "desc".to_string()),
        ];
        params.push(self.filter.query_pair());
        for title in &self.titles {
            params.push(("person_titles[]", title.clone()));
        }
        params
    }
}

/// The two calls the resolver needs from the people-search service.
pub trait PeopleApi {
    fn search_people(&self, query: &SearchQuery) -> Result<Vec<CandidatePerson>, ApolloError>;

    /// Spend an enrichment credit to reveal a person's email.
    fn reveal_email(&self, person_id: &str) -> Result<EmailState, ApolloError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    people: Vec<PersonRecord>,
}

#[derive(Debug, Deserialize)]
struct PersonRecord {
    id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    title: Option<String>,
    email: Option<String>,
    linkedin_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatchResponse {
    person: Option<MatchedPerson>,
}

#[derive(Debug, Deserialize)]
struct MatchedPerson {
    email: Option<String>,
}

pub struct PeopleSearchClient {
    client: Client,
    base_url: String,
    locked_sentinel: String,
}

impl PeopleSearchClient {
    pub fn new(config: &ApiConfig, api_key: &str) -> Result<Self, ApolloError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).map_err(|_| ApolloError::InvalidApiKey)?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(PeopleSearchClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            locked_sentinel: config.locked_email_sentinel.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn candidate_from(&self, record: PersonRecord) -> CandidatePerson {
        CandidatePerson {
            id: record.id.unwrap_or_default(),
            first_name: record.first_name.unwrap_or_default(),
            last_name: record.last_name.unwrap_or_default(),
            title: record.title,
            linkedin_url: record.linkedin_url,
            email: EmailState::classify(record.email.as_deref(), &self.locked_sentinel),
        }
    }
}

fn check_status(resp: Response) -> Result<Response, ApolloError> {
    let status = resp.status();
    match status {
        StatusCode::PAYMENT_REQUIRED => Err(ApolloError::OutOfCredits),
        StatusCode::TOO_MANY_REQUESTS => Err(ApolloError::RateLimited),
        s if !s.is_success() => {
            let body = resp.text().unwrap_or_default();
            Err(ApolloError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            })
        }
        _ => Ok(resp),
    }
}

impl PeopleApi for PeopleSearchClient {
    fn search_people(&self, query: &SearchQuery) -> Result<Vec<CandidatePerson>, ApolloError> {
        debug!(
            "Searching people: {:?} page {} ({} per page)",
            query.filter, query.page, query.per_page
        );

        let resp = self
            .client
            .get(self.endpoint(SEARCH_PATH))
            .query(&query.query_params())
            .send()?;
        let body = check_status(resp)?.text()?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .people
            .into_iter()
            .map(|record| self.candidate_from(record))
            .collect())
    }

    fn reveal_email(&self, person_id: &str) -> Result<EmailState, ApolloError> {
        let payload = json!({ "id": person_id, "reveal_personal_emails": true });

        let resp = self
            .client
            .post(self.endpoint(MATCH_PATH))
            .json(&payload)
            .send()?;
        let body = check_status(resp)?.text()?;
        let parsed: MatchResponse = serde_json::from_str(&body)?;

        let email = parsed.person.and_then(|p| p.email);
        Ok(EmailState::classify(email.as_deref(), &self.locked_sentinel))
    }
}
