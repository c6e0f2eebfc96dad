use serde::Serialize;
use url::Url;

pub const NO_TITLE: &str = "No title";
pub const NO_LINKEDIN: &str = "No LinkedIn URL";

/// One company row from the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
    pub domain: Option<String>,
    pub source_url: Option<String>,
}

impl CompanyRecord {
    pub fn new(name: impl Into<String>) -> Self {
        CompanyRecord {
            name: name.into(),
            domain: None,
            source_url: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// The value sent to the search API: the bare host of the domain column
    /// when it looks like a domain, otherwise the company name.
    pub fn search_identifier(&self) -> String {
        self.domain
            .as_deref()
            .and_then(normalize_domain)
            .unwrap_or_else(|| self.name.trim().to_string())
    }
}

/// Reduce a website value ("https://www.Acme.io/about", "acme.io") to a
/// lower-cased host. Returns None unless the host contains a dot.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let host = match Url::parse(&with_scheme) {
        Ok(u) => u.host_str().map(|h| h.to_lowercase())?,
        Err(_) => trimmed.to_lowercase(),
    };
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

    if host.contains('.') {
        Some(host)
    } else {
        None
    }
}

/// Email as reported by the search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailState {
    Revealed(String),
    /// Placeholder returned by the API; the real address needs an unlock call.
    Locked,
    Missing,
}

impl EmailState {
    pub fn classify(raw: Option<&str>, locked_sentinel: &str) -> Self {
        match raw.map(str::trim) {
            None | Some("") => EmailState::Missing,
            Some(email) if is_locked(email, locked_sentinel) => EmailState::Locked,
            Some(email) => EmailState::Revealed(email.to_string()),
        }
    }
}

fn is_locked(email: &str, sentinel: &str) -> bool {
    if email.eq_ignore_ascii_case(sentinel) {
        return true;
    }
    // Upstream has used several placeholder domains with the same local part.
    match (email.split_once('@'), sentinel.split_once('@')) {
        (Some((local, _)), Some((sentinel_local, _))) => local.eq_ignore_ascii_case(sentinel_local),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePerson {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: EmailState,
}

impl CandidatePerson {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedContact {
    pub source_url: String,
    pub company_name: String,
    pub company_domain: String,
    pub person_name: String,
    pub role: String,
    pub email: String,
    pub linkedin_url: String,
}

impl ResolvedContact {
    pub fn new(company: &CompanyRecord, person: &CandidatePerson, email: String) -> Self {
        ResolvedContact {
            source_url: company.source_url.clone().unwrap_or_default(),
            company_name: company.name.clone(),
            company_domain: company.domain.clone().unwrap_or_default(),
            person_name: person.full_name(),
            role: non_empty_or(person.title.as_deref(), NO_TITLE),
            email,
            linkedin_url: non_empty_or(person.linkedin_url.as_deref(), NO_LINKEDIN),
        }
    }
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
