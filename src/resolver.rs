use log::{debug, warn};

use crate::config::{ResolutionPolicy, ResolverConfig};
use crate::delay_manager::SearchDelay;
use crate::error::ApolloError;
use crate::models::{CandidatePerson, CompanyRecord, EmailState, ResolvedContact};
use crate::people_search::{PeopleApi, SearchQuery};

/// Turns a company into at most `max_contacts` contacts with real emails.
pub struct ContactResolver<A: PeopleApi> {
    api: A,
    config: ResolverConfig,
    delay: SearchDelay,
}

impl<A: PeopleApi> ContactResolver<A> {
    pub fn new(api: A, config: ResolverConfig) -> Self {
        let delay = SearchDelay::new(config.search_delay());
        ContactResolver { api, config, delay }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Search errors are returned; unlock errors only drop the affected candidate.
    pub fn resolve(&self, company: &CompanyRecord) -> Result<Vec<ResolvedContact>, ApolloError> {
        let identifier = company.search_identifier();
        debug!("Resolving '{}' using identifier '{}'", company.name, identifier);

        match self.config.policy {
            ResolutionPolicy::Ranked => self.resolve_ranked(company, &identifier),
            ResolutionPolicy::Paginated => self.resolve_paginated(company, &identifier),
        }
    }

    fn query(&self, identifier: &str, page: u32, per_page: usize) -> SearchQuery {
        let query = SearchQuery::new(identifier, page, per_page);
        if self.config.filter_titles_server_side {
            query.with_titles(&self.config.preferred_titles)
        } else {
            query
        }
    }

    fn resolve_ranked(
        &self,
        company: &CompanyRecord,
        identifier: &str,
    ) -> Result<Vec<ResolvedContact>, ApolloError> {
        let query = self.query(identifier, 1, self.config.ranked_pool_size());
        let people = self.api.search_people(&query)?;
        self.delay.pause();

        let ranked = rank_by_title(people, &self.config.preferred_titles);
        let mut contacts = Vec::new();
        for person in &ranked {
            if contacts.len() >= self.config.max_contacts {
                break;
            }
            if let Some(email) = self.email_for(person) {
                contacts.push(ResolvedContact::new(company, person, email));
            }
        }
        Ok(contacts)
    }

    fn resolve_paginated(
        &self,
        company: &CompanyRecord,
        identifier: &str,
    ) -> Result<Vec<ResolvedContact>, ApolloError> {
        let mut contacts = Vec::new();

        for page in 1..=self.config.max_pages {
            if contacts.len() >= self.config.max_contacts {
                break;
            }
            let query = self.query(identifier, page, self.config.per_page);
            let people = match self.api.search_people(&query) {
                Ok(p) => p,
                // Unlocks already spent on earlier pages are kept.
                Err(e) if page > 1 => {
                    warn!(
                        "Search page {} failed for '{}': {}. Keeping {} contacts.",
                        page,
                        company.name,
                        e,
                        contacts.len()
                    );
                    break;
                }
                Err(e) => return Err(e),
            };
            self.delay.pause();

            if people.is_empty() {
                break;
            }

            for person in &people {
                if contacts.len() >= self.config.max_contacts {
                    return Ok(contacts);
                }
                if let Some(email) = self.email_for(person) {
                    contacts.push(ResolvedContact::new(company, person, email));
                }
            }
        }
        Ok(contacts)
    }

    /// The real email for a candidate, unlocking it if needed.
    fn email_for(&self, person: &CandidatePerson) -> Option<String> {
        match &person.email {
            EmailState::Revealed(email) => Some(email.clone()),
            EmailState::Missing => None,
            EmailState::Locked if person.id.is_empty() => {
                warn!("Locked email for '{}' but no person id to unlock it", person.full_name());
                None
            }
            EmailState::Locked => match self.api.reveal_email(&person.id) {
                Ok(EmailState::Revealed(email)) => Some(email),
                Ok(_) => {
                    debug!("Unlock returned no email for '{}'", person.full_name());
                    None
                }
                Err(e) => {
                    warn!("Could not unlock email for '{}': {}", person.full_name(), e);
                    None
                }
            },
        }
    }
}

/// Index of the first preferred title contained in `title`, or the list
/// length when none match.
pub fn title_priority(title: Option<&str>, preferred_lower: &[String]) -> usize {
    let title = title.unwrap_or("").to_lowercase();
    preferred_lower
        .iter()
        .position(|pref| !pref.is_empty() && title.contains(pref.as_str()))
        .unwrap_or(preferred_lower.len())
}

/// Stable sort by title preference.
pub fn rank_by_title(
    mut people: Vec<CandidatePerson>,
    preferred: &[String],
) -> Vec<CandidatePerson> {
    let preferred_lower: Vec<String> =
        preferred.iter().map(|p| p.trim().to_lowercase()).collect();
    people.sort_by_key(|p| title_priority(p.title.as_deref(), &preferred_lower));
    people
}
