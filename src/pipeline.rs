use std::fmt;
use std::path::Path;
use log::{info, warn, error};

use crate::error::Result;
use crate::input_loader;
use crate::models::{CompanyRecord, ResolvedContact};
use crate::output_writer;
use crate::people_search::PeopleApi;
use crate::resolver::ContactResolver;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub companies_total: usize,
    pub companies_processed: usize,
    pub companies_skipped: usize,
    pub companies_failed: usize,
    pub contacts_written: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} companies ({} processed, {} skipped, {} failed), {} contacts",
            self.companies_total,
            self.companies_processed,
            self.companies_skipped,
            self.companies_failed,
            self.contacts_written
        )
    }
}

/// Resolve every company in input order. A failing company contributes no
/// rows and never stops the run.
pub fn enrich_companies<A: PeopleApi>(
    resolver: &ContactResolver<A>,
    companies: &[CompanyRecord],
    limit: Option<usize>,
) -> (Vec<ResolvedContact>, RunSummary) {
    let selected = match limit {
        Some(n) if n < companies.len() => {
            info!("Limiting run to the first {} of {} companies", n, companies.len());
            &companies[..n]
        }
        _ => companies,
    };

    let mut summary = RunSummary {
        companies_total: selected.len(),
        ..RunSummary::default()
    };
    let mut rows = Vec::new();
    let total = selected.len();

    for (i, company) in selected.iter().enumerate() {
        if company.name.trim().is_empty() {
            warn!("Skipping company {} / {} - no company name", i + 1, total);
            summary.companies_skipped += 1;
            continue;
        }

        info!("Processing {} / {} : {}", i + 1, total, company.name);
        match resolver.resolve(company) {
            Ok(contacts) => {
                info!("Found {} contacts for {}", contacts.len(), company.name);
                for contact in &contacts {
                    info!("  Added: {} - {}", contact.person_name, contact.role);
                }
                summary.companies_processed += 1;
                rows.extend(contacts);
            }
            Err(e) => {
                error!("Error fetching contacts for {}: {}", company.name, e);
                summary.companies_failed += 1;
            }
        }
    }

    summary.contacts_written = rows.len();
    (rows, summary)
}

/// Load `input`, resolve every company and write `output`.
pub fn run_file<A: PeopleApi>(
    resolver: &ContactResolver<A>,
    input: &Path,
    output: &Path,
    limit: Option<usize>,
) -> Result<RunSummary> {
    let companies = input_loader::load_records(input)?;
    info!("Found {} companies to process", companies.len());

    let (rows, summary) = enrich_companies(resolver, &companies, limit);
    output_writer::write_contacts(output, &rows)?;
    Ok(summary)
}
