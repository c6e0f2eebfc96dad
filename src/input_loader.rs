use std::fs::File;
use std::path::Path;
use log::{info, warn, error};
use calamine::{open_workbook_auto, Reader};

use crate::error::{EnrichError, Result};
use crate::models::CompanyRecord;

const NAME_HEADERS: &[&str] = &[
    "company_name",
    "company",
    "name",
    "business_name",
    "organization_name",
];
const DOMAIN_HEADERS: &[&str] = &[
    "company_website_url",
    "company_website",
    "company_domain",
    "website",
    "website_url",
    "domain",
    "url",
];
const SOURCE_HEADERS: &[&str] = &["clutch_profile_url", "profile_url", "source_url"];

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: usize,
    domain: Option<usize>,
    source_url: Option<usize>,
}

impl Columns {
    fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let normalized: Vec<String> =
            headers.iter().map(|h| normalize_header(h.as_ref())).collect();
        let find = |candidates: &[&str]| {
            candidates
                .iter()
                .find_map(|c| normalized.iter().position(|h| h == c))
        };

        let name = find(NAME_HEADERS).ok_or(EnrichError::MissingNameColumn)?;
        Ok(Columns {
            name,
            domain: find(DOMAIN_HEADERS),
            source_url: find(SOURCE_HEADERS),
        })
    }

    /// None when the row has no usable company name.
    fn record<S: AsRef<str>>(&self, fields: &[S], row_number: usize) -> Option<CompanyRecord> {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| fields.get(i))
                .map(|v| v.as_ref().trim())
                .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("nan"))
                .map(str::to_string)
        };

        let Some(name) = get(Some(self.name)) else {
            warn!("Skipping row {} - no company name", row_number);
            return None;
        };
        Some(CompanyRecord {
            name,
            domain: get(self.domain),
            source_url: get(self.source_url),
        })
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace([' ', '-'], "_")
}

pub fn load_records<P: AsRef<Path>>(filename: P) -> Result<Vec<CompanyRecord>> {
    let path_ref = filename.as_ref();

    if !path_ref.exists() {
        error!("Input file {:?} does not exist.", path_ref);
        return Err(EnrichError::InputNotFound(path_ref.display().to_string()));
    }

    let is_excel = path_ref
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls"));

    if is_excel {
        return load_excel(path_ref);
    }
    load_csv(path_ref)
}

fn load_csv(path: &Path) -> Result<Vec<CompanyRecord>> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let columns = Columns::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row_number = idx + 1;
        match result {
            Ok(row) => {
                let fields: Vec<&str> = row.iter().collect();
                if let Some(record) = columns.record(&fields, row_number) {
                    records.push(record);
                }
            }
            Err(e) => error!("Error parsing CSV row {}: {}", row_number, e),
        }
    }
    info!("Loaded {} companies from CSV {:?}", records.len(), path);
    Ok(records)
}

fn load_excel(path: &Path) -> Result<Vec<CompanyRecord>> {
    let mut workbook = open_workbook_auto(path)?;

    let mut records = Vec::new();
    let worksheets = workbook.worksheets();
    let Some((_name, range)) = worksheets.first() else {
        warn!("Workbook {:?} has no worksheets", path);
        return Ok(records);
    };

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(EnrichError::MissingNameColumn);
    };
    let headers: Vec<String> = header_row.iter().map(|c| c.to_string()).collect();
    let columns = Columns::from_headers(&headers)?;

    for (idx, row) in rows.enumerate() {
        let fields: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        if let Some(record) = columns.record(&fields, idx + 1) {
            records.push(record);
        }
    }

    info!("Loaded {} companies from Excel {:?}", records.len(), path);
    Ok(records)
}
