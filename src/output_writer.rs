use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use log::info;

use crate::error::Result;
use crate::models::ResolvedContact;

pub const OUTPUT_HEADERS: [&str; 7] = [
    "source_url",
    "company_name",
    "company_domain",
    "person_name",
    "role",
    "email",
    "linkedin_url",
];

/// Write one row per contact. The header is written even with no contacts.
pub fn write_contacts<P: AsRef<Path>>(path: P, contacts: &[ResolvedContact]) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let written = write_contacts_to(file, contacts)?;
    info!("Saved {} contact rows -> {:?}", written, path);
    Ok(written)
}

pub fn write_contacts_to<W: Write>(writer: W, contacts: &[ResolvedContact]) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_HEADERS)?;
    for contact in contacts {
        csv_writer.serialize(contact)?;
    }
    csv_writer.flush()?;
    Ok(contacts.len())
}
