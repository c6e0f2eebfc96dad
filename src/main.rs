use contact_enricher_lib::{cli, logger, pipeline};
use contact_enricher_lib::{
    CompanyRecord, ContactResolver, EnrichError, EnricherConfig, PeopleSearchClient,
};

use std::error::Error;
use clap::Parser;
use log::{info, error};

use cli::Cli;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logger::init(cli.log_level(), Some(cli.log_file.as_path()));

    if let Err(e) = run(&cli) {
        error!("An error occurred: {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), EnrichError> {
    dotenvy::dotenv().ok();
    info!("Starting contact enricher");

    let config = EnricherConfig::load(cli.config.as_deref())?;
    let api_key = config.api_key()?;
    let client = PeopleSearchClient::new(&config.api, &api_key)?;
    let resolver = ContactResolver::new(client, config.resolver.clone());
    info!(
        "Policy {:?}, up to {} contacts per company, preferred titles: {}",
        config.resolver.policy,
        config.resolver.max_contacts,
        config.resolver.preferred_titles.join(", ")
    );

    if let Some(identifier) = &cli.company {
        return lookup_single(&resolver, identifier);
    }

    info!("Input file: {}", cli.input.display());
    info!("Output file: {}", cli.output.display());
    if !cli.input.exists() {
        return Err(EnrichError::InputNotFound(cli.input.display().to_string()));
    }

    let summary = pipeline::run_file(&resolver, &cli.input, &cli.output, cli.limit)?;
    info!("Processing completed: {}", summary);
    Ok(())
}

fn lookup_single(
    resolver: &ContactResolver<PeopleSearchClient>,
    identifier: &str,
) -> Result<(), EnrichError> {
    let company = if identifier.contains('.') {
        CompanyRecord::new(identifier).with_domain(identifier)
    } else {
        CompanyRecord::new(identifier)
    };

    info!("Searching for people at: {}", company.search_identifier());
    let contacts = resolver.resolve(&company)?;

    if contacts.is_empty() {
        println!("No results found for {}.", identifier);
        return Ok(());
    }
    for contact in contacts {
        println!("{}", contact.person_name);
        println!("   {}", contact.role);
        println!("   {}", contact.linkedin_url);
        println!("   {}\n", contact.email);
    }
    Ok(())
}
