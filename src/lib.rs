pub mod cli;
pub mod config;
pub mod delay_manager;
pub mod error;
pub mod input_loader;
pub mod logger;
pub mod models;
pub mod output_writer;
pub mod people_search;
pub mod pipeline;
pub mod resolver;

// Exporting types for convenience
pub use config::{EnricherConfig, ResolutionPolicy, ResolverConfig};
pub use error::{ApolloError, EnrichError};
pub use models::{CandidatePerson, CompanyRecord, EmailState, ResolvedContact};
pub use people_search::{PeopleApi, PeopleSearchClient, SearchQuery};
pub use pipeline::RunSummary;
pub use resolver::ContactResolver;
