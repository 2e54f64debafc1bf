//! Command-line arguments.

use std::time::Duration;

use alumni_client::ClientConfig;
use alumni_common::option_catalog::Catalog;
use alumni_common::search_query::FilterField;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "alumni", about = "Search the alumni directory and submit record corrections")]
pub struct Cli {
    /// Directory backend, e.g. http://localhost:3001
    #[arg(long, global = true, env = "ALUMNI_DATABASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, global = true, env = "ALUMNI_PAGE_SIZE", value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,

    /// Seconds before a request is abandoned
    #[arg(long, global = true, env = "ALUMNI_REQUEST_TIMEOUT_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_request_timeout(Duration::from_secs(timeout));
        }
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the full directory
    Search {
        #[command(flatten)]
        filters: DirectoryFilters,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Search records with missing details (needs at least one filter)
    Missing {
        #[command(flatten)]
        filters: CohortFilters,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// List countries known to the location catalog
    Countries,
    /// List the cities of a country, given by code or name
    Cities { country: String },
    /// Print a static option list
    Catalog { catalog: CatalogName },
    /// Ask for a record to be corrected
    RequestUpdate {
        roll_number: String,
        /// Corrected field as wireName=value; repeatable
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        changes: Vec<String>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct CohortFilters {
    #[arg(long)]
    pub year_of_entry: Option<String>,
    #[arg(long)]
    pub program: Option<String>,
    #[arg(long)]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DirectoryFilters {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub roll_number: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[command(flatten)]
    pub cohort: CohortFilters,
    #[arg(long)]
    pub nature_of_job: Option<String>,
    /// Country code, e.g. IN
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub last_position: Option<String>,
    #[arg(long)]
    pub college_clubs: Option<String>,
}

impl CohortFilters {
    pub fn values(&self) -> Vec<(FilterField, &str)> {
        [
            (FilterField::YearOfEntry, &self.year_of_entry),
            (FilterField::ProgramName, &self.program),
            (FilterField::Specialization, &self.specialization),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}

impl DirectoryFilters {
    pub fn values(&self) -> Vec<(FilterField, &str)> {
        let mut values = [
            (FilterField::Name, &self.name),
            (FilterField::RollNumber, &self.roll_number),
            (FilterField::LastOrganization, &self.company),
            (FilterField::NatureOfJob, &self.nature_of_job),
            (FilterField::Country, &self.country),
            (FilterField::City, &self.city),
            (FilterField::LastPosition, &self.last_position),
            (FilterField::CollegeClubs, &self.college_clubs),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect::<Vec<_>>();
        values.extend(self.cohort.values());
        // country before city, otherwise setting country would drop the city again
        values.sort_by_key(|(field, _)| *field);
        values
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogName {
    Years,
    Programs,
    Specializations,
    Jobs,
}

impl From<CatalogName> for Catalog {
    fn from(name: CatalogName) -> Self {
        match name {
            CatalogName::Years => Catalog::YearOfEntry,
            CatalogName::Programs => Catalog::ProgramName,
            CatalogName::Specializations => Catalog::Specialization,
            CatalogName::Jobs => Catalog::NatureOfJob,
        }
    }
}
