//! Subcommand handlers.

use alumni_client::api::search::{SearchController, SearchState};
use alumni_client::{AlumniDirectory, DirectoryClient};
use alumni_common::{
    option_catalog::Catalog,
    search_query::{FilterField, SearchScope},
    select_option::SelectOption,
    update_request::UpdateRequest,
};
use anyhow::Context;

use crate::args::{Cli, Command};
use crate::render::{render_options, render_search};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = DirectoryClient::new(cli.client_config());
    match cli.command {
        Command::Search { filters, page } => {
            let mut controller = SearchController::new(client, SearchScope::Directory);
            for (field, value) in filters.values() {
                controller.set_filter(field, value)?;
            }
            search_and_print(&mut controller, page).await
        }
        Command::Missing { filters, page } => {
            let mut controller = SearchController::new(client, SearchScope::Missing);
            for (field, value) in filters.values() {
                controller.set_filter(field, value)?;
            }
            search_and_print(&mut controller, page).await
        }
        Command::Countries => {
            let mut directory = AlumniDirectory::new(client);
            let countries = directory.ensure_countries().await;
            if countries.options().is_empty() {
                println!("Country list is unavailable right now.");
            } else {
                println!("{}", render_options(countries.options()));
            }
            Ok(())
        }
        Command::Cities { country } => {
            let mut directory = AlumniDirectory::new(client);
            directory.ensure_countries().await;
            let selected = directory.locations().find_country(&country).cloned().unwrap_or_else(|| {
                tracing::warn!(%country, "country not in catalog, asking for its cities by name");
                SelectOption::same(country.trim())
            });
            let cities = directory.select_country(Some(selected.clone())).await;
            if cities.options().is_empty() {
                println!("No cities available for {}.", selected.label);
            } else {
                println!("{}", render_options(cities.options()));
            }
            Ok(())
        }
        Command::Catalog { catalog } => {
            println!("{}", render_options(&Catalog::from(catalog).options()));
            Ok(())
        }
        Command::RequestUpdate { roll_number, changes } => {
            let patch = UpdateRequest::patch_from_pairs(changes.iter().map(|change| change.as_str())).map_err(anyhow::Error::msg)?;
            let mut directory = AlumniDirectory::new(client);
            directory.search_mut().set_filter(FilterField::RollNumber, roll_number.as_str())?;
            let state = directory.search_mut().search(1).await;
            if let SearchState::Failed { message, .. } = state {
                anyhow::bail!("could not look up {}: {}", roll_number, message);
            }
            let record = directory
                .search()
                .rows()
                .iter()
                .find(|row| row.roll_number.trim().eq_ignore_ascii_case(roll_number.trim()))
                .cloned()
                .with_context(|| format!("no alumni record with roll number {roll_number}"))?;
            directory
                .request_update(&record, patch)
                .await
                .with_context(|| format!("failed to submit update request for {roll_number}"))?;
            println!("Update request submitted for {} ({}).", record.name, record.roll_number);
            Ok(())
        }
    }
}

async fn search_and_print(controller: &mut SearchController, page: u64) -> anyhow::Result<()> {
    controller.search(page).await;
    if let Some(message) = controller.state().error_message() {
        anyhow::bail!("{message}");
    }
    println!("{}", render_search(controller));
    Ok(())
}
