//! Directory session: the full-directory search plus its cascading location options.

use alumni_common::{
    alumni_record::AlumniRecord,
    search_query::{FilterField, SearchScope},
    select_option::SelectOption,
    update_request::UpdateRequest,
};
use serde_json::{Map, Value};

use crate::api::DirectoryClient;
use crate::api::locations::location_resolver::{LocationResolver, OptionsState, PendingCities};
use crate::api::search::SearchController;
use crate::error::DirectoryError;

pub struct AlumniDirectory {
    client: DirectoryClient,
    search: SearchController,
    locations: LocationResolver,
}

impl AlumniDirectory {
    pub fn new(client: DirectoryClient) -> Self {
        Self {
            search: SearchController::new(client.clone(), SearchScope::Directory),
            locations: LocationResolver::new(client.clone()),
            client,
        }
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchController {
        &mut self.search
    }

    pub fn locations(&self) -> &LocationResolver {
        &self.locations
    }

    pub fn locations_mut(&mut self) -> &mut LocationResolver {
        &mut self.locations
    }

    pub async fn ensure_countries(&mut self) -> &OptionsState {
        self.locations.ensure_countries().await
    }

    /// Sets or clears the country filter, dropping the selected city when the country
    /// changes, and starts the matching city lookup.
    pub fn start_select_country(&mut self, country: Option<SelectOption>) -> Option<PendingCities> {
        let filters = self.search.filters_mut();
        match &country {
            Some(country) => filters.set(FilterField::Country, country.clone()),
            None => filters.clear_field(FilterField::Country),
        }
        self.locations.country_changed(country.as_ref())
    }

    pub async fn select_country(&mut self, country: Option<SelectOption>) -> &OptionsState {
        if let Some(pending) = self.start_select_country(country) {
            let resolved = pending.run().await;
            self.locations.finish_cities(resolved);
        }
        self.locations.cities()
    }

    /// Submits a correction for `record`. Search state is left untouched either way.
    pub async fn request_update(&self, record: &AlumniRecord, new_data: Map<String, Value>) -> Result<(), DirectoryError> {
        let update = UpdateRequest::new(record, new_data);
        self.client.submit_update_request(&update).await
    }
}
