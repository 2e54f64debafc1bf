//! Cascading country → city option lists.
//!
//! The two streams are independent: the country list is fetched once per resolver, the
//! city list every time the selected country changes. Both degrade to an empty list on
//! any failure, and the city stream drops responses for a country that is no longer
//! selected.

use alumni_common::select_option::SelectOption;
use tokio_util::sync::CancellationToken;

use crate::api::DirectoryClient;
use crate::net_utils::{request_lifecycle::RequestOutcome, request_sequence::RequestSequence};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionsState {
    #[default]
    Idle,
    Loading,
    Populated(Vec<SelectOption>),
    Empty,
}

impl OptionsState {
    pub fn options(&self) -> &[SelectOption] {
        match self {
            OptionsState::Populated(options) => options,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, OptionsState::Loading)
    }

    fn resolved(stream: &str, outcome: RequestOutcome<Vec<SelectOption>>) -> Self {
        match outcome {
            RequestOutcome::Success(options) if !options.is_empty() => OptionsState::Populated(options),
            RequestOutcome::Success(_) => OptionsState::Empty,
            failed => {
                tracing::warn!(stream, outcome = failed.kind(), "option lookup failed, continuing without options");
                OptionsState::Empty
            }
        }
    }
}

#[derive(Debug)]
pub struct PendingCountries {
    seq: u64,
    cancel: CancellationToken,
    client: DirectoryClient,
}

impl PendingCountries {
    pub async fn run(self) -> ResolvedCountries {
        let outcome = self.client.fetch_countries(&self.cancel).await;
        ResolvedCountries { seq: self.seq, outcome }
    }
}

#[derive(Debug)]
pub struct ResolvedCountries {
    seq: u64,
    outcome: RequestOutcome<Vec<SelectOption>>,
}

#[derive(Debug)]
pub struct PendingCities {
    seq: u64,
    country: SelectOption,
    cancel: CancellationToken,
    client: DirectoryClient,
}

impl PendingCities {
    pub fn country(&self) -> &SelectOption {
        &self.country
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn run(self) -> ResolvedCities {
        let outcome = self.client.fetch_cities(&self.country.label, &self.cancel).await;
        ResolvedCities { seq: self.seq, country: self.country, outcome }
    }
}

#[derive(Debug)]
pub struct ResolvedCities {
    seq: u64,
    country: SelectOption,
    outcome: RequestOutcome<Vec<SelectOption>>,
}

impl ResolvedCities {
    pub fn country(&self) -> &SelectOption {
        &self.country
    }
}

pub struct LocationResolver {
    client: DirectoryClient,
    countries: OptionsState,
    countries_requested: bool,
    countries_sequence: RequestSequence,
    cities: OptionsState,
    cities_sequence: RequestSequence,
    city_country: Option<SelectOption>,
}

impl LocationResolver {
    pub fn new(client: DirectoryClient) -> Self {
        Self {
            client,
            countries: OptionsState::Idle,
            countries_requested: false,
            countries_sequence: RequestSequence::new(),
            cities: OptionsState::Idle,
            cities_sequence: RequestSequence::new(),
            city_country: None,
        }
    }

    pub fn countries(&self) -> &OptionsState {
        &self.countries
    }

    pub fn cities(&self) -> &OptionsState {
        &self.cities
    }

    pub fn loading_countries(&self) -> bool {
        self.countries.is_loading()
    }

    pub fn loading_cities(&self) -> bool {
        self.cities.is_loading()
    }

    /// Country the city list belongs to.
    pub fn city_country(&self) -> Option<&SelectOption> {
        self.city_country.as_ref()
    }

    /// Looks a resolved country up by code or by name, ignoring case.
    pub fn find_country(&self, needle: &str) -> Option<&SelectOption> {
        let needle = needle.trim();
        self.countries
            .options()
            .iter()
            .find(|option| option.value.eq_ignore_ascii_case(needle) || option.label.eq_ignore_ascii_case(needle))
    }

    /// Starts the country lookup the first time it is needed; later calls return `None`.
    pub fn start_countries(&mut self) -> Option<PendingCountries> {
        if self.countries_requested {
            return None;
        }
        self.countries_requested = true;
        let (seq, cancel) = self.countries_sequence.issue();
        self.countries = OptionsState::Loading;
        tracing::debug!("fetching country catalog");
        Some(PendingCountries { seq, cancel, client: self.client.clone() })
    }

    pub fn finish_countries(&mut self, resolved: ResolvedCountries) -> bool {
        if !self.countries_sequence.settle(resolved.seq) {
            return false;
        }
        self.countries = OptionsState::resolved("countries", resolved.outcome);
        tracing::info!(count = self.countries.options().len(), "country catalog resolved");
        true
    }

    pub async fn ensure_countries(&mut self) -> &OptionsState {
        if let Some(pending) = self.start_countries() {
            let resolved = pending.run().await;
            self.finish_countries(resolved);
        }
        &self.countries
    }

    /// Reacts to a new country selection. Clearing the country empties the city list at once;
    /// selecting one supersedes any city lookup still in flight.
    pub fn country_changed(&mut self, country: Option<&SelectOption>) -> Option<PendingCities> {
        let country = country.filter(|country| !country.label.trim().is_empty());
        let unchanged = match (country, &self.city_country) {
            (Some(new), Some(current)) => new.label == current.label,
            (None, None) => true,
            _ => false,
        };
        if unchanged && self.cities != OptionsState::Idle {
            return None;
        }

        let Some(country) = country else {
            self.cities_sequence.invalidate();
            self.city_country = None;
            self.cities = OptionsState::Empty;
            return None;
        };

        let (seq, cancel) = self.cities_sequence.issue();
        self.city_country = Some(country.clone());
        self.cities = OptionsState::Loading;
        tracing::debug!(seq, country = %country.label, "fetching cities");
        Some(PendingCities { seq, country: country.clone(), cancel, client: self.client.clone() })
    }

    pub fn finish_cities(&mut self, resolved: ResolvedCities) -> bool {
        if !self.cities_sequence.settle(resolved.seq) {
            tracing::debug!(country = %resolved.country.label, "discarding cities for a superseded country");
            return false;
        }
        self.cities = OptionsState::resolved("cities", resolved.outcome);
        true
    }

    pub async fn select_country(&mut self, country: Option<&SelectOption>) -> &OptionsState {
        if let Some(pending) = self.country_changed(country) {
            let resolved = pending.run().await;
            self.finish_cities(resolved);
        }
        &self.cities
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;

    fn resolver(server: &MockServer) -> LocationResolver {
        let config = ClientConfig::default()
            .with_request_timeout(Duration::from_millis(300))
            .with_location_urls(format!("{}/countries", server.uri()), format!("{}/cities", server.uri()));
        LocationResolver::new(DirectoryClient::new(config))
    }

    fn india() -> SelectOption {
        SelectOption::new("IN", "India")
    }

    async fn mount_cities(server: &MockServer, country: &str, cities: &[&str]) {
        Mock::given(method("POST"))
            .and(path("/cities"))
            .and(body_json(serde_json::json!({"country": country})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": false, "msg": "ok", "data": cities})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn countries_are_fetched_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"cca2": "NP", "name": {"common": "Nepal"}},
                {"cca2": "IN", "name": {"common": "India"}}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut resolver = resolver(&server);
        assert_eq!(resolver.countries(), &OptionsState::Idle);
        resolver.ensure_countries().await;
        resolver.ensure_countries().await;
        assert_eq!(resolver.countries().options().len(), 2);
        assert_eq!(resolver.find_country("in"), Some(&india()));
        assert_eq!(resolver.find_country("nepal").map(|o| o.value.as_str()), Some("NP"));
        assert!(!resolver.loading_countries());
    }

    #[tokio::test]
    async fn country_failure_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_raw("bad gateway", "text/plain"))
            .mount(&server)
            .await;

        let mut resolver = resolver(&server);
        assert_eq!(resolver.ensure_countries().await, &OptionsState::Empty);
        assert!(resolver.start_countries().is_none());
    }

    #[tokio::test]
    async fn cities_follow_the_selected_country() {
        let server = MockServer::start().await;
        mount_cities(&server, "India", &["Indore", "Gwalior"]).await;
        mount_cities(&server, "Nepal", &["Pokhara"]).await;

        let mut resolver = resolver(&server);
        resolver.select_country(Some(&india())).await;
        let labels = resolver.cities().options().iter().map(|o| o.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, vec!["Gwalior", "Indore"]);

        resolver.select_country(Some(&SelectOption::new("NP", "Nepal"))).await;
        assert_eq!(resolver.cities().options(), &[SelectOption::same("Pokhara")]);
        assert_eq!(resolver.city_country().map(|c| c.value.as_str()), Some("NP"));
    }

    #[tokio::test]
    async fn same_country_is_not_refetched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": ["Gwalior"]})))
            .expect(1)
            .mount(&server)
            .await;

        let mut resolver = resolver(&server);
        resolver.select_country(Some(&india())).await;
        assert!(resolver.country_changed(Some(&india())).is_none());
    }

    #[tokio::test]
    async fn clearing_country_while_loading_wins_over_late_response() {
        let server = MockServer::start().await;
        mount_cities(&server, "India", &["Gwalior"]).await;

        let mut resolver = resolver(&server);
        let pending = resolver.country_changed(Some(&india())).unwrap();
        assert!(resolver.loading_cities());
        assert!(resolver.country_changed(None).is_none());
        assert!(pending.is_cancelled());
        assert_eq!(resolver.cities(), &OptionsState::Empty);

        assert!(!resolver.finish_cities(pending.run().await));
        assert_eq!(resolver.cities(), &OptionsState::Empty);
        assert!(resolver.city_country().is_none());
    }

    #[tokio::test]
    async fn superseded_city_response_is_dropped_even_if_successful() {
        let server = MockServer::start().await;
        let mut resolver = resolver(&server);
        let stale = resolver.country_changed(Some(&india())).unwrap();
        let _current = resolver.country_changed(Some(&SelectOption::new("NP", "Nepal"))).unwrap();

        let resolved = ResolvedCities {
            seq: stale.seq,
            country: stale.country.clone(),
            outcome: RequestOutcome::Success(vec![SelectOption::same("Gwalior")]),
        };
        assert!(!resolver.finish_cities(resolved));
        assert!(resolver.loading_cities());
        assert_eq!(resolver.city_country().map(|c| c.label.as_str()), Some("Nepal"));
    }

    #[tokio::test]
    async fn city_failure_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut resolver = resolver(&server);
        assert_eq!(resolver.select_country(Some(&india())).await, &OptionsState::Empty);
        assert!(!resolver.loading_cities());
    }
}
