//! `POST api/update-request`: submits a correction for one record.

use alumni_common::update_request::UpdateRequest;
use tokio_util::sync::CancellationToken;

use crate::api::DirectoryClient;
use crate::error::DirectoryError;

impl DirectoryClient {
    /// Only the status matters; any non-2xx answer is returned to the caller as an error.
    pub async fn submit_update_request(&self, update: &UpdateRequest) -> Result<(), DirectoryError> {
        let url = self.config().endpoint("api/update-request");
        tracing::info!(roll_number = %update.roll_number, fields = update.new_data.len(), "submitting update request");
        let request = self.lifecycle().http_client().post(url).json(update);
        let result = self.lifecycle().execute_status(request, &CancellationToken::new()).await.into_result();
        if let Err(e) = &result {
            tracing::warn!(roll_number = %update.roll_number, "update request failed: {}", e);
        }
        result
    }
}


#[cfg(test)]
mod tests {
    use alumni_common::alumni_record::AlumniRecord;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;

    fn record() -> AlumniRecord {
        AlumniRecord { name: "Asha".into(), roll_number: "2005IPG-012".into(), ..Default::default() }
    }

    #[tokio::test]
    async fn posts_old_and_new_data() {
        let server = MockServer::start().await;
        let patch = UpdateRequest::patch_from_pairs(["lastOrganization=Acme"]).unwrap();
        let update = UpdateRequest::new(&record(), patch);
        Mock::given(method("POST"))
            .and(path("/api/update-request"))
            .and(body_json(serde_json::json!({
                "rollNumber": "2005IPG-012",
                "oldData": {"name": "Asha", "rollNumber": "2005IPG-012"},
                "newData": {"lastOrganization": "Acme"}
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = DirectoryClient::new(ClientConfig::default().with_base_url(&server.uri()));
        client.submit_update_request(&update).await.unwrap();
    }

    #[tokio::test]
    async fn rejection_is_returned_to_the_caller() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = DirectoryClient::new(ClientConfig::default().with_base_url(&server.uri()));
        let update = UpdateRequest::new(&record(), Default::default());
        assert_eq!(client.submit_update_request(&update).await, Err(DirectoryError::Http(500)));
    }
}
