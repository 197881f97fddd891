//! Sales-channel publication lookup and product publishing.

use serde::Deserialize;
use serde_json::json;
use skubridge_core::Publication;
use tracing::instrument;

use super::{PlatformClient, PlatformError, UserError, user_errors};

const PUBLICATIONS_QUERY: &str = r"
    query getPublications {
      publications(first: 250) {
        nodes {
          id
          name
        }
      }
    }
";

const PUBLISHABLE_PUBLISH_MUTATION: &str = r"
    mutation publishablePublish($id: ID!, $input: [PublicationInput!]!) {
      publishablePublish(id: $id, input: $input) {
        userErrors {
          field
          message
        }
      }
    }
";

impl PlatformClient {
    /// All sales-channel publications configured on the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    #[instrument(skip(self))]
    pub async fn publications(&self) -> Result<Vec<Publication>, PlatformError> {
        let data = self.execute(PUBLICATIONS_QUERY, json!({})).await?;

        #[derive(Deserialize)]
        struct PublicationsData {
            publications: NodesOnly,
        }
        #[derive(Deserialize)]
        struct NodesOnly {
            #[serde(default)]
            nodes: Vec<Publication>,
        }

        let decoded: PublicationsData = serde_json::from_value(data)?;
        Ok(decoded.publications.nodes)
    }

    /// Publish a product or collection to one sales channel. User errors
    /// are returned rather than raised so callers can keep publishing the
    /// remaining channels.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(resource_id, publication_id))]
    pub async fn publish(
        &self,
        resource_id: &str,
        publication_id: &str,
    ) -> Result<Vec<UserError>, PlatformError> {
        let data = self
            .execute(
                PUBLISHABLE_PUBLISH_MUTATION,
                json!({
                    "id": resource_id,
                    "input": [{ "publicationId": publication_id }],
                }),
            )
            .await?;
        user_errors(&data["publishablePublish"])
    }
}
