//! Standalone metafield writes.

use serde_json::json;
use skubridge_core::MetafieldInput;
use tracing::instrument;

use super::{PlatformClient, PlatformError, UserError, user_errors};

const METAFIELDS_SET_MUTATION: &str = r"
    mutation MetafieldsSet($metafields: [MetafieldsSetInput!]!) {
      metafieldsSet(metafields: $metafields) {
        metafields {
          key
          value
        }
        userErrors {
          field
          message
          code
        }
      }
    }
";

impl PlatformClient {
    /// Write a batch of owned metafields in one mutation.
    ///
    /// Returns user errors instead of failing on them; relationship
    /// resolution collects errors across batches and reports them at the
    /// end of the pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    #[instrument(skip(self, metafields), fields(metafields = metafields.len()))]
    pub async fn set_metafields(
        &self,
        metafields: &[MetafieldInput],
    ) -> Result<Vec<UserError>, PlatformError> {
        if metafields.is_empty() {
            return Ok(Vec::new());
        }
        let variables = json!({ "metafields": metafields });
        let data = self.execute(METAFIELDS_SET_MUTATION, variables).await?;
        user_errors(&data["metafieldsSet"])
    }
}
