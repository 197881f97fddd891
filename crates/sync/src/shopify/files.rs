//! File lookup, staged uploads and deletion.
//!
//! Supplier documents (manuals, spare-part sheets) live on the supplier's
//! CDN and cannot be attached by URL the way product media can. They go
//! through the staged-upload protocol instead: reserve a temporary target
//! with `stagedUploadsCreate`, POST the bytes there as multipart form
//! data, then register the uploaded resource with `fileCreate`.
//!
//! Uploaded files are recognized later by their alt text
//! (`Uploaded {STORE} File: {name}`); that alt is the only join key
//! between supplier document URLs and platform file ids.

use serde::Deserialize;
use serde_json::{Value, json};
use skubridge_core::{MediaImage, PlatformFile, StagedUploadTarget, media};
use tracing::{instrument, warn};

use super::{PlatformClient, PlatformError, UserError, fail_on_user_errors, user_errors};

const FILES_BY_NAME_QUERY: &str = r"
    query getFiles($search: String!) {
      files(first: 250, query: $search) {
        pageInfo {
          hasNextPage
          endCursor
        }
        nodes {
          id
          alt
        }
      }
    }
";

const IMAGE_FILES_PAGE_QUERY: &str = r#"
    query getImageFiles($after: String) {
      files(first: 250, query: "media_type:IMAGE", after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          id
          ... on MediaImage {
            image {
              url
            }
          }
        }
      }
    }
"#;

const STAGED_UPLOADS_CREATE_MUTATION: &str = r"
    mutation stagedUploadsCreate($input: [StagedUploadInput!]!) {
      stagedUploadsCreate(input: $input) {
        stagedTargets {
          url
          resourceUrl
          parameters {
            name
            value
          }
        }
        userErrors {
          field
          message
        }
      }
    }
";

const FILE_CREATE_MUTATION: &str = r"
    mutation fileCreate($files: [FileCreateInput!]!) {
      fileCreate(files: $files) {
        files {
          id
          alt
        }
        userErrors {
          field
          message
        }
      }
    }
";

const FILE_DELETE_MUTATION: &str = r"
    mutation fileDelete($fileIds: [ID!]!) {
      fileDelete(fileIds: $fileIds) {
        deletedFileIds
        userErrors {
          field
          message
          code
        }
      }
    }
";

/// A supplier-hosted file queued for staged upload.
#[derive(Debug, Clone)]
pub struct StagedFileSource {
    /// Source URL on the supplier CDN.
    pub url: String,
    /// Sanitized file name (`%` flattened, trimmed); used as the staged
    /// filename and matched against the returned resource URL.
    pub file_name: String,
}

impl StagedFileSource {
    /// Build a source from a raw supplier URL.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            file_name: media::sanitize_file_name(url),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedTargetNode {
    url: String,
    resource_url: String,
    #[serde(default)]
    parameters: Vec<ParameterNode>,
}

#[derive(Deserialize)]
struct ParameterNode {
    name: String,
    value: String,
}

#[derive(Deserialize)]
struct FilesPage {
    #[serde(default)]
    nodes: Vec<Value>,
    #[serde(rename = "pageInfo")]
    page_info: PageInfoNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfoNode {
    end_cursor: Option<String>,
    has_next_page: bool,
}

impl PlatformClient {
    /// Look up already-uploaded files whose filename matches any of the
    /// given stems.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    #[instrument(skip(self, name_stems), fields(names = name_stems.len()))]
    pub async fn files_by_filenames<S: AsRef<str>>(
        &self,
        name_stems: &[S],
    ) -> Result<Vec<PlatformFile>, PlatformError> {
        if name_stems.is_empty() {
            return Ok(Vec::new());
        }
        let search = name_stems
            .iter()
            .map(|name| format!("filename:{}", name.as_ref()))
            .collect::<Vec<_>>()
            .join(" OR ");
        let data = self.execute(FILES_BY_NAME_QUERY, json!({ "search": search })).await?;

        #[derive(Deserialize)]
        struct FilesData {
            files: NodesOnly,
        }
        #[derive(Deserialize)]
        struct NodesOnly {
            #[serde(default)]
            nodes: Vec<PlatformFile>,
        }

        let decoded: FilesData = serde_json::from_value(data)?;
        Ok(decoded.files.nodes)
    }

    /// Walk every image file in the store's file library, returning id
    /// and CDN URL. Used by the image-cleanup maintenance command.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn all_image_files(&self) -> Result<Vec<MediaImage>, PlatformError> {
        let mut images = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let data = self
                .execute(IMAGE_FILES_PAGE_QUERY, json!({ "after": after }))
                .await?;

            #[derive(Deserialize)]
            struct FilesData {
                files: FilesPage,
            }
            let decoded: FilesData = serde_json::from_value(data)?;

            for node in decoded.files.nodes {
                if let (Some(id), Some(url)) = (
                    node["id"].as_str(),
                    node["image"]["url"].as_str(),
                ) {
                    images.push(MediaImage {
                        id: id.to_string(),
                        url: url.to_string(),
                    });
                }
            }

            if decoded.files.page_info.has_next_page {
                after = decoded.files.page_info.end_cursor;
            } else {
                break;
            }
        }

        Ok(images)
    }

    /// Upload a batch of supplier files through the staged-upload
    /// protocol and register them with `fileCreate`.
    ///
    /// Sources whose bytes cannot be fetched or posted are skipped with a
    /// warning; only successfully staged targets are registered.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` if `stagedUploadsCreate` or `fileCreate`
    /// rejects the input, plus the usual transport errors.
    #[instrument(skip(self, sources), fields(files = sources.len()))]
    pub async fn upload_supplier_files(
        &self,
        store: &str,
        sources: &[StagedFileSource],
    ) -> Result<Vec<PlatformFile>, PlatformError> {
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let targets = self.staged_uploads_create(sources).await?;

        // Post bytes to each reserved target, keeping only fully staged ones
        let mut staged = Vec::new();
        for source in sources {
            let Some(target) = targets
                .iter()
                .find(|t| t.resource_url.contains(&format!("/{}", source.file_name)))
            else {
                warn!(file = %source.file_name, "no staged target returned for file");
                continue;
            };

            match self.post_to_staged_target(source, target).await {
                Ok(()) => staged.push(target.clone()),
                Err(error) => {
                    warn!(file = %source.file_name, %error, "staged upload failed, skipping file");
                }
            }
        }

        if staged.is_empty() {
            return Ok(Vec::new());
        }
        self.file_create(store, &staged).await
    }

    async fn staged_uploads_create(
        &self,
        sources: &[StagedFileSource],
    ) -> Result<Vec<StagedUploadTarget>, PlatformError> {
        let input: Vec<Value> = sources
            .iter()
            .map(|source| {
                let mime = media::url_extension(&source.url)
                    .map_or_else(|| "application/octet-stream".to_string(), |ext| format!("application/{ext}"));
                json!({
                    "filename": source.file_name,
                    "mimeType": mime,
                    "resource": "FILE",
                    "httpMethod": "POST",
                })
            })
            .collect();

        let data = self
            .execute(STAGED_UPLOADS_CREATE_MUTATION, json!({ "input": input }))
            .await?;
        let payload = &data["stagedUploadsCreate"];
        fail_on_user_errors(payload)?;

        let targets: Vec<StagedTargetNode> =
            serde_json::from_value(payload["stagedTargets"].clone())?;
        Ok(targets
            .into_iter()
            .map(|t| StagedUploadTarget {
                url: t.url,
                resource_url: t.resource_url,
                parameters: t.parameters.into_iter().map(|p| (p.name, p.value)).collect(),
            })
            .collect())
    }

    /// Fetch the source bytes and POST them to the staged target as
    /// multipart form data, target parameters first.
    async fn post_to_staged_target(
        &self,
        source: &StagedFileSource,
        target: &StagedUploadTarget,
    ) -> Result<(), PlatformError> {
        let bytes = self
            .http()
            .get(&source.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &target.parameters {
            form = form.text(name.clone(), value.clone());
        }
        form = form.part(
            "file",
            reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(source.file_name.clone()),
        );

        let response = self.http().post(&target.url).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(PlatformError::Upload(format!(
                "{} returned {}",
                source.file_name,
                response.status()
            )));
        }
        Ok(())
    }

    async fn file_create(
        &self,
        store: &str,
        targets: &[StagedUploadTarget],
    ) -> Result<Vec<PlatformFile>, PlatformError> {
        let files: Vec<Value> = targets
            .iter()
            .map(|target| {
                let name = media::url_file_name(&target.resource_url);
                json!({
                    "originalSource": target.resource_url,
                    "alt": format!("Uploaded {store} File: {name}"),
                    "contentType": "FILE",
                })
            })
            .collect();

        let data = self
            .execute(FILE_CREATE_MUTATION, json!({ "files": files }))
            .await?;
        let payload = &data["fileCreate"];
        fail_on_user_errors(payload)?;

        Ok(serde_json::from_value(payload["files"].clone())?)
    }

    /// Delete files by id, returning the ids the platform confirmed
    /// deleted and any user errors (mixed outcomes are possible).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    #[instrument(skip(self, file_ids), fields(files = file_ids.len()))]
    pub async fn delete_files<S: AsRef<str>>(
        &self,
        file_ids: &[S],
    ) -> Result<(Vec<String>, Vec<UserError>), PlatformError> {
        if file_ids.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }
        let ids: Vec<&str> = file_ids.iter().map(AsRef::as_ref).collect();
        let data = self
            .execute(FILE_DELETE_MUTATION, json!({ "fileIds": ids }))
            .await?;
        let payload = &data["fileDelete"];
        let deleted: Vec<String> = payload
            .get("deletedFileIds")
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()?
            .unwrap_or_default();
        let errors = user_errors(payload)?;
        Ok((deleted, errors))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_source_sanitizes_name() {
        let source = StagedFileSource::from_url("https://cdn.example.com/docs/manual%20v2.pdf");
        assert_eq!(source.file_name, "manual_20v2.pdf");
    }

    #[test]
    fn test_staged_target_decoding() {
        let node: StagedTargetNode = serde_json::from_value(json!({
            "url": "https://upload.example.com/target",
            "resourceUrl": "https://cdn.example.com/tmp/manual.pdf",
            "parameters": [{ "name": "key", "value": "tmp/manual.pdf" }]
        }))
        .unwrap();
        assert_eq!(node.parameters.len(), 1);
        assert_eq!(node.resource_url, "https://cdn.example.com/tmp/manual.pdf");
    }
}
