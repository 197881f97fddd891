//! Product queries and mutations.
//!
//! All SKU lookups go through the search disjunction (`sku:A OR sku:B`);
//! the platform assigns opaque ids, so the variant SKU is the only join
//! key back to the supplier catalog. Queries request `first: 250`, which
//! bounds lookup batches to well under that.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use skubridge_core::{
    MediaImage, PlatformProduct, PlatformVariant, ProductStatus, SkuRef, StockLevel,
    SupplierProduct,
};
use tracing::{instrument, warn};

use super::{PlatformClient, PlatformError, fail_on_user_errors, sku_disjunction, user_errors};

const PRODUCT_SYNC_VIEW_QUERY: &str = r#"
    query getProducts($search: String!) {
      products(first: 250, query: $search) {
        nodes {
          id
          title
          status
          media(first: 250, query: "media_type:IMAGE") {
            nodes {
              ... on MediaImage {
                id
                image {
                  url
                }
              }
            }
          }
          variants(first: 1) {
            nodes {
              id
              sku
              compareAtPrice
              price
            }
          }
        }
      }
    }
"#;

const PRODUCT_STOCK_VIEW_QUERY: &str = r"
    query getProducts($search: String!) {
      products(first: 250, query: $search) {
        nodes {
          id
          variants(first: 1) {
            nodes {
              sku
              inventoryQuantity
              inventoryItem {
                id
              }
            }
          }
        }
      }
    }
";

const PRODUCT_SKU_REF_QUERY: &str = r"
    query getProducts($search: String!) {
      products(first: 250, query: $search) {
        nodes {
          id
          variants(first: 1) {
            nodes {
              id
              sku
            }
          }
        }
      }
    }
";

const PRODUCT_PAGE_QUERY: &str = r"
    query getProductPage($first: Int!, $after: String) {
      products(first: $first, after: $after) {
        nodes {
          id
          variants(first: 1) {
            nodes {
              id
              sku
            }
          }
        }
        pageInfo {
          endCursor
          hasNextPage
        }
      }
    }
";

const PRODUCT_CREATE_MUTATION: &str = r"
    mutation CreateProduct($product: ProductCreateInput!, $media: [CreateMediaInput!]) {
      productCreate(product: $product, media: $media) {
        product {
          id
          title
          variants(first: 1) {
            nodes {
              id
              sku
              inventoryItem {
                id
              }
            }
          }
        }
        userErrors {
          field
          message
        }
      }
    }
";

const PRODUCT_STATUS_MUTATION: &str = r"
    mutation UpdateProductStatus($product: ProductUpdateInput!) {
      productUpdate(product: $product) {
        product {
          id
        }
        userErrors {
          field
          message
        }
      }
    }
";

const PRODUCT_ADD_MEDIA_MUTATION: &str = r"
    mutation UpdateProductWithNewMedia($product: ProductUpdateInput!, $media: [CreateMediaInput!]) {
      productUpdate(product: $product, media: $media) {
        product {
          id
        }
        userErrors {
          field
          message
        }
      }
    }
";

const VARIANT_BULK_UPDATE_MUTATION: &str = r"
    mutation productVariantsBulkUpdate($productId: ID!, $variants: [ProductVariantsBulkInput!]!) {
      productVariantsBulkUpdate(productId: $productId, variants: $variants) {
        product {
          id
        }
        userErrors {
          field
          message
        }
      }
    }
";

const PRODUCT_DELETE_MUTATION: &str = r"
    mutation DeleteProduct($input: ProductDeleteInput!) {
      productDelete(input: $input) {
        deletedProductId
        userErrors {
          field
          message
        }
      }
    }
";

// =============================================================================
// Response shapes
// =============================================================================

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Connection<T> {
    #[serde(default)]
    nodes: Vec<T>,
    #[serde(rename = "pageInfo")]
    page_info: Option<PageInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

#[derive(Deserialize)]
struct ProductNode {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    status: Option<ProductStatus>,
    #[serde(default)]
    media: Option<Connection<MediaNode>>,
    variants: Connection<VariantNode>,
}

#[derive(Deserialize)]
struct MediaNode {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    image: Option<ImageNode>,
}

#[derive(Deserialize)]
struct ImageNode {
    url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantNode {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default)]
    price: Option<Decimal>,
    #[serde(default)]
    compare_at_price: Option<Decimal>,
    #[serde(default)]
    inventory_quantity: Option<i64>,
    #[serde(default)]
    inventory_item: Option<IdNode>,
}

#[derive(Deserialize)]
struct IdNode {
    id: String,
}

/// The platform-side identifiers of a freshly created product.
#[derive(Debug, Clone)]
pub struct CreatedProduct {
    pub product_id: String,
    pub variant_id: String,
    pub inventory_item_id: String,
    /// Supplier SKU the product was created for. Assigned to the variant
    /// in the follow-up bulk update, not by `productCreate` itself.
    pub sku: String,
}

fn decode_products(data: Value) -> Result<(Vec<ProductNode>, Option<PageInfo>), PlatformError> {
    #[derive(Deserialize)]
    struct ProductsData {
        products: Connection<ProductNode>,
    }

    let decoded: ProductsData = serde_json::from_value(data)?;
    Ok((decoded.products.nodes, decoded.products.page_info))
}

impl ProductNode {
    /// A node without a variant cannot be joined back to the supplier
    /// catalog; callers skip it.
    fn into_platform_product(self) -> Option<PlatformProduct> {
        let variant = self.variants.nodes.into_iter().next()?;
        Some(PlatformProduct {
            id: self.id,
            title: self.title.unwrap_or_default(),
            status: self.status.unwrap_or(ProductStatus::Draft),
            media: self
                .media
                .map(|m| {
                    m.nodes
                        .into_iter()
                        .filter_map(|node| {
                            let id = node.id?;
                            let image = node.image?;
                            Some(MediaImage { id, url: image.url })
                        })
                        .collect()
                })
                .unwrap_or_default(),
            variant: PlatformVariant {
                id: variant.id.unwrap_or_default(),
                sku: variant.sku.unwrap_or_default(),
                price: variant.price,
                compare_at_price: variant.compare_at_price,
                inventory_quantity: variant.inventory_quantity,
                inventory_item_id: variant.inventory_item.map(|item| item.id),
            },
        })
    }

    fn into_sku_ref(self) -> Option<SkuRef> {
        let variant = self.variants.nodes.into_iter().next()?;
        Some(SkuRef {
            id: self.id,
            sku: variant.sku?,
        })
    }

    fn into_stock_level(self) -> Option<StockLevel> {
        let variant = self.variants.nodes.into_iter().next()?;
        Some(StockLevel {
            product_id: self.id,
            sku: variant.sku?,
            inventory_quantity: variant.inventory_quantity.unwrap_or(0),
            inventory_item_id: variant.inventory_item?.id,
        })
    }
}

impl PlatformClient {
    /// Fetch the sync view (status, prices, image media) of the products
    /// whose variant SKU matches any of `skus`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    #[instrument(skip(self, skus), fields(skus = skus.len()))]
    pub async fn products_by_skus<S: AsRef<str>>(
        &self,
        skus: &[S],
    ) -> Result<Vec<PlatformProduct>, PlatformError> {
        if skus.is_empty() {
            return Ok(Vec::new());
        }
        let variables = json!({ "search": sku_disjunction(skus) });
        let data = self.execute(PRODUCT_SYNC_VIEW_QUERY, variables).await?;
        let (nodes, _) = decode_products(data)?;
        Ok(nodes
            .into_iter()
            .filter_map(ProductNode::into_platform_product)
            .collect())
    }

    /// Fetch the stock view (inventory quantity and item id) of the
    /// products matching `skus`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    #[instrument(skip(self, skus), fields(skus = skus.len()))]
    pub async fn stock_by_skus<S: AsRef<str>>(
        &self,
        skus: &[S],
    ) -> Result<Vec<StockLevel>, PlatformError> {
        if skus.is_empty() {
            return Ok(Vec::new());
        }
        let variables = json!({ "search": sku_disjunction(skus) });
        let data = self.execute(PRODUCT_STOCK_VIEW_QUERY, variables).await?;
        let (nodes, _) = decode_products(data)?;
        Ok(nodes
            .into_iter()
            .filter_map(ProductNode::into_stock_level)
            .collect())
    }

    /// Fetch only id ↔ SKU pairs for the products matching `skus`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    #[instrument(skip(self, skus), fields(skus = skus.len()))]
    pub async fn sku_refs_by_skus<S: AsRef<str>>(
        &self,
        skus: &[S],
    ) -> Result<Vec<SkuRef>, PlatformError> {
        if skus.is_empty() {
            return Ok(Vec::new());
        }
        let variables = json!({ "search": sku_disjunction(skus) });
        let data = self.execute(PRODUCT_SKU_REF_QUERY, variables).await?;
        let (nodes, _) = decode_products(data)?;
        Ok(nodes.into_iter().filter_map(ProductNode::into_sku_ref).collect())
    }

    /// Walk the full product catalog and return every id ↔ SKU pair.
    ///
    /// Pages through `page_size` products at a time; used by the
    /// duplicate-scan and conditional-delete maintenance commands.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self))]
    pub async fn all_sku_refs(&self, page_size: u32) -> Result<Vec<SkuRef>, PlatformError> {
        let mut refs = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let variables = json!({ "first": page_size, "after": after });
            let data = self.execute(PRODUCT_PAGE_QUERY, variables).await?;
            let (nodes, page_info) = decode_products(data)?;
            refs.extend(nodes.into_iter().filter_map(ProductNode::into_sku_ref));

            match page_info {
                Some(info) if info.has_next_page => after = info.end_cursor,
                _ => break,
            }
        }

        Ok(refs)
    }

    /// Create a product from a supplier record.
    ///
    /// Title is `{name} - {sku}`, status follows the supplier's
    /// discontinued flag, and the big images plus videos are attached as
    /// media sourced from the supplier CDN. The variant SKU is NOT set
    /// here; the caller follows up with [`Self::update_variant_pricing`].
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when the mutation rejects the input, plus the
    /// usual transport/decoding errors.
    #[instrument(skip(self, product, metafields), fields(sku = %product.id))]
    pub async fn create_product(
        &self,
        store: &str,
        product: &SupplierProduct,
        metafields: &[skubridge_core::MetafieldInput],
    ) -> Result<CreatedProduct, PlatformError> {
        let mut media: Vec<Value> = product
            .big_image_urls()
            .into_iter()
            .map(|url| {
                json!({
                    "originalSource": url,
                    "mediaContentType": "IMAGE",
                    "alt": format!("Uploaded {store} Image"),
                })
            })
            .collect();
        media.extend(product.attributes.media.videos.iter().map(|video| {
            json!({
                "originalSource": video.url,
                "mediaContentType": "VIDEO",
                "alt": format!("Uploaded {store} Video"),
            })
        }));

        let mut product_input = json!({
            "title": format!("{} - {}", product.attributes.name, product.id),
            "status": if product.attributes.is_old { "DRAFT" } else { "ACTIVE" },
            "descriptionHtml": product.attributes.description,
        });
        if !metafields.is_empty() {
            product_input["metafields"] = serde_json::to_value(metafields)?;
        }

        let variables = if media.is_empty() {
            json!({ "product": product_input })
        } else {
            json!({ "product": product_input, "media": media })
        };

        let data = self.execute(PRODUCT_CREATE_MUTATION, variables).await?;
        let payload = &data["productCreate"];
        fail_on_user_errors(payload)?;

        let created: ProductNode = serde_json::from_value(payload["product"].clone())?;
        let variant = created.variants.nodes.into_iter().next().ok_or_else(|| {
            PlatformError::UserErrors(vec![super::UserError {
                field: None,
                message: "productCreate returned a product without a variant".to_string(),
                code: None,
            }])
        })?;

        Ok(CreatedProduct {
            product_id: created.id,
            variant_id: variant.id.unwrap_or_default(),
            inventory_item_id: variant
                .inventory_item
                .map(|item| item.id)
                .unwrap_or_default(),
            sku: product.id.clone(),
        })
    }

    /// Set a product's status. Disabling a product is always a transition
    /// to `DRAFT`; supplier records are never deleted by the sync.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when the mutation is rejected.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_product_status(
        &self,
        product_id: &str,
        status: ProductStatus,
    ) -> Result<(), PlatformError> {
        let variables = json!({
            "product": { "id": product_id, "status": status }
        });
        let data = self.execute(PRODUCT_STATUS_MUTATION, variables).await?;
        fail_on_user_errors(&data["productUpdate"])
    }

    /// Update a product's single variant: assign the supplier SKU (with
    /// inventory tracking on), the promotional price as the selling price
    /// and the catalog price as compare-at.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when the mutation is rejected.
    #[instrument(skip(self, product), fields(sku = %product.id))]
    pub async fn update_variant_pricing(
        &self,
        product_id: &str,
        variant_id: &str,
        product: &SupplierProduct,
    ) -> Result<(), PlatformError> {
        let variables = json!({
            "productId": product_id,
            "variants": [{
                "id": variant_id,
                "inventoryItem": { "sku": product.id, "tracked": true },
                "price": product.attributes.price.promo,
                "compareAtPrice": product.attributes.price.catalog,
            }]
        });
        let data = self.execute(VARIANT_BULK_UPDATE_MUTATION, variables).await?;
        fail_on_user_errors(&data["productVariantsBulkUpdate"])
    }

    /// Attach additional image media (sourced by URL) to a product.
    ///
    /// Returns the mutation's user errors instead of failing on them;
    /// media rejections are logged and do not abort a batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, image_urls), fields(product_id = %product_id, images = image_urls.len()))]
    pub async fn add_product_media<S: AsRef<str>>(
        &self,
        store: &str,
        product_id: &str,
        image_urls: &[S],
    ) -> Result<Vec<super::UserError>, PlatformError> {
        let media: Vec<Value> = image_urls
            .iter()
            .map(|url| {
                json!({
                    "originalSource": url.as_ref(),
                    "alt": format!("Uploaded {store} Image"),
                    "mediaContentType": "IMAGE",
                })
            })
            .collect();
        let variables = json!({
            "product": { "id": product_id },
            "media": media,
        });
        let data = self.execute(PRODUCT_ADD_MEDIA_MUTATION, variables).await?;
        let errors = user_errors(&data["productUpdate"])?;
        if !errors.is_empty() {
            warn!(product_id, errors = %super::format_user_errors(&errors), "media additions rejected");
        }
        Ok(errors)
    }

    /// Permanently delete a product. Only maintenance commands call this;
    /// the reconciliation loop itself never deletes.
    ///
    /// # Errors
    ///
    /// Returns `UserErrors` when the mutation is rejected.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_product(&self, product_id: &str) -> Result<(), PlatformError> {
        let variables = json!({ "input": { "id": product_id } });
        let data = self.execute(PRODUCT_DELETE_MUTATION, variables).await?;
        fail_on_user_errors(&data["productDelete"])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_sync_view_node() {
        let data = json!({
            "products": {
                "nodes": [{
                    "id": "gid://shopify/Product/1",
                    "title": "Oven - ABC123",
                    "status": "ACTIVE",
                    "media": { "nodes": [
                        { "id": "gid://shopify/MediaImage/9",
                          "image": { "url": "https://cdn/x_123.jpg" } },
                        {}
                    ]},
                    "variants": { "nodes": [{
                        "id": "gid://shopify/ProductVariant/2",
                        "sku": "ABC123",
                        "price": "999.50",
                        "compareAtPrice": "1250.00"
                    }]}
                }]
            }
        });
        let (nodes, _) = decode_products(data).unwrap();
        let product = nodes
            .into_iter()
            .next()
            .unwrap()
            .into_platform_product()
            .unwrap();
        assert_eq!(product.variant.sku, "ABC123");
        assert_eq!(product.status, ProductStatus::Active);
        // The non-MediaImage node decodes to an empty object and is dropped
        assert_eq!(product.media.len(), 1);
        assert_eq!(
            product.variant.compare_at_price.unwrap(),
            Decimal::new(125_000, 2)
        );
    }

    #[test]
    fn test_decode_skips_variantless_nodes() {
        let data = json!({
            "products": { "nodes": [{
                "id": "gid://shopify/Product/1",
                "variants": { "nodes": [] }
            }]}
        });
        let (nodes, _) = decode_products(data).unwrap();
        assert!(nodes.into_iter().next().unwrap().into_sku_ref().is_none());
    }

    #[test]
    fn test_decode_stock_view_node() {
        let data = json!({
            "products": { "nodes": [{
                "id": "gid://shopify/Product/1",
                "variants": { "nodes": [{
                    "sku": "ABC123",
                    "inventoryQuantity": 4,
                    "inventoryItem": { "id": "gid://shopify/InventoryItem/7" }
                }]}
            }]}
        });
        let (nodes, _) = decode_products(data).unwrap();
        let stock = nodes
            .into_iter()
            .next()
            .unwrap()
            .into_stock_level()
            .unwrap();
        assert_eq!(stock.inventory_quantity, 4);
        assert_eq!(stock.inventory_item_id, "gid://shopify/InventoryItem/7");
    }

    #[test]
    fn test_decode_page_info() {
        let data = json!({
            "products": {
                "nodes": [],
                "pageInfo": { "endCursor": "abc", "hasNextPage": true }
            }
        });
        let (_, page_info) = decode_products(data).unwrap();
        let info = page_info.unwrap();
        assert!(info.has_next_page);
        assert_eq!(info.end_cursor.as_deref(), Some("abc"));
    }
}
