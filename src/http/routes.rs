use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::num::IntErrorKind;
use tracing::{debug, instrument};

use super::error::ApiError;
use crate::clients::ProductClient;
use crate::domain::{ProductIn, ProductList};
use crate::etag::{etag_for, if_none_match_matches, parse_if_match};

/// Builds the HTTP surface over a product store client.
pub fn router(client: ProductClient) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/products", get(list_products).post(create_product))
        .route("/products/", get(list_products).post(create_product))
        .route(
            "/products/{product_id}",
            get(get_product).put(put_product).delete(delete_product),
        )
        .with_state(client)
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World!" }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Resolves the `{product_id}` segment. Integers that cannot be an id name
/// no stored product; anything that is not an integer is invalid input.
fn resolve_product_id(path: Result<Path<String>, PathRejection>) -> Result<u64, ApiError> {
    let Path(raw) = path?;
    match raw.parse::<i128>() {
        Ok(id) => u64::try_from(id).map_err(|_| ApiError::NotFound),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(ApiError::NotFound)
        }
        Err(_) => Err(ApiError::InvalidInput(format!(
            "product_id must be an integer, got {raw:?}"
        ))),
    }
}

/// Body validation happens here so invalid input never reaches the store.
fn validated(body: Result<Json<ProductIn>, JsonRejection>) -> Result<ProductIn, ApiError> {
    let Json(input) = body?;
    input
        .validate()
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    Ok(input)
}

#[instrument(skip(client))]
async fn list_products(State(client): State<ProductClient>) -> Result<Json<ProductList>, ApiError> {
    let products = client.list_products().await?;
    Ok(Json(ProductList::from(products)))
}

#[instrument(skip(client, path, headers))]
async fn get_product(
    State(client): State<ProductClient>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let product_id = resolve_product_id(path)?;
    let product = client
        .get_product(product_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let etag = etag_for(&product)?;
    let not_modified = header_str(&headers, header::IF_NONE_MATCH)
        .is_some_and(|candidates| if_none_match_matches(candidates, &etag));
    if not_modified {
        debug!(product_id, "Representation unchanged");
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok(([(header::ETAG, etag)], Json(product)).into_response())
}

#[instrument(skip(client, body))]
async fn create_product(
    State(client): State<ProductClient>,
    body: Result<Json<ProductIn>, JsonRejection>,
) -> Result<Response, ApiError> {
    let input = validated(body)?;
    let product = client.create_product(input).await?;

    let etag = etag_for(&product)?;
    let location = format!("/products/{}", product.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location), (header::ETAG, etag)],
        Json(product),
    )
        .into_response())
}

#[instrument(skip(client, path, headers, body))]
async fn put_product(
    State(client): State<ProductClient>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Result<Json<ProductIn>, JsonRejection>,
) -> Result<Response, ApiError> {
    let input = validated(body)?;
    let product_id = resolve_product_id(path)?;
    let precondition = parse_if_match(header_str(&headers, header::IF_MATCH));
    debug!(product_id, %precondition, "Replacing product");

    let product = client
        .update_product(product_id, input, precondition)
        .await?;

    let etag = etag_for(&product)?;
    Ok(([(header::ETAG, etag)], Json(product)).into_response())
}

#[instrument(skip(client, path))]
async fn delete_product(
    State(client): State<ProductClient>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let product_id = resolve_product_id(path)?;
    if client.delete_product(product_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
