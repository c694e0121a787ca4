//! Property HTTP handlers.
//!
//! ```text
//! GET    /properties?page=&take=&search=
//! POST   /properties
//! GET    /properties/statistics
//! PUT    /properties/{id}
//! DELETE /properties/{id}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{PropertyDraft, PropertyFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{self, ApiResponse};
use crate::inbound::http::property_dto::{
    ListPropertiesQuery, PropertyRequest, PropertyResponse, StatisticsResponse,
};
use crate::inbound::http::schemas::{
    ErrorSchema, PropertyEnvelopeSchema, PropertyListEnvelopeSchema, StatisticsEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    listing_validation_error, parse_property_id, property_validation_error,
};

fn into_draft(payload: PropertyRequest) -> ApiResult<PropertyDraft> {
    PropertyDraft::try_from(payload).map_err(|err| property_validation_error(&err))
}

/// List properties, newest first.
#[utoipa::path(
    get,
    path = "/properties",
    params(ListPropertiesQuery),
    responses(
        (status = 200, description = "One page of properties", body = PropertyListEnvelopeSchema),
        (status = 400, description = "Invalid page, take or search", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "listProperties"
)]
#[get("/properties")]
pub async fn list_properties(
    state: web::Data<HttpState>,
    query: web::Query<ListPropertiesQuery>,
) -> ApiResult<HttpResponse> {
    let ListPropertiesQuery { page, take, search } = query.into_inner();
    let filter = PropertyFilter::from_query(page, take, search.as_deref())
        .map_err(|err| listing_validation_error(&err))?;
    let listing = state.properties.list(&filter).await?;
    let meta = listing.meta;
    let data: Vec<PropertyResponse> = listing.data.into_iter().map(Into::into).collect();
    Ok(
        ApiResponse::new(StatusCode::OK, "Properties fetched successfully", Some(data))
            .with_meta(meta)
            .into_response(),
    )
}

/// Create a property.
#[utoipa::path(
    post,
    path = "/properties",
    request_body = PropertyRequest,
    responses(
        (status = 201, description = "Created property", body = PropertyEnvelopeSchema),
        (status = 400, description = "Validation failure", body = ErrorSchema),
        (status = 422, description = "Store rejected the write", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "createProperty"
)]
#[post("/properties")]
pub async fn create_property(
    state: web::Data<HttpState>,
    payload: web::Json<PropertyRequest>,
) -> ApiResult<HttpResponse> {
    let draft = into_draft(payload.into_inner())?;
    let property = state.property_commands.create(draft).await?;
    Ok(envelope::created(
        "Property created successfully",
        PropertyResponse::from(property),
    ))
}

/// Aggregate statistics over every property.
#[utoipa::path(
    get,
    path = "/properties/statistics",
    responses(
        (status = 200, description = "Collection statistics", body = StatisticsEnvelopeSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "propertyStatistics"
)]
#[get("/properties/statistics")]
pub async fn property_statistics(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let statistics = state.properties.statistics().await?;
    Ok(envelope::ok(
        "Property Statistics",
        StatisticsResponse::from(statistics),
    ))
}

/// Replace every field of a property.
#[utoipa::path(
    put,
    path = "/properties/{id}",
    params(("id" = String, Path, description = "24-character hexadecimal id")),
    request_body = PropertyRequest,
    responses(
        (status = 200, description = "Updated property", body = PropertyEnvelopeSchema),
        (status = 400, description = "Invalid id or body", body = ErrorSchema),
        (status = 404, description = "No such property", body = ErrorSchema),
        (status = 422, description = "Store rejected the write", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "replaceProperty"
)]
#[put("/properties/{id}")]
pub async fn replace_property(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<PropertyRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let draft = into_draft(payload.into_inner())?;
    let property = state.property_commands.replace(&id, draft).await?;
    Ok(envelope::ok(
        "Property updated successfully",
        PropertyResponse::from(property),
    ))
}

/// Delete a property and return it.
#[utoipa::path(
    delete,
    path = "/properties/{id}",
    params(("id" = String, Path, description = "24-character hexadecimal id")),
    responses(
        (status = 200, description = "Deleted property", body = PropertyEnvelopeSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "No such property", body = ErrorSchema),
        (status = 422, description = "Store rejected the write", body = ErrorSchema)
    ),
    tags = ["properties"],
    operation_id = "deleteProperty"
)]
#[delete("/properties/{id}")]
pub async fn delete_property(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let property = state.property_commands.delete(&id).await?;
    Ok(envelope::ok(
        "Property deleted successfully",
        PropertyResponse::from(property),
    ))
}

#[cfg(test)]
#[path = "properties_tests.rs"]
mod tests;
