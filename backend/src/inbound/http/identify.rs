//! Identify HTTP handler.
//!
//! ```text
//! POST /identify {"email":"a@x.io","phoneNumber":"111"}
//! ```
//!
//! The response shape is part of the legacy contract: a consolidation
//! into an existing cluster is wrapped in a `contact` object, while a
//! brand-new identity is returned flat, without the wrapper. Both shapes
//! are preserved deliberately.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::identity::{ConsolidatedIdentity, Resolution};
use crate::domain::{ContactId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::validated_pair;

/// Conflict message for submissions that are already fully known.
const ALREADY_EXISTS: &str = "Email and Phone Number Already Exist";

/// Request payload for `POST /identify`.
///
/// Fields are accepted as raw JSON values so type mismatches are
/// rejected with the contracted message instead of a deserialisation
/// error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyRequest {
    /// Email address of the purchase event.
    #[schema(value_type = String, example = "doc@fluxkart.com")]
    pub email: Option<Value>,
    /// Phone number of the purchase event.
    #[schema(value_type = String, example = "123456")]
    pub phone_number: Option<Value>,
}

/// Consolidated identity payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    /// Identifier of the cluster's primary record.
    pub primary_contact_id: i32,
    /// Known emails, primary's first, de-duplicated.
    pub emails: Vec<String>,
    /// Known phone numbers, primary's first, de-duplicated.
    pub phone_numbers: Vec<String>,
    /// Identifiers of the linked secondary records.
    pub secondary_contact_ids: Vec<i32>,
}

impl From<ConsolidatedIdentity> for ContactView {
    fn from(value: ConsolidatedIdentity) -> Self {
        Self {
            primary_contact_id: value.primary_contact_id.value(),
            emails: value.emails,
            phone_numbers: value.phone_numbers,
            secondary_contact_ids: value
                .secondary_contact_ids
                .into_iter()
                .map(ContactId::value)
                .collect(),
        }
    }
}

/// Response envelope for consolidations into an existing cluster.
#[derive(Debug, Serialize, ToSchema)]
pub struct IdentifyResponse {
    /// The consolidated identity.
    pub contact: ContactView,
}

/// Resolve an (email, phone number) pair into a consolidated identity.
#[utoipa::path(
    post,
    path = "/identify",
    request_body = IdentifyRequest,
    responses(
        (status = 200, description = "Consolidated identity", body = IdentifyResponse),
        (status = 400, description = "Invalid request or already-known pair"),
        (status = 404, description = "Matched cluster has no primary record"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["identify"],
    operation_id = "identifyContact"
)]
#[post("/identify")]
pub async fn identify(
    state: web::Data<HttpState>,
    payload: web::Json<IdentifyRequest>,
) -> ApiResult<HttpResponse> {
    let IdentifyRequest {
        email,
        phone_number,
    } = payload.into_inner();
    let (email, phone_number) = validated_pair(email.as_ref(), phone_number.as_ref())?;

    match state.identify.identify(&email, &phone_number).await? {
        // Legacy flat shape: no `contact` wrapper for a fresh identity.
        Resolution::Created(view) => Ok(HttpResponse::Ok().json(ContactView::from(view))),
        Resolution::Linked(view) => Ok(HttpResponse::Ok().json(IdentifyResponse {
            contact: ContactView::from(view),
        })),
        Resolution::Conflict => Err(Error::conflict(ALREADY_EXISTS)),
        Resolution::NoPrimaryFound => Err(Error::not_found("Primary contact not found")),
    }
}
