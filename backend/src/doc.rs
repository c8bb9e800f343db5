//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST surface:
//! the identify endpoint and the health probes. The generated document
//! backs Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::identify::{ContactView, IdentifyRequest, IdentifyResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contact identity API",
        description = "Resolves customer identities across purchase events \
                       that supply varying email and phone number pairs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::identify::identify,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(IdentifyRequest, IdentifyResponse, ContactView))
)]
pub struct ApiDoc;
