use actix_web::HttpResponse;
use serde::Serialize;

use crate::auth::claims::{Claims, Identity};
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WhoAmIResponse<'a> {
    user_id: Option<&'a str>,
    claims: &'a Claims,
}

/// Echo the caller's identity back.
pub async fn whoami(identity: Identity) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(WhoAmIResponse {
        user_id: identity.user_id(),
        claims: identity.claims(),
    }))
}
