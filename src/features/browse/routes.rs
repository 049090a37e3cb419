use actix_web::{post, web, HttpResponse};

use crate::features::auth::AuthService;
use crate::features::browse::types::{BrowseReq, BrowseResp, FilterOptions};
use crate::features::browse::BrowseService;
use crate::utils::error::Error;

#[utoipa::path(
    post,
    path = "/browse/candidates",
    tag = "browse",
    request_body = BrowseReq,
    responses(
        (status = 200, description = "Filtered candidate cards plus facet values", body = BrowseResp),
        (status = 401, description = "No active session"),
        (status = 403, description = "Viewer profile not complete"),
    )
)]
#[post("/browse/candidates")]
pub async fn candidates(
    payload: web::Json<BrowseReq>,
    auth_service: web::Data<AuthService>,
    browse_service: web::Data<BrowseService>,
) -> Result<HttpResponse, Error> {
    let viewer = auth_service
        .current_session()
        .await?
        .ok_or(Error::Unauthorized)?;

    let unfiltered = browse_service.list_candidates(&viewer).await?;
    let filter_options = FilterOptions::from_candidates(&unfiltered);
    let filtered = payload.filter.apply(&unfiltered);

    Ok(HttpResponse::Ok().json(BrowseResp {
        total_unfiltered: unfiltered.len(),
        candidates: filtered,
        filter_options,
    }))
}
