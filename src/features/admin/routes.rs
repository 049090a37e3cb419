use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::features::admin::types::{AdminProfileReq, SetStatusReq};
use crate::features::admin::AdminService;
use crate::features::auth::AuthService;
use crate::features::profiles::types::{Role, SessionUser};
use crate::utils::error::Error;

async fn require_admin(auth_service: &AuthService) -> Result<SessionUser, Error> {
    let session = auth_service
        .current_session()
        .await?
        .ok_or(Error::Unauthorized)?;
    if session.role != Role::Admin {
        return Err(Error::Forbidden);
    }
    Ok(session)
}

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "Roster grouped into pending/approved/rejected"),
        (status = 403, description = "Not an admin session"),
    )
)]
#[get("/admin/users")]
pub async fn list_users(
    auth_service: web::Data<AuthService>,
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, Error> {
    require_admin(&auth_service).await?;
    let grouped = admin_service.list_by_status().await?;
    Ok(HttpResponse::Ok().json(grouped))
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}/status",
    tag = "admin",
    request_body = SetStatusReq,
    responses(
        (status = 200, description = "Status updated"),
        (status = 400, description = "Transition not allowed"),
        (status = 404, description = "No such user"),
    )
)]
#[put("/admin/users/{id}/status")]
pub async fn set_status(
    path: web::Path<String>,
    payload: web::Json<SetStatusReq>,
    auth_service: web::Data<AuthService>,
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, Error> {
    require_admin(&auth_service).await?;
    let updated = admin_service
        .set_status(&path.into_inner(), payload.status)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Deletion is irreversible and has no undo; the dashboard confirms with the
/// operator before calling this.
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "No such user"),
    )
)]
#[delete("/admin/users/{id}")]
pub async fn delete_user(
    path: web::Path<String>,
    auth_service: web::Data<AuthService>,
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, Error> {
    require_admin(&auth_service).await?;
    admin_service.delete_user(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    post,
    path = "/admin/profiles",
    tag = "admin",
    request_body = AdminProfileReq,
    responses(
        (status = 201, description = "Profile created (or updated in edit mode)"),
        (status = 409, description = "Mobile number already registered"),
    )
)]
#[post("/admin/profiles")]
pub async fn create_profile(
    payload: web::Json<AdminProfileReq>,
    auth_service: web::Data<AuthService>,
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, Error> {
    let admin = require_admin(&auth_service).await?;

    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let created = admin_service
        .create_profile(payload.into_inner(), &admin.id)
        .await?;
    Ok(HttpResponse::Created().json(created))
}
