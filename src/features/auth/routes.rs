use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;

use crate::features::auth::types::{LoginReq, RegisterReq, RegisterResp, UpdateProfileReq};
use crate::features::auth::AuthService;
use crate::features::profiles::types::ProfilePatch;
use crate::utils::age::validate_minimum_age;
use crate::utils::error::Error;

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginReq,
    responses(
        (status = 200, description = "Session established"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account pending approval or rejected"),
    )
)]
#[post("/auth/login")]
pub async fn login(
    payload: web::Json<LoginReq>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, Error> {
    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let session_user = auth_service
        .login(
            &payload.mobile,
            &payload.password,
            payload.user_type.as_profile_type(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(session_user))
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterReq,
    responses(
        (status = 202, description = "Registration staged, awaiting admin approval"),
        (status = 409, description = "Mobile number already registered"),
    )
)]
#[post("/auth/register")]
pub async fn register(
    payload: web::Json<RegisterReq>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, Error> {
    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }
    if payload.password != payload.confirm_password {
        return Err(Error::Validation("passwords do not match".into()));
    }

    let outcome = auth_service
        .register(
            &payload.mobile,
            &payload.password,
            &payload.name,
            payload.profile_type,
        )
        .await?;

    Ok(HttpResponse::Accepted().json(RegisterResp::from(outcome)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses((status = 204, description = "Session cleared"))
)]
#[post("/auth/logout")]
pub async fn logout(auth_service: web::Data<AuthService>) -> Result<HttpResponse, Error> {
    auth_service.logout().await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "auth",
    responses(
        (status = 200, description = "Current session, revalidated against the roster"),
    )
)]
#[get("/auth/session")]
pub async fn session(auth_service: web::Data<AuthService>) -> Result<HttpResponse, Error> {
    let session = auth_service.current_session().await?;
    Ok(HttpResponse::Ok().json(session))
}

#[utoipa::path(
    put,
    path = "/profile",
    tag = "auth",
    request_body = UpdateProfileReq,
    responses(
        (status = 200, description = "Profile completed/updated"),
        (status = 401, description = "No active session"),
    )
)]
#[put("/profile")]
pub async fn update_profile(
    payload: web::Json<UpdateProfileReq>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, Error> {
    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let viewer = auth_service
        .current_session()
        .await?
        .ok_or(Error::Unauthorized)?;

    validate_minimum_age(payload.date_of_birth, viewer.profile_type)?;

    let payload = payload.into_inner();
    let patch = ProfilePatch {
        phone: Some(payload.phone),
        date_of_birth: Some(payload.date_of_birth),
        height: Some(payload.height),
        education: Some(payload.education),
        occupation: Some(payload.occupation),
        salary: payload.salary,
        city: Some(payload.city),
        state: Some(payload.state),
        religion: Some(payload.religion),
        mother_tongue: Some(payload.mother_tongue),
        family_type: Some(payload.family_type),
        about: Some(payload.about),
        profile_image: payload.profile_image,
        profile_images: payload.profile_images,
        ..Default::default()
    };

    let session_user = auth_service.update_profile(&viewer.id, patch).await?;
    Ok(HttpResponse::Ok().json(session_user))
}
