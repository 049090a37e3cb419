use actix_web::{get, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;
use sysinfo::System;

#[utoipa::path(
    get,
    path = "/system/health",
    tag = "system",
    responses(
        (status = 200, description = "Service health and host memory headroom")
    )
)]
#[get("/system/health")]
pub async fn health() -> Result<HttpResponse> {
    let mut sys = System::new_all();
    sys.refresh_memory();

    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "host_name": System::host_name(),
        "os": System::long_os_version(),
        "memory_kb": {
            "total": sys.total_memory(),
            "available": sys.available_memory(),
        }
    })))
}

#[utoipa::path(
    get,
    path = "/system/version",
    tag = "system",
    responses(
        (status = 200, description = "Crate name and version")
    )
)]
#[get("/system/version")]
pub async fn version() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": env!("CARGO_PKG_NAME")
    })))
}
