mod swagger;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use vivah_gate::config::{
    traits::Env, AdminSettings, DbSettings, LocalStoreSettings, StorageSettings,
};
use vivah_gate::features::admin::AdminService;
use vivah_gate::features::auth::AuthService;
use vivah_gate::features::browse::BrowseService;
use vivah_gate::features::media::{ImagePipeline, StorageClient};
use vivah_gate::features::profiles::{PgProfileRepository, ProfileStore};
use vivah_gate::features::{admin, auth, browse, system};
use vivah_gate::infrastructure::persistence::{db, local::LocalRecordStore};
use vivah_gate::seeding;

use swagger::ApiDoc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .with_line_number(true)
        .init();

    // region settings
    let db_settings = DbSettings::from_env().expect("Failed to load settings");
    let local_settings = LocalStoreSettings::from_env().expect("Failed to load settings");
    let storage_settings = StorageSettings::from_env().expect("Failed to load settings");
    let admin_settings = AdminSettings::from_env().expect("Failed to load admin settings");
    // endregion settings

    // region persistence
    let remote = match &db_settings.database_url {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .expect("Failed to create database pool");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run migrations");
            Some(PgProfileRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, local record store is authoritative");
            None
        }
    };
    let records = LocalRecordStore::new(&local_settings.local_store_dir);
    let store = ProfileStore::new(remote, records.clone());
    // endregion persistence

    seeding::run(&store, &admin_settings)
        .await
        .expect("seeding failed");

    // region services
    let storage_client = StorageClient::from_settings(&storage_settings);
    if storage_client.is_none() {
        tracing::warn!("object storage not configured, profile images stay inline");
    }
    let images = ImagePipeline::new(storage_client);

    let auth_service = AuthService::new(
        store.clone(),
        records.clone(),
        admin_settings.clone(),
        images.clone(),
    );
    let admin_service = AdminService::new(store.clone(), images.clone());
    let browse_service = BrowseService::new(store.clone());
    // endregion services

    let openapi = ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .app_data(web::Data::new(browse_service.clone()))
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allow_any_header()
                    .supports_credentials(),
            ) // should be changed for production!!!
            .service(
                SwaggerUi::new("/swagger/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .service(
                web::scope("")
                    .service(system::health)
                    .service(system::version)
                    .service(auth::login)
                    .service(auth::register)
                    .service(auth::logout)
                    .service(auth::session)
                    .service(auth::update_profile)
                    .service(admin::list_users)
                    .service(admin::set_status)
                    .service(admin::delete_user)
                    .service(admin::create_profile)
                    .service(browse::candidates),
            )
    })
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
