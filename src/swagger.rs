use utoipa::OpenApi;
use vivah_gate::features::admin::{
    __path_create_profile, __path_delete_user, __path_list_users, __path_set_status,
};
use vivah_gate::features::auth::{
    __path_login, __path_logout, __path_register, __path_session, __path_update_profile,
};
use vivah_gate::features::browse::__path_candidates;
use vivah_gate::features::system::{__path_health, __path_version};

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "auth", description = "Login, registration and profile completion"),
        (name = "admin", description = "Moderation and direct profile management"),
        (name = "browse", description = "Opposite-gender candidate discovery"),
        (name = "system", description = "Health and version"),
    ),
    paths(
        login,
        register,
        logout,
        session,
        update_profile,
        list_users,
        set_status,
        delete_user,
        create_profile,
        candidates,
        health,
        version,
    )
)]
pub struct ApiDoc;
