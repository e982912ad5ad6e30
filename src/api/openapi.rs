use utoipa::OpenApi;

use crate::{
    api::models::{AboutView, CurrentUser, DashboardView, ErrorResponse, FormView, HomeView, LoginRequest, PatientView, PostView},
    core::models::{
        patient::{NewPatient, Patient},
        post::{BlogPost, NewPost},
        session::{Notice, NoticeLevel},
        user::Registration,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::signup_form,
        super::handlers::signup,
        super::handlers::login_form,
        super::handlers::login,
        super::handlers::logout,
        super::handlers::index,
        super::handlers::about,
        super::handlers::dashboard,
        super::handlers::get_patient,
        super::handlers::add_patient_form,
        super::handlers::add_patient,
        super::handlers::delete_patient,
        super::handlers::get_post,
        super::handlers::add_post_form,
        super::handlers::add_post,
        super::handlers::delete_post
    ),
    components(schemas(
        Registration,
        LoginRequest,
        NewPatient,
        NewPost,
        Patient,
        BlogPost,
        Notice,
        NoticeLevel,
        CurrentUser,
        HomeView,
        AboutView,
        DashboardView,
        PatientView,
        PostView,
        FormView,
        ErrorResponse
    )),
    info(
        title = "Clinicboard",
        description = "Patient treatment records and a clinic blog behind a shared login. \
                       Pages are JSON documents carrying the flash notice and the logged-in user.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/signup",
            "/login",
            "/logout",
            "/",
            "/about",
            "/dashboard",
            "/patient/{patient_id}",
            "/add_patient",
            "/addpatient",
            "/delete_patient/{patient_id}",
            "/post/{post_id}",
            "/add",
            "/addpost",
            "/delete_post/{post_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
