use crate::{
    api::{
        models::*,
        openapi::ApiDoc,
        session::{Session, require_login, session_middleware},
        state::SharedState,
    },
    constants::{
        MSG_LOGGED_IN, MSG_LOGGED_OUT, MSG_PATIENT_ADDED, MSG_PATIENT_DELETED, MSG_POST_ADDED, MSG_POST_DELETED,
        MSG_REGISTERED,
    },
    core::models::{
        patient::NewPatient,
        post::NewPost,
        session::Notice,
        user::Registration,
    },
};
use axum::{
    Form, Json, Router,
    extract::{Path, State},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use utoipa::OpenApi;

// Define routes
pub fn routes(state: SharedState) -> Router {
    let protected_routes = Router::new()
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
        .route("/patient/{patient_id}", get(get_patient))
        .route("/add_patient", get(add_patient_form))
        .route("/addpatient", post(add_patient))
        .route("/delete_patient/{patient_id}", post(delete_patient))
        .route("/post/{post_id}", get(get_post))
        .route("/add", get(add_post_form))
        .route("/addpost", post(add_post))
        .route("/delete_post/{post_id}", post(delete_post))
        .route_layer(middleware::from_fn(require_login));

    Router::new()
        .route("/", get(index))
        .route("/about", get(about))
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(protected_routes)
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}

async fn render<T: Serialize>(session: &Session, content: T) -> Json<Page<T>> {
    Json(Page {
        notice: session.take_notice().await,
        user: session.current_user().await,
        content,
    })
}

async fn redirect_with(session: &Session, notice: Notice, to: &str) -> Response {
    session.flash(notice).await;
    Redirect::to(to).into_response()
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get,
    path = "/signup",
    responses((status = 200, description = "Signup form", body = FormView))
)]
async fn signup_form(session: Session) -> impl IntoResponse {
    render(&session, FormView::empty("signup")).await
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body(content = Registration, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered, redirect to /login"),
        (status = 200, description = "Form re-rendered with the validation error", body = FormView),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn signup(
    State(state): State<SharedState>,
    session: Session,
    Form(registration): Form<Registration>,
) -> Result<Response, ApiError> {
    let values = json!({
        "name": registration.name,
        "username": registration.username,
        "email": registration.email,
    });
    match state.service.signup(registration).await {
        Ok(_) => Ok(redirect_with(&session, Notice::success(MSG_REGISTERED), "/login").await),
        Err(e) if e.is_form_error() => {
            Ok(render(&session, FormView::with_error("signup", e.to_string(), values)).await.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", body = FormView))
)]
async fn login_form(session: Session) -> impl IntoResponse {
    render(&session, FormView::empty("login")).await
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, redirect to /dashboard"),
        (status = 200, description = "Form re-rendered with `Username not found` or `Invalid login`", body = FormView),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<SharedState>,
    session: Session,
    Form(req): Form<LoginRequest>,
) -> Result<Response, ApiError> {
    match state.service.authenticate(&req.username, &req.password).await {
        Ok(user) => {
            session.log_in(&user).await;
            Ok(redirect_with(&session, Notice::success(MSG_LOGGED_IN), "/dashboard").await)
        }
        Err(e) if e.is_form_error() => {
            let values = json!({ "username": req.username });
            Ok(render(&session, FormView::with_error("login", e.to_string(), values)).await.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Session cleared, redirect to /"))
)]
async fn logout(session: Session) -> Response {
    session.clear().await;
    redirect_with(&session, Notice::success(MSG_LOGGED_OUT), "/").await
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "All posts, newest first", body = HomeView),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn index(State(state): State<SharedState>, session: Session) -> Result<impl IntoResponse, ApiError> {
    let posts = state.service.list_posts().await?;
    Ok(render(&session, HomeView { posts }).await)
}

#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "About page", body = AboutView))
)]
async fn about(session: Session) -> impl IntoResponse {
    render(
        &session,
        AboutView {
            title: "About".to_string(),
            description: "Patient treatment records and a clinic blog.".to_string(),
        },
    )
    .await
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "All patients, most recently treated first", body = DashboardView),
        (status = 303, description = "Not logged in, redirect to /login"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn dashboard(State(state): State<SharedState>, session: Session) -> Result<impl IntoResponse, ApiError> {
    let patients = state.service.list_patients().await?;
    Ok(render(&session, DashboardView { patients }).await)
}

#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(("patient_id" = i64, Path, description = "ID of the patient")),
    responses(
        (status = 200, description = "Patient record", body = PatientView),
        (status = 303, description = "Not logged in, redirect to /login"),
        (status = 404, description = "Patient not found", body = ErrorResponse)
    )
)]
async fn get_patient(
    State(state): State<SharedState>,
    session: Session,
    Path(patient_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let patient = state.service.get_patient(patient_id).await?;
    Ok(render(&session, PatientView { patient }).await)
}

#[utoipa::path(
    get,
    path = "/add_patient",
    responses(
        (status = 200, description = "Add-patient form", body = FormView),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
async fn add_patient_form(session: Session) -> impl IntoResponse {
    render(&session, FormView::empty("add_patient")).await
}

#[utoipa::path(
    post,
    path = "/addpatient",
    request_body(content = NewPatient, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Patient added, redirect to /dashboard"),
        (status = 200, description = "Form re-rendered with the validation error", body = FormView),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn add_patient(
    State(state): State<SharedState>,
    session: Session,
    Form(patient): Form<NewPatient>,
) -> Result<Response, ApiError> {
    let values = json!(patient);
    match state.service.add_patient(patient).await {
        Ok(_) => Ok(redirect_with(&session, Notice::success(MSG_PATIENT_ADDED), "/dashboard").await),
        Err(e) if e.is_form_error() => Ok(render(&session, FormView::with_error("add_patient", e.to_string(), values))
            .await
            .into_response()),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/delete_patient/{patient_id}",
    params(("patient_id" = i64, Path, description = "ID of the patient to delete")),
    responses(
        (status = 303, description = "Patient deleted, redirect to /dashboard"),
        (status = 404, description = "Patient not found", body = ErrorResponse)
    )
)]
async fn delete_patient(
    State(state): State<SharedState>,
    session: Session,
    Path(patient_id): Path<i64>,
) -> Result<Response, ApiError> {
    state.service.delete_patient(patient_id).await?;
    Ok(redirect_with(&session, Notice::success(MSG_PATIENT_DELETED), "/dashboard").await)
}

#[utoipa::path(
    get,
    path = "/post/{post_id}",
    params(("post_id" = i64, Path, description = "ID of the post")),
    responses(
        (status = 200, description = "Blog post", body = PostView),
        (status = 303, description = "Not logged in, redirect to /login"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
async fn get_post(
    State(state): State<SharedState>,
    session: Session,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.service.get_post(post_id).await?;
    Ok(render(&session, PostView { post }).await)
}

#[utoipa::path(
    get,
    path = "/add",
    responses(
        (status = 200, description = "Add-post form", body = FormView),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
async fn add_post_form(session: Session) -> impl IntoResponse {
    render(&session, FormView::empty("add")).await
}

#[utoipa::path(
    post,
    path = "/addpost",
    request_body(content = NewPost, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Post added, redirect to /"),
        (status = 200, description = "Form re-rendered with the validation error", body = FormView),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn add_post(
    State(state): State<SharedState>,
    session: Session,
    Form(post): Form<NewPost>,
) -> Result<Response, ApiError> {
    let values = json!(post);
    match state.service.add_post(post).await {
        Ok(_) => Ok(redirect_with(&session, Notice::success(MSG_POST_ADDED), "/").await),
        Err(e) if e.is_form_error() => {
            Ok(render(&session, FormView::with_error("add", e.to_string(), values)).await.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/delete_post/{post_id}",
    params(("post_id" = i64, Path, description = "ID of the post to delete")),
    responses(
        (status = 303, description = "Post deleted, redirect to /"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
async fn delete_post(
    State(state): State<SharedState>,
    session: Session,
    Path(post_id): Path<i64>,
) -> Result<Response, ApiError> {
    state.service.delete_post(post_id).await?;
    Ok(redirect_with(&session, Notice::success(MSG_POST_DELETED), "/").await)
}
