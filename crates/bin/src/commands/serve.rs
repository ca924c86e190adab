//! Serve command - runs the Vellum web server.

use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tokio::signal::unix::{SignalKind, signal};
use tower_cookies::{Cookie, CookieManagerLayer, Cookies};
use tracing_subscriber::EnvFilter;

use vellum::{
    CredentialStore, DocumentStore, Format, Renderer, SessionStore, render::Unstyled,
    session::SessionHandle,
};

use crate::cli::ServeArgs;
use crate::templates::SiteChrome;

const SESSION_COOKIE: &str = "vellum_session";

/// Shared application state
#[derive(Clone)]
struct AppState {
    documents: DocumentStore,
    credentials: CredentialStore,
    renderer: Arc<Renderer>,
    sessions: SessionStore,
}

/// New document form data
#[derive(Deserialize)]
struct NewDocumentForm {
    new_document: String,
}

/// Edit form data
#[derive(Deserialize)]
struct EditForm {
    edit_contents: String,
}

/// Sign-in form data
#[derive(Deserialize)]
struct SignInForm {
    username: String,
    password: String,
}

/// Run the Vellum server
pub async fn run(args: &ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("vellum=info".parse().unwrap()),
        )
        .init();

    // Create the document root if this is a first run
    tokio::fs::create_dir_all(&args.data_dir).await?;

    let documents = DocumentStore::new(&args.data_dir);
    let credentials = CredentialStore::new(&args.users_file);

    // Refuse to start without a readable credential file
    match credentials.load().await {
        Ok(accounts) => {
            tracing::info!(
                "Loaded {} account(s) from {}",
                accounts.len(),
                credentials.path().display()
            );
        }
        Err(e) => {
            eprintln!("Cannot load credential file: {e}");
            eprintln!("Provision an account with: vellum useradd <username> <password>");
            std::process::exit(1);
        }
    }

    // Create shared application state
    let app_state = AppState {
        documents,
        credentials,
        renderer: Arc::new(Renderer::commonmark()),
        sessions: SessionStore::new(),
    };

    let app = router(app_state.clone());

    // Bind server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;

    // Print startup message
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                   Vellum CMS Server Started                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("🌐 Web Interface: http://localhost:{}", local_addr.port());
    println!("📁 Document Root: {}", app_state.documents.root().display());
    println!();
    println!("Available endpoints:");
    println!("  GET  /                   - Document index");
    println!("  GET  /new                - New document form");
    println!("  POST /new                - Create a document");
    println!("  GET  /{{filename}}         - View a document");
    println!("  GET  /{{filename}}/edit    - Edit form");
    println!("  POST /{{filename}}/edit    - Save changes");
    println!("  POST /{{filename}}/delete  - Delete a document");
    println!("  GET  /users/login        - Sign-in page");
    println!("  POST /users/logout       - Sign out");
    println!("  GET  /health             - Health check");
    println!();
    println!("Press Ctrl+C to shutdown");

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to set up SIGTERM handler");
            let mut sigint =
                signal(SignalKind::interrupt()).expect("failed to set up SIGINT handler");

            tokio::select! {
                _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown..."),
                _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown..."),
            }
        })
        .await?;

    println!("Server shut down");
    Ok(())
}

/// Build the application router over shared state. The router prefers static
/// segments, so /new and the /users routes stay reachable alongside the
/// {filename} captures.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health_endpoint))
        .route(
            "/new",
            get(handle_new_document_page).post(handle_new_document_submit),
        )
        .route(
            "/users/login",
            get(handle_signin_page).post(handle_signin_submit),
        )
        .route("/users/logout", post(handle_signout))
        .route("/{filename}", get(handle_view_document))
        .route(
            "/{filename}/edit",
            get(handle_edit_page).post(handle_edit_submit),
        )
        .route("/{filename}/delete", post(handle_delete))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

// ============================================================================
// Session and Response Helpers
// ============================================================================

/// Resolve the request's session, creating one (and setting the cookie) when
/// the client has none yet.
///
/// Nothing on the request path expires sessions, so a client that never
/// returns the cookie leaves one stored entry per request. Reclaiming those
/// is up to whatever drives [`SessionStore::destroy`].
async fn ensure_session(state: &AppState, cookies: &Cookies) -> SessionHandle {
    if let Some(cookie) = cookies.get(SESSION_COOKIE)
        && let Some(session) = state.sessions.resolve(cookie.value()).await
    {
        return session;
    }

    let (token, session) = state.sessions.create().await;
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);
    session
}

/// Gate for routes that require a signed-in user. Anonymous clients get the
/// sign-in flash queued and a bounce back to the index.
async fn require_signed_in(session: &SessionHandle) -> Option<Response> {
    let mut guard = session.write().await;
    if guard.is_authenticated() {
        return None;
    }
    guard.set_flash("You must be signed in to do that.");
    Some(redirect_home())
}

/// Consume the pending flash and snapshot the signed-in username.
async fn flash_and_user(session: &SessionHandle) -> (Option<String>, Option<String>) {
    let mut guard = session.write().await;
    let flash = guard.take_flash();
    let username = guard.username().map(String::from);
    (flash, username)
}

/// 302 redirect to the document index (axum's `Redirect::to` would send 303).
fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

/// Log the failure and answer a bare 500.
fn internal_error(err: vellum::Error) -> Response {
    tracing::error!("Request failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
}

/// Queue the missing-document flash and bounce to the index.
async fn missing_document(session: &SessionHandle, filename: &str) -> Response {
    session
        .write()
        .await
        .set_flash(format!("{filename} does not exist."));
    redirect_home()
}

/// 422 re-render of the new-document form with the name complaint. The flash
/// is consumed straight back into the page being returned.
async fn name_required_response(session: &SessionHandle) -> Response {
    session.write().await.set_flash("A name is required.");
    let (flash, username) = flash_and_user(session).await;
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(crate::templates::new_document_page(
            flash.as_deref(),
            username.as_deref(),
        )),
    )
        .into_response()
}

/// 422 re-render of the sign-in form, keeping the submitted username.
async fn invalid_credentials_response(session: &SessionHandle, username: &str) -> Response {
    session.write().await.set_flash("Invalid Credentials");
    let (flash, _) = flash_and_user(session).await;
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(crate::templates::signin_page(
            flash.as_deref(),
            Some(username),
        )),
    )
        .into_response()
}

// ============================================================================
// Document Handlers
// ============================================================================

/// Handler for GET / - Document index
async fn handle_index(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = ensure_session(&state, &cookies).await;

    let mut documents = match state.documents.list().await {
        Ok(documents) => documents,
        Err(e) => return internal_error(e),
    };
    documents.sort();

    let (flash, username) = flash_and_user(&session).await;
    Html(crate::templates::index_page(
        &documents,
        flash.as_deref(),
        username.as_deref(),
    ))
    .into_response()
}

/// Handler for GET /{filename} - View a document
async fn handle_view_document(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(filename): Path<String>,
) -> Response {
    let session = ensure_session(&state, &cookies).await;

    let bytes = match state.documents.read(&filename).await {
        Ok(bytes) => bytes,
        Err(e) if e.is_not_found() || e.is_invalid_name() => {
            return missing_document(&session, &filename).await;
        }
        Err(e) => return internal_error(e),
    };

    let rendered = match Format::from_name(&filename) {
        format @ Format::Markup => {
            let (flash, username) = flash_and_user(&session).await;
            let chrome = SiteChrome::new(&filename, flash, username);
            state.renderer.render(format, &bytes, &chrome)
        }
        // Plain text goes out bare, so any pending flash stays queued.
        format @ Format::PlainText => state.renderer.render(format, &bytes, &Unstyled),
    };

    (
        [(header::CONTENT_TYPE, rendered.content_type)],
        rendered.body,
    )
        .into_response()
}

/// Handler for GET /new - New document form
async fn handle_new_document_page(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = ensure_session(&state, &cookies).await;
    if let Some(denied) = require_signed_in(&session).await {
        return denied;
    }

    let (flash, username) = flash_and_user(&session).await;
    Html(crate::templates::new_document_page(
        flash.as_deref(),
        username.as_deref(),
    ))
    .into_response()
}

/// Handler for POST /new - Create a document
async fn handle_new_document_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<NewDocumentForm>,
) -> Response {
    let session = ensure_session(&state, &cookies).await;
    if let Some(denied) = require_signed_in(&session).await {
        return denied;
    }

    let requested = form.new_document.trim().to_string();
    if requested.is_empty() {
        return name_required_response(&session).await;
    }

    match state.documents.create(&requested).await {
        Ok(_) => {
            // The confirmation names the submitted title, not the stored
            // filename.
            session
                .write()
                .await
                .set_flash(format!("{requested} was created."));
            redirect_home()
        }
        Err(e) if e.is_invalid_name() => name_required_response(&session).await,
        Err(e) => internal_error(e),
    }
}

/// Handler for GET /{filename}/edit - Edit form
async fn handle_edit_page(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(filename): Path<String>,
) -> Response {
    let session = ensure_session(&state, &cookies).await;
    if let Some(denied) = require_signed_in(&session).await {
        return denied;
    }

    let bytes = match state.documents.read(&filename).await {
        Ok(bytes) => bytes,
        Err(e) if e.is_not_found() || e.is_invalid_name() => {
            return missing_document(&session, &filename).await;
        }
        Err(e) => return internal_error(e),
    };
    let content = String::from_utf8_lossy(&bytes);

    let (flash, username) = flash_and_user(&session).await;
    Html(crate::templates::edit_page(
        &filename,
        &content,
        flash.as_deref(),
        username.as_deref(),
    ))
    .into_response()
}

/// Handler for POST /{filename}/edit - Save changes
async fn handle_edit_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(filename): Path<String>,
    Form(form): Form<EditForm>,
) -> Response {
    let session = ensure_session(&state, &cookies).await;
    if let Some(denied) = require_signed_in(&session).await {
        return denied;
    }

    match state
        .documents
        .write(&filename, form.edit_contents.as_bytes())
        .await
    {
        Ok(()) => {
            session
                .write()
                .await
                .set_flash(format!("{filename} has been updated."));
            redirect_home()
        }
        Err(e) if e.is_invalid_name() => missing_document(&session, &filename).await,
        Err(e) => internal_error(e),
    }
}

/// Handler for POST /{filename}/delete - Delete a document
async fn handle_delete(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(filename): Path<String>,
) -> Response {
    let session = ensure_session(&state, &cookies).await;
    if let Some(denied) = require_signed_in(&session).await {
        return denied;
    }

    match state.documents.delete(&filename).await {
        Ok(()) => {
            session
                .write()
                .await
                .set_flash(format!("{filename} was deleted."));
            redirect_home()
        }
        Err(e) if e.is_not_found() || e.is_invalid_name() => {
            missing_document(&session, &filename).await
        }
        Err(e) => internal_error(e),
    }
}

// ============================================================================
// Authentication Handlers
// ============================================================================

/// Handler for GET /users/login - Sign-in page
async fn handle_signin_page(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = ensure_session(&state, &cookies).await;
    let (flash, _) = flash_and_user(&session).await;
    Html(crate::templates::signin_page(flash.as_deref(), None)).into_response()
}

/// Handler for POST /users/login - Process sign-in
async fn handle_signin_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<SignInForm>,
) -> Response {
    let session = ensure_session(&state, &cookies).await;

    match state
        .credentials
        .verify(&form.username, &form.password)
        .await
    {
        Ok(true) => {
            let mut guard = session.write().await;
            guard.sign_in(form.username.clone());
            guard.set_flash("Welcome!");
            drop(guard);
            tracing::info!("User signed in: {}", form.username);
            redirect_home()
        }
        Ok(false) => {
            tracing::info!("Failed sign-in attempt for: {}", form.username);
            invalid_credentials_response(&session, &form.username).await
        }
        Err(e) => {
            // Credential file became unreadable after startup. Fail closed.
            tracing::error!("Credential verification unavailable: {e}");
            invalid_credentials_response(&session, &form.username).await
        }
    }
}

/// Handler for POST /users/logout - Sign out
async fn handle_signout(State(state): State<AppState>, cookies: Cookies) -> Response {
    let session = ensure_session(&state, &cookies).await;

    // The session itself survives; only the identity is cleared.
    let mut guard = session.write().await;
    guard.sign_out();
    guard.set_flash("You have been signed out.");
    drop(guard);

    redirect_home()
}

// ============================================================================
// Health Handler
// ============================================================================

/// Health check response
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    documents: usize,
}

/// Handler for GET /health - Health check endpoint
///
/// Reports `degraded` when the document root cannot be listed.
async fn handle_health_endpoint(State(state): State<AppState>) -> axum::Json<HealthResponse> {
    match state.documents.list().await {
        Ok(documents) => axum::Json(HealthResponse {
            status: "healthy",
            documents: documents.len(),
        }),
        Err(e) => {
            tracing::error!("Document root is unreadable: {e}");
            axum::Json(HealthResponse {
                status: "degraded",
                documents: 0,
            })
        }
    }
}
