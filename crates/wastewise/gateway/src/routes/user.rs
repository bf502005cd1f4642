use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    HttpRequest, Responder,
};
use anyhow::Result;
use tracing::{info, instrument, Level};
use wastewise_api::{
    model::{Id, Message, Page},
    user::{
        LoginRequest, LoginResponse, RoleSpec, User, UserRegistration, UserUpdate, ROLE_ADMIN,
        ROLE_USER,
    },
};

use crate::{db::Database, session::SessionStore};

const NOT_FOUND: &str = "User not found";

#[instrument(level = Level::INFO, skip(request, db, sessions, spec))]
#[post("/roles/create-new-role")]
pub async fn create_role(
    request: HttpRequest,
    db: Data<Database>,
    sessions: Data<SessionStore>,
    spec: Json<RoleSpec>,
) -> impl Responder {
    super::respond_created(try_create_role(&request, &db, &sessions, spec.into_inner()).await)
}

async fn try_create_role(
    request: &HttpRequest,
    db: &Database,
    sessions: &SessionStore,
    spec: RoleSpec,
) -> Result<RoleSpec> {
    super::authorize(db, sessions, request, &[ROLE_ADMIN]).await?;
    super::validated(spec.validate())?;
    db.create_role(spec).await
}

#[instrument(level = Level::INFO, skip(request, db, sessions))]
#[get("/roles")]
pub async fn list_roles(
    request: HttpRequest,
    db: Data<Database>,
    sessions: Data<SessionStore>,
) -> impl Responder {
    super::respond(try_list_roles(&request, &db, &sessions).await)
}

async fn try_list_roles(
    request: &HttpRequest,
    db: &Database,
    sessions: &SessionStore,
) -> Result<Vec<RoleSpec>> {
    super::authorize(db, sessions, request, &[ROLE_ADMIN]).await?;
    db.list_roles().await
}

#[instrument(level = Level::INFO, skip(db, registration))]
#[post("/user/register-new-user")]
pub async fn register(
    db: Data<Database>,
    registration: Json<UserRegistration>,
) -> impl Responder {
    super::respond(try_register(&db, registration.into_inner()).await)
}

async fn try_register(db: &Database, registration: UserRegistration) -> Result<User> {
    super::validated(registration.validate())?;
    let user = db.register_user(registration).await?;
    info!("Registered a new user: {user}");
    Ok(user)
}

#[instrument(level = Level::INFO, skip(request, db, sessions))]
#[get("/user/get-all")]
pub async fn list(
    request: HttpRequest,
    db: Data<Database>,
    sessions: Data<SessionStore>,
    page: Query<Page>,
) -> impl Responder {
    super::respond(try_list(&request, &db, &sessions, page.into_inner()).await)
}

async fn try_list(
    request: &HttpRequest,
    db: &Database,
    sessions: &SessionStore,
    page: Page,
) -> Result<Vec<User>> {
    super::authorize(db, sessions, request, &[ROLE_ADMIN]).await?;
    db.list_users(page).await
}

#[instrument(level = Level::INFO, skip(request, db, sessions, user_update))]
#[put("/user/update/{id}")]
pub async fn update(
    request: HttpRequest,
    db: Data<Database>,
    sessions: Data<SessionStore>,
    path: Path<Id>,
    user_update: Json<UserUpdate>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_update(&request, &db, &sessions, id, user_update.into_inner()).await)
}

async fn try_update(
    request: &HttpRequest,
    db: &Database,
    sessions: &SessionStore,
    id: Id,
    user_update: UserUpdate,
) -> Result<User> {
    super::authorize(db, sessions, request, &[ROLE_ADMIN]).await?;
    super::validated(user_update.validate())?;

    let user = super::found(db.update_user(id, user_update).await?, NOT_FOUND)?;
    if !user.spec.active {
        sessions.revoke_user(id);
    }
    Ok(user)
}

#[instrument(level = Level::INFO, skip(request, db, sessions))]
#[delete("/user/delete/{id}")]
pub async fn delete(
    request: HttpRequest,
    db: Data<Database>,
    sessions: Data<SessionStore>,
    path: Path<Id>,
) -> impl Responder {
    let id = path.into_inner();
    super::respond(try_delete(&request, &db, &sessions, id).await)
}

async fn try_delete(
    request: &HttpRequest,
    db: &Database,
    sessions: &SessionStore,
    id: Id,
) -> Result<Message> {
    super::authorize(db, sessions, request, &[ROLE_ADMIN]).await?;

    let removed = db.remove_user(id).await?;
    if removed {
        sessions.revoke_user(id);
    }
    super::deleted(id, removed, NOT_FOUND)
}

#[instrument(level = Level::INFO, skip(db, sessions, login))]
#[post("/authentication")]
pub async fn authenticate(
    db: Data<Database>,
    sessions: Data<SessionStore>,
    login: Json<LoginRequest>,
) -> impl Responder {
    super::respond(try_authenticate(&db, &sessions, login.into_inner()).await)
}

async fn try_authenticate(
    db: &Database,
    sessions: &SessionStore,
    login: LoginRequest,
) -> Result<LoginResponse> {
    let user = db.authenticate(login).await?;
    let (access_token, expires_at) = sessions.issue(user.id);
    Ok(LoginResponse {
        user,
        access_token,
        expires_at,
    })
}

#[instrument(level = Level::INFO, skip(request, db, sessions))]
#[get("/user/for-admin")]
pub async fn for_admin(
    request: HttpRequest,
    db: Data<Database>,
    sessions: Data<SessionStore>,
) -> impl Responder {
    let result = super::authorize(&db, &sessions, &request, &[ROLE_ADMIN])
        .await
        .map(|_| Message::from("This URL is only accessible to the admin"));
    super::respond(result)
}

#[instrument(level = Level::INFO, skip(request, db, sessions))]
#[get("/user/for-user")]
pub async fn for_user(
    request: HttpRequest,
    db: Data<Database>,
    sessions: Data<SessionStore>,
) -> impl Responder {
    let result = super::authorize(&db, &sessions, &request, &[ROLE_USER, ROLE_ADMIN])
        .await
        .map(|_| Message::from("This URL is only accessible to the user"));
    super::respond(result)
}
