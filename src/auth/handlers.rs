use crate::{
    auth::{
        jwt::{generate_access_token, generate_refresh_token, verify_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    model::role::Role,
    models::{LoginReqDto, RegisterReq, TokenType},
    store::Store,
};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// User registration handler
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterReq,
    responses(
        (status = 201, description = "User registered successfully"),
        (status = 400, description = "Empty username or password, or unknown role"),
        (status = 409, description = "Username already taken")
    ),
    tag = "Auth"
)]
pub async fn register(user: web::Json<RegisterReq>, store: web::Data<Store>) -> impl Responder {
    let username = user.username.trim().to_lowercase();
    let password = &user.password;

    if username.is_empty() || password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Username and password must not be empty"
        }));
    }

    let role = match Role::from_id(user.role_id) {
        Some(role) => role,
        None => {
            return HttpResponse::BadRequest().json(json!({
                "error": "Unknown role id"
            }));
        }
    };

    let hashed = hash_password(password);

    match store.insert_user(username, hashed, role, user.employee_id.clone()) {
        Some(_) => HttpResponse::Created().json(json!({
            "message": "User registered successfully"
        })),
        None => HttpResponse::Conflict().json(json!({
            "error": "Username already taken"
        })),
    }
}

/// Login: issues an access/refresh token pair against the user directory.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    store: web::Data<Store>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return HttpResponse::BadRequest().body("Username or password required");
    }

    let account = match store.user_by_username(user.username.trim()) {
        Some(account) => {
            debug!(user_id = account.id, "User found");
            account
        }
        None => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
    };

    if let Err(e) = verify_password(&user.password, &account.password_hash) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    debug!("Password verified, issuing tokens");

    let access_token = generate_access_token(
        account.id,
        account.username.clone(),
        account.role.as_id(),
        account.employee_id.clone(),
        &config.jwt_secret,
        config.access_token_ttl,
    );

    let (refresh_token, refresh_claims) = generate_refresh_token(
        account.id,
        account.username.clone(),
        account.role.as_id(),
        account.employee_id.clone(),
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    // Refresh tokens are tracked so they can be rotated and revoked.
    store.record_refresh_token(refresh_claims.jti, account.id);

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token,
    })
}

#[get("/protected")]
pub async fn protected(req: HttpRequest) -> impl Responder {
    match req.extensions().get::<crate::auth::auth::AuthUser>() {
        Some(user) => HttpResponse::Ok().json(json!({
            "user_id": user.user_id,
            "username": user.username,
            "role": user.role,
            "employee_id": user.employee_id,
        })),
        None => HttpResponse::Unauthorized().body("No user"),
    }
}

/// Rotates a refresh token: revokes the presented one and issues a new pair.
#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "New token pair", body = LoginResponse),
        (status = 401, description = "Missing, invalid, or revoked refresh token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn refresh_token(
    req: HttpRequest,
    store: web::Data<Store>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().body("No token"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().body("Invalid token"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().finish();
    }

    if store.active_refresh_token(&claims.jti).is_none() {
        return HttpResponse::Unauthorized().finish();
    }

    // Rotate: old token out, new pair in.
    store.revoke_refresh_token(&claims.jti);

    let (new_refresh_token, new_claims) = generate_refresh_token(
        claims.user_id,
        claims.sub.clone(),
        claims.role,
        claims.employee_id.clone(),
        &config.jwt_secret,
        config.refresh_token_ttl,
    );
    store.record_refresh_token(new_claims.jti, claims.user_id);

    let access_token = generate_access_token(
        claims.user_id,
        claims.sub.clone(),
        claims.role,
        claims.employee_id,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "refresh_token": new_refresh_token
    }))
}

/// Logout revokes the presented refresh token. Always 204, even for tokens
/// that were never issued.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Logged out")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    store: web::Data<Store>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    // only refresh tokens can logout
    if claims.token_type != TokenType::Refresh {
        return HttpResponse::NoContent().finish();
    }

    store.revoke_refresh_token(&claims.jti);

    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEMO_PASSWORD;
    use actix_web::{App, http::StatusCode, test};

    fn test_config() -> Config {
        Config::for_tests()
    }

    #[actix_web::test]
    async fn seeded_account_can_login_and_rotate_refresh_token() {
        let store = web::Data::new(Store::seeded());
        let config = web::Data::new(test_config());
        let app = test::init_service(
            App::new()
                .app_data(store.clone())
                .app_data(config.clone())
                .route("/auth/login", web::post().to(login))
                .route("/auth/refresh", web::post().to(refresh_token)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "username": "alice", "password": DEMO_PASSWORD }))
            .to_request();
        let tokens: LoginResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {}", tokens.refresh_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // The presented refresh token was rotated out.
        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {}", tokens.refresh_token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorized() {
        let store = web::Data::new(Store::seeded());
        let config = web::Data::new(test_config());
        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(config)
                .route("/auth/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "username": "alice", "password": "nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn access_token_cannot_refresh() {
        let store = web::Data::new(Store::seeded());
        let config = web::Data::new(test_config());
        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(config.clone())
                .route("/auth/refresh", web::post().to(refresh_token)),
        )
        .await;

        let access = crate::auth::jwt::generate_access_token(
            1,
            "alice".to_string(),
            1,
            None,
            &config.jwt_secret,
            900,
        );
        let req = test::TestRequest::post()
            .uri("/auth/refresh")
            .insert_header(("Authorization", format!("Bearer {access}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn register_rejects_duplicate_username() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store)
                .route("/auth/register", web::post().to(register)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({ "username": "alice", "password": "pw", "role_id": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
