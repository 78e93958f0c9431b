use actix_web::HttpResponse;

use crate::dto::auth_dto::MeResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/me
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        email: auth.subject,
        role: auth.role.to_string(),
    })
}
