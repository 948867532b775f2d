use crate::error::AppError;
use crate::models::Identity;
use crate::services::UserService;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;

/// Resolves the bearer token, when one is sent, into an [`Identity`] stored
/// in the request extensions.
///
/// - no `Authorization` header: the request continues anonymously
/// - a token that fails verification: 401
/// - a valid token: the identity is mirrored into `users` first
///
/// Handlers decide whether they need a caller through [`CurrentUser`].
pub struct AuthMiddleware {
    jwt_service: JwtService,
    user_service: UserService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService, user_service: UserService) -> Self {
        Self {
            jwt_service,
            user_service,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
            user_service: self.user_service.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_service: JwtService,
    user_service: UserService,
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight never carries credentials
        if req.method() == Method::OPTIONS {
            return Box::pin(self.service.call(req));
        }

        let Some(token) = bearer_token(&req) else {
            return Box::pin(self.service.call(req));
        };

        let identity = match self.jwt_service.verify_access_token(&token) {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!("Rejected access token on {}: {}", req.path(), e);
                let error = AppError::AuthError("Invalid access token".to_string());
                return Box::pin(async move { Err(error.into()) });
            }
        };

        let service = Rc::clone(&self.service);
        let user_service = self.user_service.clone();
        Box::pin(async move {
            user_service.sync_identity(&identity).await?;
            req.extensions_mut().insert(identity);
            service.call(req).await
        })
    }
}

/// Extractor for handlers that require an authenticated caller. Wrap it in
/// `Option` where authentication is optional.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .map(CurrentUser)
                .ok_or_else(|| AppError::AuthError("Missing access token".to_string())),
        )
    }
}

/// Identity of the caller, if the request carried a valid token.
pub fn get_current_identity(req: &HttpRequest) -> Option<Identity> {
    req.extensions().get::<Identity>().cloned()
}
