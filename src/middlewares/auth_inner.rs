//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::errors::{AppError, AppResult};
use crate::domain::auth::{AuthMode, AuthenticatedUser, HeaderPrincipalResolver, PrincipalResolver};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            let outcome = resolve_principal(&req);

            let rejection = match (mode, outcome) {
                (_, Err(err)) => {
                    log::warn!("인증 실패: {}", err);
                    Some(err)
                }
                (AuthMode::Required, Ok(None)) => {
                    Some(AppError::AuthenticationError("Não autenticado".to_string()))
                }
                (_, Ok(Some(user))) => {
                    // 사용자 정보를 Request Extensions에 저장
                    req.extensions_mut().insert(user);
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    None
                }
                (AuthMode::Optional, Ok(None)) => {
                    log::debug!("선택적 인증: 주체 없음, 요청 진행");
                    None
                }
            };

            if let Some(err) = rejection {
                let response = err.error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 등록된 resolver(없으면 헤더 resolver)로 요청 주체를 확인
fn resolve_principal(req: &ServiceRequest) -> AppResult<Option<AuthenticatedUser>> {
    match req.app_data::<web::Data<dyn PrincipalResolver>>() {
        Some(resolver) => resolver.resolve(req.headers()),
        None => HeaderPrincipalResolver.resolve(req.headers()),
    }
}
