use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use folio_core_contact_contracts::ContactService;
use folio_di::Build;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact> {
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Origins allowed to call the api from a browser. Empty disables CORS.
    pub allowed_origins: Arc<[HeaderValue]>,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, self.router()).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new().merge(routes::contact::router(self.contact.into()));

        let router = middlewares::cors::add(router, &self.config.allowed_origins);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::panic_handler::add(router)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use folio_core_contact_contracts::MockContactService;
    use tower::ServiceExt;

    use super::*;

    fn sut(contact: MockContactService, allowed_origins: &[&'static str]) -> Router<()> {
        RestServer {
            contact,
            config: RestServerConfig {
                addr: ([127, 0, 0, 1], 0).into(),
                allowed_origins: allowed_origins
                    .iter()
                    .map(|&origin| HeaderValue::from_static(origin))
                    .collect(),
            },
        }
        .router()
    }

    #[tokio::test]
    async fn request_id_header() {
        let response = sut(MockContactService::new(), &[])
            .oneshot(Request::get("/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("X-Request-Id"));
    }

    #[tokio::test]
    async fn cors_preflight_allowed_origin() {
        let response = sut(MockContactService::new(), &["https://portfolio.example"])
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/contact")
                    .header(header::ORIGIN, "https://portfolio.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "https://portfolio.example"
        );
    }

    #[tokio::test]
    async fn cors_preflight_unknown_origin() {
        let response = sut(MockContactService::new(), &["https://portfolio.example"])
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/contact")
                    .header(header::ORIGIN, "https://evil.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(!response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn panic_handler() {
        let mut contact = MockContactService::new();
        contact
            .expect_send_message()
            .once()
            .returning(|_| panic!("request handler exploded"));

        let response = sut(contact, &[])
            .oneshot(
                Request::post("/api/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
