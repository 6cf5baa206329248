use std::{net::SocketAddr, time::Duration};

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::ConnectInfo,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use test_utils::{builder::TestBuilder, context::TestContext, fixture::site, upstream};
use tower::ServiceExt;

use crate::server::{config::Config, startup::build_app};


/// Gateway configuration pointing at the test context's volumes and stub upstream.
fn config_for(test: &TestContext) -> Config {
    let mut config = Config::from_lookup(|_| None).unwrap();
    config.static_dir = test.static_dir.clone();
    config.media_dir = test.media_dir.clone();
    config.docs_root = test.docs_root.clone();
    if test.upstream.is_some() {
        config.backend_url = test.upstream_url().parse().unwrap();
    }
    config
}

fn app_for(test: &TestContext) -> Router {
    build_app(&config_for(test)).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body)
}

fn json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap()
}
