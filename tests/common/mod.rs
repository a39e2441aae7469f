//! Shared fixtures: in-memory store, scripted payment provider, signed requests.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};

pub use storefront_api::{
    config::AppConfig,
    models::Order,
    payments::{
        CheckoutLineItem, CheckoutSession, LineItem, PaymentError, PaymentProvider, sign_payload,
    },
    routes::create_api_router,
    state::AppState,
    store::{InsertOutcome, SqliteStore, Store, StoreError},
};

pub const WEBHOOK_SECRET: &str = "whsec_test_secret";
pub const ADMIN_PASSWORD: &str = "hunter2";

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 4242,
        stripe_secret_key: "sk_test_xxx".into(),
        stripe_webhook_secret: WEBHOOK_SECRET.into(),
        stripe_api_base: "http://127.0.0.1:12111".into(),
        admin_password: Some(ADMIN_PASSWORD.into()),
        public_base_url: "http://localhost:4242".into(),
        static_dir: "public".into(),
        line_items_timeout: Duration::from_millis(200),
    }
}

/// Payment provider double with scripted line items and call counters.
#[derive(Default)]
pub struct MockPayments {
    pub line_items: Mutex<HashMap<String, Vec<LineItem>>>,
    pub line_item_calls: AtomicUsize,
    pub created_sessions: Mutex<Vec<Vec<CheckoutLineItem>>>,
    pub fail_checkout: bool,
    pub fail_line_items: bool,
    pub line_items_delay: Option<Duration>,
}

impl MockPayments {
    pub fn with_line_items(session_id: &str, items: Vec<LineItem>) -> Self {
        let mock = Self::default();
        mock.line_items
            .lock()
            .unwrap()
            .insert(session_id.to_string(), items);
        mock
    }
}

#[async_trait]
impl PaymentProvider for MockPayments {
    async fn create_checkout_session(
        &self,
        items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, PaymentError> {
        if self.fail_checkout {
            return Err(PaymentError::Api("Invalid API Key provided".into()));
        }
        let mut created = self.created_sessions.lock().unwrap();
        created.push(items.to_vec());
        Ok(CheckoutSession {
            id: format!("cs_test_{}", created.len()),
        })
    }

    async fn list_line_items(&self, session_id: &str) -> Result<Vec<LineItem>, PaymentError> {
        self.line_item_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.line_items_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_line_items {
            return Err(PaymentError::Api("No such checkout session".into()));
        }
        Ok(self
            .line_items
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Store that fails every call, standing in for a broken disk.
pub struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn insert_order(&self, _order: &Order) -> Result<InsertOutcome, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    async fn get_order(&self, _id: &str) -> Result<Option<Order>, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    async fn insert_review(&self, _text: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    async fn list_reviews(&self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }

    async fn count_reviews(&self) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<SqliteStore>,
    pub payments: Arc<MockPayments>,
}

pub async fn test_app_with(payments: MockPayments, config: AppConfig) -> TestApp {
    let store = Arc::new(
        SqliteStore::open_in_memory()
            .await
            .expect("Failed to create in-memory store"),
    );
    let payments = Arc::new(payments);
    let state = AppState::new(store.clone(), payments.clone(), config);
    TestApp {
        router: create_api_router().with_state(state),
        store,
        payments,
    }
}

pub async fn test_app() -> TestApp {
    test_app_with(MockPayments::default(), test_config()).await
}

pub fn app_with_store(store: Arc<dyn Store>, payments: MockPayments) -> Router {
    let state = AppState::new(store, Arc::new(payments), test_config());
    create_api_router().with_state(state)
}

pub fn completed_event(session_id: &str, amount_total: i64, email: Option<&str>) -> String {
    json!({
        "id": "evt_test_1",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": session_id,
                "object": "checkout.session",
                "amount_total": amount_total,
                "currency": "usd",
                "customer_details": { "email": email },
                "payment_status": "paid"
            }
        }
    })
    .to_string()
}

pub fn signed_webhook(body: &str, secret: &str) -> Request<Body> {
    let header = sign_payload(body.as_bytes(), secret, chrono::Utc::now().timestamp())
        .expect("HMAC accepts any key");
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("stripe-signature", header)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub fn order(id: &str, date: &str) -> Order {
    Order {
        id: id.into(),
        email: "buyer@example.com".into(),
        items: "1 x Ferris Mug".into(),
        total: 12.0,
        date: date.into(),
    }
}
