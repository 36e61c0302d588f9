//! Shared harness for HTTP integration tests over the in-memory store.

use std::sync::{Arc, Mutex};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use actix_web::{App, web};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;
use shareit::domain::{
    BookingServiceImpl, DecisionPolicy, ItemRequestServiceImpl, ItemServiceImpl, ItemStores,
    UserServiceImpl,
};
use shareit::inbound::http::identity::SHARER_USER_ID_HEADER;
use shareit::inbound::http::state::HttpState;
use shareit::outbound::memory::InMemoryStore;

/// Clock that tests move forward explicitly.
pub struct TestClock(Mutex<DateTime<Utc>>);

impl TestClock {
    /// Clock frozen at 2026-04-01T10:00:00Z.
    pub fn at_reference() -> Self {
        let instant = Utc
            .with_ymd_and_hms(2026, 4, 1, 10, 0, 0)
            .single()
            .expect("reference instant");
        Self(Mutex::new(instant))
    }

    pub fn advance(&self, delta: Duration) {
        *self.0.lock().expect("clock lock") += delta;
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

/// Services composed over one shared in-memory store.
pub struct Harness {
    pub clock: Arc<TestClock>,
    pub state: web::Data<HttpState>,
}

impl Harness {
    pub fn new(policy: DecisionPolicy) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let clock = Arc::new(TestClock::at_reference());
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        let users = Arc::new(UserServiceImpl::new(Arc::clone(&store)));
        let bookings = Arc::new(
            BookingServiceImpl::new(
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&store),
                Arc::clone(&dyn_clock),
            )
            .with_policy(policy),
        );
        let requests = Arc::new(ItemRequestServiceImpl::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&dyn_clock),
        ));
        let items = Arc::new(ItemServiceImpl::new(
            ItemStores {
                users: Arc::clone(&store),
                items: Arc::clone(&store),
                bookings: Arc::clone(&store),
                comments: Arc::clone(&store),
                requests: Arc::clone(&store),
            },
            dyn_clock,
        ));
        let state = web::Data::new(HttpState::new(users, items, bookings, requests));
        Self { clock, state }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    pub async fn service(
        &self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        actix_test::init_service(
            App::new()
                .app_data(self.state.clone())
                .configure(shareit::inbound::http::configure),
        )
        .await
    }
}

/// Issue a request and return the status code with the parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send<S>(app: &S, req: actix_test::TestRequest) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status().as_u16();
    let bytes = actix_test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// Attach the caller identity header.
pub fn as_user(req: actix_test::TestRequest, user_id: &str) -> actix_test::TestRequest {
    req.insert_header((SHARER_USER_ID_HEADER, user_id.to_owned()))
}

/// Read a string field out of a JSON body.
pub fn field(body: &Value, name: &str) -> String {
    body.get(name)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field {name} in {body}"))
        .to_owned()
}
