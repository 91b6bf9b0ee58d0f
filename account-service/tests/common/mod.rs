pub mod db;

use std::sync::Arc;
use std::time::Duration;

use account_service::domain::user::models::Balance;
use account_service::domain::user::models::DisplayName;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::ports::CredentialStore;
use account_service::domain::user::service::AuthSettings;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::catalog::StaticHomeCatalog;
use account_service::outbound::repositories::InMemoryCredentialStore;
use account_service::user::phone::PhoneNumber;
use auth::Authenticator;
use auth::PinHasher;
use auth::SharedClock;
use chrono::Utc;
use mockable::DefaultClock;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub store: Arc<InMemoryCredentialStore>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock: SharedClock = Arc::new(DefaultClock);
        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            chrono::Duration::hours(24),
            Arc::clone(&clock),
        ));
        let store = Arc::new(InMemoryCredentialStore::new());

        let user_service = Arc::new(UserService::new(
            Arc::clone(&store),
            Arc::new(StaticHomeCatalog::new()),
            Arc::clone(&authenticator),
            AuthSettings {
                default_balance: Balance::default(),
            },
            clock,
        ));

        let router = create_router(
            user_service,
            Arc::clone(&authenticator),
            Duration::from_secs(10),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            store,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register through the API and return the issued token
    pub async fn register(&self, name: &str, phone: &str, pin: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({ "name": name, "phone": phone, "pin": pin }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Insert an account directly into the store, bypassing registration
    pub async fn seed_user(&self, name: &str, phone: &str, pin: &str, is_active: bool) -> User {
        let user = User {
            id: UserId::new(),
            name: DisplayName::new(name).unwrap(),
            phone: PhoneNumber::parse(phone).unwrap(),
            pin_hash: PinHasher::new().hash(pin).unwrap(),
            balance: Balance::new(500).unwrap(),
            is_active,
            created_at: Utc::now(),
        };

        self.store.create(user).await.expect("Failed to seed user")
    }
}
