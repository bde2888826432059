//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for router-level tests:
//! - An in-memory store seeded with users, settings and privileges
//! - A question with one answer carrying votes
//! - JWT token generation
//! - Request helpers driving the router through `tower::Service`

#![allow(dead_code)]

use askbase_api::app::{build_router, AppState};
use askbase_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig, DEFAULT_LOGIN_PATH};
use askbase_shared::auth::jwt::{create_token, Claims};
use askbase_shared::models::{answer::Answer, question::Question, user::User, vote::VoteType};
use askbase_shared::render::{AnswerScrubber, MarkdownRenderer};
use askbase_shared::store::memory::MemoryStore;
use askbase_shared::store::{AnswerRepository, UserRepository};
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// A body long enough to pass validation
pub const VALID_BODY: &str = "This answer is definitely longer than thirty characters.";

/// Reputation the seeded answer's votes are worth: 3 × 10 + 1 × -2
pub const ANSWER_VOTE_REP: i64 = 28;

/// Response parts the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn flash_kind(&self) -> Option<&str> {
        self.json["flash"]["kind"].as_str()
    }

    pub fn flash_message(&self) -> Option<&str> {
        self.json["flash"]["message"].as_str()
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: axum::Router,
    pub config: Config,

    /// Asked the seeded question
    pub asker: User,

    /// Wrote the seeded answer
    pub author: User,

    /// Has both Edit and Delete by reputation
    pub moderator: User,

    /// Site administrator with minimal reputation
    pub admin: User,

    /// Below every threshold
    pub newcomer: User,

    pub question: Question,
    pub answer: Answer,
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
    }
}

impl TestContext {
    /// Creates a new test context with a freshly seeded store
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());

        store.set_setting("AnswerUpVoteRep", "10").await;
        store.set_setting("AnswerDownVoteRep", "-2").await;
        store.set_privilege("Edit", 1000).await;
        store.set_privilege("Delete", 2000).await;

        let asker = store.add_user("asker", 1, false).await;
        let author = store.add_user("author", 500, false).await;
        let moderator = store.add_user("moderator", 2500, false).await;
        let admin = store.add_user("admin", 1, true).await;
        let newcomer = store.add_user("newcomer", 10, false).await;

        let question = store
            .add_question("How do I share state between tokio tasks?", "rust tokio", asker.id)
            .await;
        let answer = store.add_answer(question.id, author.id, VALID_BODY).await;

        store.add_votes(answer.id, VoteType::Up, 3).await;
        store.add_votes(answer.id, VoteType::Down, 1).await;

        let config = test_config();
        let state = AppState::new(
            store.clone(),
            MarkdownRenderer::new(),
            AnswerScrubber::new(),
            config.clone(),
        );
        let app = build_router(state);

        TestContext {
            store,
            app,
            config,
            asker,
            author,
            moderator,
            admin,
            newcomer,
            question,
            answer,
        }
    }

    /// Signs a token for the given user
    pub fn token_for(&self, user: &User) -> String {
        create_token(&Claims::new(user.id), JWT_SECRET).unwrap()
    }

    /// Sends a request, optionally authenticated and with a JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            json,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        self.send(Method::POST, uri, token, body).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn reputation_of(&self, user: &User) -> i64 {
        self.store.find_user(user.id).await.unwrap().unwrap().reputation
    }

    pub async fn reload_answer(&self) -> Answer {
        self.store.find_answer(self.answer.id).await.unwrap().unwrap()
    }
}

/// Path of the seeded question's page
pub fn question_page(ctx: &TestContext) -> String {
    format!("/questions/{}", ctx.question.id)
}
