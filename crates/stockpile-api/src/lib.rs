// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use stockpile_app::{Item, ItemId};
use tracing::{debug, warn};
use url::Url;

pub const API_PREFIX: &str = "/inventoryapi";

/// Blocking client for the inventory REST service rooted at
/// `{base_url}/inventoryapi`.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    endpoint: String,
    timeout: Option<Duration>,
    http: HttpClient,
}

impl Client {
    /// Without a timeout the transport default applies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url {base_url:?} must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;

        Ok(Self {
            endpoint: format!("{base_url}{API_PREFIX}"),
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn list_all(&self) -> Result<Vec<Item>> {
        let response = self.send(Method::GET, "/all", |request| request)?;
        response.json().context("decode inventory list")
    }

    pub fn get(&self, id: ItemId) -> Result<Item> {
        let response = self.send(Method::GET, &format!("/get/{id}"), |request| request)?;
        response
            .json()
            .with_context(|| format!("decode item {id}"))
    }

    pub fn add(&self, item: &Item) -> Result<()> {
        self.send(Method::POST, "/add", |request| request.json(item))?;
        Ok(())
    }

    pub fn update(&self, item: &Item) -> Result<()> {
        self.send(Method::PUT, "/update", |request| request.json(item))?;
        Ok(())
    }

    /// Returns the server's confirmation message.
    pub fn delete(&self, id: ItemId) -> Result<String> {
        let response = self.send(Method::DELETE, &format!("/delete/{id}"), |request| request)?;
        let body = response
            .text()
            .with_context(|| format!("read delete response for item {id}"))?;
        Ok(confirmation_text(&body))
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response> {
        let url = format!("{}{path}", self.endpoint);
        debug!(%method, %url, "inventory request");

        let response = build(self.http.request(method.clone(), &url))
            .send()
            .map_err(|error| {
                warn!(%method, %url, %error, "inventory request failed");
                connection_error(&self.base_url, error)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%method, %url, status = status.as_u16(), "inventory request rejected");
            return Err(clean_error_response(status, &body))
                .with_context(|| format!("{method} {path}"));
        }
        Ok(response)
    }
}

/// A JSON string body is unwrapped; anything else is shown as trimmed text.
fn confirmation_text(body: &str) -> String {
    match serde_json::from_str::<String>(body) {
        Ok(text) => text,
        Err(_) => body.trim().to_owned(),
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach inventory service at {} -- check [api].base_url and that the server is running ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(message) = parsed.message.or(parsed.error)
        && !message.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), message);
    }

    if body.len() < 100 && !body.contains('{') && !body.trim().is_empty() {
        return anyhow!("server error ({}): {}", status.as_u16(), body.trim());
    }

    anyhow!("server returned {}", status.as_u16())
}

/// Spring-style error body: `{"status":404,"error":"Not Found","message":"..."}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
}
