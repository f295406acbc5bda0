//! Client seam between the form UI and the item HTTP API.

use inventory_core::{Item, ItemId, ItemInput};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ClientResult<T> = Result<T, ClientError>;

/// Failure talking to the item API.
#[derive(Debug)]
pub enum ClientError {
    /// Connection, timeout, or decode failure.
    Transport(reqwest::Error),
    /// Server answered with a non-success status.
    Status { code: u16, detail: String },
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Status { code, detail } => write!(f, "{code}: {detail}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// The six item endpoints, as seen by the UI.
pub trait InventoryApi {
    fn list_items(&self) -> ClientResult<Vec<Item>>;
    fn get_item(&self, id: ItemId) -> ClientResult<Item>;
    fn search_items(&self, name: &str) -> ClientResult<Vec<Item>>;
    fn create_item(&self, input: &ItemInput) -> ClientResult<Item>;
    fn update_item(&self, id: ItemId, input: &ItemInput) -> ClientResult<Item>;
    fn delete_item(&self, id: ItemId) -> ClientResult<Item>;
}

/// `reqwest` implementation of [`InventoryApi`].
pub struct HttpInventoryApi {
    base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl HttpInventoryApi {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl InventoryApi for HttpInventoryApi {
    fn list_items(&self) -> ClientResult<Vec<Item>> {
        decode(self.client.get(self.url("/items/")).send()?)
    }

    fn get_item(&self, id: ItemId) -> ClientResult<Item> {
        decode(self.client.get(self.url(&format!("/items/{id}"))).send()?)
    }

    fn search_items(&self, name: &str) -> ClientResult<Vec<Item>> {
        decode(
            self.client
                .get(self.url("/search/"))
                .query(&[("name", name)])
                .send()?,
        )
    }

    fn create_item(&self, input: &ItemInput) -> ClientResult<Item> {
        decode(self.client.post(self.url("/items/")).json(input).send()?)
    }

    fn update_item(&self, id: ItemId, input: &ItemInput) -> ClientResult<Item> {
        decode(
            self.client
                .put(self.url(&format!("/items/{id}")))
                .json(input)
                .send()?,
        )
    }

    fn delete_item(&self, id: ItemId) -> ClientResult<Item> {
        decode(self.client.delete(self.url(&format!("/items/{id}"))).send()?)
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }

    let detail = match response.json::<ErrorBody>() {
        Ok(ErrorBody {
            detail: serde_json::Value::String(text),
        }) => text,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ClientError::Status {
        code: status.as_u16(),
        detail,
    })
}
