//! HTTP/JSON implementation of the phonebook remote store.

use phonebook_core::{Contact, ContactForm, ContactId, Error, RemoteStore};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Mock API collection the phonebook talks to by default.
pub const DEFAULT_BASE_URL: &str = "https://65a4e05752f07a8b4a3dd9b7.mockapi.io/crudd";

/// Remote store backed by a REST collection endpoint.
///
/// `GET base` lists, `POST base` creates, and `GET`/`PUT`/`DELETE base/{id}`
/// address single records.
pub struct HttpStore {
    base_url: Url,
    client: Client,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Validation(format!("invalid base url {}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Validation(format!(
                "base url cannot have path segments: {}",
                base_url
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("failed to build http client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn record_url(&self, id: &ContactId) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new(), so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id.as_str());
        }
        url
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, Error> {
        let rsp = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Http(format!("sending {} request: {}", what, e)))?;

        let status = rsp.status();
        debug!(%status, what, "store responded");

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(what.to_string()));
        }
        rsp.error_for_status()
            .map_err(|e| Error::Http(format!("invalid {} response: {}", what, e)))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, Error> {
        self.send(request, what)
            .await?
            .json::<T>()
            .await
            .map_err(|e| Error::Decode(format!("{} response: {}", what, e)))
    }
}

#[async_trait::async_trait(?Send)]
impl RemoteStore for HttpStore {
    async fn list(&self) -> Result<Vec<Contact>, Error> {
        let url = self.base_url.clone();
        debug!(%url, "GET");
        self.send_json(self.client.get(url), "list").await
    }

    async fn get(&self, id: &ContactId) -> Result<Contact, Error> {
        let url = self.record_url(id);
        debug!(%url, "GET");
        self.send_json(self.client.get(url), &format!("contact {}", id))
            .await
    }

    async fn create(&self, form: &ContactForm) -> Result<Contact, Error> {
        let url = self.base_url.clone();
        debug!(%url, "POST");
        self.send_json(self.client.post(url).json(form), "create")
            .await
    }

    async fn update(&self, id: &ContactId, form: &ContactForm) -> Result<Contact, Error> {
        let url = self.record_url(id);
        debug!(%url, "PUT");
        self.send_json(self.client.put(url).json(form), &format!("contact {}", id))
            .await
    }

    async fn delete(&self, id: &ContactId) -> Result<(), Error> {
        let url = self.record_url(id);
        debug!(%url, "DELETE");
        self.send(self.client.delete(url), &format!("contact {}", id))
            .await?;
        Ok(())
    }
}
