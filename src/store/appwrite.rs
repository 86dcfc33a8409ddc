use ::anyhow::Context;
use ::reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use ::serde_json::{json, Value};

use super::{
    interface, parse_timestamp, Document, DocumentList, Fields, Query,
    StoreError,
};

/// Appwrite caps unbounded list calls at 25 documents; ask for more when
/// the caller did not bound the query.
const UNBOUNDED_LIMIT: u64 = 5000;

/// Connection details shared by the document and account providers.
#[derive(Clone)]
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
}

impl AppwriteClient {
    pub fn new(config: &crate::config::Config) -> ::anyhow::Result<Self> {
        let endpoint = ::url::Url::parse(&config.appwrite_endpoint)
            .context("APPWRITE_ENDPOINT is not a valid URL")?;

        if config.appwrite_api_key.is_none() {
            ::log::warn!(
                "APPWRITE_API_KEY is not set; writes depend on collection permissions"
            );
        }

        Ok(Self {
            client: Client::new(),
            endpoint: endpoint.as_str().trim_end_matches('/').to_string(),
            project_id: config.appwrite_project_id.clone(),
            api_key: config.appwrite_api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.endpoint, path))
            .header("X-Appwrite-Project", &self.project_id);

        match &self.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    /// A request authenticated as the end user instead of the server key.
    pub fn request_as_user(
        &self,
        method: Method,
        path: &str,
        jwt: &str,
    ) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.endpoint, path))
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-JWT", jwt)
    }
}

pub(crate) async fn check_status(
    response: Response,
) -> Result<Response, StoreError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(StoreError::NotFound),
        StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => {
            Err(StoreError::Conflict)
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::Other(::anyhow::anyhow!(
                "appwrite returned {}: {}",
                status,
                body
            )))
        }
    }
}

pub(crate) fn document_from_json(value: Value) -> Result<Document, StoreError> {
    let Value::Object(mut object) = value else {
        return Err(StoreError::Other(::anyhow::anyhow!(
            "expected document object"
        )));
    };

    let id = object
        .get("$id")
        .and_then(Value::as_str)
        .context("document without $id")?
        .to_string();

    let created_at = object
        .get("$createdAt")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .context("document without $createdAt")?;

    let updated_at_raw = object
        .get("$updatedAt")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let updated_at = parse_timestamp(&updated_at_raw).unwrap_or(created_at);

    object.retain(|key, _| !key.starts_with('$'));

    Ok(Document {
        id,
        created_at,
        updated_at,
        revision: updated_at_raw,
        data: object,
    })
}

pub(crate) fn query_to_json(query: &Query) -> String {
    let value = match query {
        Query::Equal(field, value) => {
            json!({"method": "equal", "attribute": field, "values": [value]})
        }
        Query::NotEqual(field, value) => {
            json!({"method": "notEqual", "attribute": field, "values": [value]})
        }
        Query::Search(field, term) => {
            json!({"method": "search", "attribute": field, "values": [term]})
        }
        Query::OrderAsc(field) => {
            json!({"method": "orderAsc", "attribute": field})
        }
        Query::OrderDesc(field) => {
            json!({"method": "orderDesc", "attribute": field})
        }
        Query::Limit(limit) => json!({"method": "limit", "values": [limit]}),
        Query::Offset(offset) => {
            json!({"method": "offset", "values": [offset]})
        }
    };

    value.to_string()
}

pub struct AppwriteStore {
    client: AppwriteClient,
    database_id: String,
}

impl AppwriteStore {
    pub fn new(config: &crate::config::Config) -> ::anyhow::Result<Self> {
        Ok(Self {
            client: AppwriteClient::new(config)?,
            database_id: config.database_id.clone(),
        })
    }

    fn documents_path(&self, collection: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, collection
        )
    }
}

#[async_trait::async_trait]
impl interface::DocumentStore for AppwriteStore {
    async fn create_document(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let response = self
            .client
            .request(Method::POST, &self.documents_path(collection))
            .json(&json!({
                "documentId": id.unwrap_or("unique()"),
                "data": data,
            }))
            .send()
            .await?;

        let body = check_status(response).await?.json::<Value>().await?;

        document_from_json(body)
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Document, StoreError> {
        let path = format!("{}/{}", self.documents_path(collection), id);
        let response = self.client.request(Method::GET, &path).send().await?;
        let body = check_status(response).await?.json::<Value>().await?;

        document_from_json(body)
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList, StoreError> {
        let mut params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query_to_json(query)))
            .collect();

        if !queries.iter().any(|query| matches!(query, Query::Limit(_))) {
            params.push(("queries[]", query_to_json(&Query::Limit(UNBOUNDED_LIMIT))));
        }

        let response = self
            .client
            .request(Method::GET, &self.documents_path(collection))
            .query(&params)
            .send()
            .await?;

        let body = check_status(response).await?.json::<Value>().await?;

        let total = body.get("total").and_then(Value::as_u64).unwrap_or(0);

        let documents = match body.get("documents") {
            Some(Value::Array(items)) => items
                .iter()
                .cloned()
                .map(document_from_json)
                .collect::<Result<Vec<_>, _>>()?,
            _ => vec![],
        };

        Ok(DocumentList { total, documents })
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Fields,
        expected_revision: Option<&str>,
    ) -> Result<Document, StoreError> {
        // Appwrite has no conditional write; compare $updatedAt first. The
        // window between the two calls is not covered.
        if let Some(expected) = expected_revision {
            let current = self.get_document(collection, id).await?;
            if current.revision != expected {
                return Err(StoreError::Conflict);
            }
        }

        let path = format!("{}/{}", self.documents_path(collection), id);
        let response = self
            .client
            .request(Method::PATCH, &path)
            .json(&json!({ "data": data }))
            .send()
            .await?;

        let body = check_status(response).await?.json::<Value>().await?;

        document_from_json(body)
    }

    async fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        let path = format!("{}/{}", self.documents_path(collection), id);
        let response = self.client.request(Method::DELETE, &path).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn create_file(
        &self,
        bucket: &str,
        filename: &str,
        bytes: ::bytes::Bytes,
    ) -> Result<String, StoreError> {
        let part = ::reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name(filename.to_string());

        let form = ::reqwest::multipart::Form::new()
            .text("fileId", "unique()")
            .part("file", part);

        let response = self
            .client
            .request(Method::POST, &format!("/storage/buckets/{}/files", bucket))
            .multipart(form)
            .send()
            .await?;

        let body = check_status(response).await?.json::<Value>().await?;

        Ok(body
            .get("$id")
            .and_then(Value::as_str)
            .context("file response without $id")?
            .to_string())
    }

    async fn delete_file(
        &self,
        bucket: &str,
        file_id: &str,
    ) -> Result<(), StoreError> {
        let path = format!("/storage/buckets/{}/files/{}", bucket, file_id);
        let response = self.client.request(Method::DELETE, &path).send().await?;
        check_status(response).await?;
        Ok(())
    }

    fn file_view_url(&self, bucket: &str, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.client.endpoint(),
            bucket,
            file_id,
            self.client.project_id()
        )
    }
}
