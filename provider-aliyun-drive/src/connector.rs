//! Aliyun Drive API connector implementation
//!
//! Implements the [`DriveApi`] trait over an injected [`HttpClient`].

use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpRequest};
use core_runtime::config::DEFAULT_REQUEST_TIMEOUT;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::api::{ApiTable, Operation};
use crate::error::{AliyunDriveError, Result};
use crate::types::{
    DriveContext, DriveInfo, EmptyRequest, GetFileByPathRequest, ListFilesRequest, Page,
    PageCursor, ResolvedFolder, SpaceInfo, SpaceInfoResponse,
};

/// Remote operations the resolver and walker depend on
///
/// Every method performs exactly one request. A non-200 status is returned as
/// [`AliyunDriveError::ApiError`] carrying the raw body, a transport failure as
/// [`AliyunDriveError::NetworkError`], and a 200 with an unexpected body as
/// [`AliyunDriveError::ParseError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriveApi: Send + Sync {
    /// Drive ids of the account owning `access_token`
    async fn get_drive_info(&self, access_token: &str) -> Result<DriveInfo>;

    /// Personal space usage of the account owning `access_token`
    async fn get_space_info(&self, access_token: &str) -> Result<SpaceInfo>;

    /// Look up a node by absolute path
    async fn get_file_by_path(
        &self,
        context: &DriveContext,
        file_path: &str,
    ) -> Result<ResolvedFolder>;

    /// Fetch one page of `parent_file_id`'s children starting at `marker`
    async fn list_files(
        &self,
        context: &DriveContext,
        parent_file_id: &str,
        limit: u32,
        marker: &PageCursor,
    ) -> Result<Page>;
}

/// Aliyun Drive Open API connector
///
/// # Example
///
/// ```ignore
/// use provider_aliyun_drive::{AliyunDriveConnector, ApiTable, DriveApi, DriveContext, PageCursor};
///
/// let connector = AliyunDriveConnector::new(http_client, ApiTable::default());
/// let context = DriveContext::new("902823001", token);
/// let page = connector.list_files(&context, "root", 100, &PageCursor::first()).await?;
/// ```
pub struct AliyunDriveConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Endpoint table
    api: ApiTable,

    /// Timeout attached to every request
    request_timeout: Duration,
}

impl AliyunDriveConnector {
    pub fn new(http_client: Arc<dyn HttpClient>, api: ApiTable) -> Self {
        Self {
            http_client,
            api,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// POST `body` to `operation` and decode a 200 response as `T`
    async fn post_json<B, T>(&self, operation: Operation, access_token: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let endpoint = self.api.endpoint(operation);
        let request = HttpRequest::new(endpoint.method, endpoint.url)
            .bearer_token(access_token)
            .timeout(self.request_timeout)
            .json(body)?;

        let response = self.http_client.execute(request).await.map_err(|e| {
            warn!(operation = operation.name(), error = %e, "API request failed to complete");
            AliyunDriveError::NetworkError(e.to_string())
        })?;

        if response.status != 200 {
            let message = String::from_utf8_lossy(&response.body).to_string();
            warn!(
                operation = operation.name(),
                status = response.status,
                body = %message,
                "API request failed"
            );
            return Err(AliyunDriveError::ApiError {
                status_code: response.status,
                message,
            });
        }

        debug!(operation = operation.name(), bytes = response.body.len(), "API request succeeded");

        serde_json::from_slice(&response.body).map_err(|e| {
            AliyunDriveError::ParseError(format!(
                "Failed to parse {} response: {}",
                operation.name(),
                e
            ))
        })
    }
}

#[async_trait]
impl DriveApi for AliyunDriveConnector {
    #[instrument(skip(self, access_token))]
    async fn get_drive_info(&self, access_token: &str) -> Result<DriveInfo> {
        self.post_json(Operation::GetDriveInfo, access_token, &EmptyRequest {})
            .await
    }

    #[instrument(skip(self, access_token))]
    async fn get_space_info(&self, access_token: &str) -> Result<SpaceInfo> {
        let response: SpaceInfoResponse = self
            .post_json(Operation::GetSpaceInfo, access_token, &EmptyRequest {})
            .await?;
        Ok(response.personal_space_info)
    }

    #[instrument(skip(self, context), fields(drive_id = %context.drive_id))]
    async fn get_file_by_path(
        &self,
        context: &DriveContext,
        file_path: &str,
    ) -> Result<ResolvedFolder> {
        let body = GetFileByPathRequest {
            drive_id: &context.drive_id,
            file_path,
        };
        self.post_json(Operation::GetFileByPath, &context.access_token, &body)
            .await
    }

    #[instrument(skip(self, context, marker), fields(drive_id = %context.drive_id, marker = %marker))]
    async fn list_files(
        &self,
        context: &DriveContext,
        parent_file_id: &str,
        limit: u32,
        marker: &PageCursor,
    ) -> Result<Page> {
        let body = ListFilesRequest {
            drive_id: &context.drive_id,
            parent_file_id,
            limit,
            marker: marker.as_str(),
        };
        self.post_json(Operation::ListFiles, &context.access_token, &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileEntry, FileKind};
    use bridge_traits::error::BridgeError;
    use bridge_traits::http::{HttpMethod, HttpResponse};
    use mockall::mock;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> bridge_traits::error::Result<HttpResponse>;
        }
    }

    fn context() -> DriveContext {
        DriveContext::new("902823001", "test_token")
    }

    fn connector(mock_http: MockHttpClient) -> AliyunDriveConnector {
        AliyunDriveConnector::new(Arc::new(mock_http), ApiTable::default())
    }

    #[tokio::test]
    async fn test_list_files_request_shape() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(
                req.url,
                "https://open.aliyundrive.com/adrive/v1.0/openFile/list"
            );
            assert_eq!(
                req.headers.get("Authorization"),
                Some(&"Bearer test_token".to_string())
            );
            assert_eq!(
                req.headers.get("Content-Type"),
                Some(&"application/json".to_string())
            );
            assert_eq!(req.timeout, Some(DEFAULT_REQUEST_TIMEOUT));

            let body: serde_json::Value = req.json_body().unwrap();
            assert_eq!(
                body,
                serde_json::json!({
                    "drive_id": "902823001",
                    "parent_file_id": "F0",
                    "limit": 100,
                    "marker": "m1"
                })
            );

            Ok(HttpResponse::new(
                200,
                r#"{
                    "items": [
                        { "name": "n2.txt", "file_id": "f2", "type": "file" }
                    ],
                    "next_marker": ""
                }"#,
            ))
        });

        let page = connector(mock_http)
            .list_files(&context(), "F0", 100, &PageCursor::new("m1"))
            .await
            .unwrap();

        assert_eq!(page.items, vec![FileEntry::file("n2.txt", "f2")]);
        assert!(page.next_marker.is_end());
    }

    #[tokio::test]
    async fn test_list_files_server_error() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse::new(
                500,
                r#"{"code":"InternalError","message":"busy"}"#,
            ))
        });

        let result = connector(mock_http)
            .list_files(&context(), "F0", 100, &PageCursor::first())
            .await;

        match result {
            Err(AliyunDriveError::ApiError {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 500);
                assert!(message.contains("InternalError"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_network_error() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::Timeout("30s elapsed".to_string())));

        let result = connector(mock_http)
            .list_files(&context(), "F0", 100, &PageCursor::first())
            .await;

        assert!(matches!(result, Err(AliyunDriveError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"items": []}"#)));

        let result = connector(mock_http)
            .list_files(&context(), "F0", 100, &PageCursor::first())
            .await;

        match result {
            Err(AliyunDriveError::ParseError(msg)) => assert!(msg.contains("list_files")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_file_by_path_success() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/openFile/get_by_path"));
            let body: serde_json::Value = req.json_body().unwrap();
            assert_eq!(body["file_path"], "/apps/obsidian/Brain Vault/");
            assert_eq!(body["drive_id"], "902823001");

            Ok(HttpResponse::new(
                200,
                r#"{ "file_id": "F0", "name": "Brain Vault", "type": "folder", "size": 0 }"#,
            ))
        });

        let folder = connector(mock_http)
            .get_file_by_path(&context(), "/apps/obsidian/Brain Vault/")
            .await
            .unwrap();

        assert_eq!(folder.file_id, "F0");
        assert_eq!(folder.name, "Brain Vault");
        assert_eq!(folder.kind, FileKind::Folder);
    }

    #[tokio::test]
    async fn test_get_drive_info_uses_token_only() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert!(req.url.ends_with("/user/getDriveInfo"));
            assert_eq!(
                req.headers.get("Authorization"),
                Some(&"Bearer account_token".to_string())
            );
            let body: serde_json::Value = req.json_body().unwrap();
            assert_eq!(body, serde_json::json!({}));

            Ok(HttpResponse::new(
                200,
                r#"{
                    "user_id": "u1",
                    "default_drive_id": "902823001",
                    "resource_drive_id": "902823002",
                    "backup_drive_id": "902823003"
                }"#,
            ))
        });

        let info = connector(mock_http)
            .get_drive_info("account_token")
            .await
            .unwrap();

        assert_eq!(info.default_drive_id, "902823001");
        assert_eq!(info.resource_drive_id.as_deref(), Some("902823002"));
        assert_eq!(info.backup_drive_id.as_deref(), Some("902823003"));
    }

    #[tokio::test]
    async fn test_get_drive_info_unauthorized() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse::new(
                401,
                r#"{"code":"AccessTokenInvalid"}"#,
            ))
        });

        let result = connector(mock_http).get_drive_info("expired").await;

        assert!(matches!(
            result,
            Err(AliyunDriveError::ApiError {
                status_code: 401,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_get_space_info() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|_| {
            Ok(HttpResponse::new(
                200,
                r#"{ "personal_space_info": { "total_size": 107374182400, "used_size": 1073741824 } }"#,
            ))
        });

        let space = connector(mock_http).get_space_info("t").await.unwrap();

        assert_eq!(space.total_size, 107_374_182_400);
        assert_eq!(space.used_size, 1_073_741_824);
    }

    #[tokio::test]
    async fn test_custom_timeout_applied() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.timeout, Some(Duration::from_secs(5)));
            Ok(HttpResponse::new(200, r#"{ "default_drive_id": "1" }"#))
        });

        let connector = connector(mock_http).with_timeout(Duration::from_secs(5));
        connector.get_drive_info("t").await.unwrap();
    }
}
