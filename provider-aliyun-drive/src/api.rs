//! Endpoint table for the Aliyun Drive Open API
//!
//! Each logical operation maps to a fixed `{method, path}` pair; the host part
//! comes from configuration so tests and proxies can point elsewhere.

use bridge_traits::http::HttpMethod;
use core_runtime::config::DEFAULT_API_BASE;

/// Remote operations used by the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Account drive ids (default/resource/backup)
    GetDriveInfo,
    /// Personal space usage
    GetSpaceInfo,
    /// Look up a file or folder by absolute path
    GetFileByPath,
    /// One page of a folder's children
    ListFiles,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::GetDriveInfo,
        Operation::GetSpaceInfo,
        Operation::GetFileByPath,
        Operation::ListFiles,
    ];

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::GetDriveInfo => "get_drive_info",
            Operation::GetSpaceInfo => "get_space_info",
            Operation::GetFileByPath => "get_file_by_path",
            Operation::ListFiles => "list_files",
        }
    }

    pub fn method(&self) -> HttpMethod {
        // Every open API call we make is a JSON POST
        HttpMethod::Post
    }

    pub fn path(&self) -> &'static str {
        match self {
            Operation::GetDriveInfo => "/adrive/v1.0/user/getDriveInfo",
            Operation::GetSpaceInfo => "/adrive/v1.0/user/getSpaceInfo",
            Operation::GetFileByPath => "/adrive/v1.0/openFile/get_by_path",
            Operation::ListFiles => "/adrive/v1.0/openFile/list",
        }
    }
}

/// Fully resolved endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub url: String,
}

/// Maps operations to endpoints under a fixed API base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTable {
    base: String,
}

impl ApiTable {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn endpoint(&self, operation: Operation) -> Endpoint {
        Endpoint {
            method: operation.method(),
            url: format!("{}{}", self.base, operation.path()),
        }
    }
}

impl Default for ApiTable {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let api = ApiTable::default();

        assert_eq!(
            api.endpoint(Operation::ListFiles),
            Endpoint {
                method: HttpMethod::Post,
                url: "https://open.aliyundrive.com/adrive/v1.0/openFile/list".to_string(),
            }
        );
        assert_eq!(
            api.endpoint(Operation::GetFileByPath).url,
            "https://open.aliyundrive.com/adrive/v1.0/openFile/get_by_path"
        );
        assert_eq!(
            api.endpoint(Operation::GetDriveInfo).url,
            "https://open.aliyundrive.com/adrive/v1.0/user/getDriveInfo"
        );
    }

    #[test]
    fn test_custom_base_trailing_slash() {
        let api = ApiTable::new("http://localhost:9000/");
        assert_eq!(api.base(), "http://localhost:9000");
        assert_eq!(
            api.endpoint(Operation::GetSpaceInfo).url,
            "http://localhost:9000/adrive/v1.0/user/getSpaceInfo"
        );
    }

    #[test]
    fn test_operation_names_unique() {
        let mut names: Vec<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Operation::ALL.len());
    }
}
