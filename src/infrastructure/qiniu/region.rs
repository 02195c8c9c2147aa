use super::error::EngineError;

/// Qiniu region with the hosts the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub id: &'static str,
    /// Region name used by the S3-compatible endpoint.
    pub s3_region: &'static str,
    pub api_host: &'static str,
}

impl Region {
    /// Resolves either the legacy zone id (`z0`) or the S3 region name (`cn-east-1`).
    pub fn from_id(region_id: &str) -> Result<Self, EngineError> {
        let region = match region_id {
            "z0" | "cn-east-1" => Region {
                id: "z0",
                s3_region: "cn-east-1",
                api_host: "https://api.qiniu.com",
            },
            "z1" | "cn-north-1" => Region {
                id: "z1",
                s3_region: "cn-north-1",
                api_host: "https://api-z1.qiniuapi.com",
            },
            "z2" | "cn-south-1" => Region {
                id: "z2",
                s3_region: "cn-south-1",
                api_host: "https://api-z2.qiniuapi.com",
            },
            "na0" | "us-north-1" => Region {
                id: "na0",
                s3_region: "us-north-1",
                api_host: "https://api-na0.qiniuapi.com",
            },
            "as0" | "ap-southeast-1" => Region {
                id: "as0",
                s3_region: "ap-southeast-1",
                api_host: "https://api-as0.qiniuapi.com",
            },
            other => return Err(EngineError::UnknownRegion(other.to_string())),
        };

        Ok(region)
    }

    pub fn s3_endpoint(&self) -> String {
        format!("https://s3.{}.qiniucs.com", self.s3_region)
    }
}
