use crate::domain::model::OracleRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部的文字改寫服務。失敗一律回傳 `HumanizeError::OracleError`。
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(&self, request: &OracleRequest) -> Result<String>;
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}
