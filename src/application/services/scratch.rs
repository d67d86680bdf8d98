//! Scratch File - 请求级临时音频文件
//!
//! 基于 `tempfile::NamedTempFile`，drop 时删除文件；
//! 成功、出错、提前返回或 future 被取消都会走到 drop。

use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

/// 作用域临时文件
#[derive(Debug)]
pub struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// 在 dir 下创建唯一命名的临时文件
    pub fn create_in(dir: &Path, prefix: &str, suffix: &str) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(dir)?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn write_all(&self, data: &[u8]) -> io::Result<()> {
        tokio::fs::write(self.path(), data).await
    }

    pub async fn read_all(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path()).await
    }

    /// 显式删除，删除失败时记录日志
    pub fn close(self) {
        let path = self.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove scratch file");
        }
    }
}
