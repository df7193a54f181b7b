use crate::domain::ports::Clipboard;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// 把結果寫到檔案，給 CLI 的 `--copy-to` 使用
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    content: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.content.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if let Ok(mut content) = self.content.lock() {
            *content = Some(text.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_clipboard_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/out.txt");
        let clipboard = FileClipboard::new(&path);

        clipboard.write_text("copied text").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "copied text");
    }

    #[test]
    fn test_memory_clipboard_overwrites() {
        let clipboard = MemoryClipboard::new();
        assert!(clipboard.contents().is_none());

        clipboard.write_text("first").unwrap();
        clipboard.write_text("second").unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some("second"));
    }
}
