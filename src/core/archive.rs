use crate::domain::model::RawEntry;
use crate::utils::error::{EtlError, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

pub const BERRY_ENTRY_PREFIX: &str = "data/cobblemon/berries/";
pub const JSON_SUFFIX: &str = ".json";

/// 逐一讀取 jar/zip 內符合前綴與副檔名的 JSON 條目
pub struct ArchiveReader<R: Read + Seek> {
    archive: ZipArchive<R>,
    prefix: String,
    suffix: String,
}

impl ArchiveReader<BufReader<File>> {
    /// 開啟磁碟上的壓縮檔；檔案不存在時回傳 `ArchiveNotFound`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EtlError::ArchiveNotFound {
                path: path.to_path_buf(),
            },
            _ => EtlError::IoError(e),
        })?;

        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ArchiveReader<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        tracing::debug!("Opened archive with {} entries", archive.len());

        Ok(Self {
            archive,
            prefix: BERRY_ENTRY_PREFIX.to_string(),
            suffix: JSON_SUFFIX.to_string(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn entries(&mut self) -> Entries<'_, R> {
        Entries {
            archive: &mut self.archive,
            prefix: &self.prefix,
            suffix: &self.suffix,
            index: 0,
        }
    }
}

/// 依壓縮檔索引順序惰性產生條目，解析失敗的條目以 `MalformedEntry` 回報後繼續
pub struct Entries<'a, R: Read + Seek> {
    archive: &'a mut ZipArchive<R>,
    prefix: &'a str,
    suffix: &'a str,
    index: usize,
}

impl<R: Read + Seek> Iterator for Entries<'_, R> {
    type Item = Result<RawEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.archive.len() {
            let index = self.index;
            self.index += 1;

            // 只看中央目錄的檔名，不符合的條目不會被開啟
            let path = match self.archive.name_for_index(index) {
                Some(name) if name.starts_with(self.prefix) && name.ends_with(self.suffix) => {
                    name.to_string()
                }
                _ => continue,
            };

            tracing::debug!("Reading entry: {}", path);

            let mut file = match self.archive.by_index(index) {
                Ok(file) => file,
                Err(e) => return Some(Err(e.into())),
            };

            let parsed: std::result::Result<serde_json::Value, _> =
                serde_json::from_reader(&mut file);

            return Some(match parsed {
                Ok(document) => Ok(RawEntry { path, document }),
                Err(e) => Err(EtlError::MalformedEntry {
                    entry: path,
                    reason: e.to_string(),
                }),
            });
        }

        None
    }
}
