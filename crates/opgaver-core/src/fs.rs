//! Directory and file materialization for the download tree.
//!
//! Every function returns a `Result`. Whether a failure matters is decided by
//! the caller's failure policy, not here.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Indentation used for the metadata JSON files
const JSON_INDENT: &[u8] = b"    ";

/// Create `path` and any missing parents. Succeeds if it already exists.
pub async fn ensure_dir(path: impl AsRef<Path>) -> io::Result<()> {
    tokio::fs::create_dir_all(path).await
}

/// Write `contents` to `path`, replacing any existing file.
pub async fn write_file(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<()> {
    tokio::fs::write(path, contents).await
}

/// Write `value` as pretty-printed JSON.
pub async fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> io::Result<()> {
    let contents = to_pretty_json(value)?;
    write_file(path, contents).await
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut serializer).map_err(io::Error::from)?;
    Ok(buf)
}
