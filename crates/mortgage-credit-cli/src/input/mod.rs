pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a typed input document from `--input` if given, otherwise from piped
/// stdin. `None` means neither was supplied and the caller should fall back
/// to individual flags.
pub fn read_document<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        tracing::debug!(path, "reading input file");
        return Ok(Some(file::read_input(path)?));
    }
    match stdin::read_stdin()? {
        Some(value) => {
            tracing::debug!("reading input from stdin");
            Ok(Some(serde_json::from_value(value)?))
        }
        None => Ok(None),
    }
}
