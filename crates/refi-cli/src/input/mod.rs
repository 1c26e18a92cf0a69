pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Reads `T` from `--input <file>` or, failing that, from piped stdin.
/// `what` names the input in the error when neither is supplied.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => {
            let value = serde_json::from_value(data)
                .map_err(|e| format!("Failed to parse {} from stdin: {}", what, e))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}
