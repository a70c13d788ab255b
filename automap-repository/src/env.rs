use crate::{Error, ErrorKind};

/// Checks that every variable in `names` is set to a non-empty value.
///
/// # Errors
///
/// [`ErrorKind::Internal`], listing every missing variable in the order given.
pub fn validate_environment<I, S>(names: I) -> Result<(), Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut missing = Vec::new();
    for name in names {
        let name: &str = name.as_ref();
        if std::env::var_os(name).is_none_or(|value| value.is_empty()) {
            missing.push(name.to_owned());
        }
    }

    if missing.is_empty() {
        return Ok(());
    }
    tracing::warn!(?missing, "environment is incomplete");
    Err(Error::new(ErrorKind::Internal).wrap(format!(
        "Missing Environment Variables: {}",
        missing.join(", ")
    )))
}
