use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::error::LoadError;

/// Somewhere a dataset's raw text can be loaded from.
pub trait DataSource: Sync {
    /// Human-readable location, for messages.
    fn describe(&self) -> String;

    fn fetch(&self) -> Result<String, LoadError>;

    fn is_stdin(&self) -> bool {
        false
    }
}

pub struct FileSource(pub PathBuf);

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.0.display().to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.0).map_err(|source| LoadError::Io {
            path: self.0.clone(),
            source,
        })
    }
}

pub struct HttpSource(pub String);

impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.0.clone()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        let http_err = |e: ureq::Error| LoadError::Http {
            url: self.0.clone(),
            message: e.to_string(),
        };
        let body = ureq::get(&self.0)
            .call()
            .map_err(http_err)?
            .body_mut()
            .read_to_string()
            .map_err(http_err)?;
        Ok(body)
    }
}

pub struct StdinSource;

impl DataSource for StdinSource {
    fn describe(&self) -> String {
        "<stdin>".to_string()
    }

    fn is_stdin(&self) -> bool {
        true
    }

    fn fetch(&self) -> Result<String, LoadError> {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Io {
                path: PathBuf::from("-"),
                source,
            })?;
        Ok(text)
    }
}

/// Text already in memory.
#[cfg(test)]
pub struct StaticSource(pub String);

#[cfg(test)]
impl DataSource for StaticSource {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        Ok(self.0.clone())
    }
}

/// `http(s)://` locations are fetched over the network, `-` is stdin,
/// anything else is a file path.
pub fn source_from_arg(location: &str) -> Box<dyn DataSource> {
    if location == "-" {
        Box::new(StdinSource)
    } else if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource(location.to_string()))
    } else {
        Box::new(FileSource(PathBuf::from(location)))
    }
}

/// Fetch both datasets concurrently and wait for both.
/// Stdin can feed at most one of them.
pub fn load_both(
    usages: &dyn DataSource,
    pricing: &dyn DataSource,
) -> Result<(String, String), LoadError> {
    if usages.is_stdin() && pricing.is_stdin() {
        return Err(LoadError::SharedStdin);
    }
    let (usages, pricing) = rayon::join(|| usages.fetch(), || pricing.fetch());
    Ok((usages?, pricing?))
}
