//! Image fetching over HTTP(S).
//!
//! Uses the curl crate (libcurl) for one blocking GET per row: no retries, no
//! Range requests, no resume. Response headers are parsed as they arrive so
//! the output extension is known before the first body byte is written.

mod error;
mod head;

pub use error::FetchError;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::OutputFile;
use crate::url_model::resolve_extension;
use head::ResponseHead;

const USER_AGENT: &str = concat!("imgpull/", env!("CARGO_PKG_VERSION"));

/// Transport knobs for a [`Fetcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Whole-request timeout (connect + transfer).
    pub timeout: Duration,
    /// Connection phase timeout.
    pub connect_timeout: Duration,
    /// Maximum redirects followed before the request fails.
    pub max_redirections: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(15),
            max_redirections: 10,
        }
    }
}

/// Downloads one URL per call into `image_<row><ext>`.
#[derive(Debug, Clone)]
pub struct Fetcher {
    opts: FetchOptions,
}

impl Fetcher {
    /// Fetcher with the given request timeout and default connect/redirect limits.
    pub fn new(timeout: Duration) -> Self {
        Self::with_options(FetchOptions {
            timeout,
            ..FetchOptions::default()
        })
    }

    pub fn with_options(opts: FetchOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.opts
    }

    /// GETs `url` and writes the body to `target_dir/image_<row_num><ext>`.
    ///
    /// The extension comes from the `Content-Type` of the final response, then
    /// the URL suffix, then `.jpg`. Nothing is written unless the final status
    /// is 200. Once the first body chunk has arrived the file exists, so a
    /// later write failure ([`FetchError::Write`]) or a timeout or dropped
    /// connection ([`FetchError::Transfer`]) leaves the partial file in place.
    ///
    /// Only `http` and `https` are fetched; other schemes fail with
    /// [`FetchError::UnsupportedScheme`]. Runs on the current thread.
    pub fn download_image(
        &self,
        url: &str,
        target_dir: &Path,
        row_num: usize,
    ) -> Result<PathBuf, FetchError> {
        check_scheme(url)?;
        tracing::debug!(row = row_num, url, "GET");

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.useragent(USER_AGENT)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirections)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;

        let head = RefCell::new(ResponseHead::default());
        let mut out = OutputFile::new(target_dir, row_num);
        let mut write_err: Option<FetchError> = None;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                head.borrow_mut().push_line(line);
                true
            })?;
            transfer.write_function(|data| {
                let head = head.borrow();
                // Bodies of error responses are drained and dropped.
                if !head.is_ok() {
                    return Ok(data.len());
                }
                match write_body(&mut out, &head, url, data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        tracing::warn!(row = row_num, "body write failed: {}", e);
                        write_err = Some(e);
                        Ok(0) // abort transfer
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(err) = write_err {
            return Err(err);
        }
        performed?;

        let code = easy.response_code()?;
        if code != 200 {
            tracing::debug!(row = row_num, status = code, "non-OK response");
            return Err(FetchError::Status(code));
        }

        // 200 with an empty body still produces a file.
        if !out.is_open() {
            open_output(&mut out, &head.into_inner(), url)?;
        }

        let path = out.path().map(Path::to_path_buf).unwrap_or_default();
        out.finish().map_err(|source| FetchError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(row = row_num, path = %path.display(), "saved");
        Ok(path)
    }
}

/// Rejects URLs that do not parse or whose scheme has no transport here.
fn check_scheme(url: &str) -> Result<(), FetchError> {
    let parsed = url::Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

fn open_output(out: &mut OutputFile, head: &ResponseHead, url: &str) -> Result<(), FetchError> {
    let ext = resolve_extension(head.content_type.as_deref(), url);
    out.open(ext).map_err(|source| FetchError::Create {
        path: out.path_for(ext),
        source,
    })
}

fn write_body(
    out: &mut OutputFile,
    head: &ResponseHead,
    url: &str,
    data: &[u8],
) -> Result<(), FetchError> {
    if !out.is_open() {
        open_output(out, head, url)?;
    }
    if let Err(source) = out.write_all(data) {
        return Err(FetchError::Write {
            path: out.path().map(Path::to_path_buf).unwrap_or_default(),
            source,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = FetchOptions::default();
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.connect_timeout, Duration::from_secs(15));
        assert_eq!(opts.max_redirections, 10);
    }

    #[test]
    fn new_sets_timeout_only() {
        let f = Fetcher::new(Duration::from_secs(5));
        assert_eq!(f.options().timeout, Duration::from_secs(5));
        assert_eq!(f.options().max_redirections, 10);
    }

    #[test]
    fn scheme_check() {
        assert!(check_scheme("http://example.com/a.jpg").is_ok());
        assert!(check_scheme("https://example.com/a.jpg").is_ok());
        assert!(matches!(
            check_scheme("ftp://example.com/a.jpg"),
            Err(FetchError::UnsupportedScheme(s)) if s == "ftp"
        ));
        assert!(matches!(
            check_scheme("file:///tmp/a.png"),
            Err(FetchError::UnsupportedScheme(s)) if s == "file"
        ));
        assert!(matches!(
            check_scheme("not a url"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn unsupported_scheme_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let f = Fetcher::new(Duration::from_secs(1));
        let err = f
            .download_image("file:///etc/hostname", dir.path(), 1)
            .unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
