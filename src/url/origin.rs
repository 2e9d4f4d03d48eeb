use std::fmt;
use url::Url;

/// The (scheme, host) identity that decides whether a link is internal
///
/// Ports are not part of the identity: `https://example.com:8443/` and
/// `https://example.com/` share an origin here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
}

impl Origin {
    /// Extracts the origin of a URL
    ///
    /// Returns None for URLs without a host.
    ///
    /// ```
    /// use site_ledger::url::Origin;
    /// use url::Url;
    ///
    /// let a = Url::parse("https://Example.com/a").unwrap();
    /// let b = Url::parse("https://example.com/b?x=1").unwrap();
    /// assert_eq!(Origin::of(&a), Origin::of(&b));
    /// ```
    pub fn of(url: &Url) -> Option<Self> {
        let host = url.host_str()?;
        Some(Self {
            scheme: url.scheme().to_ascii_lowercase(),
            host: host.to_ascii_lowercase(),
        })
    }

    /// Returns true if `url` belongs to this origin
    pub fn contains(&self, url: &Url) -> bool {
        Origin::of(url).as_ref() == Some(self)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}
