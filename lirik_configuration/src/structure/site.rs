use serde::Deserialize;
use url::Url;

use crate::{traits::TryResolve, SiteConfigurationError};


#[derive(Deserialize, Debug, Clone)]
pub(super) struct UnresolvedSiteConfiguration {
    public_base_url: String,
}

/// Public-facing site configuration (canonical URLs, sitemap).
#[derive(Debug, Clone)]
pub struct SiteConfiguration {
    /// Public origin without a trailing slash, e.g. `https://lirikrohani.com`.
    pub public_base_url: String,
}

impl TryResolve for UnresolvedSiteConfiguration {
    type Resolved = SiteConfiguration;
    type Error = SiteConfigurationError;

    fn try_resolve(self) -> Result<Self::Resolved, Self::Error> {
        let parsed_url = Url::parse(&self.public_base_url).map_err(|error| {
            SiteConfigurationError::InvalidPublicBaseUrl {
                public_base_url: self.public_base_url.clone(),
                error,
            }
        })?;

        if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
            return Err(SiteConfigurationError::UnsupportedScheme {
                scheme: parsed_url.scheme().to_string(),
            });
        }

        Ok(Self::Resolved {
            public_base_url: self.public_base_url.trim_end_matches('/').to_string(),
        })
    }
}
