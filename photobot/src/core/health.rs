use std::fmt;

use log::{info, warn};

use crate::catalog::Catalog;
use crate::config::SocialKind;
use crate::flickr::PhotoProvider;
use crate::social::SocialProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub flickr_ok: bool,
    pub social_ok: bool,
    pub social_kind: SocialKind,
    pub sources_loaded: usize,
    pub sources_skipped: usize,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.flickr_ok && self.social_ok && self.sources_loaded > 0
    }
}

fn status(ok: bool) -> &'static str {
    if ok { "OK" } else { "FAILED" }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Flickr: {}", status(self.flickr_ok))?;
        writeln!(f, "{}: {}", self.social_kind, status(self.social_ok))?;
        write!(
            f,
            "Sources: {} loaded, {} skipped",
            self.sources_loaded, self.sources_skipped
        )
    }
}

/// Verifies both sets of credentials. A failing check is reported, not
/// returned as an error.
pub async fn check<P, S>(provider: &P, social: &S, catalog: &Catalog) -> HealthReport
where
    P: PhotoProvider,
    S: SocialProvider,
{
    let flickr_ok = provider.verify_credentials().await.unwrap_or_else(|e| {
        warn!("flickr credential check failed: {e}");
        false
    });
    let social_ok = social.verify_credentials().await.unwrap_or_else(|e| {
        warn!("{} credential check failed: {e}", social.kind());
        false
    });
    let report = HealthReport {
        flickr_ok,
        social_ok,
        social_kind: social.kind(),
        sources_loaded: catalog.len(),
        sources_skipped: catalog.skipped().len(),
    };
    info!("health: flickr {flickr_ok}, social {social_ok}");
    report
}
