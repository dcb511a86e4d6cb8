//! Type aliases for use with `hyper` crate's HTTP client.

use std::collections::BTreeMap;
use std::path::PathBuf;

use hyper_pkg::client::HttpConnector;
use hyper_tls::HttpsConnector;

use crate::archive::MediaArchive;
use crate::chain::Chain;
use crate::config::Config;
use crate::document::ThreadDoc;
use crate::progress::Progress;
use crate::tweet::StatusId;

pub type HttpClient = hyper_pkg::Client<HttpsConnector<HttpConnector>>;
pub type Client = crate::Client<HttpClient, hyper_pkg::Body>;
pub type Error = crate::Error<hyper_pkg::Error>;
pub type Task<T> = crate::Task<T, hyper_pkg::Error>;

impl Client {
    /// Creates a client that connects to Twitter over HTTPS.
    pub fn https(config: &Config) -> Self {
        let conn = HttpsConnector::new();
        let http = hyper_pkg::Client::builder().build::<_, hyper_pkg::Body>(conn);
        crate::Client::new(config, http)
    }

    /// Downloads the thread ending with `leaf` in the background.
    pub fn spawn_thread(&self, leaf: StatusId, progress: Progress) -> Task<ThreadDoc> {
        let client = self.clone();
        crate::Task::spawn(async move {
            ThreadDoc::load(|id| client.show_status(id), leaf, &progress).await
        })
    }

    /// Writes the media of `chain` to a zip file at `path` in the background.
    ///
    /// Resolves to the entry name of every media URL.
    pub fn spawn_archive(
        &self,
        chain: Chain,
        path: PathBuf,
        subdir: Option<String>,
        progress: Progress,
    ) -> Task<BTreeMap<String, String>> {
        let client = self.clone();
        crate::Task::spawn(async move {
            let mut archive = MediaArchive::create(&path)?;
            let names = archive
                .add_chain(
                    &chain,
                    |url: &str| client.get_media(url),
                    subdir.as_deref(),
                    &progress,
                )
                .await?;
            let written = archive.entries().len();
            archive.finish()?;
            progress.info(format_args!("Wrote {} files to {}", written, path.display()));
            Ok(names)
        })
    }
}
