//! Zip archives of the media attached to a thread.

use std::collections::btree_map::{BTreeMap, Entry};
use std::fs::File;
use std::future::Future;
use std::io::{self, Seek, Write};
use std::path::Path;

use zip::result::ZipResult;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::chain::Chain;
use crate::error::Error;
use crate::progress::Progress;
use crate::tweet::Tweet;
use crate::types::MediaKind;

/// A media file whose entry name was already taken by another URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    pub url: String,
    pub name: String,
    /// The URL that was written under `name`.
    pub existing: String,
}

/// A zip file being filled with the media of Tweets.
pub struct MediaArchive<W: Write + Seek> {
    zip: ZipWriter<W>,
    // entry name -> source URL
    entries: BTreeMap<String, String>,
    collisions: Vec<Collision>,
}

/// Returns the archive entry name for a media URL: its last path segment, optionally inside
/// `subdir`.
pub fn filename_for_url(url: &str, subdir: Option<&str>) -> String {
    let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or("");
    let name = path.rsplit('/').next().unwrap_or(path);
    match subdir {
        Some(dir) if !dir.is_empty() => format!("{}/{}", dir.trim_end_matches('/'), name),
        _ => name.to_owned(),
    }
}

/// Returns the URLs of the files worth archiving for a Tweet, including those of the Tweet it
/// quotes.
///
/// Photos contribute the image itself. Animated GIFs contribute the preview image and every
/// encoded variant.
pub fn media_urls(tweet: &Tweet) -> Vec<&str> {
    let mut urls = Vec::new();
    for t in std::iter::once(tweet).chain(tweet.quoted_status.as_deref()) {
        for media in &t.media {
            match media.kind {
                MediaKind::Photo => urls.push(&*media.media_url_https),
                MediaKind::AnimatedGif => {
                    urls.push(&*media.media_url_https);
                    urls.extend(media.variants().iter().map(|v| &*v.url));
                }
                MediaKind::Video | MediaKind::Other(_) => {}
            }
        }
    }
    urls
}

impl MediaArchive<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        File::create(path).map(MediaArchive::new)
    }
}

impl<W: Write + Seek> MediaArchive<W> {
    pub fn new(writer: W) -> Self {
        MediaArchive {
            zip: ZipWriter::new(writer),
            entries: BTreeMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Downloads the media of `tweet` with `fetch` and stores them in the archive.
    ///
    /// Returns the entry name used for each URL. A URL whose entry name is already taken by
    /// another URL is not written and is recorded in [`collisions`](Self::collisions) instead.
    pub async fn add_tweet_media<F, Fut, E>(
        &mut self,
        tweet: &Tweet,
        mut fetch: F,
        subdir: Option<&str>,
        progress: &Progress,
    ) -> Result<BTreeMap<String, String>, Error<E>>
    where
        F: FnMut(&str) -> Fut,
        Fut: Future<Output = Result<Vec<u8>, Error<E>>>,
    {
        let mut names = BTreeMap::new();

        for url in media_urls(tweet) {
            let name = filename_for_url(url, subdir);
            names.insert(url.to_owned(), name.clone());

            match self.entries.entry(name) {
                Entry::Occupied(e) => {
                    if e.get() != url {
                        let collision = Collision {
                            url: url.to_owned(),
                            name: e.key().clone(),
                            existing: e.get().clone(),
                        };
                        progress.warn(format_args!(
                            "Skipping {} from {}: already taken by {}",
                            collision.name, collision.url, collision.existing
                        ));
                        self.collisions.push(collision);
                    }
                }
                Entry::Vacant(e) => {
                    progress.info(format_args!("Downloading {} from {}...", e.key(), url));
                    let data = fetch(url).await?;
                    let options =
                        FileOptions::default().compression_method(CompressionMethod::Deflated);
                    self.zip.start_file(e.key().as_str(), options)?;
                    self.zip.write_all(&data)?;
                    e.insert(url.to_owned());
                }
            }
        }

        Ok(names)
    }

    /// Stores the media of every Tweet of `chain`.
    pub async fn add_chain<F, Fut, E>(
        &mut self,
        chain: &Chain,
        mut fetch: F,
        subdir: Option<&str>,
        progress: &Progress,
    ) -> Result<BTreeMap<String, String>, Error<E>>
    where
        F: FnMut(&str) -> Fut,
        Fut: Future<Output = Result<Vec<u8>, Error<E>>>,
    {
        let mut names = BTreeMap::new();
        for tweet in chain.iter() {
            let added = self
                .add_tweet_media(tweet, &mut fetch, subdir, progress)
                .await?;
            names.extend(added);
        }
        Ok(names)
    }

    /// Entry names that were requested by more than one URL.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Returns the names of the entries written so far, with their source URLs.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Writes the central directory and returns the underlying writer.
    pub fn finish(mut self) -> ZipResult<W> {
        self.zip.finish()
    }
}
