//! The HTML document of a whole thread.

use std::fmt::Display;
use std::future::Future;

use chrono::{Local, TimeZone};

use crate::chain::{self, Chain};
use crate::error::Error;
use crate::progress::Progress;
use crate::render::{render_tweet, TWEET_CLASS};
use crate::timestamp::{parse_created_at, TimestampError};
use crate::tweet::{StatusId, Tweet};

/// Returned by [`ThreadDoc::render`] for an empty chain.
pub const NO_DATA: &str = "<!-- No data. -->";

/// A downloaded thread, ready to be rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThreadDoc {
    chain: Chain,
}

impl ThreadDoc {
    /// Downloads the thread ending with `leaf`. See [`load_chain`](chain::load_chain).
    pub async fn load<F, Fut, E>(
        fetch: F,
        leaf: StatusId,
        progress: &Progress,
    ) -> Result<Self, Error<E>>
    where
        F: FnMut(StatusId) -> Fut,
        Fut: Future<Output = Result<Tweet, Error<E>>>,
        E: Display,
    {
        chain::load_chain(fetch, leaf, progress)
            .await
            .map(ThreadDoc::from_chain)
    }

    pub fn from_chain(chain: Chain) -> Self {
        ThreadDoc { chain }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn into_chain(self) -> Chain {
        self.chain
    }

    /// Renders the thread, stamping it with the creation time of its first Tweet in `tz`.
    pub fn render<Tz>(&self, tz: &Tz, progress: &Progress) -> Result<String, TimestampError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let root = match self.chain.root() {
            Some(root) => root,
            None => {
                progress.info("No data.");
                return Ok(NO_DATA.to_owned());
            }
        };

        let created_at = parse_created_at(&root.created_at)?.with_timezone(tz);
        let created_at = created_at.format("%Y-%m-%d %H:%M:%S%:z");
        progress.info(format_args!("Thread timestamp looks like {}", created_at));

        let tweets: Vec<String> = self
            .chain
            .iter()
            .map(|tweet| {
                format!(
                    "<!-- Tweet {} -->\n{}",
                    tweet.id,
                    render_tweet(tweet, TWEET_CLASS, true)
                )
            })
            .collect();

        Ok(format!(
            "<!-- Created at: {} -->\n\n{}",
            created_at,
            tweets.join("\n\n")
        ))
    }

    /// Renders the thread in the local time zone.
    pub fn render_local(&self, progress: &Progress) -> Result<String, TimestampError> {
        self.render(&Local, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    use chrono::{FixedOffset, Utc};
    use futures::executor::block_on;
    use futures::future;

    use crate::user::User;

    fn tweet(id: StatusId, parent: Option<StatusId>, created_at: &str) -> Tweet {
        Tweet {
            id,
            full_text: format!("tweet {}", id),
            created_at: created_at.to_owned(),
            in_reply_to_status_id: parent,
            user: User {
                screen_name: "bob".to_owned(),
                ..User::default()
            },
            ..Tweet::default()
        }
    }

    #[test]
    fn empty() {
        let (progress, mut rx) = Progress::channel();
        let doc = ThreadDoc::default();
        assert_eq!(doc.render(&Utc, &progress).unwrap(), NO_DATA);
        assert_eq!(rx.try_recv().unwrap(), "No data.");
    }

    #[test]
    fn document() {
        let chain = Chain::new(vec![
            tweet(1, None, "Sat Nov 11 19:44:57 +0000 2017"),
            tweet(2, Some(1), "Sat Nov 11 19:45:30 +0000 2017"),
        ]);
        let doc = ThreadDoc::from_chain(chain);
        let tz = FixedOffset::east_opt(3600).unwrap();
        let html = doc.render(&tz, &Progress::new()).unwrap();

        let expected = format!(
            "<!-- Created at: 2017-11-11 20:44:57+01:00 -->\n\n\
             <!-- Tweet 1 -->\n{}\n\n<!-- Tweet 2 -->\n{}",
            render_tweet(&doc.chain()[0], TWEET_CLASS, true),
            render_tweet(&doc.chain()[1], TWEET_CLASS, true),
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn malformed_timestamp() {
        let doc = ThreadDoc::from_chain(Chain::new(vec![tweet(1, None, "yesterday")]));
        match doc.render(&Utc, &Progress::new()) {
            Err(TimestampError::Components(_)) => {}
            r => panic!("{:?}", r),
        }
    }

    #[test]
    fn load() {
        let tweets = vec![
            tweet(1, None, "Sat Nov 11 19:44:57 +0000 2017"),
            tweet(2, Some(1), "Sat Nov 11 19:45:30 +0000 2017"),
        ];
        let fetch = |id: StatusId| {
            future::ready(
                tweets
                    .iter()
                    .find(|t| t.id == id)
                    .cloned()
                    .ok_or(Error::<io::Error>::NotFound(id)),
            )
        };
        let doc = block_on(ThreadDoc::load(fetch, 2, &Progress::new())).unwrap();
        let html = doc.render(&Utc, &Progress::new()).unwrap();

        assert!(html.starts_with("<!-- Created at: 2017-11-11 19:44:57+00:00 -->\n\n<!-- Tweet 1 -->\n"));
        assert!(html.contains("\n\n<!-- Tweet 2 -->\n<div class=\"tweet\">"));
    }
}
