//! Loading a reply chain from its last Tweet.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};
use std::future::Future;
use std::ops::Deref;

use crate::error::Error;
use crate::progress::Progress;
use crate::tweet::{StatusId, Tweet};

/// A reply chain, ordered from the root Tweet to the leaf it was loaded from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chain {
    tweets: Vec<Tweet>,
    warnings: Vec<Warning>,
}

/// Why a chain ends before its actual root.
#[derive(Clone, Debug, PartialEq)]
pub enum Warning {
    /// The parent Tweet could not be fetched.
    MissingParent { id: StatusId, reason: String },
    /// The parent Tweet was already part of the chain.
    Cycle { id: StatusId },
}

/// Walks the `in_reply_to_status_id` links starting from `leaf`, fetching every Tweet with `fetch`.
///
/// Only a failure to fetch `leaf` itself is an error. When a parent cannot be fetched the chain is
/// cut there and a [`Warning`] is recorded.
pub async fn load_chain<F, Fut, E>(
    mut fetch: F,
    leaf: StatusId,
    progress: &Progress,
) -> Result<Chain, Error<E>>
where
    F: FnMut(StatusId) -> Fut,
    Fut: Future<Output = Result<Tweet, Error<E>>>,
    E: Display,
{
    let mut tweets: Vec<Tweet> = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    let mut current = leaf;

    loop {
        progress.info(format_args!("Downloading {}...", current));
        seen.insert(current);

        let tweet = match fetch(current).await {
            Ok(tweet) => tweet,
            Err(e) if tweets.is_empty() => return Err(e),
            Err(e) => {
                progress.warn(format_args!(
                    "Warning, parent tweet {} does not exist: {}",
                    current, e
                ));
                warnings.push(Warning::MissingParent {
                    id: current,
                    reason: e.to_string(),
                });
                break;
            }
        };

        let parent = tweet.in_reply_to_status_id;
        tweets.push(tweet);

        match parent {
            None => break,
            Some(id) if seen.contains(&id) => {
                progress.warn(format_args!("Warning, reply chain loops back to {}", id));
                warnings.push(Warning::Cycle { id });
                break;
            }
            Some(id) => current = id,
        }
    }

    tweets.reverse();
    Ok(Chain { tweets, warnings })
}

impl Chain {
    pub fn new(tweets: Vec<Tweet>) -> Self {
        Chain {
            tweets,
            warnings: Vec::new(),
        }
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The first Tweet of the thread, if any.
    pub fn root(&self) -> Option<&Tweet> {
        self.tweets.first()
    }

    pub fn leaf(&self) -> Option<&Tweet> {
        self.tweets.last()
    }

    pub fn into_tweets(self) -> Vec<Tweet> {
        self.tweets
    }
}

impl Deref for Chain {
    type Target = [Tweet];

    fn deref(&self) -> &[Tweet] {
        &self.tweets
    }
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Warning::MissingParent { id, ref reason } => {
                write!(f, "parent tweet {} does not exist: {}", id, reason)
            }
            Warning::Cycle { id } => write!(f, "reply chain loops back to {}", id),
        }
    }
}
