use serde::{Deserialize, Deserializer};

use crate::entities::{Hashtag, Media, Url, UserMention};
use crate::user::User;
use crate::util;

pub type StatusId = u64;

/// Represents a Tweet as returned by `GET statuses/show` in extended mode.
///
/// Only the fields needed to render a thread are kept. Entity lists that are absent or `null` in
/// the response are empty.
///
/// # Reference
///
/// [Tweet object | Twitter Developers](https://developer.twitter.com/en/docs/twitter-api/v1/data-dictionary/object-model/tweet)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tweet {
    /// The integer representation of the unique identifier for this Tweet.
    pub id: StatusId,

    /// The raw text of the Tweet, including the `t.co` links to URLs and media.
    ///
    /// Twitter sends the text with `&`, `<` and `>` entity-escaped. They are un-escaped here so
    /// that the text can be escaped once when rendered.
    pub full_text: String,

    /// UTC time when this Tweet was created, as sent by Twitter.
    /// See [`parse_created_at`](crate::timestamp::parse_created_at).
    pub created_at: String,

    /// If the represented Tweet is a reply, the ID of the Tweet it replies to.
    pub in_reply_to_status_id: Option<StatusId>,

    /// Media attached to the Tweet, from `extended_entities` if present.
    pub media: Vec<Media>,

    pub hashtags: Vec<Hashtag>,

    pub user_mentions: Vec<UserMention>,

    pub urls: Vec<Url>,

    /// The Tweet quoted by this Tweet.
    pub quoted_status: Option<Box<Tweet>>,

    /// The user who posted this Tweet.
    pub user: User,
}

impl Tweet {
    /// Returns the URL of this Tweet on twitter.com.
    pub fn permalink(&self) -> String {
        format!(
            "https://twitter.com/{}/status/{}",
            self.user.screen_name, self.id
        )
    }
}

impl<'de> Deserialize<'de> for Tweet {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Prototype {
            id: StatusId,
            #[serde(alias = "text")]
            full_text: String,
            #[serde(default)]
            created_at: String,
            #[serde(default)]
            in_reply_to_status_id: Option<StatusId>,
            #[serde(default)]
            entities: Option<Entities>,
            #[serde(default)]
            extended_entities: Option<ExtendedEntities>,
            #[serde(default)]
            quoted_status: Option<Box<Tweet>>,
            user: User,
        }

        #[derive(Default, Deserialize)]
        struct Entities {
            #[serde(deserialize_with = "util::deserialize_default")]
            #[serde(default)]
            hashtags: Vec<Hashtag>,
            #[serde(deserialize_with = "util::deserialize_default")]
            #[serde(default)]
            user_mentions: Vec<UserMention>,
            #[serde(deserialize_with = "util::deserialize_default")]
            #[serde(default)]
            urls: Vec<Url>,
            #[serde(deserialize_with = "util::deserialize_default")]
            #[serde(default)]
            media: Vec<Media>,
        }

        #[derive(Deserialize)]
        struct ExtendedEntities {
            #[serde(deserialize_with = "util::deserialize_default")]
            #[serde(default)]
            media: Vec<Media>,
        }

        Prototype::deserialize(d).map(|p| {
            let entities = p.entities.unwrap_or_default();
            let media = match p.extended_entities {
                Some(e) if !e.media.is_empty() => e.media,
                _ => entities.media,
            };
            Tweet {
                id: p.id,
                full_text: unescape(&p.full_text),
                created_at: p.created_at,
                in_reply_to_status_id: p.in_reply_to_status_id,
                media,
                hashtags: entities.hashtags,
                user_mentions: entities.user_mentions,
                urls: entities.urls,
                quoted_status: p.quoted_status,
                user: p.user,
            }
        })
    }
}

/// Reverts the entity escaping Twitter applies to Tweet text.
fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Extracts a status ID from either a bare ID or a status URL such as
/// `https://twitter.com/jack/status/20`.
pub fn parse_status_id(input: &str) -> Option<StatusId> {
    let input = input.trim();
    if let Ok(id) = input.parse() {
        return Some(id);
    }

    let path = input.split(|c: char| c == '?' || c == '#').next()?;
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let id = segments.next()?;
    match segments.next()? {
        "status" | "statuses" => id.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaKind;

    const REPLY: &str = r#"{
        "created_at": "Sat Nov 11 19:44:57 +0000 2017",
        "id": 929473937474838528,
        "id_str": "929473937474838528",
        "full_text": "@alice Fish &amp; chips &lt;3 #food https://t.co/AbCdEf",
        "display_text_range": [7, 45],
        "entities": {
            "hashtags": [{"text": "food", "indices": [25, 30]}],
            "symbols": [],
            "user_mentions": [
                {"screen_name": "alice", "name": "Alice", "id": 1, "indices": [0, 6]}
            ],
            "urls": [],
            "media": [{
                "type": "photo",
                "url": "https://t.co/AbCdEf",
                "media_url_https": "https://pbs.twimg.com/media/DOTnrKcWAAAd8b4.jpg"
            }]
        },
        "extended_entities": {
            "media": [{
                "type": "photo",
                "url": "https://t.co/AbCdEf",
                "media_url_https": "https://pbs.twimg.com/media/DOTnrKcWAAAd8b4.jpg",
                "ext_alt_text": "Fish and chips"
            }]
        },
        "in_reply_to_status_id": 929473000000000000,
        "in_reply_to_status_id_str": "929473000000000000",
        "user": {"id": 2, "id_str": "2", "name": "Bob", "screen_name": "bob"},
        "is_quote_status": false
    }"#;

    #[test]
    fn deserialize_reply() {
        let tweet: Tweet = serde_json::from_str(REPLY).unwrap();

        assert_eq!(tweet.id, 929473937474838528);
        assert_eq!(tweet.full_text, "@alice Fish & chips <3 #food https://t.co/AbCdEf");
        assert_eq!(tweet.in_reply_to_status_id, Some(929473000000000000));
        assert_eq!(tweet.hashtags[0].text, "food");
        assert_eq!(tweet.user_mentions[0].name, "Alice");
        assert!(tweet.urls.is_empty());
        assert_eq!(tweet.media.len(), 1);
        assert_eq!(tweet.media[0].kind, MediaKind::Photo);
        assert_eq!(tweet.media[0].ext_alt_text.as_deref(), Some("Fish and chips"));
        assert_eq!(tweet.user.screen_name, "bob");
        assert_eq!(
            tweet.permalink(),
            "https://twitter.com/bob/status/929473937474838528"
        );
    }

    #[test]
    fn deserialize_minimal() {
        let json = r#"{
            "id": 20,
            "text": "just setting up my twttr",
            "in_reply_to_status_id": null,
            "entities": {"hashtags": null},
            "user": {"screen_name": "jack"}
        }"#;
        let tweet: Tweet = serde_json::from_str(json).unwrap();

        assert_eq!(tweet.full_text, "just setting up my twttr");
        assert_eq!(tweet.in_reply_to_status_id, None);
        assert!(tweet.hashtags.is_empty());
        assert!(tweet.media.is_empty());
        assert!(tweet.quoted_status.is_none());
    }

    #[test]
    fn deserialize_quote() {
        let json = r#"{
            "id": 2,
            "full_text": "Look https://t.co/q",
            "entities": {
                "urls": [{"url": "https://t.co/q", "expanded_url": "https://twitter.com/jack/status/20"}]
            },
            "quoted_status": {
                "id": 20,
                "full_text": "just setting up my twttr",
                "user": {"screen_name": "jack"}
            },
            "user": {"screen_name": "bob"}
        }"#;
        let tweet: Tweet = serde_json::from_str(json).unwrap();

        let quoted = tweet.quoted_status.unwrap();
        assert_eq!(quoted.id, 20);
        assert_eq!(quoted.user.screen_name, "jack");
        assert_eq!(tweet.urls[0].expanded_url, "https://twitter.com/jack/status/20");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("a &amp;lt; b"), "a &lt; b");
        assert_eq!(unescape("&lt;p&gt;"), "<p>");
        assert_eq!(unescape("plain"), "plain");
    }

    #[test]
    fn status_id() {
        assert_eq!(parse_status_id("929473937474838528"), Some(929473937474838528));
        assert_eq!(parse_status_id(" 20\n"), Some(20));
        assert_eq!(
            parse_status_id("https://twitter.com/jack/status/20"),
            Some(20)
        );
        assert_eq!(
            parse_status_id("https://x.com/jack/status/20/?s=20#top"),
            Some(20)
        );
        assert_eq!(parse_status_id("https://twitter.com/jack"), None);
        assert_eq!(parse_status_id("not a tweet"), None);
    }
}
