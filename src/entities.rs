//! Entities

use serde::Deserialize;

use crate::types::MediaKind;
use crate::util;

/// Represents a hashtag in the `hashtags` field of Entities.
///
/// # Reference
///
/// [Entities | Twitter Developers](https://developer.twitter.com/en/docs/twitter-api/v1/data-dictionary/object-model/entities)
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Hash)]
pub struct Hashtag {
    /// Name of the hashtag, minus the leading `#` character.
    pub text: String,
}

/// Represents `user_mentions` field in Entities.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Hash)]
pub struct UserMention {
    /// Screen name of the referenced user.
    pub screen_name: String,

    /// Display name of the referenced user.
    #[serde(deserialize_with = "util::deserialize_default")]
    #[serde(default)]
    pub name: String,
}

/// Represents a shortened URL in the `urls` field of Entities.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Hash)]
pub struct Url {
    /// Wrapped URL, corresponding to the value embedded directly into the raw Tweet text.
    #[serde(deserialize_with = "util::deserialize_default")]
    #[serde(default)]
    pub url: String,

    /// Expanded version of `url`.
    #[serde(deserialize_with = "util::deserialize_default")]
    #[serde(default)]
    pub expanded_url: String,
}

/// Represents an element of the `media` field in Extended Entities.
///
/// # Reference
///
/// [Extended Entities | Twitter Developers](https://developer.twitter.com/en/docs/twitter-api/v1/data-dictionary/object-model/extended-entities)
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Hash)]
pub struct Media {
    /// Type of uploaded media.
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Wrapped URL for the media link, as it appears at the end of the Tweet text.
    #[serde(deserialize_with = "util::deserialize_default")]
    #[serde(default)]
    pub url: String,

    /// An https:// URL pointing directly to the uploaded media file. For videos and animated GIFs,
    /// this is the preview image.
    pub media_url_https: String,

    /// Alternative text supplied by the uploader. Only present with `include_ext_alt_text=true`.
    #[serde(default)]
    pub ext_alt_text: Option<String>,

    #[serde(default)]
    pub video_info: Option<VideoInfo>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Hash)]
pub struct VideoInfo {
    #[serde(deserialize_with = "util::deserialize_default")]
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// One encoding of a video or animated GIF.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Hash)]
pub struct Variant {
    pub content_type: String,
    pub url: String,
    #[serde(default)]
    pub bitrate: Option<u64>,
}

impl Media {
    /// Returns the encodings of a video or animated GIF, or an empty slice for photos.
    pub fn variants(&self) -> &[Variant] {
        self.video_info
            .as_ref()
            .map_or(&[][..], |info| &info.variants[..])
    }
}
