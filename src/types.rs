//! Common types used across the crate.

pub use http::StatusCode;

str_enum! {
    /// The `type` of a media entity attached to a Tweet.
    #[derive(Clone, Debug, PartialEq, Hash, Eq)]
    pub enum MediaKind {
        Photo = "photo",
        AnimatedGif = "animated_gif",
        Video = "video",
        _ => Other,
    }
}
