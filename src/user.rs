use serde::Deserialize;

pub type UserId = u64;

/// Represents the author of a Tweet, or the authenticated user.
///
/// # Reference
///
/// [User object | Twitter Developers](https://developer.twitter.com/en/docs/twitter-api/v1/data-dictionary/object-model/user)
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Hash)]
pub struct User {
    #[serde(default)]
    pub id: UserId,

    /// The name of the user, as they've defined it.
    #[serde(default)]
    pub name: String,

    /// The screen name, handle, or alias that this user identifies themselves with.
    pub screen_name: String,
}
