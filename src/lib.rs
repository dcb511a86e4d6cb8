#![doc(html_root_url = "https://docs.rs/twitter-to-cms/0.1.0")]

/*!
# Twitter to CMS

A library for turning a Twitter thread into an HTML fragment ready to be pasted into a CMS,
together with a zip archive of its media.

## Usage

Add `twitter-to-cms` to your dependencies in your project's `Cargo.toml`:

```toml
[dependencies]
tokio = { version = "1", features = ["macros", "rt-multi-thread"] }
twitter-to-cms = "0.1"
```

## Overview

Here is a basic example that prints the thread ending with a Tweet as HTML:

```rust,no_run
use twitter_to_cms::{Config, Progress};

# #[tokio::main]
# async fn main() {
let config = Config::new("consumer_key", "consumer_secret", "access_key", "access_secret");
let client = twitter_to_cms::hyper::Client::https(&config);

let progress = Progress::new();
let doc = client.spawn_thread(929_385_006_419_013_632, progress.clone()).await.unwrap();
println!("{}", doc.render_local(&progress).unwrap());
# }
```

The fetching functions take the HTTP transport as a closure, so a thread can also be loaded from
any other source:

```rust
use futures::future;
use twitter_to_cms::{Error, Progress, ThreadDoc, Tweet};

# futures::executor::block_on(async {
let fetch = |id| {
    let tweet: Tweet = serde_json::from_str(r#"{
        "id": 1,
        "full_text": "Hello",
        "created_at": "Sat Nov 11 19:44:57 +0000 2017",
        "user": { "screen_name": "jack" }
    }"#).unwrap();
    future::ready(if id == 1 { Ok(tweet) } else { Err(Error::<std::io::Error>::NotFound(id)) })
};
let doc = ThreadDoc::load(fetch, 1, &Progress::new()).await.unwrap();
assert_eq!(doc.chain().len(), 1);
# });
```
*/

#[cfg(feature = "hyper")]
extern crate hyper_pkg;

#[macro_use]
mod util;

pub mod archive;
pub mod chain;
pub mod client;
pub mod config;
pub mod document;
pub mod entities;
pub mod error;
#[cfg(feature = "hyper")]
pub mod hyper;
pub mod progress;
pub mod render;
pub mod task;
pub mod timestamp;
pub mod tweet;
pub mod types;
pub mod user;

mod gzip;
mod token;

pub use oauth::Credentials;

pub use crate::archive::MediaArchive;
pub use crate::chain::{load_chain, Chain};
pub use crate::client::Client;
pub use crate::config::Config;
pub use crate::document::ThreadDoc;
pub use crate::error::Error;
pub use crate::progress::Progress;
pub use crate::render::render_tweet;
pub use crate::task::Task;
pub use crate::token::Token;
pub use crate::tweet::{parse_status_id, StatusId, Tweet};
pub use crate::user::User;
