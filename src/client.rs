//! A minimal client of the Twitter REST API v1.1.

use std::future::Future;
use std::marker::PhantomData;

use futures_util::future;
use http::header::{HeaderValue, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_ENCODING};
use http::{Request, Response};
use http_body::Body;
use serde::de::DeserializeOwned;
use tower_service::Service;

use crate::config::{Config, DEFAULT_API_BASE};
use crate::error::Error;
use crate::gzip;
use crate::token::Token;
use crate::tweet::{StatusId, Tweet};
use crate::types::StatusCode;
use crate::user::User;
use crate::util;

/// Sends OAuth-signed requests to Twitter through an HTTP service `S` taking request bodies of
/// type `B`.
#[derive(Debug)]
pub struct Client<S, B> {
    service: S,
    token: Token,
    api_base: String,
    marker: PhantomData<fn() -> B>,
}

/// Represents a GET statuses/show request.
#[derive(oauth::Request)]
struct ShowStatus {
    id: StatusId,
    include_ext_alt_text: bool,
    tweet_mode: &'static str,
}

impl<S: Clone, B> Clone for Client<S, B> {
    fn clone(&self) -> Self {
        Client {
            service: self.service.clone(),
            token: self.token.clone(),
            api_base: self.api_base.clone(),
            marker: PhantomData,
        }
    }
}

impl<S, B> Client<S, B> {
    pub fn new(config: &Config, service: S) -> Self {
        Client {
            service,
            token: config.token(),
            api_base: config.api_base().to_owned(),
            marker: PhantomData,
        }
    }

    pub fn with_token(token: Token, service: S) -> Self {
        Client {
            service,
            token,
            api_base: DEFAULT_API_BASE.to_owned(),
            marker: PhantomData,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }
}

impl<S, B, ResB> Client<S, B>
where
    S: Service<Request<B>, Response = Response<ResB>> + Clone,
    B: Default,
    ResB: Body,
    S::Error: From<ResB::Error>,
{
    /// Fetches a single Tweet in extended mode.
    ///
    /// Deleted Tweets and Tweets of protected or suspended accounts result in
    /// [`Error::NotFound`].
    pub async fn show_status(&self, id: StatusId) -> Result<Tweet, Error<S::Error>> {
        let uri = format!("{}/statuses/show.json", self.api_base);
        let request = ShowStatus {
            id,
            include_ext_alt_text: true,
            tweet_mode: "extended",
        };
        let authorization = self.token.authorize("GET", &uri, &request);
        let uri = format!(
            "{}?id={}&include_ext_alt_text=true&tweet_mode=extended",
            uri, id
        );

        let req = Request::get(uri).header(AUTHORIZATION, authorization);
        let (status, body) = self.send(req).await?;

        match status {
            StatusCode::OK => serde_json::from_slice(&body).map_err(Error::Json),
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => Err(Error::NotFound(id)),
            _ => Err(Error::Http(status)),
        }
    }

    /// Returns the authenticated user, checking that the credentials are valid.
    pub async fn verify_credentials(&self) -> Result<User, Error<S::Error>> {
        let uri = format!("{}/account/verify_credentials.json", self.api_base);
        let authorization = self.token.authorize("GET", &uri, &());
        let req = Request::get(uri).header(AUTHORIZATION, authorization);
        self.send_json(req).await
    }

    /// Downloads a media file. The request is not signed.
    pub fn get_media(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Vec<u8>, Error<S::Error>>> + '_ {
        let req = Request::get(url);
        async move {
            let (status, body) = self.send(req).await?;
            if status.is_success() {
                Ok(body)
            } else {
                Err(Error::Http(status))
            }
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: http::request::Builder,
    ) -> Result<T, Error<S::Error>> {
        let (status, body) = self.send(req).await?;
        if status.is_success() {
            serde_json::from_slice(&body).map_err(Error::Json)
        } else {
            Err(Error::Http(status))
        }
    }

    async fn send(
        &self,
        req: http::request::Builder,
    ) -> Result<(StatusCode, Vec<u8>), Error<S::Error>> {
        let req = if gzip::ENABLED {
            req.header(ACCEPT_ENCODING, HeaderValue::from_static("gzip"))
        } else {
            req
        };
        let req = req.body(B::default()).map_err(Error::Request)?;
        tracing::debug!(method = %req.method(), uri = %req.uri(), "sending request");

        let mut service = self.service.clone();
        future::poll_fn(|cx| service.poll_ready(cx))
            .await
            .map_err(Error::Service)?;
        let res = service.call(req).await.map_err(Error::Service)?;

        let (parts, body) = res.into_parts();
        let body = util::collect_body(body)
            .await
            .map_err(|e| Error::Service(e.into()))?;
        tracing::debug!(status = %parts.status, len = body.len(), "received response");

        let gzipped = parts
            .headers
            .get_all(CONTENT_ENCODING)
            .iter()
            .any(|e| e == "gzip");
        let body = if gzipped {
            gzip::decode(body).await.map_err(Error::Gzip)?
        } else {
            body
        };

        Ok((parts.status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use hyper_pkg::Body as HyperBody;
    use tower::service_fn;

    fn token() -> Token {
        Token::new(
            "ck".to_owned(),
            "cs".to_owned(),
            "ak".to_owned(),
            "as".to_owned(),
        )
    }

    fn respond(status: u16, body: &'static str) -> Response<HyperBody> {
        Response::builder()
            .status(status)
            .body(HyperBody::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn show_status() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let service = service_fn(move |req: Request<HyperBody>| {
            log.lock().unwrap().push((
                req.uri().to_string(),
                req.headers().get(AUTHORIZATION).cloned(),
            ));
            async move {
                Ok::<_, hyper_pkg::Error>(respond(
                    200,
                    r#"{"id":20,"full_text":"just setting up my twttr","user":{"screen_name":"jack"}}"#,
                ))
            }
        });

        let client: Client<_, HyperBody> = Client::with_token(token(), service);
        let tweet = client.show_status(20).await.unwrap();
        assert_eq!(tweet.id, 20);
        assert_eq!(tweet.user.screen_name, "jack");

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[0].0,
            "https://api.twitter.com/1.1/statuses/show.json?id=20&include_ext_alt_text=true&tweet_mode=extended"
        );
        let authorization = seen[0].1.as_ref().unwrap().to_str().unwrap();
        assert!(authorization.starts_with("OAuth "));
    }

    #[tokio::test]
    async fn not_found() {
        for &status in &[404, 403] {
            let service = service_fn(move |_: Request<HyperBody>| async move {
                Ok::<_, hyper_pkg::Error>(respond(
                    status,
                    r#"{"errors":[{"code":144,"message":"No status found with that ID."}]}"#,
                ))
            });
            let client: Client<_, HyperBody> = Client::with_token(token(), service);
            match client.show_status(1).await {
                Err(Error::NotFound(1)) => {}
                r => panic!("{:?}", r),
            }
        }
    }

    #[tokio::test]
    async fn rate_limited() {
        let service = service_fn(|_: Request<HyperBody>| async {
            Ok::<_, hyper_pkg::Error>(respond(429, r#"{"errors":[{"code":88}]}"#))
        });
        let client: Client<_, HyperBody> = Client::with_token(token(), service);
        match client.show_status(1).await {
            Err(e @ Error::Http(_)) => assert!(e.is_transient()),
            r => panic!("{:?}", r),
        }
    }

    #[tokio::test]
    async fn malformed_json() {
        let service = service_fn(|_: Request<HyperBody>| async {
            Ok::<_, hyper_pkg::Error>(respond(200, "{"))
        });
        let client: Client<_, HyperBody> = Client::with_token(token(), service);
        match client.show_status(1).await {
            Err(Error::Json(_)) => {}
            r => panic!("{:?}", r),
        }
    }

    #[cfg(feature = "gzip")]
    #[tokio::test]
    async fn gzip_response() {
        use async_compression::tokio::bufread::GzipEncoder;
        use tokio::io::AsyncReadExt;

        let json = br#"{"id":1,"screen_name":"jack","name":"jack"}"#;
        let mut gzipped = Vec::new();
        GzipEncoder::new(&json[..])
            .read_to_end(&mut gzipped)
            .await
            .unwrap();

        let service = service_fn(move |req: Request<HyperBody>| {
            assert_eq!(req.headers()[ACCEPT_ENCODING], "gzip");
            let body = gzipped.clone();
            async move {
                Ok::<_, hyper_pkg::Error>(
                    Response::builder()
                        .header(CONTENT_ENCODING, "gzip")
                        .body(HyperBody::from(body))
                        .unwrap(),
                )
            }
        });
        let client: Client<_, HyperBody> = Client::with_token(token(), service);
        let user = client.verify_credentials().await.unwrap();
        assert_eq!(user.screen_name, "jack");
    }

    #[tokio::test]
    async fn media() {
        let service = service_fn(|req: Request<HyperBody>| async move {
            assert!(req.headers().get(AUTHORIZATION).is_none());
            let res = match req.uri().path() {
                "/media/a.jpg" => respond(200, "JPEG"),
                _ => respond(404, ""),
            };
            Ok::<_, hyper_pkg::Error>(res)
        });
        let client: Client<_, HyperBody> = Client::with_token(token(), service);

        let data = client
            .get_media("https://pbs.twimg.com/media/a.jpg")
            .await
            .unwrap();
        assert_eq!(data, b"JPEG");

        match client.get_media("https://pbs.twimg.com/media/b.jpg").await {
            Err(Error::Http(status)) => assert_eq!(status, StatusCode::NOT_FOUND),
            r => panic!("{:?}", r),
        }
    }

    #[tokio::test]
    async fn custom_api_base() {
        let service = service_fn(|req: Request<HyperBody>| async move {
            assert_eq!(req.uri().authority().unwrap(), "localhost:8080");
            Ok::<_, hyper_pkg::Error>(respond(200, r#"{"screen_name":"jack"}"#))
        });
        let mut config = Config::new("ck", "cs", "ak", "as");
        config.api_base = "http://localhost:8080/1.1/".to_owned();
        let client: Client<_, HyperBody> = Client::new(&config, service);
        client.verify_credentials().await.unwrap();
    }
}
