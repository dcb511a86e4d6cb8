use oauth::Credentials;

/// An OAuth token used to log into Twitter.
#[derive(Copy, Clone, Debug)]
pub struct Token<C = String, T = String> {
    pub client: Credentials<C>,
    pub token: Credentials<T>,
}

impl<C: AsRef<str>, T: AsRef<str>> Token<C, T> {
    pub fn new(
        client_identifier: C,
        client_secret: C,
        token_identifier: T,
        token_secret: T,
    ) -> Self {
        let client = Credentials::new(client_identifier, client_secret);
        let token = Credentials::new(token_identifier, token_secret);
        Self::from_credentials(client, token)
    }

    pub fn from_credentials(client: Credentials<C>, token: Credentials<T>) -> Self {
        Self { client, token }
    }

    /// Borrow token strings from `self` and make a new `Token` with them.
    pub fn as_ref(&self) -> Token<&str, &str> {
        Token::from_credentials(self.client.as_ref(), self.token.as_ref())
    }

    /// Signs a request and returns the value of its `Authorization` header.
    pub(crate) fn authorize<R>(&self, method: &str, uri: &str, request: &R) -> String
    where
        R: oauth::Request + ?Sized,
    {
        let mut oauth = oauth::Builder::new(self.client.as_ref(), oauth::HmacSha1);
        oauth.token(self.token.as_ref());
        oauth.build(method, uri, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_header() {
        let token = Token::new("ck", "cs", "ak", "as");
        let header = token.authorize("GET", "https://api.twitter.com/1.1/statuses/show.json", &());

        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"ck\""));
        assert!(header.contains("oauth_token=\"ak\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
    }

    #[test]
    fn borrowed_token() {
        let owned = Token::new(
            "ck".to_owned(),
            "cs".to_owned(),
            "ak".to_owned(),
            "as".to_owned(),
        );
        let borrowed = owned.as_ref();
        assert_eq!(borrowed.client.identifier(), "ck");
        assert_eq!(borrowed.token.identifier(), "ak");

        let uri = "https://api.twitter.com/1.1/account/verify_credentials.json";
        assert!(borrowed.authorize("GET", uri, &()).contains("oauth_token=\"ak\""));
    }
}
