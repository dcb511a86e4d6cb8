pub use imp::*;

#[cfg(feature = "gzip")]
mod imp {
    use std::io;

    use async_compression::tokio::bufread::GzipDecoder;
    use tokio::io::AsyncReadExt;

    pub const ENABLED: bool = true;

    /// Decompresses a gzip-encoded response body.
    pub async fn decode(body: Vec<u8>) -> io::Result<Vec<u8>> {
        let mut decoder = GzipDecoder::new(&body[..]);
        let mut ret = Vec::with_capacity(body.len() * 4);
        decoder.read_to_end(&mut ret).await?;
        Ok(ret)
    }
}

#[cfg(not(feature = "gzip"))]
mod imp {
    use std::io;

    pub const ENABLED: bool = false;

    pub async fn decode(_: Vec<u8>) -> io::Result<Vec<u8>> {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "received a gzip-encoded response without the `gzip` feature",
        ))
    }
}

#[cfg(all(test, feature = "gzip"))]
mod tests {
    use super::*;

    use async_compression::tokio::bufread::GzipEncoder;
    use futures::executor::block_on;
    use tokio::io::AsyncReadExt;

    #[test]
    fn decode_body() {
        let json = br#"{"id":20,"full_text":"just setting up my twttr"}"#;
        let mut body = Vec::new();
        block_on(GzipEncoder::new(&json[..]).read_to_end(&mut body)).unwrap();
        assert_ne!(&body[..], &json[..]);

        assert_eq!(block_on(decode(body)).unwrap(), &json[..]);
    }

    #[test]
    fn corrupt() {
        assert!(block_on(decode(b"not gzip".to_vec())).is_err());
    }
}
