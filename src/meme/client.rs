use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::meme::error::FetchError;
use crate::meme::model::{Meme, MemeListResponse};
use crate::meme::picker::IndexPicker;

/// Anything that can list meme templates.
#[async_trait]
pub trait MemeSource: Send + Sync {
    async fn fetch_memes(&self) -> Result<Vec<Meme>, FetchError>;
}

/// HTTP client for imgflip-compatible meme listings.
pub struct ImgflipClient {
    client: Client,
    endpoint: String,
}

impl ImgflipClient {
    /// Builds a client for `endpoint`. `timeout` of `None` means the request
    /// may wait forever.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, endpoint))
    }

    /// Reuses an existing client (shares its connection pool).
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl MemeSource for ImgflipClient {
    async fn fetch_memes(&self) -> Result<Vec<Meme>, FetchError> {
        let transport = |source| FetchError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        let parsed: MemeListResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        if !parsed.success {
            return Err(FetchError::Provider {
                message: parsed
                    .error_message
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        parsed
            .data
            .map(|data| data.memes)
            .ok_or_else(|| FetchError::Malformed("missing data.memes".to_string()))
    }
}

/// Fetches the meme list and picks one entry.
pub async fn fetch_random_meme(
    source: &dyn MemeSource,
    picker: &dyn IndexPicker,
) -> Result<Meme, FetchError> {
    let mut memes = source.fetch_memes().await?;
    if memes.is_empty() {
        return Err(FetchError::Empty);
    }
    let index = picker.pick(memes.len()).min(memes.len() - 1);
    Ok(memes.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(Vec<Meme>);

    #[async_trait]
    impl MemeSource for StaticSource {
        async fn fetch_memes(&self) -> Result<Vec<Meme>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FixedPicker(usize);

    impl IndexPicker for FixedPicker {
        fn pick(&self, _len: usize) -> usize {
            self.0
        }
    }

    fn meme(id: &str) -> Meme {
        Meme {
            id: id.to_string(),
            name: format!("Meme {id}"),
            url: format!("http://img/{id}.png"),
            width: 500,
            height: 500,
            box_count: 2,
        }
    }

    #[tokio::test]
    async fn picks_the_chosen_index() {
        let source = StaticSource(vec![meme("1"), meme("2"), meme("3")]);
        let picked = fetch_random_meme(&source, &FixedPicker(1)).await.unwrap();
        assert_eq!(picked.id, "2");
    }

    #[tokio::test]
    async fn empty_list_is_an_error() {
        let source = StaticSource(Vec::new());
        let err = fetch_random_meme(&source, &FixedPicker(0)).await.unwrap_err();
        assert!(matches!(err, FetchError::Empty));
    }

    #[tokio::test]
    async fn out_of_range_pick_is_clamped() {
        let source = StaticSource(vec![meme("1"), meme("2")]);
        let picked = fetch_random_meme(&source, &FixedPicker(9)).await.unwrap();
        assert_eq!(picked.id, "2");
    }
}
