//! Media resource
//!
//! Media are created against the upload endpoint, either by streaming a
//! local source as multipart or by handing Wistia a URL to fetch. Every
//! other operation goes through the API endpoint.

mod types;

pub use types::{Media, MediaStatus, MediaType, ProjectRef};

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tokio_util::io::ReaderStream;
use tracing::{debug, trace};

use crate::client::{path_segment, read_response, WistiaClient};
use crate::error::{decode, WistiaError};

/// Size of each chunk read from an upload source.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;
/// Chunks buffered between the reader task and the request body.
const UPLOAD_CHANNEL_DEPTH: usize = 4;

/// Operations on medias.
#[derive(Debug, Clone, Copy)]
pub struct Medias<'c> {
    client: &'c WistiaClient,
}

impl<'c> Medias<'c> {
    pub(crate) const fn new(client: &'c WistiaClient) -> Self {
        Self { client }
    }

    fn media_url(&self, hashed_id: &str) -> String {
        self.client
            .api_url(&format!("medias/{}.json", path_segment(hashed_id)))
    }

    /// Upload `reader` as a new media named `media.name` in
    /// `media.project`.
    ///
    /// The source is streamed: a background task reads it chunk by chunk
    /// into a bounded channel feeding the request body, so the whole file
    /// is never held in memory. A read failure aborts the request and is
    /// returned as [`WistiaError::Upload`]. A transport failure is returned
    /// as is, even while the source is still blocked in a read.
    pub async fn create_from_reader<R>(
        &self,
        media: &Media,
        reader: R,
        filename: &str,
    ) -> Result<Media, WistiaError>
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let headers = self.client.build_headers()?;
        let (tx, rx) = mpsc::channel::<Result<Bytes, std::io::Error>>(UPLOAD_CHANNEL_DEPTH);
        let producer = tokio::spawn(pump(reader, tx));

        let file = Part::stream(Body::wrap_stream(ReceiverStream::new(rx)))
            .file_name(filename.to_string());
        let form = Form::new()
            .text("name", media.name.clone())
            .text("description", media.description.clone())
            .text("project_id", media.project.hashed_id.clone())
            .text("access_token", self.client.access_token().to_string())
            .part("file", file);

        let url = self.client.upload_url();
        debug!(url, filename, project = %media.project.hashed_id, "Uploading media");

        let sent = self
            .client
            .http()
            .post(url)
            .headers(headers)
            .multipart(form)
            .send()
            .await;

        // Once the body has failed or finished the producer has already
        // returned, so aborting only cancels a source still stuck in a read.
        producer.abort();
        match producer.await {
            Ok(Err(e)) => return Err(WistiaError::Upload(e.to_string())),
            Err(e) if e.is_panic() => {
                return Err(WistiaError::Upload(format!("upload task failed: {e}")));
            }
            Ok(Ok(())) | Err(_) => {}
        }

        let bytes = read_response(sent?).await?;
        decode(&bytes)
    }

    /// Ask Wistia to fetch `source_url` into a new media. Processing
    /// continues asynchronously on the server.
    pub async fn create_from_url(
        &self,
        media: &Media,
        source_url: &str,
    ) -> Result<Media, WistiaError> {
        let url = self.client.upload_url();
        trace!(url, source_url, "Wistia request");

        let response = self
            .client
            .http()
            .post(url)
            .headers(self.client.build_headers()?)
            .form(&[
                ("access_token", self.client.access_token()),
                ("name", media.name.as_str()),
                ("project_id", media.project.hashed_id.as_str()),
                ("url", source_url),
            ])
            .send()
            .await?;

        let bytes = read_response(response).await?;
        decode(&bytes)
    }

    pub async fn get(&self, hashed_id: &str) -> Result<Media, WistiaError> {
        let url = self.media_url(hashed_id);
        self.client.request(Method::GET, &url, None::<&()>).await
    }

    /// Full-replace update keyed by `media.hashed_id`.
    pub async fn update(&self, media: &Media) -> Result<Media, WistiaError> {
        let url = self.media_url(&media.hashed_id);
        self.client.request(Method::PUT, &url, Some(media)).await
    }

    pub async fn delete(&self, hashed_id: &str) -> Result<(), WistiaError> {
        let url = self.media_url(hashed_id);
        self.client
            .request_empty(Method::DELETE, &url, None::<&()>)
            .await
    }
}

/// Copy `reader` into `tx` chunk by chunk.
///
/// A read error is forwarded into the stream so the request fails instead
/// of ending early, and is also returned to the caller. A closed channel
/// means the request was dropped; that is not the producer's failure.
async fn pump<R>(
    reader: R,
    tx: mpsc::Sender<Result<Bytes, std::io::Error>>,
) -> Result<(), std::io::Error>
where
    R: AsyncRead + Send + Unpin,
{
    let mut chunks = ReaderStream::with_capacity(reader, UPLOAD_CHUNK_SIZE);
    while let Some(chunk) = chunks.next().await {
        match chunk {
            Ok(bytes) => {
                if tx.send(Ok(bytes)).await.is_err() {
                    return Ok(());
                }
            }
            Err(e) => {
                let _ = tx
                    .send(Err(std::io::Error::new(e.kind(), e.to_string())))
                    .await;
                return Err(e);
            }
        }
    }
    Ok(())
}
