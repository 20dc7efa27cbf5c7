use bytes::Buf;
use hyper::body::Body;
use pin_project_lite::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Collects a response body into a contiguous buffer, pre-sized from a
    /// content-length hint the caller has already extracted.
    pub struct CollectBodyFuture<B: Body> {
        #[pin]
        body: B,
        buf: Vec<u8>,
    }
}

impl<B> CollectBodyFuture<B>
where
    B: Body,
{
    #[inline]
    #[must_use]
    pub fn with_size_hint(body: B, size_hint: usize) -> Self {
        Self {
            body,
            buf: Vec::with_capacity(size_hint),
        }
    }
}

impl<B> Future for CollectBodyFuture<B>
where
    B: Body,
{
    type Output = Result<Vec<u8>, anyhow::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slf = self.project();
        loop {
            match slf.body.as_mut().poll_frame(cx) {
                Poll::Ready(None) => return Poll::Ready(Ok(std::mem::take(slf.buf))),
                Poll::Ready(Some(Ok(frame))) => {
                    // Trailer frames carry no data and are skipped.
                    if let Ok(data) = frame.into_data() {
                        slf.buf.extend_from_slice(data.chunk());
                    }
                }
                Poll::Ready(Some(Err(_e))) => {
                    return Poll::Ready(Err(anyhow::anyhow!("failed to poll next body frame")));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http_body_util::Full;

    #[tokio::test]
    async fn collects_full_body() {
        let body = Full::new(Bytes::from_static(b"hello world"));
        let collected = CollectBodyFuture::with_size_hint(body, 11).await.unwrap();
        assert_eq!(collected, b"hello world");
    }

    #[tokio::test]
    async fn empty_body_collects_to_empty_buffer() {
        let body = Full::new(Bytes::new());
        let collected = CollectBodyFuture::with_size_hint(body, 0).await.unwrap();
        assert!(collected.is_empty());
    }
}
