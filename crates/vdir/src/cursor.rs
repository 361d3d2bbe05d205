mod merge;
pub(crate) use merge::Merge;

mod search_result;
pub use search_result::SearchResult;

use vdir_core::{driver::RowStream, Error, Result};

use std::{
    fmt,
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// The entries matching a search, merged from the rows of the backend
/// query.
///
/// When the size limit is exceeded the cursor yields a size-limit error
/// and ends; entries yielded before it remain valid.
pub struct Cursor {
    stream: Pin<Box<dyn Stream<Item = Result<SearchResult>> + Send>>,
}

impl Cursor {
    /// `resources` (connection, locks) are held until the cursor ends.
    pub(crate) fn new(
        mut rows: RowStream,
        mut merge: Merge,
        limit: usize,
        resources: impl Send + 'static,
    ) -> Cursor {
        let stream = async_stream::stream! {
            let _resources = resources;
            let mut emitted = 0;

            while let Some(row) = rows.next().await {
                let row = match row {
                    Ok(row) => row,
                    Err(err) => {
                        yield Err(err);
                        return;
                    }
                };

                let Some(result) = merge.push(row) else {
                    continue;
                };

                emitted += 1;
                if exceeds(emitted, limit) {
                    yield Err(Error::size_limit_exceeded(limit));
                    return;
                }
                yield Ok(result);
            }

            if let Some(result) = merge.finish() {
                emitted += 1;
                if exceeds(emitted, limit) {
                    yield Err(Error::size_limit_exceeded(limit));
                    return;
                }
                yield Ok(result);
            }

            tracing::debug!(entries = emitted, "search complete");
        };

        Cursor {
            stream: Box::pin(stream),
        }
    }

    pub async fn next(&mut self) -> Option<Result<SearchResult>> {
        StreamExt::next(self).await
    }

    /// Collect all entries
    pub async fn collect(mut self) -> Result<Vec<SearchResult>> {
        let mut ret = vec![];

        while let Some(res) = self.next().await {
            ret.push(res?);
        }

        Ok(ret)
    }
}

fn exceeds(emitted: usize, limit: usize) -> bool {
    limit > 0 && emitted > limit
}

impl Stream for Cursor {
    type Item = Result<SearchResult>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.stream.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").finish()
    }
}
