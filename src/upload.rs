//! Multipart form construction for file endpoints.

use crate::error::Result;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use std::path::Path;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Field name shared by every uploaded file part.
const FILE_FIELD: &str = "encoded_data";

/// Text field naming the operation, since multipart posts share a wire path.
const OP_FIELD: &str = "op";

/// Build the multipart form for a file request.
///
/// Each file is opened and streamed into its own `encoded_data` part. Parts
/// are file-named by position only; the caller's file names stay local. A
/// file that cannot be opened aborts the whole form before anything is sent.
pub(crate) async fn build_file_form(endpoint: &str, paths: &[impl AsRef<Path>]) -> Result<Form> {
    let mut form = Form::new();

    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        debug!(index, path = %path.display(), "Adding file part");

        let file = File::open(path).await?;
        let part =
            Part::stream(Body::wrap_stream(ReaderStream::new(file))).file_name(index.to_string());
        form = form.part(FILE_FIELD, part);
    }

    Ok(form.text(OP_FIELD, endpoint.to_string()))
}
