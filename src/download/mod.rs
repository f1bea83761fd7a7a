use crate::http::HttpClient;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;

/// Downloads `url` to `destination`, following redirects.
///
/// The destination is only created once the server answers 200. If the
/// transfer fails after that, the partial file is removed (best effort) and
/// the original error is returned.
#[tracing::instrument(skip(runtime, http_client))]
pub async fn fetch<R: Runtime>(
    runtime: &R,
    http_client: &HttpClient,
    url: &str,
    destination: &Path,
) -> Result<()> {
    info!("Downloading file from {}...", url);

    let mut created = false;
    let result = http_client
        .download_file(url, || {
            let writer = runtime
                .create_file(destination)
                .with_context(|| format!("Failed to create binary at {:?}", destination))?;
            created = true;
            Ok(writer)
        })
        .await;

    match result {
        Ok(bytes) => {
            info!("Download complete ({} bytes).", bytes);
            Ok(())
        }
        Err(e) => {
            if created {
                debug!("Removing partial download at {:?}", destination);
                if let Err(remove_err) = runtime.remove_file(destination) {
                    warn!(
                        "Could not remove partial download {:?}: {}",
                        destination, remove_err
                    );
                }
            }
            Err(e)
        }
    }
}
