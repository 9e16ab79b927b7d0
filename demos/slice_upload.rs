//! Resumable slice upload example for large files
//!
//! This example demonstrates:
//! - Uploading a local file in slices
//! - Tracking upload progress
//! - Resuming after a failure with the returned session
//!
//! Run with: cargo run --example slice_upload -- <local-file> [remote-name]

use cos_client::{Config, CosClient, Credentials, UploadProgress};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MAX_ATTEMPTS: usize = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cos_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let local = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: slice_upload <local-file> [remote-name]"))?;
    let remote = args.next().unwrap_or_else(|| {
        std::path::Path::new(&local)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string())
    });

    println!("📦 COS Storage - Slice Upload Example\n");

    // Replace with real credentials
    let credentials = Credentials::new("200001", "your-secret-id", "your-secret-key");
    let client = CosClient::new(credentials, Config::default())?;
    let file = client.bucket("newbucket").dir("large-files").file(remote);

    let mut session: Option<String> = None;
    for attempt in 1..=MAX_ATTEMPTS {
        println!("📤 Attempt {} uploading {} -> {}", attempt, local, file.full_name());

        let progress = Box::new(|p: UploadProgress| {
            println!(
                "   Progress: {:.1}% ({}/{} bytes) - Slice {}/{}",
                p.percentage(),
                p.bytes_uploaded,
                p.total_bytes,
                p.current_slice,
                p.total_slices
            );
        });

        match file
            .upload_slice_with_progress(&local, "", 0, session.as_deref(), Some(progress))
            .await
        {
            Ok(result) => {
                println!("   ✅ Upload complete! URL: {}", result.url);
                return Ok(());
            }
            Err(e) if e.session.is_some() && e.source.is_resumable() => {
                println!("   ⚠️  {} - will resume", e);
                session = e.session;
            }
            Err(e) => return Err(e.into()),
        }
    }

    anyhow::bail!("upload did not complete after {} attempts", MAX_ATTEMPTS)
}
