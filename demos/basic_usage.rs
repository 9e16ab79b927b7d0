//! Basic usage example for the COS storage API
//!
//! This example demonstrates:
//! - Creating a directory
//! - Uploading a small file
//! - Listing and searching a directory
//! - Querying and deleting files and directories
//!
//! Run with: cargo run --example basic_usage

use cos_client::{Config, CosClient, Credentials, ListDirParams, ListPattern};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🚀 COS Storage - Basic Usage Example\n");

    // Replace with real credentials
    let credentials = Credentials::new("200001", "your-secret-id", "your-secret-key");
    let client = CosClient::new(credentials, Config::default())?;
    let bucket = client.bucket("newbucket");

    // ==================== Directory Operations ====================

    let dir = bucket.dir("demo");
    println!("📁 Creating directory '{}'...", dir.name());
    match dir.create("created by basic_usage").await {
        Ok(r) => println!("   ✅ Created at {} ({})", r.resource_path, r.ctime),
        Err(e) => println!("   ⚠️  {}", e),
    }

    // ==================== File Operations ====================

    let file = dir.file("hello.txt");
    println!("\n📤 Uploading '{}'...", file.full_name());
    let uploaded = file.upload(b"Hello world!", "greeting").await?;
    println!("   ✅ Access URL: {}", uploaded.access_url);

    let info = file.stat().await?;
    println!("   📄 {} bytes, sha {}", info.filesize, info.sha);

    file.update("updated greeting").await?;
    println!("   ✅ Attribute updated");

    // ==================== Listing ====================

    println!("\n📋 Listing '{}'...", dir.name());
    let list = dir.list(None).await?;
    println!("   {} dirs, {} files", list.dircount, list.filecount);
    for entry in &list.infos {
        println!("   - {} ({} bytes)", entry.name, entry.filesize);
    }

    let params = ListDirParams::default().num(10).pattern(ListPattern::FileOnly);
    let found = dir.prefix_search("hel", Some(params)).await?;
    println!("   🔍 {} file(s) starting with 'hel'", found.filecount);

    // ==================== Cleanup ====================

    println!("\n🧹 Cleaning up...");
    file.delete().await?;
    dir.delete().await?;
    println!("   ✅ Done");

    Ok(())
}
