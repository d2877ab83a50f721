use std::fs;
use std::path::Path;

use fs_extra::dir::CopyOptions;

const CLIENT_BUILD: &str = "../frontend/dist";
const EMBED_ROOT: &str = "static";
const EMBED_DIR: &str = "static/dist";

/// Replaces `static/dist` with the latest `trunk build` output of the form
/// client.
fn stage_client(client: &Path, embed_root: &Path) -> fs_extra::error::Result<u64> {
    let embed_dir = embed_root.join("dist");
    if embed_dir.exists() {
        fs::remove_dir_all(&embed_dir)?;
    }
    fs::create_dir_all(embed_root)?;
    let options = CopyOptions::new().overwrite(true);
    fs_extra::dir::copy(client, embed_root, &options)
}

// `include_dir!` in main.rs embeds static/dist, which must exist even when
// the client has not been built yet.
fn main() {
    println!("cargo:rerun-if-changed={}", CLIENT_BUILD);

    let client = Path::new(CLIENT_BUILD);
    if !client.is_dir() {
        println!(
            "cargo:warning=form client not built ({} missing); serving the placeholder page",
            CLIENT_BUILD
        );
        if let Err(e) = fs::create_dir_all(EMBED_DIR) {
            panic!("cannot create {}: {}", EMBED_DIR, e);
        }
        return;
    }

    if let Err(e) = stage_client(client, Path::new(EMBED_ROOT)) {
        panic!("cannot stage {} into {}: {}", CLIENT_BUILD, EMBED_DIR, e);
    }
}
