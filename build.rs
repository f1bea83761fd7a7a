use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let described = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    // Release tags look like "v1.2.3"; the installer reports "1.2.3"
    let version = match described {
        Some(tag) => tag.strip_prefix('v').unwrap_or(&tag).to_string(),
        None => std::env::var("CARGO_PKG_VERSION").unwrap_or_default(),
    };

    println!("cargo:rustc-env=CORDSYNC_INSTALL_VERSION={}", version);
}
