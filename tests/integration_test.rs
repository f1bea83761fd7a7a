use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::Server;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

const LINUX_ASSET: &str = "/neco8/cordsync/releases/download/v1.2.3/cordsync-linux-x64";

fn write_manifest(dir: &Path, version: &str) {
    std::fs::write(
        dir.join("package.json"),
        format!(
            r#"{{
                "name": "cordsync",
                "version": "{}",
                "scripts": {{ "postinstall": "cordsync-install" }}
            }}"#,
            version
        ),
    )
    .unwrap();
}

fn installer(package_dir: &Path, base_url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("cordsync-install"));
    cmd.env_remove("CORDSYNC_VERSION")
        .env_remove("CORDSYNC_PACKAGE_DIR")
        .env_remove("CORDSYNC_BASE_URL")
        .arg("--package-dir")
        .arg(package_dir)
        .arg("--base-url")
        .arg(base_url)
        .arg("--timeout")
        .arg("10");
    cmd
}

#[test]
fn test_end_to_end_install_linux_x64() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", LINUX_ASSET)
        .with_status(200)
        .with_body("#!/bin/sh\necho cordsync 1.2.3\n")
        .create();

    let pkg = tempdir().unwrap();
    write_manifest(pkg.path(), "1.2.3");

    installer(pkg.path(), &url)
        .args(["--os", "linux", "--arch", "x64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected platform: linux-x64"))
        .stdout(predicate::str::contains(format!("Downloading from: {}{}", url, LINUX_ASSET)))
        .stdout(predicate::str::contains("Installation complete!"));

    mock.assert();

    let binary = pkg.path().join("dist/cordsync");
    assert_eq!(
        std::fs::read_to_string(&binary).unwrap(),
        "#!/bin/sh\necho cordsync 1.2.3\n"
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

#[test]
fn test_end_to_end_install_follows_redirect() {
    let mut server = Server::new();
    let url = server.url();

    let _redirect = server
        .mock("GET", LINUX_ASSET)
        .with_status(302)
        .with_header("location", &format!("{}/release-assets/42", url))
        .create();
    let asset = server
        .mock("GET", "/release-assets/42")
        .with_status(200)
        .with_body("redirected binary")
        .create();

    let pkg = tempdir().unwrap();
    write_manifest(pkg.path(), "1.2.3");

    installer(pkg.path(), &url)
        .args(["--os", "linux", "--arch", "x64"])
        .assert()
        .success();

    asset.assert();
    assert_eq!(
        std::fs::read_to_string(pkg.path().join("dist/cordsync")).unwrap(),
        "redirected binary"
    );
}

// A failed download is reported but must not fail the parent install
#[test]
fn test_end_to_end_server_error_still_exits_zero() {
    let mut server = Server::new();
    let url = server.url();

    let _mock = server.mock("GET", LINUX_ASSET).with_status(500).create();

    let pkg = tempdir().unwrap();
    write_manifest(pkg.path(), "1.2.3");

    installer(pkg.path(), &url)
        .args(["--os", "linux", "--arch", "x64"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Installation failed"))
        .stderr(predicate::str::contains("500"))
        .stderr(predicate::str::contains(format!(
            "Please install manually from: {}/neco8/cordsync/releases",
            url
        )));

    assert!(!pkg.path().join("dist/cordsync").exists());
}

#[test]
fn test_end_to_end_not_found_leaves_no_binary() {
    let mut server = Server::new();
    let url = server.url();

    let _mock = server.mock("GET", LINUX_ASSET).with_status(404).create();

    let pkg = tempdir().unwrap();
    write_manifest(pkg.path(), "1.2.3");

    installer(pkg.path(), &url)
        .args(["--os", "linux", "--arch", "x64"])
        .assert()
        .success()
        .stderr(predicate::str::contains("404"));

    assert!(!pkg.path().join("dist/cordsync").exists());
}

#[test]
fn test_end_to_end_unsupported_combination_exits_zero() {
    let server = Server::new();
    let url = server.url();

    let pkg = tempdir().unwrap();
    write_manifest(pkg.path(), "1.2.3");

    installer(pkg.path(), &url)
        .args(["--os", "win32", "--arch", "arm64"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unsupported platform combination: win32-arm64"))
        .stderr(predicate::str::contains("Please install manually from:"));

    assert!(!pkg.path().join("dist").exists());
}

#[test]
fn test_end_to_end_unsupported_os_exits_zero() {
    let server = Server::new();
    let url = server.url();

    let pkg = tempdir().unwrap();
    write_manifest(pkg.path(), "1.2.3");

    installer(pkg.path(), &url)
        .args(["--os", "freebsd", "--arch", "x64"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unsupported platform: freebsd-x64"));
}

#[test]
fn test_end_to_end_missing_manifest_exits_zero() {
    let server = Server::new();
    let url = server.url();

    let pkg = tempdir().unwrap();

    installer(pkg.path(), &url)
        .args(["--os", "linux", "--arch", "x64"])
        .assert()
        .success()
        .stderr(predicate::str::contains("package manifest"));
}

#[test]
fn test_end_to_end_release_version_override() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock(
            "GET",
            "/neco8/cordsync/releases/download/v2.0.0/cordsync-darwin-arm64",
        )
        .with_status(200)
        .with_body("darwin binary")
        .create();

    // No package.json: the version comes from the flag
    let pkg = tempdir().unwrap();

    installer(pkg.path(), &url)
        .args(["--os", "darwin", "--arch", "arm64", "--release-version", "2.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installation complete!"));

    mock.assert();
    assert!(pkg.path().join("dist/cordsync").exists());
}

#[test]
fn test_end_to_end_windows_target_uses_exe_name() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock(
            "GET",
            "/neco8/cordsync/releases/download/v1.2.3/cordsync-windows-x64.exe",
        )
        .with_status(200)
        .with_body("MZ")
        .create();

    let pkg = tempdir().unwrap();
    write_manifest(pkg.path(), "1.2.3");
    std::fs::create_dir(pkg.path().join("dist")).unwrap();

    installer(pkg.path(), &url)
        .args(["--os", "win32", "--arch", "x64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected platform: windows-x64"));

    mock.assert();
    assert!(pkg.path().join("dist/cordsync.exe").exists());
    assert!(!pkg.path().join("dist/cordsync").exists());
}

#[test]
fn test_end_to_end_redirect_loop_is_bounded() {
    let mut server = Server::new();
    let url = server.url();

    let _mock = server
        .mock("GET", LINUX_ASSET)
        .with_status(301)
        .with_header("location", LINUX_ASSET)
        .create();

    let pkg = tempdir().unwrap();
    write_manifest(pkg.path(), "1.2.3");

    installer(pkg.path(), &url)
        .args(["--os", "linux", "--arch", "x64", "--max-redirects", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Too many redirects (limit 3)"));

    assert!(!pkg.path().join("dist/cordsync").exists());
}

#[test]
fn test_version_flag() {
    Command::new(cargo::cargo_bin!("cordsync-install"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cordsync-install"));
}
