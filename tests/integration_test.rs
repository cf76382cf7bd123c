use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Mock, Server, ServerGuard};
use tempfile::{TempDir, tempdir};

const USERNAME: &str = "frame@example.com";
const PASSWORD: &str = "s3cret pass";
const TOKEN: &str = "integration-token";

fn sign_in_page() -> String {
    format!(
        r#"<html><body><form action="/sign_in" method="post">
             <input type="hidden" name="authenticity_token" value="{}">
           </form></body></html>"#,
        TOKEN
    )
}

fn mock_sign_in(server: &mut ServerGuard) -> (Mock, Mock) {
    let page = server
        .mock("GET", "/sign_in")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(sign_in_page())
        .create();
    let submit = server
        .mock("POST", "/sign_in")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user[email]".into(), USERNAME.into()),
            Matcher::UrlEncoded("user[password]".into(), PASSWORD.into()),
            Matcher::UrlEncoded("authenticity_token".into(), TOKEN.into()),
        ]))
        .with_status(200)
        .create();
    (page, submit)
}

fn credentials_file() -> TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("credentials"),
        format!("{}\n{}\n", USERNAME, PASSWORD),
    )
    .unwrap();
    dir
}

const ENV_VARS: [&str; 8] = [
    "EO_USER",
    "EO_PASS",
    "EO_BASE_URL",
    "EO_CREDENTIALS_FILE",
    "EO_MAX_FAVORITES",
    "EO_REQUEST_INTERVAL_MS",
    "EO_RETRY_DELAY_MS",
    "EO_RETRIES",
];

fn clear_env(cmd: &mut Command) -> &mut Command {
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// The binary pointed at `url`, with the credentials in `creds`, no request
/// spacing and short retry delays.
fn eoctl(url: &str, creds: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("eoctl"));
    clear_env(&mut cmd)
        .arg("--base-url")
        .arg(url)
        .arg("--credentials")
        .arg(creds.path().join("credentials"))
        .arg("--request-interval-ms")
        .arg("0")
        .arg("--retry-delay-ms")
        .arg("1");
    cmd
}

#[test]
fn test_random_displays_other_favorite() {
    let mut server = Server::new();
    let url = server.url();
    let (page, submit) = mock_sign_in(&mut server);

    let _devices = server
        .mock("GET", "/api/v2/user/devices/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 7, "name": "Hall", "reproduction": {"artwork": {"id": 1}}}]"#)
        .create();
    let _favorites = server
        .mock("GET", "/api/v2/user/artworks/favorited/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), "30".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"artwork": {"id": 1}}, {"artwork": {"id": 2}}]"#)
        .create();
    let display = server
        .mock("PUT", "/api/v2/user/artworks/displayed/2")
        .with_status(200)
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .arg("random")
        .assert()
        .success()
        .stdout(predicates::str::contains("Displayed artwork id 2"));

    page.assert();
    submit.assert();
    display.assert();
}

#[test]
fn test_no_subcommand_runs_random() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);

    let _devices = server
        .mock("GET", "/api/v2/user/devices/")
        .with_status(200)
        .with_body(r#"[{"id": 7}]"#)
        .create();
    let _favorites = server
        .mock("GET", "/api/v2/user/artworks/favorited/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"artwork": {"id": 5}}]"#)
        .create();
    let display = server
        .mock("PUT", "/api/v2/user/artworks/displayed/5")
        .with_status(200)
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .assert()
        .success()
        .stdout(predicates::str::contains("Displayed artwork id 5"));

    display.assert();
}

#[test]
fn test_display_by_id() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);
    let display = server
        .mock("PUT", "/api/v2/user/artworks/displayed/1136")
        .with_status(200)
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .arg("display")
        .arg("1136")
        .assert()
        .success()
        .stdout(predicates::str::contains("1136"));

    display.assert();
}

#[test]
fn test_favorite_and_unfavorite() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);
    let put = server
        .mock("PUT", "/api/v2/user/artworks/favorited/5626")
        .with_status(200)
        .create();
    let delete = server
        .mock("DELETE", "/api/v2/user/artworks/favorited/5626")
        .with_status(200)
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .arg("favorite")
        .arg("5626")
        .assert()
        .success()
        .stdout(predicates::str::contains("Favorited artwork id 5626"));
    eoctl(&url, &creds)
        .arg("unfavorite")
        .arg("5626")
        .assert()
        .success()
        .stdout(predicates::str::contains("Unfavorited artwork id 5626"));

    put.assert();
    delete.assert();
}

#[test]
fn test_favorites_listing() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);
    let _favorites = server
        .mock("GET", "/api/v2/user/artworks/favorited/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"[{"artwork": {"id": 11, "title": "Dunes", "artist_name": "A. Painter"}},
                {"artwork": {"id": "12"}}]"#,
        )
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .arg("favorites")
        .assert()
        .success()
        .stdout(predicates::str::contains("11\tDunes by A. Painter"))
        .stdout(predicates::str::contains("12\t(untitled)"));
}

#[test]
fn test_devices_listing() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);
    let _devices = server
        .mock("GET", "/api/v2/user/devices/")
        .with_status(200)
        .with_body(
            r#"[{"id": 7, "name": "Hall", "backlight_state": true,
                 "reproduction": {"artwork": {"id": 1136}}}]"#,
        )
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .arg("devices")
        .assert()
        .success()
        .stdout(predicates::str::contains("7\tHall\tbacklight on\tartwork 1136"));
}

#[test]
fn test_backlight_off_on_first_device() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);
    let _devices = server
        .mock("GET", "/api/v2/user/devices/")
        .with_status(200)
        .with_body(r#"[{"id": 7, "name": "Hall", "backlight_state": false}]"#)
        .create();
    let put = server
        .mock("PUT", "/api/v2/user/devices/7")
        .match_query(Matcher::UrlEncoded("backlight_state".into(), "false".into()))
        .with_status(200)
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .arg("backlight")
        .arg("off")
        .assert()
        .success()
        .stdout(predicates::str::contains("backlight off"));

    put.assert();
}

#[test]
fn test_sleep_schedule_on_named_device() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);
    let put = server
        .mock("PUT", "/api/v2/user/devices/9")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sleep_begin".into(), "23:00:00".into()),
            Matcher::UrlEncoded("sleep_end".into(), "06:30:00".into()),
        ]))
        .with_status(200)
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .args(["sleep-schedule", "--wake", "06:30", "--sleep", "23:00", "--device", "9"])
        .assert()
        .success();

    put.assert();
}

#[test]
fn test_server_errors_exhaust_retries() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);
    let display = server
        .mock("PUT", "/api/v2/user/artworks/displayed/1136")
        .with_status(503)
        .expect(3)
        .create();

    let creds = credentials_file();
    eoctl(&url, &creds)
        .args(["--retries", "2", "display", "1136"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unable to display artwork 1136"));

    display.assert();
}

#[test]
fn test_retry_settings_from_environment() {
    let mut server = Server::new();
    let url = server.url();
    let _signin = mock_sign_in(&mut server);
    let display = server
        .mock("PUT", "/api/v2/user/artworks/displayed/1136")
        .with_status(500)
        .expect(2)
        .create();

    let creds = credentials_file();
    let mut cmd = Command::new(cargo::cargo_bin!("eoctl"));
    clear_env(&mut cmd)
        .env("EO_BASE_URL", url.as_str())
        .env("EO_CREDENTIALS_FILE", creds.path().join("credentials"))
        .env("EO_REQUEST_INTERVAL_MS", "0")
        .env("EO_RETRY_DELAY_MS", "1")
        .env("EO_RETRIES", "1")
        .args(["display", "1136"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unable to display artwork 1136"));

    display.assert();
}

#[test]
fn test_missing_credentials_fail_without_sign_in() {
    let mut server = Server::new();
    let url = server.url();
    let page = server.mock("GET", "/sign_in").expect(0).create();

    let empty = tempdir().unwrap();
    let mut cmd = Command::new(cargo::cargo_bin!("eoctl"));
    clear_env(&mut cmd)
        .current_dir(empty.path())
        .args(["--base-url", url.as_str(), "devices"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No devices."));

    page.assert();
}

#[test]
fn test_credentials_from_environment() {
    let mut server = Server::new();
    let url = server.url();
    let (_page, submit) = mock_sign_in(&mut server);
    let _user = server
        .mock("GET", "/api/v2/user/")
        .with_status(200)
        .with_body(r#"{"email": "frame@example.com"}"#)
        .create();

    let empty = tempdir().unwrap();
    let mut cmd = Command::new(cargo::cargo_bin!("eoctl"));
    clear_env(&mut cmd)
        .env("EO_USER", USERNAME)
        .env("EO_PASS", PASSWORD)
        .current_dir(empty.path())
        .args(["--base-url", url.as_str(), "--request-interval-ms", "0", "user"])
        .assert()
        .success()
        .stdout(predicates::str::contains("frame@example.com"));

    submit.assert();
}
