#![cfg(unix)]

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr};

// wget-style arguments: -q -O <dest> <url>
const FETCH: &str = r#"printf 'archive' > "$3""#;

// bsdtar-style arguments: xf <archive> -C <dir>
const EXTRACT: &str = r#"mkdir -p "$4/tzdb-2024a""#;

// make-style arguments: -C <src> install DESTDIR=<dir>
const BUILD: &str = r#"root="${4#DESTDIR=}/usr/share/zoneinfo"
mkdir -p "$root/America/Argentina" "$root/Etc"
printf 'TZif2...\nEST5EDT,M3.2.0,M11.1.0\n' > "$root/America/New_York"
printf 'TZif2...\n<-03>3\n' > "$root/America/Argentina/Salta"
printf 'TZif2...\n<-01>1<+00>,M3.5.0/0,M10.5.0/1\n' > "$root/America/Scoresbysund"
printf 'TZif2...\nUTC0\n' > "$root/Etc/UTC"
printf '# tzdb data for zic\n' > "$root/tzdata.zi"
printf 'TZif\000...\nLMT\n' > "$root/Factory""#;

const EXPECTED: &str = "{
\t\"America/Argentina/Salta\": \"<-03>3\",
\t\"America/New_York\": \"EST5EDT,M3.2.0,M11.1.0\",
\t\"America/Scoresbysund\": \"<-01>1<+00>,M3.5.0/0,M10.5.0/1\",
\t\"Etc/UTC\": \"UTC0\",
\t\"_tzdb\": \"2024a\"
}
";

fn setup(test: &CliTest, extract: &str, build: &str) -> Result<()> {
    let fetch = test.write_script("tools/fetch.sh", FETCH)?;
    let extract = test.write_script("tools/extract.sh", extract)?;
    let build = test.write_script("tools/build.sh", build)?;
    test.write_file(
        ".assetkitrc.json",
        &serde_json::json!({
            "tzdbUrl": "https://example.invalid/tzdb-latest.tar.lz",
            "fetchCommand": fetch,
            "extractCommand": extract,
            "buildCommand": build,
        })
        .to_string(),
    )
}

#[test]
fn test_builds_snapshot_and_cleans_up() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, EXTRACT, BUILD)?;

    assert_cmd_snapshot!(test.tzdata_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Wrote 4 zones from tzdb 2024a to tzdata.json

    ----- stderr -----
    ");
    assert_eq!(test.read_file("tzdata.json")?, EXPECTED);
    assert_eq!(
        test.root_entries()?,
        vec![".assetkitrc.json", ".git", "tools", "tzdata.json"]
    );

    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, EXTRACT, BUILD)?;

    test.tzdata_command().output()?;
    let first = test.read_file("tzdata.json")?;
    test.tzdata_command().output()?;
    let second = test.read_file("tzdata.json")?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_normalize_offsets_flag() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, EXTRACT, BUILD)?;

    let output = test
        .tzdata_command()
        .args(["--normalize-offsets", "-o", "assets/tzdata.json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&test.read_file("assets/tzdata.json")?)?;
    assert_eq!(json["America/Argentina/Salta"], "AAA3");
    assert_eq!(json["America/Scoresbysund"], "AAA1BBB,M3.5.0/0,M10.5.0/1");
    assert_eq!(json["America/New_York"], "EST5EDT,M3.2.0,M11.1.0");

    Ok(())
}

#[test]
fn test_build_failure_leaves_no_residue() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, EXTRACT, "echo 'zic: cannot create' >&2\nexit 2")?;

    let output = test.tzdata_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Failed to build tzdata.json"));
    assert!(err.contains("zic: cannot create"));
    assert_eq!(test.root_entries()?, vec![".assetkitrc.json", ".git", "tools"]);

    Ok(())
}

#[test]
fn test_fetch_failure_is_reported() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, EXTRACT, BUILD)?;
    test.write_script("tools/fetch.sh", "exit 4")?;

    assert_cmd_snapshot!(test.tzdata_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to build tzdata.json: failed to download https://example.invalid/tzdb-latest.tar.lz: exit status: 4
    ");
    assert_eq!(test.root_entries()?, vec![".assetkitrc.json", ".git", "tools"]);

    Ok(())
}

#[test]
fn test_ambiguous_version_directories() -> Result<()> {
    let test = CliTest::new()?;
    setup(
        &test,
        r#"mkdir -p "$4/tzdb-2023c" "$4/tzdb-2024a""#,
        BUILD,
    )?;

    assert_cmd_snapshot!(test.tzdata_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to build tzdata.json: expected exactly one tzdb-<version> directory in ., found tzdb-2023c, tzdb-2024a
    ");
    assert_eq!(test.root_entries()?, vec![".assetkitrc.json", ".git", "tools"]);

    Ok(())
}

#[test]
fn test_output_inside_cleanup_scope_is_refused() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, EXTRACT, BUILD)?;

    let mut cmd = test.tzdata_command();
    cmd.args(["-o", "tzdb-assets/tzdata.json"]);

    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to build tzdb-assets/tzdata.json: output tzdb-assets/tzdata.json is inside the tzdb work area and would be removed with it
    ");
    assert_eq!(test.root_entries()?, vec![".assetkitrc.json", ".git", "tools"]);

    Ok(())
}

#[test]
fn test_dotted_output_path_inside_cleanup_scope_is_refused() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, EXTRACT, BUILD)?;

    let output = test
        .tzdata_command()
        .args(["-o", "tools/../tzdb-snapshot.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(!test.root().join("tzdb-snapshot.json").exists());

    Ok(())
}

#[test]
fn test_created_work_dir_is_removed() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test, EXTRACT, BUILD)?;

    let output = test
        .tzdata_command()
        .args(["--work-dir", "build"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(test.read_file("tzdata.json")?, EXPECTED);
    assert_eq!(
        test.root_entries()?,
        vec![".assetkitrc.json", ".git", "tools", "tzdata.json"]
    );

    Ok(())
}
