use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "tzdbUrl",
        "tzdataOutput",
        "sourceRoot",
        "sourceExtension",
        "singularFunction",
        "pluralFunction",
    ] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["sourceRoot"], "lib");
    assert_eq!(parsed["pluralFunction"], "ngettext");

    // 2-space indentation
    assert!(content.contains("\n  \"tzdbUrl\""));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .assetkitrc.json with default settings

    ----- stderr -----
    ");

    let content = test.read_file(".assetkitrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".assetkitrc.json", "{}")?;

    let mut cmd = test.command();
    cmd.arg("init");

    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    warning: .assetkitrc.json already exists, not overwriting
    ");
    assert_eq!(test.read_file(".assetkitrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("lib/main.dart", "gettext('Golden hour');\n")?;

    let output = test.gettext_command().output()?;
    assert!(
        output.status.success(),
        "Gettext command should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("msgid \"Golden hour\""));

    Ok(())
}
