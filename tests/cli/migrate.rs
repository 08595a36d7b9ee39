use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const CATALOG: &str = "lang/en/messages.php";

#[test]
fn test_migrate_single_file() -> Result<()> {
    let test = CliTest::with_file(
        "resources/views/welcome.blade.php",
        r#"<h1>{{ __('Welcome to our site') }}</h1>
<p>{{ __("Hello :name", ['name' => $user->name]) }}</p>
"#,
    )?;

    let output = test
        .migrate_command("resources/views/welcome.blade.php", CATALOG)
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_snapshot!(test.read_file("resources/views/welcome.blade.php")?, @r#"
    <h1>{{ __("messages.welcome_to_our_site") }}</h1>
    <p>{{ __("messages.hello_name", ['name' => $user->name]) }}</p>
    "#);
    assert_snapshot!(test.read_file(CATALOG)?, @r#"
    <?php

    return [
        "hello_name" => "Hello :name",
        "welcome_to_our_site" => "Welcome to our site",
    ];
    "#);
    assert!(stdout(&output).contains("Added 2 key(s)"));
    Ok(())
}

#[test]
fn test_migrate_directory() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("views/a.blade.php", r#"{{ __("Save") }} {{ __("Save") }}"#)?;
    test.write_file("views/admin/b.php", r#"<?= __('Save') ?> <?= __('Cancel') ?>"#)?;
    test.write_file("views/notes.txt", r#"__("Not scanned")"#)?;
    test.write_file("views/vendor/pkg/c.php", r#"__("Third party")"#)?;

    let output = test.migrate_command("views", CATALOG).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    // Walk order is sorted: a.blade.php before admin/b.php
    assert_eq!(
        test.read_file("views/a.blade.php")?,
        r#"{{ __("messages.save") }} {{ __("messages.save") }}"#
    );
    assert_eq!(
        test.read_file("views/admin/b.php")?,
        r#"<?= __("messages.save_1") ?> <?= __("messages.cancel") ?>"#
    );
    assert_eq!(test.read_file("views/notes.txt")?, r#"__("Not scanned")"#);
    assert_eq!(
        test.read_file("views/vendor/pkg/c.php")?,
        r#"__("Third party")"#
    );

    assert_eq!(
        test.read_file(CATALOG)?,
        "<?php\n\nreturn [\n    \"cancel\" => \"Cancel\",\n    \"save\" => \"Save\",\n    \"save_1\" => \"Save\",\n];\n"
    );
    Ok(())
}

#[test]
fn test_second_run_changes_nothing() -> Result<()> {
    let test = CliTest::with_file(
        "views/home.php",
        r#"<?= __('Dashboard') ?> <?= __("Log out") ?>"#,
    )?;

    let first = test.migrate_command("views", CATALOG).output()?;
    assert!(first.status.success());
    let view_after_first = test.read_file("views/home.php")?;
    let catalog_after_first = test.read_file(CATALOG)?;

    let second = test.migrate_command("views", CATALOG).output()?;
    assert!(second.status.success());
    assert_eq!(test.read_file("views/home.php")?, view_after_first);
    assert_eq!(test.read_file(CATALOG)?, catalog_after_first);
    assert!(stdout(&second).contains("No new translation strings found"));
    Ok(())
}

#[test]
fn test_existing_catalog_is_preserved() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        CATALOG,
        "<?php\n\nreturn [\n    'save' => 'Save changes',\n    'auth_failed' => 'Nope',\n];\n",
    )?;
    test.write_file("views/form.php", r#"<?= __('Save') ?> <?= __('auth.failed') ?>"#)?;

    let output = test.migrate_command("views/form.php", CATALOG).output()?;
    assert!(output.status.success());

    assert_eq!(
        test.read_file("views/form.php")?,
        r#"<?= __("messages.save_1") ?> <?= __('auth.failed') ?>"#
    );
    assert_eq!(
        test.read_file(CATALOG)?,
        "<?php\n\nreturn [\n    \"auth_failed\" => \"Nope\",\n    \"save\" => \"Save changes\",\n    \"save_1\" => \"Save\",\n];\n"
    );
    Ok(())
}

#[test]
fn test_no_matches_leaves_catalog_untouched() -> Result<()> {
    let test = CliTest::new()?;
    let catalog = "<?php\n// hand written\nreturn ['z' => 'Z', 'a' => 'A'];\n";
    test.write_file(CATALOG, catalog)?;
    test.write_file("views/plain.php", "<p><?= $title ?></p>\n")?;

    let output = test.migrate_command("views", CATALOG).output()?;
    assert!(output.status.success());

    assert_eq!(test.read_file(CATALOG)?, catalog);
    assert_eq!(test.read_file("views/plain.php")?, "<p><?= $title ?></p>\n");
    assert!(stdout(&output).contains("No new translation strings found in 1 file."));
    Ok(())
}

#[test]
fn test_missing_source_is_not_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.migrate_command("does/not/exist", CATALOG).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("neither a file nor a directory"));
    assert!(!test.exists(CATALOG));
    Ok(())
}

#[test]
fn test_unreadable_file_fails_run_but_keeps_going() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("views/a_good.php", r#"<?= __('Welcome') ?>"#)?;
    test.write_bytes("views/b_broken.php", b"<?= __('Caf\xe9') ?> \xff\xfe")?;
    test.write_file("views/c_good.php", r#"<?= __('Goodbye') ?>"#)?;

    let output = test.migrate_command("views", CATALOG).output()?;

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error:"));
    assert!(err.contains("b_broken.php"));
    assert!(stdout(&output).contains("1 file(s) could not be processed"));

    assert_eq!(
        test.read_file("views/a_good.php")?,
        r#"<?= __("messages.welcome") ?>"#
    );
    assert_eq!(
        test.read_file("views/c_good.php")?,
        r#"<?= __("messages.goodbye") ?>"#
    );
    assert_eq!(
        test.read_file(CATALOG)?,
        "<?php\n\nreturn [\n    \"goodbye\" => \"Goodbye\",\n    \"welcome\" => \"Welcome\",\n];\n"
    );
    Ok(())
}

#[test]
fn test_unreadable_catalog_aborts_before_rewriting() -> Result<()> {
    let test = CliTest::new()?;
    // A directory where the catalog file should be
    test.write_file("lang/en/messages.php/.keep", "")?;
    test.write_file("views/a.php", r#"<?= __('Welcome') ?>"#)?;
    test.write_file("views/b.php", r#"<?= __('Goodbye') ?>"#)?;

    let output = test.migrate_command("views", CATALOG).output()?;

    assert_eq!(output.status.code(), Some(2));
    let err = stderr(&output);
    assert!(err.contains("Error:"));
    assert!(err.contains("Failed to read catalog"));
    assert_eq!(test.read_file("views/a.php")?, r#"<?= __('Welcome') ?>"#);
    assert_eq!(test.read_file("views/b.php")?, r#"<?= __('Goodbye') ?>"#);
    Ok(())
}

#[test]
fn test_wrong_argument_count_is_usage_error() -> Result<()> {
    let test = CliTest::with_file("views/home.php", r#"__("Hello")"#)?;

    let mut cmd = test.command();
    cmd.arg("views");
    let output = cmd.output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
    assert_eq!(test.read_file("views/home.php")?, r#"__("Hello")"#);
    assert!(!test.exists(CATALOG));
    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("views/home.php", r#"__("Hello")"#)?;

    let mut cmd = test.migrate_command("views", CATALOG);
    cmd.arg("--dry-run");
    let output = cmd.output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("views/home.php")?, r#"__("Hello")"#);
    assert!(!test.exists(CATALOG));
    let out = stdout(&output);
    assert!(out.contains("Would update"));
    assert!(out.contains("Would add 1 key(s)"));
    Ok(())
}

#[test]
fn test_wordless_literal_is_stable_across_runs() -> Result<()> {
    let test = CliTest::with_file("views/home.php", r#"<?= __('...') ?>"#)?;

    let first = test.migrate_command("views", CATALOG).output()?;
    assert!(first.status.success());
    assert_eq!(test.read_file("views/home.php")?, r#"<?= __("messages._1") ?>"#);
    let catalog = test.read_file(CATALOG)?;

    let second = test.migrate_command("views", CATALOG).output()?;
    assert!(second.status.success());
    assert_eq!(test.read_file("views/home.php")?, r#"<?= __("messages._1") ?>"#);
    assert_eq!(test.read_file(CATALOG)?, catalog);
    Ok(())
}

#[test]
fn test_config_file_function() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keyshiftrc.json", r#"{ "function": "trans" }"#)?;
    test.write_file("views/home.php", r#"<?= trans('Home') ?> <?= __('Left') ?>"#)?;

    let output = test.migrate_command("views", CATALOG).output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_file("views/home.php")?,
        r#"<?= trans("messages.home") ?> <?= __('Left') ?>"#
    );
    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file("views/home.php", r#"__("Hello")"#)?;
    test.write_file(".keyshiftrc.json", r#"{ "ignores": ["**/[oops"] }"#)?;

    let output = test.migrate_command("views", CATALOG).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("ignores"));
    assert_eq!(test.read_file("views/home.php")?, r#"__("Hello")"#);
    Ok(())
}
