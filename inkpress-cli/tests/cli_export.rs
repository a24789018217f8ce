use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

#[test]
fn export_all_writes_transformed_posts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let posts = dir.path().join("notes");
    fs::create_dir_all(&posts)?;

    fs::write(
        dir.path().join("inkpress.yml"),
        r#"
vault:
  posts_dir: "notes"
  export_dir: "out"
blog:
  url: "https://example.github.io"
"#,
    )?;

    fs::write(
        posts.join("First Note.md"),
        "---\ntitle: \"First Note\"\n---\n> [!note]\nSee ==this== text.\n",
    )?;

    Command::cargo_bin("inkpress")?
        .current_dir(dir.path())
        .args(["export", "--all"])
        .assert()
        .success();

    let out = dir.path().join("out");
    let entries: Vec<_> = fs::read_dir(&out)?.filter_map(|e| e.ok()).collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().into_string().unwrap();
    assert!(name.ends_with("-First-Note.md"), "unexpected name: {name}");

    let content = fs::read_to_string(entries[0].path())?;
    assert!(content.contains("title: \"First Note\""));
    assert!(content.contains("> [!note] note"));
    assert!(content.contains("**this**"));
    Ok(())
}

#[test]
fn export_without_paths_or_all_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("inkpress.yml"),
        "vault:\n  posts_dir: \"notes\"\n",
    )?;

    Command::cargo_bin("inkpress")?
        .current_dir(dir.path())
        .arg("export")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn export_rejects_paths_outside_posts_dir() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("inkpress.yml"),
        "vault:\n  posts_dir: \"notes\"\n",
    )?;
    fs::write(dir.path().join("stray.md"), "stray")?;

    Command::cargo_bin("inkpress")?
        .current_dir(dir.path())
        .args(["export", "stray.md"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn init_scaffolds_config_and_refuses_overwrite() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    Command::cargo_bin("inkpress")?
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    let config = fs::read_to_string(dir.path().join("inkpress.yml"))?;
    assert!(config.contains("posts_dir"));
    assert!(config.contains("commit_message_template"));

    Command::cargo_bin("inkpress")?
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure();

    Command::cargo_bin("inkpress")?
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn delete_fails_when_github_disabled() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("inkpress.yml"), "github:\n  enabled: false\n")?;
    fs::write(dir.path().join("note.md"), "text")?;

    Command::cargo_bin("inkpress")?
        .current_dir(dir.path())
        .args(["delete", "note.md", "--yes"])
        .assert()
        .failure();
    Ok(())
}
