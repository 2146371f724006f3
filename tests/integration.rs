use std::fs;
use std::path::Path;

use sidebar_sync::config::{Target, default_targets};
use sidebar_sync::pipeline::sync_all;
use sidebar_sync::updater::{UpdateError, UpdateOutcome, Updater, WriteMode};

const PREFIX: &str = "<!DOCTYPE html>\r\n<html lang=\"tr\">\r\n<head><title>Teklif</title></head>\r\n<body>\r\n  <div class=\"layout\">\r\n    ";
const SUFFIX: &str = "\r\n    <main class=\"content\">\r\n      <h2>Teklif Listesi</h2>\r\n    </main>\r\n  </div>\r\n</body>\r\n</html>\r\n";

const OLD_SIDEBAR: &str = r#"<aside class="sidebar">
      <div class="sidebar-header">
        <h1>ADM</h1>
      </div>
      <nav class="sidebar-nav">
        <a href="kesif.html" class="nav-item active" id="navKesif">1. Keşif</a>
        <a href="teklif.html" class="nav-item" id="navTeklif">2. Teklif</a>
      </nav>
      <div class="sidebar-footer">
        <div class="user-info">Yükleniyor...</div>
      </div>
    </aside>"#;

fn page_with_old_sidebar() -> String {
    format!("{PREFIX}{OLD_SIDEBAR}{SUFFIX}")
}

fn nav_line<'a>(html: &'a str, id: &str) -> &'a str {
    html.lines()
        .find(|line| line.contains(&format!("id=\"{id}\"")))
        .unwrap_or_else(|| panic!("missing {id}"))
}

#[test]
fn update_moves_active_entry_from_kesif_to_teklif() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teklif.html");
    fs::write(&path, page_with_old_sidebar()).unwrap();

    let updater = Updater::builtin(WriteMode::Apply).unwrap();
    assert!(matches!(
        updater.update(&path, "teklif"),
        UpdateOutcome::Changed
    ));

    let html = fs::read_to_string(&path).unwrap();
    assert!(nav_line(&html, "navTeklif").contains("class=\"nav-item active\""));
    assert!(nav_line(&html, "navKesif").contains("class=\"nav-item\""));
    assert_eq!(html.matches("class=\"nav-item active\"").count(), 1);
}

#[test]
fn content_outside_sidebar_is_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("teklif.html");
    fs::write(&path, page_with_old_sidebar()).unwrap();

    let updater = Updater::builtin(WriteMode::Apply).unwrap();
    updater.update(&path, "teklif");

    let html = fs::read_to_string(&path).unwrap();
    assert!(html.starts_with(PREFIX));
    assert!(html.ends_with(SUFFIX));
    let expected = format!(
        "{PREFIX}<aside class=\"sidebar\">\n{}\n    </aside>{SUFFIX}",
        updater.render("teklif")
    );
    assert_eq!(html, expected);
}

#[test]
fn second_update_reports_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sozlesme.html");
    fs::write(&path, page_with_old_sidebar()).unwrap();

    let updater = Updater::builtin(WriteMode::Apply).unwrap();
    assert!(matches!(
        updater.update(&path, "sozlesme"),
        UpdateOutcome::Changed
    ));
    let after_first = fs::read(&path).unwrap();
    assert!(matches!(
        updater.update(&path, "sozlesme"),
        UpdateOutcome::Unchanged
    ));
    assert_eq!(fs::read(&path).unwrap(), after_first);
}

#[test]
fn page_without_sidebar_is_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.html");
    let original = "<html><body><nav class=\"top\">x</nav></body></html>\n";
    fs::write(&path, original).unwrap();

    let updater = Updater::builtin(WriteMode::Apply).unwrap();
    assert!(matches!(
        updater.update(&path, "teklif"),
        UpdateOutcome::Unchanged
    ));
    assert_eq!(fs::read(&path).unwrap(), original.as_bytes());
}

fn seed_dashboard(root: &Path) {
    let projects = root.join("web/projects");
    fs::create_dir_all(&projects).unwrap();
    fs::write(projects.join("teklif.html"), page_with_old_sidebar()).unwrap();
    fs::write(projects.join("odeme-takibi.html"), page_with_old_sidebar()).unwrap();
}

fn rooted_targets(root: &Path) -> Vec<Target> {
    default_targets()
        .into_iter()
        .map(|target| Target::new(root.join(&target.path), target.active_page))
        .collect()
}

#[test]
fn missing_page_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    seed_dashboard(dir.path());

    let updater = Updater::builtin(WriteMode::Apply).unwrap();
    let summary = sync_all(&updater, &rooted_targets(dir.path()));

    assert_eq!(summary.reports.len(), 3);
    assert!(matches!(summary.reports[0].outcome, UpdateOutcome::Changed));
    assert!(matches!(
        summary.reports[1].outcome,
        UpdateOutcome::Failed(UpdateError::Read { .. })
    ));
    assert!(matches!(summary.reports[2].outcome, UpdateOutcome::Changed));
    assert_eq!(summary.failed(), 1);
    assert!(!summary.is_success(WriteMode::Apply));

    let odeme = fs::read_to_string(dir.path().join("web/projects/odeme-takibi.html")).unwrap();
    assert!(nav_line(&odeme, "navOdeme").contains("class=\"nav-item active\""));
}

#[test]
fn check_mode_leaves_dashboard_untouched() {
    let dir = tempfile::tempdir().unwrap();
    seed_dashboard(dir.path());
    fs::write(
        dir.path().join("web/projects/sozlesme.html"),
        page_with_old_sidebar(),
    )
    .unwrap();

    let updater = Updater::builtin(WriteMode::Check).unwrap();
    let summary = sync_all(&updater, &rooted_targets(dir.path()));

    assert_eq!(summary.changed(), 3);
    assert!(!summary.is_success(WriteMode::Check));
    for name in ["teklif.html", "sozlesme.html", "odeme-takibi.html"] {
        let html = fs::read_to_string(dir.path().join("web/projects").join(name)).unwrap();
        assert_eq!(html, page_with_old_sidebar());
    }

    let apply = Updater::builtin(WriteMode::Apply).unwrap();
    sync_all(&apply, &rooted_targets(dir.path()));
    let recheck = sync_all(&updater, &rooted_targets(dir.path()));
    assert!(recheck.is_success(WriteMode::Check));
    assert_eq!(recheck.unchanged(), 3);
}
