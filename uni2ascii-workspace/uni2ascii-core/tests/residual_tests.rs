use uni2ascii_core::{
    ResidualError, ResidualPolicy, Uni2AsciiConfig, has_residue, residual_runs, to_ascii_lossy,
    trim_line, uni2ascii,
};

#[test]
fn pass_keeps_everything() {
    let line = uni2ascii("snow \u{2603}\n");
    assert_eq!(
        ResidualPolicy::Pass.apply(&line).unwrap().as_deref(),
        Some("snow \u{2603}\n")
    );
}

#[test]
fn error_points_at_first_residue() {
    let line = uni2ascii("Café \u{4E2D}\u{6587}");
    let err = ResidualPolicy::Error.apply(&line).unwrap_err();
    assert_eq!(
        err,
        ResidualError::NonAscii {
            ch: '\u{4E2D}',
            code: 0x4E2D,
            column: 6
        }
    );
    assert!(err.to_string().contains("U+4E2D"));
}

#[test]
fn error_accepts_clean_lines() {
    let line = uni2ascii("naïve\n");
    assert_eq!(ResidualPolicy::Error.apply(&line).unwrap().as_deref(), Some("naive\n"));
}

#[test]
fn drop_line_only_drops_residue() {
    assert_eq!(ResidualPolicy::DropLine.apply("\u{05D0}\n").unwrap(), None);
    assert_eq!(ResidualPolicy::DropLine.apply("ok\n").unwrap().as_deref(), Some("ok\n"));
}

#[test]
fn replace_collapses_runs() {
    let line = "a\u{4E2D}\u{6587}b\u{05D0}c";
    assert_eq!(residual_runs(line), vec![(1, 7), (8, 10)]);
    let policy = ResidualPolicy::Replace("<?>".to_string());
    assert_eq!(policy.apply(line).unwrap().as_deref(), Some("a<?>b<?>c"));
    let delete = ResidualPolicy::Replace(String::new());
    assert_eq!(delete.apply(line).unwrap().as_deref(), Some("abc"));
}

#[test]
fn helpers() {
    assert!(!has_residue("plain"));
    assert!(has_residue("pl\u{00E6}in"));
    assert_eq!(to_ascii_lossy("x\u{1F600}y\n"), "xy\n");
    assert_eq!(trim_line("  padded \t\r\n"), "padded\r\n");
    assert_eq!(trim_line("  no newline "), "no newline");
    assert_eq!(trim_line(""), "");
}

#[test]
fn policy_from_config() {
    let cfg: Uni2AsciiConfig = toml::from_str(
        "[residual]\nmode = \"replace\"\nreplacement = \"?\"\n\n[output]\ntrim = true\n",
    )
    .unwrap();
    assert_eq!(cfg.residual, ResidualPolicy::Replace("?".to_string()));
    assert!(cfg.output.trim);
    assert_eq!(cfg.log.level, "warn");

    let cfg: Uni2AsciiConfig = toml::from_str("[residual]\nmode = \"drop_line\"\n").unwrap();
    assert_eq!(cfg.residual, ResidualPolicy::DropLine);

    let cfg: Uni2AsciiConfig = toml::from_str("").unwrap();
    assert_eq!(cfg.residual, ResidualPolicy::Pass);
    assert!(cfg.table.extra.is_none());
}

#[test]
fn config_load_resolves_table_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("more.txt"), "\u{2190} <-\n").unwrap();
    let path = dir.path().join("uni2ascii.toml");
    std::fs::write(&path, "[table]\nextra = \"more.txt\"\n[log]\nlevel = \"debug\"\n").unwrap();

    let cfg = Uni2AsciiConfig::load(&path).unwrap();
    assert_eq!(cfg.table.extra.as_deref(), Some(dir.path().join("more.txt").as_path()));
    assert_eq!(cfg.log.level, "debug");
    let table = cfg.build_table().unwrap();
    assert_eq!(table.get("\u{2190}"), Some("<-"));
}

#[test]
fn config_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Uni2AsciiConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.residual, ResidualPolicy::Pass);
    assert_eq!(cfg.build_table().unwrap().len(), 146);
}

#[test]
fn config_bad_table_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.txt"), "one two three\n").unwrap();
    let path = dir.path().join("uni2ascii.toml");
    std::fs::write(&path, "[table]\nextra = \"bad.txt\"\n").unwrap();
    let err = Uni2AsciiConfig::load(&path).unwrap().build_table().unwrap_err();
    assert!(format!("{err:#}").contains("line 1"), "{err:#}");
}
