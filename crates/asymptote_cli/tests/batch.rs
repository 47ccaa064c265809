use std::fs;
use std::sync::Once;

use asymptote_cli::{
    extract_all, load_config, pages_from_bytes, read_inputs, to_json_lines, AtomicFileWriter,
    CliConfig, ConfigError, InputError, InputOptions, PageRecord, RawPage,
};
use asymptote_core::{PageExtractor, Vocabulary};
use log::LevelFilter;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(asymptote_logging::initialize_for_tests);
}

#[test]
fn missing_config_path_means_defaults() {
    let config = load_config(None).unwrap();
    assert_eq!(config, CliConfig::default());
    assert_eq!(config.level_filter().unwrap(), None);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("asymptote.ron");
    fs::write(
        &path,
        r#"(
            vocabulary: (
                auxiliary_sections: ["trivia"],
                max_depth: 12,
            ),
            log_level: Some("debug"),
        )"#,
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    let defaults = Vocabulary::default();

    assert!(config.vocabulary.is_auxiliary_section("trivia"));
    assert!(!config.vocabulary.is_auxiliary_section("see also"));
    assert_eq!(config.vocabulary.max_depth, 12);
    assert_eq!(config.vocabulary.excluded_sections, defaults.excluded_sections);
    assert_eq!(config.vocabulary.ignored_templates, defaults.ignored_templates);
    assert_eq!(config.level_filter().unwrap(), Some(LevelFilter::Debug));
}

#[test]
fn config_round_trips_through_ron() {
    let config = CliConfig {
        log_level: Some("info".to_string()),
        ..CliConfig::default()
    };
    let text = config.to_ron().unwrap();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.ron");
    fs::write(&path, text).unwrap();

    assert_eq!(load_config(Some(&path)).unwrap(), config);
}

#[test]
fn config_errors_name_the_problem() {
    let temp = TempDir::new().unwrap();

    let missing = temp.path().join("absent.ron");
    assert!(matches!(
        load_config(Some(&missing)),
        Err(ConfigError::Read { .. })
    ));

    let broken = temp.path().join("broken.ron");
    fs::write(&broken, "(vocabulary: (max_depth: \"deep\"))").unwrap();
    let err = load_config(Some(&broken)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.ron"), "{err}");

    let config = CliConfig {
        log_level: Some("chatty".to_string()),
        ..CliConfig::default()
    };
    assert!(matches!(config.level_filter(), Err(ConfigError::LogLevel(_))));
}

#[test]
fn raw_files_become_one_page_titled_by_stem() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Mars.wiki");
    fs::write(&path, "\u{feff}Mars is a [[planet]].").unwrap();

    let pages = read_inputs(&[path], &InputOptions::default()).unwrap();

    assert_eq!(
        pages,
        vec![RawPage {
            title: "Mars".to_string(),
            text: "Mars is a [[planet]].".to_string(),
        }]
    );
}

#[test]
fn legacy_encodings_decode_with_a_label() {
    init_logging();
    let options = InputOptions {
        encoding: Some("windows-1252".to_string()),
        ..InputOptions::default()
    };

    let pages = pages_from_bytes("cafe.wiki", "Cafe", b"Caf\xE9 au lait", &options).unwrap();

    assert_eq!(pages[0].text, "Café au lait");
}

#[test]
fn jsonl_lines_become_pages_and_blank_lines_are_skipped() {
    init_logging();
    let options = InputOptions {
        jsonl: true,
        ..InputOptions::default()
    };
    let input = "{\"title\":\"A\",\"text\":\"one\"}\n\n{\"title\":\"B\",\"text\":\"two\"}\n";

    let pages = pages_from_bytes("dump.jsonl", "dump", input.as_bytes(), &options).unwrap();

    assert_eq!(
        pages.iter().map(|page| page.title.as_str()).collect::<Vec<_>>(),
        vec!["A", "B"]
    );

    let err = pages_from_bytes("dump.jsonl", "dump", b"{\"title\":\"A\"}\nnot json", &options)
        .unwrap_err();
    match err {
        InputError::Json { line, .. } => assert_eq!(line, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unreadable_inputs_report_the_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.wiki");

    let err = read_inputs(&[missing], &InputOptions::default()).unwrap_err();

    assert!(matches!(err, InputError::Read { .. }));
    assert!(err.to_string().contains("nope.wiki"), "{err}");
}

#[test]
fn records_keep_input_order_and_flatten_channels() {
    init_logging();
    let pages: Vec<RawPage> = (0..32)
        .map(|n| RawPage {
            title: format!("Page {n}"),
            text: format!("Number {n} links [[target {n}]]."),
        })
        .collect();

    let records = extract_all(&PageExtractor::default(), &pages);

    assert_eq!(records.len(), 32);
    assert_eq!(records[7].title, "Page 7");
    assert_eq!(records[7].page.text, "Number 7 links target 7.");
    assert_eq!(records[7].page.links, vec!["Target_7".to_string()]);

    let lines = to_json_lines(&records[..2]).unwrap();
    let parsed: Vec<PageRecord> = lines
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(parsed, records[..2].to_vec());

    let first: serde_json::Value = serde_json::from_str(lines.lines().next().unwrap()).unwrap();
    assert_eq!(first["title"], "Page 0");
    assert_eq!(first["opening_text"], "Number 0 links target 0.");
}

#[test]
fn atomic_write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("out").join("pages.jsonl");
    let writer = AtomicFileWriter::new(target.clone());

    let first = writer.write("hello\n").unwrap().to_path_buf();
    assert_eq!(first, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "hello\n");

    writer.write("world\n").unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "world\n");
    assert_eq!(fs::read_dir(target.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn atomic_write_leaves_nothing_behind_on_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let writer = AtomicFileWriter::new(blocker.join("pages.jsonl"));

    assert!(writer.write("data").is_err());
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
}
