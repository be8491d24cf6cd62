use brisk_cli::commands::{present, watch_scripts, watch_styles};
use brisk_cli::config::BriskConfig;
use brisk_cli::dev::{ReloadEvent, ReloadSink, SassWatcher};
use brisk_cli::pipeline::{Pipeline, PipelineDef, PipelineOutcome, scripts, styles};
use brisk_scripts::BundleMode;
use parking_lot::Mutex;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn theme() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "assets/sass/_variables.scss",
        "$brand: #cc0000;\n",
    );
    write(
        dir.path(),
        "assets/sass/main.scss",
        "@import 'variables';\n\
         .site-header {\n  color: $brand;\n  user-select: none;\n  .title { font-weight: bold; }\n}\n",
    );
    write(
        dir.path(),
        "assets/js/menu.js",
        "export const label = (open) => open ? 'Close' : 'Menu';\n",
    );
    write(
        dir.path(),
        "assets/js/main.js",
        "import { label } from './menu';\n\
         window.__menu = <button className=\"menu\">{label(false)}</button>;\n",
    );
    dir
}

#[derive(Default)]
struct RecordingSink(Mutex<Vec<ReloadEvent>>);

impl ReloadSink for RecordingSink {
    fn send(&self, event: ReloadEvent) {
        self.0.lock().push(event);
    }
}

#[tokio::test]
async fn test_styles_produce_both_artifacts() {
    let dir = theme();
    let config = BriskConfig::default();
    let def = PipelineDef::styles(&config, dir.path());
    let options = config.style_options(dir.path()).unwrap();

    let outcome = styles::run(&def, &options).await;
    let PipelineOutcome::Built(report) = outcome else {
        panic!("styles failed: {outcome:?}");
    };
    assert_eq!(report.file_names(), vec!["style.css", "style.min.css"]);

    let full = fs::read_to_string(&def.output).unwrap();
    let minified = fs::read_to_string(&def.minified).unwrap();
    assert!(full.contains(".site-header .title"));
    assert!(full.contains("#c00") || full.contains("#cc0000"));
    assert!(minified.len() <= full.len());
}

#[tokio::test]
async fn test_style_error_keeps_previous_artifacts() {
    let dir = theme();
    let config = BriskConfig::default();
    let def = PipelineDef::styles(&config, dir.path());
    let options = config.style_options(dir.path()).unwrap();

    assert!(styles::run(&def, &options).await.is_built());
    let good = fs::read_to_string(&def.output).unwrap();

    write(
        dir.path(),
        "assets/sass/main.scss",
        ".site-header { color: $undefined-brand; }\n",
    );
    let sink = RecordingSink::default();
    let outcome = styles::run(&def, &options).await;
    present(&outcome, &sink);

    match &outcome {
        PipelineOutcome::Failed(failure) => {
            assert_eq!(failure.title, "Compile Error");
            assert_eq!(failure.pipeline, Pipeline::Styles);
            assert!(failure.message.contains("Undefined variable"));
        }
        other => panic!("expected a compile failure, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&def.output).unwrap(), good);
    assert!(matches!(
        sink.0.lock().as_slice(),
        [ReloadEvent::Notify { title, .. }] if title == "Compile Error"
    ));

    // Fixing the file builds again
    write(
        dir.path(),
        "assets/sass/main.scss",
        ".site-header { color: navy; }\n",
    );
    assert!(styles::run(&def, &options).await.is_built());
    assert!(fs::read_to_string(&def.output).unwrap().contains("navy"));
}

#[tokio::test]
async fn test_prefixes_survive_minification() {
    let dir = theme();
    write(
        dir.path(),
        "brisk.toml",
        "[styles]\nbrowsers = [\"safari 6\"]\n",
    );
    let config = BriskConfig::load(dir.path(), None, None).unwrap();
    let def = PipelineDef::styles(&config, dir.path());
    let options = config.style_options(dir.path()).unwrap();

    assert!(styles::run(&def, &options).await.is_built());
    let minified = fs::read_to_string(&def.minified).unwrap();
    assert!(minified.contains("-webkit-user-select"));
}

#[tokio::test]
async fn test_scripts_produce_both_artifacts() {
    let dir = theme();
    let config = BriskConfig::default();
    let def = PipelineDef::scripts(&config, dir.path());
    let options = config.script_options(dir.path()).unwrap();

    let (_handle, outcome) = scripts::build(&def, options, BundleMode::Once)
        .await
        .unwrap();
    let sink = RecordingSink::default();
    present(&outcome, &sink);
    assert!(outcome.is_built(), "scripts failed: {outcome:?}");

    let full = fs::read_to_string(&def.output).unwrap();
    let minified = fs::read_to_string(&def.minified).unwrap();
    assert!(full.contains("React.createElement"));
    assert!(full.contains("//# sourceMappingURL=data:application/json"));
    assert!(!minified.contains("sourceMappingURL"));
    assert!(minified.len() < full.len());

    assert_eq!(*sink.0.lock(), vec![ReloadEvent::Reload]);
}

#[tokio::test]
async fn test_script_error_keeps_previous_artifacts() {
    let dir = theme();
    let config = BriskConfig::default();
    let def = PipelineDef::scripts(&config, dir.path());
    let options = config.script_options(dir.path()).unwrap();

    let (_handle, outcome) = scripts::build(&def, options.clone(), BundleMode::Once)
        .await
        .unwrap();
    assert!(outcome.is_built(), "scripts failed: {outcome:?}");
    let good_full = fs::read(&def.output).unwrap();
    let good_min = fs::read(&def.minified).unwrap();

    write(dir.path(), "assets/js/main.js", "const = ;\n");
    let (_handle, outcome) = scripts::build(&def, options, BundleMode::Once)
        .await
        .unwrap();
    let sink = RecordingSink::default();
    present(&outcome, &sink);

    match &outcome {
        PipelineOutcome::Failed(failure) => {
            assert_eq!(failure.title, "Compile Error");
            assert_eq!(failure.pipeline, Pipeline::Scripts);
            assert!(failure.message.contains("main.js: Unexpected token"), "{}", failure.message);
        }
        other => panic!("expected a compile failure, got {other:?}"),
    }
    assert_eq!(fs::read(&def.output).unwrap(), good_full);
    assert_eq!(fs::read(&def.minified).unwrap(), good_min);
    assert!(matches!(
        sink.0.lock().as_slice(),
        [ReloadEvent::Notify { title, .. }] if title == "Compile Error"
    ));
}

/// Wait until `sink` has recorded `count` events.
async fn wait_for_events(sink: &RecordingSink, count: usize) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while sink.0.lock().len() < count {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("expected {count} reload events, got {:?}", sink.0.lock()));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_style_watch_rebuilds_once_per_change() {
    let dir = theme();
    let config = BriskConfig::default();
    let def = PipelineDef::styles(&config, dir.path());
    let options = config.style_options(dir.path()).unwrap();

    let (_watcher, changes) = SassWatcher::new(
        dir.path(),
        &dir.path().join(&config.styles.base),
        &config.styles.watch,
        Duration::from_millis(config.styles.debounce),
    )
    .unwrap();
    let sink = Arc::new(RecordingSink::default());
    let task = tokio::spawn(watch_styles(def.clone(), options, changes, sink.clone()));

    for round in 1..=3 {
        tokio::time::sleep(Duration::from_millis(300)).await;
        write(
            dir.path(),
            "assets/sass/main.scss",
            &format!("@import 'variables';\n.round-{round} {{ color: $brand; }}\n"),
        );
        wait_for_events(&sink, round).await;
        let css = fs::read_to_string(&def.output).unwrap();
        assert!(css.contains(&format!(".round-{round}")));
    }

    tokio::time::sleep(Duration::from_millis(300)).await;
    task.abort();

    let events = sink.0.lock().clone();
    assert_eq!(events.len(), 3, "{events:?}");
    assert!(events.iter().all(|event| matches!(
        event,
        ReloadEvent::Inject { files } if files == &["style.css", "style.min.css"]
    )));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_script_watch_rebundles_once_per_change() {
    let dir = theme();
    let config = BriskConfig::default();
    let def = PipelineDef::scripts(&config, dir.path());
    let options = config.script_options(dir.path()).unwrap();

    let (mut handle, outcome) = scripts::build(&def, options, BundleMode::Watch)
        .await
        .unwrap();
    assert!(outcome.is_built(), "scripts failed: {outcome:?}");
    let updates = handle.subscribe().unwrap();
    let sink = RecordingSink::default();

    let edits = async {
        for round in 1..=3 {
            tokio::time::sleep(Duration::from_millis(300)).await;
            write(
                dir.path(),
                "assets/js/menu.js",
                &format!("export const label = () => 'round{round}';\n"),
            );
            wait_for_events(&sink, round).await;
            let code = fs::read_to_string(&def.output).unwrap();
            assert!(code.contains(&format!("round{round}")));
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
    };

    tokio::select! {
        () = watch_scripts(&def, &mut handle, updates, &sink) => panic!("script watch ended"),
        () = edits => {}
    }

    assert_eq!(
        *sink.0.lock(),
        vec![ReloadEvent::Reload, ReloadEvent::Reload, ReloadEvent::Reload]
    );
}
