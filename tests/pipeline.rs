use std::fs;
use std::path::{Path, PathBuf};

use dex_sim_charts::render::{PanelOutcome, TextSupport, render_all};
use dex_sim_charts::{ChartKind, Cli, LoadError, RenderOptions, load_dataset, run};
use serde_json::json;
use tempfile::TempDir;

const PNG_MAGIC: &[u8] = b"\x89PNG";

fn document(lp: serde_json::Value) -> serde_json::Value {
    json!({
        "timestamps": ["0", "1", "2", "3"],
        "reserveRatios": ["1000000000000000000", "1020000000000000000", "1050000000000000000", "1010000000000000000"],
        "spotPricesA": ["1000000000000000000", "1020000000000000000", "1050000000000000000", "1010000000000000000"],
        "totalValuesLockedA": ["100000000000000000000", "98000000000000000000", "96000000000000000000", "99000000000000000000"],
        "totalValuesLockedB": ["100000000000000000000", "102000000000000000000", "104500000000000000000", "101000000000000000000"],
        "cumulativeSwapVolumeA": ["0", "2000000000000000000", "4000000000000000000", "4000000000000000000"],
        "cumulativeSwapVolumeB": ["0", "0", "0", "3500000000000000000"],
        "slippages": [null, "20000000000000000", "41000000000000000", "30000000000000000"],
        "cumulativeFeesA": ["0", "6000000000000000", "12000000000000000", "12000000000000000"],
        "cumulativeFeesB": ["0", "0", "0", "10500000000000000"],
        "lpDistributionSnapshots": lp
    })
}

fn aligned_lp() -> serde_json::Value {
    json!([
        ["100000000000000000000", "0"],
        ["100000000000000000000", "0"],
        ["100000000000000000000", "50000000000000000000"],
        ["100000000000000000000", "50000000000000000000"]
    ])
}

fn write_document(dir: &Path, value: &serde_json::Value) -> PathBuf {
    let path = dir.join("simulation_data.json");
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

fn cli(input: PathBuf, output_dir: PathBuf) -> Cli {
    Cli {
        input,
        output_dir,
        decimals: 18,
        skip_individual: false,
        no_summary: true,
        font: None,
    }
}

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("{path:?}: {e}"));
    assert!(bytes.starts_with(PNG_MAGIC), "{path:?} is not a PNG");
}

#[test]
fn full_run_writes_all_seven_figures_into_a_new_directory() {
    let tmp = TempDir::new().unwrap();
    let input = write_document(tmp.path(), &document(aligned_lp()));
    let output_dir = tmp.path().join("nested").join("dex_plots");

    let report = run(&cli(input, output_dir.clone())).unwrap();

    assert!(report.render.is_complete());
    assert_eq!(report.render.written.len(), 7);
    assert_png(&output_dir.join("dex_simulation_combined.png"));
    for stem in [
        "reserves",
        "reserve_ratio_spot_price",
        "swap_volume",
        "slippage",
        "fee_accumulation",
        "lp_distribution",
    ] {
        assert_png(&output_dir.join(format!("{stem}.png")));
    }
    assert_eq!(report.dataset.n, 4);
    assert_eq!(report.dataset.slippages.len(), 3);
    assert!(report.summary.is_none());
}

#[test]
fn skip_individual_writes_only_the_overview() {
    let tmp = TempDir::new().unwrap();
    let input = write_document(tmp.path(), &document(aligned_lp()));
    let output_dir = tmp.path().join("out");

    let mut args = cli(input, output_dir.clone());
    args.skip_individual = true;
    let report = run(&args).unwrap();

    assert_eq!(report.render.written.len(), 1);
    let files: Vec<_> = fs::read_dir(&output_dir).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[test]
fn ragged_lp_snapshots_render_a_placeholder() {
    let tmp = TempDir::new().unwrap();
    let lp = json!([
        ["1000000000000000000", "2000000000000000000"],
        ["1000000000000000000"],
        ["1000000000000000000"],
        ["1000000000000000000"]
    ]);
    let input = write_document(tmp.path(), &document(lp));
    let dataset = load_dataset(&input, 18).unwrap();

    let options = RenderOptions {
        output_dir: tmp.path().join("plots"),
        individual: false,
        text: TextSupport::Disabled,
    };
    let report = render_all(&dataset, &options).unwrap();

    let combined = &report.written[0];
    let placeholders: Vec<ChartKind> = combined.placeholders().collect();
    assert_eq!(placeholders, vec![ChartKind::LpDistribution]);
    assert!(
        combined
            .panels
            .iter()
            .filter(|(kind, _)| *kind != ChartKind::LpDistribution)
            .all(|(_, outcome)| *outcome == PanelOutcome::Drawn)
    );
}

#[test]
fn unwritable_figure_is_reported_and_others_still_written() {
    let tmp = TempDir::new().unwrap();
    let input = write_document(tmp.path(), &document(aligned_lp()));
    let dataset = load_dataset(&input, 18).unwrap();

    let output_dir = tmp.path().join("out");
    let blocked = output_dir.join("slippage.png");
    fs::create_dir_all(&blocked).unwrap();

    let options = RenderOptions {
        output_dir: output_dir.clone(),
        individual: true,
        text: TextSupport::Disabled,
    };
    let report = render_all(&dataset, &options).unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.written.len(), 6);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, blocked);
    assert!(blocked.is_dir());
    for figure in &report.written {
        assert_png(&figure.path);
    }
}

#[test]
fn missing_input_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = run(&cli(tmp.path().join("absent.json"), tmp.path().join("out"))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::NotFound { .. })
    ));
    assert!(!tmp.path().join("out").exists());
}

#[test]
fn invalid_json_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("broken.json");
    fs::write(&input, "{ \"timestamps\": [").unwrap();
    let err = load_dataset(&input, 18).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoadError>(),
        Some(LoadError::InvalidJson(_))
    ));
}

#[test]
fn missing_field_is_named() {
    let tmp = TempDir::new().unwrap();
    let mut value = document(aligned_lp());
    value.as_object_mut().unwrap().remove("cumulativeFeesB");
    let input = write_document(tmp.path(), &value);

    let err = load_dataset(&input, 18).unwrap_err();
    match err.downcast_ref::<LoadError>() {
        Some(LoadError::MissingField { field }) => assert_eq!(field, "cumulativeFeesB"),
        other => panic!("expected MissingField, got {other:?}"),
    }
    assert!(format!("{err:#}").contains("cumulativeFeesB"));
}
