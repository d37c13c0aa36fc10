use bytestate_core::PipelineConfig;
use bytestate_sim::{run_sweep, write_csv, SweepConfig, SweepRow};

fn small_config() -> SweepConfig {
    SweepConfig {
        sigmas: vec![0.5, 1.0],
        samples: 200,
        seed: 9,
        ..SweepConfig::default()
    }
}

fn row(rows: &[SweepRow], sigma: f32, config: PipelineConfig) -> SweepRow {
    *rows
        .iter()
        .find(|r| r.sigma == sigma && r.config == config)
        .expect("row missing")
}

#[test]
fn one_row_per_sigma_and_config() {
    let rows = run_sweep(&small_config());
    assert_eq!(rows.len(), 2 * PipelineConfig::ALL.len());
    assert!(rows.iter().all(|r| r.samples == 200));
}

#[test]
fn pure_pipeline_is_high_fidelity_at_half_sigma() {
    let rows = run_sweep(&small_config());
    let pure = row(&rows, 0.5, PipelineConfig::Pure);
    println!("pure @ 0.5: mean={:.6} max={:.6}", pure.mean_error, pure.max_error);
    assert!(pure.fidelity_ok);
    assert!(pure.mean_error < 0.005);
}

#[test]
fn transforms_add_error() {
    let rows = run_sweep(&small_config());
    let pure = row(&rows, 0.5, PipelineConfig::Pure);
    let full = row(&rows, 0.5, PipelineConfig::FullSemantic);
    let processing = row(&rows, 0.5, PipelineConfig::WithProcessing);
    assert!(full.mean_error > processing.mean_error);
    assert!(processing.mean_error > pure.mean_error);
}

#[test]
fn sweep_is_deterministic() {
    assert_eq!(run_sweep(&small_config()), run_sweep(&small_config()));
}

#[test]
fn csv_has_header_and_rows() {
    let rows = run_sweep(&SweepConfig {
        sigmas: vec![0.5],
        configs: vec![PipelineConfig::Pure],
        samples: 10,
        ..SweepConfig::default()
    });
    let mut out = Vec::new();
    write_csv(&rows, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("sigma,config,samples,mean_error,max_error,fidelity_ok")
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("0.5,pure,10,"), "unexpected row {}", first);
    assert!(first.ends_with(",true"));
    assert!(lines.next().is_none());
}

#[test]
fn config_file_loads() {
    let path = std::env::temp_dir().join(format!("bytestate_sweep_{}.toml", std::process::id()));
    std::fs::write(&path, "samples = 5\nsigmas = [0.25]\n").unwrap();
    let config = SweepConfig::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.samples, 5);
    assert_eq!(config.sigmas, vec![0.25]);
    assert_eq!(config.configs, PipelineConfig::ALL.to_vec());

    assert!(SweepConfig::load_from_file(&path).is_err());
}
