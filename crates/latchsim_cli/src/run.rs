//! The `latchsim run` command: simulates a circuit file and prints its
//! output traces.

use std::path::PathBuf;

use latchsim_config::OutputFormat;
use latchsim_sim::render::render_outputs;
use latchsim_sim::{Circuit, SimConfig};
use serde_json::json;

use crate::pipeline::{self, LoadedCircuit};
use crate::{GlobalArgs, ReportFormat, RunArgs};

/// Runs the `latchsim run` command.
///
/// Returns exit code 0 on success. Load, validation and simulation failures
/// are propagated as errors.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let loaded = pipeline::load(&args.circuit, global)?;

    let format = resolve_format(args, &loaded);
    let waveform_path = resolve_waveform(args, &loaded);

    if !global.quiet {
        eprintln!("   Simulating {}", loaded.file.circuit.name);
    }

    let config = SimConfig {
        record_waveform: waveform_path.is_some(),
        waveform_path: waveform_path.clone(),
    };
    let circuit = latchsim_sim::simulate(loaded.model, &config, loaded.interner)?;

    print!("{}", format_report(&circuit, format)?);

    if !global.quiet {
        eprintln!(
            "   Finished {} cycle(s), {} output(s)",
            circuit.simulation_length(),
            circuit.simoutputs().len()
        );
        if let Some(path) = &waveform_path {
            eprintln!("   Waveform written to {}", path.display());
        }
    }

    Ok(0)
}

/// The `--format` flag wins over `[output] format`.
fn resolve_format(args: &RunArgs, loaded: &LoadedCircuit) -> ReportFormat {
    args.format.unwrap_or(match loaded.file.output.format {
        OutputFormat::Text => ReportFormat::Text,
        OutputFormat::Json => ReportFormat::Json,
    })
}

/// The `--waveform` flag wins over `[output] waveform`; `--no-waveform`
/// disables both. File-configured paths are relative to the circuit file.
fn resolve_waveform(args: &RunArgs, loaded: &LoadedCircuit) -> Option<PathBuf> {
    if args.no_waveform {
        return None;
    }
    if let Some(path) = &args.waveform {
        return Some(PathBuf::from(path));
    }
    loaded
        .file
        .output
        .waveform
        .as_deref()
        .map(|target| pipeline::relative_to_circuit(&loaded.path, target))
}

/// Formats the output traces of a completed circuit.
pub fn format_report(
    circuit: &Circuit,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_outputs(circuit)),
        ReportFormat::Json => {
            let interner = circuit.interner();
            let outputs: Vec<_> = circuit
                .simoutputs()
                .iter()
                .map(|trace| {
                    json!({
                        "signal": interner.resolve(trace.signal),
                        "values": trace.bits().to_string(),
                    })
                })
                .collect();
            let report = json!({
                "circuit": circuit.name(),
                "cycles": circuit.simulation_length(),
                "outputs": outputs,
            });
            let mut text = serde_json::to_string_pretty(&report)?;
            text.push('\n');
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TOGGLE: &str = r#"
[circuit]
name = "toggle"
inputs = ["en"]
outputs = ["q"]

[[latches]]
input = "d"
output = "q"

[[updates]]
target = "d"
expr = { or = [{ and = ["en", { not = "q" }] }, { and = [{ not = "en" }, "q"] }] }

[simulate]
en = "1101"
"#;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
        }
    }

    fn run_args(circuit: &std::path::Path) -> RunArgs {
        RunArgs {
            circuit: circuit.to_str().unwrap().to_string(),
            format: None,
            waveform: None,
            no_waveform: false,
        }
    }

    fn write_circuit(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn simulate_file(path: &std::path::Path) -> Circuit {
        let loaded = pipeline::load(path.to_str().unwrap(), &quiet()).unwrap();
        latchsim_sim::simulate(loaded.model, &SimConfig::default(), loaded.interner).unwrap()
    }

    #[test]
    fn run_toggle_succeeds() {
        let tmp = TempDir::new().unwrap();
        let path = write_circuit(&tmp, "toggle.toml", TOGGLE);
        let code = run(&run_args(&path), &quiet()).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn text_report_lists_outputs() {
        let tmp = TempDir::new().unwrap();
        let path = write_circuit(&tmp, "toggle.toml", TOGGLE);
        let circuit = simulate_file(&path);
        // q toggles after every enabled cycle: 0, 1, 0, 0
        let report = format_report(&circuit, ReportFormat::Text).unwrap();
        assert_eq!(report, "0100 q\n");
    }

    #[test]
    fn json_report_shape() {
        let tmp = TempDir::new().unwrap();
        let path = write_circuit(&tmp, "toggle.toml", TOGGLE);
        let circuit = simulate_file(&path);
        let report = format_report(&circuit, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["circuit"], "toggle");
        assert_eq!(value["cycles"], 4);
        assert_eq!(value["outputs"][0]["signal"], "q");
        assert_eq!(value["outputs"][0]["values"], "0100");
    }

    #[test]
    fn run_writes_waveform_flag_path() {
        let tmp = TempDir::new().unwrap();
        let path = write_circuit(&tmp, "toggle.toml", TOGGLE);
        let vcd = tmp.path().join("out.vcd");
        let mut args = run_args(&path);
        args.waveform = Some(vcd.to_str().unwrap().to_string());

        assert_eq!(run(&args, &quiet()).unwrap(), 0);
        let content = fs::read_to_string(&vcd).unwrap();
        assert!(content.contains("$enddefinitions $end"));
    }

    #[test]
    fn run_writes_waveform_from_file_relative() {
        let tmp = TempDir::new().unwrap();
        let content = format!("{TOGGLE}\n[output]\nwaveform = \"toggle.vcd\"\n");
        let path = write_circuit(&tmp, "toggle.toml", &content);

        assert_eq!(run(&run_args(&path), &quiet()).unwrap(), 0);
        assert!(tmp.path().join("toggle.vcd").is_file());
    }

    #[test]
    fn no_waveform_wins() {
        let tmp = TempDir::new().unwrap();
        let content = format!("{TOGGLE}\n[output]\nwaveform = \"toggle.vcd\"\n");
        let path = write_circuit(&tmp, "toggle.toml", &content);
        let mut args = run_args(&path);
        args.no_waveform = true;

        assert_eq!(run(&args, &quiet()).unwrap(), 0);
        assert!(!tmp.path().join("toggle.vcd").exists());
    }

    #[test]
    fn format_flag_overrides_file() {
        let tmp = TempDir::new().unwrap();
        let content = format!("{TOGGLE}\n[output]\nformat = \"json\"\n");
        let path = write_circuit(&tmp, "toggle.toml", &content);
        let loaded = pipeline::load(path.to_str().unwrap(), &quiet()).unwrap();

        let mut args = run_args(&path);
        assert_eq!(resolve_format(&args, &loaded), ReportFormat::Json);
        args.format = Some(ReportFormat::Text);
        assert_eq!(resolve_format(&args, &loaded), ReportFormat::Text);
    }

    #[test]
    fn run_reports_simulation_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_circuit(
            &tmp,
            "dup.toml",
            "[circuit]\nname = \"dup\"\ninputs = [\"a\"]\n\n[[updates]]\ntarget = \"a\"\nexpr = \"a\"\n\n[simulate]\na = \"1\"\n",
        );
        let err = run(&run_args(&path), &quiet()).err().unwrap();
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn run_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let args = run_args(&tmp.path().join("absent.toml"));
        assert!(run(&args, &quiet()).is_err());
    }
}
