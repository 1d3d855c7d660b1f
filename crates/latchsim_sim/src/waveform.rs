//! Waveform recording for completed runs.
//!
//! The [`WaveformRecorder`] trait abstracts waveform output. [`VcdRecorder`]
//! writes IEEE 1364 Value Change Dump text that GTKWave, Surfer and other
//! viewers open directly. [`record_run`] replays the traces of a finished
//! circuit into a recorder, one time unit per cycle.

use std::collections::HashSet;
use std::io::Write;

use latchsim_common::Ident;

use crate::circuit::{Circuit, SimPhase};
use crate::error::SimError;

/// Trait for recording single-bit signal waveforms.
pub trait WaveformRecorder {
    /// Registers a signal for recording.
    fn register_signal(&mut self, id: Ident, name: &str) -> Result<(), SimError>;

    /// Opens a new scope in the waveform hierarchy.
    fn begin_scope(&mut self, name: &str) -> Result<(), SimError>;

    /// Closes the current scope.
    fn end_scope(&mut self) -> Result<(), SimError>;

    /// Records the value of a signal at the given cycle.
    fn record_change(&mut self, cycle: u64, id: Ident, value: bool) -> Result<(), SimError>;

    /// Finalizes the output (trailer, flush).
    fn finalize(&mut self) -> Result<(), SimError>;
}

/// VCD recorder following IEEE 1364.
///
/// Identifier codes are printable ASCII starting from `!` (0x21).
pub struct VcdRecorder<W: Write> {
    writer: W,
    id_map: Vec<(Ident, String)>,
    next_id: u32,
    header_written: bool,
    current_cycle: Option<u64>,
}

impl<W: Write> VcdRecorder<W> {
    /// Creates a recorder writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            id_map: Vec::new(),
            next_id: 0,
            header_written: false,
            current_cycle: None,
        }
    }

    /// Consumes the recorder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self) -> Result<(), SimError> {
        if self.header_written {
            return Ok(());
        }
        writeln!(self.writer, "$version")?;
        writeln!(self.writer, "  latchsim")?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$timescale")?;
        writeln!(self.writer, "  1ns")?;
        writeln!(self.writer, "$end")?;
        self.header_written = true;
        Ok(())
    }

    /// Generates an identifier code from a sequential index.
    ///
    /// Indices of 94 and up get multi-character codes.
    fn make_id_code(index: u32) -> String {
        let mut result = String::new();
        let mut idx = index;
        loop {
            let c = (b'!' + (idx % 94) as u8) as char;
            result.push(c);
            idx /= 94;
            if idx == 0 {
                break;
            }
            idx -= 1;
        }
        result
    }
}

impl<W: Write> WaveformRecorder for VcdRecorder<W> {
    fn register_signal(&mut self, id: Ident, name: &str) -> Result<(), SimError> {
        self.write_header()?;
        let id_code = Self::make_id_code(self.next_id);
        self.next_id += 1;
        writeln!(self.writer, "$var wire 1 {id_code} {name} $end")?;
        self.id_map.push((id, id_code));
        Ok(())
    }

    fn begin_scope(&mut self, name: &str) -> Result<(), SimError> {
        self.write_header()?;
        writeln!(self.writer, "$scope module {name} $end")?;
        Ok(())
    }

    fn end_scope(&mut self) -> Result<(), SimError> {
        writeln!(self.writer, "$upscope $end")?;
        Ok(())
    }

    fn record_change(&mut self, cycle: u64, id: Ident, value: bool) -> Result<(), SimError> {
        self.write_header()?;

        if self.current_cycle != Some(cycle) {
            if self.current_cycle.is_none() {
                writeln!(self.writer, "$enddefinitions $end")?;
                writeln!(self.writer, "$dumpvars")?;
            }
            writeln!(self.writer, "#{cycle}")?;
            self.current_cycle = Some(cycle);
        }

        let (_, id_code) = self
            .id_map
            .iter()
            .find(|(sid, _)| *sid == id)
            .ok_or(SimError::UnregisteredWaveformSignal(id.as_raw()))?;
        let bit = if value { '1' } else { '0' };
        writeln!(self.writer, "{bit}{id_code}")?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), SimError> {
        if self.current_cycle.is_none() {
            self.write_header()?;
            writeln!(self.writer, "$enddefinitions $end")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Replays the input and output traces of a completed circuit into `recorder`.
///
/// Each signal appears once even when it is both an input and an output.
/// Values are written at cycle 0 and afterwards only when they change.
pub fn record_run(circuit: &Circuit, recorder: &mut dyn WaveformRecorder) -> Result<(), SimError> {
    if circuit.phase() != SimPhase::Completed {
        return Err(SimError::InvalidPhase {
            operation: "record a waveform".to_string(),
            phase: circuit.phase(),
        });
    }

    let mut seen = HashSet::new();
    let traces: Vec<_> = circuit
        .siminputs()
        .iter()
        .chain(circuit.simoutputs())
        .filter(|t| seen.insert(t.signal))
        .collect();

    recorder.begin_scope(circuit.name())?;
    for trace in &traces {
        recorder.register_signal(trace.signal, circuit.interner().resolve(trace.signal))?;
    }
    recorder.end_scope()?;

    for cycle in 0..circuit.simulation_length() {
        for trace in &traces {
            let Some(value) = trace.get(cycle) else {
                continue;
            };
            let changed = cycle == 0 || trace.get(cycle - 1) != Some(value);
            if changed {
                recorder.record_change(cycle as u64, trace.signal, value)?;
            }
        }
    }
    recorder.finalize()
}
