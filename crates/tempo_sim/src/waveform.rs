//! Waveform output: the collaborator contract and the VCD implementation.

use std::io::Write;

use tempo_common::{Logic, Value};

use crate::error::SimError;

/// The kernel-side waveform contract.
///
/// The kernel registers every design signal at load time, emits the header
/// once, and then emits the current time and every tracked signal's value
/// once before running the events of a time step and once after the NBA
/// drain.
pub trait Waveform {
    /// Registers a signal for tracking.
    fn add_signal(&mut self, name: &str, width: u32) -> Result<(), SimError>;

    /// Writes the header, including declarations for registered signals.
    fn emit_header(&mut self) -> Result<(), SimError>;

    /// Emits a timestamp marker.
    fn emit_time(&mut self, time: u64) -> Result<(), SimError>;

    /// Emits the value of a registered signal.
    fn emit_value(&mut self, name: &str, value: &Value) -> Result<(), SimError>;
}

/// IEEE 1364 Value Change Dump writer.
///
/// Signal identifier codes use printable ASCII starting from `!` (0x21),
/// going multi-character from index 94 upward.
pub struct VcdWriter<W: Write> {
    writer: W,
    /// Registered signals: (name, id code, width).
    vars: Vec<(String, String, u32)>,
}

impl<W: Write> VcdWriter<W> {
    /// Creates a VCD writer over the given output.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            vars: Vec::new(),
        }
    }

    /// Consumes the writer, returning the underlying output.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Generates a VCD identifier code from a sequential index.
    fn make_id_code(index: usize) -> String {
        let mut result = String::new();
        let mut idx = index;
        loop {
            result.push((b'!' + (idx % 94) as u8) as char);
            idx /= 94;
            if idx == 0 {
                break;
            }
            idx -= 1;
        }
        result
    }

    /// Formats a value as a VCD value string (without the id code).
    fn format_value(value: &Value, width: u32) -> String {
        let ch = |l: Logic| match l {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        };
        if width == 1 {
            let bit = if value.width() > 0 { value.get(0) } else { Logic::X };
            ch(bit).to_string()
        } else {
            let mut s = String::with_capacity(width as usize + 1);
            s.push('b');
            for i in (0..width).rev() {
                s.push(if i < value.width() { ch(value.get(i)) } else { 'x' });
            }
            s
        }
    }
}

impl<W: Write> Waveform for VcdWriter<W> {
    fn add_signal(&mut self, name: &str, width: u32) -> Result<(), SimError> {
        let code = Self::make_id_code(self.vars.len());
        self.vars.push((name.to_string(), code, width));
        Ok(())
    }

    fn emit_header(&mut self) -> Result<(), SimError> {
        writeln!(self.writer, "$date")?;
        writeln!(self.writer, "  Tempo simulation")?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$version")?;
        writeln!(self.writer, "  Tempo HDL simulator")?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$timescale")?;
        writeln!(self.writer, "  1ns")?;
        writeln!(self.writer, "$end")?;
        writeln!(self.writer, "$scope module top $end")?;
        for (name, code, width) in &self.vars {
            writeln!(self.writer, "$var wire {width} {code} {name} $end")?;
        }
        writeln!(self.writer, "$upscope $end")?;
        writeln!(self.writer, "$enddefinitions $end")?;
        writeln!(self.writer, "$dumpvars")?;
        Ok(())
    }

    fn emit_time(&mut self, time: u64) -> Result<(), SimError> {
        writeln!(self.writer, "#{time}")?;
        Ok(())
    }

    fn emit_value(&mut self, name: &str, value: &Value) -> Result<(), SimError> {
        let (_, code, width) = self
            .vars
            .iter()
            .find(|(n, _, _)| n == name)
            .ok_or_else(|| SimError::UnknownWaveformSignal {
                name: name.to_string(),
            })?;
        let text = Self::format_value(value, *width);
        if *width == 1 {
            writeln!(self.writer, "{text}{code}")?;
        } else {
            writeln!(self.writer, "{text} {code}")?;
        }
        Ok(())
    }
}
