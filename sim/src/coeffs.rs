//! Coefficient tables and the file formats they are exchanged in.
//!
//! Two formats are supported, matching what filter design tools emit for
//! hardware consumption: hex files with one 4-digit two's-complement word
//! per line (the `$readmemh` layout), and plain signed decimal lines.

use std::path::Path;

use anyhow::{bail, ensure, Context, Result};

use crate::utils::data_lines;

/// An immutable bank of filter coefficients, one signed 16-bit word per tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoeffTable {
    taps: Vec<i16>,
}

impl CoeffTable {
    pub fn new(taps: Vec<i16>) -> Result<Self> {
        ensure!(!taps.is_empty(), "coefficient table is empty");
        Ok(Self { taps })
    }

    /// Load a table, picking the format from the file extension: `.hex`
    /// reads hex words, anything else reads signed decimal lines.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("hex") => Self::from_hex_file(path),
            _ => Self::from_decimal_file(path),
        }
    }

    /// Read a `$readmemh`-style file: one 16-bit hex word per line, two's
    /// complement, with `//` and `#` comments tolerated.
    pub fn from_hex_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read file `{}`", path.display()))?;

        let mut taps = Vec::new();
        for (line_no, payload) in data_lines(&content) {
            ensure!(
                payload.len() <= 4,
                "{}:{}: `{}` does not fit a 16-bit word",
                path.display(),
                line_no,
                payload
            );
            let Ok(word) = u16::from_str_radix(payload, 16) else {
                bail!(
                    "{}:{}: `{}` is not a hex word",
                    path.display(),
                    line_no,
                    payload
                );
            };
            taps.push(word as i16);
        }
        let table = Self::new(taps)
            .with_context(|| format!("no coefficients in `{}`", path.display()))?;
        tracing::info!(
            "loaded {} coefficients from `{}`",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Read one signed decimal coefficient per line.
    pub fn from_decimal_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read file `{}`", path.display()))?;

        let mut taps = Vec::new();
        for (line_no, payload) in data_lines(&content) {
            let Ok(value) = payload.parse::<i16>() else {
                bail!(
                    "{}:{}: `{}` is not a signed 16-bit integer",
                    path.display(),
                    line_no,
                    payload
                );
            };
            taps.push(value);
        }
        let table = Self::new(taps)
            .with_context(|| format!("no coefficients in `{}`", path.display()))?;
        tracing::info!(
            "loaded {} coefficients from `{}`",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    pub fn taps(&self) -> &[i16] {
        &self.taps
    }
}
