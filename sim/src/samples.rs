//! Sample stream files: signed decimal words in, decimal or CSV out.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};

use crate::utils::data_lines;

/// Read an input stream: one signed 16-bit integer per line, with the same
/// comment and blank-line tolerance as the coefficient formats.
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<i16>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read file `{}`", path.display()))?;

    let mut samples = Vec::new();
    for (line_no, payload) in data_lines(&content) {
        let Ok(value) = payload.parse::<i16>() else {
            bail!(
                "{}:{}: `{}` is not a signed 16-bit integer",
                path.display(),
                line_no,
                payload
            );
        };
        samples.push(value);
    }
    tracing::info!("read {} samples from `{}`", samples.len(), path.display());
    Ok(samples)
}

/// Write an output stream in the same one-word-per-line format.
pub fn write_samples(path: impl AsRef<Path>, samples: &[i16]) -> Result<()> {
    let path = path.as_ref();
    let mut out = String::with_capacity(samples.len() * 7);
    for s in samples {
        out.push_str(&s.to_string());
        out.push('\n');
    }
    std::fs::write(path, out)
        .with_context(|| format!("could not write file `{}`", path.display()))
}

/// Write paired input and output streams as `n,input,output` CSV rows.
pub fn write_csv(path: impl AsRef<Path>, inputs: &[i16], outputs: &[i16]) -> Result<()> {
    ensure!(
        inputs.len() == outputs.len(),
        "cannot pair {} inputs with {} outputs",
        inputs.len(),
        outputs.len()
    );
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .with_context(|| format!("could not write file `{}`", path.display()))?;
    let mut w = std::io::BufWriter::new(file);
    writeln!(w, "n,input,output")?;
    for (n, (i, o)) in inputs.iter().zip(outputs).enumerate() {
        writeln!(w, "{},{},{}", n, i, o)?;
    }
    w.flush()?;
    Ok(())
}
