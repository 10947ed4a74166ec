use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::Result;

/// Write-then-rename wrapper so the output file appears atomically; a
/// failed render never leaves a truncated document behind.
pub(crate) struct PendingSvg {
    target: PathBuf,
    tmp: Option<NamedTempFile>,
}

impl PendingSvg {
    pub(crate) fn open(target: &Path) -> Result<Self> {
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let tmp = NamedTempFile::new_in(parent.unwrap_or(Path::new(".")))?;
        Ok(Self {
            target: target.to_path_buf(),
            tmp: Some(tmp),
        })
    }

    /// Move the finished document into place.
    pub(crate) fn finalize(mut self) -> Result<()> {
        let tmp = self.tmp.take().expect("pending write already finalized");
        tmp.persist(&self.target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Write for PendingSvg {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.tmp.as_mut().expect("pending write already finalized").write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.tmp.as_mut().expect("pending write already finalized").flush()
    }
}

pub(crate) fn write_header(writer: &mut impl Write, width: f64, height: f64) -> Result<()> {
    writeln!(
        writer,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#
    )?;
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

pub(crate) fn write_styles(writer: &mut impl Write) -> Result<()> {
    writeln!(
        writer,
        r##"<defs>
  <style>
    .county {{ stroke: none; }}
    .county:hover {{ opacity: 0.8; stroke: #111827; stroke-width: 0.5; }}
    .state {{ fill: none; stroke: #ffffff; stroke-width: 0.7; stroke-linejoin: round; }}
    .legend-cell {{ stroke: #111827; stroke-width: 0.3; }}
    .tick {{ stroke: #111827; stroke-width: 1; }}
    text {{ font-family: sans-serif; fill: #111827; }}
  </style>
</defs>"##
    )?;
    Ok(())
}

pub(crate) fn write_footer(writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}
