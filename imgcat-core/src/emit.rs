// ABOUTME: Writes a transport decision to an output stream in a single operation
// ABOUTME: Never emits partial frames; I/O errors surface unchanged as WriteFailure

use crate::error::ImgcatError;
use crate::transport::WriteResult;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// Number of bytes written
    Written(usize),
    /// Nothing written because the terminal cannot display images
    Skipped(String),
}

pub fn emit<W: Write>(writer: &mut W, result: &WriteResult) -> Result<Emitted, ImgcatError> {
    match result {
        WriteResult::DirectWrite(bytes) | WriteResult::PassthroughWrite(bytes) => {
            write_all_flushed(writer, bytes)?;
            Ok(Emitted::Written(bytes.len()))
        }
        WriteResult::Unsupported(reason) => Ok(Emitted::Skipped(reason.clone())),
    }
}

/// One `write_all` followed by a flush, so nothing else can land mid-frame
pub fn write_all_flushed<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), ImgcatError> {
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
