//! The one filesystem surface the core exposes (§6): writing an encoded span
//! to a caller-chosen path. Everything else — locating schema files, writing
//! emitted source — is the external driver's job.

use std::io::Write;
use std::path::Path;

/// Writes `bytes` to `path`, creating or truncating it. This is the only
/// filesystem helper the core provides; it exists so a caller can persist an
/// encoded `Container`/`View` without reaching for `std::fs` directly.
pub fn write_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_the_exact_bytes_given() {
        let path = std::env::temp_dir().join(format!("asn1-ber-fs-test-{}", std::process::id()));
        write_bytes(&path, &[0x01, 0x02, 0x03]).unwrap();
        let read_back = std::fs::read(&path).unwrap();
        assert_eq!(read_back, vec![0x01, 0x02, 0x03]);
        std::fs::remove_file(&path).ok();
    }
}
