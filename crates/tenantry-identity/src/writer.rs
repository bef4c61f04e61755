//! CSV output for generated identities.

use std::io;
use std::path::Path;

use crate::error::IdentityError;

/// The single column the provisioner's operators expect.
pub const CSV_HEADER: &str = "email";

/// Write `emails` as CSV with a header row.
pub fn write_emails<W: io::Write>(emails: &[String], out: W) -> Result<(), IdentityError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([CSV_HEADER])?;
    for email in emails {
        writer.write_record([email])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `emails` to `path`, replacing any existing file.
pub fn save_emails(emails: &[String], path: &Path) -> Result<(), IdentityError> {
    let file = std::fs::File::create(path)?;
    write_emails(emails, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_then_one_address_per_line() {
        let mut out = Vec::new();
        write_emails(&["a@example.com".into(), "b@example.org".into()], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "email\na@example.com\nb@example.org\n"
        );
    }

    #[test]
    fn escapes_delimiters() {
        let mut out = Vec::new();
        write_emails(&["\"odd,one\"@example.com".into()], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "email\n\"\"\"odd,one\"\"@example.com\"\n"
        );
    }
}
