//! Identifier normalizer
//!
//! The backend expects canonical UUID text. An earlier local-only mode
//! generated `product-<timestamp>` identifiers, which still appear in
//! migrated bookmarks. The check is advisory: a malformed identifier
//! cannot be repaired here, only flagged, and it will fail the remote
//! lookup it is used in.

use uuid::Uuid;

/// Whether an identifier is in the backend's canonical UUID format.
pub fn is_canonical_uuid(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Pass an identifier through, warning when it is not canonical.
pub fn ensure_uuid(id: &str) -> &str {
    if !is_canonical_uuid(id) {
        tracing::warn!(
            "Identifier {:?} is not a canonical UUID; passing through unchanged",
            id
        );
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Captures formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl LogSink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogSink {
        type Writer = LogSink;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn captured_logs(f: impl FnOnce()) -> String {
        let sink = LogSink::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        sink.contents()
    }

    #[test]
    fn test_legacy_identifier_is_warned_about() {
        let logs = captured_logs(|| {
            ensure_uuid("product-1714406400000");
        });

        assert!(logs.contains("WARN"), "expected a warning, got: {}", logs);
        assert!(logs.contains("product-1714406400000"));
    }

    #[test]
    fn test_canonical_identifier_is_silent() {
        let logs = captured_logs(|| {
            ensure_uuid("67e55044-10b1-426f-9247-bb680e5fe0c8");
        });

        assert!(logs.is_empty(), "expected no log output, got: {}", logs);
    }

    #[test]
    fn test_canonical_uuid_passes_unchanged() {
        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert!(is_canonical_uuid(id));
        assert_eq!(ensure_uuid(id), id);
    }

    #[test]
    fn test_legacy_identifier_passes_unchanged() {
        let id = "product-1714406400000";
        assert!(!is_canonical_uuid(id));
        // Warned, never rejected or rewritten
        assert_eq!(ensure_uuid(id), id);
    }

    #[test]
    fn test_empty_identifier_is_not_canonical() {
        assert!(!is_canonical_uuid(""));
        assert_eq!(ensure_uuid(""), "");
    }
}
