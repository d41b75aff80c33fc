#[cfg(test)]
pub mod test {
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use crate::hiera::HIERA_CONFIG_FILE;
    use crate::keystore::{KeyStoreType, SecretStore};

    /// A config mixing plain values, a near-miss of the sentinel, and two
    /// secrets held by [`seeded_store`].
    pub const APPLICATION_CONF: &str = r#"Config {
    NoSecret = "NO_SECRET"
    FourStars = "****"
    Secret = "SECRET"
    Redacted = "REDACTED"
}
"#;

    /// In-memory JCEKS store, password `CHANGEME`, holding `Config.Secret`
    /// and `Config.Redacted`.
    pub fn seeded_store() -> SecretStore {
        let mut store = SecretStore::create("CHANGEME", KeyStoreType::Jceks).unwrap();
        store.put("Config.Secret", "SECRET");
        store.put("Config.Redacted", "REDACTED");
        store
    }

    /// Lay out a hiera root: `hiera.conf` plus `(relative path, content)`
    /// fragments, creating parent directories as needed.
    pub fn write_hiera(root: &Path, hiera_text: &str, files: &[(&str, &str)]) {
        fs::write(root.join(HIERA_CONFIG_FILE), hiera_text).unwrap();
        for (relative, content) in files {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
    }

    /// Run `f` with a subscriber that records `WARN` and above, returning
    /// the result and the plain-text log.
    pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let writer = {
            let buf = Arc::clone(&buf);
            move || Captured(Arc::clone(&buf))
        };
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, f);
        let log = String::from_utf8(buf.lock().unwrap().clone()).unwrap();
        (out, log)
    }

    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn seeded_store_holds_two_secrets() {
        let store = seeded_store();
        assert_eq!(store.aliases(), vec!["Config.Redacted", "Config.Secret"]);
        assert_eq!(store.get("Config.Secret").as_deref(), Some("SECRET"));
    }

    #[test]
    fn capture_warnings_sees_only_warnings() {
        let ((), log) = capture_warnings(|| {
            tracing::info!("quiet");
            tracing::warn!("loud");
        });
        assert!(log.contains("loud"));
        assert!(!log.contains("quiet"));
    }

    #[test]
    fn write_hiera_creates_nested_fragments() {
        let dir = tempfile::TempDir::new().unwrap();
        write_hiera(dir.path(), "hierarchy = []", &[("a/b/c.conf", "x = 1")]);
        assert!(dir.path().join(HIERA_CONFIG_FILE).exists());
        assert_eq!(fs::read_to_string(dir.path().join("a/b/c.conf")).unwrap(), "x = 1");
    }
}
