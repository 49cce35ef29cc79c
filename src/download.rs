//! Conditional download.
//!
//! A destination that already exists is never fetched again, overwritten
//! or checked. Each new download streams into its own temporary file next
//! to the destination and is renamed into place once the body has been
//! written and synced. Overlapping downloads to one destination never share
//! a temporary file; the last rename wins.

use crate::transport::Transport;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Destination already existed
    Skipped,
    /// Destination was written with this many bytes
    Downloaded(u64),
}

pub fn download(transport: &dyn Transport, url: &str, dest: &Path, quiet: bool) -> Result<DownloadOutcome> {
    if dest.exists() {
        if !quiet {
            println!("{} already present: {}", "→".dimmed(), dest.display());
        }
        return Ok(DownloadOutcome::Skipped);
    }

    if !quiet {
        println!(
            "{} downloading: url={}, target={}",
            "⬇".blue(),
            url,
            dest.display()
        );
    }

    let fetched = transport.get(url)?;

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(fetched.content_length.unwrap_or(0))
    };
    pb.set_style(ProgressStyle::default_bar()
        .template("{spinner:.blue} [{elapsed_precise}] [{bar:40.green/black}] {bytes}/{total_bytes} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_chars("◐◓◑◒")
        .progress_chars("━━╸"));

    // The temporary file is deleted on drop, so every early return below
    // leaves nothing behind.
    let mut part = partial_file(dest)?;
    let written = match write_body(fetched.reader, &mut part, &pb) {
        Ok(n) => n,
        Err(e) => {
            pb.abandon();
            return Err(e);
        }
    };

    part.persist(dest)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move download into {}", dest.display()))?;

    pb.finish_with_message("Download complete");
    Ok(DownloadOutcome::Downloaded(written))
}

/// Uniquely named `.<dest name>.<random>.part` in the destination directory.
fn partial_file(dest: &Path) -> Result<NamedTempFile> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".part")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))
}

fn write_body(mut reader: Box<dyn Read>, part: &mut NamedTempFile, pb: &ProgressBar) -> Result<u64> {
    let mut buffer = [0; 8192];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buffer).context("Download interrupted")?;
        if n == 0 {
            break;
        }
        part.write_all(&buffer[..n])
            .with_context(|| format!("Failed to write {}", part.path().display()))?;
        total += n as u64;
        pb.inc(n as u64);
    }

    part.as_file()
        .sync_all()
        .with_context(|| format!("Failed to sync {}", part.path().display()))?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;
    use crate::transport::{Fetched, Transport};
    use std::fs;
    use std::path::PathBuf;
    use std::thread;
    use std::time::Duration;

    /// Only entry names in `dir`, sorted.
    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Yields `chunks` blocks of `byte`, sleeping before each one.
    struct SlowBody {
        byte: u8,
        chunks: usize,
        delay: Duration,
    }

    impl Read for SlowBody {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.chunks == 0 {
                return Ok(0);
            }
            thread::sleep(self.delay);
            self.chunks -= 1;
            let n = buf.len().min(4096);
            buf[..n].fill(self.byte);
            Ok(n)
        }
    }

    struct SlowTransport(u8);

    impl Transport for SlowTransport {
        fn get(&self, _url: &str) -> Result<Fetched> {
            Ok(Fetched {
                reader: Box::new(SlowBody {
                    byte: self.0,
                    chunks: 16,
                    delay: Duration::from_millis(10),
                }),
                content_length: Some(16 * 4096),
            })
        }
    }

    /// Creates a non-empty directory at `dest` while the body is read.
    struct DirAppearsBody {
        dest: PathBuf,
        done: bool,
    }

    impl Read for DirAppearsBody {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.done {
                return Ok(0);
            }
            self.done = true;
            fs::create_dir_all(self.dest.join("inner"))?;
            buf[0] = b'M';
            Ok(1)
        }
    }

    struct DirAppearsTransport(PathBuf);

    impl Transport for DirAppearsTransport {
        fn get(&self, _url: &str) -> Result<Fetched> {
            Ok(Fetched {
                reader: Box::new(DirAppearsBody {
                    dest: self.0.clone(),
                    done: false,
                }),
                content_length: None,
            })
        }
    }

    const URL: &str = "https://example.invalid/dist/rust-nightly-x86_64-pc-windows-msvc.exe";

    #[test]
    fn test_download_writes_body_verbatim() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("rust.exe");
        let body = vec![0u8, 1, 2, 255, b'M', b'Z'];
        let transport = MockTransport::default().with(URL, body.clone());

        let outcome = download(&transport, URL, &dest, true).unwrap();

        assert_eq!(outcome, DownloadOutcome::Downloaded(body.len() as u64));
        assert_eq!(fs::read(&dest).unwrap(), body);
        assert_eq!(dir_entries(tmp.path()), vec!["rust.exe"]);
    }

    #[test]
    fn test_download_twice_fetches_once() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("rust.exe");
        let transport = MockTransport::default().with(URL, "installer");

        download(&transport, URL, &dest, true).unwrap();
        let second = download(&transport, URL, &dest, true).unwrap();

        assert_eq!(second, DownloadOutcome::Skipped);
        assert_eq!(transport.count(URL), 1);
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("rust.exe");
        fs::write(&dest, "stale but kept").unwrap();
        let transport = MockTransport::default().with(URL, "fresh");

        let outcome = download(&transport, URL, &dest, true).unwrap();

        assert_eq!(outcome, DownloadOutcome::Skipped);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "stale but kept");
        assert!(transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_transport_error_propagates_and_leaves_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("rust.exe");
        let transport = MockTransport::default();

        assert!(download(&transport, URL, &dest, true).is_err());
        assert!(!dest.exists());
        assert!(dir_entries(tmp.path()).is_empty());
    }

    #[test]
    fn test_missing_parent_dir_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("no-such-dir").join("rust.exe");
        let transport = MockTransport::default().with(URL, "x");

        assert!(download(&transport, URL, &dest, true).is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_overlapping_downloads_both_complete() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("rust.exe");

        let first = {
            let dest = dest.clone();
            thread::spawn(move || download(&SlowTransport(b'A'), URL, &dest, true).unwrap())
        };
        thread::sleep(Duration::from_millis(50));
        let second = {
            let dest = dest.clone();
            thread::spawn(move || download(&SlowTransport(b'B'), URL, &dest, true).unwrap())
        };

        let first = first.join().unwrap();
        let second = second.join().unwrap();

        assert_eq!(first, DownloadOutcome::Downloaded(16 * 4096));
        assert_eq!(second, DownloadOutcome::Downloaded(16 * 4096));
        let bytes = fs::read(&dest).unwrap();
        assert_eq!(bytes.len(), 16 * 4096);
        assert!(bytes.iter().all(|b| *b == bytes[0]));
        assert_eq!(dir_entries(tmp.path()), vec!["rust.exe"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_rename_removes_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("rust.exe");
        let transport = DirAppearsTransport(dest.clone());

        let err = download(&transport, URL, &dest, true).unwrap_err();

        assert!(err.to_string().contains("Failed to move download"));
        assert!(dest.is_dir());
        assert_eq!(dir_entries(tmp.path()), vec!["rust.exe"]);
    }
}
