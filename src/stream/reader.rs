//! Background ingestion of the input stream into the line store.
//!
//! The reader runs on its own named thread, mirroring how the input service polls the
//! terminal: blocking reads, a shared shutdown flag checked between reads, and a
//! `JoinHandle` owned by whoever started it. A blocking read on stdin cannot be
//! interrupted, so shutdown takes effect at the next chunk boundary or end-of-stream.

use crate::store::LineStore;
use crate::stream::decoder::LineDecoder;
use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Size of each raw read from the input stream.
const READ_CHUNK_BYTES: usize = 64 * 1024;

const THREAD_NAME: &str = "stream-reader";

/// Decodes a byte source into lines and appends each one to the store.
pub struct StreamReader<R> {
    source: R,
    store: Arc<LineStore>,
    decoder: LineDecoder,
}

impl<R: Read> StreamReader<R> {
    pub fn new(source: R, store: Arc<LineStore>) -> Self {
        Self {
            source,
            store,
            decoder: LineDecoder::new(),
        }
    }

    /// Read until end-of-stream or until `shutdown` is raised.
    ///
    /// Returns the number of lines appended. Normal end-of-stream is not an error;
    /// any other read failure ends the loop and is returned to the caller.
    pub fn run(mut self, shutdown: &AtomicBool) -> io::Result<u64> {
        let mut buf = vec![0u8; READ_CHUNK_BYTES];
        let mut appended: u64 = 0;

        while !shutdown.load(Ordering::SeqCst) {
            let read = match self.source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.flush_pending(&mut appended);
                    return Err(err);
                }
            };

            let store = &self.store;
            appended += self.decoder.feed(&buf[..read], |line| store.append(line)) as u64;
        }

        self.flush_pending(&mut appended);
        Ok(appended)
    }

    fn flush_pending(&mut self, appended: &mut u64) {
        if let Some(line) = self.decoder.finish() {
            self.store.append(line);
            *appended += 1;
        }
    }
}

impl<R: Read + Send + 'static> StreamReader<R> {
    /// Start the reader on a dedicated thread.
    pub fn spawn(self) -> io::Result<ReaderHandle> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || {
                log::debug!("stream reader started");
                let result = self.run(&flag);
                match &result {
                    Ok(lines) => log::info!("input stream ended after {lines} lines"),
                    Err(err) => log::warn!("input stream read failed: {err}"),
                }
                result
            })?;

        Ok(ReaderHandle { shutdown, handle })
    }
}

/// Owning handle to a running stream reader.
pub struct ReaderHandle {
    shutdown: Arc<AtomicBool>,
    handle: thread::JoinHandle<io::Result<u64>>,
}

impl ReaderHandle {
    /// Ask the reader to stop after its current read returns.
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// True once the input stream has ended (or failed) and the thread exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the reader to exit and return the number of lines it appended.
    pub fn join(self) -> io::Result<u64> {
        self.handle
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "stream reader panicked"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Yields its chunks one read at a time, then fails or ends.
    struct ChunkedSource {
        chunks: Vec<Vec<u8>>,
        fail_at_end: bool,
    }

    impl Read for ChunkedSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                if self.fail_at_end {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
                }
                return Ok(0);
            }
            let chunk = self.chunks.remove(0);
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    fn collect(store: &LineStore) -> Vec<String> {
        let snapshot = store.snapshot();
        (0..snapshot.len())
            .filter_map(|i| snapshot.get(i).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_reads_until_end_of_stream() {
        let store = Arc::new(LineStore::with_capacity(8));
        let reader = StreamReader::new(Cursor::new(b"a\nb\nc".to_vec()), Arc::clone(&store));

        let count = reader.run(&AtomicBool::new(false)).unwrap();
        assert_eq!(count, 3);
        assert_eq!(collect(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_chunk_boundaries_do_not_split_lines() {
        let store = Arc::new(LineStore::with_capacity(8));
        let source = ChunkedSource {
            chunks: vec![b"alpha er".to_vec(), b"ror\nbe".to_vec(), b"ta\n".to_vec()],
            fail_at_end: false,
        };

        let count = StreamReader::new(source, Arc::clone(&store))
            .run(&AtomicBool::new(false))
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(collect(&store), vec!["alpha error", "beta"]);
    }

    #[test]
    fn test_read_error_keeps_ingested_lines() {
        let store = Arc::new(LineStore::with_capacity(8));
        let source = ChunkedSource {
            chunks: vec![b"kept\npartial".to_vec()],
            fail_at_end: true,
        };

        let err = StreamReader::new(source, Arc::clone(&store))
            .run(&AtomicBool::new(false))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(collect(&store), vec!["kept", "partial"]);
    }

    #[test]
    fn test_shutdown_flag_stops_before_reading() {
        let store = Arc::new(LineStore::with_capacity(8));
        let reader = StreamReader::new(Cursor::new(b"never\n".to_vec()), Arc::clone(&store));

        let count = reader.run(&AtomicBool::new(true)).unwrap();
        assert_eq!(count, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_spawned_reader_joins_with_count() {
        let store = Arc::new(LineStore::with_capacity(8));
        let handle = StreamReader::new(Cursor::new(b"x\ny\n".to_vec()), Arc::clone(&store))
            .spawn()
            .unwrap();

        assert_eq!(handle.join().unwrap(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_spawned_reader_reports_finished_at_end_of_stream() {
        let store = Arc::new(LineStore::with_capacity(8));
        let handle = StreamReader::new(Cursor::new(b"only\n".to_vec()), Arc::clone(&store))
            .spawn()
            .unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !handle.is_finished() {
            assert!(std::time::Instant::now() < deadline, "reader never finished");
            thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(store.len(), 1);
        assert_eq!(handle.join().unwrap(), 1);
    }
}
