//! Process-wide entropy-seeded random stream.
//!
//! One long-lived producer thread exclusively owns a [`Prng`] seeded from
//! machine entropy (clock, time zone, process and user ids, environment,
//! working directory, host name, command line) and publishes pairs of limbs
//! through a bounded queue. Any number of threads can read the stream; every
//! published pair reaches exactly one reader, in production order. The stream
//! lives for the whole process, so a reader that no longer wants values
//! simply stops reading and the queue back-pressures the producer.

// Rust
use std::{
    env,
    sync::{mpsc, Mutex},
    thread,
};

// 3rd-party
use chrono::Local;
use once_cell::sync::Lazy;

// Local
use crate::{Hash, Prng};

mod session;
pub use session::{create_session, valid_session};

/// Pairs buffered between the producer and the readers.
const STREAM_DEPTH: usize = 3;

static STREAM: Lazy<EntropyStream> = Lazy::new(EntropyStream::start);

/// Returns the process-wide stream, starting the producer on first call.
pub fn entropy_stream() -> &'static EntropyStream {
    &STREAM
}

/// Receive-only handle onto the entropy-seeded stream.
pub struct EntropyStream {
    rx: Mutex<mpsc::Receiver<(u64, u64)>>,
}

impl EntropyStream {
    fn start() -> Self {
        let (tx, rx) = mpsc::sync_channel(STREAM_DEPTH);
        thread::spawn(move || {
            let mut prng = bootstrap_prng();
            loop {
                let pair = (prng.next_u64(), prng.next_u64());
                if tx.send(pair).is_err() {
                    return;
                }
            }
        });
        Self { rx: Mutex::new(rx) }
    }

    /// Returns the next published pair, blocking while the queue is empty.
    pub fn recv(&self) -> (u64, u64) {
        self.rx
            .lock()
            .expect("entropy stream reader panicked while receiving")
            .recv()
            .expect("entropy stream producer is process-lifetime")
    }
}

/// Packs the first 8 bytes of `s` into a little-endian word, zero padded.
fn pack_text(s: &str) -> u64 {
    let mut word = [0_u8; 8];
    let bytes = s.as_bytes();
    let n = bytes.len().min(8);
    word[..n].copy_from_slice(&bytes[..n]);
    u64::from_le_bytes(word)
}

/// Builds the producer generator and seeds it in two phases: a direct seed
/// with time and id words, then a seed derived from hashing the textual
/// machine state.
fn bootstrap_prng() -> Prng {
    let h = pack_text("sponge-rng");
    let ns = (h as u32).wrapping_add((h >> 32) as u32);

    let mut prng = Prng::new(4, 13, ns).expect("stream generator parameters are in range");

    let now = Local::now();
    let offset = now.offset();
    prng.seed(&[
        now.timestamp_nanos_opt().unwrap_or_default() as u64,
        pack_text(&offset.to_string()),
        (i64::from(offset.local_minus_utc()) + 1) as u64,
        uid().wrapping_add(1),
        gid().wrapping_add(1),
        u64::from(std::process::id()),
        ppid(),
    ]);

    let mut hash =
        Hash::new(12, 12, ns.wrapping_add(1)).expect("stream hash parameters are in range");
    for entry in machine_entropy() {
        hash.write(&[0]);
        hash.write(entry.as_bytes());
    }
    let digest = hash.sum();
    let mut limbs = [0_u64; 12];
    for (limb, bytes) in limbs.iter_mut().zip(digest.chunks_exact(8)) {
        let mut word = [0_u8; 8];
        word.copy_from_slice(bytes);
        *limb = u64::from_le_bytes(word);
    }
    prng.seed(&limbs);
    prng
}

/// Textual machine state: environment entries, working directory, host name
/// and command-line arguments. Anything unavailable degrades to an empty
/// string.
fn machine_entropy() -> Vec<String> {
    let mut entries: Vec<String> = env::vars_os()
        .map(|(k, v)| format!("{}={}", k.to_string_lossy(), v.to_string_lossy()))
        .collect();
    entries.push(
        env::current_dir()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );
    entries.push(hostname());
    entries.extend(env::args_os().map(|a| a.to_string_lossy().into_owned()));
    entries
}

fn uid() -> u64 {
    #[cfg(unix)]
    {
        u64::from(unsafe { libc::getuid() })
    }
    #[cfg(not(unix))]
    {
        0
    }
}

fn gid() -> u64 {
    #[cfg(unix)]
    {
        u64::from(unsafe { libc::getgid() })
    }
    #[cfg(not(unix))]
    {
        0
    }
}

fn ppid() -> u64 {
    #[cfg(unix)]
    {
        (unsafe { libc::getppid() }) as u64
    }
    #[cfg(not(unix))]
    {
        0
    }
}

fn hostname() -> String {
    #[cfg(unix)]
    {
        let mut buf = [0_u8; 256];
        let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
        if rc == 0 {
            let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
            return String::from_utf8_lossy(&buf[..len]).into_owned();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::{create_session, entropy_stream, valid_session};

    #[test]
    fn stream_delivers_pairs_to_any_thread() {
        let a = entropy_stream().recv();
        let b = thread::spawn(|| entropy_stream().recv())
            .join()
            .expect("reader thread");
        // pairs go to exactly one reader each
        assert_ne!(a, b);
    }

    #[test]
    fn concurrent_sessions_are_valid() {
        let readers: Vec<_> = (0..7)
            .map(|_| {
                thread::spawn(|| {
                    let mut ids = Vec::with_capacity(42);
                    for _ in 0..42 {
                        let sn = create_session();
                        assert!(valid_session(&sn), "bad session id {:?}", sn);
                        ids.push(sn);
                    }
                    ids
                })
            })
            .collect();

        let mut all: Vec<String> = readers
            .into_iter()
            .flat_map(|r| r.join().expect("reader thread"))
            .collect();
        assert_eq!(all.len(), 294);

        // each id came from a pair no other reader received
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 294);
    }
}
